//! Client for the Wikimedia per-article pageviews endpoint.
//!
//! One blocking GET per article and range: no retries, no caching. Any status
//! other than 200 is reported as [`CompareError::Fetch`] carrying the title and
//! status code. An empty `items` list is an empty series, not an error.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{info, warn};
use url::Url;

use crate::config::Config;
use crate::dates::{self, DateRange};
use crate::error::CompareError;
use crate::title::ArticleTitle;

const ACCESS: &str = "all-access";
const AGENT: &str = "user";
const GRANULARITY: &str = "daily";

#[derive(Debug, Deserialize)]
struct PageviewResponse {
    items: Vec<PageviewItem>,
}

#[derive(Debug, Deserialize)]
struct PageviewItem {
    timestamp: String,
    views: u64,
}

/// Daily view counts for one article, ordered by date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageviewSeries {
    pub title: ArticleTitle,
    pub views: BTreeMap<NaiveDate, u64>,
}

impl PageviewSeries {
    pub fn new(title: ArticleTitle, views: BTreeMap<NaiveDate, u64>) -> Self {
        Self { title, views }
    }

    pub fn empty(title: ArticleTitle) -> Self {
        Self::new(title, BTreeMap::new())
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn get(&self, date: &NaiveDate) -> Option<u64> {
        self.views.get(date).copied()
    }
}

pub struct PageviewClient {
    http: Client,
    api_base: Url,
    project: String,
}

impl PageviewClient {
    pub fn new(config: &Config) -> Result<Self, CompareError> {
        let api_base = Url::parse(&config.api_base)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| CompareError::InvalidEndpoint(config.api_base.clone()))?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            api_base,
            project: config.project.clone(),
        })
    }

    /// `{api_base}/{project}/all-access/user/{title}/daily/{YYYYMMDD}/{YYYYMMDD}`
    ///
    /// The title is pushed as a single encoded segment so `AC/DC` stays one segment.
    pub fn request_url(&self, title: &ArticleTitle, range: &DateRange) -> Url {
        let start = dates::format_api_date(range.start);
        let end = dates::format_api_date(range.end);

        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                self.project.as_str(),
                ACCESS,
                AGENT,
                title.as_str(),
                GRANULARITY,
                start.as_str(),
                end.as_str(),
            ]);
        }
        url
    }

    pub fn fetch(
        &self,
        title: &ArticleTitle,
        range: &DateRange,
    ) -> Result<PageviewSeries, CompareError> {
        if range.is_empty() {
            warn!(
                action = "skip",
                component = "pageview_fetch",
                title = %title,
                start = %range.start,
                end = %range.end,
                "Start date is after end date, nothing to fetch"
            );
            return Ok(PageviewSeries::empty(title.clone()));
        }

        let start_time = Instant::now();
        let url = self.request_url(title, range);
        info!(action = "start", component = "pageview_fetch", title = %title, url = %url, "Fetching pageviews");

        let response = self.http.get(url).send()?;
        let status = response.status();
        if status != StatusCode::OK {
            warn!(
                action = "complete",
                component = "pageview_fetch",
                title = %title,
                status = status.as_u16(),
                "Upstream returned an error status"
            );
            return Err(CompareError::Fetch {
                title: title.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        let series = parse_series(title, &body)?;

        info!(
            action = "complete",
            component = "pageview_fetch",
            title = %title,
            days = series.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Pageviews fetched"
        );
        Ok(series)
    }
}

/// Parses a pageviews response body. Records repeated for the same day keep the last count.
pub fn parse_series(title: &ArticleTitle, body: &str) -> Result<PageviewSeries, CompareError> {
    let response: PageviewResponse =
        serde_json::from_str(body).map_err(|e| CompareError::Decode(e.to_string()))?;

    let mut views = BTreeMap::new();
    for item in response.items {
        let date = dates::parse_api_timestamp(&item.timestamp)?;
        views.insert(date, item.views);
    }
    Ok(PageviewSeries::new(title.clone(), views))
}
