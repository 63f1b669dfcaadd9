use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::info;

use crate::dates::{self, DateRange};
use crate::error::CompareError;
use crate::pageviews::{PageviewClient, PageviewSeries};
use crate::title::{self, ArticleTitle};

/// The four free-text inputs of a comparison, exactly as the user typed them.
#[derive(Debug, Clone, Default)]
pub struct ComparisonRequest {
    pub url1: String,
    pub url2: String,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub title1: ArticleTitle,
    pub title2: ArticleTitle,
    pub range: DateRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonRow {
    pub date: NaiveDate,
    pub first: u64,
    pub second: u64,
}

/// Outer join of two series on date, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonTable {
    pub first_title: ArticleTitle,
    pub second_title: ArticleTitle,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn headers(&self) -> [&str; 3] {
        ["Date", self.first_title.as_str(), self.second_title.as_str()]
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.rows.first()?.date, self.rows.last()?.date))
    }

    pub fn max_views(&self) -> u64 {
        self.rows
            .iter()
            .map(|row| row.first.max(row.second))
            .max()
            .unwrap_or(0)
    }
}

/// Checks fields in order: all present, both URLs yield titles, both dates parse.
pub fn validate_request(request: &ComparisonRequest) -> Result<ValidatedRequest, CompareError> {
    let fields = [&request.url1, &request.url2, &request.start, &request.end];
    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(CompareError::MissingFields);
    }

    let (title1, title2) = match (
        title::extract_title(&request.url1),
        title::extract_title(&request.url2),
    ) {
        (Some(title1), Some(title2)) => (title1, title2),
        _ => return Err(CompareError::InvalidUrl),
    };

    let start = dates::parse_input_date(&request.start)?;
    let end = dates::parse_input_date(&request.end)?;

    Ok(ValidatedRequest {
        title1,
        title2,
        range: DateRange::new(start, end),
    })
}

pub fn merge_series(first: &PageviewSeries, second: &PageviewSeries) -> ComparisonTable {
    let all_dates: BTreeSet<NaiveDate> = first
        .views
        .keys()
        .chain(second.views.keys())
        .copied()
        .collect();

    let rows = all_dates
        .into_iter()
        .map(|date| ComparisonRow {
            date,
            first: first.get(&date).unwrap_or(0),
            second: second.get(&date).unwrap_or(0),
        })
        .collect();

    ComparisonTable {
        first_title: first.title.clone(),
        second_title: second.title.clone(),
        rows,
    }
}

/// Validates the inputs, fetches both series one after the other and joins them.
pub fn compare_views(
    request: &ComparisonRequest,
    client: &PageviewClient,
) -> Result<ComparisonTable, CompareError> {
    let start_time = Instant::now();
    let validated = validate_request(request)?;
    info!(
        action = "start",
        component = "comparison",
        first = %validated.title1,
        second = %validated.title2,
        days = validated.range.num_days(),
        "Comparing pageviews"
    );

    let first = client.fetch(&validated.title1, &validated.range)?;
    let second = client.fetch(&validated.title2, &validated.range)?;
    let table = merge_series(&first, &second);

    info!(
        action = "complete",
        component = "comparison",
        rows = table.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Comparison completed"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(name: &str, points: &[(NaiveDate, u64)]) -> PageviewSeries {
        let title = title::extract_title(&format!("https://en.wikipedia.org/wiki/{}", name)).unwrap();
        PageviewSeries::new(title, points.iter().copied().collect::<BTreeMap<_, _>>())
    }

    fn request(url1: &str, url2: &str, start: &str, end: &str) -> ComparisonRequest {
        ComparisonRequest {
            url1: url1.to_string(),
            url2: url2.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    #[test]
    fn disjoint_dates_fill_zero() {
        let a = series("A", &[(ymd(2024, 1, 1), 10), (ymd(2024, 1, 3), 30)]);
        let b = series("B", &[(ymd(2024, 1, 2), 20)]);
        let table = merge_series(&a, &b);
        assert_eq!(
            table.rows,
            vec![
                ComparisonRow { date: ymd(2024, 1, 1), first: 10, second: 0 },
                ComparisonRow { date: ymd(2024, 1, 2), first: 0, second: 20 },
                ComparisonRow { date: ymd(2024, 1, 3), first: 30, second: 0 },
            ]
        );
    }

    #[test]
    fn overlapping_dates_keep_counts() {
        let a = series("A", &[(ymd(2024, 1, 1), 10), (ymd(2024, 1, 2), 11)]);
        let b = series("B", &[(ymd(2024, 1, 2), 22), (ymd(2024, 1, 1), 21)]);
        let table = merge_series(&a, &b);
        assert_eq!(table.len(), 2);
        for row in &table.rows {
            assert_eq!(Some(row.first), a.get(&row.date));
            assert_eq!(Some(row.second), b.get(&row.date));
        }
        assert_eq!(table.headers(), ["Date", "A", "B"]);
        assert_eq!(table.max_views(), 22);
        assert_eq!(table.date_bounds(), Some((ymd(2024, 1, 1), ymd(2024, 1, 2))));
    }

    #[test]
    fn empty_series_give_empty_table() {
        let table = merge_series(&series("A", &[]), &series("B", &[]));
        assert!(table.is_empty());
        assert_eq!(table.date_bounds(), None);
        assert_eq!(table.max_views(), 0);
    }

    #[test]
    fn missing_field_comes_first() {
        let err = validate_request(&request("not a url", "", "bad", "2024-01-01")).unwrap_err();
        assert!(matches!(err, CompareError::MissingFields));
        let err = validate_request(&request("a", "b", "   ", "d")).unwrap_err();
        assert!(matches!(err, CompareError::MissingFields));
    }

    #[test]
    fn invalid_url_before_dates() {
        let err = validate_request(&request(
            "https://en.wikipedia.org/",
            "https://en.wikipedia.org/wiki/Samsung",
            "garbage",
            "2024-01-03",
        ))
        .unwrap_err();
        assert!(matches!(err, CompareError::InvalidUrl));
    }

    #[test]
    fn bad_date_is_reported() {
        let err = validate_request(&request(
            "https://en.wikipedia.org/wiki/Apple_Inc.",
            "https://en.wikipedia.org/wiki/Samsung",
            "2024-01-01",
            "Jan 3",
        ))
        .unwrap_err();
        assert!(matches!(err, CompareError::InvalidDate(ref d) if d == "Jan 3"));
    }

    #[test]
    fn valid_request() {
        let validated = validate_request(&request(
            "https://en.wikipedia.org/wiki/Apple_Inc.",
            "https://en.wikipedia.org/wiki/Samsung",
            "2024-01-01",
            "2024-01-03",
        ))
        .unwrap();
        assert_eq!(validated.title1.as_str(), "Apple_Inc.");
        assert_eq!(validated.title2.as_str(), "Samsung");
        assert_eq!(validated.range.num_days(), 3);
    }
}
