use percent_encoding::percent_decode_str;
use std::fmt;
use url::{ParseError, Url};

/// Base for links pasted without a scheme, so a bare `Samsung` still names an article.
const RELATIVE_BASE: &str = "https://en.wikipedia.org/wiki/";

/// Wikipedia article title as used by the pageviews API, e.g. `Apple_Inc.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleTitle(String);

impl ArticleTitle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the article title from the last path segment of `url`.
///
/// Returns `None` when the URL cannot be parsed or its final segment is empty
/// (`https://en.wikipedia.org/`). Input without a scheme is resolved against
/// `https://en.wikipedia.org/wiki/`, so only its last segment matters.
pub fn extract_title(url: &str) -> Option<ArticleTitle> {
    let url = url.trim();
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(ParseError::RelativeUrlWithoutBase) => {
            Url::parse(RELATIVE_BASE).ok()?.join(url).ok()?
        }
        Err(_) => return None,
    };
    if parsed.cannot_be_a_base() {
        return None;
    }

    let segment = parsed.path().rsplit('/').next()?;
    let decoded = percent_decode_str(segment).decode_utf8_lossy();
    if decoded.is_empty() {
        return None;
    }
    Some(ArticleTitle(decoded.into_owned()))
}
