use clap::Parser;
use std::path::PathBuf;

use crate::compare::ComparisonRequest;

#[derive(Parser, Debug)]
#[command(
    name = "wikitrends",
    about = "Compare daily Wikipedia page views of two articles over a date range",
    version,
    long_about = None
)]
pub struct Args {
    /// First article URL, e.g. https://en.wikipedia.org/wiki/Apple_Inc.
    pub url1: Option<String>,

    /// Second article URL, e.g. https://en.wikipedia.org/wiki/Samsung
    pub url2: Option<String>,

    /// Start date (YYYY-MM-DD)
    pub start: Option<String>,

    /// End date (YYYY-MM-DD), inclusive
    pub end: Option<String>,

    /// Chart image path (overrides the config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the table as HTML to this path
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Skip drawing the chart
    #[arg(long, conflicts_with = "output")]
    pub no_chart: bool,

    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Initialize wikitrends.toml with the default settings
    #[arg(long)]
    pub init: bool,
}

impl Args {
    /// Missing positionals become empty fields so validation reports them.
    pub fn comparison_request(&self) -> ComparisonRequest {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        ComparisonRequest {
            url1: field(&self.url1),
            url2: field(&self.url2),
            start: field(&self.start),
            end: field(&self.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positionals_fill_request() {
        let args = Args::parse_from([
            "wikitrends",
            "https://en.wikipedia.org/wiki/Apple_Inc.",
            "https://en.wikipedia.org/wiki/Samsung",
            "2024-01-01",
            "2024-01-03",
            "-o",
            "plot.png",
        ]);
        let request = args.comparison_request();
        assert_eq!(request.url1, "https://en.wikipedia.org/wiki/Apple_Inc.");
        assert_eq!(request.end, "2024-01-03");
        assert_eq!(args.output, Some(PathBuf::from("plot.png")));
    }

    #[test]
    fn missing_positionals_are_empty() {
        let args = Args::parse_from(["wikitrends", "https://en.wikipedia.org/wiki/Samsung"]);
        let request = args.comparison_request();
        assert_eq!(request.url2, "");
        assert_eq!(request.start, "");
    }

    #[test]
    fn no_chart_conflicts_with_output() {
        assert!(Args::try_parse_from(["wikitrends", "--no-chart", "-o", "x.png"]).is_err());
    }
}
