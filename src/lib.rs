pub mod app;
pub mod args;
pub mod chart;
pub mod compare;
pub mod config;
pub mod dates;
pub mod error;
pub mod pageviews;
pub mod stats;
pub mod table;
pub mod title;
pub mod utils;

pub use args::Args;
pub use compare::{compare_views, ComparisonRequest, ComparisonTable};
pub use config::{init_default_config, load_config, Config};
pub use error::CompareError;
pub use pageviews::{PageviewClient, PageviewSeries};
pub use stats::SeriesSummary;
