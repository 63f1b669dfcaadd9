use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use crate::compare::{compare_views, ComparisonRequest, ComparisonTable};
use crate::config::Config;
use crate::error::CompareError;
use crate::pageviews::PageviewClient;
use crate::stats::{summarize, SeriesSummary};
use crate::{chart, table, Args};

/// Where the outputs of one comparison go.
#[derive(Debug, Clone, Default)]
pub struct OutputPaths {
    pub chart: Option<PathBuf>,
    pub html: Option<PathBuf>,
}

impl OutputPaths {
    pub fn from_args(args: &Args, config: &Config) -> Self {
        let chart = if args.no_chart {
            None
        } else {
            Some(args.output.clone().unwrap_or_else(|| config.output_path.clone()))
        };
        Self {
            chart,
            html: args.html.clone(),
        }
    }
}

#[derive(Debug)]
pub struct ComparisonOutcome {
    pub table: ComparisonTable,
    pub summaries: (SeriesSummary, SeriesSummary),
    /// Set only when a chart was actually drawn.
    pub chart: Option<PathBuf>,
}

/// Runs one comparison end to end. Nothing is written unless both fetches succeed.
pub fn run_comparison(
    request: &ComparisonRequest,
    config: &Config,
    outputs: &OutputPaths,
) -> Result<ComparisonOutcome, CompareError> {
    let total_start_time = Instant::now();
    info!("Starting pageview comparison");

    let client = PageviewClient::new(config)?;
    let table = compare_views(request, &client)?;

    if let Some(path) = &outputs.html {
        table::write_html(&table, path)?;
        info!(action = "complete", component = "html_export", path = ?path, "HTML table written");
    }

    let chart = match &outputs.chart {
        Some(path) => {
            if chart::render_chart(&table, path, &config.chart)? {
                Some(path.clone())
            } else {
                warn!(
                    action = "skip",
                    component = "chart",
                    "No pageview data in range, chart not drawn"
                );
                None
            }
        }
        None => None,
    };

    let summaries = summarize(&table);

    info!(
        "Comparison completed successfully in {}ms",
        total_start_time.elapsed().as_millis()
    );

    Ok(ComparisonOutcome {
        table,
        summaries,
        chart,
    })
}
