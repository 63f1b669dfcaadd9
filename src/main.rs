use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::{error, warn};

use wikitrends::app::{run_comparison, OutputPaths};
use wikitrends::table::print_comparison_results;
use wikitrends::utils::{setup_logging, validate_args};
use wikitrends::{init_default_config, load_config, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    if args.init {
        let path = init_default_config(Path::new("."))?;
        println!("Created {} with default settings", path.display());
        return Ok(());
    }

    let config = load_config(args.config.as_deref())?;
    validate_args(&args, &config)?;

    let outputs = OutputPaths::from_args(&args, &config);
    match run_comparison(&args.comparison_request(), &config, &outputs) {
        Ok(outcome) => {
            print_comparison_results(
                &outcome.table,
                &outcome.summaries,
                outcome.chart.as_deref(),
            );
            Ok(())
        }
        Err(e) => {
            if e.is_input_error() {
                warn!(error = %e, "Comparison rejected before fetching");
            } else {
                error!(error = ?e, "Comparison failed");
            }
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
