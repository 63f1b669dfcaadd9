use std::path::{Component, Path, PathBuf};
use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// `RUST_LOG` wins over the verbosity flag when it is set.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "error" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let timer = LocalTime::new(format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]"
    ));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_timer(timer)
        .with_target(false)
        .init();
}

pub fn format_number(num: u64) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Absolute form of `path` with `.` segments dropped, for comparing user-given paths.
fn normalized_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    absolute
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

pub fn validate_args(args: &crate::args::Args, config: &Config) -> anyhow::Result<()> {
    if config.chart.width == 0 || config.chart.height == 0 {
        anyhow::bail!("chart width and height must be greater than 0");
    }

    if config.timeout_secs == Some(0) {
        anyhow::bail!("timeout_secs must be greater than 0");
    }

    if let Some(html) = &args.html {
        let chart = args.output.as_ref().unwrap_or(&config.output_path);
        if !args.no_chart && normalized_path(html) == normalized_path(chart) {
            anyhow::bail!("--html and the chart output must be different files");
        }
    }

    Ok(())
}
