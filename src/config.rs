use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

// Include default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../wikitrends.default.toml");

pub const DEFAULT_CONFIG_FILE: &str = "wikitrends.toml";

pub const DEFAULT_API_BASE: &str =
    "https://wikimedia.org/api/rest_v1/metrics/pageviews/per-article";
pub const DEFAULT_PROJECT: &str = "en.wikipedia.org";
pub const DEFAULT_USER_AGENT: &str = "WikiTrendsApp/1.0 (mailto:your_email@example.com)";
pub const DEFAULT_OUTPUT_PATH: &str = "output_plot.png";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the per-article pageviews endpoint.
    pub api_base: String,
    pub project: String,
    pub user_agent: String,
    pub output_path: PathBuf,
    /// None leaves the HTTP client's default in place.
    pub timeout_secs: Option<u64>,
    pub chart: ChartConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            project: DEFAULT_PROJECT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            timeout_secs: None,
            chart: ChartConfig::default(),
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn parse_config(content: &str, source: &Path) -> Result<Config> {
    toml::from_str(content).with_context(|| format!("Invalid config file {:?}", source))
}

/// Loads the config from `config_path`, else `wikitrends.toml` in the working
/// directory, else the embedded defaults.
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let start_time = Instant::now();

    let config = if let Some(path) = config_path {
        info!(action = "load", component = "config_file", file_path = ?path, "Loading config from specified file");
        if !path.exists() {
            anyhow::bail!("Config file not found: {:?}", path);
        }
        parse_config(&fs::read_to_string(path)?, path)?
    } else {
        let default_file = Path::new(DEFAULT_CONFIG_FILE);
        if default_file.exists() {
            info!(action = "load", component = "default_config_file", file_path = ?default_file, "Loading config from default file");
            parse_config(&fs::read_to_string(default_file)?, default_file)?
        } else {
            info!(
                action = "load",
                component = "embedded_config",
                "Using embedded default config"
            );
            parse_config(DEFAULT_CONFIG, Path::new("<embedded>"))?
        }
    };

    info!(
        action = "complete",
        component = "config_loading",
        api_base = %config.api_base,
        output_path = ?config.output_path,
        duration_ms = start_time.elapsed().as_millis(),
        "Configuration loaded"
    );
    Ok(config)
}

/// Writes the embedded defaults to `wikitrends.toml` in `dir`.
pub fn init_default_config(dir: &Path) -> Result<PathBuf> {
    let target = dir.join(DEFAULT_CONFIG_FILE);

    if target.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first if you want to reinitialize.",
            DEFAULT_CONFIG_FILE
        );
    }

    fs::write(&target, DEFAULT_CONFIG)?;
    Ok(target)
}
