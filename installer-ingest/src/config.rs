use serde::Deserialize;
use std::{fs, ops::RangeInclusive, path::PathBuf};

const CONFIG_ENV: &str = "QPL_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "qpl-config.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub min_per_city: u32,
    pub max_per_city: u32,
    /// Simulated fetch latency per city; 0 disables the pause.
    pub latency_ms: u64,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            min_per_city: 5,
            max_per_city: 10,
            latency_ms: 500,
            seed: None,
        }
    }
}

impl ScrapeConfig {
    pub fn per_city(&self) -> RangeInclusive<u32> {
        self.min_per_city..=self.max_per_city
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub csv_path: PathBuf,
    pub ndjson_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("data/installers.csv"),
            ndjson_path: PathBuf::from("data/installers.ndjson"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scrape: ScrapeConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    /// Loads the file named by `QPL_CONFIG`, else `qpl-config.toml`.
    ///
    /// A missing default file means defaults; a missing file named through
    /// the environment is an error.
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        let (path, explicit) = match env::var(CONFIG_ENV) {
            Ok(p) => (p, true),
            Err(_) => (DEFAULT_CONFIG_PATH.to_string(), false),
        };

        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path, "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(anyhow::anyhow!("failed to read config {path}: {e}")),
        };

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let cfg: AppConfig = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.scrape.min_per_city > self.scrape.max_per_city {
            anyhow::bail!(
                "scrape.min_per_city ({}) must not exceed scrape.max_per_city ({})",
                self.scrape.min_per_city,
                self.scrape.max_per_city
            );
        }
        Ok(())
    }
}
