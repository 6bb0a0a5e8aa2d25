//! Top-level runs behind the binaries.

use std::{fs, path::Path, sync::Arc, time::Duration};

use installer_client::{City, InstallerImport, InstallerRecord};

use crate::{
    config::AppConfig,
    pipeline::{Pipeline, PipelineError},
    sinks::{CsvFileSink, NdjsonFileSink},
    sources::{InstallerCsvFileSource, QplScrapeSource},
    transform,
};

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent().filter(|d| !d.as_os_str().is_empty()) {
        Some(dir) => fs::create_dir_all(dir),
        None => Ok(()),
    }
}

/// Scrapes `cities` and writes the CSV named in `cfg.output.csv_path`.
///
/// The output directory is created first, including intermediate segments.
/// An empty scrape is logged by the sink and counts as success; nothing is
/// written in that case.
pub async fn run_scrape(cfg: &AppConfig, cities: &[City]) -> anyhow::Result<()> {
    let scrape_cfg = &cfg.scrape;
    let csv_path = &cfg.output.csv_path;

    ensure_parent_dir(csv_path)?;

    tracing::info!(cities = cities.len(), "initiating scrape of utility qualified product lists");

    let source = QplScrapeSource::new(
        cities.to_vec(),
        scrape_cfg.per_city(),
        Duration::from_millis(scrape_cfg.latency_ms),
        scrape_cfg.seed,
    )?;
    let pipeline: Pipeline<_, InstallerRecord, _> = Pipeline {
        source,
        transforms: Vec::new(),
        sink: CsvFileSink::new(csv_path),
    };

    match pipeline.run().await {
        Ok(()) => Ok(()),
        // Already reported by the sink; nothing was written.
        Err(PipelineError::EmptyDataset) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Reads the scraped CSV back, normalizes it and writes NDJSON for import.
///
/// A missing CSV is logged and treated as success with no output.
pub async fn run_seed(cfg: &AppConfig) -> anyhow::Result<()> {
    let csv_path = &cfg.output.csv_path;
    let ndjson_path = &cfg.output.ndjson_path;

    tracing::info!(path = %csv_path.display(), "seeding: reading installer data");

    if !csv_path.exists() {
        tracing::error!(path = %csv_path.display(), "data file not found, run the scraper first");
        return Ok(());
    }

    ensure_parent_dir(ndjson_path)?;

    let pipeline: Pipeline<_, InstallerRecord, _> = Pipeline {
        source: InstallerCsvFileSource::new(csv_path),
        transforms: vec![Arc::new(transform::InstallerNormalization)],
        sink: NdjsonFileSink::<InstallerImport>::new(ndjson_path),
    };

    pipeline.run().await?;

    Ok(())
}
