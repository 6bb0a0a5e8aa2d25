use anyhow::Result;
use installer_client::CITIES;
use installer_ingest::{config::AppConfig, observability, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    observability::init_tracing();

    // Load configuration (defaults when no config file is present)
    let cfg = AppConfig::load()?;

    run::run_scrape(&cfg, &CITIES).await
}
