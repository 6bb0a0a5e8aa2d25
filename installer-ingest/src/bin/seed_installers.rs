use anyhow::Result;
use installer_ingest::{config::AppConfig, observability, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    observability::init_tracing();

    let cfg = AppConfig::load()?;

    run::run_seed(&cfg).await
}
