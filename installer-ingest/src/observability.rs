use tracing_subscriber::{filter::LevelFilter, EnvFilter};

pub fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    for directive in ["installer_ingest=info", "seed_installers=info"] {
        filter = filter.add_directive(directive.parse().unwrap_or_else(|_| LevelFilter::INFO.into()));
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
