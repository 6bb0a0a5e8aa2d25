pub mod pipeline;
pub mod config;
pub mod sources;
pub mod sinks;
pub mod transform;
pub mod observability;
pub mod run;

pub use pipeline::{Pipeline, Envelope, PipelineError};
pub use run::{run_scrape, run_seed};
