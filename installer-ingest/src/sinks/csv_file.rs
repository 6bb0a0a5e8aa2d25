use std::{
    fs::File,
    io,
    marker::PhantomData,
    path::PathBuf,
    time::{Duration, SystemTime},
};

use futures::StreamExt;
use serde::Serialize;

use crate::pipeline::{Envelope, PipelineError, Sink};

/// Writes `records` as CSV: a header row followed by one row per record.
///
/// The header comes from the field names of the first record; later records
/// are assumed to share that shape. A record with a different field count
/// fails with a csv error. Returns the number of data rows written.
pub fn write_records<T: Serialize, W: io::Write>(writer: W, records: &[T]) -> Result<usize, csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(records.len())
}

/// Time from the first record entering the pipeline until now.
fn elapsed_since(first_received: Option<SystemTime>) -> Duration {
    first_received
        .and_then(|t| SystemTime::now().duration_since(t).ok())
        .unwrap_or_default()
}

/// Collects the whole upstream stream, then writes it to a CSV file in one go.
///
/// An empty stream leaves the destination untouched and ends with
/// [`PipelineError::EmptyDataset`]. The destination's parent directory must
/// already exist.
pub struct CsvFileSink<T> {
    path: PathBuf,
    _marker: PhantomData<fn(T)>,
}

impl<T> CsvFileSink<T> {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    fn write_file(&self, records: &[T]) -> Result<usize, PipelineError>
    where
        T: Serialize,
    {
        let file = File::create(&self.path).map_err(|e| {
            PipelineError::Sink(format!("failed to create {}: {e}", self.path.display()))
        })?;
        write_records(file, records)
            .map_err(|e| PipelineError::Sink(format!("failed to write {}: {e}", self.path.display())))
    }
}

#[async_trait::async_trait]
impl<T> Sink<T> for CsvFileSink<T>
where
    T: Serialize + Send + 'static,
{
    async fn run<S>(&self, mut input: S) -> Result<(), PipelineError>
    where
        S: futures::Stream<Item = Result<Envelope<T>, PipelineError>> + Send + Unpin + 'static,
    {
        let mut records: Vec<T> = Vec::new();
        let mut first_received: Option<SystemTime> = None;

        while let Some(item) = input.next().await {
            match item {
                Ok(env) => {
                    first_received = Some(first_received.map_or(env.received_at, |t| t.min(env.received_at)));
                    records.push(env.payload);
                }
                Err(e) => {
                    tracing::error!(error = %e, "error in upstream pipeline for CsvFileSink");
                    continue;
                }
            }
        }

        tracing::info!(path = %self.path.display(), "saving data");

        if records.is_empty() {
            tracing::error!(path = %self.path.display(), "no data to save");
            metrics::counter!("csv_sink_empty_datasets_total").increment(1);
            return Err(PipelineError::EmptyDataset);
        }

        let written = self.write_file(&records)?;
        metrics::counter!("csv_sink_written_records_total").increment(written as u64);

        let elapsed = elapsed_since(first_received);
        metrics::histogram!("csv_sink_end_to_end_latency_seconds").record(elapsed.as_secs_f64());

        tracing::info!(
            rows = written,
            path = %self.path.display(),
            elapsed_ms = elapsed.as_millis() as u64,
            "data saved successfully"
        );

        Ok(())
    }
}
