use std::{
    fs::File,
    io::{BufWriter, Write},
    marker::PhantomData,
    path::PathBuf,
};

use futures::StreamExt;
use serde::Serialize;

use crate::pipeline::{Envelope, PipelineError, Sink};

/// Writes every accepted record as one JSON object per line.
///
/// Incoming records are converted into `O` before encoding. The file is
/// created (or truncated) even when no record arrives.
pub struct NdjsonFileSink<O> {
    path: PathBuf,
    _marker: PhantomData<fn(O)>,
}

impl<O> NdjsonFileSink<O> {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }
}

fn write_lines<T: Serialize, W: Write>(out: W, records: &[T]) -> Result<(), PipelineError> {
    let mut out = BufWriter::new(out);
    for record in records {
        serde_json::to_writer(&mut out, record)
            .map_err(|e| PipelineError::Sink(format!("failed to encode record: {e}")))?;
        out.write_all(b"\n")
            .map_err(|e| PipelineError::Sink(format!("failed to write record: {e}")))?;
    }
    out.flush()
        .map_err(|e| PipelineError::Sink(format!("failed to flush output: {e}")))
}

#[async_trait::async_trait]
impl<T, O> Sink<T> for NdjsonFileSink<O>
where
    T: Into<O> + Send + 'static,
    O: Serialize + Send + 'static,
{
    async fn run<S>(&self, mut input: S) -> Result<(), PipelineError>
    where
        S: futures::Stream<Item = Result<Envelope<T>, PipelineError>> + Send + Unpin + 'static,
    {
        let mut records: Vec<O> = Vec::new();
        let mut rejected: usize = 0;

        while let Some(item) = input.next().await {
            match item {
                Ok(env) => records.push(env.payload.into()),
                Err(e) => {
                    rejected += 1;
                    tracing::warn!(error = %e, "skipping record in NdjsonFileSink");
                }
            }
        }

        tracing::info!(accepted = records.len(), rejected, "validated records");

        let file = File::create(&self.path).map_err(|e| {
            PipelineError::Sink(format!("failed to create {}: {e}", self.path.display()))
        })?;
        write_lines(file, &records)?;

        metrics::counter!("ndjson_sink_written_records_total").increment(records.len() as u64);
        tracing::info!(rows = records.len(), path = %self.path.display(), "records ready for import");

        Ok(())
    }
}
