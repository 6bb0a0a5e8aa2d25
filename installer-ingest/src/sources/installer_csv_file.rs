use std::{fs::File, path::PathBuf};

use csv::StringRecord;
use installer_client::InstallerRecord;

use crate::pipeline::{Envelope, EnvelopeStream, PipelineError, Source};

/// Reads back an installers CSV written by the scraper.
///
/// Expected header columns (by name, any order):
/// business_name, license_number, phone, city, state, zip_code,
/// utility_provider, services, verified
pub struct InstallerCsvFileSource {
    path: PathBuf,
}

impl InstallerCsvFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

/// `verified` may have been written as `true` or `True`; anything else is false.
fn parse_verified(s: &str) -> bool {
    matches!(s.trim(), "true" | "True")
}

fn record_to_installer(record: &StringRecord, headers: &StringRecord) -> Result<InstallerRecord, PipelineError> {
    let get = |name: &str| -> Result<String, PipelineError> {
        headers
            .iter()
            .position(|h| h == name)
            .and_then(|idx| record.get(idx))
            .map(|v| v.to_string())
            .ok_or_else(|| PipelineError::Source(format!("missing column '{name}' in CSV record")))
    };

    Ok(InstallerRecord {
        business_name: get("business_name")?,
        license_number: get("license_number")?,
        phone: get("phone")?,
        city: get("city")?,
        state: get("state")?,
        zip_code: get("zip_code")?,
        utility_provider: get("utility_provider")?,
        services: get("services")?,
        verified: parse_verified(&get("verified")?),
    })
}

#[async_trait::async_trait]
impl Source<InstallerRecord> for InstallerCsvFileSource {
    async fn stream(&self) -> EnvelopeStream<InstallerRecord> {
        // Blocking CSV reader; the files involved are a few dozen rows.
        let path = self.path.clone();
        let s = async_stream::try_stream! {
            let file = File::open(&path)
                .map_err(|e| PipelineError::Source(format!("failed to open installer CSV file: {e}")))?;
            let mut rdr = csv::Reader::from_reader(file);
            let headers = rdr
                .headers()
                .map_err(|e| PipelineError::Source(format!("failed to read CSV headers: {e}")))?
                .clone();

            let mut raw: usize = 0;
            for result in rdr.records() {
                let record = result.map_err(|e| PipelineError::Source(format!(
                    "failed to read CSV record: {e}"
                )))?;
                raw += 1;

                let installer = match record_to_installer(&record, &headers) {
                    Ok(i) => i,
                    Err(e) => {
                        metrics::counter!("installer_csv_parse_errors_total").increment(1);
                        Err(e)?
                    }
                };

                yield Envelope::now(installer);
            }

            tracing::info!(records = raw, path = %path.display(), "read raw installer records");
        };

        Box::pin(s)
    }
}
