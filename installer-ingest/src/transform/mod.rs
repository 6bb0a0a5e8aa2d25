use crate::pipeline::{Envelope, PipelineError, Transform};
use installer_client::InstallerRecord;

/// Pure normalization of an `InstallerRecord` before it is handed to an import.
///
/// Rules:
/// - business_name must not be blank.
/// - city must not be blank.
pub fn normalize_installer(env: Envelope<InstallerRecord>) -> Result<Envelope<InstallerRecord>, PipelineError> {
    let i = &env.payload;

    if i.business_name.trim().is_empty() {
        return Err(PipelineError::Transform("business_name must not be blank".to_string()));
    }

    if i.city.trim().is_empty() {
        return Err(PipelineError::Transform("city must not be blank".to_string()));
    }

    Ok(env)
}

#[derive(Clone, Default)]
pub struct InstallerNormalization;

#[async_trait::async_trait]
impl Transform<InstallerRecord, InstallerRecord> for InstallerNormalization {
    async fn apply(
        &self,
        input: Envelope<InstallerRecord>,
    ) -> Result<Envelope<InstallerRecord>, PipelineError> {
        match normalize_installer(input) {
            Ok(env) => Ok(env),
            Err(e) => {
                metrics::counter!("normalize_installer_rejected_total").increment(1);
                Err(e)
            }
        }
    }
}
