use serde::{Deserialize, Serialize};

use crate::domain::InstallerRecord;

/// Installer row shaped for a database import: `verified` is a real boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallerImport {
    pub business_name: String,
    pub license_number: String,
    pub phone: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub utility_provider: String,
    pub services: String,
    pub verified: bool,
}

impl From<InstallerRecord> for InstallerImport {
    fn from(r: InstallerRecord) -> Self {
        InstallerImport {
            business_name: r.business_name,
            license_number: r.license_number,
            phone: r.phone,
            city: r.city,
            state: r.state,
            zip_code: r.zip_code,
            utility_provider: r.utility_provider,
            services: r.services,
            verified: r.verified,
        }
    }
}
