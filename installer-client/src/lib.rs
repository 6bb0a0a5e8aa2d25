pub mod catalog;
pub mod domain;

pub use catalog::{BUSINESS_PREFIXES, BUSINESS_SUFFIXES, CITIES, SERVICES};
pub use domain::{City, InstallerImport, InstallerRecord};
