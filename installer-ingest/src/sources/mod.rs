pub mod installer_csv_file;
pub mod qpl_scrape;

pub use installer_csv_file::InstallerCsvFileSource;
pub use qpl_scrape::QplScrapeSource;
