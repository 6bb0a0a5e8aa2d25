pub mod city;
pub mod import;
pub mod installer;

pub use city::City;
pub use import::InstallerImport;
pub use installer::InstallerRecord;
