pub mod csv_file;
pub mod ndjson_file;

pub use csv_file::CsvFileSink;
pub use ndjson_file::NdjsonFileSink;
