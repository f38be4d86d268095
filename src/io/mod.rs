//! Loading pre-vectorized feature matrices from delimited files.
pub mod feature_csv;

pub use feature_csv::{read_feature_csv, read_feature_csv_with_config, CsvReaderConfig};
