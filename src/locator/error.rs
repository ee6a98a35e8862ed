use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Parsing error reading CSV file '{}': {source}", path.display())]
    CsvRead {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("CSV file '{}' contains no rows", .0.display())]
    EmptyFile(PathBuf),

    #[error("Failed to read directory '{}'", .0.display())]
    DirectoryRead(PathBuf, #[source] std::io::Error),
}
