use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed processing DataFrame: {0}")]
    Polars(#[from] PolarsError),

    #[error("Two columns normalize to the same name '{0}'")]
    DuplicateColumn(String),

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String),

    #[error("Failed to serialize dashboard view")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Row cap {value} is outside the allowed range {min}..={max}")]
    RowCapOutOfRange { value: usize, min: usize, max: usize },

    #[error("Region '{region}' is not a known region of {country}")]
    UnknownRegion { country: String, region: String },

    #[error("Unknown country '{0}'")]
    UnknownCountry(String),
}
