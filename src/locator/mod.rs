pub mod csv_reader;
pub mod data_locator;
pub mod error;
