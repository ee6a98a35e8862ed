use crate::locator::error::LoadError;
use log::debug;
use polars::prelude::*;
use std::path::Path;

/// Reads a headered CSV file with every column kept as text.
///
/// Type coercion happens later in the normalizer, where a bad cell turns into
/// a null instead of failing the whole file.
pub fn read_csv(path: &Path) -> Result<DataFrame, LoadError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| LoadError::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })?
        .finish()
        .map_err(|e| LoadError::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    if df.height() == 0 {
        return Err(LoadError::EmptyFile(path.to_path_buf()));
    }

    debug!(
        "Read {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_columns_are_text() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("benin_clean.csv");
        fs::write(&path, "Timestamp,GHI\n2023-01-01 00:00,12.5\n2023-01-01 00:01,oops\n")?;

        let df = read_csv(&path)?;
        assert_eq!(df.shape(), (2, 2));
        assert_eq!(df.column("GHI")?.dtype(), &DataType::String);
        Ok(())
    }

    #[test]
    fn test_header_only_is_empty() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("togo_clean.csv");
        fs::write(&path, "Timestamp,GHI\n")?;

        assert!(matches!(read_csv(&path), Err(LoadError::EmptyFile(p)) if p == path));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_csv_error() {
        let result = read_csv(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(LoadError::CsvRead { .. })));
    }
}
