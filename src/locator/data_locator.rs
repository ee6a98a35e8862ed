use crate::locator::csv_reader::read_csv;
use crate::locator::error::LoadError;
use crate::types::config::DataPaths;
use crate::types::country::{country_first_word, country_token};
use log::{debug, info, warn};
use polars::frame::DataFrame;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

const CLEAN_FILE_SUFFIX: &str = "_clean.csv";
const CSV_EXTENSION: &str = ".csv";

/// Which directory a dataset was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceOrigin {
    Cleaned,
    RawFallback,
}

/// A candidate file that could not be used, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateAttempt {
    pub path: PathBuf,
    pub reason: String,
}

impl CandidateAttempt {
    fn new(path: &Path, error: &LoadError) -> Self {
        Self {
            path: path.to_path_buf(),
            reason: error.to_string(),
        }
    }
}

/// A successfully loaded dataset and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub path: PathBuf,
    pub origin: SourceOrigin,
    pub frame: DataFrame,
}

/// No candidate for the country could be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFound {
    pub country: String,
    /// The cleaned file path that would have been used.
    pub attempted: PathBuf,
    /// Candidates that existed but failed to load, in the order they were tried.
    pub attempts: Vec<CandidateAttempt>,
}

impl NotFound {
    pub fn message(&self) -> String {
        format!(
            "No data found for {}. Tried: {}",
            self.country,
            self.attempted.display()
        )
    }
}

/// Outcome of [`DataLocator::resolve`].
#[derive(Debug, Clone)]
pub enum Resolution {
    Found(LoadedSource),
    NotFound(NotFound),
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

/// Finds the CSV file backing a country's dashboard.
#[derive(Debug, Clone)]
pub struct DataLocator {
    paths: DataPaths,
}

impl DataLocator {
    pub fn new(paths: DataPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    /// `<clean_dir>/<token>_clean.csv`.
    pub fn primary_path(&self, country: &str) -> PathBuf {
        self.paths
            .clean_dir
            .join(format!("{}{}", country_token(country), CLEAN_FILE_SUFFIX))
    }

    /// Every file worth trying for `country`, best first.
    ///
    /// An existing cleaned file is the only candidate, even if it later fails
    /// to load. Otherwise raw files are listed: names containing the full
    /// token, then names containing only the first word of the country name.
    /// Each group is sorted by file name.
    pub fn candidates(&self, country: &str) -> Vec<(PathBuf, SourceOrigin)> {
        let primary = self.primary_path(country);
        if primary.is_file() {
            return vec![(primary, SourceOrigin::Cleaned)];
        }
        debug!("Cleaned file {} not present", primary.display());

        let mut candidates: Vec<(PathBuf, SourceOrigin)> = Vec::new();

        let raw_files = match self.raw_csv_files() {
            Ok(files) => files,
            Err(LoadError::DirectoryRead(dir, e)) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Raw data directory {} does not exist", dir.display());
                Vec::new()
            }
            Err(e) => {
                warn!("Skipping raw data fallback: {}", e);
                Vec::new()
            }
        };

        let patterns = [Some(country_token(country)), country_first_word(country)];
        for pattern in patterns.into_iter().flatten() {
            if pattern.is_empty() {
                continue;
            }
            for (path, lower_name) in &raw_files {
                let already_listed = candidates.iter().any(|(p, _)| p == path);
                if lower_name.contains(&pattern) && !already_listed {
                    candidates.push((path.clone(), SourceOrigin::RawFallback));
                }
            }
        }

        candidates
    }

    /// `*.csv` files of the raw directory with their lower-cased names, sorted.
    fn raw_csv_files(&self) -> Result<Vec<(PathBuf, String)>, LoadError> {
        let dir = &self.paths.raw_dir;
        let entries =
            std::fs::read_dir(dir).map_err(|e| LoadError::DirectoryRead(dir.clone(), e))?;

        let mut files: Vec<(PathBuf, String)> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter_map(|path| {
                let lower_name = path.file_name()?.to_str()?.to_lowercase();
                lower_name
                    .ends_with(CSV_EXTENSION)
                    .then_some((path, lower_name))
            })
            .collect();
        files.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(files)
    }

    /// Loads the first candidate for `country` that parses and has rows.
    ///
    /// Never fails: unreadable candidates are recorded and skipped, and when
    /// nothing is left the result is [`Resolution::NotFound`]. A cleaned file
    /// that exists but cannot be loaded is not replaced by raw data.
    pub fn resolve(&self, country: &str) -> Resolution {
        let mut attempts = Vec::new();

        for (path, origin) in self.candidates(country) {
            if origin == SourceOrigin::RawFallback {
                info!("Trying raw file fallback: {}", path.display());
            }
            match read_csv(&path) {
                Ok(frame) => {
                    info!(
                        "Loaded {} rows for {} from {}",
                        frame.height(),
                        country,
                        path.display()
                    );
                    return Resolution::Found(LoadedSource {
                        path,
                        origin,
                        frame,
                    });
                }
                Err(e) => {
                    warn!("Skipping candidate {}: {}", path.display(), e);
                    attempts.push(CandidateAttempt::new(&path, &e));
                }
            }
        }

        Resolution::NotFound(NotFound {
            country: country.to_string(),
            attempted: self.primary_path(country),
            attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::{tempdir, TempDir};

    const SAMPLE: &str = "Timestamp,GHI\n2023-01-01 00:00,1.0\n";

    /// Keeps every formatted record so tests can assert on log output.
    struct CaptureLogger {
        records: Mutex<Vec<(log::Level, String)>>,
    }

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if let Ok(mut records) = self.records.lock() {
                records.push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: CaptureLogger = CaptureLogger {
        records: Mutex::new(Vec::new()),
    };

    fn captured_logs() -> Vec<(log::Level, String)> {
        CAPTURE.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn workspace() -> Result<(TempDir, DataLocator), io::Error> {
        let root = tempdir()?;
        let paths = DataPaths::from_root(root.path());
        fs::create_dir_all(&paths.clean_dir)?;
        fs::create_dir_all(&paths.raw_dir)?;
        Ok((root, DataLocator::new(paths)))
    }

    #[test]
    fn test_primary_file_wins() -> Result<(), Box<dyn std::error::Error>> {
        let (_root, locator) = workspace()?;
        fs::write(locator.paths().clean_dir.join("benin_clean.csv"), SAMPLE)?;
        fs::write(locator.paths().raw_dir.join("benin_raw.csv"), SAMPLE)?;

        match locator.resolve("benin") {
            Resolution::Found(source) => {
                assert_eq!(source.origin, SourceOrigin::Cleaned);
                assert_eq!(source.path, locator.primary_path("benin"));
                assert_eq!(source.frame.height(), 1);
            }
            Resolution::NotFound(nf) => panic!("expected data, got {:?}", nf),
        }
        Ok(())
    }

    #[test]
    fn test_raw_fallback() -> Result<(), Box<dyn std::error::Error>> {
        let (_root, locator) = workspace()?;
        let raw = locator.paths().raw_dir.join("sierraleone_raw_v2.csv");
        fs::write(&raw, SAMPLE)?;

        match locator.resolve("sierraleone") {
            Resolution::Found(source) => {
                assert_eq!(source.origin, SourceOrigin::RawFallback);
                assert_eq!(source.path, raw);
                assert_eq!(source.frame.height(), 1);
            }
            Resolution::NotFound(nf) => panic!("expected raw fallback, got {:?}", nf),
        }
        Ok(())
    }

    #[test]
    fn test_raw_fallback_is_logged() -> Result<(), Box<dyn std::error::Error>> {
        // Only this test installs a logger.
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Info);

        let (_root, locator) = workspace()?;
        let raw = locator.paths().raw_dir.join("togo_raw.csv");
        fs::write(&raw, SAMPLE)?;

        assert!(locator.resolve("togo").is_found());
        let expected = format!("Trying raw file fallback: {}", raw.display());
        assert!(
            captured_logs()
                .iter()
                .any(|(level, message)| *level == log::Level::Info && *message == expected),
            "no fallback entry for {}",
            raw.display()
        );
        Ok(())
    }

    #[test]
    fn test_unknown_country_not_found() -> Result<(), Box<dyn std::error::Error>> {
        let (_root, locator) = workspace()?;
        fs::write(locator.paths().raw_dir.join("togo_raw.csv"), SAMPLE)?;

        match locator.resolve("atlantis") {
            Resolution::NotFound(nf) => {
                assert_eq!(nf.country, "atlantis");
                assert_eq!(nf.attempted, locator.primary_path("atlantis"));
                assert!(nf.attempts.is_empty());
                assert!(nf.message().starts_with("No data found for atlantis. Tried: "));
            }
            Resolution::Found(source) => panic!("unexpected source {:?}", source.path),
        }
        Ok(())
    }

    #[test]
    fn test_missing_directories_not_found() {
        let locator = DataLocator::new(DataPaths::new("/no/such/clean", "/no/such/raw"));
        for country in ["benin", "sierraleone", "togo", "atlantis"] {
            assert!(!locator.resolve(country).is_found());
        }
    }

    #[test]
    fn test_candidate_order() -> Result<(), Box<dyn std::error::Error>> {
        let (_root, locator) = workspace()?;
        let raw_dir = locator.paths().raw_dir.clone();
        fs::write(raw_dir.join("sierra_b.csv"), SAMPLE)?;
        fs::write(raw_dir.join("b_SierraLeone.CSV"), SAMPLE)?;
        fs::write(raw_dir.join("a_sierraleone.csv"), SAMPLE)?;
        fs::write(raw_dir.join("sierraleone_notes.txt"), SAMPLE)?;

        let names: Vec<String> = locator
            .candidates("Sierra Leone")
            .into_iter()
            .map(|(p, _)| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a_sierraleone.csv", "b_SierraLeone.CSV", "sierra_b.csv"]);
        Ok(())
    }

    #[test]
    fn test_broken_raw_candidates_are_skipped() -> Result<(), Box<dyn std::error::Error>> {
        let (_root, locator) = workspace()?;
        let raw_dir = locator.paths().raw_dir.clone();
        fs::write(raw_dir.join("togo_a.csv"), "")?;
        fs::write(raw_dir.join("togo_b.csv"), SAMPLE)?;

        match locator.resolve("togo") {
            Resolution::Found(source) => {
                assert_eq!(source.path, raw_dir.join("togo_b.csv"));
                assert_eq!(source.origin, SourceOrigin::RawFallback);
            }
            Resolution::NotFound(nf) => panic!("expected togo_b.csv, got {:?}", nf),
        }
        Ok(())
    }

    #[test]
    fn test_broken_cleaned_file_blocks_fallback() -> Result<(), Box<dyn std::error::Error>> {
        let (_root, locator) = workspace()?;
        fs::write(locator.primary_path("togo"), "Timestamp,GHI\n")?;
        fs::write(locator.paths().raw_dir.join("togo_raw.csv"), SAMPLE)?;

        assert_eq!(locator.candidates("togo").len(), 1);
        match locator.resolve("togo") {
            Resolution::NotFound(nf) => {
                let tried: Vec<&PathBuf> = nf.attempts.iter().map(|a| &a.path).collect();
                assert_eq!(tried, [&locator.primary_path("togo")]);
                assert!(nf.attempts[0].reason.contains("contains no rows"));
            }
            Resolution::Found(source) => panic!("unexpected source {:?}", source.path),
        }
        Ok(())
    }

    #[test]
    fn test_all_raw_candidates_broken() -> Result<(), Box<dyn std::error::Error>> {
        let (_root, locator) = workspace()?;
        let raw_dir = locator.paths().raw_dir.clone();
        fs::write(raw_dir.join("benin_a.csv"), "")?;
        fs::write(raw_dir.join("benin_b.csv"), "Timestamp,GHI\n")?;

        match locator.resolve("benin") {
            Resolution::NotFound(nf) => {
                let tried: Vec<PathBuf> = nf.attempts.into_iter().map(|a| a.path).collect();
                assert_eq!(tried, [raw_dir.join("benin_a.csv"), raw_dir.join("benin_b.csv")]);
                assert_eq!(nf.attempted, locator.primary_path("benin"));
            }
            Resolution::Found(source) => panic!("unexpected source {:?}", source.path),
        }
        Ok(())
    }
}
