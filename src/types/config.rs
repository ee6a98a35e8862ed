//! The immutable per-request configuration and the data directory layout.

use crate::error::ConfigError;
use crate::types::country::Country;
use bon::bon;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub const DEFAULT_ROW_CAP: usize = 20_000;
pub const MIN_ROW_CAP: usize = 1_000;
pub const MAX_ROW_CAP: usize = 50_000;

const ROOT_ENV_VAR: &str = "SOLAR_DASHBOARD_ROOT";
const CLEAN_DIR_NAME: &str = "data";
const RAW_DIR_NAME: &str = "raw";

/// Where cleaned and raw CSV files live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataPaths {
    /// Holds `<token>_clean.csv` files.
    pub clean_dir: PathBuf,
    /// Searched by file name when a cleaned file is missing.
    pub raw_dir: PathBuf,
}

impl DataPaths {
    pub fn new(clean_dir: impl Into<PathBuf>, raw_dir: impl Into<PathBuf>) -> Self {
        Self {
            clean_dir: clean_dir.into(),
            raw_dir: raw_dir.into(),
        }
    }

    /// `<root>/data` and `<root>/raw`.
    pub fn from_root(root: &Path) -> Self {
        Self::new(root.join(CLEAN_DIR_NAME), root.join(RAW_DIR_NAME))
    }

    /// Uses `$SOLAR_DASHBOARD_ROOT` as the root, or the working directory when unset.
    pub fn from_env() -> Self {
        let root = std::env::var_os(ROOT_ENV_VAR)
            .map(PathBuf::from)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self::from_root(&root)
    }
}

/// Everything the user selected for one dashboard refresh.
///
/// Built once per interaction and passed by reference into the pipeline, so
/// no selection state outlives the request.
///
/// # Examples
///
/// ```
/// use solar_dashboard::{Country, DashboardConfig};
///
/// let config = DashboardConfig::builder()
///     .country(Country::Togo)
///     .regions(vec!["Kara".to_string()])
///     .row_cap(5_000)
///     .build()
///     .unwrap();
/// assert_eq!(config.row_cap(), 5_000);
/// assert!(!config.comparative());
///
/// let defaults = DashboardConfig::builder().country(Country::Benin).build().unwrap();
/// assert_eq!(defaults.row_cap(), 20_000);
/// assert!(defaults.regions().contains("Cotonou"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardConfig {
    country: Country,
    regions: BTreeSet<String>,
    row_cap: usize,
    comparative: bool,
}

#[bon]
impl DashboardConfig {
    /// Validates and builds a configuration.
    ///
    /// * `.country(Country)`: **Required.**
    /// * `.regions(Vec<String>)`: Optional. Defaults to the country's first known region.
    ///   An empty list disables region filtering.
    /// * `.row_cap(usize)`: Optional. Defaults to `20_000`, must lie in `1_000..=50_000`.
    /// * `.comparative(bool)`: Optional. Defaults to `false`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RowCapOutOfRange`] or [`ConfigError::UnknownRegion`].
    #[builder]
    pub fn new(
        country: Country,
        regions: Option<Vec<String>>,
        row_cap: Option<usize>,
        comparative: Option<bool>,
    ) -> Result<Self, ConfigError> {
        let row_cap = row_cap.unwrap_or(DEFAULT_ROW_CAP);
        if !(MIN_ROW_CAP..=MAX_ROW_CAP).contains(&row_cap) {
            return Err(ConfigError::RowCapOutOfRange {
                value: row_cap,
                min: MIN_ROW_CAP,
                max: MAX_ROW_CAP,
            });
        }

        let regions: BTreeSet<String> = regions
            .unwrap_or_else(|| vec![country.default_region().to_string()])
            .into_iter()
            .collect();
        if let Some(unknown) = regions
            .iter()
            .find(|r| !country.known_regions().contains(&r.as_str()))
        {
            return Err(ConfigError::UnknownRegion {
                country: country.to_string(),
                region: unknown.clone(),
            });
        }

        Ok(Self {
            country,
            regions,
            row_cap,
            comparative: comparative.unwrap_or(false),
        })
    }

    pub fn country(&self) -> Country {
        self.country
    }

    pub fn regions(&self) -> &BTreeSet<String> {
        &self.regions
    }

    pub fn row_cap(&self) -> usize {
        self.row_cap
    }

    pub fn comparative(&self) -> bool {
        self.comparative
    }
}
