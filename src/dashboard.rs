//! This module provides the main entry point of the crate. A [`SolarDashboard`]
//! runs one full pipeline pass (locate, normalize, prepare and, on request,
//! compare) for a [`DashboardConfig`] and returns a [`DashboardView`] for the
//! presentation layer.

use crate::error::DashboardError;
use crate::locator::data_locator::{DataLocator, NotFound, Resolution, SourceOrigin};
use crate::pipeline::aggregator::{aggregate, ComparativeOutcome};
use crate::pipeline::normalizer::normalize;
use crate::pipeline::prepare::{prepare, PrepareOutcome, PreparedData};
use crate::types::column_role::ColumnRoles;
use crate::types::config::{DashboardConfig, DataPaths, DEFAULT_ROW_CAP};
use crate::types::country::Country;
use bon::bon;
use log::{info, warn};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// What the pipeline produced for the selected country.
#[derive(Debug, Clone)]
pub enum CountryOutcome {
    /// No loadable file. Shown as an informational message.
    NotFound(NotFound),
    /// A file was loaded but could not be normalized, e.g. two columns map to
    /// the same name. Shown as an error message.
    Unusable {
        source: PathBuf,
        origin: SourceOrigin,
        reason: String,
    },
    /// Data was loaded but nothing survived filtering. Shown as a warning.
    EmptyAfterFilter {
        source: PathBuf,
        origin: SourceOrigin,
        roles: ColumnRoles,
    },
    Ready {
        source: PathBuf,
        origin: SourceOrigin,
        prepared: PreparedData,
    },
}

impl CountryOutcome {
    pub fn prepared(&self) -> Option<&PreparedData> {
        match self {
            CountryOutcome::Ready { prepared, .. } => Some(prepared),
            _ => None,
        }
    }
}

/// Everything the presentation layer needs for one refresh.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub country: Country,
    /// Selected regions, sorted.
    pub regions: Vec<String>,
    pub outcome: CountryOutcome,
    /// Present only when comparative mode was requested.
    pub comparative: Option<ComparativeOutcome>,
}

impl DashboardView {
    /// Heading such as `Solar Metrics for Togo (Kara, Lomé)`.
    pub fn heading(&self) -> String {
        let name = self.country.display_name();
        if self.regions.is_empty() {
            format!("Solar Metrics for {}", name)
        } else {
            format!("Solar Metrics for {} ({})", name, self.regions.join(", "))
        }
    }

    /// User-facing notices: terminal states and the downsampling notice.
    pub fn messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        match &self.outcome {
            CountryOutcome::NotFound(not_found) => messages.push(not_found.message()),
            CountryOutcome::Unusable { source, reason, .. } => messages.push(format!(
                "Data in {} could not be used: {}",
                source.display(),
                reason
            )),
            CountryOutcome::EmptyAfterFilter { .. } => {
                messages.push(PrepareOutcome::EMPTY_MESSAGE.to_string())
            }
            CountryOutcome::Ready { prepared, .. } => {
                if let Some(notice) = &prepared.downsample {
                    messages.push(notice.message());
                }
            }
        }
        if let Some(ComparativeOutcome::NoComparativeData) = &self.comparative {
            messages.push(ComparativeOutcome::EMPTY_MESSAGE.to_string());
        }
        messages
    }

    /// A JSON summary of the view. Data frames are reduced to row counts,
    /// except for the comparative aggregates which are exported row by row.
    pub fn to_json(&self) -> Result<Value, DashboardError> {
        let outcome = match &self.outcome {
            CountryOutcome::NotFound(not_found) => json!({
                "status": "not_found",
                "not_found": not_found,
            }),
            CountryOutcome::Unusable {
                source,
                origin,
                reason,
            } => json!({
                "status": "unusable",
                "source": source,
                "origin": origin,
                "reason": reason,
            }),
            CountryOutcome::EmptyAfterFilter {
                source,
                origin,
                roles,
            } => json!({
                "status": "empty_after_filter",
                "source": source,
                "origin": origin,
                "roles": roles,
            }),
            CountryOutcome::Ready {
                source,
                origin,
                prepared,
            } => json!({
                "status": "ready",
                "source": source,
                "origin": origin,
                "roles": prepared.roles,
                "charts": prepared.roles.available_charts(),
                "rows": prepared.frame.height(),
                "filtered_rows": prepared.filtered_rows,
                "summary": prepared.summary,
                "downsample": prepared.downsample,
            }),
        };

        let comparative = match &self.comparative {
            None => Value::Null,
            Some(ComparativeOutcome::NoComparativeData) => json!({ "status": "no_data" }),
            Some(ComparativeOutcome::Ready(aggregates)) => {
                let summaries = serde_json::to_value(aggregates.summaries()?)?;
                let daily_means = serde_json::to_value(aggregates.daily_means()?)?;
                json!({
                    "status": "ready",
                    "summaries": summaries,
                    "daily_means": daily_means,
                })
            }
        };

        Ok(json!({
            "country": self.country,
            "heading": self.heading(),
            "regions": self.regions,
            "messages": self.messages(),
            "outcome": outcome,
            "comparative": comparative,
        }))
    }
}

/// The dashboard's data pipeline.
///
/// Holds nothing but the data directory layout: every call re-reads the CSV
/// files, so edits on disk show up on the next refresh.
///
/// # Examples
///
/// ```no_run
/// use solar_dashboard::{Country, DashboardConfig, DataPaths, SolarDashboard};
/// use std::path::Path;
///
/// # fn main() -> Result<(), solar_dashboard::DashboardError> {
/// let dashboard = SolarDashboard::new(DataPaths::from_root(Path::new("/srv/solar")));
/// let config = DashboardConfig::builder()
///     .country(Country::Benin)
///     .comparative(true)
///     .build()?;
///
/// let view = dashboard.run(&config)?;
/// println!("{}", view.heading());
/// for message in view.messages() {
///     println!("{}", message);
/// }
/// # Ok(())
/// # }
/// ```
pub struct SolarDashboard {
    locator: DataLocator,
}

#[bon]
impl SolarDashboard {
    pub fn new(paths: DataPaths) -> Self {
        Self {
            locator: DataLocator::new(paths),
        }
    }

    /// Uses [`DataPaths::from_env`].
    pub fn from_env() -> Self {
        Self::new(DataPaths::from_env())
    }

    pub fn locator(&self) -> &DataLocator {
        &self.locator
    }

    /// Runs the pipeline for one configuration.
    ///
    /// The comparative overview is only computed when it was requested and the
    /// selected country produced chartable data.
    ///
    /// # Errors
    ///
    /// Missing, unusable and empty data are reported through
    /// [`CountryOutcome`] and [`ComparativeOutcome`]. Errors are left for
    /// failures inside polars while filtering or aggregating.
    pub fn run(&self, config: &DashboardConfig) -> Result<DashboardView, DashboardError> {
        let outcome = self
            .load_country()
            .country(config.country().token())
            .regions(config.regions())
            .row_cap(config.row_cap())
            .call()?;

        let chartable = matches!(outcome, CountryOutcome::Ready { .. });
        let comparative = if config.comparative() && chartable {
            Some(self.comparative_overview(&Country::ALL)?)
        } else {
            None
        };

        Ok(DashboardView {
            country: config.country(),
            regions: config.regions().iter().cloned().collect(),
            outcome,
            comparative,
        })
    }

    /// Locates, normalizes and prepares a single country's data.
    ///
    /// This method uses a builder pattern.
    ///
    /// * `.country(&str)`: **Required.** Any country identifier; unknown ones end up as
    ///   [`CountryOutcome::NotFound`].
    /// * `.regions(&BTreeSet<String>)`: Optional. Defaults to no region filtering.
    /// * `.row_cap(usize)`: Optional. Defaults to `20_000`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use solar_dashboard::{CountryOutcome, DataPaths, SolarDashboard};
    /// # fn main() -> Result<(), solar_dashboard::DashboardError> {
    /// let dashboard = SolarDashboard::new(DataPaths::from_env());
    /// let outcome = dashboard.load_country().country("togo").row_cap(5_000).call()?;
    /// if let CountryOutcome::Ready { prepared, .. } = outcome {
    ///     println!("{:?}", prepared.summary);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn load_country(
        &self,
        country: &str,
        regions: Option<&BTreeSet<String>>,
        row_cap: Option<usize>,
    ) -> Result<CountryOutcome, DashboardError> {
        let no_filter = BTreeSet::new();
        let regions = regions.unwrap_or(&no_filter);
        let row_cap = row_cap.unwrap_or(DEFAULT_ROW_CAP);

        let source = match self.locator.resolve(country) {
            Resolution::Found(source) => source,
            Resolution::NotFound(not_found) => {
                info!("{}", not_found.message());
                return Ok(CountryOutcome::NotFound(not_found));
            }
        };

        let normalized = match normalize(source.frame) {
            Ok(normalized) => normalized,
            Err(e) => {
                warn!("Cannot use {}: {}", source.path.display(), e);
                return Ok(CountryOutcome::Unusable {
                    source: source.path,
                    origin: source.origin,
                    reason: e.to_string(),
                });
            }
        };
        Ok(match prepare(&normalized, regions, row_cap)? {
            PrepareOutcome::EmptyAfterFilter { roles } => CountryOutcome::EmptyAfterFilter {
                source: source.path,
                origin: source.origin,
                roles,
            },
            PrepareOutcome::Ready(prepared) => CountryOutcome::Ready {
                source: source.path,
                origin: source.origin,
                prepared,
            },
        })
    }

    /// Loads every listed country without region filtering and aggregates
    /// their GHI readings.
    ///
    /// Countries that cannot be found or whose data cannot be normalized are
    /// skipped with a log entry.
    pub fn comparative_overview(
        &self,
        countries: &[Country],
    ) -> Result<ComparativeOutcome, DashboardError> {
        let mut datasets = Vec::with_capacity(countries.len());
        for country in countries {
            let Resolution::Found(source) = self.locator.resolve(country.token()) else {
                continue;
            };
            match normalize(source.frame) {
                Ok(normalized) => datasets.push((country.token(), normalized)),
                Err(e) => warn!("Excluding {} from comparison: {}", country, e),
            }
        }

        aggregate(datasets.iter().map(|(country, frame)| (*country, frame)))
    }
}
