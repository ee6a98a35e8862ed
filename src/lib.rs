mod dashboard;
mod error;
mod filtering;
mod locator;
mod pipeline;
mod types;
mod utils;

pub use dashboard::*;
pub use error::{ConfigError, DashboardError};
pub use filtering::SolarFrameFilterExt;

pub use locator::data_locator::*;
pub use locator::error::LoadError;

pub use pipeline::aggregator::{aggregate, ComparativeAggregates, ComparativeOutcome};
pub use pipeline::normalizer::{canonical_column_name, normalize};
pub use pipeline::prepare::{prepare, sampling_stride, PrepareOutcome, PreparedData};

pub use types::column_role::{ChartKind, ColumnRole, ColumnRoles, NameMatcher, ROLE_RULES};
pub use types::config::{DashboardConfig, DataPaths, DEFAULT_ROW_CAP, MAX_ROW_CAP, MIN_ROW_CAP};
pub use types::country::Country;
pub use types::solar_frame::NormalizedFrame;
pub use types::summary::{CountrySummary, DailyMean, DownsampleNotice, GhiSummary};
