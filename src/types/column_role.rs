//! Semantic roles a column can play once a dataset has been normalized, and the
//! declarative rules used to detect them.

use serde::Serialize;
use std::fmt;

/// The part a column plays in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    /// Measurement timestamp.
    Date,
    /// Global horizontal irradiance.
    Ghi,
    /// Ambient temperature.
    Temperature,
    /// Categorical location label used for filtering.
    Region,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnRole::Date => "date",
            ColumnRole::Ghi => "ghi",
            ColumnRole::Temperature => "temperature",
            ColumnRole::Region => "region",
        };
        write!(f, "{}", name)
    }
}

/// How a normalized column name is matched against a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatcher {
    Exact(&'static str),
    Contains(&'static str),
}

impl NameMatcher {
    pub fn matches(&self, column: &str) -> bool {
        match self {
            NameMatcher::Exact(name) => column == *name,
            NameMatcher::Contains(fragment) => column.contains(fragment),
        }
    }
}

/// Role detection rules. Each role is assigned the first column, in schema
/// order, that its matcher accepts.
pub const ROLE_RULES: [(ColumnRole, NameMatcher); 4] = [
    (ColumnRole::Date, NameMatcher::Exact("date")),
    (ColumnRole::Ghi, NameMatcher::Contains("ghi")),
    (ColumnRole::Temperature, NameMatcher::Exact("temperature")),
    (ColumnRole::Region, NameMatcher::Contains("region")),
];

/// Synonyms renamed to their canonical names during normalization.
pub const COLUMN_SYNONYMS: [(&str, &str); 2] = [("timestamp", "date"), ("tamb", "temperature")];

/// Kinds of chart the presentation layer can draw from a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    GhiLine,
    TemperatureArea,
    GhiTemperatureBubble,
    GhiTrend,
}

/// Which column (if any) was detected for each role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnRoles {
    pub date: Option<String>,
    pub ghi: Option<String>,
    pub temperature: Option<String>,
    pub region: Option<String>,
}

impl ColumnRoles {
    /// Applies [`ROLE_RULES`] to a list of already normalized column names.
    pub fn detect<S: AsRef<str>>(columns: &[S]) -> Self {
        let mut roles = ColumnRoles::default();
        for (role, matcher) in ROLE_RULES {
            let found = columns
                .iter()
                .map(AsRef::as_ref)
                .find(|name| matcher.matches(name))
                .map(str::to_string);
            *roles.slot_mut(role) = found;
        }
        roles
    }

    pub fn get(&self, role: ColumnRole) -> Option<&str> {
        match role {
            ColumnRole::Date => self.date.as_deref(),
            ColumnRole::Ghi => self.ghi.as_deref(),
            ColumnRole::Temperature => self.temperature.as_deref(),
            ColumnRole::Region => self.region.as_deref(),
        }
    }

    fn slot_mut(&mut self, role: ColumnRole) -> &mut Option<String> {
        match role {
            ColumnRole::Date => &mut self.date,
            ColumnRole::Ghi => &mut self.ghi,
            ColumnRole::Temperature => &mut self.temperature,
            ColumnRole::Region => &mut self.region,
        }
    }

    /// Charts the detected columns can feed, in display order.
    pub fn available_charts(&self) -> Vec<ChartKind> {
        let mut charts = vec![ChartKind::GhiLine];
        if self.temperature.is_some() {
            charts.push(ChartKind::TemperatureArea);
            charts.push(ChartKind::GhiTemperatureBubble);
        }
        if self.date.is_some() {
            charts.push(ChartKind::GhiTrend);
        }
        charts
    }
}
