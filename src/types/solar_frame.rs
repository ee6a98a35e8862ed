//! Contains the `NormalizedFrame` structure: a solar dataset whose column names
//! have been cleaned and whose roles have been detected.

use crate::error::DashboardError;
use crate::types::column_role::{ColumnRole, ColumnRoles};
use crate::types::summary::GhiSummary;
use polars::prelude::*;

/// A Polars `DataFrame` that went through [`crate::normalize`].
///
/// Column types follow the detected roles:
///
/// | role          | dtype                         |
/// |---------------|-------------------------------|
/// | `date`        | `Datetime(Milliseconds, None)` |
/// | `ghi`         | `Float64`                     |
/// | `temperature` | `Float64`                     |
/// | `region`      | `String`                      |
///
/// Every role is optional and any cell may be null. Other columns are kept
/// untouched.
#[derive(Debug, Clone)]
pub struct NormalizedFrame {
    /// The underlying Polars DataFrame.
    pub frame: DataFrame,
    /// Which column was detected for each role.
    pub roles: ColumnRoles,
}

impl NormalizedFrame {
    pub(crate) fn new(frame: DataFrame, roles: ColumnRoles) -> Self {
        Self { frame, roles }
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Looks up the column assigned to `role`.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if the role was not detected, the column otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::ColumnNotFound`] if the roles refer to a column
    /// the frame no longer has.
    pub fn role_column(&self, role: ColumnRole) -> Result<Option<&Column>, DashboardError> {
        let Some(name) = self.roles.get(role) else {
            return Ok(None);
        };
        self.frame
            .column(name)
            .map(Some)
            .map_err(|_| DashboardError::ColumnNotFound(name.to_string()))
    }

    /// Max/min/mean over the non-null GHI values.
    ///
    /// `Ok(None)` when there is no GHI column or it holds only nulls.
    pub fn ghi_summary(&self) -> Result<Option<GhiSummary>, DashboardError> {
        match self.role_column(ColumnRole::Ghi)? {
            Some(column) => Ok(GhiSummary::from_chunked(column.f64()?)),
            None => Ok(None),
        }
    }

    /// Rows where both the timestamp and the GHI value are present, in order,
    /// as columns `date` and `ghi`.
    ///
    /// `None` when either role is missing.
    pub fn readings(&self) -> Option<LazyFrame> {
        let date = self.roles.get(ColumnRole::Date)?;
        let ghi = self.roles.get(ColumnRole::Ghi)?;
        Some(
            self.frame
                .clone()
                .lazy()
                .select([col(date).alias("date"), col(ghi).alias("ghi")])
                .drop_nulls(None),
        )
    }
}
