use crate::error::DashboardError;
use crate::filtering::SolarFrameFilterExt;
use crate::types::column_role::{ColumnRole, ColumnRoles};
use crate::types::solar_frame::NormalizedFrame;
use crate::types::summary::{DownsampleNotice, GhiSummary};
use log::{info, warn};
use polars::prelude::*;
use std::collections::BTreeSet;

/// Chart-ready data for one country.
#[derive(Debug, Clone)]
pub struct PreparedData {
    /// Filtered and, if needed, stride-sampled rows.
    pub frame: DataFrame,
    pub roles: ColumnRoles,
    /// Row count after filtering, before sampling.
    pub filtered_rows: usize,
    /// Computed over all filtered rows, not just the sampled ones.
    pub summary: Option<GhiSummary>,
    pub downsample: Option<DownsampleNotice>,
}

impl PreparedData {
    /// Splits the sampled rows into one frame per region, in order of first
    /// appearance. Rows without a region are left out.
    ///
    /// Without a region column the whole frame comes back as a single `"GHI"`
    /// series.
    pub fn region_series(&self) -> Result<Vec<(String, DataFrame)>, DashboardError> {
        let Some(region) = self.roles.get(ColumnRole::Region) else {
            return Ok(vec![("GHI".to_string(), self.frame.clone())]);
        };

        let labels = self
            .frame
            .column(region)?
            .cast(&DataType::String)?
            .unique_stable()?;

        labels
            .str()?
            .into_iter()
            .flatten()
            .map(|label| -> Result<(String, DataFrame), DashboardError> {
                let rows = self
                    .frame
                    .clone()
                    .lazy()
                    .filter(col(region).cast(DataType::String).eq(lit(label)))
                    .collect()?;
                Ok((label.to_string(), rows))
            })
            .collect()
    }
}

/// Result of [`prepare`].
#[derive(Debug, Clone)]
pub enum PrepareOutcome {
    /// Filtering removed every row. Nothing to chart, but not an error.
    EmptyAfterFilter { roles: ColumnRoles },
    Ready(PreparedData),
}

impl PrepareOutcome {
    pub const EMPTY_MESSAGE: &'static str = "No valid data available for the selected filters.";
}

/// Stride used to bring `rows` down towards `row_cap`: `max(1, rows / row_cap)`.
pub fn sampling_stride(rows: usize, row_cap: usize) -> usize {
    (rows / row_cap.max(1)).max(1)
}

/// Applies the region filter, drops rows lacking a timestamp or GHI value and
/// stride-samples the rest down to roughly `row_cap` rows.
///
/// The region filter only applies when the data has a region column and
/// `regions` is non-empty. Required-field dropping only considers the roles
/// that were detected.
///
/// # Errors
///
/// Returns [`DashboardError`] if a role column cannot be read. Running out of
/// rows is reported as [`PrepareOutcome::EmptyAfterFilter`].
pub fn prepare(
    normalized: &NormalizedFrame,
    regions: &BTreeSet<String>,
    row_cap: usize,
) -> Result<PrepareOutcome, DashboardError> {
    let roles = &normalized.roles;

    let mut lf = normalized.frame.clone().lazy();
    if let Some(region) = roles.get(ColumnRole::Region) {
        if !regions.is_empty() {
            lf = lf.filter_regions(region, regions);
        }
    }

    let required: Vec<&str> = [ColumnRole::Date, ColumnRole::Ghi]
        .into_iter()
        .filter_map(|role| roles.get(role))
        .collect();
    let complete = lf.drop_incomplete(&required).collect()?;

    if complete.height() == 0 {
        warn!(
            "No rows left after filtering {} rows (regions: {:?})",
            normalized.height(),
            regions
        );
        return Ok(PrepareOutcome::EmptyAfterFilter {
            roles: roles.clone(),
        });
    }

    let filtered_rows = complete.height();
    let complete = NormalizedFrame::new(complete, roles.clone());
    let summary = complete.ghi_summary()?;

    let (frame, downsample) = if filtered_rows > row_cap {
        let stride = sampling_stride(filtered_rows, row_cap);
        let sampled = complete.frame.lazy().stride_sample(stride).collect()?;
        let notice = DownsampleNotice {
            original_rows: filtered_rows,
            sampled_rows: sampled.height(),
            stride,
        };
        info!(
            "Downsampled {} rows to {} (stride {})",
            notice.original_rows, notice.sampled_rows, notice.stride
        );
        (sampled, Some(notice))
    } else {
        (complete.frame, None)
    };

    Ok(PrepareOutcome::Ready(PreparedData {
        frame,
        roles: roles.clone(),
        filtered_rows,
        summary,
        downsample,
    }))
}
