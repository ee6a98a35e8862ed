//! Scalar results handed to the presentation layer alongside the prepared data.

use chrono::NaiveDate;
use polars::prelude::{ChunkAgg, Float64Chunked};
use serde::Serialize;

/// Max/min/mean of the GHI readings that survived filtering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GhiSummary {
    pub max: f64,
    pub min: f64,
    pub mean: f64,
}

impl GhiSummary {
    /// `None` when the column holds no non-null values.
    pub fn from_chunked(ghi: &Float64Chunked) -> Option<Self> {
        Some(Self {
            max: ghi.max()?,
            min: ghi.min()?,
            mean: ghi.mean()?,
        })
    }
}

/// Emitted when stride sampling reduced the number of plotted rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DownsampleNotice {
    pub original_rows: usize,
    pub sampled_rows: usize,
    pub stride: usize,
}

impl DownsampleNotice {
    pub fn message(&self) -> String {
        format!(
            "Data downsampled for plotting: showing ~{} points",
            self.sampled_rows
        )
    }
}

/// Mean GHI of one country on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyMean {
    pub date: NaiveDate,
    pub country: String,
    pub ghi: f64,
}

/// Per-country GHI statistics for the comparative overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySummary {
    pub country: String,
    #[serde(flatten)]
    pub ghi: GhiSummary,
    pub readings: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_chunked_skips_nulls() {
        let ca: Float64Chunked = [Some(3.0), None, Some(1.0), Some(2.0)].into_iter().collect();
        let summary = GhiSummary::from_chunked(&ca).unwrap();
        assert_eq!((summary.max, summary.min, summary.mean), (3.0, 1.0, 2.0));

        let empty: Float64Chunked = [None::<f64>, None].into_iter().collect();
        assert_eq!(GhiSummary::from_chunked(&empty), None);
    }

    #[test]
    fn test_downsample_message() {
        let notice = DownsampleNotice {
            original_rows: 45_000,
            sampled_rows: 22_500,
            stride: 2,
        };
        assert_eq!(
            notice.message(),
            "Data downsampled for plotting: showing ~22500 points"
        );
    }
}
