use crate::error::DashboardError;
use crate::types::solar_frame::NormalizedFrame;
use crate::types::summary::{CountrySummary, DailyMean, GhiSummary};
use log::debug;
use polars::prelude::*;

/// Cross-country aggregates for the comparative overview.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparativeAggregates {
    daily: DataFrame,
    summary: DataFrame,
}

impl ComparativeAggregates {
    /// Columns `date`, `country`, `ghi`, sorted by day, then country.
    pub fn daily_frame(&self) -> &DataFrame {
        &self.daily
    }

    /// Columns `country`, `max`, `min`, `avg`, `readings`, sorted by country.
    pub fn summary_frame(&self) -> &DataFrame {
        &self.summary
    }

    pub fn daily_means(&self) -> Result<Vec<DailyMean>, DashboardError> {
        let dates = self.daily.column("date")?.date()?;
        let countries = self.daily.column("country")?.str()?;
        let ghi = self.daily.column("ghi")?.f64()?;

        Ok(dates
            .as_date_iter()
            .zip(countries)
            .zip(ghi)
            .filter_map(|((date, country), ghi)| {
                Some(DailyMean {
                    date: date?,
                    country: country?.to_string(),
                    ghi: ghi?,
                })
            })
            .collect())
    }

    pub fn summaries(&self) -> Result<Vec<CountrySummary>, DashboardError> {
        let countries = self.summary.column("country")?.str()?;
        let max = self.summary.column("max")?.f64()?;
        let min = self.summary.column("min")?.f64()?;
        let avg = self.summary.column("avg")?.f64()?;
        let readings = self.summary.column("readings")?.cast(&DataType::UInt64)?;
        let readings = readings.u64()?;

        Ok(countries
            .into_iter()
            .zip(max)
            .zip(min)
            .zip(avg)
            .zip(readings)
            .filter_map(|((((country, max), min), mean), readings)| {
                Some(CountrySummary {
                    country: country?.to_string(),
                    ghi: GhiSummary {
                        max: max?,
                        min: min?,
                        mean: mean?,
                    },
                    readings: readings? as usize,
                })
            })
            .collect())
    }
}

/// Result of [`aggregate`].
#[derive(Debug, Clone, PartialEq)]
pub enum ComparativeOutcome {
    /// No country contributed a single valid reading.
    NoComparativeData,
    Ready(ComparativeAggregates),
}

impl ComparativeOutcome {
    pub const EMPTY_MESSAGE: &'static str = "No comparative data available for the countries.";
}

/// Daily mean GHI per (day, country) and max/min/mean per country.
///
/// Only rows with both a timestamp and a GHI value count. Countries without
/// any such row, including those missing a date or GHI column, are left out
/// of both outputs.
pub fn aggregate<'a, I, S>(datasets: I) -> Result<ComparativeOutcome, DashboardError>
where
    I: IntoIterator<Item = (S, &'a NormalizedFrame)>,
    S: Into<String>,
{
    let mut frames = Vec::new();
    for (country, frame) in datasets {
        let country: String = country.into();
        match frame.readings() {
            Some(readings) => frames.push(readings.with_column(lit(country).alias("country"))),
            None => debug!("No date or GHI column for {}, excluded from comparison", country),
        }
    }
    if frames.is_empty() {
        return Ok(ComparativeOutcome::NoComparativeData);
    }

    let readings = concat(frames, UnionArgs::default())?.collect()?;
    if readings.height() == 0 {
        return Ok(ComparativeOutcome::NoComparativeData);
    }

    let daily = readings
        .clone()
        .lazy()
        .group_by([col("date").dt().date().alias("date"), col("country")])
        .agg([col("ghi").mean()])
        .sort(["date", "country"], SortMultipleOptions::default())
        .collect()?;

    let summary = readings
        .lazy()
        .group_by([col("country")])
        .agg([
            col("ghi").max().alias("max"),
            col("ghi").min().alias("min"),
            col("ghi").mean().alias("avg"),
            col("ghi").count().alias("readings"),
        ])
        .sort(["country"], SortMultipleOptions::default())
        .collect()?;

    Ok(ComparativeOutcome::Ready(ComparativeAggregates { daily, summary }))
}
