//! demos/ghi_trend.rs
//!
//! Loads one country's solar readings through the dashboard pipeline and plots
//! GHI over time, one trace per region.
//!
//! Data is looked up under `$SOLAR_DASHBOARD_ROOT/data` and
//! `$SOLAR_DASHBOARD_ROOT/raw` (defaults to the working directory).
//!
//! To run this example:
//! cargo run --example ghi_trend --features examples -- togo

use std::error::Error;

use plotlars::{Legend, Plot, Rgb, Text, TimeSeriesPlot};
use polars::prelude::*;
use solar_dashboard::{Country, CountryOutcome, DashboardConfig, SolarDashboard};

fn main() -> Result<(), Box<dyn Error>> {
    let country = std::env::args().nth(1).unwrap_or_else(|| "benin".to_string());

    let config = DashboardConfig::builder().country(country.parse::<Country>()?).build()?;
    let dashboard = SolarDashboard::from_env();
    let view = dashboard.run(&config)?;

    println!("{}", view.heading());
    for message in view.messages() {
        println!("{message}");
    }

    let CountryOutcome::Ready { prepared, .. } = &view.outcome else {
        return Ok(());
    };
    if let Some(summary) = prepared.summary {
        println!(
            "GHI max {:.1}, min {:.1}, mean {:.1}",
            summary.max, summary.min, summary.mean
        );
    }

    let (Some(date), Some(ghi)) = (&prepared.roles.date, &prepared.roles.ghi) else {
        println!("No date/GHI columns to plot.");
        return Ok(());
    };
    for (label, series) in prepared.region_series()? {
        plot_ghi(&with_text_dates(series, date)?, date, ghi, &label);
    }
    Ok(())
}

/// plotlars wants a plain text x axis.
fn with_text_dates(mut data: DataFrame, date: &str) -> PolarsResult<DataFrame> {
    let text = data.column(date)?.cast(&DataType::String)?;
    data.with_column(text)?;
    Ok(data)
}

fn plot_ghi(data: &DataFrame, date: &str, ghi: &str, label: &str) {
    TimeSeriesPlot::builder()
        .data(data)
        .x(date)
        .y(ghi)
        .size(6)
        .colors(vec![Rgb(235, 117, 0)])
        .plot_title(Text::from(label).font("Arial").size(18))
        .legend(&Legend::new().x(0.05).y(0.9))
        .x_title("date")
        .y_title(Text::from("GHI (W/m²)").color(Rgb(0, 0, 0)))
        .build()
        .plot();
}
