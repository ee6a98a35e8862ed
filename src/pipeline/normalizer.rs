use crate::error::DashboardError;
use crate::types::column_role::{ColumnRoles, COLUMN_SYNONYMS};
use crate::types::solar_frame::NormalizedFrame;
use crate::utils::{datetime_to_millis, parse_timestamp};
use log::debug;
use polars::prelude::*;
use std::collections::HashSet;

/// Cleans column names, detects column roles and coerces role columns to
/// their expected types.
///
/// Unparsable timestamps and numbers become nulls; a bad cell never fails
/// the dataset. Running it again on its own output changes nothing.
///
/// # Errors
///
/// Returns [`DashboardError::DuplicateColumn`] when two columns normalize to
/// the same name, and [`DashboardError::Polars`] for other structural failures.
pub fn normalize(mut frame: DataFrame) -> Result<NormalizedFrame, DashboardError> {
    let names: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|name| canonical_column_name(name.as_str()))
        .collect();
    let mut seen = HashSet::with_capacity(names.len());
    if let Some(duplicate) = names.iter().find(|name| !seen.insert(name.as_str())) {
        return Err(DashboardError::DuplicateColumn(duplicate.clone()));
    }
    frame.set_column_names(names.iter().map(String::as_str))?;

    let roles = ColumnRoles::detect(&names);
    debug!("Detected column roles: {:?}", roles);

    if let Some(date) = &roles.date {
        coerce_datetime(&mut frame, date)?;
    }
    if let Some(ghi) = &roles.ghi {
        coerce_numeric(&mut frame, ghi)?;
    }
    if let Some(temperature) = &roles.temperature {
        coerce_numeric(&mut frame, temperature)?;
    }
    if let Some(region) = &roles.region {
        if roles.ghi.as_ref() != Some(region) {
            coerce_text(&mut frame, region)?;
        }
    }

    Ok(NormalizedFrame::new(frame, roles))
}

/// Trimmed, lower-cased, with known synonyms replaced.
pub fn canonical_column_name(raw: &str) -> String {
    let cleaned = raw.trim().to_lowercase();
    COLUMN_SYNONYMS
        .iter()
        .find(|(synonym, _)| *synonym == cleaned)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(cleaned)
}

fn coerce_datetime(frame: &mut DataFrame, name: &str) -> Result<(), DashboardError> {
    let column = frame.column(name)?;
    let coerced = match column.dtype() {
        DataType::Datetime(_, _) | DataType::Date => {
            column.cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
        }
        _ => {
            let text = column.cast(&DataType::String)?;
            let millis: Int64Chunked = text
                .str()?
                .into_iter()
                .map(|value| value.and_then(parse_timestamp).map(datetime_to_millis))
                .collect();
            Column::from(
                millis
                    .with_name(name.into())
                    .into_datetime(TimeUnit::Milliseconds, None)
                    .into_series(),
            )
        }
    };
    frame.with_column(coerced)?;
    Ok(())
}

fn coerce_numeric(frame: &mut DataFrame, name: &str) -> Result<(), DashboardError> {
    let column = frame.column(name)?;
    let parsed: Float64Chunked = match column.dtype() {
        DataType::String => column
            .str()?
            .into_iter()
            .map(|value| value.and_then(|v| v.trim().parse::<f64>().ok()))
            .collect(),
        _ => column.cast(&DataType::Float64)?.f64()?.clone(),
    };
    let cleaned: Float64Chunked = parsed
        .into_iter()
        .map(|value| value.filter(|v| !v.is_nan()))
        .collect();
    frame.with_column(Column::from(cleaned.with_name(name.into()).into_series()))?;
    Ok(())
}

fn coerce_text(frame: &mut DataFrame, name: &str) -> Result<(), DashboardError> {
    let text = frame.column(name)?.cast(&DataType::String)?;
    frame.with_column(text)?;
    Ok(())
}
