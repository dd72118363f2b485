//! CSV Data Loader Module
//! Reads the daily records CSV with Polars and converts it into `RawRecord`s.

use super::record::RawRecord;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Columns the loader requires; anything else in the file is ignored.
pub const DATE_COL: &str = "date";
pub const LOCATION_COL: &str = "location";
pub const NEW_DEATHS_COL: &str = "new_deaths";
pub const PEOPLE_VACCINATED_COL: &str = "people_vaccinated";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Unparseable date {value:?} at row {row}")]
    InvalidDate { row: usize, value: Option<String> },
}

/// Load every row of `path` into memory.
///
/// Rows without a location are dropped, the same way a group-by on location
/// would drop them. A missing file, a missing column or a bad date aborts the
/// whole load.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .with_dtype_overwrite(Some(Arc::new(column_types())))
        .finish()?
        .select([
            col(DATE_COL).cast(DataType::String),
            col(LOCATION_COL).cast(DataType::String),
            col(NEW_DEATHS_COL).cast(DataType::Float64),
            col(PEOPLE_VACCINATED_COL).cast(DataType::Float64),
        ])
        .collect()?;

    let records = records_from_frame(&df)?;
    info!(
        path = %path.display(),
        rows = df.height(),
        records = records.len(),
        "loaded daily records"
    );
    Ok(records)
}

/// Fixed types for the required columns so a late decimal in a column of
/// integers cannot fail inference.
fn column_types() -> Schema {
    let mut schema = Schema::with_capacity(4);
    schema.insert(DATE_COL.into(), DataType::String);
    schema.insert(LOCATION_COL.into(), DataType::String);
    schema.insert(NEW_DEATHS_COL.into(), DataType::Float64);
    schema.insert(PEOPLE_VACCINATED_COL.into(), DataType::Float64);
    schema
}

/// Convert an already selected and cast frame into records.
fn records_from_frame(df: &DataFrame) -> Result<Vec<RawRecord>, LoadError> {
    let dates = df.column(DATE_COL)?.str()?;
    let locations = df.column(LOCATION_COL)?.str()?;
    let deaths = df.column(NEW_DEATHS_COL)?.f64()?;
    let vaccinated = df.column(PEOPLE_VACCINATED_COL)?.f64()?;

    let mut records = Vec::with_capacity(df.height());
    let rows = dates
        .into_iter()
        .zip(locations)
        .zip(deaths)
        .zip(vaccinated)
        .enumerate();

    for (row, (((date, location), new_deaths), people_vaccinated)) in rows {
        let date = date
            .and_then(parse_date)
            .ok_or_else(|| LoadError::InvalidDate {
                row,
                value: date.map(str::to_string),
            })?;

        let Some(location) = location else {
            debug!(row, "skipping row without location");
            continue;
        };

        records.push(RawRecord {
            date,
            location: location.to_string(),
            new_deaths: new_deaths.filter(|v| !v.is_nan()),
            people_vaccinated: people_vaccinated.filter(|v| !v.is_nan()),
        });
    }

    Ok(records)
}

/// Parse an ISO date, accepting a trailing time component.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
                .ok()
                .map(|dt| dt.date())
        })
}
