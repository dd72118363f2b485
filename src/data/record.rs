//! Record types shared by the loader, aggregator and charts.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid month key '{0}', expected YYYY-MM")]
pub struct MonthKeyError(pub String);

/// Calendar month bucket in zero-padded `YYYY-MM` form.
///
/// Ordering is plain string ordering, which is chronological because the
/// format is fixed width.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey(String);

impl MonthKey {
    /// Truncate a date to its calendar month.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_year_month(date.year(), date.month())
    }

    /// Build from numeric parts; `month` must be 1..=12.
    pub(crate) fn from_year_month(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        Self(format!("{year:04}-{month:02}"))
    }

    /// Parse a `YYYY-MM` string.
    pub fn parse(s: &str) -> Result<Self, MonthKeyError> {
        let s = s.trim();
        let valid = s.len() == 7
            && s.as_bytes()[4] == b'-'
            && NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").is_ok();
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(MonthKeyError(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.0
    }
}

/// One daily row from the input CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub date: NaiveDate,
    pub location: String,
    pub new_deaths: Option<f64>,
    pub people_vaccinated: Option<f64>,
}

impl RawRecord {
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

/// Per (month, location) reduction of raw records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAggregate {
    pub month: MonthKey,
    pub location: String,
    /// Sum of `new_deaths`, missing values counted as zero.
    pub new_deaths_sum: f64,
    /// `people_vaccinated` of the latest-dated record in the group.
    pub people_vaccinated_last: Option<f64>,
}
