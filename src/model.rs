//! Typed model of the stationboard JSON response.
//!
//! Only the fields the checks consume are modeled; the API sends plenty
//! more, which serde ignores.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::error::CheckError;

/// Top-level response: a sequence of departures for one station.
#[derive(Debug, Deserialize)]
pub struct Stationboard {
    pub stationboard: Vec<Departure>,
}

/// One departure record from the board.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Departure {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub to: String,
    pub stop: Stop,
}

impl Departure {
    /// Line label as displayed on the vehicle, e.g. `T7` for tram 7.
    pub fn line(&self) -> String {
        format!(
            "{}{}",
            self.category.as_deref().unwrap_or(""),
            self.number.as_deref().unwrap_or("")
        )
    }
}

/// Stop-level timing data for a departure.
///
/// `delay` and `cancelled` come through as null on most entries; `prognosis`
/// may be absent, or present with a null departure. The two cases mean
/// different things to the cancellation detector.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Stop {
    #[serde(default)]
    pub departure: Option<String>,
    #[serde(default)]
    pub delay: Option<i64>,
    #[serde(default)]
    pub cancelled: Option<bool>,
    #[serde(default)]
    pub prognosis: Option<Prognosis>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Prognosis {
    #[serde(default)]
    pub departure: Option<String>,
}

const STAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Parses a stationboard timestamp such as `2024-01-01T08:03:00+0100`.
///
/// The API writes numeric offsets without a colon; `%z` accepts that form,
/// the colon form, and any offset value, so a summer-time `+0200` parses the
/// same way.
pub fn parse_stamp(value: &str) -> Result<DateTime<FixedOffset>, CheckError> {
    DateTime::parse_from_str(value, STAMP_FORMAT).map_err(|source| CheckError::BadTimestamp {
        value: value.to_string(),
        source,
    })
}
