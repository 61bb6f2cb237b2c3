//! Consistency check: does `scheduled + delay` equal the API's own prognosis?

use chrono::{DateTime, Duration, FixedOffset};

use crate::error::CheckError;
use crate::model::{Departure, parse_stamp};

/// One departure whose reported prognosis disagrees with `scheduled + delay`.
#[derive(Debug)]
pub struct Mismatch {
    pub station: String,
    pub line: String,
    pub to: String,
    pub scheduled: DateTime<FixedOffset>,
    pub delay_min: i64,
    pub calculated: DateTime<FixedOffset>,
    pub prognosis: DateTime<FixedOffset>,
    /// Signed `prognosis - calculated`, whole seconds.
    pub diff_seconds: i64,
}

/// Aggregate tallies for one run.
///
/// Invariant: `matches + differences + no_prognosis == total`, and
/// `mismatches.len() == differences`.
#[derive(Debug, Default)]
pub struct PrognosisReport {
    pub total: usize,
    pub matches: usize,
    pub differences: usize,
    pub no_prognosis: usize,
    pub mismatches: Vec<Mismatch>,
}

/// Compares every departure's `scheduled + delay` against its prognosis.
///
/// Entries are `(station label, departure)` pairs in encounter order.
/// A missing or null delay counts as 0. Entries without a prognosis
/// departure (sub-record absent, or present with a null departure) are
/// tallied separately and never treated as mismatches. Equality is exact to
/// the second.
///
/// # Errors
///
/// A departure without a scheduled time, or with an unparseable timestamp,
/// aborts the whole check.
pub fn check_prognosis(entries: &[(String, Departure)]) -> Result<PrognosisReport, CheckError> {
    let mut report = PrognosisReport::default();

    for (station, entry) in entries {
        report.total += 1;

        let scheduled_str = entry
            .stop
            .departure
            .as_deref()
            .ok_or(CheckError::MissingField("stop.departure"))?;
        let scheduled = parse_stamp(scheduled_str)?;

        let delay_min = entry.stop.delay.unwrap_or(0);
        let calculated = scheduled + Duration::minutes(delay_min);

        let prognosis_str = entry
            .stop
            .prognosis
            .as_ref()
            .and_then(|p| p.departure.as_deref());

        let Some(prognosis_str) = prognosis_str else {
            report.no_prognosis += 1;
            continue;
        };

        let prognosis = parse_stamp(prognosis_str)?;
        let diff_seconds = (prognosis - calculated).num_seconds();

        if diff_seconds == 0 {
            report.matches += 1;
        } else {
            report.differences += 1;
            report.mismatches.push(Mismatch {
                station: station.clone(),
                line: entry.line(),
                to: entry.to.clone(),
                scheduled,
                delay_min,
                calculated,
                prognosis,
                diff_seconds,
            });
        }
    }

    Ok(report)
}
