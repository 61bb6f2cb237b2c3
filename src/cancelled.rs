//! Cancellation detection for upcoming departures.
//!
//! The API has no single reliable cancellation signal, so three independent
//! heuristics are tried in priority order; the first hit wins.

use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::CheckError;
use crate::model::{Departure, parse_stamp};

/// Departures closer than this are too near to judge reliably.
pub const MIN_LEAD_SECS: i64 = 120;
/// Beyond this the API stops carrying real prognosis data.
pub const MAX_LEAD_SECS: i64 = 3600;
/// A prognosis older than this relative to now marks a ghost departure.
const STALE_PROGNOSIS_SECS: i64 = 120;

/// Why an entry was classified as cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReason {
    /// The stop record carries an explicit `cancelled: true`.
    Flagged,
    /// A prognosis sub-record exists but its departure is null.
    NullPrognosis,
    /// The prognosis departure lies well in the past.
    StalePrognosis(DateTime<FixedOffset>),
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Flagged => write!(f, "cancelled=true"),
            CancelReason::NullPrognosis => write!(f, "prognosis.departure=null"),
            CancelReason::StalePrognosis(t) => {
                write!(f, "prognosis={} (in past)", t.format("%H:%M"))
            }
        }
    }
}

/// A departure classified as cancelled, with reporting context.
#[derive(Debug)]
pub struct Verdict {
    pub line: String,
    pub to: String,
    pub scheduled: DateTime<FixedOffset>,
    pub minutes_until: i64,
    pub reason: CancelReason,
}

/// Classifies one departure against `now`.
///
/// Entries without a scheduled time, or outside the lead window (skip when
/// `time_until < 120` or `time_until > 3600`; the boundary values are kept),
/// return `Ok(None)` regardless of any other field.
pub fn classify(entry: &Departure, now: DateTime<Utc>) -> Result<Option<Verdict>, CheckError> {
    let Some(scheduled_str) = entry.stop.departure.as_deref() else {
        return Ok(None);
    };
    let scheduled = parse_stamp(scheduled_str)?;

    let time_until = scheduled.signed_duration_since(now).num_seconds();
    if time_until < MIN_LEAD_SECS || time_until > MAX_LEAD_SECS {
        return Ok(None);
    }

    let reason = if entry.stop.cancelled == Some(true) {
        Some(CancelReason::Flagged)
    } else if let Some(prognosis) = &entry.stop.prognosis {
        match prognosis.departure.as_deref() {
            None => Some(CancelReason::NullPrognosis),
            Some(s) => {
                let prognosed = parse_stamp(s)?;
                if now.signed_duration_since(prognosed).num_seconds() > STALE_PROGNOSIS_SECS {
                    Some(CancelReason::StalePrognosis(prognosed))
                } else {
                    None
                }
            }
        }
    } else {
        None
    };

    Ok(reason.map(|reason| Verdict {
        line: entry.line(),
        to: entry.to.clone(),
        scheduled,
        minutes_until: time_until / 60,
        reason,
    }))
}

/// Classifies a whole board in response order, keeping only cancelled entries.
pub fn find_cancelled(
    entries: &[Departure],
    now: DateTime<Utc>,
) -> Result<Vec<Verdict>, CheckError> {
    let mut verdicts = Vec::new();
    for entry in entries {
        if let Some(verdict) = classify(entry, now)? {
            verdicts.push(verdict);
        }
    }
    Ok(verdicts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Prognosis, Stop};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap()
    }

    fn stamp(offset_secs: i64) -> String {
        let cet = FixedOffset::east_opt(3600).unwrap();
        (now() + Duration::seconds(offset_secs))
            .with_timezone(&cet)
            .format("%Y-%m-%dT%H:%M:%S%z")
            .to_string()
    }

    fn departure(stop: Stop) -> Departure {
        Departure {
            category: Some("T".into()),
            number: Some("7".into()),
            to: "Zürich, Bahnhof Stettbach".into(),
            stop,
        }
    }

    #[test]
    fn test_explicit_flag_wins() {
        let dep = departure(Stop {
            departure: Some(stamp(600)),
            cancelled: Some(true),
            ..Default::default()
        });

        let verdict = classify(&dep, now()).unwrap().unwrap();
        assert_eq!(verdict.reason, CancelReason::Flagged);
        assert_eq!(verdict.line, "T7");
        assert_eq!(verdict.minutes_until, 10);
    }

    #[test]
    fn test_flag_beats_null_prognosis() {
        let dep = departure(Stop {
            departure: Some(stamp(600)),
            cancelled: Some(true),
            prognosis: Some(Prognosis { departure: None }),
            ..Default::default()
        });

        let verdict = classify(&dep, now()).unwrap().unwrap();
        assert_eq!(verdict.reason, CancelReason::Flagged);
    }

    #[test]
    fn test_null_prognosis_departure_flags() {
        let dep = departure(Stop {
            departure: Some(stamp(600)),
            prognosis: Some(Prognosis { departure: None }),
            ..Default::default()
        });

        let verdict = classify(&dep, now()).unwrap().unwrap();
        assert_eq!(verdict.reason, CancelReason::NullPrognosis);
    }

    #[test]
    fn test_absent_prognosis_sub_record_is_not_cancelled() {
        let dep = departure(Stop {
            departure: Some(stamp(600)),
            ..Default::default()
        });

        assert!(classify(&dep, now()).unwrap().is_none());
    }

    #[test]
    fn test_stale_prognosis_flags() {
        let dep = departure(Stop {
            departure: Some(stamp(600)),
            prognosis: Some(Prognosis {
                departure: Some(stamp(-180)),
            }),
            ..Default::default()
        });

        let verdict = classify(&dep, now()).unwrap().unwrap();
        assert!(matches!(verdict.reason, CancelReason::StalePrognosis(_)));
        assert_eq!(verdict.reason.to_string(), "prognosis=07:57 (in past)");
    }

    #[test]
    fn test_slightly_old_prognosis_is_tolerated() {
        // 120 seconds old is not "more than" the staleness threshold
        let dep = departure(Stop {
            departure: Some(stamp(600)),
            prognosis: Some(Prognosis {
                departure: Some(stamp(-120)),
            }),
            ..Default::default()
        });

        assert!(classify(&dep, now()).unwrap().is_none());
    }

    #[test]
    fn test_healthy_future_prognosis_is_not_cancelled() {
        let dep = departure(Stop {
            departure: Some(stamp(600)),
            prognosis: Some(Prognosis {
                departure: Some(stamp(660)),
            }),
            ..Default::default()
        });

        assert!(classify(&dep, now()).unwrap().is_none());
    }

    #[test]
    fn test_window_lower_boundary() {
        // 119 seconds out: skipped even when explicitly flagged
        let near = departure(Stop {
            departure: Some(stamp(119)),
            cancelled: Some(true),
            ..Default::default()
        });
        assert!(classify(&near, now()).unwrap().is_none());

        // exactly 120 seconds out: kept
        let edge = departure(Stop {
            departure: Some(stamp(120)),
            cancelled: Some(true),
            ..Default::default()
        });
        assert!(classify(&edge, now()).unwrap().is_some());
    }

    #[test]
    fn test_window_upper_boundary() {
        // exactly 3600 seconds out: kept
        let edge = departure(Stop {
            departure: Some(stamp(3600)),
            cancelled: Some(true),
            ..Default::default()
        });
        assert!(classify(&edge, now()).unwrap().is_some());

        // 3601 seconds out: skipped
        let far = departure(Stop {
            departure: Some(stamp(3601)),
            cancelled: Some(true),
            ..Default::default()
        });
        assert!(classify(&far, now()).unwrap().is_none());
    }

    #[test]
    fn test_ninety_seconds_out_is_ignored_entirely() {
        let dep = departure(Stop {
            departure: Some(stamp(90)),
            cancelled: Some(true),
            prognosis: Some(Prognosis { departure: None }),
            ..Default::default()
        });

        assert!(classify(&dep, now()).unwrap().is_none());
    }

    #[test]
    fn test_missing_scheduled_departure_is_skipped() {
        let dep = departure(Stop::default());
        assert!(classify(&dep, now()).unwrap().is_none());
    }

    #[test]
    fn test_find_cancelled_keeps_response_order() {
        let entries = vec![
            departure(Stop {
                departure: Some(stamp(300)),
                cancelled: Some(true),
                ..Default::default()
            }),
            departure(Stop {
                departure: Some(stamp(400)),
                ..Default::default()
            }),
            departure(Stop {
                departure: Some(stamp(500)),
                prognosis: Some(Prognosis { departure: None }),
                ..Default::default()
            }),
        ];

        let verdicts = find_cancelled(&entries, now()).unwrap();
        assert_eq!(verdicts.len(), 2);
        assert_eq!(verdicts[0].reason, CancelReason::Flagged);
        assert_eq!(verdicts[1].reason, CancelReason::NullPrognosis);
    }
}
