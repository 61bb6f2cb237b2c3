//! Plain-text report rendering.
//!
//! Reports go to stdout; diagnostics stay on the tracing stderr stream.

use std::fmt::Write;

use crate::cancelled::Verdict;
use crate::prognosis::PrognosisReport;

/// Renders the prognosis check summary plus one detail block per mismatch.
pub fn render_prognosis_report(report: &PrognosisReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Analysis of {} tram departures:\n", report.total);
    let _ = writeln!(
        out,
        "  Exact matches (scheduled+delay == prognosis): {}",
        report.matches
    );
    let _ = writeln!(out, "  Differences found: {}", report.differences);
    let _ = writeln!(out, "  No prognosis data: {}", report.no_prognosis);

    if report.mismatches.is_empty() {
        let _ = writeln!(
            out,
            "\n✓ All departures match! scheduled+delay == prognosis.departure"
        );
        return out;
    }

    let _ = writeln!(
        out,
        "\n{} departures with differences:",
        report.differences
    );
    for m in &report.mismatches {
        let _ = writeln!(out, "\n  {}: {} to {}", m.station, m.line, m.to);
        let _ = writeln!(
            out,
            "    Scheduled: {} + {}min delay = {}",
            m.scheduled.format("%H:%M:%S"),
            m.delay_min,
            m.calculated.format("%H:%M:%S")
        );
        let _ = writeln!(out, "    Prognosis: {}", m.prognosis.format("%H:%M:%S"));
        let _ = writeln!(out, "    Difference: {} seconds", m.diff_seconds);
    }

    out
}

/// Renders one block per cancelled departure, or a fixed line when the
/// board looks clean.
pub fn render_cancelled(verdicts: &[Verdict]) -> String {
    if verdicts.is_empty() {
        return "No cancelled trams found in the next hour.\n".to_string();
    }

    let mut out = String::new();
    for v in verdicts {
        let _ = writeln!(out, "{} to {}", v.line, v.to);
        let _ = writeln!(
            out,
            "  Scheduled: {} (in {} min)",
            v.scheduled.format("%H:%M"),
            v.minutes_until
        );
        let _ = writeln!(out, "  Reason: {}", v.reason);
        let _ = writeln!(out);
    }

    out
}
