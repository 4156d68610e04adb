//! CSV export of record listings for spreadsheet use.
//!
//! Columns follow the detailed tables of the text reports. Rows are written in
//! the order given, so callers pass an already filtered and sorted listing.

use std::io::Write;

use super::types::{ReportError, ReportKind};
use crate::analytics::ClubDistanceRow;
use crate::records::{PracticeSession, Round};

/// Export rounds to CSV.
pub fn rounds_csv(rounds: &[&Round]) -> Result<String, ReportError> {
    if rounds.is_empty() {
        return Err(ReportError::EmptyResult(ReportKind::Rounds));
    }

    let mut output = Vec::new();

    writeln!(
        output,
        "date,course,score,par,to_par,fairways_hit,fairways_total,greens_in_regulation,putts"
    )
    .map_err(|e| ReportError::WriteFailed(e.to_string()))?;

    for round in rounds {
        writeln!(
            output,
            "{},{},{},{},{},{},{},{},{}",
            round.date,
            escape(&round.course),
            round.score,
            round.par,
            round.to_par(),
            round.fairways_hit,
            round.fairways_total,
            round.greens_in_regulation,
            round.putts,
        )
        .map_err(|e| ReportError::WriteFailed(e.to_string()))?;
    }

    String::from_utf8(output).map_err(|e| ReportError::WriteFailed(e.to_string()))
}

/// Export practice sessions to CSV.
pub fn practice_csv(sessions: &[&PracticeSession]) -> Result<String, ReportError> {
    if sessions.is_empty() {
        return Err(ReportError::EmptyResult(ReportKind::Practice));
    }

    let mut output = Vec::new();

    writeln!(output, "date,type,duration_minutes,notes")
        .map_err(|e| ReportError::WriteFailed(e.to_string()))?;

    for session in sessions {
        writeln!(
            output,
            "{},{},{},{}",
            session.date,
            session.practice_type.as_str(),
            session.duration,
            session.notes.as_deref().map_or(String::new(), escape),
        )
        .map_err(|e| ReportError::WriteFailed(e.to_string()))?;
    }

    String::from_utf8(output).map_err(|e| ReportError::WriteFailed(e.to_string()))
}

/// Export logged club distances to CSV.
pub fn clubs_csv(rows: &[&ClubDistanceRow]) -> Result<String, ReportError> {
    if rows.is_empty() {
        return Err(ReportError::EmptyResult(ReportKind::Clubs));
    }

    let mut output = Vec::new();

    writeln!(output, "date,club,distance_yards,baseline_yards,vs_baseline")
        .map_err(|e| ReportError::WriteFailed(e.to_string()))?;

    for row in rows {
        writeln!(
            output,
            "{},{},{:.1},{:.1},{:.1}",
            row.entry.date,
            escape(&row.club),
            row.entry.distance,
            row.baseline,
            row.entry.distance - row.baseline,
        )
        .map_err(|e| ReportError::WriteFailed(e.to_string()))?;
    }

    String::from_utf8(output).map_err(|e| ReportError::WriteFailed(e.to_string()))
}

/// Quote a field when it contains a delimiter, quote or newline.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
