//! Report document model, options and errors.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::analytics::RecordQuery;

/// Which collection a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Scoring statistics and round listing
    Rounds,
    /// Practice time statistics and session listing
    Practice,
    /// Logged club distances, one table per club
    Clubs,
}

impl ReportKind {
    /// Document title.
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Rounds => "Golf Statistics Report",
            ReportKind::Practice => "Practice Sessions Report",
            ReportKind::Clubs => "Club Distances Report",
        }
    }

    /// Filename prefix; the generation date is appended.
    pub fn file_stem(&self) -> &'static str {
        match self {
            ReportKind::Rounds => "golf-stats",
            ReportKind::Practice => "practice-sessions",
            ReportKind::Clubs => "club-distances",
        }
    }

    /// Name of the field the category filter applies to.
    pub fn category_name(&self) -> &'static str {
        match self {
            ReportKind::Rounds => "Course",
            ReportKind::Practice => "Practice Type",
            ReportKind::Clubs => "Club",
        }
    }

    /// Plural noun for the records the report lists.
    pub fn noun(&self) -> &'static str {
        match self {
            ReportKind::Rounds => "rounds",
            ReportKind::Practice => "practice sessions",
            ReportKind::Clubs => "club distances",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.noun())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rounds" | "round" | "stats" => Ok(ReportKind::Rounds),
            "practice" | "sessions" | "session" => Ok(ReportKind::Practice),
            "clubs" | "club" | "distances" => Ok(ReportKind::Clubs),
            other => Err(format!("unknown report kind: {}", other)),
        }
    }
}

/// Options for generating one report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Filter and sort applied to the listing
    pub query: RecordQuery,
    /// Timestamp printed in the header and used for the filename
    pub generated_at: DateTime<Utc>,
}

impl ReportOptions {
    /// Options stamped with the current time.
    pub fn new(query: RecordQuery) -> Self {
        Self {
            query,
            generated_at: Utc::now(),
        }
    }

    /// Options with a fixed generation time.
    pub fn at(query: RecordQuery, generated_at: DateTime<Utc>) -> Self {
        Self {
            query,
            generated_at,
        }
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::new(RecordQuery::default())
    }
}

/// Font weight of a placed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextStyle {
    #[default]
    Normal,
    Bold,
}

/// A run of text at a fixed position on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    /// Baseline position from the top edge
    pub y: f64,
    /// Position from the left edge
    pub x: f64,
    /// Font size in points
    pub size: f64,
    pub style: TextStyle,
    pub text: String,
}

/// One page of a report.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    /// 1-based page number
    pub number: usize,
    /// Lines in placement order
    pub lines: Vec<PlacedLine>,
}

impl Page {
    /// Whether `text` appears anywhere on the page.
    pub fn contains(&self, text: &str) -> bool {
        self.lines.iter().any(|l| l.text.contains(text))
    }

    /// Position of the first line containing `text`.
    pub fn position_of(&self, text: &str) -> Option<f64> {
        self.lines.iter().find(|l| l.text.contains(text)).map(|l| l.y)
    }
}

/// A generated, paginated report.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub kind: ReportKind,
    pub generated_at: DateTime<Utc>,
    pub pages: Vec<Page>,
}

impl Document {
    /// Filename without extension, e.g. `golf-stats-2024-05-01`.
    pub fn filename(&self) -> String {
        format!(
            "{}-{}",
            self.kind.file_stem(),
            self.generated_at.format("%Y-%m-%d")
        )
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Errors from generating or delivering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filters left nothing to report
    #[error("No {0} to export for the selected filters")]
    EmptyResult(ReportKind),

    /// Failed to produce the output
    #[error("Failed to write report: {0}")]
    WriteFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
