//! Record types for rounds, club distances and practice sessions.
//!
//! Field names are serialized camelCase; the persisted layout is one JSON
//! array per collection.

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::storage::StorageError;

/// Holes in a round; the denominator for greens in regulation.
pub const HOLES_PER_ROUND: u32 = 18;

/// Built-in clubs with their reference carry distances in yards.
///
/// These are seeded when no club data has been persisted and cannot be
/// deleted.
pub const DEFAULT_CLUBS: [(&str, f64); 13] = [
    ("Driver", 250.0),
    ("3 Wood", 230.0),
    ("5 Wood", 210.0),
    ("3 Hybrid", 200.0),
    ("4 Iron", 185.0),
    ("5 Iron", 175.0),
    ("6 Iron", 165.0),
    ("7 Iron", 155.0),
    ("8 Iron", 145.0),
    ("9 Iron", 135.0),
    ("PW", 120.0),
    ("SW", 100.0),
    ("LW", 80.0),
];

/// Creation-ordered record identifier.
///
/// Written as a JSON number. Reading also accepts the numeric string form
/// (`"1712000000000"`) found in collections saved by the web app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Number(num) => num
                .as_u64()
                .map(RecordId)
                .ok_or_else(|| de::Error::custom("Invalid number for record id")),
            Value::String(s) => s.parse().map_err(de::Error::custom),
            _ => Err(de::Error::custom("Expected a string or number")),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(RecordId)
    }
}

/// One completed round's scorecard summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Unique identifier
    pub id: RecordId,
    /// Course name
    pub course: String,
    /// Date played
    pub date: NaiveDate,
    /// Total strokes
    pub score: u32,
    /// Course par
    pub par: u32,
    /// Fairways hit off the tee
    pub fairways_hit: u32,
    /// Fairways available (par 4s and 5s)
    pub fairways_total: u32,
    /// Greens hit in regulation (0-18)
    pub greens_in_regulation: u32,
    /// Total putts
    pub putts: u32,
}

impl Round {
    /// Strokes relative to par (positive is over par).
    pub fn to_par(&self) -> i64 {
        i64::from(self.score) - i64::from(self.par)
    }
}

/// User-entered round data, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundInput {
    pub course: String,
    pub date: NaiveDate,
    pub score: u32,
    pub par: u32,
    pub fairways_hit: u32,
    pub fairways_total: u32,
    pub greens_in_regulation: u32,
    pub putts: u32,
}

impl RoundInput {
    /// Check the ranges the entry form enforces.
    ///
    /// The repository does not call this; it is offered to front ends so
    /// they can reject bad input before it reaches storage.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.course.trim().is_empty() {
            return Err(RecordError::EmptyField("course"));
        }
        check_range("score", self.score, 54, 200)?;
        check_range("par", self.par, 54, 100)?;
        check_range("fairways_total", self.fairways_total, 1, 18)?;
        if self.fairways_hit > self.fairways_total {
            return Err(RecordError::FairwaysExceedTotal {
                hit: self.fairways_hit,
                total: self.fairways_total,
            });
        }
        check_range("greens_in_regulation", self.greens_in_regulation, 0, HOLES_PER_ROUND)?;
        check_range("putts", self.putts, 0, 100)?;
        Ok(())
    }

    pub(crate) fn into_round(self, id: RecordId) -> Round {
        Round {
            id,
            course: self.course.trim().to_string(),
            date: self.date,
            score: self.score,
            par: self.par,
            fairways_hit: self.fairways_hit,
            fairways_total: self.fairways_total,
            greens_in_regulation: self.greens_in_regulation,
            putts: self.putts,
        }
    }
}

fn check_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), RecordError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(RecordError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// A single logged shot distance for a club.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubDistanceEntry {
    /// Unique identifier
    pub id: RecordId,
    /// Date the distance was logged
    pub date: NaiveDate,
    /// Distance in yards
    pub distance: f64,
}

/// A club's reference distance plus the user's logged samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubData {
    /// Club name, unique ignoring case
    pub name: String,
    /// Reference baseline distance in yards
    pub avg_distance: f64,
    /// Logged samples in insertion order
    #[serde(default)]
    pub entries: Vec<ClubDistanceEntry>,
}

impl ClubData {
    /// Create a club without any logged entries.
    pub fn new(name: impl Into<String>, avg_distance: f64) -> Self {
        Self {
            name: name.into(),
            avg_distance,
            entries: Vec::new(),
        }
    }

    /// Case-insensitive name comparison.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// Whether this is one of the built-in clubs.
    pub fn is_default(&self) -> bool {
        is_default_club(&self.name)
    }

    /// Entries re-sorted for display, newest first. Same-day entries keep
    /// insertion order.
    pub fn entries_by_date(&self) -> Vec<&ClubDistanceEntry> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }
}

/// The built-in club set.
pub fn default_clubs() -> Vec<ClubData> {
    DEFAULT_CLUBS
        .iter()
        .map(|(name, distance)| ClubData::new(*name, *distance))
        .collect()
}

/// Whether `name` refers to a built-in club (ignoring case).
pub fn is_default_club(name: &str) -> bool {
    let name = name.trim().to_lowercase();
    DEFAULT_CLUBS
        .iter()
        .any(|(default, _)| default.to_lowercase() == name)
}

/// Kind of practice activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeType {
    Driving,
    Chipping,
    Putting,
    Bunker,
    Irons,
    Wedges,
    Other,
}

impl PracticeType {
    /// Every practice type in form order.
    pub const ALL: [PracticeType; 7] = [
        PracticeType::Driving,
        PracticeType::Chipping,
        PracticeType::Putting,
        PracticeType::Bunker,
        PracticeType::Irons,
        PracticeType::Wedges,
        PracticeType::Other,
    ];

    /// Stable lowercase identifier, also the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            PracticeType::Driving => "driving",
            PracticeType::Chipping => "chipping",
            PracticeType::Putting => "putting",
            PracticeType::Bunker => "bunker",
            PracticeType::Irons => "irons",
            PracticeType::Wedges => "wedges",
            PracticeType::Other => "other",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PracticeType::Driving => "Driving Range",
            PracticeType::Chipping => "Chipping",
            PracticeType::Putting => "Putting",
            PracticeType::Bunker => "Bunker Play",
            PracticeType::Irons => "Iron Play",
            PracticeType::Wedges => "Wedge Play",
            PracticeType::Other => "Other",
        }
    }
}

impl fmt::Display for PracticeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PracticeType {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        PracticeType::ALL
            .into_iter()
            .find(|t| t.as_str() == needle || t.label().to_lowercase() == needle)
            .ok_or_else(|| RecordError::UnknownPracticeType(s.to_string()))
    }
}

/// A logged training activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeSession {
    /// Unique identifier
    pub id: RecordId,
    /// Date practiced
    pub date: NaiveDate,
    /// Practice category
    #[serde(rename = "type")]
    pub practice_type: PracticeType,
    /// Duration in minutes
    pub duration: u32,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// User-entered practice data, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionInput {
    pub date: NaiveDate,
    pub practice_type: PracticeType,
    pub duration: u32,
    pub notes: Option<String>,
}

impl SessionInput {
    /// Check the constraints the entry form enforces.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.duration == 0 {
            return Err(RecordError::InvalidDuration(self.duration));
        }
        Ok(())
    }

    pub(crate) fn into_session(self, id: RecordId) -> PracticeSession {
        // Blank notes are stored as absent
        let notes = self
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        PracticeSession {
            id,
            date: self.date,
            practice_type: self.practice_type,
            duration: self.duration,
            notes,
        }
    }
}

/// Rejections and failures from record operations.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Required text field was blank
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// Numeric field outside the accepted range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// More fairways hit than available
    #[error("Fairways hit ({hit}) cannot exceed total fairways ({total})")]
    FairwaysExceedTotal { hit: u32, total: u32 },

    /// Distance must be a positive number
    #[error("Distance must be greater than zero, got {0}")]
    InvalidDistance(f64),

    /// Duration must be a positive number of minutes
    #[error("Duration must be at least one minute, got {0}")]
    InvalidDuration(u32),

    /// A club with this name already exists
    #[error("Club '{0}' already exists")]
    DuplicateClub(String),

    /// No club with this name
    #[error("Club '{0}' not found")]
    UnknownClub(String),

    /// Built-in clubs cannot be deleted
    #[error("Club '{0}' is a built-in club and cannot be deleted")]
    ProtectedClub(String),

    /// Unrecognized practice type name
    #[error("Unknown practice type: {0}")]
    UnknownPracticeType(String),

    /// Persisting the change failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl RecordError {
    /// Whether this is a validation rejection (state untouched) rather than a
    /// storage failure.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, RecordError::Storage(_))
    }
}
