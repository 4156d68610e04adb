//! Club distance statistics.
//!
//! Logged entries live inside their club, so filtering and sorting work on
//! flattened [`ClubDistanceRow`]s that carry the club name alongside each
//! entry.

use chrono::NaiveDate;
use std::borrow::Borrow;

use super::filter::{Categorized, DateRange, Dated, Measured};
use super::stats::average;
use crate::records::{ClubData, ClubDistanceEntry};

/// One logged distance together with its club.
#[derive(Debug, Clone, PartialEq)]
pub struct ClubDistanceRow {
    /// Club name
    pub club: String,
    /// Club's reference distance in yards
    pub baseline: f64,
    /// The logged sample
    pub entry: ClubDistanceEntry,
}

impl Dated for ClubDistanceRow {
    fn date(&self) -> NaiveDate {
        self.entry.date
    }
}

impl Categorized for ClubDistanceRow {
    fn category(&self) -> &str {
        &self.club
    }
}

impl Measured for ClubDistanceRow {
    fn magnitude(&self) -> f64 {
        self.entry.distance
    }
}

/// Flatten every club's entries, clubs in stored order and entries in
/// insertion order.
pub fn distance_rows(clubs: &[ClubData]) -> Vec<ClubDistanceRow> {
    clubs
        .iter()
        .flat_map(|club| {
            club.entries.iter().map(move |entry| ClubDistanceRow {
                club: club.name.clone(),
                baseline: club.avg_distance,
                entry: entry.clone(),
            })
        })
        .collect()
}

/// Group rows by club in order of first appearance, keeping row order within
/// each group.
pub fn group_by_club<R: Borrow<ClubDistanceRow>>(rows: &[R]) -> Vec<(String, Vec<&ClubDistanceRow>)> {
    let mut groups: Vec<(String, Vec<&ClubDistanceRow>)> = Vec::new();

    for row in rows.iter().map(as_row) {
        match groups.iter_mut().find(|(name, _)| *name == row.club) {
            Some((_, members)) => members.push(row),
            None => groups.push((row.club.clone(), vec![row])),
        }
    }

    groups
}

fn as_row<R: Borrow<ClubDistanceRow>>(record: &R) -> &ClubDistanceRow {
    record.borrow()
}

/// Logged-distance statistics for one club.
#[derive(Debug, Clone, PartialEq)]
pub struct ClubSummary {
    /// Club name
    pub name: String,
    /// Reference distance in yards
    pub baseline: f64,
    /// Number of entries included
    pub entries: usize,
    /// Mean logged distance
    pub avg_distance: Option<f64>,
    /// Shortest logged distance
    pub shortest: Option<f64>,
    /// Longest logged distance
    pub longest: Option<f64>,
}

impl ClubSummary {
    /// Summarize the distances of `entries` against the given baseline.
    pub fn new<'a, I>(name: &str, baseline: f64, entries: I) -> Self
    where
        I: IntoIterator<Item = &'a ClubDistanceEntry>,
    {
        let distances: Vec<f64> = entries.into_iter().map(|e| e.distance).collect();

        Self {
            name: name.to_string(),
            baseline,
            entries: distances.len(),
            avg_distance: average(distances.iter().copied()),
            shortest: distances.iter().copied().reduce(f64::min),
            longest: distances.iter().copied().reduce(f64::max),
        }
    }

    /// Summary of a club's entries that fall inside `range`.
    pub fn from_club(club: &ClubData, range: &DateRange) -> Self {
        Self::new(
            &club.name,
            club.avg_distance,
            club.entries.iter().filter(|e| range.contains(e.date)),
        )
    }

    /// Summary of a group of rows for the same club.
    pub fn from_rows(name: &str, rows: &[&ClubDistanceRow]) -> Self {
        let baseline = rows.first().map_or(0.0, |r| r.baseline);
        Self::new(name, baseline, rows.iter().map(|r| &r.entry))
    }

    /// Average logged distance minus the baseline.
    pub fn diff_from_baseline(&self) -> Option<f64> {
        self.avg_distance.map(|avg| avg - self.baseline)
    }
}
