//! Practice time statistics.

use std::borrow::Borrow;

use super::stats::{average, category_breakdown, CategoryShare};
use crate::records::{PracticeSession, PracticeType};

/// Aggregate statistics for a set of practice sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeSummary {
    /// Number of sessions included
    pub total_sessions: usize,
    /// Minutes practiced across all sessions
    pub total_minutes: u64,
    /// Mean session length in minutes
    pub avg_duration: Option<f64>,
    /// Type with the most sessions; earliest seen wins a tie
    pub most_practiced: Option<PracticeType>,
}

impl PracticeSummary {
    pub fn from_sessions<S: Borrow<PracticeSession>>(sessions: &[S]) -> Self {
        let sessions: Vec<&PracticeSession> = sessions.iter().map(as_session).collect();

        let mut most_practiced: Option<(PracticeType, usize)> = None;
        for share in practice_breakdown(&sessions) {
            let Some(practice_type) = type_of(&share) else {
                continue;
            };
            if most_practiced.map_or(true, |(_, count)| share.count > count) {
                most_practiced = Some((practice_type, share.count));
            }
        }

        Self {
            total_sessions: sessions.len(),
            total_minutes: sessions.iter().map(|s| u64::from(s.duration)).sum(),
            avg_duration: average(sessions.iter().map(|s| f64::from(s.duration))),
            most_practiced: most_practiced.map(|(t, _)| t),
        }
    }
}

fn as_session<S: Borrow<PracticeSession>>(record: &S) -> &PracticeSession {
    record.borrow()
}

/// Practice type a breakdown entry refers to.
pub fn type_of(share: &CategoryShare) -> Option<PracticeType> {
    share.category.parse().ok()
}

/// Per-type session counts, share of sessions and total minutes.
pub fn practice_breakdown<S: Borrow<PracticeSession>>(sessions: &[S]) -> Vec<CategoryShare> {
    let sessions: Vec<&PracticeSession> = sessions.iter().map(as_session).collect();
    category_breakdown(&sessions)
}
