//! Scoring statistics over a set of rounds.

use std::borrow::Borrow;

use super::stats::{average, best_worst, category_breakdown, ratio_percentage, CategoryShare};
use crate::records::{Round, HOLES_PER_ROUND};

/// Aggregate statistics for a set of rounds.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    /// Number of rounds included
    pub total_rounds: usize,
    /// Mean score
    pub avg_score: Option<f64>,
    /// Mean strokes relative to par
    pub avg_to_par: Option<f64>,
    /// Fairways hit over fairways available, 0-100
    pub fairway_accuracy: f64,
    /// Greens in regulation over holes played, 0-100
    pub gir_percentage: f64,
    /// Mean putts per round
    pub avg_putts: Option<f64>,
}

impl RoundSummary {
    /// Compute the summary; an empty set yields zero counts and `None`
    /// averages.
    pub fn from_rounds<R: Borrow<Round>>(rounds: &[R]) -> Self {
        let rounds: Vec<&Round> = rounds.iter().map(as_round).collect();

        let fairways_hit: u32 = rounds.iter().map(|r| r.fairways_hit).sum();
        let fairways_total: u32 = rounds.iter().map(|r| r.fairways_total).sum();
        let greens: u32 = rounds.iter().map(|r| r.greens_in_regulation).sum();
        let holes = rounds.len() as f64 * f64::from(HOLES_PER_ROUND);

        Self {
            total_rounds: rounds.len(),
            avg_score: average(rounds.iter().map(|r| f64::from(r.score))),
            avg_to_par: average(rounds.iter().map(|r| r.to_par() as f64)),
            fairway_accuracy: ratio_percentage(f64::from(fairways_hit), f64::from(fairways_total)),
            gir_percentage: ratio_percentage(f64::from(greens), holes),
            avg_putts: average(rounds.iter().map(|r| f64::from(r.putts))),
        }
    }
}

/// Best and worst rounds of a set.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlights {
    /// Lowest score
    pub best: Round,
    /// Highest score
    pub worst: Round,
}

impl Highlights {
    /// Best and worst by score; `None` for an empty set.
    pub fn from_rounds<R: Borrow<Round>>(rounds: &[R]) -> Option<Self> {
        let extremes = best_worst(rounds, |r| f64::from(as_round(r).score))?;
        Some(Self {
            best: as_round(extremes.best).clone(),
            worst: as_round(extremes.worst).clone(),
        })
    }

    /// Strokes between the worst and best score.
    pub fn score_range(&self) -> u32 {
        self.worst.score.saturating_sub(self.best.score)
    }
}

fn as_round<R: Borrow<Round>>(record: &R) -> &Round {
    record.borrow()
}

/// Per-course round counts, share of rounds and average score.
pub fn course_breakdown<R: Borrow<Round>>(rounds: &[R]) -> Vec<CategoryShare> {
    let rounds: Vec<&Round> = rounds.iter().map(as_round).collect();
    category_breakdown(&rounds)
}
