//! Analytics module: filtering, sorting and aggregate statistics.
//!
//! All functions are pure; they take record slices and return new values.

pub mod clubs;
pub mod filter;
pub mod practice;
pub mod rounds;
pub mod stats;

pub use clubs::{distance_rows, group_by_club, ClubDistanceRow, ClubSummary};
pub use filter::{
    filter_records, sort_records, Categorized, CategoryFilter, DateRange, Dated, Measured,
    RecordQuery, SortOrder,
};
pub use practice::{practice_breakdown, PracticeSummary};
pub use rounds::{course_breakdown, Highlights, RoundSummary};
pub use stats::{
    average, best_worst, category_breakdown, format_decimal, format_percent, format_signed,
    format_to_par, ratio_percentage, CategoryShare, Extremes, NO_DATA,
};
