//! Date-range and category filters plus deterministic sorting.
//!
//! Filter and sort options are closed enums so every front end goes through
//! the same dispatch instead of comparing option strings.

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::records::{PracticeSession, Round};

/// Records carrying a calendar date.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// Records with a single discriminant used for category filters and
/// breakdowns.
pub trait Categorized {
    fn category(&self) -> &str;
}

/// Records with a primary numeric value used for magnitude sorting.
pub trait Measured {
    fn magnitude(&self) -> f64;
}

impl<T: Dated + ?Sized> Dated for &T {
    fn date(&self) -> NaiveDate {
        (**self).date()
    }
}

impl<T: Categorized + ?Sized> Categorized for &T {
    fn category(&self) -> &str {
        (**self).category()
    }
}

impl<T: Measured + ?Sized> Measured for &T {
    fn magnitude(&self) -> f64 {
        (**self).magnitude()
    }
}

impl Dated for Round {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Categorized for Round {
    fn category(&self) -> &str {
        &self.course
    }
}

impl Measured for Round {
    fn magnitude(&self) -> f64 {
        f64::from(self.score)
    }
}

impl Dated for PracticeSession {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Categorized for PracticeSession {
    fn category(&self) -> &str {
        self.practice_type.as_str()
    }
}

impl Measured for PracticeSession {
    fn magnitude(&self) -> f64 {
        f64::from(self.duration)
    }
}

/// Inclusive date range; a missing bound leaves that side open.
///
/// Dates are plain calendar dates, so comparisons never involve a time zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Range with both bounds optional.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Unbounded range that accepts every date.
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// `start <= date <= end` for whichever bounds are present.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| start <= date) && self.end.map_or(true, |end| date <= end)
    }

    /// Human-readable description, `None` when unbounded.
    pub fn label(&self) -> Option<String> {
        if self.is_unbounded() {
            return None;
        }
        let start = self
            .start
            .map_or_else(|| "Start".to_string(), |d| d.to_string());
        let end = self.end.map_or_else(|| "End".to_string(), |d| d.to_string());
        Some(format!("{} to {}", start, end))
    }
}

/// Exact-match filter on a record's category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category passes
    #[default]
    All,
    /// Only this exact category passes
    Only(String),
}

impl CategoryFilter {
    /// Build from an optional selection; `None` or `"all"` means no filter.
    pub fn from_selection(selection: Option<&str>) -> Self {
        match selection.map(str::trim) {
            None | Some("") | Some("all") => CategoryFilter::All,
            Some(value) => CategoryFilter::Only(value.to_string()),
        }
    }

    /// Whether `category` passes.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }

    /// The single selected category, if any.
    pub fn selected(&self) -> Option<&str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(selected) => Some(selected),
        }
    }
}

/// Sort orders for record listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Newest first
    #[default]
    DateDesc,
    /// Category name, A to Z
    CategoryAsc,
    /// Largest value first
    MagnitudeDesc,
}

impl SortOrder {
    /// Label for report headers.
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::DateDesc => "Date (newest first)",
            SortOrder::CategoryAsc => "Category (A-Z)",
            SortOrder::MagnitudeDesc => "Value (highest first)",
        }
    }

    /// Compare two records under this order.
    pub fn compare<T>(&self, a: &T, b: &T) -> Ordering
    where
        T: Dated + Categorized + Measured,
    {
        match self {
            SortOrder::DateDesc => b.date().cmp(&a.date()),
            SortOrder::CategoryAsc => a.category().cmp(b.category()),
            SortOrder::MagnitudeDesc => b.magnitude().total_cmp(&a.magnitude()),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(SortOrder::DateDesc),
            "category" | "course" | "type" | "club" => Ok(SortOrder::CategoryAsc),
            "magnitude" | "score" | "duration" | "distance" => Ok(SortOrder::MagnitudeDesc),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// Stable sort; records with equal keys keep their relative order.
pub fn sort_records<T>(records: &mut [T], order: SortOrder)
where
    T: Dated + Categorized + Measured,
{
    records.sort_by(|a, b| order.compare(a, b));
}

/// Records passing both the date range and the category filter, in input
/// order.
pub fn filter_records<'a, T>(
    records: &'a [T],
    range: &DateRange,
    category: &CategoryFilter,
) -> Vec<&'a T>
where
    T: Dated + Categorized,
{
    records
        .iter()
        .filter(|r| range.contains(r.date()) && category.matches(r.category()))
        .collect()
}

/// A filter-then-sort request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    pub range: DateRange,
    pub category: CategoryFilter,
    pub sort: SortOrder,
}

impl RecordQuery {
    /// Filter `records` and sort the survivors.
    pub fn apply<'a, T>(&self, records: &'a [T]) -> Vec<&'a T>
    where
        T: Dated + Categorized + Measured,
    {
        let mut selected = filter_records(records, &self.range, &self.category);
        sort_records(&mut selected, self.sort);
        selected
    }
}
