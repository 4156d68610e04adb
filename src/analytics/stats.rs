//! Generic aggregate helpers shared by the round, practice and club summaries.
//!
//! Everything here keeps full precision. Rounding happens in the `format_*`
//! helpers only.

use super::filter::{Categorized, Measured};

/// Arithmetic mean, `None` for an empty set.
pub fn average<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// `(numerator / denominator) * 100`, or `0` when the denominator is zero.
pub fn ratio_percentage(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}

/// Count and share of one category within a record set.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    /// Category value (course name, practice type id or club name)
    pub category: String,
    /// Records in this category
    pub count: usize,
    /// Share of all records, 0-100
    pub percentage: f64,
    /// Sum of the records' primary values
    pub total: f64,
}

impl CategoryShare {
    /// Mean of the primary value within the category.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.total / self.count as f64)
        }
    }
}

/// Group records by category, in order of first appearance.
pub fn category_breakdown<T>(records: &[T]) -> Vec<CategoryShare>
where
    T: Categorized + Measured,
{
    let mut shares: Vec<CategoryShare> = Vec::new();

    for record in records {
        let category = record.category();
        match shares.iter_mut().find(|s| s.category == category) {
            Some(share) => {
                share.count += 1;
                share.total += record.magnitude();
            }
            None => shares.push(CategoryShare {
                category: category.to_string(),
                count: 1,
                percentage: 0.0,
                total: record.magnitude(),
            }),
        }
    }

    let total = records.len() as f64;
    for share in &mut shares {
        share.percentage = ratio_percentage(share.count as f64, total);
    }

    shares
}

/// Best and worst records under a lower-is-better key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremes<T> {
    /// Record with the lowest key (first one on ties)
    pub best: T,
    /// Record with the highest key (last one on ties)
    pub worst: T,
}

/// Find the lowest and highest records by `key`; `None` for an empty set.
///
/// Ties resolve the way an ascending stable sort would: best is the first
/// minimum and worst is the last maximum.
pub fn best_worst<'a, T, F>(records: &'a [T], key: F) -> Option<Extremes<&'a T>>
where
    F: Fn(&T) -> f64,
{
    let mut iter = records.iter();
    let first = iter.next()?;
    let mut best = first;
    let mut worst = first;

    for record in iter {
        let value = key(record);
        if value < key(best) {
            best = record;
        }
        if value >= key(worst) {
            worst = record;
        }
    }

    Some(Extremes { best, worst })
}

/// Placeholder shown for a value that has no data.
pub const NO_DATA: &str = "--";

/// One decimal place, or `--` when there is no value.
pub fn format_decimal(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => NO_DATA.to_string(),
    }
}

/// One decimal place with a leading `+` for positive values.
pub fn format_signed(value: Option<f64>) -> String {
    match value {
        Some(v) if v > 0.0 => format!("+{:.1}", v),
        Some(v) => format!("{:.1}", v),
        None => NO_DATA.to_string(),
    }
}

/// Whole-stroke to-par value with a leading `+` when over par, `E` at par.
pub fn format_to_par(value: i64) -> String {
    match value {
        0 => "E".to_string(),
        v if v > 0 => format!("+{}", v),
        v => v.to_string(),
    }
}

/// One decimal place followed by `%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
