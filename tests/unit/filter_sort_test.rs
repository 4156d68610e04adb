//! Unit tests for date-range and category filters and record sorting.

use chrono::NaiveDate;
use golfstats::analytics::{
    filter_records, sort_records, CategoryFilter, DateRange, RecordQuery, SortOrder,
};
use golfstats::records::{PracticeSession, PracticeType, RecordId};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Create a practice session on the given day.
fn create_session(id: u64, day: &str, practice_type: PracticeType, duration: u32) -> PracticeSession {
    PracticeSession {
        id: RecordId(id),
        date: date(day),
        practice_type,
        duration,
        notes: None,
    }
}

fn sample_sessions() -> Vec<PracticeSession> {
    vec![
        create_session(1, "2024-01-31", PracticeType::Putting, 30),
        create_session(2, "2024-02-01", PracticeType::Driving, 60),
        create_session(3, "2024-02-15", PracticeType::Putting, 45),
        create_session(4, "2024-02-29", PracticeType::Chipping, 60),
        create_session(5, "2024-03-01", PracticeType::Driving, 20),
    ]
}

fn ids(sessions: &[&PracticeSession]) -> Vec<u64> {
    sessions.iter().map(|s| s.id.0).collect()
}

#[test]
fn test_february_range_includes_both_ends() {
    let sessions = sample_sessions();
    let range = DateRange::new(Some(date("2024-02-01")), Some(date("2024-02-29")));

    let selected = filter_records(&sessions, &range, &CategoryFilter::All);

    assert_eq!(ids(&selected), vec![2, 3, 4]);
}

#[test]
fn test_single_day_range() {
    let sessions = sample_sessions();
    let range = DateRange::new(Some(date("2024-02-15")), Some(date("2024-02-15")));

    let selected = filter_records(&sessions, &range, &CategoryFilter::All);

    assert_eq!(ids(&selected), vec![3]);
}

#[test]
fn test_category_and_range_combined() {
    let sessions = sample_sessions();
    let range = DateRange::new(None, Some(date("2024-02-20")));
    let category = CategoryFilter::from_selection(Some("putting"));

    let selected = filter_records(&sessions, &range, &category);

    assert_eq!(ids(&selected), vec![1, 3]);
}

#[test]
fn test_magnitude_sort_keeps_insertion_order_for_ties() {
    let mut sessions = sample_sessions();

    sort_records(&mut sessions, SortOrder::MagnitudeDesc);

    let order: Vec<u64> = sessions.iter().map(|s| s.id.0).collect();
    assert_eq!(order, vec![2, 4, 3, 1, 5]);
}

#[test]
fn test_category_sort_is_lexicographic_and_stable() {
    let mut sessions = sample_sessions();

    sort_records(&mut sessions, SortOrder::CategoryAsc);

    let order: Vec<u64> = sessions.iter().map(|s| s.id.0).collect();
    // chipping, driving (2 then 5), putting (1 then 3)
    assert_eq!(order, vec![4, 2, 5, 1, 3]);
}

#[test]
fn test_query_defaults_to_newest_first() {
    let sessions = sample_sessions();

    let selected = RecordQuery::default().apply(&sessions);

    assert_eq!(ids(&selected), vec![5, 4, 3, 2, 1]);
}

#[test]
fn test_sorting_twice_is_stable() {
    let sessions = sample_sessions();
    let query = RecordQuery {
        sort: SortOrder::MagnitudeDesc,
        ..RecordQuery::default()
    };

    let first = query.apply(&sessions);
    let mut second = first.clone();
    sort_records(&mut second, SortOrder::MagnitudeDesc);

    assert_eq!(ids(&first), ids(&second));
}
