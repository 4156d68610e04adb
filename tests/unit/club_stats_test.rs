//! Unit tests for club distance statistics.

use chrono::NaiveDate;
use golfstats::analytics::{distance_rows, format_signed, ClubSummary, DateRange};
use golfstats::records::{default_clubs, ClubData, ClubDistanceEntry, RecordId};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Create a club with logged distances on consecutive days.
fn create_club(name: &str, baseline: f64, distances: &[f64]) -> ClubData {
    let mut club = ClubData::new(name, baseline);
    club.entries = distances
        .iter()
        .enumerate()
        .map(|(i, distance)| ClubDistanceEntry {
            id: RecordId(i as u64 + 1),
            date: date("2024-05-01") + chrono::Duration::days(i as i64),
            distance: *distance,
        })
        .collect();
    club
}

#[test]
fn test_logged_average_against_baseline() {
    let club = create_club("6 Iron", 165.0, &[160.0, 170.0, 171.0]);

    let summary = ClubSummary::from_club(&club, &DateRange::all());

    assert_eq!(summary.entries, 3);
    assert_eq!(summary.avg_distance, Some(167.0));
    assert_eq!(summary.shortest, Some(160.0));
    assert_eq!(summary.longest, Some(171.0));
    assert_eq!(format_signed(summary.diff_from_baseline()), "+2.0");
}

#[test]
fn test_club_without_entries_has_no_average() {
    let summary = ClubSummary::from_club(&default_clubs()[0], &DateRange::all());

    assert_eq!(summary.name, "Driver");
    assert_eq!(summary.baseline, 250.0);
    assert_eq!(summary.entries, 0);
    assert_eq!(format_signed(summary.diff_from_baseline()), "--");
}

#[test]
fn test_range_limits_entries() {
    let club = create_club("PW", 120.0, &[110.0, 115.0, 125.0, 130.0]);
    let range = DateRange::new(Some(date("2024-05-03")), None);

    let summary = ClubSummary::from_club(&club, &range);

    assert_eq!(summary.entries, 2);
    assert_eq!(summary.avg_distance, Some(127.5));
}

#[test]
fn test_rows_carry_club_and_baseline() {
    let clubs = vec![
        create_club("Driver", 250.0, &[245.0]),
        create_club("SW", 100.0, &[]),
        create_club("LW", 80.0, &[70.0, 75.0]),
    ];

    let rows = distance_rows(&clubs);

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].club, "Driver");
    assert_eq!(rows[1].club, "LW");
    assert_eq!(rows[2].baseline, 80.0);
    assert_eq!(rows[2].entry.distance, 75.0);
}
