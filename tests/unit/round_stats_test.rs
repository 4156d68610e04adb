//! Unit tests for round scoring statistics.

use chrono::NaiveDate;
use golfstats::analytics::{
    course_breakdown, format_decimal, format_percent, format_signed, Highlights, RoundSummary,
};
use golfstats::records::{RecordId, Round};

/// Create a round on a par-72 course with 14 fairways available.
fn create_round(id: u64, course: &str, score: u32, fairways_hit: u32, gir: u32, putts: u32) -> Round {
    Round {
        id: RecordId(id),
        course: course.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap() + chrono::Duration::days(id as i64),
        score,
        par: 72,
        fairways_hit,
        fairways_total: 14,
        greens_in_regulation: gir,
        putts,
    }
}

#[test]
fn test_two_round_scenario() {
    let rounds = vec![
        create_round(1, "Torrey Pines", 80, 10, 10, 30),
        create_round(2, "Torrey Pines", 90, 6, 6, 34),
    ];

    let summary = RoundSummary::from_rounds(&rounds);

    assert_eq!(summary.total_rounds, 2);
    assert_eq!(format_decimal(summary.avg_score), "85.0");
    assert_eq!(format_signed(summary.avg_to_par), "+13.0");
    assert_eq!(format_percent(summary.fairway_accuracy), "57.1%");
    assert_eq!(format_percent(summary.gir_percentage), "44.4%");
    assert_eq!(format_decimal(summary.avg_putts), "32.0");
}

#[test]
fn test_aggregates_keep_full_precision() {
    let rounds = vec![
        create_round(1, "A", 81, 7, 7, 31),
        create_round(2, "A", 82, 7, 7, 31),
        create_round(3, "A", 82, 7, 7, 32),
    ];

    let summary = RoundSummary::from_rounds(&rounds);

    // 245 / 3 is not rounded until formatting
    let avg = summary.avg_score.unwrap();
    assert!((avg - 81.666_666).abs() < 1e-5);
    assert_eq!(format_decimal(Some(avg)), "81.7");
}

#[test]
fn test_under_par_average_has_no_plus_sign() {
    let rounds = vec![create_round(1, "A", 70, 10, 14, 28)];
    let summary = RoundSummary::from_rounds(&rounds);
    assert_eq!(format_signed(summary.avg_to_par), "-2.0");
}

#[test]
fn test_no_rounds_shows_placeholders() {
    let rounds: Vec<Round> = Vec::new();
    let summary = RoundSummary::from_rounds(&rounds);

    assert_eq!(format_decimal(summary.avg_score), "--");
    assert_eq!(format_signed(summary.avg_to_par), "--");
    assert_eq!(format_percent(summary.fairway_accuracy), "0.0%");
    assert_eq!(format_percent(summary.gir_percentage), "0.0%");
}

#[test]
fn test_highlights_best_and_worst() {
    let rounds = vec![
        create_round(1, "Bethpage", 92, 5, 4, 36),
        create_round(2, "Pinehurst", 78, 11, 12, 29),
        create_round(3, "Bethpage", 85, 8, 8, 32),
    ];

    let highlights = Highlights::from_rounds(&rounds).unwrap();

    assert_eq!(highlights.best.course, "Pinehurst");
    assert_eq!(highlights.worst.score, 92);
    assert_eq!(highlights.score_range(), 14);
}

#[test]
fn test_course_breakdown_shares() {
    let rounds = vec![
        create_round(1, "Bethpage", 92, 5, 4, 36),
        create_round(2, "Pinehurst", 78, 11, 12, 29),
        create_round(3, "Bethpage", 86, 8, 8, 32),
        create_round(4, "Bethpage", 86, 8, 8, 32),
    ];

    let shares = course_breakdown(&rounds);

    assert_eq!(shares.len(), 2);
    assert_eq!(shares[0].category, "Bethpage");
    assert_eq!(shares[0].count, 3);
    assert_eq!(shares[0].percentage, 75.0);
    assert_eq!(format_decimal(shares[0].mean()), "88.0");
    assert_eq!(shares[1].percentage, 25.0);
}
