//! Integration tests for the export pipeline.
//!
//! Records go through the repository, get filtered and sorted, laid out as a
//! paginated document and delivered to a sink.

use chrono::{NaiveDate, TimeZone, Utc};
use golfstats::analytics::{CategoryFilter, DateRange, RecordQuery, SortOrder};
use golfstats::records::{PracticeType, RecordRepository, RoundInput, SessionInput};
use golfstats::report::layout::HEADING_SIZE;
use golfstats::report::table::ROW_HEIGHT;
use golfstats::report::{
    deliver, render_text, FileSink, MemorySink, PageLayout, ReportError, ReportGenerator,
    ReportKind, ReportOptions, PAGE_BREAK,
};
use golfstats::storage::{AppConfig, MemoryBackend};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn options(query: RecordQuery) -> ReportOptions {
    ReportOptions::at(query, Utc.with_ymd_and_hms(2024, 9, 1, 8, 0, 0).unwrap())
}

/// Populate a repository with a season of rounds, sessions and distances.
fn populated_repository(backend: &MemoryBackend) -> RecordRepository<&MemoryBackend> {
    let mut repo = RecordRepository::open(backend).unwrap();
    let courses = ["Oakmont", "Merion", "Shinnecock"];

    for i in 0..45u32 {
        repo.add_round(RoundInput {
            course: courses[i as usize % courses.len()].to_string(),
            date: date("2024-03-01") + chrono::Duration::days(i64::from(i) * 3),
            score: 78 + i % 15,
            par: 72,
            fairways_hit: 6 + i % 6,
            fairways_total: 14,
            greens_in_regulation: 5 + i % 8,
            putts: 29 + i % 6,
        })
        .unwrap();
    }

    for (i, practice_type) in PracticeType::ALL.iter().enumerate() {
        repo.add_session(SessionInput {
            date: date("2024-04-01") + chrono::Duration::days(i as i64),
            practice_type: *practice_type,
            duration: 30 + i as u32 * 5,
            notes: None,
        })
        .unwrap();
    }

    for (club, distance) in [("Driver", 248.0), ("7 Iron", 151.0), ("Driver", 255.0)] {
        repo.add_club_entry(club, distance, date("2024-05-01")).unwrap();
    }

    repo
}

#[test]
fn test_rounds_export_to_file() {
    let backend = MemoryBackend::new();
    let repo = populated_repository(&backend);
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        data_dir: dir.path().to_path_buf(),
        ..AppConfig::default()
    };

    let generator = ReportGenerator::from_settings(&config.reports);
    let document = generator
        .generate(ReportKind::Rounds, &repo, &options(RecordQuery::default()))
        .unwrap();
    let mut sink = FileSink::new(config.export_dir());
    let filename = deliver(&mut sink, &document).unwrap();

    assert_eq!(filename, "golf-stats-2024-09-01");
    let path = dir.path().join("reports").join("golf-stats-2024-09-01.txt");
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.starts_with("Golf Statistics Report"));
    assert!(text.contains("Total Rounds: 45"));
    // 45 rounds do not fit on the first page
    assert!(document.page_count() >= 2);
    assert_eq!(text.matches(PAGE_BREAK).count(), document.page_count() - 1);
}

#[test]
fn test_next_club_group_starts_below_previous_table() {
    let backend = MemoryBackend::new();
    let repo = populated_repository(&backend);

    let document = ReportGenerator::default()
        .generate(ReportKind::Clubs, &repo, &options(RecordQuery::default()))
        .unwrap();

    // Driver's table ends on the first page and 7 Iron's group follows it
    let page = &document.pages[0];
    let iron_heading = page
        .lines
        .iter()
        .find(|l| l.text == "7 Iron" && l.size == HEADING_SIZE)
        .unwrap();
    let last_driver_row = page
        .lines
        .iter()
        .filter(|l| l.text == "248.0 yds" || l.text == "255.0 yds")
        .map(|l| l.y)
        .fold(f64::MIN, f64::max);
    let driver_table_end = last_driver_row + ROW_HEIGHT;

    assert!(last_driver_row < iron_heading.y);
    assert!(iron_heading.y >= driver_table_end);
}

#[test]
fn test_rounds_continuation_page_stays_in_safe_area() {
    let backend = MemoryBackend::new();
    let repo = populated_repository(&backend);

    let document = ReportGenerator::default()
        .generate(ReportKind::Rounds, &repo, &options(RecordQuery::default()))
        .unwrap();

    // Every line on the continuation page sits inside the safe area, and the
    // table continues from the top margin with its header repeated
    let layout = PageLayout::default();
    let last = document.pages.last().unwrap();
    assert!(last.lines.iter().all(|l| l.y >= layout.top_margin));
    assert!(last.lines.iter().all(|l| l.y <= layout.safe_bottom()));
    assert_eq!(last.position_of("Course"), Some(layout.top_margin));
}

#[test]
fn test_empty_practice_range_produces_no_document() {
    let backend = MemoryBackend::new();
    let repo = populated_repository(&backend);
    let query = RecordQuery {
        range: DateRange::new(Some(date("2023-01-01")), Some(date("2023-12-31"))),
        ..RecordQuery::default()
    };

    let mut sink = MemorySink::new();
    let result = ReportGenerator::default().generate(ReportKind::Practice, &repo, &options(query));

    assert!(matches!(
        result,
        Err(ReportError::EmptyResult(ReportKind::Practice))
    ));
    if let Ok(document) = result {
        deliver(&mut sink, &document).unwrap();
    }
    assert!(sink.delivered.is_empty());
}

#[test]
fn test_filtered_course_report() {
    let backend = MemoryBackend::new();
    let repo = populated_repository(&backend);
    let query = RecordQuery {
        range: DateRange::new(Some(date("2024-04-01")), Some(date("2024-04-30"))),
        category: CategoryFilter::from_selection(Some("Merion")),
        sort: SortOrder::MagnitudeDesc,
    };

    let document = ReportGenerator::default()
        .generate(ReportKind::Rounds, &repo, &options(query.clone()))
        .unwrap();
    let text = render_text(&document);

    let expected = query.apply(repo.rounds());
    assert!(!expected.is_empty());
    assert!(expected.iter().all(|r| r.course == "Merion"));
    assert!(text.contains("Date Range: 2024-04-01 to 2024-04-30"));
    assert!(text.contains("Course: Merion"));
    assert!(!text.contains("Course Breakdown"));
    assert!(text.contains(&format!("Total Rounds: {}", expected.len())));
    assert!(!text.contains("Oakmont"));
}

#[test]
fn test_clubs_report_and_csv() {
    let backend = MemoryBackend::new();
    let repo = populated_repository(&backend);
    let generator = ReportGenerator::default();
    let opts = options(RecordQuery::default());

    let document = generator.generate(ReportKind::Clubs, &repo, &opts).unwrap();
    let text = render_text(&document);
    assert_eq!(document.filename(), "club-distances-2024-09-01");
    assert!(text.contains("Total Entries: 3"));
    assert!(text.contains("Longest Entry: 255.0 yds (Driver)"));

    let csv = generator.listing_csv(ReportKind::Clubs, &repo, &opts).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "date,club,distance_yards,baseline_yards,vs_baseline");
    assert!(lines.contains(&"2024-05-01,7 Iron,151.0,155.0,-4.0"));
}

#[test]
fn test_practice_csv_matches_filter() {
    let backend = MemoryBackend::new();
    let repo = populated_repository(&backend);
    let query = RecordQuery {
        category: CategoryFilter::from_selection(Some("putting")),
        ..RecordQuery::default()
    };

    let csv = ReportGenerator::default()
        .listing_csv(ReportKind::Practice, &repo, &options(query))
        .unwrap();

    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains(",putting,40,"));
}
