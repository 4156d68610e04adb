//! Report generation for rounds, practice sessions and club distances.
//!
//! Every report is laid out in the same section order: header, summary
//! statistics, an optional kind-specific section, the category breakdown
//! (skipped when a single category is selected) and the detailed listing.

use crate::analytics::{
    category_breakdown, course_breakdown, distance_rows, format_decimal, format_percent,
    format_signed, format_to_par, group_by_club, practice_breakdown, ClubSummary, Highlights,
    PracticeSummary, RoundSummary, NO_DATA,
};
use crate::records::{ClubData, PracticeSession, PracticeType, RecordRepository, Round};
use crate::storage::{ReportSettings, StorageBackend};

use super::csv::{clubs_csv, practice_csv, rounds_csv};
use super::layout::{
    PageBuilder, PageLayout, BODY_SIZE, HEADING_ADVANCE, LINE_ADVANCE, SECTION_GAP, TITLE_SIZE,
};
use super::table::{render_table, Column, ROW_HEIGHT};
use super::types::{Document, ReportError, ReportKind, ReportOptions, TextStyle};

const ROUND_COLUMNS: [Column; 7] = [
    Column::new("Date", 25.0),
    Column::new("Course", 40.0),
    Column::new("Score", 15.0),
    Column::new("To Par", 18.0),
    Column::new("FWY", 20.0),
    Column::new("GIR", 15.0),
    Column::new("Putts", 15.0),
];

const PRACTICE_COLUMNS: [Column; 4] = [
    Column::new("Date", 25.0),
    Column::new("Type", 35.0),
    Column::new("Duration", 22.0),
    Column::new("Notes", 100.0),
];

const CLUB_COLUMNS: [Column; 3] = [
    Column::new("Date", 30.0),
    Column::new("Distance", 25.0),
    Column::new("vs Baseline", 30.0),
];

/// Builds paginated report documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportGenerator {
    layout: PageLayout,
}

impl ReportGenerator {
    pub fn new(layout: PageLayout) -> Self {
        Self { layout }
    }

    pub fn from_settings(settings: &ReportSettings) -> Self {
        Self::new(PageLayout::from_settings(settings))
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Generate a report of `kind` from the repository's collections.
    pub fn generate<B: StorageBackend>(
        &self,
        kind: ReportKind,
        repo: &RecordRepository<B>,
        options: &ReportOptions,
    ) -> Result<Document, ReportError> {
        match kind {
            ReportKind::Rounds => self.rounds_report(repo.rounds(), options),
            ReportKind::Practice => self.practice_report(repo.sessions(), options),
            ReportKind::Clubs => self.clubs_report(repo.clubs(), options),
        }
    }

    /// CSV rendering of the filtered and sorted listing of `kind`.
    pub fn listing_csv<B: StorageBackend>(
        &self,
        kind: ReportKind,
        repo: &RecordRepository<B>,
        options: &ReportOptions,
    ) -> Result<String, ReportError> {
        let query = &options.query;
        match kind {
            ReportKind::Rounds => rounds_csv(&query.apply(repo.rounds())),
            ReportKind::Practice => practice_csv(&query.apply(repo.sessions())),
            ReportKind::Clubs => {
                let rows = distance_rows(repo.clubs());
                clubs_csv(&query.apply(&rows))
            }
        }
    }

    /// Scoring report: summary, highlights, course breakdown and round
    /// listing.
    pub fn rounds_report(
        &self,
        rounds: &[Round],
        options: &ReportOptions,
    ) -> Result<Document, ReportError> {
        let kind = ReportKind::Rounds;
        let selected = options.query.apply(rounds);
        if selected.is_empty() {
            return Err(ReportError::EmptyResult(kind));
        }

        let summary = RoundSummary::from_rounds(&selected);
        let mut builder = PageBuilder::new(self.layout);
        write_header(&mut builder, kind, options);

        builder.section(
            "Summary Statistics",
            [
                format!("Total Rounds: {}", summary.total_rounds),
                format!("Average Score: {}", format_decimal(summary.avg_score)),
                format!("Average to Par: {}", format_signed(summary.avg_to_par)),
                format!("Fairway Accuracy: {}", format_percent(summary.fairway_accuracy)),
                format!("GIR Percentage: {}", format_percent(summary.gir_percentage)),
                format!("Average Putts: {}", format_decimal(summary.avg_putts)),
            ],
        );

        if let Some(highlights) = Highlights::from_rounds(&selected) {
            builder.section(
                "Performance Highlights",
                [
                    format!(
                        "Best Score: {} at {} ({})",
                        highlights.best.score, highlights.best.course, highlights.best.date
                    ),
                    format!(
                        "Worst Score: {} at {} ({})",
                        highlights.worst.score, highlights.worst.course, highlights.worst.date
                    ),
                    format!("Score Range: {} strokes", highlights.score_range()),
                ],
            );
        }

        if options.query.category.selected().is_none() {
            let lines = course_breakdown(&selected).into_iter().map(|share| {
                format!(
                    "{}: {} rounds ({}), Avg: {}",
                    share.category,
                    share.count,
                    format_percent(share.percentage),
                    format_decimal(share.mean())
                )
            });
            builder.section("Course Breakdown", lines);
        }

        let rows: Vec<Vec<String>> = selected
            .iter()
            .map(|round| {
                vec![
                    round.date.to_string(),
                    round.course.clone(),
                    round.score.to_string(),
                    format_to_par(round.to_par()),
                    format!("{}/{}", round.fairways_hit, round.fairways_total),
                    round.greens_in_regulation.to_string(),
                    round.putts.to_string(),
                ]
            })
            .collect();
        write_listing(&mut builder, "Round Details", &ROUND_COLUMNS, &rows);

        Ok(finish(kind, options, builder))
    }

    /// Practice report: summary, type breakdown and session listing.
    pub fn practice_report(
        &self,
        sessions: &[PracticeSession],
        options: &ReportOptions,
    ) -> Result<Document, ReportError> {
        let kind = ReportKind::Practice;
        let selected = options.query.apply(sessions);
        if selected.is_empty() {
            return Err(ReportError::EmptyResult(kind));
        }

        let summary = PracticeSummary::from_sessions(&selected);
        let mut builder = PageBuilder::new(self.layout);
        write_header(&mut builder, kind, options);

        builder.section(
            "Summary Statistics",
            [
                format!("Total Sessions: {}", summary.total_sessions),
                format!("Total Practice Time: {} min", summary.total_minutes),
                format!(
                    "Average Duration: {} min",
                    format_decimal(summary.avg_duration)
                ),
                format!(
                    "Most Practiced: {}",
                    summary
                        .most_practiced
                        .map_or_else(|| NO_DATA.to_string(), |t| t.label().to_string())
                ),
            ],
        );

        if options.query.category.selected().is_none() {
            let lines = practice_breakdown(&selected).into_iter().map(|share| {
                format!(
                    "{}: {} sessions ({}), {} min total",
                    practice_label(&share.category),
                    share.count,
                    format_percent(share.percentage),
                    share.total
                )
            });
            builder.section("Practice Type Breakdown", lines);
        }

        let rows: Vec<Vec<String>> = selected
            .iter()
            .map(|session| {
                vec![
                    session.date.to_string(),
                    session.practice_type.label().to_string(),
                    format!("{} min", session.duration),
                    session.notes.clone().unwrap_or_default(),
                ]
            })
            .collect();
        write_listing(&mut builder, "Session Details", &PRACTICE_COLUMNS, &rows);

        Ok(finish(kind, options, builder))
    }

    /// Club report: summary, club breakdown and one table per club.
    pub fn clubs_report(
        &self,
        clubs: &[ClubData],
        options: &ReportOptions,
    ) -> Result<Document, ReportError> {
        let kind = ReportKind::Clubs;
        let rows = distance_rows(clubs);
        let selected = options.query.apply(&rows);
        if selected.is_empty() {
            return Err(ReportError::EmptyResult(kind));
        }

        let groups = group_by_club(&selected);
        let mut builder = PageBuilder::new(self.layout);
        write_header(&mut builder, kind, options);

        let longest = selected
            .iter()
            .copied()
            .reduce(|a, b| if b.entry.distance > a.entry.distance { b } else { a });
        builder.section(
            "Summary Statistics",
            [
                format!("Clubs Logged: {}", groups.len()),
                format!("Total Entries: {}", selected.len()),
                format!(
                    "Longest Entry: {}",
                    longest.map_or_else(
                        || NO_DATA.to_string(),
                        |row| format!("{:.1} yds ({})", row.entry.distance, row.club)
                    )
                ),
            ],
        );

        if options.query.category.selected().is_none() {
            let lines = category_breakdown(&selected).into_iter().map(|share| {
                format!(
                    "{}: {} entries ({}), Avg: {} yds",
                    share.category,
                    share.count,
                    format_percent(share.percentage),
                    format_decimal(share.mean())
                )
            });
            builder.section("Club Breakdown", lines);
        }

        for (name, members) in &groups {
            let summary = ClubSummary::from_rows(name, members);

            // Group header, its summary line and the table header with a row
            builder.ensure_space(HEADING_ADVANCE + LINE_ADVANCE + ROW_HEIGHT * 2.0);
            builder.heading(name.as_str());
            builder.body(format!(
                "Baseline: {:.1} yds | Average: {} yds | Shortest: {} | Longest: {} | vs Baseline: {}",
                summary.baseline,
                format_decimal(summary.avg_distance),
                format_decimal(summary.shortest),
                format_decimal(summary.longest),
                format_signed(summary.diff_from_baseline())
            ));

            let table: Vec<Vec<String>> = members
                .iter()
                .map(|row| {
                    vec![
                        row.entry.date.to_string(),
                        format!("{:.1} yds", row.entry.distance),
                        format_signed(Some(row.entry.distance - row.baseline)),
                    ]
                })
                .collect();
            // The builder's cursor already sits at the table end
            render_table(&mut builder, &CLUB_COLUMNS, &table);
            builder.advance(SECTION_GAP);
        }

        Ok(finish(kind, options, builder))
    }
}

/// Title, generation time and the active filter description.
fn write_header(builder: &mut PageBuilder, kind: ReportKind, options: &ReportOptions) {
    builder.write(TITLE_SIZE, TextStyle::Bold, kind.title(), 8.0);
    builder.write(
        BODY_SIZE,
        TextStyle::Normal,
        format!(
            "Generated: {}",
            options.generated_at.format("%Y-%m-%d %H:%M UTC")
        ),
        6.0,
    );

    let query = &options.query;
    if let Some(range) = query.range.label() {
        builder.write(BODY_SIZE, TextStyle::Normal, format!("Date Range: {}", range), 6.0);
    }
    if let Some(category) = query.category.selected() {
        let value = match kind {
            ReportKind::Practice => practice_label(category),
            _ => category.to_string(),
        };
        builder.write(
            BODY_SIZE,
            TextStyle::Normal,
            format!("{}: {}", kind.category_name(), value),
            6.0,
        );
    }
    builder.write(
        BODY_SIZE,
        TextStyle::Normal,
        format!("Sorted by: {}", query.sort.label()),
        6.0,
    );
    builder.advance(2.0);
}

/// Heading followed by the detailed table.
fn write_listing(builder: &mut PageBuilder, title: &str, columns: &[Column], rows: &[Vec<String>]) {
    builder.ensure_space(HEADING_ADVANCE + ROW_HEIGHT * 2.0);
    builder.heading(title);
    render_table(builder, columns, rows);
}

fn practice_label(category: &str) -> String {
    category
        .parse::<PracticeType>()
        .map_or_else(|_| category.to_string(), |t| t.label().to_string())
}

fn finish(kind: ReportKind, options: &ReportOptions, builder: PageBuilder) -> Document {
    let document = Document {
        kind,
        generated_at: options.generated_at,
        pages: builder.finish(),
    };
    tracing::debug!("Generated {} report with {} pages", kind, document.page_count());
    document
}
