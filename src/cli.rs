//! Command-line interface definitions and handlers.

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use dialoguer::Confirm;
use std::path::PathBuf;

use golfstats::analytics::{
    format_decimal, format_percent, format_signed, format_to_par, ClubSummary, DateRange,
    PracticeSummary, RoundSummary,
};
use golfstats::records::{PendingDeletion, PracticeType, RecordId, RoundInput, SessionInput};
use golfstats::report::{deliver, FileSink};
use golfstats::storage::Database;
use golfstats::{
    AppConfig, CategoryFilter, RecordQuery, RecordRepository, ReportGenerator, ReportKind,
    ReportOptions, SortOrder,
};

/// GolfStats - track rounds, club distances and practice time.
#[derive(Parser, Debug)]
#[command(name = "golfstats")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Data directory (overrides the platform default)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record and list rounds
    #[command(subcommand)]
    Round(RoundCommand),

    /// Record and list practice sessions
    #[command(subcommand)]
    Session(SessionCommand),

    /// Manage clubs and logged distances
    #[command(subcommand)]
    Club(ClubCommand),

    /// Show summary statistics
    Stats,

    /// Export a filtered report
    Export(ExportArgs),
}

/// Subcommands for `golfstats round`
#[derive(Subcommand, Debug)]
pub enum RoundCommand {
    /// Add a round
    Add(RoundArgs),
    /// List rounds, newest first
    List,
    /// Delete a round by id
    Remove { id: RecordId },
}

#[derive(Args, Debug)]
pub struct RoundArgs {
    /// Course name
    #[arg(long)]
    pub course: String,
    /// Date played (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Total strokes
    #[arg(long)]
    pub score: u32,
    /// Course par
    #[arg(long, default_value_t = 72)]
    pub par: u32,
    /// Fairways hit
    #[arg(long, default_value_t = 0)]
    pub fairways_hit: u32,
    /// Fairways available
    #[arg(long, default_value_t = 14)]
    pub fairways_total: u32,
    /// Greens in regulation
    #[arg(long, default_value_t = 0)]
    pub gir: u32,
    /// Total putts
    #[arg(long, default_value_t = 0)]
    pub putts: u32,
}

/// Subcommands for `golfstats session`
#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Add a practice session
    Add(SessionArgs),
    /// List practice sessions, newest first
    List,
    /// Delete a practice session by id
    Remove {
        id: RecordId,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Practice type (driving, chipping, putting, bunker, irons, wedges, other)
    #[arg(long = "type")]
    pub practice_type: PracticeType,
    /// Duration in minutes
    #[arg(long)]
    pub duration: u32,
    /// Date practiced (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

/// Subcommands for `golfstats club`
#[derive(Subcommand, Debug)]
pub enum ClubCommand {
    /// Add a custom club
    Add {
        name: String,
        /// Reference distance in yards
        avg_distance: f64,
    },
    /// Log a shot distance for a club
    Log {
        name: String,
        /// Distance in yards
        distance: f64,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete a custom club and its logged distances
    Remove {
        name: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// List clubs with their logged averages
    List,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Report kind: rounds, practice or clubs
    pub kind: ReportKind,
    /// First date to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last date to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// Only include this course, practice type or club
    #[arg(long)]
    pub category: Option<String>,
    /// Sort order: date, category or magnitude
    #[arg(long, default_value = "date")]
    pub sort: SortOrder,
    /// Also write the listing as CSV
    #[arg(long)]
    pub csv: bool,
}

impl ExportArgs {
    fn query(&self) -> RecordQuery {
        RecordQuery {
            range: DateRange::new(self.from, self.to),
            category: CategoryFilter::from_selection(self.category.as_deref()),
            sort: self.sort,
        }
    }
}

type Repository = RecordRepository<Database>;

/// Open the database and run the command.
pub fn run(cli: Cli, config: AppConfig) -> Result<()> {
    std::fs::create_dir_all(&config.data_dir).with_context(|| {
        format!("Failed to create data directory {}", config.data_dir.display())
    })?;
    let db_path = config.database_path();
    let db = Database::open(&db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    let mut repo = RecordRepository::open(db).context("Failed to load records")?;

    match cli.command {
        Commands::Round(command) => round_command(&mut repo, command),
        Commands::Session(command) => session_command(&mut repo, command),
        Commands::Club(command) => club_command(&mut repo, command),
        Commands::Stats => {
            print_stats(&repo);
            Ok(())
        }
        Commands::Export(args) => export(&repo, &config, &args),
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn round_command(repo: &mut Repository, command: RoundCommand) -> Result<()> {
    match command {
        RoundCommand::Add(args) => {
            let input = RoundInput {
                course: args.course,
                date: args.date.unwrap_or_else(today),
                score: args.score,
                par: args.par,
                fairways_hit: args.fairways_hit,
                fairways_total: args.fairways_total,
                greens_in_regulation: args.gir,
                putts: args.putts,
            };
            input.validate()?;
            let round = repo.add_round(input)?;
            println!(
                "Added round {}: {} at {} ({})",
                round.id,
                round.score,
                round.course,
                format_to_par(round.to_par())
            );
        }
        RoundCommand::List => {
            let query = RecordQuery::default();
            for round in query.apply(repo.rounds()) {
                println!(
                    "{}  {}  {:<24} {:>3} ({:>3})  FWY {}/{}  GIR {}  Putts {}",
                    round.id,
                    round.date,
                    round.course,
                    round.score,
                    format_to_par(round.to_par()),
                    round.fairways_hit,
                    round.fairways_total,
                    round.greens_in_regulation,
                    round.putts
                );
            }
        }
        RoundCommand::Remove { id } => {
            let before = repo.rounds().len();
            let after = repo.delete_round(id)?.len();
            if after < before {
                println!("Deleted round {}", id);
            } else {
                println!("No round with id {}", id);
            }
        }
    }
    Ok(())
}

fn session_command(repo: &mut Repository, command: SessionCommand) -> Result<()> {
    match command {
        SessionCommand::Add(args) => {
            let session = repo.add_session(SessionInput {
                date: args.date.unwrap_or_else(today),
                practice_type: args.practice_type,
                duration: args.duration,
                notes: args.notes,
            })?;
            println!(
                "Added session {}: {} min of {}",
                session.id, session.duration, session.practice_type
            );
        }
        SessionCommand::List => {
            let query = RecordQuery::default();
            for session in query.apply(repo.sessions()) {
                println!(
                    "{}  {}  {:<14} {:>4} min  {}",
                    session.id,
                    session.date,
                    session.practice_type.label(),
                    session.duration,
                    session.notes.as_deref().unwrap_or("")
                );
            }
        }
        SessionCommand::Remove { id, yes } => {
            let Some(pending) = repo.request_delete_session(id) else {
                println!("No practice session with id {}", id);
                return Ok(());
            };
            confirm_and_apply(repo, pending, yes)?;
        }
    }
    Ok(())
}

fn club_command(repo: &mut Repository, command: ClubCommand) -> Result<()> {
    match command {
        ClubCommand::Add { name, avg_distance } => {
            repo.add_club(&name, avg_distance)?;
            println!("Added club {} ({:.1} yds)", name.trim(), avg_distance);
        }
        ClubCommand::Log {
            name,
            distance,
            date,
        } => {
            let club = repo.add_club_entry(&name, distance, date.unwrap_or_else(today))?;
            let summary = ClubSummary::from_club(club, &DateRange::all());
            println!(
                "Logged {:.1} yds for {} (average {} yds over {} entries)",
                distance,
                club.name,
                format_decimal(summary.avg_distance),
                summary.entries
            );
        }
        ClubCommand::Remove { name, yes } => {
            let pending = repo.request_delete_club(&name)?;
            confirm_and_apply(repo, pending, yes)?;
        }
        ClubCommand::List => {
            for club in repo.clubs() {
                let summary = ClubSummary::from_club(club, &DateRange::all());
                println!(
                    "{:<10} baseline {:>6.1}  logged avg {:>6}  entries {:>3}  vs baseline {}",
                    club.name,
                    club.avg_distance,
                    format_decimal(summary.avg_distance),
                    summary.entries,
                    format_signed(summary.diff_from_baseline())
                );
            }
        }
    }
    Ok(())
}

/// Ask before a destructive operation unless `yes` was given.
fn confirm_and_apply(repo: &mut Repository, pending: PendingDeletion, yes: bool) -> Result<()> {
    let confirmed = yes
        || Confirm::new()
            .with_prompt(pending.prompt())
            .default(false)
            .interact()?;

    if !confirmed {
        repo.cancel(pending);
        println!("Cancelled");
        return Ok(());
    }

    if repo.confirm(pending)? {
        println!("Deleted");
    }
    Ok(())
}

fn print_stats(repo: &Repository) {
    let rounds = RoundSummary::from_rounds(repo.rounds());
    println!("Rounds");
    println!("  Total Rounds:     {}", rounds.total_rounds);
    println!("  Average Score:    {}", format_decimal(rounds.avg_score));
    println!("  Average to Par:   {}", format_signed(rounds.avg_to_par));
    println!("  Fairway Accuracy: {}", format_percent(rounds.fairway_accuracy));
    println!("  GIR Percentage:   {}", format_percent(rounds.gir_percentage));
    println!("  Average Putts:    {}", format_decimal(rounds.avg_putts));

    let practice = PracticeSummary::from_sessions(repo.sessions());
    println!("Practice");
    println!("  Total Sessions:   {}", practice.total_sessions);
    println!("  Total Minutes:    {}", practice.total_minutes);
    println!("  Average Duration: {}", format_decimal(practice.avg_duration));
    if let Some(most) = practice.most_practiced {
        println!("  Most Practiced:   {}", most.label());
    }

    let logged: Vec<ClubSummary> = repo
        .clubs()
        .iter()
        .map(|club| ClubSummary::from_club(club, &DateRange::all()))
        .filter(|summary| summary.entries > 0)
        .collect();
    if !logged.is_empty() {
        println!("Clubs");
        for summary in logged {
            println!(
                "  {:<10} {} yds ({} vs baseline, {} entries)",
                summary.name,
                format_decimal(summary.avg_distance),
                format_signed(summary.diff_from_baseline()),
                summary.entries
            );
        }
    }
}

fn export(repo: &Repository, config: &AppConfig, args: &ExportArgs) -> Result<()> {
    if let (Some(from), Some(to)) = (args.from, args.to) {
        if from > to {
            bail!("--from {} is after --to {}", from, to);
        }
    }

    let options = ReportOptions::new(args.query());
    let generator = ReportGenerator::from_settings(&config.reports);
    let document = generator.generate(args.kind, repo, &options)?;

    let mut sink = FileSink::new(config.export_dir());
    let filename = deliver(&mut sink, &document)?;
    println!(
        "Exported {} ({} pages) to {}",
        args.kind,
        document.page_count(),
        sink.path_for(&filename).display()
    );

    if args.csv {
        let content = generator.listing_csv(args.kind, repo, &options)?;
        let path = sink.write_file(&format!("{}.csv", filename), &content)?;
        println!("Exported listing to {}", path.display());
    }
    Ok(())
}
