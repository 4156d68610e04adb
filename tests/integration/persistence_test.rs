//! Integration tests for persistence across repository instances.
//!
//! Covers hydration, reopening an on-disk database, deferred writes and the
//! last-writer-wins behavior of independent stores on one backend.

use chrono::NaiveDate;
use golfstats::records::{
    PracticeType, RecordRepository, Round, RoundInput, SessionInput, ROUNDS_KEY, SESSIONS_KEY,
};
use golfstats::storage::{Database, MemoryBackend, PersistentStore, StorageBackend};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn create_input(course: &str, score: u32) -> RoundInput {
    RoundInput {
        course: course.to_string(),
        date: date("2024-06-01"),
        score,
        par: 71,
        fairways_hit: 9,
        fairways_total: 14,
        greens_in_regulation: 9,
        putts: 31,
    }
}

#[test]
fn test_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("golfstats.db");

    let (rounds, clubs, sessions) = {
        let db = Database::open(&path).unwrap();
        let mut repo = RecordRepository::open(db).unwrap();
        repo.add_round(create_input("Harbour Town", 84)).unwrap();
        repo.add_club("2 Iron", 200.0).unwrap();
        repo.add_club_entry("2 iron", 196.5, date("2024-06-02")).unwrap();
        repo.add_session(SessionInput {
            date: date("2024-06-03"),
            practice_type: PracticeType::Wedges,
            duration: 40,
            notes: Some("Half swings".to_string()),
        })
        .unwrap();
        (
            repo.rounds().to_vec(),
            repo.clubs().to_vec(),
            repo.sessions().to_vec(),
        )
    };

    let db = Database::open(&path).unwrap();
    let repo = RecordRepository::open(db).unwrap();

    assert_eq!(repo.rounds(), rounds.as_slice());
    assert_eq!(repo.clubs(), clubs.as_slice());
    assert_eq!(repo.sessions(), sessions.as_slice());
    assert_eq!(repo.club("2 Iron").unwrap().entries[0].distance, 196.5);
}

#[test]
fn test_first_run_seeds_default_clubs_only_in_memory() {
    let backend = MemoryBackend::new();
    let repo = RecordRepository::open(&backend).unwrap();

    assert_eq!(repo.clubs().len(), 13);
    assert!(repo.rounds().is_empty());
    // Nothing is written until the first mutation
    assert!(backend.is_empty());
}

#[test]
fn test_unhydrated_repository_reads_defaults() {
    let backend = MemoryBackend::new();
    {
        let mut repo = RecordRepository::open(&backend).unwrap();
        repo.add_round(create_input("Kiawah", 90)).unwrap();
    }

    let mut repo = RecordRepository::new(&backend);
    assert!(!repo.is_ready());
    assert!(repo.rounds().is_empty());

    repo.hydrate().unwrap();
    assert!(repo.is_ready());
    assert_eq!(repo.rounds().len(), 1);
}

#[test]
fn test_mutation_before_hydration_is_rejected() {
    let backend = MemoryBackend::new();
    let mut repo = RecordRepository::new(&backend);

    let result = repo.add_round(create_input("Kiawah", 90));

    assert!(result.is_err());
    assert!(!result.unwrap_err().is_rejection());
    assert!(backend.load(ROUNDS_KEY).unwrap().is_none());
}

#[test]
fn test_deferred_write_wins_over_persisted_value() {
    let backend = MemoryBackend::new();
    {
        let mut repo = RecordRepository::open(&backend).unwrap();
        repo.add_round(create_input("Kiawah", 90)).unwrap();
    }

    let mut store: PersistentStore<Vec<Round>> = PersistentStore::new(ROUNDS_KEY, Vec::new());
    store.set(&backend, Vec::new()).unwrap();
    assert!(store.has_pending_write());

    store.hydrate(&backend).unwrap();

    assert!(store.get().is_empty());
    let repo = RecordRepository::open(&backend).unwrap();
    assert!(repo.rounds().is_empty());
}

#[test]
fn test_two_repositories_last_flush_wins() {
    let backend = MemoryBackend::new();
    let mut first = RecordRepository::open(&backend).unwrap();
    let mut second = RecordRepository::open(&backend).unwrap();

    first
        .add_session(SessionInput {
            date: date("2024-06-01"),
            practice_type: PracticeType::Putting,
            duration: 20,
            notes: None,
        })
        .unwrap();
    second
        .add_session(SessionInput {
            date: date("2024-06-02"),
            practice_type: PracticeType::Driving,
            duration: 50,
            notes: None,
        })
        .unwrap();

    // The second flush replaced the whole collection
    let stored = backend.load(SESSIONS_KEY).unwrap().unwrap();
    assert!(stored.contains("driving"));
    assert!(!stored.contains("putting"));

    first.reload().unwrap();
    assert_eq!(first.sessions().len(), 1);
    assert_eq!(first.sessions()[0].practice_type, PracticeType::Driving);
}

#[test]
fn test_corrupt_collection_reports_error() {
    let backend = MemoryBackend::new();
    backend.save(ROUNDS_KEY, "{not json").unwrap();

    let result = RecordRepository::open(&backend);

    assert!(result.is_err());
}
