//! Integration tests for add/delete flows through the record repository.

use chrono::NaiveDate;
use golfstats::records::{
    PendingDeletion, PracticeType, RecordError, RecordId, RecordRepository, RoundInput,
    SessionInput,
};
use golfstats::storage::{Database, MemoryBackend};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn session_input(practice_type: PracticeType, duration: u32) -> SessionInput {
    SessionInput {
        date: date("2024-08-10"),
        practice_type,
        duration,
        notes: None,
    }
}

#[test]
fn test_added_rounds_get_fresh_ids() {
    let db = Database::open_in_memory().unwrap();
    let mut repo = RecordRepository::open(db).unwrap();

    let mut seen = Vec::new();
    for score in [82, 85, 79] {
        let before = repo.rounds().len();
        let round = repo
            .add_round(RoundInput {
                course: "Whistling Straits".to_string(),
                date: date("2024-08-01"),
                score,
                par: 72,
                fairways_hit: 7,
                fairways_total: 14,
                greens_in_regulation: 8,
                putts: 31,
            })
            .unwrap();
        assert_eq!(repo.rounds().len(), before + 1);
        assert!(!seen.contains(&round.id));
        seen.push(round.id);
    }

    // Ids follow creation order
    assert!(seen.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(repo.courses(), vec!["Whistling Straits".to_string()]);
}

#[test]
fn test_negative_distance_leaves_entries_unchanged() {
    let backend = MemoryBackend::new();
    let mut repo = RecordRepository::open(&backend).unwrap();
    repo.add_club_entry("7 Iron", 152.0, date("2024-08-01")).unwrap();

    let result = repo.add_club_entry("7 Iron", -5.0, date("2024-08-02"));

    assert!(matches!(result, Err(RecordError::InvalidDistance(d)) if d == -5.0));
    assert_eq!(repo.club("7 Iron").unwrap().entries.len(), 1);
}

#[test]
fn test_duplicate_club_ignoring_case_is_rejected() {
    let backend = MemoryBackend::new();
    let mut repo = RecordRepository::open(&backend).unwrap();
    repo.add_club("Mini Driver", 230.0).unwrap();
    let count = repo.clubs().len();

    let result = repo.add_club("mini driver", 225.0);
    assert!(matches!(result, Err(RecordError::DuplicateClub(_))));

    let result = repo.add_club("DRIVER", 260.0);
    assert!(matches!(result, Err(RecordError::DuplicateClub(_))));

    assert_eq!(repo.clubs().len(), count);
}

#[test]
fn test_default_club_cannot_be_deleted() {
    let backend = MemoryBackend::new();
    let repo = RecordRepository::open(&backend).unwrap();

    let result = repo.request_delete_club("Driver");

    assert!(matches!(result, Err(RecordError::ProtectedClub(_))));
    assert!(repo.club("Driver").is_some());
}

#[test]
fn test_custom_club_deletion_needs_confirmation() {
    let backend = MemoryBackend::new();
    let mut repo = RecordRepository::open(&backend).unwrap();
    repo.add_club("Chipper", 40.0).unwrap();
    repo.add_club_entry("Chipper", 38.0, date("2024-08-03")).unwrap();

    let pending = repo.request_delete_club("chipper").unwrap();
    assert_eq!(pending, PendingDeletion::Club("Chipper".to_string()));
    repo.cancel(pending);
    assert!(repo.club("Chipper").is_some());

    let pending = repo.request_delete_club("Chipper").unwrap();
    assert!(repo.confirm(pending).unwrap());
    assert!(repo.club("Chipper").is_none());

    // Deletion was persisted
    let reopened = RecordRepository::open(&backend).unwrap();
    assert!(reopened.club("Chipper").is_none());
}

#[test]
fn test_session_deletion_flow() {
    let backend = MemoryBackend::new();
    let mut repo = RecordRepository::open(&backend).unwrap();
    let kept = repo.add_session(session_input(PracticeType::Irons, 45)).unwrap();
    let removed = repo.add_session(session_input(PracticeType::Bunker, 30)).unwrap();

    let pending = repo.request_delete_session(removed.id).unwrap();
    assert!(pending.prompt().contains(&removed.id.to_string()));
    assert!(repo.confirm(pending).unwrap());

    assert_eq!(repo.sessions().len(), 1);
    assert_eq!(repo.sessions()[0].id, kept.id);

    // Unknown ids have nothing to confirm and deleting them is a no-op
    assert!(repo.request_delete_session(RecordId(1)).is_none());
    assert_eq!(repo.delete_session(RecordId(1)).unwrap().len(), 1);
}

#[test]
fn test_zero_duration_session_is_rejected() {
    let backend = MemoryBackend::new();
    let mut repo = RecordRepository::open(&backend).unwrap();

    let result = repo.add_session(session_input(PracticeType::Putting, 0));

    assert!(matches!(result, Err(RecordError::InvalidDuration(0))));
    assert!(repo.sessions().is_empty());
}

#[test]
fn test_deleting_entry_and_round() {
    let backend = MemoryBackend::new();
    let mut repo = RecordRepository::open(&backend).unwrap();
    let club = repo.add_club_entry("SW", 95.0, date("2024-08-01")).unwrap();
    let entry_id = club.entries[0].id;

    let clubs = repo.delete_entry("SW", entry_id).unwrap();
    assert!(clubs.iter().all(|c| c.entries.is_empty()));

    // Missing ids are silently ignored
    repo.delete_entry("SW", entry_id).unwrap();
    assert!(repo.delete_round(RecordId(42)).unwrap().is_empty());
}
