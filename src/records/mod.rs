//! Record module: typed records and the repository that persists them.

pub mod repository;
pub mod types;

pub use repository::{PendingDeletion, RecordRepository, CLUBS_KEY, ROUNDS_KEY, SESSIONS_KEY};
pub use types::{
    default_clubs, is_default_club, ClubData, ClubDistanceEntry, PracticeSession, PracticeType,
    RecordError, RecordId, Round, RoundInput, SessionInput, DEFAULT_CLUBS, HOLES_PER_ROUND,
};
