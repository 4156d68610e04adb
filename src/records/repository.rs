//! Record repository over the three persisted collections.
//!
//! Every mutation validates, updates the in-memory collection, and flushes
//! the whole collection to the backend before returning. Rejected operations
//! leave both memory and storage untouched.

use chrono::{NaiveDate, Utc};
use std::collections::BTreeSet;

use crate::records::types::{
    default_clubs, ClubData, ClubDistanceEntry, PracticeSession, RecordError, RecordId, Round,
    RoundInput, SessionInput,
};
use crate::storage::{PersistentStore, StorageBackend};

/// Storage key for rounds.
pub const ROUNDS_KEY: &str = "golf-rounds";
/// Storage key for club data (entries embedded).
pub const CLUBS_KEY: &str = "club-data";
/// Storage key for practice sessions.
pub const SESSIONS_KEY: &str = "practice-sessions";

/// A destructive operation waiting for the user's confirmation.
///
/// Obtained from [`RecordRepository::request_delete_club`] or
/// [`RecordRepository::request_delete_session`]; nothing happens until it is
/// passed to [`RecordRepository::confirm`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending deletion does nothing until confirmed"]
pub enum PendingDeletion {
    /// Delete a club and all its logged entries
    Club(String),
    /// Delete one practice session
    Session(RecordId),
}

impl PendingDeletion {
    /// Prompt text for the confirmation dialog.
    pub fn prompt(&self) -> String {
        match self {
            PendingDeletion::Club(name) => {
                format!("Delete club '{}' and all of its logged distances?", name)
            }
            PendingDeletion::Session(id) => format!("Delete practice session {}?", id),
        }
    }
}

/// Typed add/delete operations over rounds, clubs and practice sessions.
pub struct RecordRepository<B: StorageBackend> {
    backend: B,
    rounds: PersistentStore<Vec<Round>>,
    clubs: PersistentStore<Vec<ClubData>>,
    sessions: PersistentStore<Vec<PracticeSession>>,
}

impl<B: StorageBackend> RecordRepository<B> {
    /// Create an unhydrated repository. Collections read as their defaults
    /// (empty, or the built-in clubs) until [`Self::hydrate`] runs.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            rounds: PersistentStore::new(ROUNDS_KEY, Vec::new()),
            clubs: PersistentStore::new(CLUBS_KEY, default_clubs()),
            sessions: PersistentStore::new(SESSIONS_KEY, Vec::new()),
        }
    }

    /// Create and hydrate a repository.
    pub fn open(backend: B) -> Result<Self, RecordError> {
        let mut repo = Self::new(backend);
        repo.hydrate()?;
        Ok(repo)
    }

    /// Load all three collections from the backend.
    pub fn hydrate(&mut self) -> Result<(), RecordError> {
        self.rounds.hydrate(&self.backend)?;
        self.clubs.hydrate(&self.backend)?;
        self.sessions.hydrate(&self.backend)?;

        tracing::info!(
            rounds = self.rounds.get().len(),
            clubs = self.clubs.get().len(),
            sessions = self.sessions.get().len(),
            "Record repository ready"
        );
        Ok(())
    }

    /// Re-read all collections, picking up writes from other processes.
    pub fn reload(&mut self) -> Result<(), RecordError> {
        self.rounds.reload(&self.backend)?;
        self.clubs.reload(&self.backend)?;
        self.sessions.reload(&self.backend)?;
        Ok(())
    }

    /// Whether every collection has been hydrated.
    pub fn is_ready(&self) -> bool {
        self.rounds.is_ready() && self.clubs.is_ready() && self.sessions.is_ready()
    }

    /// The backing medium.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ========== Rounds ==========

    /// All rounds in insertion order.
    pub fn rounds(&self) -> &[Round] {
        self.rounds.get()
    }

    /// Unique course names, sorted.
    pub fn courses(&self) -> Vec<String> {
        self.rounds()
            .iter()
            .map(|r| r.course.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Append a new round and persist it.
    ///
    /// Range checks belong to the caller (see [`RoundInput::validate`]); only
    /// a blank course name is rejected here.
    pub fn add_round(&mut self, input: RoundInput) -> Result<Round, RecordError> {
        if input.course.trim().is_empty() {
            return Err(reject(RecordError::EmptyField("course")));
        }

        let id = next_id(self.rounds().iter().map(|r| r.id));
        let round = input.into_round(id);
        let added = round.clone();

        self.rounds.update(&self.backend, |rounds| rounds.push(round))?;
        tracing::debug!(id = %added.id, course = %added.course, "Added round");
        Ok(added)
    }

    /// Remove a round by id. Absent ids are a no-op.
    pub fn delete_round(&mut self, id: RecordId) -> Result<&[Round], RecordError> {
        if !self.rounds().iter().any(|r| r.id == id) {
            return Ok(self.rounds());
        }

        self.rounds
            .update(&self.backend, |rounds| rounds.retain(|r| r.id != id))?;
        tracing::debug!(%id, "Deleted round");
        Ok(self.rounds())
    }

    // ========== Clubs ==========

    /// All clubs in insertion order.
    pub fn clubs(&self) -> &[ClubData] {
        self.clubs.get()
    }

    /// Look up a club by name, ignoring case.
    pub fn club(&self, name: &str) -> Option<&ClubData> {
        self.clubs().iter().find(|c| c.matches_name(name))
    }

    /// Add a club with a reference distance.
    ///
    /// Rejected when the name is blank, the distance is not positive, or a
    /// club with the same name (ignoring case) already exists.
    pub fn add_club(&mut self, name: &str, avg_distance: f64) -> Result<&[ClubData], RecordError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(reject(RecordError::EmptyField("name")));
        }
        if !is_positive(avg_distance) {
            return Err(reject(RecordError::InvalidDistance(avg_distance)));
        }
        if self.club(name).is_some() {
            return Err(reject(RecordError::DuplicateClub(name.to_string())));
        }

        let club = ClubData::new(name, avg_distance);
        self.clubs.update(&self.backend, |clubs| clubs.push(club))?;
        tracing::debug!(club = %name, avg_distance, "Added club");
        Ok(self.clubs())
    }

    /// Log a distance sample for a club.
    pub fn add_club_entry(
        &mut self,
        club_name: &str,
        distance: f64,
        date: NaiveDate,
    ) -> Result<&ClubData, RecordError> {
        if !is_positive(distance) {
            return Err(reject(RecordError::InvalidDistance(distance)));
        }
        let index = self
            .clubs()
            .iter()
            .position(|c| c.matches_name(club_name))
            .ok_or_else(|| reject(RecordError::UnknownClub(club_name.to_string())))?;

        let id = next_id(
            self.clubs()
                .iter()
                .flat_map(|c| c.entries.iter().map(|e| e.id)),
        );
        let entry = ClubDistanceEntry { id, date, distance };

        let clubs = self
            .clubs
            .update(&self.backend, |clubs| clubs[index].entries.push(entry))?;
        tracing::debug!(club = %club_name, %id, distance, "Logged club distance");
        Ok(&clubs[index])
    }

    /// Remove one logged entry from a club. Unknown clubs or ids are a no-op.
    pub fn delete_entry(
        &mut self,
        club_name: &str,
        entry_id: RecordId,
    ) -> Result<&[ClubData], RecordError> {
        let index = self.clubs().iter().position(|c| {
            c.matches_name(club_name) && c.entries.iter().any(|e| e.id == entry_id)
        });

        if let Some(index) = index {
            self.clubs.update(&self.backend, |clubs| {
                clubs[index].entries.retain(|e| e.id != entry_id)
            })?;
            tracing::debug!(club = %club_name, id = %entry_id, "Deleted club entry");
        }
        Ok(self.clubs())
    }

    /// Start deleting a club. Built-in clubs are refused; unknown names are
    /// reported so the caller does not prompt for nothing.
    pub fn request_delete_club(&self, name: &str) -> Result<PendingDeletion, RecordError> {
        let club = self
            .club(name)
            .ok_or_else(|| RecordError::UnknownClub(name.to_string()))?;
        if club.is_default() {
            return Err(reject(RecordError::ProtectedClub(club.name.clone())));
        }
        Ok(PendingDeletion::Club(club.name.clone()))
    }

    // ========== Practice sessions ==========

    /// All practice sessions in insertion order.
    pub fn sessions(&self) -> &[PracticeSession] {
        self.sessions.get()
    }

    /// Append a new practice session and persist it.
    pub fn add_session(&mut self, input: SessionInput) -> Result<PracticeSession, RecordError> {
        if let Err(err) = input.validate() {
            return Err(reject(err));
        }

        let id = next_id(self.sessions().iter().map(|s| s.id));
        let session = input.into_session(id);
        let added = session.clone();

        self.sessions
            .update(&self.backend, |sessions| sessions.push(session))?;
        tracing::debug!(%id, practice_type = %added.practice_type, "Added practice session");
        Ok(added)
    }

    /// Start deleting a practice session. Returns `None` when the id is
    /// unknown, since there is nothing to confirm.
    pub fn request_delete_session(&self, id: RecordId) -> Option<PendingDeletion> {
        self.sessions()
            .iter()
            .any(|s| s.id == id)
            .then_some(PendingDeletion::Session(id))
    }

    /// Remove a practice session by id. Absent ids are a no-op.
    pub fn delete_session(&mut self, id: RecordId) -> Result<&[PracticeSession], RecordError> {
        if self.sessions().iter().any(|s| s.id == id) {
            self.sessions
                .update(&self.backend, |sessions| sessions.retain(|s| s.id != id))?;
            tracing::debug!(%id, "Deleted practice session");
        }
        Ok(self.sessions())
    }

    // ========== Confirmation ==========

    /// Carry out a confirmed deletion. Returns whether anything was removed.
    pub fn confirm(&mut self, pending: PendingDeletion) -> Result<bool, RecordError> {
        match pending {
            PendingDeletion::Club(name) => {
                if is_protected(&name) {
                    return Err(reject(RecordError::ProtectedClub(name)));
                }
                let before = self.clubs().len();
                if self.club(&name).is_none() {
                    return Ok(false);
                }
                let clubs = self
                    .clubs
                    .update(&self.backend, |clubs| clubs.retain(|c| !c.matches_name(&name)))?;
                tracing::info!(club = %name, "Deleted club with its entries");
                Ok(clubs.len() < before)
            }
            PendingDeletion::Session(id) => {
                let before = self.sessions().len();
                let after = self.delete_session(id)?.len();
                Ok(after < before)
            }
        }
    }

    /// Decline a pending deletion. State is left unchanged.
    pub fn cancel(&self, pending: PendingDeletion) {
        tracing::debug!(?pending, "Deletion cancelled");
    }
}

fn is_protected(name: &str) -> bool {
    crate::records::types::is_default_club(name)
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn reject(err: RecordError) -> RecordError {
    tracing::warn!("Rejected: {}", err);
    err
}

/// Next creation-ordered id: the current time in milliseconds, bumped past
/// every id already handed out.
fn next_id(existing: impl Iterator<Item = RecordId>) -> RecordId {
    let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    match existing.max() {
        Some(RecordId(max)) if max >= now => RecordId(max + 1),
        _ => RecordId(now),
    }
}
