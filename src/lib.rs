//! GolfStats - Golf Round, Club Distance and Practice Tracker
//!
//! A self-hosted tracker for golf rounds, per-club shot distances and
//! practice sessions. Collections are persisted as JSON documents in SQLite,
//! summarized by pure analytics functions and exported as paginated text
//! reports or CSV listings.

pub mod analytics;
pub mod records;
pub mod report;
pub mod storage;

// Re-export commonly used types
pub use analytics::{CategoryFilter, DateRange, RecordQuery, RoundSummary, SortOrder};
pub use records::{PendingDeletion, RecordError, RecordRepository};
pub use report::{ReportError, ReportGenerator, ReportKind, ReportOptions};
pub use storage::{AppConfig, Database, PersistentStore};
