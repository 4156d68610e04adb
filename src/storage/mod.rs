//! Storage module for database, persisted values and configuration.

pub mod backend;
pub mod config;
pub mod database;
pub mod persistent;
pub mod schema;

pub use backend::{MemoryBackend, StorageBackend};
pub use config::{AppConfig, ConfigError, ReportSettings, StorageSettings};
pub use database::{Database, DatabaseError};
pub use persistent::{read_value, write_value, Hydration, PersistentStore, StorageError};
