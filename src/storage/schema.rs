//! Database schema definitions for golfstats.
//!
//! Every record collection is stored as one JSON document under its own key,
//! so the relational schema is a single key/value table.

/// SQL schema for creating all database tables.
pub const SCHEMA: &str = r#"
-- Key/value documents, one row per record collection
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// Schema version tracking table.
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;
