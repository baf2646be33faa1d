//! Posted-alert schema
//!
//! One row per reported (txid, step) pair. A txid may appear under several
//! steps over its lifetime.

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::debug;

pub const SCHEMA_VERSION: i64 = 1;

/// Initialise the schema (idempotent)
pub fn setup_schema(connection: &Connection) -> AppResult<()> {
    connection.execute_batch(
        r#"
        PRAGMA user_version = 1;

        -- POSTED ALERTS
        CREATE TABLE IF NOT EXISTS posted (
            txid TEXT NOT NULL,
            step TEXT NOT NULL CHECK (step IN ('LOCK', 'REDEEM', 'REFUND', 'UNKNOWN')),
            amount_sats INTEGER,              -- NULLABLE for records without a known amount
            posted_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now')),
            PRIMARY KEY (txid, step)
        );

        CREATE INDEX IF NOT EXISTS idx_posted_step ON posted(step);
        CREATE INDEX IF NOT EXISTS idx_posted_at ON posted(posted_at);
        "#,
    )?;

    debug!("Schema version {} ready", SCHEMA_VERSION);
    Ok(())
}
