//! Deduplication store for published swap alerts.
//!
//! ## Architecture
//!
//! The `Database` struct holds a SQLite connection and implements
//! `PostedOperations`, which records which (txid, step) pairs have already
//! been reported. Classification itself never consults this store.

mod posted;
pub mod schema;
pub mod statistics;
pub mod traits;

pub use schema::setup_schema;
pub use statistics::PostedStats;
pub use traits::*;

use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;
use tracing::info;

/// The main database interface
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Open (or create) a database and initialise the schema
    pub fn new(database_path: &str) -> AppResult<Self> {
        let connection = Connection::open(database_path)?;
        setup_schema(&connection)?;

        info!("Database ready: {}", database_path);
        Ok(Self { connection })
    }

    /// Open a database at a filesystem path, creating parent directories
    pub fn open(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::new(&path.to_string_lossy())
    }

    /// Get a reference to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.connection
    }
}
