//! Database session management

use std::path::{Path, PathBuf};
use rusqlite::Connection;
use tracing::debug;
use crate::config::DatabaseConfig;
use crate::error::{IntegrationError, Result};

/// Path value that selects an in-memory database
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Database session wrapper
pub struct DatabaseSession {
    /// Path to the database file
    path: PathBuf,
    /// SQLite connection
    conn: Option<Connection>,
}

impl DatabaseSession {
    /// Open the database described by `config`
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        Self::open_path(&config.path)
    }

    /// Open a database at the specified path, creating the file if needed
    pub fn open_path(path: &Path) -> Result<Self> {
        let conn = if path == Path::new(IN_MEMORY_PATH) {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };
        debug!(path = %path.display(), "opened database");

        Ok(Self {
            path: path.to_path_buf(),
            conn: Some(conn),
        })
    }

    /// Get a reference to the connection
    pub fn connection(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or_else(|| {
            IntegrationError::DatabaseError("Database not open".to_string())
        })
    }

    /// Get a mutable reference to the connection
    pub fn connection_mut(&mut self) -> Result<&mut Connection> {
        self.conn.as_mut().ok_or_else(|| {
            IntegrationError::DatabaseError("Database not open".to_string())
        })
    }

    /// Get the database path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close the database connection
    pub fn close(&mut self) {
        if self.conn.take().is_some() {
            debug!(path = %self.path.display(), "closed database");
        }
    }

    /// Check if database is open
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }
}

impl Drop for DatabaseSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// Open a session, run `f` with it, and close it again
pub fn with_session<T, F>(config: &DatabaseConfig, f: F) -> Result<T>
where
    F: FnOnce(&mut DatabaseSession) -> Result<T>,
{
    let mut session = DatabaseSession::open(config)?;
    let result = f(&mut session);
    session.close();
    result
}
