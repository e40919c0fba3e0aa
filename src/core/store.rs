//! Relational persistence of room inventories (SQLite through `rusqlite`).
//!
//! A [`StoreSession`] is either closed or owns exactly one open connection.
//! Statements are prepared lazily through the connection's statement cache,
//! so they are created on first use, reused afterwards and discarded together
//! with the connection on [`StoreSession::close`].

use crate::domain::directory::Directory;
use crate::domain::model::{ConnectionParams, Post};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{InventoryError, Result};
use rusqlite::{params, Connection};
use std::time::Duration;

/// Upper bound for any statement waiting on the database.
pub const STATEMENT_TIMEOUT: Duration = Duration::from_secs(5);

pub const MEMORY_LOCATION: &str = ":memory:";

const LOCATION_SCHEMES: [&str; 2] = ["jdbc:sqlite:", "sqlite:"];

const SQL_CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS posts (
    post_code TEXT NOT NULL,
    machine_id TEXT NOT NULL,
    first_name TEXT NOT NULL,
    surname TEXT NOT NULL
)";
const SQL_INSERT_POST: &str =
    "INSERT INTO posts (post_code, machine_id, first_name, surname) VALUES (?1, ?2, ?3, ?4)";
const SQL_SELECT_ROOM: &str = "SELECT post_code, machine_id, first_name, surname
    FROM posts WHERE post_code LIKE ?1 ESCAPE '\\'";
const SQL_DELETE_ALL: &str = "DELETE FROM posts";
const SQL_COMPACT: &str = "VACUUM";

enum SessionState {
    Closed,
    Open(Connection),
}

pub struct StoreSession {
    params: ConnectionParams,
    state: SessionState,
}

impl StoreSession {
    /// Creates a closed session; nothing is touched until [`StoreSession::open`].
    pub fn new(params: ConnectionParams) -> Self {
        Self {
            params,
            state: SessionState::Closed,
        }
    }

    /// Creates and opens a session in one step.
    pub fn connect(params: ConnectionParams) -> Result<Self> {
        let mut session = Self::new(params);
        session.open()?;
        Ok(session)
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.connection_params())
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open(_))
    }

    /// Opens the connection and creates the `posts` table if absent.
    ///
    /// No-op when the session is already open.
    pub fn open(&mut self) -> Result<()> {
        if self.is_open() {
            return Ok(());
        }

        let location = resolve_location(&self.params.location)?;
        if !self.params.principal.is_empty() || !self.params.credential.is_empty() {
            tracing::debug!("SQLite store ignores principal and credential");
        }

        let opened = if location == MEMORY_LOCATION {
            Connection::open_in_memory()
        } else {
            Connection::open(location)
        };
        let conn = opened.map_err(|e| connection_failed(location, e))?;

        conn.busy_timeout(STATEMENT_TIMEOUT)
            .map_err(|e| connection_failed(location, e))?;
        conn.execute(SQL_CREATE_TABLE, [])
            .map_err(|e| connection_failed(location, e))?;

        tracing::debug!("Store session opened on {}", location);
        self.state = SessionState::Open(conn);
        Ok(())
    }

    /// Reads every row whose code starts with `prefix` into a new directory.
    ///
    /// Rows breaking a directory invariant (foreign or duplicate codes, blank
    /// fields) abort the read: the store is expected to be consistent.
    pub fn load(&self, prefix: &str) -> Result<Directory> {
        let failed = |cause: InventoryError| {
            InventoryError::store_with_cause(
                format!("Error loading room '{}': {}", prefix.trim(), cause),
                cause,
            )
        };

        let mut directory = Directory::create(prefix).map_err(failed)?;
        let conn = self.connection()?;

        let mut stmt = conn.prepare_cached(SQL_SELECT_ROOM).map_err(|e| failed(e.into()))?;
        let mut rows = stmt
            .query(params![like_prefix(directory.prefix())])
            .map_err(|e| failed(e.into()))?;

        while let Some(row) = rows.next().map_err(|e| failed(e.into()))? {
            let read = || -> rusqlite::Result<(String, Post)> {
                let code: String = row.get(0)?;
                let post = Post::new(
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                );
                Ok((code, post))
            };
            let (code, post) = read().map_err(|e| failed(e.into()))?;
            directory.add(&code, post).map_err(failed)?;
        }

        tracing::debug!("Loaded {} posts for room {}", directory.count(), directory.prefix());
        Ok(directory)
    }

    /// Inserts one row and returns the number of affected rows.
    pub fn insert(&self, code: &str, post: &Post) -> Result<usize> {
        let failed = |e: rusqlite::Error| {
            InventoryError::store_with_cause(format!("Error inserting post '{}': {}", code, e), e)
        };

        let conn = self.connection()?;
        let mut stmt = conn.prepare_cached(SQL_INSERT_POST).map_err(failed)?;
        stmt.execute(params![code, post.machine_id, post.first_name, post.surname])
            .map_err(failed)
    }

    /// Inserts every post of `directory`, one statement per code.
    ///
    /// Not transactional: on failure, rows written so far stay committed and
    /// the remaining posts are not attempted.
    pub fn write_all(&self, directory: &Directory) -> Result<usize> {
        self.connection()?;

        let mut rows = 0;
        for (code, post) in directory.iter() {
            rows += self.insert(code, post)?;
        }

        tracing::debug!("Wrote {} rows for room {}", rows, directory.prefix());
        Ok(rows)
    }

    /// Deletes every stored row and compacts the database file.
    pub fn clear(&self) -> Result<usize> {
        let failed = |e: rusqlite::Error| {
            InventoryError::store_with_cause(format!("Error clearing store: {}", e), e)
        };

        let conn = self.connection()?;
        let removed = conn.execute(SQL_DELETE_ALL, []).map_err(failed)?;
        conn.execute_batch(SQL_COMPACT).map_err(failed)?;

        tracing::info!("Removed {} rows from the store", removed);
        Ok(removed)
    }

    /// Releases the connection together with its prepared statements.
    ///
    /// No-op on a closed session.
    pub fn close(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, SessionState::Closed) {
            SessionState::Closed => Ok(()),
            SessionState::Open(conn) => {
                conn.close().map_err(|(_, e)| {
                    InventoryError::store_with_cause(format!("Error closing connection: {}", e), e)
                })?;
                tracing::debug!("Store session closed");
                Ok(())
            }
        }
    }

    fn connection(&self) -> Result<&Connection> {
        match &self.state {
            SessionState::Open(conn) => Ok(conn),
            SessionState::Closed => Err(InventoryError::store("Store session is closed")),
        }
    }
}

impl Drop for StoreSession {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!("{}", e.user_friendly_message());
        }
    }
}

/// Strips a known URL scheme from `location`.
pub fn resolve_location(location: &str) -> Result<&str> {
    let trimmed = location.trim();
    let path = LOCATION_SCHEMES
        .iter()
        .find_map(|scheme| trimmed.strip_prefix(scheme))
        .unwrap_or(trimmed)
        .trim();

    if path.is_empty() {
        return Err(InventoryError::store(format!(
            "{} - Connection failed: store location required",
            location
        )));
    }
    Ok(path)
}

fn connection_failed(location: &str, e: rusqlite::Error) -> InventoryError {
    InventoryError::store_with_cause(format!("{} - Connection failed: {}", location, e), e)
}

/// `LIKE` pattern matching codes that start with `prefix`.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
