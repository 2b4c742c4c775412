// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite access with typed operations.
//!
//! [`Database`] owns the pool and the schema. Handlers never touch the pool
//! directly: they take a [`DbConn`], which checks out a connection on first
//! use and hands it back when the request is done, whichever way it ends.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{ConnectOptions, Sqlite, SqliteConnection};

use crate::db::SCHEMA;
use crate::error::{AppError, Result};
use crate::models::{HealthEntry, NewHealthEntry, User};
use crate::AppState;

const MAX_CONNECTIONS: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Whether parsed `options` name SQLite's in-memory database rather than a file.
fn is_in_memory(options: &SqliteConnectOptions) -> bool {
    options
        .to_url_lossy()
        .query_pairs()
        .any(|(key, value)| key == "mode" && value == "memory")
}

/// SQLite database handle.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the database at `url`.
    ///
    /// An in-memory URL (`sqlite::memory:`, `mode=memory`) yields a private
    /// in-memory database; see [`Database::in_memory`].
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?;
        if is_in_memory(&options) {
            return Self::in_memory().await;
        }

        let options = options
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open {url}: {e}")))?;

        tracing::info!(url, "Connected to SQLite");

        Ok(Self { pool })
    }

    /// In-memory database for tests and throwaway runs.
    ///
    /// Every SQLite connection to `:memory:` is a separate database, so the
    /// pool is pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Create tables if absent. Safe to call repeatedly.
    pub async fn init_schema(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::debug!("Schema ready");
        Ok(())
    }

    /// Underlying pool (for diagnostics and tests).
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// A request-scoped connection, acquired lazily.
///
/// Dropping a `DbConn` returns its connection to the pool.
pub struct DbConn {
    db: Database,
    conn: Option<PoolConnection<Sqlite>>,
}

impl DbConn {
    pub fn new(db: Database) -> Self {
        Self { db, conn: None }
    }

    /// Whether a connection has been checked out yet.
    pub fn is_acquired(&self) -> bool {
        self.conn.is_some()
    }

    async fn get(&mut self) -> Result<&mut SqliteConnection> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => self.db.pool.acquire().await?,
        };
        Ok(&mut **self.conn.insert(conn))
    }

    // ─── Users ───────────────────────────────────────────────

    /// Insert a user and return its ID.
    ///
    /// A duplicate username yields [`AppError::Conflict`].
    pub async fn create_user(&mut self, username: &str, password_hash: &str) -> Result<i64> {
        let conn = self.get().await?;
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(&mut *conn)
            .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Conflict(
                format!("Username {username} already exists"),
            )),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_user_by_username(&mut self, username: &str) -> Result<Option<User>> {
        let conn = self.get().await?;
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(user)
    }

    // ─── Health entries ──────────────────────────────────────

    /// Insert one entry for `user_id` on `date` and return its ID.
    pub async fn insert_entry(
        &mut self,
        user_id: i64,
        date: &str,
        entry: &NewHealthEntry,
    ) -> Result<i64> {
        let conn = self.get().await?;
        let done = sqlx::query(
            "INSERT INTO health (user_id, date, water, steps, sleep, mood) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(date)
        .bind(entry.water)
        .bind(entry.steps)
        .bind(entry.sleep)
        .bind(entry.mood)
        .execute(&mut *conn)
        .await?;
        Ok(done.last_insert_rowid())
    }

    /// All entries for `user_id`, oldest date first.
    ///
    /// Dates compare as strings; entries on the same day keep insertion order.
    pub async fn list_entries(&mut self, user_id: i64) -> Result<Vec<HealthEntry>> {
        let conn = self.get().await?;
        let entries = sqlx::query_as::<_, HealthEntry>(
            "SELECT date, water, steps, sleep, mood FROM health WHERE user_id = ? ORDER BY date, id",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(entries)
    }
}

impl FromRequestParts<Arc<AppState>> for DbConn {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> std::result::Result<Self, Self::Rejection> {
        Ok(DbConn::new(state.db.clone()))
    }
}
