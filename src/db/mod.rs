//! Database layer (SQLite).

pub mod sqlite;

pub use sqlite::{Database, DbConn};

/// Idempotent schema bootstrap, run once at startup.
pub(crate) const SCHEMA: [&str; 2] = [
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT UNIQUE NOT NULL,
        password TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS health (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        date TEXT NOT NULL,
        water REAL,
        steps INTEGER,
        sleep REAL,
        mood INTEGER,
        FOREIGN KEY(user_id) REFERENCES users(id)
    )",
];
