// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Health Tracker: record daily water, steps, sleep and mood.
//!
//! This crate provides the web backend: account registration, cookie
//! sessions, server-rendered pages and a small JSON API over SQLite.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use services::SessionStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Self {
        Self {
            config,
            db,
            sessions: SessionStore::new(),
        }
    }
}
