// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local development.

use std::env;

/// Minimum length for the session signing secret.
pub const MIN_SESSION_SECRET_LEN: usize = 32;

/// Default session lifetime (30 days).
const DEFAULT_SESSION_TTL_HOURS: i64 = 30 * 24;

/// Longest accepted session lifetime (10 years).
pub const MAX_SESSION_TTL_HOURS: i64 = 10 * 365 * 24;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    /// Server port
    pub port: u16,
    /// Lifetime of a login session
    pub session_ttl_hours: i64,
    /// Mark the session cookie `Secure` (HTTPS deployments)
    pub cookie_secure: bool,

    // --- Secrets ---
    /// Signing key for session cookies (raw bytes)
    pub session_secret: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let session_secret = env::var("SESSION_SECRET")
            .map_err(|_| ConfigError::Missing("SESSION_SECRET"))?
            .trim()
            .as_bytes()
            .to_vec();
        if session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::Invalid(
                "SESSION_SECRET",
                format!("must be at least {MIN_SESSION_SECRET_LEN} bytes"),
            ));
        }

        let session_ttl_hours = match env::var("SESSION_TTL_HOURS") {
            Ok(v) => v
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|h| (1..=MAX_SESSION_TTL_HOURS).contains(h))
                .ok_or_else(|| {
                    ConfigError::Invalid(
                        "SESSION_TTL_HOURS",
                        format!("not an integer in 1..={MAX_SESSION_TTL_HOURS}: {v}"),
                    )
                })?,
            Err(_) => DEFAULT_SESSION_TTL_HOURS,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://health.db".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            session_ttl_hours,
            cookie_secure: env::var("COOKIE_SECURE")
                .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "yes"))
                .unwrap_or(false),
            session_secret,
        })
    }

    /// Config for tests: in-memory database, fixed secret.
    pub fn test_default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            port: 8080,
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            cookie_secure: false,
            session_secret: b"test_session_secret_32_bytes_min!".to_vec(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
