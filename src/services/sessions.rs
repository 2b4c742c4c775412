// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-side session registry.
//!
//! The session cookie only carries a signed reference (`sid`) into this
//! store. Logging out removes the record, so an old cookie stops working even
//! though its signature is still valid.

use dashmap::DashMap;
use ring::rand::{SecureRandom, SystemRandom};

use crate::error::{AppError, Result};
use crate::time_utils::unix_now;

/// Bytes of randomness in a session ID (hex-encoded to twice this length).
const SESSION_ID_BYTES: usize = 32;

/// A live login session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRecord {
    pub user_id: i64,
    /// Unix timestamp after which the session is dead
    pub expires_at: i64,
}

/// Concurrent map of session ID to owner.
pub struct SessionStore {
    sessions: DashMap<String, SessionRecord>,
    rng: SystemRandom,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            rng: SystemRandom::new(),
        }
    }

    /// Open a session for `user_id` and return its ID.
    pub fn create(&self, user_id: i64, expires_at: i64) -> Result<String> {
        let mut bytes = [0u8; SESSION_ID_BYTES];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG failure")))?;
        let sid = hex::encode(bytes);

        self.sessions.insert(
            sid.clone(),
            SessionRecord {
                user_id,
                expires_at,
            },
        );
        Ok(sid)
    }

    /// Look up a live session. Expired records are dropped on the way.
    pub fn get(&self, sid: &str) -> Option<SessionRecord> {
        let record = *self.sessions.get(sid)?;
        if record.expires_at <= unix_now() {
            self.sessions.remove(sid);
            return None;
        }
        Some(record)
    }

    /// End a session. Unknown IDs are ignored.
    pub fn revoke(&self, sid: &str) {
        self.sessions.remove(sid);
    }

    /// Drop every expired record; returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = unix_now();
        let before = self.sessions.len();
        self.sessions.retain(|_, record| record.expires_at > now);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
