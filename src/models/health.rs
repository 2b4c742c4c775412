// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily health metrics.

use serde::{Deserialize, Serialize};

/// One row of the `health` table, as returned by `GET /api/data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct HealthEntry {
    /// Calendar day (`YYYY-MM-DD`)
    pub date: String,
    /// Water intake (litres)
    pub water: Option<f64>,
    /// Step count
    pub steps: Option<i64>,
    /// Sleep (hours)
    pub sleep: Option<f64>,
    /// Mood score
    pub mood: Option<i64>,
}

/// Metrics posted to `POST /api/add`.
///
/// Every field is optional; an absent or `null` metric is stored as NULL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewHealthEntry {
    #[serde(default)]
    pub water: Option<f64>,
    #[serde(default)]
    pub steps: Option<i64>,
    #[serde(default)]
    pub sleep: Option<f64>,
    #[serde(default)]
    pub mood: Option<i64>,
}

impl NewHealthEntry {
    /// Attach a date, producing the stored shape.
    pub fn on(self, date: impl Into<String>) -> HealthEntry {
        HealthEntry {
            date: date.into(),
            water: self.water,
            steps: self.steps,
            sleep: self.sleep,
            mood: self.mood,
        }
    }
}
