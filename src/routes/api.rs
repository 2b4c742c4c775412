// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON API for logged-in users.

use crate::db::DbConn;
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{HealthEntry, NewHealthEntry};
use crate::time_utils::today;
use crate::AppState;
use axum::{
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// API routes (require a session).
/// The session gate is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/add", post(add_entry))
        .route("/api/data", get(get_data))
}

/// Acknowledgement for a stored entry.
#[derive(Serialize)]
pub struct AddEntryResponse {
    pub success: bool,
}

/// Record today's metrics for the current user.
///
/// The date is always the server's current day; clients cannot supply one.
async fn add_entry(
    Extension(user): Extension<AuthUser>,
    mut db: DbConn,
    Json(entry): Json<NewHealthEntry>,
) -> Result<Json<AddEntryResponse>> {
    let date = today();
    let entry_id = db.insert_entry(user.user_id, &date, &entry).await?;

    tracing::info!(
        user_id = user.user_id,
        entry_id,
        date = %date,
        "Health entry recorded"
    );

    Ok(Json(AddEntryResponse { success: true }))
}

/// Every entry belonging to the current user, oldest first.
async fn get_data(
    Extension(user): Extension<AuthUser>,
    mut db: DbConn,
) -> Result<Json<Vec<HealthEntry>>> {
    let entries = db.list_entries(user.user_id).await?;
    tracing::debug!(user_id = user.user_id, count = entries.len(), "Listed entries");
    Ok(Json(entries))
}
