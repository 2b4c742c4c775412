// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration, login and logout.
//!
//! These are browser form endpoints: failures come back as plain text,
//! successes as redirects.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use std::sync::Arc;
use validator::{Validate, ValidationErrors};

use crate::db::DbConn;
use crate::error::{AppError, Result};
use crate::middleware::auth::{create_session_token, current_user, removal_cookie, session_cookie};
use crate::models::Credentials;
use crate::routes::pages;
use crate::services::password::{hash_password_blocking, verify_password_blocking};
use crate::time_utils::hours_after;
use crate::AppState;

/// Body of the response to a duplicate registration.
pub const USERNAME_TAKEN: &str = "Username already exists!";
/// Body of the response to any failed login.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials!";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/register", get(pages::register_page).post(register))
        .route("/login", get(pages::login_page).post(login))
        .route("/logout", get(logout))
}

/// Send visitors to the dashboard if logged in, else to the login page.
async fn home(State(state): State<Arc<AppState>>, jar: CookieJar) -> Redirect {
    if current_user(&state, &jar).is_some() {
        Redirect::to("/dashboard")
    } else {
        Redirect::to("/login")
    }
}

/// Create an account, then send the user to log in.
async fn register(mut db: DbConn, Form(form): Form<Credentials>) -> Result<Response> {
    if let Err(errors) = form.validate() {
        return Ok((StatusCode::BAD_REQUEST, validation_message(&errors)).into_response());
    }

    let password_hash = hash_password_blocking(form.password).await?;

    match db.create_user(&form.username, &password_hash).await {
        Ok(user_id) => {
            tracing::info!(user_id, username = %form.username, "User registered");
            Ok(Redirect::to("/login").into_response())
        }
        Err(AppError::Conflict(_)) => {
            tracing::info!(username = %form.username, "Registration rejected: username taken");
            Ok((StatusCode::CONFLICT, USERNAME_TAKEN).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Check credentials and open a session.
///
/// Unknown usernames and wrong passwords get the same response.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut db: DbConn,
    Form(form): Form<Credentials>,
) -> Result<Response> {
    let user = db.find_user_by_username(&form.username).await?;
    drop(db);

    let verified = match &user {
        Some(user) => verify_password_blocking(form.password, user.password_hash.clone()).await?,
        None => false,
    };

    let Some(user) = user.filter(|_| verified) else {
        tracing::info!(username = %form.username, "Login failed");
        return Ok((StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS).into_response());
    };

    // A browser that logs in again gets a fresh session; the old one goes.
    if let Some(previous) = current_user(&state, &jar) {
        state.sessions.revoke(&previous.session_id);
    }
    let purged = state.sessions.purge_expired();
    if purged > 0 {
        tracing::debug!(purged, "Purged expired sessions");
    }

    let now = Utc::now();
    let expires_at = hours_after(now, state.config.session_ttl_hours)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Session expiry out of range")))?;
    let session_id = state.sessions.create(user.id, expires_at)?;
    let token = create_session_token(
        user.id,
        &session_id,
        now.timestamp(),
        expires_at,
        &state.config.session_secret,
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Session token creation failed: {}", e)))?;

    tracing::info!(user_id = user.id, "User logged in");

    let jar = jar.add(session_cookie(token, &state.config));
    Ok((jar, Redirect::to("/dashboard")).into_response())
}

/// End the session (if any) and return to the login page.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(user) = current_user(&state, &jar) {
        state.sessions.revoke(&user.session_id);
        tracing::info!(user_id = user.user_id, "User logged out");
    }

    (jar.remove(removal_cookie(&state.config)), Redirect::to("/login"))
}

/// Flatten validation failures into one line of text.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .map(|err| match &err.message {
            Some(message) => message.to_string(),
            None => err.code.to_string(),
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
