// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session cookie issuing and the session-gate middleware.
//!
//! The cookie holds an HS256 JWT naming the user and a server-side session
//! ID. Both the signature and the session record must check out.

use crate::config::Config;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "health_session";

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Server-side session ID
    pub sid: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Authenticated user, inserted into request extensions by the gates below.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub session_id: String,
}

/// Sign a session token.
pub fn create_session_token(
    user_id: i64,
    session_id: &str,
    issued_at: i64,
    expires_at: i64,
    signing_key: &[u8],
) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id.to_string(),
        sid: session_id.to_string(),
        iat: issued_at,
        exp: expires_at,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Verify signature and expiry of a session token.
pub fn decode_session_token(
    token: &str,
    signing_key: &[u8],
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);
    Ok(decode::<Claims>(token, &key, &validation)?.claims)
}

/// Resolve the session cookie to a live session, if any.
pub fn current_user(state: &AppState, jar: &CookieJar) -> Option<AuthUser> {
    let token = jar.get(SESSION_COOKIE)?.value().to_string();

    let claims = match decode_session_token(&token, &state.config.session_secret) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected session cookie");
            return None;
        }
    };

    let user_id: i64 = claims.sub.parse().ok()?;
    let record = state.sessions.get(&claims.sid)?;
    if record.user_id != user_id {
        tracing::warn!(user_id, "Session cookie does not match session owner");
        return None;
    }

    Some(AuthUser {
        user_id,
        session_id: claims.sid,
    })
}

/// Build the session cookie for a freshly signed token.
pub fn session_cookie(token: String, config: &Config) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(time::Duration::seconds(config.session_ttl_hours.saturating_mul(3600)))
        .build()
}

/// Cookie matching [`session_cookie`]'s attributes, for removal.
pub fn removal_cookie(config: &Config) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .build()
}

/// Gate for JSON API routes: 403 with a JSON error body when not logged in.
pub async fn require_api_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = current_user(&state, &jar).ok_or(AppError::NotLoggedIn)?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Gate for rendered pages: redirect to the login page when not logged in.
pub async fn require_page_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match current_user(&state, &jar) {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => Redirect::to("/login").into_response(),
    }
}
