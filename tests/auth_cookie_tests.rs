// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session cookie attribute tests.
//!
//! These tests verify the removal cookie sent on logout matches the
//! attributes the session cookie was created with.

use axum::http::StatusCode;
use health_tracker::config::Config;

mod common;

use common::*;

fn find_session_cookie(headers: &[String]) -> String {
    headers
        .iter()
        .find(|value| value.starts_with("health_session="))
        .cloned()
        .unwrap_or_else(|| panic!("missing Set-Cookie header for health_session: {headers:?}"))
}

#[tokio::test]
async fn test_logout_cookie_removal_attributes() {
    let (app, _) = create_test_app().await;
    let cookie = register_and_login(&app, "alice", "pw").await;

    let response = send(&app, get_request("/logout", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let removal = find_session_cookie(&set_cookie_headers(&response));
    assert!(removal.starts_with("health_session=;"));
    assert!(removal.contains("Path=/"));
    assert!(removal.contains("HttpOnly"));
    assert!(removal.contains("SameSite=Lax"));
    assert!(removal.contains("Max-Age=0"));
    assert!(!removal.contains("Secure"));
    assert!(!removal.contains("Domain="));
}

#[tokio::test]
async fn test_secure_cookie_attributes() {
    let config = Config {
        cookie_secure: true,
        ..Config::test_default()
    };
    let (app, _) = create_test_app_with_config(config).await;

    register(&app, "alice", "pw").await;
    let response = login(&app, "alice", "pw").await;
    let created = find_session_cookie(&set_cookie_headers(&response));
    assert!(created.contains("Secure"));
    assert!(created.contains("Max-Age=2592000"));

    let cookie = session_cookie_pair(&response);
    let response = send(&app, get_request("/logout", Some(&cookie))).await;
    let removal = find_session_cookie(&set_cookie_headers(&response));
    assert!(removal.contains("Secure"));
    assert!(removal.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_short_session_ttl() {
    let config = Config {
        session_ttl_hours: 1,
        ..Config::test_default()
    };
    let (app, _) = create_test_app_with_config(config).await;

    register(&app, "alice", "pw").await;
    let response = login(&app, "alice", "pw").await;
    let created = find_session_cookie(&set_cookie_headers(&response));
    assert!(created.contains("Max-Age=3600"));
}
