// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use health_tracker::error::AppError;

mod common;

#[test]
fn test_error_status_codes() {
    assert_eq!(AppError::NotLoggedIn.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        AppError::Conflict("taken".to_string()).status(),
        StatusCode::CONFLICT
    );
    assert_eq!(
        AppError::Database("disk full".to_string()).status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_not_logged_in_body() {
    let response = AppError::NotLoggedIn.into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = common::body_json(response).await;
    assert_eq!(body["error"], "not_logged_in");
    assert_eq!(body["details"], "Not logged in");
}

#[tokio::test]
async fn test_database_error_hides_details() {
    let response = AppError::Database("secret table layout".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = common::body_json(response).await;
    assert_eq!(body["error"], "database_error");
    assert!(body.get("details").is_none());
}
