// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-rendered pages and their static assets.

use axum::{
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::AppState;

const LOGIN_HTML: &str = include_str!("../../templates/login.html");
const REGISTER_HTML: &str = include_str!("../../templates/register.html");
const DASHBOARD_HTML: &str = include_str!("../../templates/dashboard.html");
const DASHBOARD_JS: &str = include_str!("../../templates/dashboard.js");
const STYLE_CSS: &str = include_str!("../../templates/style.css");

/// Pages that require a session. The gate is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard", get(dashboard))
}

/// Public static assets.
pub fn asset_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/static/dashboard.js", get(dashboard_js))
        .route("/static/style.css", get(style_css))
}

pub(crate) async fn login_page() -> Html<&'static str> {
    Html(LOGIN_HTML)
}

pub(crate) async fn register_page() -> Html<&'static str> {
    Html(REGISTER_HTML)
}

async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

async fn dashboard_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        DASHBOARD_JS,
    )
}

async fn style_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS)
}
