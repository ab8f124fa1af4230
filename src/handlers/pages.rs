//! Landing page and 404 handler

use axum::http::StatusCode;
use axum::response::Html;

use crate::views;

pub async fn index() -> Html<String> {
    Html(views::index())
}

pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, views::not_found())
}
