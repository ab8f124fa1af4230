//! HTTP handlers

pub mod books;
pub mod pages;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/books", get(books::list).post(books::create))
        .route("/books/new", get(books::new_form))
        .route("/books/:id/edit", get(books::edit_form))
        .route("/books/:id", post(books::update))
        .route("/books/:id/delete", post(books::delete))
        .nest_service("/public", ServeDir::new("public"))
        .fallback(pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
