//! Book CRUD handlers
//!
//! The store absorbs database failures, so these handlers never surface
//! storage errors. Unknown or unparseable ids redirect back to the list
//! instead of erroring.

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::BookInput;
use crate::storage::Sort;
use crate::{views, AppState};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    sort: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Html<String> {
    let sort = params
        .sort
        .as_deref()
        .and_then(Sort::parse)
        .unwrap_or_default();

    let books = state.store.get_all(sort).await;

    Html(views::book_list(&books, state.store.is_using_fallback()))
}

pub async fn new_form() -> Html<String> {
    Html(views::book_form(None))
}

/// Raw form body. Browsers post every field as a string; blank or
/// unparseable optional values become `None` at this boundary.
#[derive(Debug, Default, Deserialize)]
pub struct BookForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    review: String,
    #[serde(default)]
    rating: String,
    #[serde(default)]
    date_read: String,
    #[serde(default)]
    isbn: String,
}

impl BookForm {
    fn into_input(self) -> BookInput {
        BookInput {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            review: none_if_blank(&self.review),
            rating: self.rating.trim().parse().ok(),
            date_read: NaiveDate::parse_from_str(self.date_read.trim(), "%Y-%m-%d").ok(),
            isbn: none_if_blank(&self.isbn),
        }
    }
}

fn none_if_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub async fn create(State(state): State<AppState>, Form(form): Form<BookForm>) -> Redirect {
    let book = state.store.create(form.into_input()).await;
    tracing::info!("Created book {}: {}", book.id, book.title);
    Redirect::to("/books")
}

pub async fn edit_form(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(id) = parse_id(&id) else {
        return Redirect::to("/books").into_response();
    };

    match state.store.get_by_id(id).await {
        Some(book) => Html(views::book_form(Some(&book))).into_response(),
        None => Redirect::to("/books").into_response(),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookForm>,
) -> Redirect {
    if let Some(id) = parse_id(&id) {
        if !state.store.update(id, form.into_input()).await {
            tracing::debug!("Update for unknown book id {}", id);
        }
    }
    Redirect::to("/books")
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    if let Some(id) = parse_id(&id) {
        state.store.remove(id).await;
    }
    Redirect::to("/books")
}

// Invalid ids behave as not-found rather than as errors.
fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}
