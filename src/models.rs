//! Domain types for the book log

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A logged book as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    /// Assigned by storage on creation, immutable, never reused
    pub id: i32,
    pub title: String,
    pub author: String,
    pub review: Option<String>,
    pub rating: Option<f32>,
    /// Default sort key for the list view
    pub date_read: Option<NaiveDate>,
    pub isbn: Option<String>,
    /// Derived from `isbn` at write time, never edited independently
    pub cover_url: Option<String>,
}

/// Editable fields for create and update. `id` is assigned by storage and
/// `cover_url` is recomputed from `isbn` on every write.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub review: Option<String>,
    pub rating: Option<f32>,
    pub date_read: Option<NaiveDate>,
    pub isbn: Option<String>,
}
