//! Storage layer
//!
//! PostgreSQL is the primary backend. Every operation that fails at the
//! database level is retried against an in-memory fallback set so the
//! application keeps serving while the database is unreachable. The
//! fallback is best-effort and lossy across restarts.

pub mod db;
pub mod memory;

pub use db::Database;
pub use memory::MemoryStore;

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use crate::covers;
use crate::models::{Book, BookInput};

/// Whitelisted sort column for the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    DateRead,
    Title,
    Author,
    Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

/// Parsed sort expression. Only the fixed set of column/direction
/// combinations below ever reaches SQL; raw query strings do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub dir: SortDir,
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            key: SortKey::DateRead,
            dir: SortDir::Desc,
        }
    }
}

impl Sort {
    /// Parse a `"column DIR"` expression as the list view's `?sort=`
    /// parameter supplies it. Returns `None` for anything outside the
    /// whitelist; callers substitute the default.
    pub fn parse(expr: &str) -> Option<Self> {
        let mut parts = expr.split_whitespace();
        let key = match parts.next()?.to_ascii_lowercase().as_str() {
            "date_read" => SortKey::DateRead,
            "title" => SortKey::Title,
            "author" => SortKey::Author,
            "rating" => SortKey::Rating,
            _ => return None,
        };
        let dir = match parts.next() {
            None => SortDir::Asc,
            Some(d) => match d.to_ascii_lowercase().as_str() {
                "asc" => SortDir::Asc,
                "desc" => SortDir::Desc,
                _ => return None,
            },
        };
        if parts.next().is_some() {
            return None;
        }
        Some(Self { key, dir })
    }

    /// ORDER BY fragment for the primary backend. Nullable keys sort
    /// NULLS LAST in both directions and ties break by id, which is
    /// insertion order on both backends.
    pub(crate) fn order_by(self) -> &'static str {
        match (self.key, self.dir) {
            (SortKey::DateRead, SortDir::Asc) => "date_read ASC NULLS LAST, id",
            (SortKey::DateRead, SortDir::Desc) => "date_read DESC NULLS LAST, id",
            (SortKey::Rating, SortDir::Asc) => "rating ASC NULLS LAST, id",
            (SortKey::Rating, SortDir::Desc) => "rating DESC NULLS LAST, id",
            (SortKey::Title, SortDir::Asc) => "title ASC, id",
            (SortKey::Title, SortDir::Desc) => "title DESC, id",
            (SortKey::Author, SortDir::Asc) => "author ASC, id",
            (SortKey::Author, SortDir::Desc) => "author DESC, id",
        }
    }
}

/// Uniform CRUD contract over book records.
///
/// Database errors never cross this boundary: the failing operation is
/// served from the in-memory set instead, and `is_using_fallback` reports
/// which path the most recent operation took. The flag is re-evaluated on
/// every call, so the store returns to the database as soon as it is
/// reachable again.
pub struct Store {
    db: Database,
    fallback: MemoryStore,
    degraded: AtomicBool,
}

impl Store {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            fallback: MemoryStore::new(),
            degraded: AtomicBool::new(false),
        }
    }

    pub async fn get_all(&self, sort: Sort) -> Vec<Book> {
        match self.db.list(sort).await {
            Ok(books) => {
                self.set_degraded(false);
                books
            }
            Err(e) => {
                warn!("Database list failed, serving in-memory fallback: {:#}", e);
                self.set_degraded(true);
                self.fallback.list(sort)
            }
        }
    }

    pub async fn get_by_id(&self, id: i32) -> Option<Book> {
        match self.db.get(id).await {
            Ok(book) => {
                self.set_degraded(false);
                book
            }
            Err(e) => {
                warn!("Database get failed, serving in-memory fallback: {:#}", e);
                self.set_degraded(true);
                self.fallback.get(id)
            }
        }
    }

    /// Persist a new book. The cover URL is derived from the ISBN here, at
    /// write time, and stored with the record.
    pub async fn create(&self, input: BookInput) -> Book {
        let cover_url = covers::cover_url(input.isbn.as_deref());
        match self.db.insert(&input, cover_url.as_deref()).await {
            Ok(book) => {
                self.set_degraded(false);
                book
            }
            Err(e) => {
                warn!("Database insert failed, writing to in-memory fallback: {:#}", e);
                self.set_degraded(true);
                self.fallback.insert(&input, cover_url.as_deref())
            }
        }
    }

    /// Replace the editable fields of an existing book and recompute its
    /// cover URL. Returns false when the id does not exist.
    pub async fn update(&self, id: i32, input: BookInput) -> bool {
        let cover_url = covers::cover_url(input.isbn.as_deref());
        match self.db.update(id, &input, cover_url.as_deref()).await {
            Ok(found) => {
                self.set_degraded(false);
                found
            }
            Err(e) => {
                warn!("Database update failed, writing to in-memory fallback: {:#}", e);
                self.set_degraded(true);
                self.fallback.update(id, &input, cover_url.as_deref())
            }
        }
    }

    /// Hard delete. Returns false when the id does not exist.
    pub async fn remove(&self, id: i32) -> bool {
        match self.db.delete(id).await {
            Ok(found) => {
                self.set_degraded(false);
                found
            }
            Err(e) => {
                warn!("Database delete failed, deleting from in-memory fallback: {:#}", e);
                self.set_degraded(true);
                self.fallback.remove(id)
            }
        }
    }

    /// True iff the most recent operation was served from the in-memory
    /// fallback instead of the database.
    pub fn is_using_fallback(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    fn set_degraded(&self, degraded: bool) {
        self.degraded.store(degraded, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whitelisted_sort_expressions() {
        assert_eq!(
            Sort::parse("date_read DESC"),
            Some(Sort {
                key: SortKey::DateRead,
                dir: SortDir::Desc,
            })
        );
        assert_eq!(
            Sort::parse("title asc"),
            Some(Sort {
                key: SortKey::Title,
                dir: SortDir::Asc,
            })
        );
        assert_eq!(
            Sort::parse("rating"),
            Some(Sort {
                key: SortKey::Rating,
                dir: SortDir::Asc,
            })
        );
    }

    #[test]
    fn rejects_anything_outside_the_whitelist() {
        assert_eq!(Sort::parse(""), None);
        assert_eq!(Sort::parse("id"), None);
        assert_eq!(Sort::parse("title sideways"), None);
        assert_eq!(Sort::parse("title ASC extra"), None);
        assert_eq!(Sort::parse("title; DROP TABLE books"), None);
    }

    #[test]
    fn default_sort_is_date_read_desc() {
        assert_eq!(
            Sort::default(),
            Sort {
                key: SortKey::DateRead,
                dir: SortDir::Desc,
            }
        );
    }
}
