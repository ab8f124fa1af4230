//! In-memory fallback store using DashMap
//!
//! Non-durable: it holds whatever was written while the database was
//! unreachable and is gone on restart. Records created here are never
//! reconciled into the database.

use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicI32, Ordering};

use dashmap::DashMap;

use super::{Sort, SortDir, SortKey};
use crate::models::{Book, BookInput};

pub struct MemoryStore {
    books: DashMap<i32, Book>,
    next_id: AtomicI32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            books: DashMap::new(),
            next_id: AtomicI32::new(1),
        }
    }

    pub fn insert(&self, input: &BookInput, cover_url: Option<&str>) -> Book {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let book = Book {
            id,
            title: input.title.clone(),
            author: input.author.clone(),
            review: input.review.clone(),
            rating: input.rating,
            date_read: input.date_read,
            isbn: input.isbn.clone(),
            cover_url: cover_url.map(str::to_string),
        };
        self.books.insert(id, book.clone());
        book
    }

    pub fn get(&self, id: i32) -> Option<Book> {
        self.books.get(&id).map(|entry| entry.value().clone())
    }

    pub fn list(&self, sort: Sort) -> Vec<Book> {
        let mut books: Vec<Book> = self
            .books
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        // Same contract as the SQL ORDER BY fragments: missing keys last
        // regardless of direction, ties by id (insertion order).
        books.sort_by(|a, b| {
            let ord = match sort.key {
                SortKey::Title => apply_dir(a.title.cmp(&b.title), sort.dir),
                SortKey::Author => apply_dir(a.author.cmp(&b.author), sort.dir),
                SortKey::Rating => cmp_nulls_last(a.rating, b.rating, sort.dir),
                SortKey::DateRead => cmp_nulls_last(a.date_read, b.date_read, sort.dir),
            };
            ord.then_with(|| a.id.cmp(&b.id))
        });

        books
    }

    /// Returns true if the book existed and was updated.
    pub fn update(&self, id: i32, input: &BookInput, cover_url: Option<&str>) -> bool {
        match self.books.get_mut(&id) {
            Some(mut entry) => {
                let book = entry.value_mut();
                book.title = input.title.clone();
                book.author = input.author.clone();
                book.review = input.review.clone();
                book.rating = input.rating;
                book.date_read = input.date_read;
                book.isbn = input.isbn.clone();
                book.cover_url = cover_url.map(str::to_string);
                true
            }
            None => false,
        }
    }

    /// Returns true if the book existed and was removed.
    pub fn remove(&self, id: i32) -> bool {
        self.books.remove(&id).is_some()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_dir(ord: CmpOrdering, dir: SortDir) -> CmpOrdering {
    match dir {
        SortDir::Asc => ord,
        SortDir::Desc => ord.reverse(),
    }
}

fn cmp_nulls_last<T: PartialOrd>(a: Option<T>, b: Option<T>, dir: SortDir) -> CmpOrdering {
    match (a, b) {
        (None, None) => CmpOrdering::Equal,
        (None, Some(_)) => CmpOrdering::Greater,
        (Some(_), None) => CmpOrdering::Less,
        (Some(x), Some(y)) => apply_dir(x.partial_cmp(&y).unwrap_or(CmpOrdering::Equal), dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn input(title: &str, date_read: Option<NaiveDate>) -> BookInput {
        BookInput {
            title: title.to_string(),
            author: "Author".to_string(),
            date_read,
            ..Default::default()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let store = MemoryStore::new();

        let first = store.insert(&input("First", None), None);
        let second = store.insert(&input("Second", None), None);

        assert!(second.id > first.id);
        assert_eq!(store.get(first.id).unwrap().title, "First");
    }

    #[test]
    fn update_replaces_all_editable_fields() {
        let store = MemoryStore::new();
        let book = store.insert(&input("Old", Some(date(2024, 1, 1))), Some("old-url"));

        let replacement = BookInput {
            title: "New".to_string(),
            author: "New Author".to_string(),
            review: Some("good".to_string()),
            rating: Some(4.5),
            date_read: None,
            isbn: Some("123".to_string()),
        };
        assert!(store.update(book.id, &replacement, Some("new-url")));

        let updated = store.get(book.id).unwrap();
        assert_eq!(updated.title, "New");
        assert_eq!(updated.author, "New Author");
        assert_eq!(updated.review.as_deref(), Some("good"));
        assert_eq!(updated.rating, Some(4.5));
        assert_eq!(updated.date_read, None);
        assert_eq!(updated.cover_url.as_deref(), Some("new-url"));
    }

    #[test]
    fn update_and_remove_are_noops_for_unknown_ids() {
        let store = MemoryStore::new();

        assert!(!store.update(42, &input("Nope", None), None));
        assert!(!store.remove(42));
    }

    #[test]
    fn remove_then_get_is_none() {
        let store = MemoryStore::new();
        let book = store.insert(&input("Gone", None), None);

        assert!(store.remove(book.id));
        assert_eq!(store.get(book.id), None);
    }

    #[test]
    fn list_orders_by_date_read_desc_with_missing_dates_last() {
        let store = MemoryStore::new();
        let older = store.insert(&input("Older", Some(date(2023, 5, 1))), None);
        let newer = store.insert(&input("Newer", Some(date(2024, 5, 1))), None);
        let undated = store.insert(&input("Undated", None), None);

        let books = store.list(Sort::default());
        let ids: Vec<i32> = books.iter().map(|b| b.id).collect();

        assert_eq!(ids, vec![newer.id, older.id, undated.id]);
    }

    #[test]
    fn list_breaks_date_ties_by_insertion_order() {
        let store = MemoryStore::new();
        let same_day = Some(date(2024, 5, 1));
        let first = store.insert(&input("First", same_day), None);
        let second = store.insert(&input("Second", same_day), None);

        let books = store.list(Sort::default());
        let ids: Vec<i32> = books.iter().map(|b| b.id).collect();

        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn list_orders_by_title_in_both_directions() {
        let store = MemoryStore::new();
        store.insert(&input("Banana", None), None);
        store.insert(&input("Apple", None), None);

        let asc = store.list(Sort {
            key: SortKey::Title,
            dir: SortDir::Asc,
        });
        assert_eq!(asc[0].title, "Apple");

        let desc = store.list(Sort {
            key: SortKey::Title,
            dir: SortDir::Desc,
        });
        assert_eq!(desc[0].title, "Banana");
    }
}
