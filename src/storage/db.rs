//! PostgreSQL database layer

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use super::Sort;
use crate::config::DbConfig;
use crate::models::{Book, BookInput};

pub struct Database {
    pool: Arc<PgPool>,
}

impl Database {
    /// Build a lazily-connecting pool. No connection is attempted here, so
    /// startup succeeds while the database is down and the first failing
    /// operation selects the fallback instead.
    pub fn connect_lazy(config: &DbConfig) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_lazy_with(options);

        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the books table if it does not exist. Callers tolerate
    /// failure; a down database at startup is the fallback's case.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS books (
                id SERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                review TEXT,
                rating REAL,
                date_read DATE,
                isbn TEXT,
                cover_url TEXT
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .context("Failed to create books table")?;

        Ok(())
    }

    pub async fn list(&self, sort: Sort) -> Result<Vec<Book>> {
        // order_by() only ever yields fixed whitelist fragments
        let query = format!(
            "SELECT id, title, author, review, rating, date_read, isbn, cover_url \
             FROM books ORDER BY {}",
            sort.order_by()
        );

        let books: Vec<Book> = sqlx::query_as(&query).fetch_all(&*self.pool).await?;

        Ok(books)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Book>> {
        let book: Option<Book> = sqlx::query_as(
            r#"
            SELECT id, title, author, review, rating, date_read, isbn, cover_url
            FROM books WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(book)
    }

    pub async fn insert(&self, input: &BookInput, cover_url: Option<&str>) -> Result<Book> {
        let book: Book = sqlx::query_as(
            r#"
            INSERT INTO books (title, author, review, rating, date_read, isbn, cover_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, author, review, rating, date_read, isbn, cover_url
            "#,
        )
        .bind(&input.title)
        .bind(&input.author)
        .bind(&input.review)
        .bind(input.rating)
        .bind(input.date_read)
        .bind(&input.isbn)
        .bind(cover_url)
        .fetch_one(&*self.pool)
        .await?;

        Ok(book)
    }

    /// Returns true if a row with the given id existed and was updated.
    pub async fn update(
        &self,
        id: i32,
        input: &BookInput,
        cover_url: Option<&str>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $1, author = $2, review = $3, rating = $4,
                date_read = $5, isbn = $6, cover_url = $7
            WHERE id = $8
            "#,
        )
        .bind(&input.title)
        .bind(&input.author)
        .bind(&input.review)
        .bind(input.rating)
        .bind(input.date_read)
        .bind(&input.isbn)
        .bind(cover_url)
        .bind(id)
        .execute(&*self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns true if a row with the given id existed and was deleted.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM books WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&*self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
