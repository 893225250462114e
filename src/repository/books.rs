//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::Book,
    search::{BindValue, BookSearch},
};

use super::BookStore;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn list_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, category_id, year FROM books ORDER BY title",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, category_id, year FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    async fn get_by_category(&self, category_id: i64) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, category_id, year FROM books WHERE category_id = ? ORDER BY title",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    async fn search_by_title(&self, fragment: &str) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, category_id, year FROM books WHERE title LIKE ? ORDER BY title",
        )
        .bind(format!("%{}%", fragment))
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Advanced search: the composed conditions and their bound values are
    /// appended in lockstep, so binding them in order keeps every
    /// placeholder paired with its value.
    async fn search(&self, search: &BookSearch) -> AppResult<Vec<Book>> {
        let spec = search.compose();
        let sql = format!(
            "SELECT id, title, author, category_id, year FROM books{} ORDER BY title",
            spec.where_clause()
        );

        let mut query = sqlx::query_as::<_, Book>(&sql);
        for bind in spec.binds() {
            query = match bind {
                BindValue::Text(value) => query.bind(value.clone()),
                BindValue::Int(value) => query.bind(*value),
            };
        }

        let books = query.fetch_all(&self.pool).await?;
        Ok(books)
    }

    async fn count_in_category(&self, category_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE category_id = ?")
            .bind(category_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn insert(&self, book: &Book) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO books (id, title, author, category_id, year) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.category_id)
        .bind(book.year)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "A book with this id already exists"))?;

        Ok(())
    }

    async fn update(&self, book: &Book) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE books SET title = ?, author = ?, category_id = ?, year = ? WHERE id = ?",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.category_id)
        .bind(book.year)
        .bind(&book.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
