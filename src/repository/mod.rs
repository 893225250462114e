//! Repository layer for database operations
//!
//! Each store is a capability trait with one SQLite production
//! implementation and one in-memory implementation (used by tests and by
//! callers that want the catalogue without a database file).

pub mod books;
pub mod categories;
pub mod credentials;
pub mod memory;

use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

use crate::{
    error::AppResult,
    models::{Book, Category, Credential},
    search::BookSearch,
};

/// Book persistence operations
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn list_all(&self) -> AppResult<Vec<Book>>;
    async fn get_by_id(&self, id: &str) -> AppResult<Option<Book>>;
    async fn get_by_category(&self, category_id: i64) -> AppResult<Vec<Book>>;
    async fn search_by_title(&self, fragment: &str) -> AppResult<Vec<Book>>;
    async fn search(&self, search: &BookSearch) -> AppResult<Vec<Book>>;
    async fn count_in_category(&self, category_id: i64) -> AppResult<i64>;
    async fn insert(&self, book: &Book) -> AppResult<()>;
    async fn update(&self, book: &Book) -> AppResult<bool>;
    async fn delete(&self, id: &str) -> AppResult<bool>;
}

/// Category persistence operations
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list_all(&self) -> AppResult<Vec<Category>>;
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Category>>;
    async fn get_by_name(&self, name: &str) -> AppResult<Option<Category>>;
    /// Insert a category and return it with its store-assigned id.
    async fn insert(&self, name: &str) -> AppResult<Category>;
    async fn update(&self, category: &Category) -> AppResult<bool>;
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// Credential persistence operations
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get_by_username(&self, username: &str) -> AppResult<Option<Credential>>;
    async fn username_exists(&self, username: &str) -> AppResult<bool>;
    /// Insert a credential; a duplicate username surfaces as `Conflict`.
    async fn insert(&self, credential: &Credential) -> AppResult<()>;
}

/// Main repository struct holding the database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub books: books::BooksRepository,
    pub categories: categories::CategoriesRepository,
    pub credentials: credentials::CredentialsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            categories: categories::CategoriesRepository::new(pool.clone()),
            credentials: credentials::CredentialsRepository::new(pool.clone()),
            pool,
        }
    }
}
