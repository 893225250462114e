//! Catalogue management service
//!
//! Book and category operations with caller-side validation, uniqueness
//! pre-checks and role gating. Reads require an authenticated session;
//! writes require the ADMIN role.

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        Book, Category, CreateBook, CreateCategory, Role, Session, UpdateBook, UpdateCategory,
    },
    repository::{BookStore, CategoryStore},
    search::BookSearch,
};

#[derive(Clone)]
pub struct CatalogService {
    books: Arc<dyn BookStore>,
    categories: Arc<dyn CategoryStore>,
}

impl CatalogService {
    pub fn new(books: Arc<dyn BookStore>, categories: Arc<dyn CategoryStore>) -> Self {
        Self { books, categories }
    }

    // Books

    pub async fn list_books(&self, session: &Session) -> AppResult<Vec<Book>> {
        require_reader(session)?;
        self.books.list_all().await
    }

    /// Lookup by id; absence is an explicit `None`, not an error.
    pub async fn get_book(&self, session: &Session, id: &str) -> AppResult<Option<Book>> {
        require_reader(session)?;
        self.books.get_by_id(id).await
    }

    pub async fn books_in_category(
        &self,
        session: &Session,
        category_id: i64,
    ) -> AppResult<Vec<Book>> {
        require_reader(session)?;
        self.books.get_by_category(category_id).await
    }

    pub async fn search_books_by_title(
        &self,
        session: &Session,
        fragment: &str,
    ) -> AppResult<Vec<Book>> {
        require_reader(session)?;
        self.books.search_by_title(fragment).await
    }

    /// Advanced search over up to five optional criteria.
    ///
    /// An inverted year range is rejected here, before composition.
    pub async fn search_books(
        &self,
        session: &Session,
        search: &BookSearch,
    ) -> AppResult<Vec<Book>> {
        require_reader(session)?;
        search.validate()?;
        self.books.search(search).await
    }

    pub async fn add_book(&self, session: &Session, request: CreateBook) -> AppResult<Book> {
        require_admin(session)?;
        request.validate()?;
        self.require_category(request.category_id).await?;

        if self.books.get_by_id(&request.id).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "A book with id '{}' already exists",
                request.id
            )));
        }

        let book = Book {
            id: request.id,
            title: request.title,
            author: request.author,
            category_id: request.category_id,
            year: request.year,
        };
        self.books.insert(&book).await?;

        tracing::debug!(id = %book.id, "Book created");
        Ok(book)
    }

    /// Update every mutable field of a book; the id is immutable and only
    /// selects the record.
    pub async fn update_book(&self, session: &Session, request: UpdateBook) -> AppResult<Book> {
        require_admin(session)?;
        request.validate()?;
        self.require_category(request.category_id).await?;

        let book = Book {
            id: request.id,
            title: request.title,
            author: request.author,
            category_id: request.category_id,
            year: request.year,
        };
        if !self.books.update(&book).await? {
            return Err(AppError::NotFound(format!(
                "Book with id '{}' not found",
                book.id
            )));
        }

        Ok(book)
    }

    pub async fn delete_book(&self, session: &Session, id: &str) -> AppResult<()> {
        require_admin(session)?;

        if !self.books.delete(id).await? {
            return Err(AppError::NotFound(format!(
                "Book with id '{}' not found",
                id
            )));
        }

        Ok(())
    }

    // Categories

    pub async fn list_categories(&self, session: &Session) -> AppResult<Vec<Category>> {
        require_reader(session)?;
        self.categories.list_all().await
    }

    pub async fn get_category(&self, session: &Session, id: i64) -> AppResult<Option<Category>> {
        require_reader(session)?;
        self.categories.get_by_id(id).await
    }

    pub async fn get_category_by_name(
        &self,
        session: &Session,
        name: &str,
    ) -> AppResult<Option<Category>> {
        require_reader(session)?;
        self.categories.get_by_name(name).await
    }

    /// Create a category; name uniqueness is enforced here, the storage
    /// layer has no constraint on it.
    pub async fn add_category(
        &self,
        session: &Session,
        request: CreateCategory,
    ) -> AppResult<Category> {
        require_admin(session)?;
        request.validate()?;

        if self.categories.get_by_name(&request.name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "A category named '{}' already exists",
                request.name
            )));
        }

        let category = self.categories.insert(&request.name).await?;
        tracing::debug!(id = category.id, "Category created");
        Ok(category)
    }

    pub async fn update_category(
        &self,
        session: &Session,
        request: UpdateCategory,
    ) -> AppResult<Category> {
        require_admin(session)?;
        request.validate()?;

        if let Some(existing) = self.categories.get_by_name(&request.name).await? {
            if existing.id != request.id {
                return Err(AppError::Conflict(format!(
                    "A category named '{}' already exists",
                    request.name
                )));
            }
        }

        let category = Category {
            id: request.id,
            name: request.name,
        };
        if !self.categories.update(&category).await? {
            return Err(AppError::NotFound(format!(
                "Category with id {} not found",
                category.id
            )));
        }

        Ok(category)
    }

    /// Delete a category, rejected while any book still references it.
    ///
    /// The reference check and the delete are two statements, not one
    /// atomic unit; acceptable under the single-writer assumption.
    pub async fn delete_category(&self, session: &Session, id: i64) -> AppResult<()> {
        require_admin(session)?;

        let in_use = self.books.count_in_category(id).await?;
        if in_use > 0 {
            return Err(AppError::Conflict(format!(
                "Category {} is referenced by {} book(s)",
                id, in_use
            )));
        }

        if !self.categories.delete(id).await? {
            return Err(AppError::NotFound(format!(
                "Category with id {} not found",
                id
            )));
        }

        Ok(())
    }

    async fn require_category(&self, category_id: i64) -> AppResult<()> {
        if self.categories.get_by_id(category_id).await?.is_none() {
            return Err(AppError::Validation(format!(
                "Category {} does not exist",
                category_id
            )));
        }
        Ok(())
    }
}

fn require_reader(session: &Session) -> AppResult<()> {
    if session.is_authenticated() {
        Ok(())
    } else {
        Err(AppError::Authorization("Sign in required".to_string()))
    }
}

fn require_admin(session: &Session) -> AppResult<()> {
    match session.role() {
        Some(Role::Admin) => Ok(()),
        Some(_) => Err(AppError::Authorization(
            "Administrator role required".to_string(),
        )),
        None => Err(AppError::Authorization("Sign in required".to_string())),
    }
}
