//! In-memory store
//!
//! Implements the same store traits as the SQLite repositories over plain
//! maps. Used by the test suite and by embedding callers that want the
//! catalogue logic without a database file.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    models::{Book, Category, Credential},
    search::{contains_ignore_case, BookSearch},
};

use super::{BookStore, CategoryStore, CredentialStore};

#[derive(Default)]
pub struct MemoryStore {
    books: Mutex<BTreeMap<String, Book>>,
    categories: Mutex<BTreeMap<i64, Category>>,
    credentials: Mutex<BTreeMap<String, Credential>>,
    next_category_id: Mutex<i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_category_id: Mutex::new(1),
            ..Default::default()
        }
    }
}

fn sorted_by_title(mut books: Vec<Book>) -> Vec<Book> {
    books.sort_by(|a, b| a.title.cmp(&b.title));
    books
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn list_all(&self) -> AppResult<Vec<Book>> {
        let books = self.books.lock().unwrap();
        Ok(sorted_by_title(books.values().cloned().collect()))
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<Book>> {
        let books = self.books.lock().unwrap();
        Ok(books.get(id).cloned())
    }

    async fn get_by_category(&self, category_id: i64) -> AppResult<Vec<Book>> {
        let books = self.books.lock().unwrap();
        Ok(sorted_by_title(
            books
                .values()
                .filter(|b| b.category_id == category_id)
                .cloned()
                .collect(),
        ))
    }

    async fn search_by_title(&self, fragment: &str) -> AppResult<Vec<Book>> {
        let books = self.books.lock().unwrap();
        Ok(sorted_by_title(
            books
                .values()
                .filter(|b| contains_ignore_case(&b.title, fragment))
                .cloned()
                .collect(),
        ))
    }

    async fn search(&self, search: &BookSearch) -> AppResult<Vec<Book>> {
        let books = self.books.lock().unwrap();
        Ok(sorted_by_title(
            books.values().filter(|b| search.matches(b)).cloned().collect(),
        ))
    }

    async fn count_in_category(&self, category_id: i64) -> AppResult<i64> {
        let books = self.books.lock().unwrap();
        Ok(books.values().filter(|b| b.category_id == category_id).count() as i64)
    }

    async fn insert(&self, book: &Book) -> AppResult<()> {
        let mut books = self.books.lock().unwrap();
        if books.contains_key(&book.id) {
            return Err(AppError::Conflict(
                "A book with this id already exists".to_string(),
            ));
        }
        books.insert(book.id.clone(), book.clone());
        Ok(())
    }

    async fn update(&self, book: &Book) -> AppResult<bool> {
        let mut books = self.books.lock().unwrap();
        match books.get_mut(&book.id) {
            Some(existing) => {
                *existing = book.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let mut books = self.books.lock().unwrap();
        Ok(books.remove(id).is_some())
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn list_all(&self) -> AppResult<Vec<Category>> {
        let categories = self.categories.lock().unwrap();
        let mut all: Vec<Category> = categories.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        let categories = self.categories.lock().unwrap();
        Ok(categories.get(&id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        let categories = self.categories.lock().unwrap();
        Ok(categories.values().find(|c| c.name == name).cloned())
    }

    async fn insert(&self, name: &str) -> AppResult<Category> {
        let mut next_id = self.next_category_id.lock().unwrap();
        let mut categories = self.categories.lock().unwrap();

        let category = Category {
            id: *next_id,
            name: name.to_string(),
        };
        categories.insert(category.id, category.clone());
        *next_id += 1;

        Ok(category)
    }

    async fn update(&self, category: &Category) -> AppResult<bool> {
        let mut categories = self.categories.lock().unwrap();
        match categories.get_mut(&category.id) {
            Some(existing) => {
                *existing = category.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut categories = self.categories.lock().unwrap();
        Ok(categories.remove(&id).is_some())
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn get_by_username(&self, username: &str) -> AppResult<Option<Credential>> {
        let credentials = self.credentials.lock().unwrap();
        Ok(credentials.get(username).cloned())
    }

    async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let credentials = self.credentials.lock().unwrap();
        Ok(credentials.contains_key(username))
    }

    async fn insert(&self, credential: &Credential) -> AppResult<()> {
        let mut credentials = self.credentials.lock().unwrap();
        if credentials.contains_key(&credential.username) {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }
        credentials.insert(credential.username.clone(), credential.clone());
        Ok(())
    }
}
