//! Business logic services

pub mod auth;
pub mod catalog;

use std::sync::Arc;

use crate::{
    config::BootstrapConfig,
    repository::{BookStore, CategoryStore, CredentialStore, Repository},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services over the SQLite repository
    pub fn new(repository: Repository, bootstrap: BootstrapConfig) -> Self {
        Self {
            auth: auth::AuthService::new(Arc::new(repository.credentials.clone()), bootstrap),
            catalog: catalog::CatalogService::new(
                Arc::new(repository.books.clone()),
                Arc::new(repository.categories),
            ),
        }
    }

    /// Create all services over arbitrary store implementations
    ///
    /// Used with the in-memory store for testing and embedding.
    pub fn with_stores(
        books: Arc<dyn BookStore>,
        categories: Arc<dyn CategoryStore>,
        credentials: Arc<dyn CredentialStore>,
        bootstrap: BootstrapConfig,
    ) -> Self {
        Self {
            auth: auth::AuthService::new(credentials, bootstrap),
            catalog: catalog::CatalogService::new(books, categories),
        }
    }
}
