//! Librarium Library Catalogue Core
//!
//! A small library catalogue engine: books, categories and a two-role
//! (ADMIN/USER) login gate over a relational store. The crate is consumed
//! by a thin presentation layer; it exposes credential verification,
//! validated catalogue writes and composable multi-criteria book search.

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod search;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use models::{Book, Category, Credential, Role, Session};
pub use search::BookSearch;
