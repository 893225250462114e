//! Data models for the catalogue

pub mod book;
pub mod category;
pub mod credential;

// Re-export commonly used types
pub use book::{Book, CreateBook, UpdateBook};
pub use category::{Category, CreateCategory, UpdateCategory};
pub use credential::{Credential, Role, Session};
