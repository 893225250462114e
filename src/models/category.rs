//! Category model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Category record
///
/// The id is assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Create category request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, message = "Category name must not be empty"), custom(function = not_blank))]
    pub name: String,
}

/// Update category request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCategory {
    pub id: i64,
    #[validate(length(min = 1, message = "Category name must not be empty"), custom(function = not_blank))]
    pub name: String,
}

fn not_blank(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut error = ValidationError::new("name_blank");
        error.message = Some("Category name must not be blank".into());
        return Err(error);
    }
    Ok(())
}
