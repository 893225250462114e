//! Book model and catalogue write requests

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Earliest publication year the catalogue accepts.
pub const MIN_PUBLICATION_YEAR: i32 = 1000;

/// Book record
///
/// The id is caller-assigned (shelf mark, ISBN, accession number) and
/// immutable once the book is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub category_id: i64,
    pub year: i32,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = validate_book_fields))]
pub struct CreateBook {
    #[validate(length(min = 1, max = 50, message = "Book id must be 1-50 characters"))]
    pub id: String,
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "Author must be 1-255 characters"))]
    pub author: String,
    pub category_id: i64,
    pub year: i32,
}

/// Update book request
///
/// The id selects the record; every other field is replaced.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = validate_book_fields))]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 50, message = "Book id must be 1-50 characters"))]
    pub id: String,
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "Author must be 1-255 characters"))]
    pub author: String,
    pub category_id: i64,
    pub year: i32,
}

/// Check a publication year against the accepted range.
pub fn year_in_range(year: i32) -> bool {
    let current_year = chrono::Utc::now().year();
    (MIN_PUBLICATION_YEAR..=current_year).contains(&year)
}

fn validate_book_fields<T: BookFields>(book: &T) -> Result<(), ValidationError> {
    if book.id().trim().is_empty() {
        return Err(field_error("id_blank", "Book id must not be blank"));
    }
    if book.title().trim().is_empty() {
        return Err(field_error("title_blank", "Title must not be blank"));
    }
    if book.author().trim().is_empty() {
        return Err(field_error("author_blank", "Author must not be blank"));
    }
    if !year_in_range(book.year()) {
        return Err(field_error(
            "year_out_of_range",
            "Year must be between 1000 and the current year",
        ));
    }
    Ok(())
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Shared field access for create/update validation.
trait BookFields {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn author(&self) -> &str;
    fn year(&self) -> i32;
}

impl<T: BookFields> BookFields for &T {
    fn id(&self) -> &str {
        (**self).id()
    }
    fn title(&self) -> &str {
        (**self).title()
    }
    fn author(&self) -> &str {
        (**self).author()
    }
    fn year(&self) -> i32 {
        (**self).year()
    }
}

impl BookFields for CreateBook {
    fn id(&self) -> &str {
        &self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn author(&self) -> &str {
        &self.author
    }
    fn year(&self) -> i32 {
        self.year
    }
}

impl BookFields for UpdateBook {
    fn id(&self) -> &str {
        &self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn author(&self) -> &str {
        &self.author
    }
    fn year(&self) -> i32 {
        self.year
    }
}
