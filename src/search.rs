//! Advanced search composition for books
//!
//! Up to five optional criteria are combined into a single AND-filter.
//! Composition appends each SQL condition and pushes its bound value in the
//! same step, so positional parameters always line up with their
//! placeholders. The same criteria double as an in-memory predicate for the
//! non-SQL store.

use validator::{Validate, ValidationError};

use crate::models::Book;

/// Optional search criteria over the book catalogue
///
/// `None` means "no constraint on this dimension". Legacy callers that
/// still signal absence with blank strings and non-positive integers go
/// through [`BookSearch::from_legacy`].
#[derive(Debug, Clone, Default, Validate)]
#[validate(schema(function = validate_year_bounds))]
pub struct BookSearch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category_id: Option<i64>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}

fn validate_year_bounds(search: &BookSearch) -> Result<(), ValidationError> {
    if let (Some(min), Some(max)) = (search.min_year, search.max_year) {
        if min > max {
            let mut error = ValidationError::new("year_bounds");
            error.message = Some("Minimum year must not exceed maximum year".into());
            return Err(error);
        }
    }
    Ok(())
}

impl BookSearch {
    /// Adapter for the legacy absence convention: blank string or
    /// non-positive integer means "criterion not supplied".
    pub fn from_legacy(
        title: &str,
        author: &str,
        category_id: i64,
        min_year: i32,
        max_year: i32,
    ) -> Self {
        Self {
            title: some_text(title),
            author: some_text(author),
            category_id: (category_id > 0).then_some(category_id),
            min_year: (min_year > 0).then_some(min_year),
            max_year: (max_year > 0).then_some(max_year),
        }
    }

    /// Render the present criteria as an ordered condition list plus bound
    /// values, in lockstep.
    ///
    /// No criteria at all composes to a match-everything query. A
    /// `min_year > max_year` combination is a caller-side validation error
    /// and is not special-cased here; composed as-is it yields an empty
    /// result set.
    pub fn compose(&self) -> QuerySpec {
        let mut spec = QuerySpec::default();

        if let Some(ref title) = self.title {
            spec.push_text("title LIKE ?", format!("%{}%", title));
        }
        if let Some(ref author) = self.author {
            spec.push_text("author LIKE ?", format!("%{}%", author));
        }
        if let Some(category_id) = self.category_id {
            spec.push_int("category_id = ?", category_id);
        }
        if let Some(min_year) = self.min_year {
            spec.push_int("year >= ?", i64::from(min_year));
        }
        if let Some(max_year) = self.max_year {
            spec.push_int("year <= ?", i64::from(max_year));
        }

        spec
    }

    /// Evaluate the criteria directly against one book.
    ///
    /// Substring matching is case-insensitive, mirroring SQLite's `LIKE`.
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(ref title) = self.title {
            if !contains_ignore_case(&book.title, title) {
                return false;
            }
        }
        if let Some(ref author) = self.author {
            if !contains_ignore_case(&book.author, author) {
                return false;
            }
        }
        if let Some(category_id) = self.category_id {
            if book.category_id != category_id {
                return false;
            }
        }
        if let Some(min_year) = self.min_year {
            if book.year < min_year {
                return false;
            }
        }
        if let Some(max_year) = self.max_year {
            if book.year > max_year {
                return false;
            }
        }
        true
    }
}

fn some_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A value bound to one positional placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    Int(i64),
}

/// Ordered filter conditions plus their bound values
///
/// Conditions and values are appended together, so `binds()[n]` always
/// belongs to the n-th placeholder of `where_clause()`.
#[derive(Debug, Clone, Default)]
pub struct QuerySpec {
    conditions: Vec<String>,
    binds: Vec<BindValue>,
}

impl QuerySpec {
    fn push_text(&mut self, condition: &str, value: String) {
        self.conditions.push(condition.to_string());
        self.binds.push(BindValue::Text(value));
    }

    fn push_int(&mut self, condition: &str, value: i64) {
        self.conditions.push(condition.to_string());
        self.binds.push(BindValue::Int(value));
    }

    pub fn is_unconstrained(&self) -> bool {
        self.conditions.is_empty()
    }

    /// SQL `WHERE` fragment, empty when no criteria are present.
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn binds(&self) -> &[BindValue] {
        &self.binds
    }
}
