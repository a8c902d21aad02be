//! The book record type.
//!
//! [`Book`] is the sole entity of the catalog. It is designed for
//! serialization with [`serde`] and round-trips through JSON seed files
//! and SQLite rows.

use serde::{Deserialize, Serialize};

/// One book record in the catalog.
///
/// The `id` is the primary key and is immutable once a record is stored;
/// the update operation overwrites only `title`, `author`, and `quantity`.
///
/// # Examples
///
/// ```
/// use bookstore_core::Book;
///
/// let book = Book::new(3001, "A Tale of Two Cities", "Charles Dickens", 30);
/// assert_eq!(book.id, 3001);
/// assert_eq!(book.quantity, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Four-digit record id (1000–9999).
    pub id: i64,
    /// Book title, free-form.
    pub title: String,
    /// Book author, free-form.
    pub author: String,
    /// Copies in stock, never negative.
    pub quantity: i64,
}

impl Book {
    /// Creates a new book record.
    ///
    /// Does not validate; see [`validate_book`](crate::validate_book) for
    /// the id-range and quantity rules.
    pub fn new(id: i64, title: impl Into<String>, author: impl Into<String>, quantity: i64) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            quantity,
        }
    }
}
