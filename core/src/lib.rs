//! Core types and validation for the bookstore catalog.
//!
//! This crate defines the foundational types for the clerk tool:
//!
//! - [`Book`] — one catalog record (id, title, author, quantity).
//! - [`ValidationError`] — the business rules a record must satisfy.
//! - [`starter_catalog`] — the fixed dataset loaded on first startup.
//!
//! Validation ([`validate_id`], [`validate_quantity`], [`validate_book`])
//! enforces the two record invariants: ids are exactly four decimal digits
//! (1000–9999) and quantities are never negative. The rules live here, not
//! in the prompt layer, so every write path — interactive entry, seed
//! files, direct library use — goes through the same checks.
//!
//! # Example
//!
//! ```
//! use bookstore_core::*;
//!
//! let book = Book::new(3002, "Emma", "Jane Austen", 5);
//! assert!(validate_book(&book).is_empty());
//!
//! // Negative ids never pass: the check is numeric range, not digit count.
//! let bad = Book::new(-999, "Oops", "Nobody", 1);
//! assert!(!validate_book(&bad).is_empty());
//! ```

mod seed;
mod types;
mod validate;

pub use seed::starter_catalog;
pub use types::Book;
pub use validate::{
    MAX_BOOK_ID, MIN_BOOK_ID, ValidationError, validate_book, validate_id, validate_quantity,
};
