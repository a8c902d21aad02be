//! Record validation.
//!
//! Enforces the two invariants of a catalog record: the id is exactly four
//! decimal digits (1000–9999) and the quantity is non-negative. The range
//! check is numeric, so negative ids such as `-999` are rejected even
//! though their string form happens to be four characters wide.
//!
//! # Examples
//!
//! ```
//! use bookstore_core::*;
//!
//! assert!(validate_id(3001).is_ok());
//! assert!(validate_id(-999).is_err());
//!
//! assert!(validate_quantity(0).is_ok());
//! assert!(validate_quantity(-1).is_err());
//! ```

use thiserror::Error;

use crate::Book;

/// Smallest valid book id (the first four-digit integer).
pub const MIN_BOOK_ID: i64 = 1000;

/// Largest valid book id.
pub const MAX_BOOK_ID: i64 = 9999;

/// Business-rule violations for a book record.
///
/// Each variant describes one broken invariant. The `Display` impl
/// provides a human-readable message suitable for the clerk prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Id is not a four-digit integer (1000–9999).
    #[error("id {0} is not a 4-digit integer (expected 1000-9999)")]
    IdOutOfRange(i64),
    /// Quantity is negative.
    #[error("quantity {0} is negative (minimum 0)")]
    NegativeQuantity(i64),
}

/// Validates that an id is exactly four decimal digits.
pub fn validate_id(id: i64) -> Result<(), ValidationError> {
    if (MIN_BOOK_ID..=MAX_BOOK_ID).contains(&id) {
        Ok(())
    } else {
        Err(ValidationError::IdOutOfRange(id))
    }
}

/// Validates that a quantity is non-negative. There is no upper bound.
pub fn validate_quantity(quantity: i64) -> Result<(), ValidationError> {
    if quantity < 0 {
        Err(ValidationError::NegativeQuantity(quantity))
    } else {
        Ok(())
    }
}

/// Validates a full record, collecting every broken invariant.
///
/// Returns an empty vector when the record is valid.
///
/// # Examples
///
/// ```
/// use bookstore_core::*;
///
/// let book = Book::new(42, "Short id", "Nobody", -3);
/// let errors = validate_book(&book);
/// assert_eq!(errors.len(), 2);
/// ```
pub fn validate_book(book: &Book) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Err(err) = validate_id(book.id) {
        errors.push(err);
    }
    if let Err(err) = validate_quantity(book.quantity) {
        errors.push(err);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id_accepts_bounds() {
        assert!(validate_id(MIN_BOOK_ID).is_ok());
        assert!(validate_id(MAX_BOOK_ID).is_ok());
        assert!(validate_id(3001).is_ok());
    }

    #[test]
    fn test_validate_id_rejects_out_of_range() {
        assert_eq!(validate_id(999), Err(ValidationError::IdOutOfRange(999)));
        assert_eq!(
            validate_id(10000),
            Err(ValidationError::IdOutOfRange(10000))
        );
    }

    #[test]
    fn test_validate_id_rejects_negative_four_char_id() {
        // "-999" is four characters long but is not a four-digit integer.
        assert_eq!(validate_id(-999), Err(ValidationError::IdOutOfRange(-999)));
    }

    #[test]
    fn test_validate_quantity_boundary() {
        assert!(validate_quantity(0).is_ok());
        assert_eq!(
            validate_quantity(-1),
            Err(ValidationError::NegativeQuantity(-1))
        );
    }

    #[test]
    fn test_validate_book_collects_all_errors() {
        let book = Book::new(1, "x", "y", -1);
        let errors = validate_book(&book);
        assert!(errors.contains(&ValidationError::IdOutOfRange(1)));
        assert!(errors.contains(&ValidationError::NegativeQuantity(-1)));
    }

    #[test]
    fn test_validate_book_accepts_valid_record() {
        let book = Book::new(3005, "Alice in Wonderland", "Lewis Carroll", 12);
        assert!(validate_book(&book).is_empty());
    }
}
