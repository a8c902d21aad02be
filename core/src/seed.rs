//! The fixed starter dataset.

use crate::Book;

/// Returns the built-in starter catalog loaded on first startup.
///
/// Every record satisfies the validation rules, so seeding a fresh store
/// with this list always succeeds.
pub fn starter_catalog() -> Vec<Book> {
    vec![
        Book::new(3001, "A Tale of Two Cities", "Charles Dickens", 30),
        Book::new(
            3002,
            "Harry Potter and the Philosopher's Stone",
            "J.K. Rowling",
            40,
        ),
        Book::new(
            3003,
            "The Lion, the Witch and the Wardrobe",
            "C. S. Lewis",
            25,
        ),
        Book::new(3004, "The Lord of the Rings", "J.R.R Tolkien", 37),
        Book::new(3005, "Alice in Wonderland", "Lewis Carroll", 12),
    ]
}
