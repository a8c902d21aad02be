//! Runtime record access via SQLite queries.
//!
//! Provides [`BookQuery`] for CRUD operations on the catalog. The query
//! interface borrows one long-lived connection rather than opening and
//! closing the database per call; callers decide the connection lifetime.
//!
//! # Example
//!
//! ```no_run
//! use bookstore_sqlite::BookQuery;
//! use bookstore_core::Book;
//! use rusqlite::Connection;
//!
//! let conn = Connection::open("ebookstore.db").unwrap();
//! let query = BookQuery::new(&conn, "bs_").unwrap();
//!
//! // Insert a record
//! query.insert_book(&Book::new(3006, "Emma", "Jane Austen", 5)).unwrap();
//!
//! // Retrieve it
//! let loaded = query.get_book(3006).unwrap();
//! assert!(loaded.is_some());
//!
//! // Delete it
//! query.delete_book(3006).unwrap();
//! ```

use bookstore_core::{Book, validate_id, validate_quantity};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::error::{Result, SqliteError, is_constraint_violation};
use crate::schema::validate_prefix;

/// Query interface for reading and writing book records in SQLite.
///
/// Wraps a connection and table prefix, providing the four clerk
/// operations plus the existence probe the input-validation loops use.
/// Every mutation is a single statement, committed by SQLite's autocommit;
/// a storage failure leaves no partial effects and is never retried here.
///
/// # Examples
///
/// ```no_run
/// use bookstore_sqlite::BookQuery;
/// use bookstore_core::Book;
/// use rusqlite::Connection;
///
/// let conn = Connection::open("ebookstore.db").unwrap();
/// let query = BookQuery::new(&conn, "bs_").unwrap();
///
/// query.insert_book(&Book::new(3006, "Emma", "Jane Austen", 5)).unwrap();
/// assert!(query.book_exists(3006).unwrap());
///
/// let all = query.get_all_books().unwrap();
/// println!("Catalog holds {} books", all.len());
/// ```
pub struct BookQuery<'a> {
    conn: &'a Connection,
    prefix: String,
}

impl<'a> BookQuery<'a> {
    /// Creates a new query interface for the given connection and table prefix.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::InvalidPrefix`] if the prefix is invalid.
    pub fn new(conn: &'a Connection, prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        Ok(Self { conn, prefix })
    }

    /// Loads a single book by id.
    ///
    /// Returns `None` if no record with the given id exists.
    pub fn get_book(&self, id: i64) -> Result<Option<Book>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT id, title, author, quantity FROM {}books WHERE id = ?1",
            self.prefix
        ))?;
        let book = stmt
            .query_row(params![id], |row| {
                Ok(Book {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    author: row.get(2)?,
                    quantity: row.get(3)?,
                })
            })
            .optional()?;
        Ok(book)
    }

    /// Loads all books ordered by id.
    ///
    /// Returns an empty vector if the catalog is empty.
    pub fn get_all_books(&self) -> Result<Vec<Book>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT id, title, author, quantity FROM {}books ORDER BY id",
            self.prefix
        ))?;
        let books = stmt
            .query_map([], |row| {
                Ok(Book {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    author: row.get(2)?,
                    quantity: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(books)
    }

    /// Checks whether a book with the given id exists.
    pub fn book_exists(&self, id: i64) -> Result<bool> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT COUNT(*) FROM {}books WHERE id = ?1",
            self.prefix
        ))?;
        let count: i64 = stmt.query_row(params![id], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Inserts a new book record.
    ///
    /// The record is validated first; nothing is written when validation
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::DuplicateId`] if a record with the same id
    /// already exists, leaving the existing record unmodified.
    pub fn insert_book(&self, book: &Book) -> Result<()> {
        validate_id(book.id)?;
        validate_quantity(book.quantity)?;

        self.conn
            .execute(
                &format!(
                    "INSERT INTO {}books (id, title, author, quantity) VALUES (?1, ?2, ?3, ?4)",
                    self.prefix
                ),
                params![book.id, book.title, book.author, book.quantity],
            )
            .map_err(|e| {
                if is_constraint_violation(&e) {
                    SqliteError::DuplicateId(book.id)
                } else {
                    e.into()
                }
            })?;
        debug!(id = book.id, "book inserted");
        Ok(())
    }

    /// Overwrites title, author, and quantity of the record with the
    /// book's id. The id itself is immutable.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::BookNotFound`] when no record matches,
    /// creating nothing as a side effect.
    pub fn update_book(&self, book: &Book) -> Result<()> {
        validate_id(book.id)?;
        validate_quantity(book.quantity)?;

        let rows = self.conn.execute(
            &format!(
                "UPDATE {}books SET title = ?1, author = ?2, quantity = ?3 WHERE id = ?4",
                self.prefix
            ),
            params![book.title, book.author, book.quantity, book.id],
        )?;

        if rows == 0 {
            return Err(SqliteError::BookNotFound(book.id));
        }
        debug!(id = book.id, "book updated");
        Ok(())
    }

    /// Removes the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::BookNotFound`] when no record matches.
    pub fn delete_book(&self, id: i64) -> Result<()> {
        let rows = self.conn.execute(
            &format!("DELETE FROM {}books WHERE id = ?1", self.prefix),
            params![id],
        )?;

        if rows == 0 {
            return Err(SqliteError::BookNotFound(id));
        }
        debug!(id, "book deleted");
        Ok(())
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        self.conn
    }
}
