//! SQLite storage backend for the bookstore catalog.
//!
//! This crate provides a single-table SQLite schema for storing
//! [`Book`](bookstore_core::Book) records. It includes migration lifecycle
//! management, batch seeding with whole-batch conflict rollback, and a
//! high-level CRUD query interface.
//!
//! # Architecture
//!
//! The crate is organized into three modules:
//!
//! - **`schema`** — SQL generation with customizable table prefixes
//! - **`migration`** — Lifecycle operations (up/down/seed/refresh/status)
//! - **`query`** — Runtime record access (CRUD operations)
//!
//! # Quick start — migrations
//!
//! ```no_run
//! use bookstore_sqlite::Migration;
//! use bookstore_core::starter_catalog;
//! use rusqlite::Connection;
//!
//! let conn = Connection::open("ebookstore.db").unwrap();
//! let mut migration = Migration::new(conn, "bs_").unwrap();
//!
//! migration.up().unwrap();
//! let report = migration.seed(&starter_catalog()).unwrap();
//! println!("Seeded {} books", report.books_inserted);
//!
//! let status = migration.status().unwrap();
//! println!("Books: {}", status.book_count);
//! ```
//!
//! # Quick start — queries
//!
//! ```no_run
//! use bookstore_sqlite::BookQuery;
//! use bookstore_core::Book;
//! use rusqlite::Connection;
//!
//! let conn = Connection::open("ebookstore.db").unwrap();
//! let query = BookQuery::new(&conn, "bs_").unwrap();
//!
//! query.insert_book(&Book::new(3006, "Emma", "Jane Austen", 5)).unwrap();
//! if let Some(book) = query.get_book(3006).unwrap() {
//!     println!("{} by {}", book.title, book.author);
//! }
//! ```
//!
//! # Table prefix customization
//!
//! The table name is prefixed with a configurable string, allowing multiple
//! isolated catalogs within the same SQLite database. Prefixes must contain
//! only alphanumeric characters and underscores.

mod error;
mod migration;
mod query;
mod schema;

pub use error::{Result, SqliteError};
pub use migration::{Migration, MigrationStatus, SeedReport};
pub use query::BookQuery;
