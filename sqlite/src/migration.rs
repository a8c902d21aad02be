//! Migration lifecycle operations for the catalog table.
//!
//! Provides [`Migration`] for creating, dropping, and seeding the catalog.
//! All mutation operations use transactions: either all changes succeed or
//! none are applied.
//!
//! # Example
//!
//! ```no_run
//! use bookstore_sqlite::Migration;
//! use bookstore_core::starter_catalog;
//! use rusqlite::Connection;
//!
//! let conn = Connection::open("ebookstore.db").unwrap();
//! let mut migration = Migration::new(conn, "bs_").unwrap();
//!
//! // Create the table
//! migration.up().unwrap();
//!
//! // Check status
//! let status = migration.status().unwrap();
//! assert!(status.tables_exist);
//!
//! // Seed the starter catalog
//! migration.seed(&starter_catalog()).unwrap();
//!
//! // Drop and recreate
//! migration.refresh(&starter_catalog()).unwrap();
//! ```

use bookstore_core::{Book, validate_book};
use rusqlite::{Connection, params};
use tracing::{debug, info};

use crate::error::{Result, SqliteError, is_constraint_violation};
use crate::schema::{generate_drop_sql, generate_schema_sql, validate_prefix};

/// Manages the lifecycle of the catalog table.
///
/// Provides operations to create the table ([`up`](Self::up)), drop it
/// ([`down`](Self::down)), seed records ([`seed`](Self::seed)), and check
/// the current state ([`status`](Self::status)).
///
/// The migration owns its connection for the duration of the lifecycle
/// operations; [`into_connection`](Self::into_connection) hands it back
/// for follow-up queries.
pub struct Migration {
    conn: Connection,
    prefix: String,
}

impl Migration {
    /// Creates a new migration manager for the given connection and table prefix.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::InvalidPrefix`] if the prefix contains invalid characters.
    pub fn new(conn: Connection, prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        Ok(Self { conn, prefix })
    }

    /// Creates the catalog table.
    ///
    /// Uses `CREATE TABLE IF NOT EXISTS` so it is safe to call on every
    /// program startup. Executes within a transaction: a failure rolls back
    /// any partial schema and propagates to the caller.
    pub fn up(&mut self) -> Result<()> {
        let sql = generate_schema_sql(&self.prefix)?;
        let tx = self.conn.transaction()?;
        tx.execute_batch(&sql)
            .map_err(|e| SqliteError::Migration(format!("failed to create table: {e}")))?;
        tx.commit()?;
        debug!(prefix = %self.prefix, "catalog table ensured");
        Ok(())
    }

    /// Drops the catalog table.
    ///
    /// Uses `DROP TABLE IF EXISTS` so it is safe to call even if the table
    /// does not exist.
    pub fn down(&mut self) -> Result<()> {
        let sql = generate_drop_sql(&self.prefix)?;
        let tx = self.conn.transaction()?;
        tx.execute_batch(&sql)
            .map_err(|e| SqliteError::Migration(format!("failed to drop table: {e}")))?;
        tx.commit()?;
        debug!(prefix = %self.prefix, "catalog table dropped");
        Ok(())
    }

    /// Returns the current status of the catalog.
    pub fn status(&self) -> Result<MigrationStatus> {
        let tables_exist = self.tables_exist()?;

        if !tables_exist {
            return Ok(MigrationStatus {
                tables_exist: false,
                book_count: 0,
            });
        }

        let book_count = self.count_books()?;
        Ok(MigrationStatus {
            tables_exist,
            book_count,
        })
    }

    /// Seeds the catalog with the given records inside a single transaction.
    ///
    /// Every record is validated before any row is written; an invalid
    /// record aborts the whole batch with [`SqliteError::InvalidBook`].
    ///
    /// Conflict handling is deliberately all-or-nothing: on the first id
    /// that already exists in the store, the entire batch is rolled back
    /// and the report carries the conflicting id with zero rows inserted.
    /// Re-seeding an already-seeded store is therefore an observable no-op,
    /// but a partially overlapping seed list discards even its novel
    /// records for that run.
    pub fn seed(&mut self, books: &[Book]) -> Result<SeedReport> {
        for book in books {
            if let Some(err) = validate_book(book).into_iter().next() {
                return Err(SqliteError::InvalidBook(err));
            }
        }

        let insert_sql = format!(
            "INSERT INTO {}books (id, title, author, quantity) VALUES (?1, ?2, ?3, ?4)",
            self.prefix
        );
        let tx = self.conn.transaction()?;
        let mut inserted = 0usize;

        for book in books {
            match tx.execute(
                &insert_sql,
                params![book.id, book.title, book.author, book.quantity],
            ) {
                Ok(_) => inserted += 1,
                Err(e) if is_constraint_violation(&e) => {
                    tx.rollback()?;
                    info!(id = book.id, "seed conflict, batch rolled back");
                    return Ok(SeedReport {
                        books_inserted: 0,
                        conflicting_id: Some(book.id),
                    });
                }
                Err(e) => return Err(e.into()),
            }
        }

        tx.commit()?;
        info!(books = inserted, "catalog seeded");
        Ok(SeedReport {
            books_inserted: inserted,
            conflicting_id: None,
        })
    }

    /// Drops the table, recreates it, and seeds the given records.
    ///
    /// Equivalent to calling [`down`](Self::down), [`up`](Self::up), then
    /// [`seed`](Self::seed) in sequence.
    pub fn refresh(&mut self, books: &[Book]) -> Result<SeedReport> {
        self.down()?;
        self.up()?;
        self.seed(books)
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Consumes the migration and returns the underlying connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    /// Checks whether the catalog table exists.
    fn tables_exist(&self) -> Result<bool> {
        let table_name = format!("{}books", self.prefix);
        let mut stmt = self
            .conn
            .prepare("SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1")?;
        let count: i64 = stmt.query_row([&table_name], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Counts rows in the catalog table.
    fn count_books(&self) -> Result<usize> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT COUNT(*) FROM {}books", self.prefix))?;
        let count: i64 = stmt.query_row([], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Status of the current catalog state.
///
/// Returned by [`Migration::status`], providing a snapshot of whether the
/// table exists and how many records it holds.
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    /// Whether the catalog table exists in the database.
    pub tables_exist: bool,
    /// Number of book records stored.
    pub book_count: usize,
}

/// Report of a seed operation.
///
/// When `conflicting_id` is set, the batch hit an id that already existed,
/// the whole transaction was rolled back, and `books_inserted` is zero.
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    /// Number of records inserted.
    pub books_inserted: usize,
    /// First id that conflicted with an existing record, if any.
    pub conflicting_id: Option<i64>,
}
