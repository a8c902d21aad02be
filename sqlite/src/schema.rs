//! SQL schema generation with customizable table prefixes.
//!
//! Generates the `CREATE TABLE` statement for the catalog in SQLite. The
//! table name is prefixed with a configurable string to allow multiple
//! isolated catalogs in the same database.
//!
//! # Table structure
//!
//! A single table holds the whole catalog:
//!
//! - `{prefix}books` — `id INTEGER PRIMARY KEY, title TEXT, author TEXT,
//!   quantity INTEGER`
//!
//! Quantity carries a `CHECK (quantity >= 0)` constraint so the
//! never-negative invariant holds even for writes that bypass the Rust
//! validation layer. The four-digit id rule is deliberately not expressed
//! in SQL; it is an input-contract rule owned by `bookstore-core`.
//!
//! # Custom prefix
//!
//! Prefixes must contain only alphanumeric characters and underscores.
//! This enables multiple isolated catalogs (e.g., `prod_`, `test_`)
//! within the same SQLite database.

use crate::error::{Result, SqliteError};

/// Validates that a table prefix contains only alphanumeric characters and underscores.
pub(crate) fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Err(SqliteError::InvalidPrefix(prefix.to_string()));
    }
    if !prefix.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(SqliteError::InvalidPrefix(prefix.to_string()));
    }
    Ok(())
}

/// Generates the SQL schema for the catalog table with the given prefix.
///
/// Uses `CREATE TABLE IF NOT EXISTS` so the statement is idempotent and
/// safe to run on every program startup.
///
/// # Errors
///
/// Returns [`SqliteError::InvalidPrefix`] if the prefix contains characters
/// other than alphanumerics and underscores, or if it is empty.
pub fn generate_schema_sql(prefix: &str) -> Result<String> {
    validate_prefix(prefix)?;

    let sql = format!(
        r#"
CREATE TABLE IF NOT EXISTS {prefix}books (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    quantity INTEGER NOT NULL CHECK (quantity >= 0)
);
"#
    );

    Ok(sql)
}

/// Generates SQL to drop the catalog table.
///
/// # Errors
///
/// Returns [`SqliteError::InvalidPrefix`] if the prefix is invalid.
pub fn generate_drop_sql(prefix: &str) -> Result<String> {
    validate_prefix(prefix)?;

    Ok(format!("DROP TABLE IF EXISTS {prefix}books;\n"))
}
