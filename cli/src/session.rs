//! The interactive clerk session.
//!
//! [`ClerkSession`] owns one [`BookQuery`] over a single long-lived
//! connection for the whole session, re-displays the menu after every
//! action, and drives the four clerk operations through the
//! prompt-validate-retry helpers in [`crate::prompt`].
//!
//! Input-format and business-rule violations (bad ids, negative
//! quantities, duplicate or missing ids) re-prompt unboundedly; storage
//! failures abort the session with no partial effects committed.

use bookstore_core::{Book, validate_id};
use bookstore_sqlite::{BookQuery, SqliteError};
use rusqlite::Connection;
use std::io::{BufRead, Write};

use crate::prompt::{SessionError, Verdict, prompt_until};

const MENU: &str = "\nBookstore\nPlease choose an option:\n\
1. Enter book\n\
2. Update book\n\
3. Delete book\n\
4. Search books\n\
0. Exit\n: ";

const ID_FORMAT_MESSAGE: &str = "The id must be a 4-digit integer. Please try again.";

/// Interactive menu session over one open catalog connection.
///
/// Generic over its reader and writer so tests can script a whole session
/// against in-memory buffers.
pub struct ClerkSession<'conn, R, W> {
    query: BookQuery<'conn>,
    input: R,
    output: W,
}

impl<'conn, R: BufRead, W: Write> ClerkSession<'conn, R, W> {
    /// Creates a session over the given connection and table prefix.
    pub fn new(
        conn: &'conn Connection,
        prefix: &str,
        input: R,
        output: W,
    ) -> Result<Self, SqliteError> {
        let query = BookQuery::new(conn, prefix)?;
        Ok(Self {
            query,
            input,
            output,
        })
    }

    /// Runs the menu loop until the clerk chooses exit.
    ///
    /// Returns normally on choice `0` so the connection closes cleanly
    /// when the session is dropped.
    pub fn run(&mut self) -> Result<(), SessionError> {
        loop {
            let choice = prompt_until(&mut self.input, &mut self.output, MENU, |line| {
                Ok(Verdict::Accept(line.to_string()))
            })?;

            match choice.as_str() {
                "1" => self.enter_book()?,
                "2" => self.update_book()?,
                "3" => self.delete_book()?,
                "4" => self.search_books()?,
                "0" => {
                    writeln!(self.output, "Closing Bookstore program.")?;
                    return Ok(());
                }
                _ => writeln!(
                    self.output,
                    "You have entered an invalid choice. Please try again."
                )?,
            }
        }
    }

    /// Menu choice 1: create a new record.
    fn enter_book(&mut self) -> Result<(), SessionError> {
        let query = &self.query;
        let id = prompt_until(
            &mut self.input,
            &mut self.output,
            "Enter a new 4-digit id for the book: ",
            |line| {
                let Some(id) = parse_four_digit_id(line) else {
                    return Ok(Verdict::Reject(ID_FORMAT_MESSAGE.to_string()));
                };
                if query.book_exists(id)? {
                    Ok(Verdict::Reject(
                        "This id already exists. Please enter a different id.".to_string(),
                    ))
                } else {
                    Ok(Verdict::Accept(id))
                }
            },
        )?;

        let title = self.read_text("Enter a title for the book: ")?;
        let author = self.read_text("Enter the author of the book: ")?;
        let quantity = self.read_quantity("Enter the quantity: ")?;

        let book = Book::new(id, title, author, quantity);
        self.query.insert_book(&book)?;
        writeln!(
            self.output,
            "{} by {} successfully added!",
            book.title, book.author
        )?;
        Ok(())
    }

    /// Menu choice 2: overwrite title, author, and quantity of a record.
    fn update_book(&mut self) -> Result<(), SessionError> {
        let id = self.read_existing_id()?;
        let title = self.read_text("Enter the updated title of the book: ")?;
        let author = self.read_text("Enter the updated author of the book: ")?;
        let quantity = self.read_quantity("Enter the updated quantity: ")?;

        self.query
            .update_book(&Book::new(id, title, author, quantity))?;
        writeln!(self.output, "Book updated successfully!")?;
        Ok(())
    }

    /// Menu choice 3: remove a record.
    fn delete_book(&mut self) -> Result<(), SessionError> {
        let id = self.read_existing_id()?;
        self.query.delete_book(id)?;
        writeln!(self.output, "{id} record deleted from database.")?;
        Ok(())
    }

    /// Menu choice 4: read-only lookup of a record.
    fn search_books(&mut self) -> Result<(), SessionError> {
        let id = self.read_existing_id()?;
        if let Some(book) = self.query.get_book(id)? {
            writeln!(
                self.output,
                "Title:\t{}\nAuthor:\t{}\nQty:\t{}",
                book.title, book.author, book.quantity
            )?;
        }
        Ok(())
    }

    /// Prompts for a four-digit id that is present in the store.
    fn read_existing_id(&mut self) -> Result<i64, SessionError> {
        let query = &self.query;
        prompt_until(
            &mut self.input,
            &mut self.output,
            "Enter a 4-digit id for the book: ",
            |line| {
                let Some(id) = parse_four_digit_id(line) else {
                    return Ok(Verdict::Reject(ID_FORMAT_MESSAGE.to_string()));
                };
                if query.book_exists(id)? {
                    Ok(Verdict::Accept(id))
                } else {
                    Ok(Verdict::Reject(
                        "This id doesn't exist. Please enter a different id.".to_string(),
                    ))
                }
            },
        )
    }

    /// Prompts for a non-negative integer quantity. No upper bound.
    fn read_quantity(&mut self, prompt: &str) -> Result<i64, SessionError> {
        prompt_until(&mut self.input, &mut self.output, prompt, |line| {
            Ok(match line.parse::<i64>() {
                Ok(quantity) if quantity >= 0 => Verdict::Accept(quantity),
                Ok(_) => Verdict::Reject("Please type a positive integer (minimum 0)".to_string()),
                Err(_) => Verdict::Reject("Please enter an integer for qty.".to_string()),
            })
        })
    }

    /// Prompts for a free-form line (title or author). Any input is accepted.
    fn read_text(&mut self, prompt: &str) -> Result<String, SessionError> {
        prompt_until(&mut self.input, &mut self.output, prompt, |line| {
            Ok(Verdict::Accept(line.to_string()))
        })
    }
}

/// Parses a line as a four-digit book id; `None` for non-integers and
/// integers outside 1000–9999 (including negatives).
fn parse_four_digit_id(line: &str) -> Option<i64> {
    line.parse::<i64>()
        .ok()
        .filter(|&id| validate_id(id).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_core::starter_catalog;
    use bookstore_sqlite::Migration;
    use std::io::Cursor;

    /// In-memory connection with the table created and the starter
    /// catalog seeded.
    fn seeded_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        let mut migration = Migration::new(conn, "bs_").unwrap();
        migration.up().unwrap();
        migration.seed(&starter_catalog()).unwrap();
        migration.into_connection()
    }

    /// Runs a scripted session and returns everything it printed.
    fn run_script(conn: &Connection, script: &str) -> String {
        let input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let mut session = ClerkSession::new(conn, "bs_", input, &mut output).unwrap();
        session.run().unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_four_digit_id() {
        assert_eq!(parse_four_digit_id("3001"), Some(3001));
        assert_eq!(parse_four_digit_id("999"), None);
        assert_eq!(parse_four_digit_id("10000"), None);
        assert_eq!(parse_four_digit_id("-999"), None);
        assert_eq!(parse_four_digit_id("abcd"), None);
    }

    #[test]
    fn test_exit_choice_closes_session() {
        let conn = seeded_conn();
        let out = run_script(&conn, "0\n");
        assert!(out.contains("Closing Bookstore program."));
    }

    #[test]
    fn test_invalid_menu_choice_re_prompts() {
        let conn = seeded_conn();
        let out = run_script(&conn, "7\n0\n");
        assert!(out.contains("You have entered an invalid choice. Please try again."));
        assert!(out.contains("Closing Bookstore program."));
    }

    #[test]
    fn test_enter_book_then_search() {
        let conn = seeded_conn();
        let out = run_script(&conn, "1\n4006\nEmma\nJane Austen\n5\n4\n4006\n0\n");
        assert!(out.contains("Emma by Jane Austen successfully added!"));
        assert!(out.contains("Title:\tEmma\nAuthor:\tJane Austen\nQty:\t5"));
    }

    #[test]
    fn test_enter_book_rejects_bad_ids_until_valid() {
        let conn = seeded_conn();
        // Non-integer, three digits, negative, duplicate, then a fresh id.
        let out = run_script(&conn, "1\nabc\n999\n-999\n3001\n4006\nEmma\nJane Austen\n5\n0\n");
        assert_eq!(
            out.matches("The id must be a 4-digit integer. Please try again.")
                .count(),
            3
        );
        assert!(out.contains("This id already exists. Please enter a different id."));
        assert!(out.contains("Emma by Jane Austen successfully added!"));
    }

    #[test]
    fn test_quantity_prompt_rejects_negative_and_accepts_zero() {
        let conn = seeded_conn();
        let out = run_script(&conn, "1\n4006\nEmma\nJane Austen\n-1\nx\n0\n4\n4006\n0\n");
        assert!(out.contains("Please type a positive integer (minimum 0)"));
        assert!(out.contains("Please enter an integer for qty."));
        assert!(out.contains("Qty:\t0"));
    }

    #[test]
    fn test_update_book_overwrites_quantity() {
        let conn = seeded_conn();
        let out = run_script(
            &conn,
            "2\n3002\nHarry Potter and the Philosopher's Stone\nJ.K. Rowling\n10\n4\n3002\n0\n",
        );
        assert!(out.contains("Book updated successfully!"));
        assert!(out.contains("Qty:\t10"));
    }

    #[test]
    fn test_update_missing_id_re_prompts() {
        let conn = seeded_conn();
        let out = run_script(&conn, "2\n8888\n3002\nEmma\nJane Austen\n1\n0\n");
        assert!(out.contains("This id doesn't exist. Please enter a different id."));
        assert!(out.contains("Book updated successfully!"));
    }

    #[test]
    fn test_delete_then_search_reports_missing() {
        let conn = seeded_conn();
        // Delete 3002, then try to search it (rejected), fall back to 3001.
        let out = run_script(&conn, "3\n3002\n4\n3002\n3001\n0\n");
        assert!(out.contains("3002 record deleted from database."));
        assert!(out.contains("This id doesn't exist. Please enter a different id."));
        assert!(out.contains("Title:\tA Tale of Two Cities"));
    }

    #[test]
    fn test_closed_input_terminates_instead_of_spinning() {
        let conn = seeded_conn();
        let input = Cursor::new(b"1\n".to_vec());
        let mut output = Vec::new();
        let mut session = ClerkSession::new(&conn, "bs_", input, &mut output).unwrap();
        assert!(matches!(session.run(), Err(SessionError::InputClosed)));
    }
}
