//! The prompt-validate-retry primitive.
//!
//! Every piece of clerk input goes through [`prompt_until`]: write a
//! prompt, read one line, and let a checking closure decide whether the
//! line is accepted, rejected with a message (re-prompt, unbounded
//! retries), or hit a storage failure. Storage failures are never retried;
//! they propagate immediately and abort the current menu action.

use bookstore_sqlite::SqliteError;
use std::io::{BufRead, Write};
use thiserror::Error;

/// Errors that terminate a clerk session or menu action.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading the prompt input or writing output failed.
    #[error("input/output error: {0}")]
    Io(#[from] std::io::Error),

    /// The input stream ended while a prompt was waiting for a line.
    #[error("input stream closed")]
    InputClosed,

    /// A storage operation failed; never recovered by re-prompting.
    #[error(transparent)]
    Store(#[from] SqliteError),
}

/// Outcome of checking one input line.
pub enum Verdict<T> {
    /// The line parsed and validated; stop prompting.
    Accept(T),
    /// The line is unusable; print the message and prompt again.
    Reject(String),
}

/// Prompts until `check` accepts an input line.
///
/// Each iteration writes `prompt`, reads one line, trims it, and applies
/// `check`. A [`Verdict::Reject`] prints its message and loops; there is
/// no retry limit. A storage error returned by `check` propagates
/// unchanged. End-of-input yields [`SessionError::InputClosed`] rather
/// than spinning on an empty reader.
pub fn prompt_until<R, W, T, F>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    mut check: F,
) -> Result<T, SessionError>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> Result<Verdict<T>, SqliteError>,
{
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(SessionError::InputClosed);
        }

        match check(line.trim())? {
            Verdict::Accept(value) => return Ok(value),
            Verdict::Reject(message) => writeln!(output, "{message}")?,
        }
    }
}
