//! Error types for the record store.
//!
//! Validation failures (`ExecuteError`) are local to one insert and leave the
//! table untouched. Pager failures are fatal: the session must stop once one
//! is seen.

use std::io;
use thiserror::Error;

/// Rejected insert. The table is unchanged.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteError {
    #[error("ID must be positive.")]
    InvalidId,

    #[error("String is too long.")]
    FieldTooLong,

    #[error("Table full.")]
    TableFull,
}

/// I/O or on-disk corruption. Never recoverable within a session.
#[derive(Debug, Error)]
pub enum PagerError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Page number out of bounds: page={page}, max={max}")]
    PageOutOfBounds { page: usize, max: usize },

    #[error("Corrupt database file: length {length} is not a whole number of rows")]
    CorruptFile { length: u64 },

    #[error("Tried to flush a page that is not loaded: page={0}")]
    EmptyPageFlush(usize),
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    Pager(#[from] PagerError),
}

impl TableError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, TableError::Pager(_))
    }
}

/// Parse failure for one input line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrepareError {
    #[error("Unrecognized keyword at start of '{0}'")]
    UnrecognizedStatement(String),

    #[error("Syntax error. Could not parse statement.")]
    SyntaxError,

    #[error("ID must be positive.")]
    InvalidId,
}

/// Reasons a session stops early.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Table(#[from] TableError),

    #[error("Session I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<PagerError> for SessionError {
    fn from(err: PagerError) -> Self {
        SessionError::Table(TableError::Pager(err))
    }
}

pub type PagerResult<T> = Result<T, PagerError>;
pub type TableResult<T> = Result<T, TableError>;
pub type SessionResult<T> = Result<T, SessionError>;
