//! Error types that can be emitted from this library
//!

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// file is an invalid ies table
    #[error("file is an invalid ies table")]
    InvalidTable,

    /// a column descriptor declared a type this crate does not know
    #[error("column {column:?} has unknown type {kind}")]
    UnknownColumnType {
        /// Primary label of the offending column
        column: String,
        /// The raw type value found on disk
        kind: u16,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
