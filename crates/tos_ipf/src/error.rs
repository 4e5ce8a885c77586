//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// file is an invalid ipf archive
    #[error("file is an invalid ipf archive")]
    InvalidArchive,

    /// the footer signature is not the one supported ipf format
    #[error("unsupported archive format: {0:02x?}")]
    UnsupportedFormat([u8; 4]),

    /// two entries share a filename when compared case-insensitively
    #[error("duplicate entry name: {0}")]
    DuplicateEntry(String),

    /// unable to find requested entry
    #[error("unable to find requested entry")]
    EntryNotFound(#[from] EntryNotFoundError),

    /// entry payload could not be decompressed
    #[error("unable to decompress entry data")]
    Decompression(#[source] std::io::Error),
}

/// Error type to provide further information when an entry has not been found
#[derive(Error, Diagnostic, Debug)]
pub enum EntryNotFoundError {
    /// at index {0}
    #[error("at index {0}")]
    Index(usize),

    /// by name {0}
    #[error("by name {0}")]
    Name(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
