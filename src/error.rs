//! # Error Types
//!
//! This module defines the error type used throughout the library.
//! All fallible operations return [`Result<T>`], an alias for
//! `Result<T, CantusError>`.

use thiserror::Error;

/// Convenience alias used by every fallible operation in this crate.
pub type Result<T> = std::result::Result<T, CantusError>;

/// The error type for all Cantus container operations.
///
/// Fatal variants ([`Format`](CantusError::Format),
/// [`Truncated`](CantusError::Truncated),
/// [`KeyDerivation`](CantusError::KeyDerivation), [`Io`](CantusError::Io))
/// abort a decode immediately. [`Metadata`](CantusError::Metadata) is
/// produced by the metadata extractor and is downgraded to a warning by the
/// decode pipeline — corrupt tags never block audio recovery.
#[derive(Error, Debug)]
pub enum CantusError {
    /// I/O error from the underlying reader or writer.
    ///
    /// Wraps [`std::io::Error`]; created automatically when a read or write
    /// fails, including when a source is closed mid-decode.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Structural error in the container envelope.
    ///
    /// Unrecognized magic, or a section that cannot be interpreted. The
    /// offset is the input byte position at which parsing failed.
    #[error("format error at byte {offset}: {reason}")]
    Format {
        /// Byte offset into the input at which the error was detected.
        offset: u64,
        /// What was wrong at that position.
        reason: String,
    },

    /// A length prefix declared more bytes than the input actually holds.
    ///
    /// Truncation is always fatal: a partial section is never handed to a
    /// later stage.
    #[error(
        "truncated input: {field} at byte {offset} declares {declared} byte(s), only {available} available"
    )]
    Truncated {
        /// Name of the wire field that ran short.
        field: &'static str,
        /// Byte offset into the input at which the field begins.
        offset: u64,
        /// Length the container declared for the field.
        declared: u64,
        /// Bytes actually available before end of input.
        available: u64,
    },

    /// The key block did not yield usable key material.
    ///
    /// Bad block length, bad PKCS#7 padding, marker mismatch, or wrong
    /// key-material length — all of which indicate a wrong format revision
    /// or a corrupt file, not a user mistake.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// The metadata block could not be decoded.
    ///
    /// Checksum mismatch, undecryptable ciphertext, bad deflate stream, or
    /// malformed tag JSON. Non-fatal by policy: [`decode`](crate::decode)
    /// logs it and continues without tags.
    #[error("metadata error: {0}")]
    Metadata(String),
}
