//! # Error Types
//!
//! This module defines the error types used throughout the checksum repair library.

use std::io;

use thiserror::Error;

/// Represents all possible errors that can occur while decomposing a single sentence.
///
/// A sentence that produces one of these errors has no identifiable payload or
/// declared checksum, so no checksum is ever computed or substituted for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The line contains no `*` separating the payload from the checksum.
    #[error("missing '*' checksum delimiter")]
    MissingDelimiter,

    /// The text following `*` is not a base-16 unsigned integer.
    ///
    /// Contains the offending checksum field, verbatim.
    #[error("invalid checksum digits {field:?}")]
    InvalidChecksumDigits {
        /// The checksum field as it appeared after the delimiter
        field: String,
    },
}

impl Error {
    /// Name of the error kind, as reported to users.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MissingDelimiter => "MissingDelimiter",
            Error::InvalidChecksumDigits { .. } => "InvalidChecksumDigits",
        }
    }
}

/// Errors raised while driving a line source into a line sink.
#[derive(Debug, Error)]
pub enum RepairError {
    /// A malformed sentence stopped the run.
    ///
    /// Only produced under [`ErrorPolicy::Abort`](crate::ErrorPolicy::Abort).
    #[error("line {line}: {}: {source}", .source.kind())]
    Sentence {
        /// 1-based index of the offending input line
        line: usize,
        /// What was wrong with it
        #[source]
        source: Error,
    },

    /// Reading the source or writing the sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
