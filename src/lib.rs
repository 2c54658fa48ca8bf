//! # NMEA 0183 Checksum Repair
//!
//! This library validates and repairs the checksums of NMEA-like sentences with the format:
//! `$HHH,D1,D2,...,Dn*CC`
//!
//! Every sentence written back carries a checksum matching its payload:
//! - A sentence whose checksum already matches is kept byte for byte
//! - A sentence whose checksum does not match gets the computed checksum, in lowercase hex
//! - A line with no `*` or with a non-hex checksum field is reported, never guessed at
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_checksum::{ErrorPolicy, LineEndingMode, RepairOptions, process, repair_lines};
//!
//! // A single sentence
//! assert_eq!(process("$GPGGA,123519,4807.038,N*57\n").unwrap(), "$GPGGA,123519,4807.038,N*27");
//!
//! // A whole log, skipping lines that are not sentences
//! let input = "$GPGGA,123519,4807.038,N*57\r\ngarbage\r\n";
//! let options = RepairOptions::new(ErrorPolicy::Skip, LineEndingMode::Crlf);
//! let mut output = Vec::new();
//!
//! let report = repair_lines(input.as_bytes(), &mut output, options).unwrap();
//! assert_eq!(output, b"$GPGGA,123519,4807.038,N*27\n");
//! assert_eq!(report.skipped, 1);
//! ```

pub mod checksum;
#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod parsing;
mod repair;
mod sentence;

pub use checksum::{Verdict, checksum, format_checksum};
pub use error::{Error, RepairError};
pub use parsing::LineEndingMode;
pub use repair::*;
pub use sentence::*;

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
