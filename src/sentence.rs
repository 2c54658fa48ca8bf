//! # Sentence Checksum Processing
//!
//! This module turns one raw line into a checksum-valid sentence. A sentence is
//! decomposed as `$payload*checksum`:
//!
//! - the `$` start marker and line terminators around it are framing, not data
//! - the payload is everything up to the first `*`
//! - the checksum field is everything after it, and must be hex digits
//!
//! A sentence whose declared checksum already matches is returned with its
//! original checksum text. Otherwise the checksum is replaced by the computed
//! value in lowercase hex, and the payload is left untouched.

use crate::{
    Error, Verdict, checksum, format_checksum,
    parsing::{LineEndingMode, hex_field, payload_and_field, strip_framing},
};

/// A raw line decomposed into payload and declared checksum.
///
/// Both parts borrow from the line that was parsed.
///
/// # Examples
///
/// ```rust
/// use nmea0183_checksum::{LineEndingMode, Sentence};
///
/// let sentence = Sentence::parse("$GPGGA,123519,4807.038,N*57\n", LineEndingMode::Lf).unwrap();
/// assert_eq!(sentence.payload(), "GPGGA,123519,4807.038,N");
/// assert_eq!(sentence.checksum_field(), "57");
/// assert!(!sentence.is_valid());
/// assert_eq!(sentence.repair(), "$GPGGA,123519,4807.038,N*27");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    payload: &'a str,
    checksum_field: &'a str,
}

impl<'a> Sentence<'a> {
    /// Parses a raw line, stripping framing according to `mode`.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingDelimiter`] if the line has no `*`
    /// - [`Error::InvalidChecksumDigits`] if the text after `*` is not hexadecimal
    pub fn parse(line: &'a str, mode: LineEndingMode) -> Result<Self, Error> {
        let body = strip_framing(line, mode);

        let (_, (payload, checksum_field)) =
            payload_and_field(body).map_err(|_| Error::MissingDelimiter)?;

        hex_field(checksum_field).map_err(|_| Error::InvalidChecksumDigits {
            field: checksum_field.to_owned(),
        })?;

        Ok(Sentence {
            payload,
            checksum_field,
        })
    }

    /// The data the checksum is computed over.
    pub fn payload(&self) -> &'a str {
        self.payload
    }

    /// The declared checksum, exactly as written after `*`.
    pub fn checksum_field(&self) -> &'a str {
        self.checksum_field
    }

    /// The checksum calculated from the payload.
    pub fn computed_checksum(&self) -> u32 {
        checksum(self.payload)
    }

    /// Compares the declared checksum with the computed one, as integers.
    pub fn verdict(&self) -> Verdict {
        Verdict::judge(self.checksum_field, self.computed_checksum())
    }

    /// Returns `true` if the declared checksum matches the payload.
    pub fn is_valid(&self) -> bool {
        self.verdict().is_valid()
    }

    /// Renders the checksum-valid form of this sentence.
    ///
    /// A matching checksum keeps its original casing and padding; a mismatching
    /// one is replaced by [`format_checksum`] of the computed value.
    pub fn repair(&self) -> String {
        self.repair_with_verdict().1
    }

    /// Like [`Sentence::repair`], also returning the verdict the output was built from.
    pub fn repair_with_verdict(&self) -> (Verdict, String) {
        let verdict = self.verdict();

        let repaired = match verdict {
            Verdict::Valid => format!("${}*{}", self.payload, self.checksum_field),
            Verdict::Mismatch { computed, .. } => {
                format!("${}*{}", self.payload, format_checksum(computed))
            }
        };

        (verdict, repaired)
    }
}

/// A sentence processor configured with a line ending mode.
///
/// # Examples
///
/// ```rust
/// use nmea0183_checksum::{LineEndingMode, Processor};
///
/// let processor = Processor::new(LineEndingMode::Crlf);
/// assert_eq!(processor.process("$GPGGA,data*00\r\n").unwrap(), "$GPGGA,data*6a");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Processor {
    line_ending: LineEndingMode,
}

impl Processor {
    /// Creates a processor for lines terminated as described by `line_ending`.
    pub fn new(line_ending: LineEndingMode) -> Self {
        Processor { line_ending }
    }

    /// The configured line ending mode.
    pub fn line_ending(&self) -> LineEndingMode {
        self.line_ending
    }

    /// Parses `line` into a [`Sentence`].
    pub fn parse<'a>(&self, line: &'a str) -> Result<Sentence<'a>, Error> {
        Sentence::parse(line, self.line_ending)
    }

    /// Returns the checksum-valid form of `line`.
    ///
    /// # Errors
    ///
    /// See [`Sentence::parse`].
    pub fn process(&self, line: &str) -> Result<String, Error> {
        self.parse(line).map(|sentence| sentence.repair())
    }
}

/// Returns the checksum-valid form of a raw line.
///
/// Only `$` and `\n` are stripped from the ends of the line; use a [`Processor`]
/// configured with [`LineEndingMode::Crlf`] for `\r\n` terminated input.
///
/// # Examples
///
/// ```rust
/// use nmea0183_checksum::{Error, process};
///
/// // Wrong checksum, replaced by the computed one
/// assert_eq!(process("$GPGGA,123519,4807.038,N*57\n").unwrap(), "$GPGGA,123519,4807.038,N*27");
///
/// // Already valid, returned as written
/// assert_eq!(process("$GPGGA,123519,4807.038,N*27").unwrap(), "$GPGGA,123519,4807.038,N*27");
///
/// assert_eq!(process("$NODATA\n"), Err(Error::MissingDelimiter));
/// ```
///
/// # Errors
///
/// See [`Sentence::parse`].
pub fn process(line: &str) -> Result<String, Error> {
    Processor::default().process(line)
}
