//! # Parsing Utilities
//!
//! This module splits a raw line into the pieces the checksum is computed over:
//! the framing characters around the sentence, the payload, and the declared
//! checksum field.

use nom::{
    IResult, Parser,
    bytes::complete::take_till,
    character::complete::{char, hex_digit1},
    combinator::{all_consuming, rest},
    sequence::separated_pair,
};

/// Defines which line terminators are removed from the ends of a raw line.
///
/// Log files written on DOS-like hosts end every line with `\r\n`. In the
/// default mode the `\r` is left in place and ends up in the checksum field,
/// where it is reported as invalid digits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineEndingMode {
    /// Only `\n` is treated as a terminator.
    #[default]
    Lf,

    /// `\r` is also treated as a terminator, at the end of the line only.
    Crlf,
}

/// Strips the sentence start marker and line terminators from both ends of `line`.
///
/// `$` and `\n` are removed repeatedly from each end until neither end holds
/// one. A `$` inside the sentence is kept. In [`LineEndingMode::Crlf`] any
/// trailing `\r` is removed as well, while a leading `\r` stays in the payload.
///
/// # Examples
///
/// ```rust
/// use nmea0183_checksum::{LineEndingMode, parsing::strip_framing};
///
/// assert_eq!(strip_framing("$GPGGA,data*6A\n", LineEndingMode::Lf), "GPGGA,data*6A");
/// assert_eq!(strip_framing("$A$B*00$\n\n", LineEndingMode::Lf), "A$B*00");
/// assert_eq!(strip_framing("$A*41\r\n", LineEndingMode::Lf), "A*41\r");
/// assert_eq!(strip_framing("$A*41\r\n", LineEndingMode::Crlf), "A*41");
/// assert_eq!(strip_framing("\r$A*41\r\n", LineEndingMode::Crlf), "\r$A*41");
/// ```
pub fn strip_framing(line: &str, mode: LineEndingMode) -> &str {
    let line = match mode {
        LineEndingMode::Lf => line,
        LineEndingMode::Crlf => line.trim_end_matches(['$', '\r', '\n']),
    };

    line.trim_matches(['$', '\n'])
}

/// Splits a stripped sentence on its first `*` into payload and checksum field.
///
/// The checksum field is everything after the first `*`, including any later
/// `*`. Fails if the sentence contains no `*` at all.
///
/// # Examples
///
/// ```rust
/// use nmea0183_checksum::parsing::payload_and_field;
///
/// let result: nom::IResult<_, _> = payload_and_field("GPGGA,data*6A");
/// assert_eq!(result, Ok(("", ("GPGGA,data", "6A"))));
///
/// let result: nom::IResult<_, _> = payload_and_field("A*1*2");
/// assert_eq!(result, Ok(("", ("A", "1*2"))));
///
/// let result: nom::IResult<_, _> = payload_and_field("NODATA");
/// assert!(result.is_err());
/// ```
pub fn payload_and_field(i: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(take_till(|c: char| c == '*'), char('*'), rest).parse(i)
}

/// Accepts a checksum field only if it is made entirely of hex digits.
///
/// At least one digit is required, and no sign, prefix or whitespace is allowed.
///
/// # Examples
///
/// ```rust
/// use nmea0183_checksum::parsing::hex_field;
///
/// let result: nom::IResult<_, _> = hex_field("01A");
/// assert_eq!(result, Ok(("", "01A")));
///
/// let result: nom::IResult<_, _> = hex_field("ZZ");
/// assert!(result.is_err());
///
/// let result: nom::IResult<_, _> = hex_field(" 1A");
/// assert!(result.is_err());
/// ```
pub fn hex_field(i: &str) -> IResult<&str, &str> {
    all_consuming(hex_digit1).parse(i)
}
