//! # Checksum Arithmetic
//!
//! The NMEA 0183 checksum is the XOR of every character of the payload, the text
//! between the `$` marker and the `*` delimiter. This module computes it, renders
//! it the way repaired sentences carry it, and compares it with a declared
//! checksum field of any length.

/// Calculates the NMEA 0183 checksum for the given payload.
///
/// The accumulator starts at 0 and is XORed with the code point of each
/// character, left to right. For the printable ASCII payloads NMEA 0183 mandates
/// this is the familiar XOR of bytes and stays within `0..=0xFF`. No mask is
/// applied, so a payload carrying non-ASCII characters can yield a wider value.
///
/// # Examples
///
/// ```rust
/// use nmea0183_checksum::checksum;
///
/// assert_eq!(checksum("GPGGA,123456,data"), 0x41);
/// assert_eq!(checksum(""), 0);
/// ```
pub fn checksum(payload: &str) -> u32 {
    payload
        .chars()
        .fold(0u32, |accumulated_xor, c| accumulated_xor ^ u32::from(c))
}

/// Formats a checksum value as lowercase hexadecimal, without prefix or padding.
///
/// # Examples
///
/// ```rust
/// use nmea0183_checksum::format_checksum;
///
/// assert_eq!(format_checksum(0x41), "41");
/// assert_eq!(format_checksum(0x0A), "a");
/// assert_eq!(format_checksum(0), "0");
/// ```
pub fn format_checksum(checksum: u32) -> String {
    format!("{checksum:x}")
}

/// Decodes a declared checksum field made only of hex digits.
///
/// Leading zeros carry no value, so `"01A"` decodes like `"1a"`. A field whose
/// significant digits do not fit in a `u32` decodes to [`None`]: it names a
/// value no payload can produce, and therefore never matches.
///
/// The caller guarantees `digits` is non-empty and all ASCII hex digits.
pub(crate) fn decode_declared(digits: &str) -> Option<u32> {
    let significant = digits.trim_start_matches('0');

    if significant.is_empty() {
        return Some(0);
    }

    u32::from_str_radix(significant, 16).ok()
}

/// The outcome of comparing a declared checksum with the computed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    /// The declared checksum decodes to the computed value.
    Valid,

    /// The declared checksum does not match the payload.
    Mismatch {
        /// The decoded declared value, `None` if it exceeds any computable checksum
        declared: Option<u32>,
        /// The checksum calculated from the payload
        computed: u32,
    },
}

impl Verdict {
    /// Compares a declared hex field against a computed checksum.
    pub(crate) fn judge(digits: &str, computed: u32) -> Self {
        match decode_declared(digits) {
            Some(declared) if declared == computed => Verdict::Valid,
            declared => Verdict::Mismatch { declared, computed },
        }
    }

    /// Returns `true` if the declared checksum matched.
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}
