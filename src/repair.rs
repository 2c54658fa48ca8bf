//! # Stream Repair
//!
//! Drives a line source through the sentence [`Processor`] into a line sink. Lines
//! are handled strictly one at a time and written in input order, each followed
//! by `\n`. What happens to a malformed line is decided by the [`ErrorPolicy`]
//! of the run.

use std::{
    fmt,
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{LineEndingMode, Processor, RepairError, Sentence, format_checksum};

/// Defines what the driver does with a line that cannot be parsed.
///
/// Whatever the policy, a checksum is never invented for such a line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorPolicy {
    /// Stop at the first malformed line.
    ///
    /// Nothing is written for that line or any line after it. Output written
    /// before it is flushed, and the run fails with [`RepairError::Sentence`].
    #[default]
    Abort,

    /// Drop the malformed line, log it, and continue.
    Skip,

    /// Write the malformed line as it was read, log it, and continue.
    PassThrough,
}

/// Options for a repair or check run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepairOptions {
    /// What to do with malformed lines
    pub policy: ErrorPolicy,
    /// Which terminators are stripped from each line
    pub line_ending: LineEndingMode,
}

impl RepairOptions {
    /// Creates options with the given policy and line ending mode.
    pub fn new(policy: ErrorPolicy, line_ending: LineEndingMode) -> Self {
        RepairOptions {
            policy,
            line_ending,
        }
    }
}

/// Counters describing a completed repair run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepairReport {
    /// Lines read from the source
    pub lines: usize,
    /// Sentences whose checksum was already valid
    pub unchanged: usize,
    /// Sentences whose checksum was replaced
    pub repaired: usize,
    /// Malformed lines dropped under [`ErrorPolicy::Skip`]
    pub skipped: usize,
    /// Malformed lines copied under [`ErrorPolicy::PassThrough`]
    pub passed_through: usize,
}

impl RepairReport {
    /// Number of malformed lines that did not stop the run.
    pub fn malformed(&self) -> usize {
        self.skipped + self.passed_through
    }

    /// Number of lines written to the sink.
    pub fn written(&self) -> usize {
        self.unchanged + self.repaired + self.passed_through
    }
}

impl fmt::Display for RepairReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines: {} unchanged, {} repaired, {} skipped, {} passed through",
            self.lines, self.unchanged, self.repaired, self.skipped, self.passed_through
        )
    }
}

/// Findings of a check run, which validates without writing anything.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckReport {
    /// Lines read from the source
    pub lines: usize,
    /// Sentences whose checksum is valid
    pub valid: usize,
    /// 1-based line numbers of sentences with a wrong checksum
    pub mismatched: Vec<usize>,
    /// 1-based line numbers of malformed lines
    pub malformed: Vec<usize>,
}

impl CheckReport {
    /// Returns `true` if every line held a sentence with a valid checksum.
    pub fn is_clean(&self) -> bool {
        self.mismatched.is_empty() && self.malformed.is_empty()
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines: {} valid, {} mismatched, {} malformed",
            self.lines,
            self.valid,
            self.mismatched.len(),
            self.malformed.len()
        )?;

        if !self.mismatched.is_empty() {
            write!(f, " (mismatched lines: {})", join(&self.mismatched))?;
        }
        if !self.malformed.is_empty() {
            write!(f, " (malformed lines: {})", join(&self.malformed))?;
        }

        Ok(())
    }
}

fn join(lines: &[usize]) -> String {
    lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Repairs every sentence read from `reader`, writing the results to `writer`.
///
/// The writer is buffered internally and flushed before returning, on success
/// as well as when the run is aborted.
///
/// # Examples
///
/// ```rust
/// use nmea0183_checksum::{RepairOptions, repair_lines};
///
/// let input = "$GPGGA,data*6A\n$GPGGA,123519,4807.038,N*57\n";
/// let mut output = Vec::new();
///
/// let report = repair_lines(input.as_bytes(), &mut output, RepairOptions::default()).unwrap();
///
/// assert_eq!(output, b"$GPGGA,data*6A\n$GPGGA,123519,4807.038,N*27\n");
/// assert_eq!(report.unchanged, 1);
/// assert_eq!(report.repaired, 1);
/// ```
///
/// # Errors
///
/// - [`RepairError::Sentence`] for the first malformed line under [`ErrorPolicy::Abort`]
/// - [`RepairError::Io`] if reading, writing or flushing fails
pub fn repair_lines<R, W>(
    reader: R,
    writer: W,
    options: RepairOptions,
) -> Result<RepairReport, RepairError>
where
    R: BufRead,
    W: Write,
{
    let mut sink = BufWriter::new(writer);

    let result = drive(reader, &mut sink, options);
    let flushed = sink.flush();

    if let (Err(e), Err(flush_error)) = (&result, &flushed) {
        log::warn!("output may be incomplete, flush failed after {e}: {flush_error}");
    }

    let report = result?;
    flushed?;

    log::info!("{report}");

    Ok(report)
}

/// Repairs the sentences of the file at `input` into a new file at `output`.
///
/// The output file is only created once the input has been opened.
///
/// # Errors
///
/// See [`repair_lines`].
pub fn repair_file(
    input: &Path,
    output: &Path,
    options: RepairOptions,
) -> Result<RepairReport, RepairError> {
    let reader = BufReader::new(File::open(input)?);
    let writer = File::create(output)?;

    log::debug!("repairing {} into {}", input.display(), output.display());

    repair_lines(reader, writer, options)
}

/// Checks every sentence read from `reader` without repairing anything.
///
/// Malformed lines are always recorded and never stop the run, so the policy of
/// `options` is not consulted.
///
/// # Errors
///
/// Returns [`RepairError::Io`] if reading fails.
pub fn check_lines<R>(reader: R, options: RepairOptions) -> Result<CheckReport, RepairError>
where
    R: BufRead,
{
    let processor = Processor::new(options.line_ending);
    let mut report = CheckReport::default();

    for_each_line(reader, |number, line| {
        report.lines = number;

        match processor.parse(line) {
            Ok(sentence) if sentence.is_valid() => report.valid += 1,
            Ok(sentence) => {
                log::warn!(
                    "line {number}: checksum {} does not match payload ({})",
                    sentence.checksum_field(),
                    format_checksum(sentence.computed_checksum()),
                );
                report.mismatched.push(number);
            }
            Err(e) => {
                log::warn!("line {number}: {}: {e}", e.kind());
                report.malformed.push(number);
            }
        }

        Ok(())
    })?;

    log::info!("{report}");

    Ok(report)
}

fn drive<R, W>(reader: R, sink: &mut W, options: RepairOptions) -> Result<RepairReport, RepairError>
where
    R: BufRead,
    W: Write,
{
    let processor = Processor::new(options.line_ending);
    let mut report = RepairReport::default();

    for_each_line(reader, |number, line| {
        report.lines = number;

        match processor.parse(line) {
            Ok(sentence) => {
                write_sentence(&mut *sink, number, &sentence, &mut report)?;
            }
            Err(source) => match options.policy {
                ErrorPolicy::Abort => {
                    return Err(RepairError::Sentence {
                        line: number,
                        source,
                    });
                }
                ErrorPolicy::Skip => {
                    log::warn!("line {number}: {}: {source}, skipped", source.kind());
                    report.skipped += 1;
                }
                ErrorPolicy::PassThrough => {
                    log::warn!("line {number}: {}: {source}, passed through", source.kind());
                    writeln!(sink, "{}", strip_terminator(line, options.line_ending))?;
                    report.passed_through += 1;
                }
            },
        }

        Ok(())
    })?;

    Ok(report)
}

fn write_sentence<W: Write>(
    sink: &mut W,
    number: usize,
    sentence: &Sentence<'_>,
    report: &mut RepairReport,
) -> Result<(), RepairError> {
    let (verdict, repaired) = sentence.repair_with_verdict();

    if verdict.is_valid() {
        report.unchanged += 1;
    } else {
        log::debug!(
            "line {number}: checksum {} replaced in {repaired}",
            sentence.checksum_field()
        );
        report.repaired += 1;
    }

    writeln!(sink, "{repaired}")?;

    Ok(())
}

/// Calls `f` with the 1-based number and text of each line, terminator included.
fn for_each_line<R, F>(mut reader: R, mut f: F) -> Result<(), RepairError>
where
    R: BufRead,
    F: FnMut(usize, &str) -> Result<(), RepairError>,
{
    let mut line = String::new();
    let mut number = 0;

    loop {
        line.clear();

        if reader.read_line(&mut line)? == 0 {
            return Ok(());
        }

        number += 1;
        f(number, &line)?;
    }
}

fn strip_terminator(line: &str, mode: LineEndingMode) -> &str {
    match mode {
        LineEndingMode::Lf => line.strip_suffix('\n').unwrap_or(line),
        LineEndingMode::Crlf => line.trim_end_matches(['\r', '\n']),
    }
}
