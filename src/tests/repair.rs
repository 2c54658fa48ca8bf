use std::io::{self, Read, Write};

use crate::{
    CheckReport, Error, ErrorPolicy, LineEndingMode, RepairError, RepairOptions, RepairReport,
    check_lines, repair_file, repair_lines,
};

const LOG: &str = "$GPGGA,123519,4807.038,N*57\n\
                   $GPGGA,data*6A\n\
                   $NODATA\n\
                   $A*ZZ\n\
                   $AK*00";

fn run(input: &str, policy: ErrorPolicy) -> (Result<RepairReport, RepairError>, String) {
    let mut output = Vec::new();
    let res = repair_lines(
        input.as_bytes(),
        &mut output,
        RepairOptions::new(policy, LineEndingMode::Lf),
    );

    (res, String::from_utf8(output).unwrap())
}

#[test]
fn test_repair_lines_preserves_order() {
    let (res, output) = run(
        "$AK*00\n$GPGGA,data*6A\n$GPGGA,123519,4807.038,N*57\n",
        ErrorPolicy::Abort,
    );

    assert_eq!(
        output,
        "$AK*a\n$GPGGA,data*6A\n$GPGGA,123519,4807.038,N*27\n"
    );
    assert_eq!(
        res.unwrap(),
        RepairReport {
            lines: 3,
            unchanged: 1,
            repaired: 2,
            skipped: 0,
            passed_through: 0,
        }
    );
}

#[test]
fn test_repair_lines_terminates_last_line() {
    let (res, output) = run("$GPGGA,data*6A", ErrorPolicy::Abort);

    assert!(res.is_ok());
    assert_eq!(output, "$GPGGA,data*6A\n");
}

#[test]
fn test_repair_lines_empty_input() {
    let (res, output) = run("", ErrorPolicy::Abort);

    assert_eq!(res.unwrap(), RepairReport::default());
    assert!(output.is_empty());
}

#[test]
fn test_repair_lines_abort() {
    let (res, output) = run(LOG, ErrorPolicy::Abort);

    assert_eq!(output, "$GPGGA,123519,4807.038,N*27\n$GPGGA,data*6A\n");

    let error = res.unwrap_err();
    if let RepairError::Sentence { line, source } = &error {
        assert_eq!(*line, 3);
        assert_eq!(*source, Error::MissingDelimiter);
    } else {
        panic!("Unexpected error")
    }
    assert_eq!(
        error.to_string(),
        "line 3: MissingDelimiter: missing '*' checksum delimiter"
    );
}

#[test]
fn test_repair_lines_skip() {
    let (res, output) = run(LOG, ErrorPolicy::Skip);

    assert_eq!(
        output,
        "$GPGGA,123519,4807.038,N*27\n$GPGGA,data*6A\n$AK*a\n"
    );

    let report = res.unwrap();
    assert_eq!(report.lines, 5);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.malformed(), 2);
    assert_eq!(report.written(), 3);
}

#[test]
fn test_repair_lines_pass_through() {
    let (res, output) = run(LOG, ErrorPolicy::PassThrough);

    assert_eq!(
        output,
        "$GPGGA,123519,4807.038,N*27\n$GPGGA,data*6A\n$NODATA\n$A*ZZ\n$AK*a\n"
    );

    let report = res.unwrap();
    assert_eq!(report.passed_through, 2);
    assert_eq!(report.written(), 5);
}

#[test]
fn test_repair_lines_crlf() {
    let mut output = Vec::new();
    let options = RepairOptions::new(ErrorPolicy::PassThrough, LineEndingMode::Crlf);

    let report = repair_lines(
        "$GPGGA,data*00\r\n$NODATA\r\n".as_bytes(),
        &mut output,
        options,
    )
    .unwrap();

    assert_eq!(output, b"$GPGGA,data*6a\n$NODATA\n");
    assert_eq!(report.repaired, 1);
    assert_eq!(report.passed_through, 1);
}

#[test]
fn test_repair_lines_crlf_in_lf_mode_is_malformed() {
    let (res, _) = run("$GPGGA,data*6A\r\n", ErrorPolicy::Abort);

    assert!(matches!(
        res,
        Err(RepairError::Sentence {
            line: 1,
            source: Error::InvalidChecksumDigits { .. }
        })
    ));
}

#[test]
fn test_repair_lines_invalid_utf8() {
    let mut output = Vec::new();
    let res = repair_lines(
        &b"$GPGGA,data*6A\n\xff\xfe*00\n"[..],
        &mut output,
        RepairOptions::default(),
    );

    assert!(matches!(res, Err(RepairError::Io(_))));
    assert_eq!(output, b"$GPGGA,data*6A\n");
}

struct FailingSink;

impl Write for FailingSink {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::other("disk full"))
    }
}

#[test]
fn test_repair_lines_sink_failure() {
    let res = repair_lines(
        "$GPGGA,data*6A\n".as_bytes(),
        FailingSink,
        RepairOptions::default(),
    );

    assert!(matches!(res, Err(RepairError::Io(_))));
}

#[test]
fn test_repair_lines_abort_with_failing_sink() {
    let res = repair_lines(
        "$GPGGA,data*6A\n$NODATA\n".as_bytes(),
        FailingSink,
        RepairOptions::default(),
    );

    let error = res.unwrap_err();
    if let RepairError::Sentence { line, source } = &error {
        assert_eq!(*line, 2);
        assert_eq!(*source, Error::MissingDelimiter);
    } else {
        panic!("Unexpected error")
    }
}

#[test]
fn test_repair_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("road.nmea");
    let output = dir.path().join("new_road.nmea");

    std::fs::write(&input, "$GPGGA,123519,4807.038,N*57\n$GPGGA,data*6A\n").unwrap();

    let report = repair_file(&input, &output, RepairOptions::default()).unwrap();
    assert_eq!(report.repaired, 1);
    assert_eq!(report.unchanged, 1);

    let mut written = String::new();
    std::fs::File::open(&output)
        .unwrap()
        .read_to_string(&mut written)
        .unwrap();
    assert_eq!(written, "$GPGGA,123519,4807.038,N*27\n$GPGGA,data*6A\n");
}

#[test]
fn test_repair_file_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.nmea");
    let output = dir.path().join("out.nmea");

    let res = repair_file(&input, &output, RepairOptions::default());

    assert!(matches!(res, Err(RepairError::Io(_))));
    assert!(!output.exists());
}

#[test]
fn test_repair_output_is_reparable_input() {
    let (_, first) = run(LOG, ErrorPolicy::Skip);
    let (res, second) = run(&first, ErrorPolicy::Abort);

    assert_eq!(first, second);
    let report = res.unwrap();
    assert_eq!(report.repaired, 0);
    assert_eq!(report.unchanged, 3);
}

#[test]
fn test_check_lines() {
    let report = check_lines(LOG.as_bytes(), RepairOptions::default()).unwrap();

    assert_eq!(
        report,
        CheckReport {
            lines: 5,
            valid: 1,
            mismatched: vec![1, 5],
            malformed: vec![3, 4],
        }
    );
    assert!(!report.is_clean());
    assert_eq!(
        report.to_string(),
        "5 lines: 1 valid, 2 mismatched, 2 malformed (mismatched lines: 1, 5) (malformed lines: 3, 4)"
    );
}

#[test]
fn test_check_lines_clean() {
    let reader = io::Cursor::new("$GPGGA,data*6A\n$GPGGA,123519,4807.038,N*27\n");

    let report = check_lines(reader, RepairOptions::default()).unwrap();
    assert!(report.is_clean());
    assert_eq!(
        report.to_string(),
        "2 lines: 2 valid, 0 mismatched, 0 malformed"
    );
}

#[test]
fn test_repair_report_display() {
    let report = RepairReport {
        lines: 5,
        unchanged: 1,
        repaired: 2,
        skipped: 2,
        passed_through: 0,
    };

    assert_eq!(
        report.to_string(),
        "5 lines: 1 unchanged, 2 repaired, 2 skipped, 0 passed through"
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_repair_report_serde() {
    let report = RepairReport {
        lines: 2,
        unchanged: 1,
        repaired: 1,
        skipped: 0,
        passed_through: 0,
    };

    let json = serde_json::to_value(report).unwrap();
    assert_eq!(json["repaired"], 1);

    let options: RepairOptions =
        serde_json::from_str(r#"{"policy":"PassThrough","line_ending":"Crlf"}"#).unwrap();
    assert_eq!(
        options,
        RepairOptions::new(ErrorPolicy::PassThrough, LineEndingMode::Crlf)
    );
}
