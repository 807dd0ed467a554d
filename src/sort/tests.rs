use std::fs;
use std::path::Path;

use super::core::*;
use super::parse::*;
use crate::element::{IndexedI32, IndexedU32};
use crate::engine::{Backend, EngineConfig, Gather};
use crate::micro::Algorithm;

fn config_to(output: &Path) -> SortConfig {
    SortConfig {
        engine: EngineConfig {
            workers: Some(2),
            ..EngineConfig::default()
        },
        output_file: Some(output.to_string_lossy().into_owned()),
        ..SortConfig::default()
    }
}

fn write_input(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path.to_string_lossy().into_owned()
}

// ──────────────────────────────────────────────────
// Parsing
// ──────────────────────────────────────────────────

#[test]
fn test_tokens_skip_blank_lines_and_keep_numbers() {
    let got: Vec<(usize, &[u8])> = tokens(b"5\n\n  -3 \r\n7", b'\n').collect();
    assert_eq!(
        got,
        vec![(0, &b"5"[..]), (2, &b"-3"[..]), (3, &b"7"[..])]
    );
}

#[test]
fn test_tokens_empty_and_trailing_delimiter() {
    assert_eq!(tokens(b"", b'\n').count(), 0);
    assert_eq!(tokens(b"1\n2\n", b'\n').count(), 2);
    assert_eq!(tokens(b"1\x002\x00", b'\0').count(), 2);
}

#[test]
fn test_parse_keys_signed_and_unsigned() {
    assert_eq!(
        parse_keys::<i32>(b"5\n-3\n0\n2\n-3\n100\n", b'\n').unwrap(),
        vec![5, -3, 0, 2, -3, 100]
    );
    assert_eq!(
        parse_keys::<u32>(b"4294967295\n0\n", b'\n').unwrap(),
        vec![u32::MAX, 0]
    );
}

#[test]
fn test_parse_invalid_integer_reports_line() {
    let err = parse_keys::<i32>(b"1\n2\nabc\n", b'\n').unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidInteger {
            line: 3,
            token: "abc".to_string()
        }
    );
    assert_eq!(err.to_string(), "line 3: invalid integer 'abc'");
}

#[test]
fn test_parse_out_of_range() {
    let err = parse_keys::<i32>(b"2147483648\n", b'\n').unwrap_err();
    assert!(matches!(err, ParseError::OutOfRange { line: 1, .. }), "{:?}", err);
    // A negative value is not a u32 at all
    let err = parse_keys::<u32>(b"-1\n", b'\n').unwrap_err();
    assert!(matches!(err, ParseError::InvalidInteger { line: 1, .. }), "{:?}", err);
}

#[test]
fn test_parse_indexed_payload_is_line_number() {
    let got = parse_indexed::<i32>(b"3\n\n1\n3\n", b'\n').unwrap();
    assert_eq!(
        got,
        vec![
            IndexedI32::new(3, 0),
            IndexedI32::new(1, 2),
            IndexedI32::new(3, 3)
        ]
    );
}

#[test]
fn test_parse_count_suffixes() {
    assert_eq!(parse_count("65536"), Ok(65536));
    assert_eq!(parse_count("64K"), Ok(64 * 1024));
    assert_eq!(parse_count("2m"), Ok(2 * 1024 * 1024));
    assert_eq!(parse_count("1G"), Ok(1024 * 1024 * 1024));
    assert!(parse_count("").is_err());
    assert!(parse_count("12Q").is_err());
    assert!(parse_count("x").is_err());
}

// ──────────────────────────────────────────────────
// Output
// ──────────────────────────────────────────────────

#[test]
fn test_write_keys_and_pairs() {
    let mut out = Vec::new();
    write_keys(&[-3i32, 0, 7], &mut out, b'\n').unwrap();
    assert_eq!(out, b"-3\n0\n7\n");

    let mut out = Vec::new();
    write_pairs(&[IndexedU32::new(1, 4), IndexedU32::new(9, 0)], &mut out, b'\0').unwrap();
    assert_eq!(out, b"1\t4\x009\t0\x00");
}

// ──────────────────────────────────────────────────
// Driver
// ──────────────────────────────────────────────────

#[test]
fn test_sort_file_to_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "in.txt", "5\n-3\n0\n2\n-3\n100\n");
    let output = dir.path().join("out.txt");

    let outcome = sort_and_output(&[input], &config_to(&output)).unwrap();
    assert_eq!(outcome, Outcome::Sorted { values: 6 });
    assert_eq!(fs::read_to_string(&output).unwrap(), "-3\n-3\n0\n2\n5\n100\n");
}

#[test]
fn test_sort_indexed_merge_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "in.txt", "3\n1\n3\n");
    let output = dir.path().join("out.txt");
    let config = SortConfig {
        indexed: true,
        gather: Gather::Merge,
        ..config_to(&output)
    };

    sort_and_output(&[input], &config).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), "1\t1\n3\t0\n3\t2\n");
}

#[test]
fn test_sort_unsigned_task_queue_parallel_path() {
    let dir = tempfile::tempdir().unwrap();
    let body: String = (0..5000u32).rev().map(|v| format!("{}\n", v * 3)).collect();
    let input = write_input(dir.path(), "in.txt", &body);
    let output = dir.path().join("out.txt");
    let mut config = SortConfig {
        unsigned: true,
        gather: Gather::Counting,
        algorithm: Algorithm::Comparison,
        ..config_to(&output)
    };
    config.engine.backend = Backend::TaskQueue;
    config.engine.sequential_threshold = 100;

    let outcome = sort_and_output(&[input], &config).unwrap();
    assert_eq!(outcome, Outcome::Sorted { values: 5000 });
    let expected: String = (0..5000u32).map(|v| format!("{}\n", v * 3)).collect();
    assert_eq!(fs::read_to_string(&output).unwrap(), expected);
}

#[test]
fn test_multiple_inputs_missing_trailing_newline() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_input(dir.path(), "a.txt", "9\n4");
    let b = write_input(dir.path(), "b.txt", "7\n");
    let output = dir.path().join("out.txt");

    sort_and_output(&[a, b], &config_to(&output)).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), "4\n7\n9\n");
}

#[test]
fn test_zero_terminated() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "in.bin", "2\x00-1\x00");
    let output = dir.path().join("out.bin");
    let config = SortConfig {
        zero_terminated: true,
        ..config_to(&output)
    };

    sort_and_output(&[input], &config).unwrap();
    assert_eq!(fs::read(&output).unwrap(), b"-1\x002\x00");
}

#[test]
fn test_output_may_overwrite_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "same.txt", "3\n2\n1\n");
    let config = config_to(Path::new(&input));

    sort_and_output(std::slice::from_ref(&input), &config).unwrap();
    assert_eq!(fs::read_to_string(&input).unwrap(), "1\n2\n3\n");
}

#[test]
fn test_parse_error_leaves_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "in.txt", "1\nnope\n");
    let output = dir.path().join("out.txt");
    fs::write(&output, "keep").unwrap();

    let err = sort_and_output(&[input], &config_to(&output)).unwrap_err();
    assert!(matches!(err, DriverError::Parse(_)), "{}", err);
    assert_eq!(fs::read_to_string(&output).unwrap(), "keep");
}

#[test]
fn test_missing_input_is_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt").to_string_lossy().into_owned();
    let err = sort_and_output(&[missing], &SortConfig::default()).unwrap_err();
    assert!(matches!(err, DriverError::Open { .. }));
    assert!(err.to_string().starts_with("open failed: "));
    assert!(!err.to_string().contains("os error"));
}

#[test]
fn test_check_sorted_reports_first_disorder() {
    assert_eq!(
        check_sorted::<i32>(b"-1\n0\n0\n5\n", b'\n').unwrap(),
        Outcome::InOrder { values: 4 }
    );
    assert_eq!(
        check_sorted::<i32>(b"1\n\n3\n2\n1\n", b'\n').unwrap(),
        Outcome::Disorder { line: 4, value: 2 }
    );
    assert_eq!(
        check_sorted::<u32>(b"", b'\n').unwrap(),
        Outcome::InOrder { values: 0 }
    );
}

#[test]
fn test_check_mode_does_not_write() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "in.txt", "2\n1\n");
    let output = dir.path().join("out.txt");
    let config = SortConfig {
        check: CheckMode::Quiet,
        ..config_to(&output)
    };

    let outcome = sort_and_output(&[input], &config).unwrap();
    assert_eq!(outcome, Outcome::Disorder { line: 2, value: 1 });
    assert!(!output.exists());
}
