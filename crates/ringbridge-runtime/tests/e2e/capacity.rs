//! Output buffer limits.

use super::harness::*;
use ringbridge_runtime::{BridgeOptions, OUTPUT_CAPACITY};

#[test]
fn test_output_below_capacity_is_complete() {
    let text = "x".repeat(OUTPUT_CAPACITY - 2);
    let output = run(vec![s(&text)]);
    assert_eq!(output.text().len(), OUTPUT_CAPACITY - 2);
    assert!(!output.is_truncated());
}

#[test]
fn test_output_at_capacity_is_dropped() {
    let text = "x".repeat(OUTPUT_CAPACITY - 1);
    let output = run(vec![s(&text)]);
    assert_eq!(output.text(), "");
    assert!(output.is_truncated());
    assert_eq!(output.status(), RunStatus::Completed);
}

#[test]
fn test_many_prints_never_exceed_capacity() {
    let chunk = "0123456789".repeat(100);
    let values = (0..600).map(|_| s(&chunk)).collect();
    let output = run(values);
    assert!(output.text().len() < OUTPUT_CAPACITY - 1);
    assert!(output.is_truncated());
    // every accepted chunk is whole
    assert_eq!(output.text().len() % chunk.len(), 0);
}

#[test]
fn test_later_short_prints_still_fit() {
    let options = BridgeOptions::default().with_capacity(16);
    let output = run_with(vec![s("0123456789"), s("too long!"), s("abc")], &options);
    assert_eq!(output.text(), "0123456789abc");
    assert!(output.is_truncated());
}

#[test]
fn test_list_overflow_drops_whole_elements() {
    let options = BridgeOptions::default().with_capacity(12);
    let output = run_with(vec![list(vec![s("abcd"), s("efghij"), n(1.0)])], &options);
    // "abcd\n" (5), "efghij" rejected, "\n" (6), "1" (7), "\n" (8)
    assert_eq!(output.text(), "abcd\n\n1\n");
    assert!(output.is_truncated());
}
