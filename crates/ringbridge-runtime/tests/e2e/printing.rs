//! Formatting of printed values.

use super::harness::*;
use ringbridge_sdk::scripted::ScriptedValue;

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn test_string_is_written_bare() {
    expect_output(vec![s("Hello, World!")], "Hello, World!");
}

#[test]
fn test_consecutive_prints_concatenate() {
    expect_output(vec![s("a"), s("b"), n(1.0)], "ab1");
}

#[test]
fn test_integral_numbers_have_no_decimal_point() {
    expect_output(vec![n(5.0)], "5");
    expect_output(vec![n(-3.0)], "-3");
    expect_output(vec![n(0.0)], "0");
}

#[test]
fn test_fractional_numbers() {
    expect_output(vec![n(5.5)], "5.5");
    expect_output(vec![n(0.25)], "0.25");
}

#[test]
fn test_len_and_sum_results() {
    // len("abc") and sum of [1, 2, 3] arrive as doubles
    expect_output(vec![n(3.0), s(" "), n(6.0)], "3 6");
}

#[test]
fn test_string_with_newlines_is_untouched() {
    expect_output(vec![s("line1\nline2\n")], "line1\nline2\n");
}

#[test]
fn test_unicode_text() {
    expect_output(vec![s("héllo "), s("世界")], "héllo 世界");
}

// ============================================================================
// Lists
// ============================================================================

#[test]
fn test_flat_list() {
    expect_output(vec![list(vec![n(1.0), s("a"), n(2.5)])], "1\na\n2.5\n");
}

#[test]
fn test_nested_list() {
    expect_output(
        vec![list(vec![n(1.0), list(vec![n(2.0), n(3.0)]), n(4.0)])],
        "1\n2\n3\n4\n",
    );
}

#[test]
fn test_deeply_nested_list() {
    let mut value = list(vec![s("core")]);
    for depth in 0..50 {
        value = list(vec![n(depth as f64), value]);
    }
    let output = run(vec![value]);
    let lines: Vec<&str> = output.text().lines().collect();
    assert_eq!(lines.len(), 51);
    assert_eq!(lines[0], "49");
    assert_eq!(lines[49], "0");
    assert_eq!(lines[50], "core");
}

#[test]
fn test_list_followed_by_string() {
    expect_output(vec![list(vec![s("x")]), s("done")], "x\ndone");
}

#[test]
fn test_empty_list_prints_nothing() {
    expect_output(vec![list(vec![])], "");
    expect_output(vec![list(vec![list(vec![]), list(vec![])])], "");
}

#[test]
fn test_null_list_handle_prints_nothing() {
    expect_output(vec![s("a"), ScriptedValue::NullList, s("b")], "ab");
    expect_output(vec![list(vec![ScriptedValue::NullList, n(1.0)])], "1\n");
}

// ============================================================================
// Objects and unknown values
// ============================================================================

#[test]
fn test_object_placeholder() {
    expect_output(vec![ScriptedValue::Object], "[Object]");
}

#[test]
fn test_objects_inside_lists_are_skipped() {
    expect_output(
        vec![list(vec![ScriptedValue::Object, s("kept"), ScriptedValue::Object])],
        "kept\n",
    );
}

#[test]
fn test_unknown_values_are_ignored() {
    expect_output(vec![s("<"), ScriptedValue::Unknown, s(">")], "<>");
    expect_output(vec![list(vec![ScriptedValue::Unknown, n(7.0)])], "7\n");
}
