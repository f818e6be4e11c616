//! Number to text conversion
//!
//! VM numbers are untyped doubles. Values with no fractional part that fit
//! an i64 print as integer literals (`len()` and `sum()` results must not
//! grow a `.0`); everything else uses the shortest text that round-trips.

/// 2^63 as a double; the first value past the i64 range
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Integer value of `value` if it is integral and inside the i64 range
#[inline]
pub fn as_exact_i64(value: f64) -> Option<i64> {
    if value.fract() == 0.0 && (-I64_LIMIT..I64_LIMIT).contains(&value) {
        Some(value as i64)
    } else {
        None
    }
}

/// Format a VM number for output
pub fn format_number(value: f64) -> String {
    if let Some(int) = as_exact_i64(value) {
        return int.to_string();
    }
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let mut buf = ryu::Buffer::new();
    buf.format_finite(value).to_string()
}
