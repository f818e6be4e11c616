//! Variant serialization into the output buffer.
//!
//! Top-level scalars are written bare. Inside a list, every string and
//! number is followed by a newline and nested lists are flattened in place
//! with no separator of their own. Objects print as `[Object]` at the top
//! level and are skipped inside lists.

use ringbridge_sdk::Variant;

use crate::output::OutputBuffer;

/// Text written for an opaque object
pub const OBJECT_PLACEHOLDER: &str = "[Object]";

/// Separator written after each scalar list element
pub const LIST_SEPARATOR: &str = "\n";

/// Serialize one printed value
pub fn serialize_value(value: &Variant, out: &mut OutputBuffer) {
    match value {
        Variant::Str(s) => {
            out.append_text(s);
        }
        Variant::Num(n) => {
            out.append_number(*n);
        }
        Variant::List(items) => serialize_list(items, out),
        Variant::Opaque => {
            out.append_text(OBJECT_PLACEHOLDER);
        }
    }
}

/// Serialize list elements depth-first, left to right.
///
/// Nesting is tracked on a heap stack of element iterators.
pub fn serialize_list(items: &[Variant], out: &mut OutputBuffer) {
    let mut stack = vec![items.iter()];
    while let Some(iter) = stack.last_mut() {
        let Some(item) = iter.next() else {
            stack.pop();
            continue;
        };
        match item {
            Variant::Str(s) => {
                out.append_text(s);
                out.append_text(LIST_SEPARATOR);
            }
            Variant::Num(n) => {
                out.append_number(*n);
                out.append_text(LIST_SEPARATOR);
            }
            Variant::List(inner) => stack.push(inner.iter()),
            Variant::Opaque => {}
        }
    }
}
