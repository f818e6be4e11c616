//! Ringbridge Runtime
//!
//! Captures what an embedded Ring VM prints and turns it into one flat text
//! buffer. The `see` keyword is rebound to a native hook; every value it
//! receives is snapshotted into a [`Variant`](ringbridge_sdk::Variant) and
//! serialized:
//!
//! - strings and numbers are written as-is (integral numbers without `.0`)
//! - lists are flattened depth-first, one element per line
//! - objects are written as `[Object]`
//!
//! Output past the buffer capacity is dropped and reported through
//! [`RunOutput::is_truncated`].

pub mod error;
pub mod number;
pub mod options;
pub mod output;
pub mod serialize;
pub mod session;

pub use error::BridgeError;
pub use number::format_number;
pub use options::BridgeOptions;
pub use output::{OutputBuffer, OUTPUT_CAPACITY};
pub use serialize::{serialize_list, serialize_value};
pub use session::{print_hook, run_script, Bridge, RunOutput, RunStatus, VmGuard};
