//! C FFI exports for the Ring output bridge
//!
//! A host (a browser page through emscripten, or a native program) hands in
//! Ring source and gets back everything the script printed:
//! - `ringbridge_run` runs one script on a fresh VM (feature `ring-vm`)
//! - `ringbridge_last_truncated` / `ringbridge_last_len` describe the last run
//! - `ringbridge_version` reports the library version
//!
//! The returned text pointer stays valid until the next run on the same
//! thread. It must not be freed by the caller.

use std::borrow::Cow;
use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::panic::{self, AssertUnwindSafe};

use ringbridge_runtime::{run_script, BridgeOptions};
use ringbridge_sdk::VmFactory;
use tracing::{error, warn};

#[cfg(feature = "ring-vm")]
mod ring;
#[cfg(feature = "ring-vm")]
mod sys;

#[cfg(feature = "ring-vm")]
pub use ring::{RingFactory, RingVm};

/// Text returned when a run panics inside the bridge
pub const PANIC_ERROR: &str = "Error: Bridge panicked";

// ============================================================================
// Last-run slot
// ============================================================================

#[derive(Default)]
struct LastOutput {
    text: CString,
    truncated: bool,
}

thread_local! {
    static LAST_OUTPUT: RefCell<LastOutput> = RefCell::new(LastOutput::default());
}

/// Convert to a C string, cutting at the first interior NUL
fn to_c_string(text: String) -> CString {
    match CString::new(text) {
        Ok(c_str) => c_str,
        Err(err) => {
            let nul = err.nul_position();
            warn!(position = nul, "output contains NUL, cut short");
            let mut bytes = err.into_vec();
            bytes.truncate(nul);
            CString::new(bytes).unwrap_or_default()
        }
    }
}

fn store(text: String, truncated: bool) -> *const c_char {
    let text = to_c_string(text);
    LAST_OUTPUT.with(|slot| {
        let mut slot = slot.borrow_mut();
        slot.text = text;
        slot.truncated = truncated;
        slot.text.as_ptr()
    })
}

/// Read the source argument. Null reads as an empty script.
unsafe fn source_arg<'a>(code: *const c_char) -> Cow<'a, str> {
    if code.is_null() {
        Cow::Borrowed("")
    } else {
        CStr::from_ptr(code).to_string_lossy()
    }
}

/// Run `code` on a VM from `factory` and park the output in the
/// thread-local slot.
///
/// # Safety
/// `code` must be null or point to a NUL-terminated string.
pub unsafe fn run_to_slot<F: VmFactory>(
    factory: &F,
    code: *const c_char,
    options: &BridgeOptions,
) -> *const c_char {
    let source = source_arg(code);
    match panic::catch_unwind(AssertUnwindSafe(|| run_script(factory, &source, options))) {
        Ok(output) => {
            let truncated = output.is_truncated();
            store(output.into_text(), truncated)
        }
        Err(_) => {
            error!("run panicked");
            store(PANIC_ERROR.to_string(), false)
        }
    }
}

// ============================================================================
// Exports
// ============================================================================

/// Run Ring source and return what it printed.
///
/// # Safety
/// `code` must be null or point to a NUL-terminated string. The returned
/// pointer is owned by the library and valid until the next call on the
/// same thread.
#[cfg(feature = "ring-vm")]
#[no_mangle]
pub unsafe extern "C" fn ringbridge_run(code: *const c_char) -> *const c_char {
    run_to_slot(&RingFactory, code, &BridgeOptions::default())
}

/// 1 if the last run on this thread dropped output, else 0
#[no_mangle]
pub extern "C" fn ringbridge_last_truncated() -> c_int {
    LAST_OUTPUT.with(|slot| c_int::from(slot.borrow().truncated))
}

/// Byte length of the last returned text, excluding the terminator
#[no_mangle]
pub extern "C" fn ringbridge_last_len() -> usize {
    LAST_OUTPUT.with(|slot| slot.borrow().text.as_bytes().len())
}

/// Get library version string
///
/// # Safety
/// The returned string is statically allocated and must not be freed.
#[no_mangle]
pub unsafe extern "C" fn ringbridge_version() -> *const c_char {
    static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr() as *const c_char
}

// ============================================================================
// Tests
// ============================================================================
