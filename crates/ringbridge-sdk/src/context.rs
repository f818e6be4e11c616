//! ValueAccess trait: the VM's accessor capability set
//!
//! A native hook receives a `&dyn ValueAccess` describing the arguments of
//! the current call. Everything the bridge learns about a printed value goes
//! through these methods; it never touches VM memory directly.
//!
//! All indices are 1-based, matching the VM's view of argument lists and
//! list elements.

use crate::error::AbiResult;
use crate::value::ListRef;

/// Read-only view of a native call's arguments and the lists they reference.
pub trait ValueAccess {
    // ========================================================================
    // Argument predicates
    // ========================================================================

    /// Argument `index` is a string
    fn is_string(&self, index: usize) -> bool;

    /// Argument `index` is a number
    fn is_number(&self, index: usize) -> bool;

    /// Argument `index` is a list
    fn is_list(&self, index: usize) -> bool;

    /// Argument `index` is an opaque pointer (object, C pointer, ...)
    fn is_pointer(&self, index: usize) -> bool;

    // ========================================================================
    // Argument extractors
    // ========================================================================

    /// Read argument `index` as a string
    fn get_string(&self, index: usize) -> AbiResult<String>;

    /// Read argument `index` as a double
    fn get_number(&self, index: usize) -> AbiResult<f64>;

    /// Read argument `index` as a list handle. `None` means a null list.
    fn get_list(&self, index: usize) -> AbiResult<Option<ListRef>>;

    // ========================================================================
    // List access
    // ========================================================================

    /// Number of elements in `list`
    fn list_size(&self, list: ListRef) -> usize;

    /// Element `index` of `list` is a string
    fn list_is_string(&self, list: ListRef, index: usize) -> bool;

    /// Element `index` of `list` is a number
    fn list_is_number(&self, list: ListRef, index: usize) -> bool;

    /// Element `index` of `list` is a nested list
    fn list_is_list(&self, list: ListRef, index: usize) -> bool;

    /// Read element `index` of `list` as a string
    fn list_get_string(&self, list: ListRef, index: usize) -> AbiResult<String>;

    /// Read element `index` of `list` as a double
    fn list_get_number(&self, list: ListRef, index: usize) -> AbiResult<f64>;

    /// Read element `index` of `list` as a nested list handle
    fn list_get_list(&self, list: ListRef, index: usize) -> AbiResult<Option<ListRef>>;

    /// Short type name of argument `index`, for diagnostics
    fn type_name(&self, index: usize) -> &'static str {
        if self.is_string(index) {
            "string"
        } else if self.is_number(index) {
            "number"
        } else if self.is_list(index) {
            "list"
        } else if self.is_pointer(index) {
            "pointer"
        } else {
            "unknown"
        }
    }
}
