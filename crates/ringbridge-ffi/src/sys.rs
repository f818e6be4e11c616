//! Raw declarations for the parts of the Ring C API the bridge calls.

use std::os::raw::{c_char, c_int, c_uint, c_void};

/// Opaque Ring interpreter state
#[repr(C)]
pub struct RingState {
    _private: [u8; 0],
}

/// Opaque Ring list
#[repr(C)]
pub struct List {
    _private: [u8; 0],
}

/// Native function signature; receives the calling VM
pub type RingFunc = unsafe extern "C" fn(pointer: *mut c_void);

#[link(name = "ring")]
extern "C" {
    // State lifecycle
    pub fn ring_state_init() -> *mut RingState;
    pub fn ring_state_runcode(state: *mut RingState, code: *const c_char);
    pub fn ring_state_delete(state: *mut RingState) -> *mut RingState;

    pub fn ring_vm_funcregister2(state: *mut RingState, name: *const c_char, func: RingFunc);

    // Arguments of the current native call
    pub fn ring_vm_api_isstring(pointer: *mut c_void, x: c_int) -> c_int;
    pub fn ring_vm_api_isnumber(pointer: *mut c_void, x: c_int) -> c_int;
    pub fn ring_vm_api_islist(pointer: *mut c_void, x: c_int) -> c_int;
    pub fn ring_vm_api_ispointer(pointer: *mut c_void, x: c_int) -> c_int;
    pub fn ring_vm_api_getstring(pointer: *mut c_void, x: c_int) -> *const c_char;
    pub fn ring_vm_api_getnumber(pointer: *mut c_void, x: c_int) -> f64;
    pub fn ring_vm_api_getlist(pointer: *mut c_void, x: c_int) -> *mut List;

    // List items
    pub fn ring_list_getsize(list: *mut List) -> c_uint;
    pub fn ring_list_isstring(list: *mut List, index: c_uint) -> c_int;
    pub fn ring_list_isnumber(list: *mut List, index: c_uint) -> c_int;
    pub fn ring_list_islist(list: *mut List, index: c_uint) -> c_int;
    pub fn ring_list_getstring(list: *mut List, index: c_uint) -> *mut c_char;
    pub fn ring_list_getdouble(list: *mut List, index: c_uint) -> f64;
    pub fn ring_list_getlist(list: *mut List, index: c_uint) -> *mut List;
}
