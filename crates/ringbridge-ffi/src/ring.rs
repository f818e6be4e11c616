//! Ring VM behind the `ScriptVm` seam.
//!
//! Ring calls native functions with only the VM pointer, so the active hook
//! lives in a thread-local slot. One hook per thread; the bridge registers
//! only `see`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_uint, c_void};
use std::panic::{self, AssertUnwindSafe};
use std::ptr::NonNull;

use ringbridge_sdk::{AbiResult, ListRef, NativeError, NativeFn, ScriptVm, ValueAccess, VmFactory};
use tracing::{error, trace};

use crate::sys;

thread_local! {
    static ACTIVE_HOOK: RefCell<Option<NativeFn>> = const { RefCell::new(None) };
}

/// Creates Ring interpreter states
#[derive(Debug, Default, Clone, Copy)]
pub struct RingFactory;

impl VmFactory for RingFactory {
    type Vm = RingVm;

    fn init(&self) -> AbiResult<RingVm> {
        let state = unsafe { sys::ring_state_init() };
        let state = NonNull::new(state)
            .ok_or_else(|| NativeError::InitFailed("ring_state_init returned null".to_string()))?;
        trace!("ring state created");
        Ok(RingVm { state: Some(state) })
    }
}

/// One Ring interpreter state
pub struct RingVm {
    state: Option<NonNull<sys::RingState>>,
}

impl RingVm {
    fn state(&self) -> AbiResult<*mut sys::RingState> {
        self.state
            .map(NonNull::as_ptr)
            .ok_or(NativeError::Released)
    }
}

impl ScriptVm for RingVm {
    fn register_function(&mut self, name: &str, hook: NativeFn) -> AbiResult<()> {
        let state = self.state()?;
        let c_name = CString::new(name)
            .map_err(|_| NativeError::InvalidInput(format!("hook name contains NUL: {name:?}")))?;
        ACTIVE_HOOK.with(|slot| *slot.borrow_mut() = Some(hook));
        unsafe { sys::ring_vm_funcregister2(state, c_name.as_ptr(), call_hook) };
        Ok(())
    }

    fn run_code(&mut self, source: &str) -> AbiResult<()> {
        let state = self.state()?;
        let code = CString::new(source)
            .map_err(|_| NativeError::InvalidInput("source contains NUL".to_string()))?;
        // Ring reports script errors on its own stdout; nothing comes back here
        unsafe { sys::ring_state_runcode(state, code.as_ptr()) };
        Ok(())
    }

    fn release(&mut self) {
        let Some(state) = self.state.take() else {
            return;
        };
        ACTIVE_HOOK.with(|slot| slot.borrow_mut().take());
        unsafe { sys::ring_state_delete(state.as_ptr()) };
    }
}

impl Drop for RingVm {
    fn drop(&mut self) {
        self.release();
    }
}

/// Entry point Ring calls for the registered hook
unsafe extern "C" fn call_hook(pointer: *mut c_void) {
    let Some(hook) = ACTIVE_HOOK.with(|slot| slot.borrow().clone()) else {
        return;
    };
    let call = RingCall { pointer };
    if panic::catch_unwind(AssertUnwindSafe(|| hook(&call))).is_err() {
        error!("native hook panicked");
    }
}

/// Arguments of one native call
struct RingCall {
    pointer: *mut c_void,
}

fn arg_index(index: usize) -> Option<c_int> {
    c_int::try_from(index).ok()
}

fn item_index(index: usize) -> Option<c_uint> {
    c_uint::try_from(index).ok()
}

fn too_large(index: usize) -> NativeError {
    NativeError::OutOfRange {
        index,
        size: c_int::MAX as usize,
    }
}

unsafe fn list_ptr(list: ListRef) -> AbiResult<*mut sys::List> {
    list.as_ptr::<sys::List>()
        .map(NonNull::as_ptr)
        .ok_or_else(|| NativeError::InvalidInput("null list handle".to_string()))
}

unsafe fn list_ref(list: *mut sys::List) -> Option<ListRef> {
    NonNull::new(list).map(|ptr| ListRef::from_ptr(ptr))
}

unsafe fn c_text(text: *const c_char, index: usize) -> AbiResult<String> {
    if text.is_null() {
        return Err(NativeError::TypeMismatch {
            index,
            expected: "string",
        });
    }
    Ok(CStr::from_ptr(text).to_string_lossy().into_owned())
}

impl RingCall {
    fn check(
        &self,
        index: usize,
        predicate: unsafe extern "C" fn(*mut c_void, c_int) -> c_int,
    ) -> bool {
        arg_index(index).is_some_and(|x| unsafe { predicate(self.pointer, x) != 0 })
    }

    fn check_item(
        list: ListRef,
        index: usize,
        predicate: unsafe extern "C" fn(*mut sys::List, c_uint) -> c_int,
    ) -> bool {
        let Some(i) = item_index(index) else {
            return false;
        };
        match unsafe { list_ptr(list) } {
            Ok(list) => unsafe { predicate(list, i) != 0 },
            Err(_) => false,
        }
    }
}

impl ValueAccess for RingCall {
    fn is_string(&self, index: usize) -> bool {
        self.check(index, sys::ring_vm_api_isstring)
    }

    fn is_number(&self, index: usize) -> bool {
        self.check(index, sys::ring_vm_api_isnumber)
    }

    fn is_list(&self, index: usize) -> bool {
        self.check(index, sys::ring_vm_api_islist)
    }

    fn is_pointer(&self, index: usize) -> bool {
        self.check(index, sys::ring_vm_api_ispointer)
    }

    fn get_string(&self, index: usize) -> AbiResult<String> {
        let x = arg_index(index).ok_or_else(|| too_large(index))?;
        unsafe { c_text(sys::ring_vm_api_getstring(self.pointer, x), index) }
    }

    fn get_number(&self, index: usize) -> AbiResult<f64> {
        let x = arg_index(index).ok_or_else(|| too_large(index))?;
        Ok(unsafe { sys::ring_vm_api_getnumber(self.pointer, x) })
    }

    fn get_list(&self, index: usize) -> AbiResult<Option<ListRef>> {
        let x = arg_index(index).ok_or_else(|| too_large(index))?;
        Ok(unsafe { list_ref(sys::ring_vm_api_getlist(self.pointer, x)) })
    }

    fn list_size(&self, list: ListRef) -> usize {
        match unsafe { list_ptr(list) } {
            Ok(list) => unsafe { sys::ring_list_getsize(list) as usize },
            Err(_) => 0,
        }
    }

    fn list_is_string(&self, list: ListRef, index: usize) -> bool {
        Self::check_item(list, index, sys::ring_list_isstring)
    }

    fn list_is_number(&self, list: ListRef, index: usize) -> bool {
        Self::check_item(list, index, sys::ring_list_isnumber)
    }

    fn list_is_list(&self, list: ListRef, index: usize) -> bool {
        Self::check_item(list, index, sys::ring_list_islist)
    }

    fn list_get_string(&self, list: ListRef, index: usize) -> AbiResult<String> {
        let i = item_index(index).ok_or_else(|| too_large(index))?;
        unsafe {
            let list = list_ptr(list)?;
            c_text(sys::ring_list_getstring(list, i), index)
        }
    }

    fn list_get_number(&self, list: ListRef, index: usize) -> AbiResult<f64> {
        let i = item_index(index).ok_or_else(|| too_large(index))?;
        unsafe {
            let list = list_ptr(list)?;
            Ok(sys::ring_list_getdouble(list, i))
        }
    }

    fn list_get_list(&self, list: ListRef, index: usize) -> AbiResult<Option<ListRef>> {
        let i = item_index(index).ok_or_else(|| too_large(index))?;
        unsafe {
            let list = list_ptr(list)?;
            Ok(list_ref(sys::ring_list_getlist(list, i)))
        }
    }
}
