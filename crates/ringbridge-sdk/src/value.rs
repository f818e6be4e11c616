//! ListRef: opaque list handle
//!
//! The VM hands out lists as raw handles (a `List*` in the Ring C API, an
//! arena slot in the scripted double). `ListRef` stores the handle as plain
//! u64 bits so it can cross the ABI boundary without interpretation. The
//! bridge never owns what it points to.

use std::ptr::NonNull;

/// Opaque handle to a list living inside the VM.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ListRef(u64);

impl ListRef {
    /// Create from raw handle bits
    #[inline(always)]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Get raw handle bits
    #[inline(always)]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Create from a VM-owned pointer
    ///
    /// # Safety
    /// The pointer must stay valid for as long as the handle is used.
    #[inline]
    pub unsafe fn from_ptr<T>(ptr: NonNull<T>) -> Self {
        Self(ptr.as_ptr() as usize as u64)
    }

    /// Recover the pointer this handle was created from.
    ///
    /// # Safety
    /// The handle must have been built by [`ListRef::from_ptr`] with the
    /// same `T`, and the VM must not have freed the list.
    #[inline]
    pub unsafe fn as_ptr<T>(self) -> Option<NonNull<T>> {
        NonNull::new(self.0 as usize as *mut T)
    }
}

impl std::fmt::Debug for ListRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ListRef({:#x})", self.0)
    }
}
