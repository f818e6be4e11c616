//! Adapter from VM handles to owned [`Variant`] trees.
//!
//! Type predicates are checked in a fixed order (string, number, list,
//! pointer) so that a value the VM reports under several tags always lands
//! on the same variant. List elements keep only strings, numbers and nested
//! lists; anything else inside a list is skipped.
//!
//! Nested lists are walked with an explicit stack, so arbitrarily deep input
//! cannot exhaust the native stack.

use crate::context::ValueAccess;
use crate::error::AbiResult;
use crate::value::ListRef;
use crate::variant::Variant;

/// Read argument `index` of the current call.
///
/// Returns `Ok(None)` when the argument carries no recognized type tag.
pub fn read_arg(access: &dyn ValueAccess, index: usize) -> AbiResult<Option<Variant>> {
    if access.is_string(index) {
        return Ok(Some(Variant::Str(access.get_string(index)?)));
    }
    if access.is_number(index) {
        return Ok(Some(Variant::Num(access.get_number(index)?)));
    }
    if access.is_list(index) {
        let list = access.get_list(index)?;
        return read_list(access, list).map(Some);
    }
    if access.is_pointer(index) {
        return Ok(Some(Variant::Opaque));
    }
    Ok(None)
}

/// One list being copied: the handle, its size, the next 1-based index
/// and the elements collected so far.
struct Frame {
    list: ListRef,
    size: usize,
    next: usize,
    items: Vec<Variant>,
}

impl Frame {
    fn open(access: &dyn ValueAccess, list: ListRef) -> Self {
        let size = access.list_size(list);
        Self {
            list,
            size,
            next: 1,
            items: Vec::with_capacity(size),
        }
    }
}

/// Copy a list (and everything nested in it) out of the VM.
///
/// A null handle yields an empty list.
pub fn read_list(access: &dyn ValueAccess, list: Option<ListRef>) -> AbiResult<Variant> {
    let Some(root) = list else {
        return Ok(Variant::List(Vec::new()));
    };

    let mut stack = vec![Frame::open(access, root)];
    while let Some(frame) = stack.last_mut() {
        if frame.next > frame.size {
            let Some(done) = stack.pop() else { break };
            let value = Variant::List(done.items);
            match stack.last_mut() {
                Some(parent) => parent.items.push(value),
                None => return Ok(value),
            }
            continue;
        }

        let list = frame.list;
        let index = frame.next;
        frame.next += 1;

        if access.list_is_string(list, index) {
            frame.items.push(Variant::Str(access.list_get_string(list, index)?));
        } else if access.list_is_number(list, index) {
            frame.items.push(Variant::Num(access.list_get_number(list, index)?));
        } else if access.list_is_list(list, index) {
            match access.list_get_list(list, index)? {
                Some(child) => stack.push(Frame::open(access, child)),
                None => frame.items.push(Variant::List(Vec::new())),
            }
        }
    }

    Ok(Variant::List(Vec::new()))
}
