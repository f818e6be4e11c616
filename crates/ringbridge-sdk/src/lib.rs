//! Ringbridge SDK - the seam between the bridge and an embedded script VM
//!
//! This crate holds everything that touches VM values without depending on
//! a particular VM build:
//!
//! - [`ListRef`]: opaque list handles handed out by the VM
//! - [`ValueAccess`]: the accessor capability set a native hook reads through
//! - [`ScriptVm`] / [`VmFactory`]: VM lifecycle (init, register, run, release)
//! - [`HookRegistry`]: name-indexed native hooks
//! - [`Variant`] and the [`convert`] adapter that snapshots VM values into it
//!
//! With the `scripted` feature, [`scripted::ScriptedVm`] provides an
//! in-memory VM double that replays canned output.
//!
//! # Example
//!
//! ```ignore
//! use ringbridge_sdk::{convert, NativeFn, ValueAccess};
//! use std::rc::Rc;
//!
//! let hook: NativeFn = Rc::new(|args: &dyn ValueAccess| {
//!     if let Ok(Some(value)) = convert::read_arg(args, 1) {
//!         println!("{:?}", value);
//!     }
//! });
//! vm.register_function("ring_vm_see", hook)?;
//! ```

#![warn(missing_docs)]

pub mod context;
pub mod convert;
pub mod error;
pub mod handler;
pub mod value;
pub mod variant;

#[cfg(any(test, feature = "scripted"))]
pub mod scripted;

pub use context::ValueAccess;
pub use error::{AbiResult, NativeError};
pub use handler::{HookRegistry, NativeFn, ScriptVm, VmFactory};
pub use value::ListRef;
pub use variant::Variant;
