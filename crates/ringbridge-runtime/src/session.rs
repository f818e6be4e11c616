//! Single-run execution: create a VM, hook `see`, run the script, collect
//! the output.
//!
//! # Example
//!
//! ```rust,ignore
//! use ringbridge_runtime::{Bridge, BridgeOptions};
//!
//! let bridge = Bridge::new(factory, BridgeOptions::default());
//! let output = bridge.run("see 'hello'");
//! assert_eq!(output.text(), "hello");
//! ```

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use ringbridge_sdk::{convert, NativeFn, ScriptVm, ValueAccess, VmFactory};
use tracing::{debug, trace, warn};

use crate::error::BridgeError;
use crate::options::{BridgeOptions, SETUP_ERROR};
use crate::output::OutputBuffer;
use crate::serialize::serialize_value;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The script ran; any script-level error is not distinguished
    Completed,
    /// The VM could not be created
    InitFailed,
    /// The print hook could not be installed
    SetupFailed,
}

/// Result of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    text: String,
    truncated: bool,
    status: RunStatus,
}

impl RunOutput {
    fn completed(buffer: OutputBuffer) -> Self {
        let truncated = buffer.is_truncated();
        Self {
            text: buffer.into_string(),
            truncated,
            status: RunStatus::Completed,
        }
    }

    fn failed(status: RunStatus, message: &str) -> Self {
        Self {
            text: message.to_string(),
            truncated: false,
            status,
        }
    }

    /// Captured output, or the sentinel text on failure
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Take the text
    pub fn into_text(self) -> String {
        self.text
    }

    /// Whether output was dropped because the buffer was full
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// How the run ended
    pub fn status(&self) -> RunStatus {
        self.status
    }
}

/// Owns a VM for the length of a run and releases it on every exit path.
pub struct VmGuard<V: ScriptVm> {
    vm: V,
}

impl<V: ScriptVm> VmGuard<V> {
    /// Take ownership of `vm`
    pub fn new(vm: V) -> Self {
        Self { vm }
    }
}

impl<V: ScriptVm> Deref for VmGuard<V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.vm
    }
}

impl<V: ScriptVm> DerefMut for VmGuard<V> {
    fn deref_mut(&mut self) -> &mut V {
        &mut self.vm
    }
}

impl<V: ScriptVm> Drop for VmGuard<V> {
    fn drop(&mut self) {
        self.vm.release();
        trace!("vm released");
    }
}

/// Build the native `see` implementation: snapshot argument 1 and
/// serialize it into `buffer`.
pub fn print_hook(buffer: Rc<RefCell<OutputBuffer>>) -> NativeFn {
    Rc::new(move |args: &dyn ValueAccess| match convert::read_arg(args, 1) {
        Ok(Some(value)) => {
            trace!(kind = value.type_name(), "see");
            serialize_value(&value, &mut buffer.borrow_mut());
        }
        Ok(None) => trace!(kind = args.type_name(1), "see: value ignored"),
        Err(err) => warn!(error = %err, "see: could not read argument"),
    })
}

fn execute<F: VmFactory>(
    factory: &F,
    source: &str,
    options: &BridgeOptions,
    buffer: &Rc<RefCell<OutputBuffer>>,
) -> Result<(), BridgeError> {
    let mut vm = VmGuard::new(factory.init().map_err(BridgeError::Init)?);
    vm.register_function(&options.hook_name, print_hook(buffer.clone()))
        .map_err(BridgeError::Register)?;
    vm.run_code(&options.rebind_source)
        .map_err(BridgeError::Rebind)?;
    vm.run_code(source).map_err(BridgeError::Script)
}

/// Run `source` on a fresh VM and return everything it printed.
pub fn run_script<F: VmFactory>(factory: &F, source: &str, options: &BridgeOptions) -> RunOutput {
    debug!(source_len = source.len(), capacity = options.capacity, "run start");
    let buffer = Rc::new(RefCell::new(OutputBuffer::with_capacity(options.capacity)));

    match execute(factory, source, options, &buffer) {
        Ok(()) => {}
        Err(err @ BridgeError::Init(_)) => {
            warn!(error = %err, "run aborted");
            return RunOutput::failed(RunStatus::InitFailed, &options.init_error_message);
        }
        Err(err) if err.is_setup() => {
            warn!(error = %err, "run aborted");
            return RunOutput::failed(RunStatus::SetupFailed, SETUP_ERROR);
        }
        Err(err) => debug!(error = %err, "script error ignored"),
    }

    let output = RunOutput::completed(buffer.take());
    debug!(
        output_len = output.text.len(),
        truncated = output.truncated,
        "run finished"
    );
    output
}

/// A VM factory paired with run options.
pub struct Bridge<F: VmFactory> {
    factory: F,
    options: BridgeOptions,
}

impl<F: VmFactory> Bridge<F> {
    /// Create a bridge over `factory`
    pub fn new(factory: F, options: BridgeOptions) -> Self {
        Self { factory, options }
    }

    /// Run `source` on a fresh VM
    pub fn run(&self, source: &str) -> RunOutput {
        run_script(&self.factory, source, &self.options)
    }

    /// Options used for every run
    pub fn options(&self) -> &BridgeOptions {
        &self.options
    }

    /// The underlying factory
    pub fn factory(&self) -> &F {
        &self.factory
    }
}
