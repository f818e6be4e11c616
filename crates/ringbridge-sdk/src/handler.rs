//! VM lifecycle traits and the native hook registry

use std::collections::HashMap;
use std::rc::Rc;

use crate::context::ValueAccess;
use crate::error::AbiResult;

/// A native function the VM can call back into.
///
/// Hooks run synchronously on the thread driving the VM, so they are
/// reference-counted but not `Send`.
pub type NativeFn = Rc<dyn Fn(&dyn ValueAccess)>;

/// An embedded script VM instance.
///
/// One instance serves exactly one run. `release` must be safe to call more
/// than once; later calls are no-ops.
pub trait ScriptVm {
    /// Expose `hook` to scripts under `name`
    fn register_function(&mut self, name: &str, hook: NativeFn) -> AbiResult<()>;

    /// Execute source text. Side effects only.
    fn run_code(&mut self, source: &str) -> AbiResult<()>;

    /// Tear down the VM and free its resources
    fn release(&mut self);
}

/// Creates fresh VM instances.
pub trait VmFactory {
    /// The VM type this factory produces
    type Vm: ScriptVm;

    /// Create a new VM, or report why it could not be created
    fn init(&self) -> AbiResult<Self::Vm>;
}

/// Registry of native hooks indexed by name.
///
/// VM implementations keep their registered hooks here and resolve them
/// when the script calls into native code.
#[derive(Default)]
pub struct HookRegistry {
    hooks: HashMap<String, NativeFn>,
}

impl HookRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook by name, replacing any previous one
    pub fn register(&mut self, name: &str, hook: NativeFn) {
        self.hooks.insert(name.to_string(), hook);
    }

    /// Get a hook by name
    pub fn get(&self, name: &str) -> Option<NativeFn> {
        self.hooks.get(name).cloned()
    }

    /// Check if a hook is registered
    pub fn contains(&self, name: &str) -> bool {
        self.hooks.contains_key(name)
    }

    /// Drop every registered hook
    pub fn clear(&mut self) {
        self.hooks.clear();
    }

    /// Get the number of registered hooks
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.hooks.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("HookRegistry").field("hooks", &names).finish()
    }
}
