//! Run configuration.

use crate::output::OUTPUT_CAPACITY;

/// Name the print hook is registered under
pub const DEFAULT_HOOK_NAME: &str = "ring_vm_see";

/// Source that rebinds the VM's `see` keyword to the hook
pub const DEFAULT_REBIND_SOURCE: &str = "func ringvm_see cData ring_vm_see(cData)";

/// Text returned when the VM cannot be created
pub const DEFAULT_INIT_ERROR: &str = "Error: Failed to init RingState";

/// Text returned when the print hook cannot be installed
pub const SETUP_ERROR: &str = "Error: Failed to install output hook";

/// Options for a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeOptions {
    /// Output buffer capacity in bytes (one slot is reserved)
    pub capacity: usize,

    /// Native function name the print hook is registered under
    pub hook_name: String,

    /// Source run before the script to route `see` to the hook
    pub rebind_source: String,

    /// Sentinel text returned on VM init failure
    pub init_error_message: String,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            capacity: OUTPUT_CAPACITY, // 512 KiB
            hook_name: DEFAULT_HOOK_NAME.to_string(),
            rebind_source: DEFAULT_REBIND_SOURCE.to_string(),
            init_error_message: DEFAULT_INIT_ERROR.to_string(),
        }
    }
}

impl BridgeOptions {
    /// Override the output buffer capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}
