//! Error types for the VM boundary

/// Result type for accessor and lifecycle calls
pub type AbiResult<T> = Result<T, NativeError>;

/// Errors raised while talking to the embedded VM
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NativeError {
    /// Type mismatch while reading a value
    #[error("Type mismatch at index {index}: expected {expected}")]
    TypeMismatch {
        /// 1-based index that was read
        index: usize,
        /// Expected type name
        expected: &'static str,
    },

    /// Index outside the argument list or list bounds
    #[error("Index {index} out of range (size {size})")]
    OutOfRange {
        /// 1-based index that was read
        index: usize,
        /// Number of available slots
        size: usize,
    },

    /// VM runtime could not be created
    #[error("VM initialization failed: {0}")]
    InitFailed(String),

    /// A name or source text could not be handed to the VM
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Native hook registration was rejected
    #[error("Hook registration failed: {0}")]
    Registration(String),

    /// Script execution reported an error
    #[error("Script error: {0}")]
    Script(String),

    /// A native hook panicked
    #[error("Native hook panicked: {0}")]
    Panic(String),

    /// Operation on a VM that was already released
    #[error("VM already released")]
    Released,
}

impl From<String> for NativeError {
    fn from(s: String) -> Self {
        NativeError::Script(s)
    }
}

impl From<&str> for NativeError {
    fn from(s: &str) -> Self {
        NativeError::Script(s.to_string())
    }
}
