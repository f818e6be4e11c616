//! Bridge error types.

use ringbridge_sdk::NativeError;

/// Errors that can occur while setting up or driving a run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BridgeError {
    /// The VM could not be created
    #[error("VM init failed: {0}")]
    Init(#[source] NativeError),

    /// The print hook could not be registered
    #[error("Hook registration failed: {0}")]
    Register(#[source] NativeError),

    /// The `see` rebind source was rejected
    #[error("See rebind failed: {0}")]
    Rebind(#[source] NativeError),

    /// The user script raised an error
    #[error("Script failed: {0}")]
    Script(#[source] NativeError),
}

impl BridgeError {
    /// Whether this error happened before the user script started
    pub fn is_setup(&self) -> bool {
        !matches!(self, BridgeError::Script(_))
    }
}
