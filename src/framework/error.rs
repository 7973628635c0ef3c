//! # Framework Errors
//!
//! Errors raised while dispatching actions through a store. Module code reports its
//! own failures as a [`BoxError`], which the framework wraps together with the
//! action type that was being handled.

/// Boxed error type used for failures coming from module code (handlers, async payloads).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while dispatching an action.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Dispatching while constructing middleware is not allowed")]
    Constructing,
    #[error("Handler for {action_type} failed: {source}")]
    Handler {
        action_type: String,
        #[source]
        source: BoxError,
    },
    #[error("Payload for {action_type} rejected: {source}")]
    PayloadRejected {
        action_type: String,
        #[source]
        source: BoxError,
    },
}

impl DispatchError {
    /// Wraps a module failure raised while handling `action_type`.
    pub fn handler(action_type: impl Into<String>, source: impl Into<BoxError>) -> Self {
        DispatchError::Handler {
            action_type: action_type.into(),
            source: source.into(),
        }
    }
}
