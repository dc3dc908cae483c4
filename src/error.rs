//! Error types for the dispatch server and transport layers.

use thiserror::Error;

use srpc_types::CodecError;

/// Errors raised while registering or invoking a dispatch-server handler.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("method {0} is not registered")]
    MethodNotRegistered(String),

    #[error("method {0} has no default implementation")]
    MethodNotImplemented(String),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
}
