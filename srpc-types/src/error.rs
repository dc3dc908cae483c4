use thiserror::Error;

/// Errors raised by [`crate::Buffer`] cursor operations.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum BufferError {
    /// `advance` would move the read cursor past the end of the buffer.
    #[error("buffer read cursor out of bounds")]
    OutOfBounds,
}

/// Errors raised while packing or unpacking a message, request, or response.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CodecError {
    /// The buffer did not contain enough bytes to satisfy the read.
    #[error("truncated: {0}")]
    Truncated(#[from] BufferError),

    /// A string's declared length exceeds the bytes remaining in the buffer.
    #[error("declared string length {declared} exceeds {remaining} remaining bytes")]
    LengthOverflow { declared: u64, remaining: usize },

    /// A wire type-name header did not match any registered message factory.
    #[error("unknown message name: {0}")]
    UnknownMessageName(String),
}
