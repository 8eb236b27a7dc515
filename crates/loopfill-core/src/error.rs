//! Error types for loop-fill operations

use thiserror::Error;

/// Errors that can occur while scheduling, encoding or decoding
///
/// Every kind is terminal for the call that produced it; nothing is retried
/// and no partial output is returned alongside an error.
#[derive(Error, Debug)]
pub enum LoopFillError {
    /// A caller-supplied value is out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The source audio could not be decoded (passed through from the decoder)
    #[error("Failed to decode source audio: {0}")]
    DecodeFailure(String),

    /// Storage for an output buffer could not be reserved
    #[error("Failed to allocate {what} ({len} elements)")]
    AllocationFailure { what: &'static str, len: usize },
}

impl LoopFillError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        LoopFillError::InvalidArgument(msg.into())
    }
}

/// Result type for loop-fill operations
pub type Result<T> = std::result::Result<T, LoopFillError>;

/// Reserve a zero-filled vector of exactly `len` elements
///
/// Reports allocator refusal as [`LoopFillError::AllocationFailure`] instead
/// of aborting the process.
pub(crate) fn try_zeroed<T: Clone + Default>(what: &'static str, len: usize) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| LoopFillError::AllocationFailure { what, len })?;
    v.resize(len, T::default());
    Ok(v)
}
