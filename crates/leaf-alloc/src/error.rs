//! Allocator error definitions.

use thiserror::Error;

/// An allocation failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AllocError {
    #[error("out of memory while allocating {size} bytes")]
    OutOfMemory { size: usize },

    #[error("cannot describe a block of {size} bytes")]
    InvalidLayout { size: usize },

    #[error("block was allocated by a different allocator")]
    ForeignBlock,
}

impl AllocError {
    /// Get the requested size that failed, if any.
    pub fn size(&self) -> Option<usize> {
        match self {
            AllocError::OutOfMemory { size } => Some(*size),
            AllocError::InvalidLayout { size } => Some(*size),
            AllocError::ForeignBlock => None,
        }
    }
}
