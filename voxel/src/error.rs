//! Error types for voxel quantization.

use std::fmt;

/// Result type for voxel operations.
pub type VoxelResult<T> = Result<T, VoxelError>;

/// Errors that can occur when building a quantizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VoxelError {
    /// Precision must be finite and strictly positive.
    InvalidPrecision { precision: f64 },
}

impl fmt::Display for VoxelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPrecision { precision } => {
                write!(
                    f,
                    "invalid precision {precision}: must be finite and greater than zero"
                )
            }
        }
    }
}

impl std::error::Error for VoxelError {}
