//! Configurable limits for bounded decoding.

/// Wire-level limits for frame decoding.
///
/// These limits are enforced during decoding to prevent resource exhaustion
/// (oversized frames, decompression bombs, absurd record counts) and keep
/// memory usage bounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum size of a compressed wire frame, header included.
    pub max_frame_bytes: usize,

    /// Maximum size of an inflated payload.
    pub max_payload_bytes: usize,

    /// Maximum number of key records in one payload.
    pub max_voxels: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // A dense 60-bit I-frame of 4M voxels inflates to 32 MB
            max_frame_bytes: 32 * 1024 * 1024,
            max_payload_bytes: 64 * 1024 * 1024,
            max_voxels: 8 * 1024 * 1024,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_frame_bytes: 64 * 1024,
            max_payload_bytes: 256 * 1024,
            max_voxels: 16 * 1024,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_frame_bytes: usize::MAX,
            max_payload_bytes: usize::MAX,
            max_voxels: usize::MAX,
        }
    }
}
