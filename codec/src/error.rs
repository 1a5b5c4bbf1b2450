//! Error types for codec operations.

use std::fmt;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding a point-cloud stream.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// The frame could not be decoded. Tracked state is untouched.
    Wire(wire::DecodeError),

    /// The frame could not be produced. Tracked state is untouched.
    Encode(wire::EncodeError),

    /// Invalid quantizer parameters.
    Voxel(voxel::VoxelError),

    /// Configuration rejected at construction.
    InvalidConfig(ConfigReason),

    /// The frame does not apply to the tracked state.
    ///
    /// The decoder has dropped its state and accepts only an I-frame next.
    Desync(DesyncReason),
}

/// Why a configuration was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigReason {
    /// Precision is not a finite positive number.
    InvalidPrecision { precision: f64 },
}

/// Why a frame does not apply to the tracked state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesyncReason {
    /// A P-frame arrived before any I-frame.
    NotSynced,
    /// A removal refers to a key that is not tracked.
    MissingKey { key: u64 },
    /// An addition refers to a key that is already tracked.
    DuplicateKey { key: u64 },
}

impl CodecError {
    /// Returns `true` for protocol-level desynchronization.
    #[must_use]
    pub const fn is_desync(&self) -> bool {
        matches!(self, Self::Desync(_))
    }

    /// Returns `true` if the receiver must obtain a fresh I-frame before any
    /// further P-frame can be applied.
    ///
    /// Malformed or unknown frames do not force a resync on their own; the
    /// caller decides whether a gap occurred.
    #[must_use]
    pub const fn requires_resync(&self) -> bool {
        self.is_desync()
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(e) => write!(f, "wire error: {e}"),
            Self::Encode(e) => write!(f, "encode error: {e}"),
            Self::Voxel(e) => write!(f, "voxel error: {e}"),
            Self::InvalidConfig(reason) => write!(f, "invalid config: {reason}"),
            Self::Desync(reason) => write!(f, "stream desynchronized: {reason}"),
        }
    }
}

impl fmt::Display for ConfigReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPrecision { precision } => {
                write!(f, "precision {precision} must be finite and positive")
            }
        }
    }
}

impl fmt::Display for DesyncReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSynced => write!(f, "p-frame received before any i-frame"),
            Self::MissingKey { key } => {
                write!(f, "removal of untracked voxel key 0x{key:X}")
            }
            Self::DuplicateKey { key } => {
                write!(f, "addition of already tracked voxel key 0x{key:X}")
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::Voxel(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wire::DecodeError> for CodecError {
    fn from(err: wire::DecodeError) -> Self {
        Self::Wire(err)
    }
}

impl From<wire::EncodeError> for CodecError {
    fn from(err: wire::EncodeError) -> Self {
        Self::Encode(err)
    }
}

impl From<voxel::VoxelError> for CodecError {
    fn from(err: voxel::VoxelError) -> Self {
        Self::Voxel(err)
    }
}

impl From<DesyncReason> for CodecError {
    fn from(reason: DesyncReason) -> Self {
        Self::Desync(reason)
    }
}
