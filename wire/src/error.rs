//! Error types for wire format operations.

use std::fmt;
use std::io;

use crate::header::FrameType;

/// Result type for wire format operations.
pub type WireResult<T> = Result<T, DecodeError>;

/// Decode errors for a single frame.
///
/// None of these imply anything about the stream state; they are raised
/// before any tracked state is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Frame is too small to contain the header.
    FrameTooSmall { actual: usize, required: usize },

    /// Header sentinel is not a known frame type.
    UnknownFrameType { found: u32 },

    /// The compressed payload could not be inflated.
    MalformedCompressedData { reason: InflateError },

    /// Payload length is not a whole number of records.
    PayloadLengthMismatch { len: usize, stride: usize },

    /// Key has bits set above the key width.
    KeyOutOfRange { key: u64, key_bits: u32 },

    /// P-frame record flag is neither +1 nor -1.
    InvalidFlag { key: u64, flag: i8 },

    /// Keys are not strictly ascending.
    InvalidKeyOrder { previous: u64, current: u64 },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific wire limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    FrameBytes,
    PayloadBytes,
    Voxels,
}

/// Why inflating a payload failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InflateError {
    /// The stream is structurally invalid or fails its checksum.
    Corrupt,
    /// The stream ended before its end marker.
    Truncated,
    /// Bytes follow the end of the stream.
    TrailingBytes { extra: usize },
}

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The compressor failed.
    Compression { kind: io::ErrorKind },

    /// Only I-frames and P-frames can be encoded.
    InvalidFrameType { frame_type: FrameType },

    /// The frame would be rejected by a decoder using the same limits.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrameTooSmall { actual, required } => {
                write!(
                    f,
                    "frame too small: {actual} bytes, need at least {required}"
                )
            }
            Self::UnknownFrameType { found } => {
                write!(f, "unknown frame type sentinel: 0x{found:08X}")
            }
            Self::MalformedCompressedData { reason } => {
                write!(f, "malformed compressed data: {reason}")
            }
            Self::PayloadLengthMismatch { len, stride } => {
                write!(
                    f,
                    "payload length {len} is not a multiple of the {stride}-byte record"
                )
            }
            Self::KeyOutOfRange { key, key_bits } => {
                write!(f, "voxel key 0x{key:X} exceeds {key_bits} bits")
            }
            Self::InvalidFlag { key, flag } => {
                write!(f, "invalid flag {flag} for voxel key 0x{key:X}")
            }
            Self::InvalidKeyOrder { previous, current } => {
                write!(
                    f,
                    "voxel keys not strictly ascending: 0x{previous:X} then 0x{current:X}"
                )
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FrameBytes => "frame bytes",
            Self::PayloadBytes => "payload bytes",
            Self::Voxels => "voxel count",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for InflateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupt => write!(f, "corrupt deflate stream"),
            Self::Truncated => write!(f, "truncated deflate stream"),
            Self::TrailingBytes { extra } => {
                write!(f, "{extra} trailing bytes after deflate stream")
            }
        }
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compression { kind } => write!(f, "compression failed: {kind}"),
            Self::InvalidFrameType { frame_type } => {
                write!(f, "cannot encode a frame of type {frame_type}")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded on encode: {actual} > {limit}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

impl std::error::Error for EncodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_display_unknown_frame_type() {
        let err = DecodeError::UnknownFrameType { found: 0xDEAD_BEEF };
        let msg = err.to_string();
        assert!(msg.contains("DEADBEEF"));
    }

    #[test]
    fn decode_error_display_limits_exceeded() {
        let err = DecodeError::LimitsExceeded {
            kind: LimitKind::Voxels,
            limit: 4,
            actual: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("voxel count"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn decode_error_display_malformed() {
        let err = DecodeError::MalformedCompressedData {
            reason: InflateError::Truncated,
        };
        let msg = err.to_string();
        assert!(msg.contains("malformed"));
        assert!(msg.contains("truncated"));
    }

    #[test]
    fn decode_error_display_key_order() {
        let err = DecodeError::InvalidKeyOrder {
            previous: 0x10,
            current: 0x0F,
        };
        let msg = err.to_string();
        assert!(msg.contains("0x10"));
        assert!(msg.contains("0xF"));
    }

    #[test]
    fn encode_error_display() {
        let err = EncodeError::InvalidFrameType {
            frame_type: FrameType::Unknown,
        };
        let msg = err.to_string();
        assert!(msg.contains("unknown"));
    }

    #[test]
    fn encode_error_display_limits_exceeded() {
        let err = EncodeError::LimitsExceeded {
            kind: LimitKind::FrameBytes,
            limit: 64,
            actual: 90,
        };
        let msg = err.to_string();
        assert!(msg.contains("frame bytes"));
        assert!(msg.contains("90 > 64"));
    }

    #[test]
    fn errors_are_std_errors() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<DecodeError>();
        assert_error::<EncodeError>();
    }
}
