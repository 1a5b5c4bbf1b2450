//! Whole-frame encoding and decoding: header plus compressed payload.

use crate::compress::{compress_into, decompress, Compression};
use crate::error::{DecodeError, EncodeError, LimitKind, WireResult};
use crate::header::{header_to_frame_type, read_header, write_header, FrameType, HEADER_SIZE};
use crate::limits::Limits;

/// A decoded wire frame with its payload inflated but not yet parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    /// Frame type from the header. Never [`FrameType::Unknown`].
    pub frame_type: FrameType,
    /// Raw header sentinel.
    pub header: u32,
    /// Inflated payload bytes.
    pub payload: Vec<u8>,
    /// Size of the compressed section, header excluded.
    pub compressed_len: usize,
}

/// Builds a wire frame from an uncompressed payload.
///
/// Returns [`EncodeError::InvalidFrameType`] for [`FrameType::Unknown`].
pub fn encode_frame(
    frame_type: FrameType,
    payload: &[u8],
    level: Compression,
) -> Result<Vec<u8>, EncodeError> {
    if frame_type == FrameType::Unknown {
        return Err(EncodeError::InvalidFrameType { frame_type });
    }
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len() / 2 + 16);
    write_header(frame_type, &mut out);
    compress_into(payload, level, &mut out)?;
    Ok(out)
}

/// Decodes a wire frame.
///
/// Size limits are checked first, then the payload is inflated, then the
/// header is classified. An unrecognized sentinel is an error.
pub fn decode_frame(bytes: &[u8], limits: &Limits) -> WireResult<DecodedFrame> {
    if bytes.len() < HEADER_SIZE {
        return Err(DecodeError::FrameTooSmall {
            actual: bytes.len(),
            required: HEADER_SIZE,
        });
    }
    if bytes.len() > limits.max_frame_bytes {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::FrameBytes,
            limit: limits.max_frame_bytes,
            actual: bytes.len(),
        });
    }

    let compressed = &bytes[HEADER_SIZE..];
    let payload = decompress(compressed, limits)?;

    let header = read_header(bytes)?;
    let frame_type = header_to_frame_type(header);
    if frame_type == FrameType::Unknown {
        return Err(DecodeError::UnknownFrameType { found: header });
    }

    Ok(DecodedFrame {
        frame_type,
        header,
        payload,
        compressed_len: compressed.len(),
    })
}

/// Classifies a frame from its header alone, without inflating it.
///
/// Returns [`FrameType::Unknown`] for an unrecognized sentinel rather than an
/// error, so callers can report it.
pub fn peek_frame_type(bytes: &[u8]) -> WireResult<FrameType> {
    read_header(bytes).map(header_to_frame_type)
}
