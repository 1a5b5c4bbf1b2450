//! Frame header sentinels.

use std::fmt;

use crate::error::{DecodeError, WireResult};

/// Header sentinel for an I-frame.
///
/// The sentinel values are part of the committed wire format and must never change.
pub const IFRAME_ID: u32 = 0x00ff_ffff;

/// Header sentinel for a P-frame.
pub const PFRAME_ID: u32 = 0x00df_dfdf;

/// Header sentinel for an unknown frame. Never produced by an encoder.
pub const UNKNOWN_ID: u32 = 0x0000_0000;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 4;

/// Kind of frame carried by a wire frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameType {
    /// Full state; the decoder replaces its tracked state.
    IFrame,
    /// Additions and removals relative to the tracked state.
    PFrame,
    /// Unrecognized sentinel. Decoders must treat it as an error.
    Unknown,
}

impl FrameType {
    /// Returns `true` for I-frames.
    #[must_use]
    pub const fn is_iframe(self) -> bool {
        matches!(self, Self::IFrame)
    }

    /// Returns `true` for P-frames.
    #[must_use]
    pub const fn is_pframe(self) -> bool {
        matches!(self, Self::PFrame)
    }

    /// Short lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::IFrame => "iframe",
            Self::PFrame => "pframe",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps a frame type to its header sentinel.
#[must_use]
pub const fn frame_type_to_header(frame_type: FrameType) -> u32 {
    match frame_type {
        FrameType::IFrame => IFRAME_ID,
        FrameType::PFrame => PFRAME_ID,
        FrameType::Unknown => UNKNOWN_ID,
    }
}

/// Maps a header sentinel to its frame type.
///
/// Any unrecognized value, including [`UNKNOWN_ID`], yields [`FrameType::Unknown`].
#[must_use]
pub const fn header_to_frame_type(header: u32) -> FrameType {
    match header {
        IFRAME_ID => FrameType::IFrame,
        PFRAME_ID => FrameType::PFrame,
        _ => FrameType::Unknown,
    }
}

/// Appends the header for `frame_type` to `out`.
pub fn write_header(frame_type: FrameType, out: &mut Vec<u8>) {
    out.extend_from_slice(&frame_type_to_header(frame_type).to_le_bytes());
}

/// Reads the raw header sentinel from the start of a frame.
pub fn read_header(bytes: &[u8]) -> WireResult<u32> {
    let header: [u8; HEADER_SIZE] = bytes
        .get(..HEADER_SIZE)
        .and_then(|head| head.try_into().ok())
        .ok_or(DecodeError::FrameTooSmall {
            actual: bytes.len(),
            required: HEADER_SIZE,
        })?;
    Ok(u32::from_le_bytes(header))
}
