//! Per-frame counters.

use wire::FrameType;

/// What the last encoded frame contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeStats {
    pub frame_type: FrameType,
    /// Points offered, including dropped non-finite ones.
    pub points: usize,
    /// Occupied cells after quantization.
    pub voxels: usize,
    /// Points clamped into the representable window.
    pub clamped: usize,
    /// Points dropped for NaN or infinite coordinates.
    pub non_finite: usize,
    /// Additions in a P-frame. Zero for I-frames.
    pub delta_added: usize,
    /// Removals in a P-frame. Zero for I-frames.
    pub delta_removed: usize,
    /// Payload size before compression.
    pub raw_bytes: usize,
    /// Wire frame size, header included.
    pub compressed_bytes: usize,
}

impl EncodeStats {
    /// Wire bytes per uncompressed payload byte.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        ratio(self.compressed_bytes, self.raw_bytes)
    }
}

/// What the last decoded frame contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeStats {
    pub frame_type: FrameType,
    /// Wire frame size, header included.
    pub compressed_bytes: usize,
    /// Inflated payload size.
    pub raw_bytes: usize,
    /// Keys (I-frame) or change records (P-frame) in the payload.
    pub records: usize,
    /// Tracked cells after applying the frame.
    pub voxels: usize,
}

impl DecodeStats {
    /// Wire bytes per uncompressed payload byte.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        ratio(self.compressed_bytes, self.raw_bytes)
    }
}

fn ratio(compressed: usize, raw: usize) -> f64 {
    if raw == 0 {
        0.0
    } else {
        compressed as f64 / raw as f64
    }
}
