//! Differential point-cloud encoding and decoding for the pcc codec.
//!
//! This is the main codec crate that ties together voxel quantization and the
//! wire format to stream point clouds as I-frames (the full set of occupied
//! cells) and P-frames (cells added and removed since the previous frame).
//!
//! # Profiles
//!
//! | Profile | Key   | Axis bits | Precision | I-frame every |
//! |---------|-------|-----------|-----------|---------------|
//! | PC30    | `u32` | 10        | 1         | 10 frames     |
//! | PC60    | `u64` | 20        | 1000      | 5 frames      |
//!
//! # Example
//!
//! ```
//! use codec::{CloudDecoder, CloudEncoder};
//! use voxel::Point;
//!
//! let mut encoder = CloudEncoder::pc60();
//! let mut decoder = CloudDecoder::pc60();
//!
//! let frame = encoder.encode_cloud(&[Point::new(0.0014, -2.5, 1.0)])?;
//! let cloud = decoder.decode_cloud(&frame)?;
//! assert_eq!(cloud, vec![Point::new(0.001, -2.5, 1.0)]);
//! # Ok::<(), codec::CodecError>(())
//! ```
//!
//! # Design Principles
//!
//! - **Strict ordering** - One encoder and one decoder per stream, fed in order.
//! - **Validate before mutate** - A frame that fails to decode leaves the
//!   tracked state as it was.
//! - **Deterministic** - The same cloud sequence produces the same bytes.

mod config;
mod decoder;
mod delta;
mod encoder;
mod error;
mod state;
mod stats;

pub use config::{
    CodecConfig, PC30_IFRAME_RATE, PC30_PRECISION, PC60_IFRAME_RATE, PC60_PRECISION,
};
pub use decoder::CloudDecoder;
pub use delta::{apply_delta, apply_delta_in_place, diff, Change, DeltaRecord};
pub use encoder::CloudEncoder;
pub use error::{CodecError, CodecResult, ConfigReason, DesyncReason};
pub use state::{CodecPhase, IFrameSchedule};
pub use stats::{DecodeStats, EncodeStats};
pub use wire::{peek_frame_type, Compression, FrameType, Limits as WireLimits};

/// Encoder with 32-bit keys.
pub type Pc30Encoder = CloudEncoder<u32>;
/// Decoder with 32-bit keys.
pub type Pc30Decoder = CloudDecoder<u32>;
/// Encoder with 64-bit keys.
pub type Pc60Encoder = CloudEncoder<u64>;
/// Decoder with 64-bit keys.
pub type Pc60Decoder = CloudDecoder<u64>;
