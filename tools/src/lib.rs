//! Inspection and file-based streaming tools for the pcc codec.
//!
//! This crate provides utilities for working with encoded frames outside a
//! live link:
//!
//! - Read and write point clouds as JSON files
//! - Encode a sequence of clouds into frame files and decode them back
//! - Explain a frame: type, sizes, record counts, compression ratio
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to understand what the codec is doing.

mod files;
mod inspect;
mod profile;

pub use files::{
    frame_file_name, list_frames, load_point_cloud, write_point_cloud, FrameEntry,
    PointCloudFile,
};
pub use inspect::{format_inspect_pretty, inspect_frame, InspectReport};
pub use profile::{Profile, StreamDecoder, StreamEncoder};
