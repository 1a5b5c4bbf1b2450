//! Voxel quantization and key packing for the pcc point-cloud codec.
//!
//! This crate maps metric 3-D points onto a fixed integer grid and packs the
//! three grid indices of a cell into a single integer key:
//! - [`VoxelKey`] for the 30-bit (`u32`) and 60-bit (`u64`) key widths
//! - [`Quantizer`] for point ↔ key conversion at a given precision
//! - [`VoxelSet`] for the set of occupied cells in one frame
//!
//! # Design Principles
//!
//! - **Lossy only within one cell** - `unpack(pack(p))` is the cell center of `p`.
//! - **Total packing** - Out-of-range coordinates clamp to the border cell and
//!   are counted, they never fail a cloud.
//! - **No wire knowledge** - This crate knows nothing about frames or compression.
//!
//! # Example
//!
//! ```
//! use voxel::{Point, Quantizer};
//!
//! let quantizer = Quantizer::<u64>::new(1000.0).unwrap();
//! let key = quantizer.pack(Point::new(0.0014, -2.5, 1.0));
//! assert_eq!(quantizer.unpack(key), Point::new(0.001, -2.5, 1.0));
//! ```

mod error;
mod key;
mod point;
mod quantize;
mod set;

pub use error::{VoxelError, VoxelResult};
pub use key::{axis_bias, axis_max, pack_indices, unpack_indices, VoxelKey};
pub use point::Point;
pub use quantize::{QuantizeStats, Quantized, Quantizer};
pub use set::VoxelSet;
