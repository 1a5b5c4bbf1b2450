//! Voxel key packing.
//!
//! A key concatenates three axis indices, x in the lowest bits:
//!
//! ```text
//! key = x_idx | (y_idx << AXIS_BITS) | (z_idx << 2 * AXIS_BITS)
//! ```

use std::fmt::Debug;
use std::hash::Hash;

/// An unsigned integer that packs three quantized axis indices.
///
/// Implemented for `u32` (30-bit keys, 10 bits per axis) and `u64` (60-bit
/// keys, 20 bits per axis). Bits above [`KEY_BITS`](Self::KEY_BITS) are
/// never set in a valid key.
pub trait VoxelKey: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// Total number of bits used by the three axes.
    const KEY_BITS: u32;

    /// Number of bits per axis.
    const AXIS_BITS: u32;

    /// Serialized size in bytes.
    const BYTES: usize;

    /// Widens the key to `u64`.
    fn to_u64(self) -> u64;

    /// Builds a key from the low [`KEY_BITS`](Self::KEY_BITS) of `raw`.
    fn from_u64_masked(raw: u64) -> Self;

    /// Appends the little-endian encoding of the key.
    fn write_le(self, out: &mut Vec<u8>);

    /// Reads a raw little-endian value of [`BYTES`](Self::BYTES) bytes.
    ///
    /// Returns `None` if `bytes` has the wrong length. The returned value is
    /// not range-checked; see [`try_from_u64`](Self::try_from_u64).
    fn read_le(bytes: &[u8]) -> Option<u64>;

    /// Mask covering the key bits.
    #[must_use]
    fn key_mask() -> u64 {
        (1u64 << Self::KEY_BITS) - 1
    }

    /// Returns `true` if no bit above [`KEY_BITS`](Self::KEY_BITS) is set.
    #[must_use]
    fn is_valid_raw(raw: u64) -> bool {
        raw & !Self::key_mask() == 0
    }

    /// Builds a key from `raw`, rejecting values with bits above the key width.
    #[must_use]
    fn try_from_u64(raw: u64) -> Option<Self> {
        Self::is_valid_raw(raw).then(|| Self::from_u64_masked(raw))
    }
}

impl VoxelKey for u32 {
    const KEY_BITS: u32 = 30;
    const AXIS_BITS: u32 = 10;
    const BYTES: usize = 4;

    fn to_u64(self) -> u64 {
        u64::from(self)
    }

    fn from_u64_masked(raw: u64) -> Self {
        (raw & Self::key_mask()) as Self
    }

    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn read_le(bytes: &[u8]) -> Option<u64> {
        let bytes: [u8; 4] = bytes.try_into().ok()?;
        Some(u64::from(Self::from_le_bytes(bytes)))
    }
}

impl VoxelKey for u64 {
    const KEY_BITS: u32 = 60;
    const AXIS_BITS: u32 = 20;
    const BYTES: usize = 8;

    fn to_u64(self) -> u64 {
        self
    }

    fn from_u64_masked(raw: u64) -> Self {
        raw & Self::key_mask()
    }

    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn read_le(bytes: &[u8]) -> Option<u64> {
        let bytes: [u8; 8] = bytes.try_into().ok()?;
        Some(Self::from_le_bytes(bytes))
    }
}

/// Offset added to signed grid coordinates so that they become non-negative.
#[must_use]
pub const fn axis_bias(axis_bits: u32) -> u64 {
    1u64 << (axis_bits - 1)
}

/// Largest axis index representable in `axis_bits`.
#[must_use]
pub const fn axis_max(axis_bits: u32) -> u64 {
    (1u64 << axis_bits) - 1
}

/// Packs three axis indices into a key.
///
/// Indices are masked to the axis width.
#[must_use]
pub fn pack_indices<K: VoxelKey>(indices: [u64; 3]) -> K {
    let mask = axis_max(K::AXIS_BITS);
    let [x, y, z] = indices;
    K::from_u64_masked(
        (x & mask) | ((y & mask) << K::AXIS_BITS) | ((z & mask) << (2 * K::AXIS_BITS)),
    )
}

/// Splits a key back into its three axis indices.
#[must_use]
pub fn unpack_indices<K: VoxelKey>(key: K) -> [u64; 3] {
    let mask = axis_max(K::AXIS_BITS);
    let raw = key.to_u64();
    [
        raw & mask,
        (raw >> K::AXIS_BITS) & mask,
        (raw >> (2 * K::AXIS_BITS)) & mask,
    ]
}
