//! Point ↔ voxel key quantization.

use std::marker::PhantomData;

use crate::error::{VoxelError, VoxelResult};
use crate::key::{axis_bias, axis_max, pack_indices, unpack_indices, VoxelKey};
use crate::point::Point;
use crate::set::VoxelSet;

/// Result of quantizing a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantized<K> {
    /// The packed cell key.
    pub key: K,
    /// `true` if at least one axis was clamped into the representable window.
    pub clamped: bool,
}

/// Per-cloud quantization counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuantizeStats {
    /// Points offered to the quantizer.
    pub points: usize,
    /// Points with at least one clamped axis.
    pub clamped: usize,
    /// Points dropped because a coordinate was NaN or infinite.
    pub non_finite: usize,
}

/// Maps metric points onto a fixed integer grid.
///
/// Each axis is scaled by `precision`, rounded to the nearest integer and
/// biased by `2^(AXIS_BITS - 1)` so negative coordinates map to non-negative
/// indices. A precision of 1000 gives a millimeter grid for meter inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer<K> {
    precision: f64,
    _key: PhantomData<K>,
}

impl<K: VoxelKey> Quantizer<K> {
    /// One cell per input unit.
    pub const UNIT: Self = Self {
        precision: 1.0,
        _key: PhantomData,
    };

    /// Millimeter cells for input in meters.
    pub const MILLIMETER: Self = Self {
        precision: 1000.0,
        _key: PhantomData,
    };

    /// Creates a quantizer with the given scale factor.
    pub fn new(precision: f64) -> VoxelResult<Self> {
        if !precision.is_finite() || precision <= 0.0 {
            return Err(VoxelError::InvalidPrecision { precision });
        }
        Ok(Self {
            precision,
            _key: PhantomData,
        })
    }

    /// Returns the scale factor.
    #[must_use]
    pub const fn precision(&self) -> f64 {
        self.precision
    }

    /// Distance between two neighbouring cell centers.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        1.0 / self.precision
    }

    /// Largest metric magnitude that maps without clamping.
    #[must_use]
    pub fn half_extent(&self) -> f64 {
        (axis_bias(K::AXIS_BITS) - 1) as f64 / self.precision
    }

    /// Quantizes a point, reporting whether any axis was clamped.
    ///
    /// NaN coordinates land in the origin cell and count as clamped.
    #[must_use]
    pub fn quantize(&self, point: Point) -> Quantized<K> {
        let (x, cx) = quantize_axis(point.x, self.precision, K::AXIS_BITS);
        let (y, cy) = quantize_axis(point.y, self.precision, K::AXIS_BITS);
        let (z, cz) = quantize_axis(point.z, self.precision, K::AXIS_BITS);
        Quantized {
            key: pack_indices([x, y, z]),
            clamped: cx || cy || cz,
        }
    }

    /// Packs a point into its cell key.
    #[must_use]
    pub fn pack(&self, point: Point) -> K {
        self.quantize(point).key
    }

    /// Returns the center of the cell identified by `key`.
    #[must_use]
    pub fn unpack(&self, key: K) -> Point {
        let [x, y, z] = unpack_indices(key);
        Point::new(
            unquantize_axis(x, self.precision, K::AXIS_BITS),
            unquantize_axis(y, self.precision, K::AXIS_BITS),
            unquantize_axis(z, self.precision, K::AXIS_BITS),
        )
    }

    /// Returns the center of the cell containing `point`.
    #[must_use]
    pub fn cell_center(&self, point: Point) -> Point {
        self.unpack(self.pack(point))
    }

    /// Quantizes a cloud into the set of occupied cells.
    ///
    /// Non-finite points are dropped and counted.
    #[must_use]
    pub fn voxelize(&self, points: &[Point]) -> (VoxelSet<K>, QuantizeStats) {
        let mut set = VoxelSet::with_capacity(points.len());
        let mut stats = QuantizeStats {
            points: points.len(),
            ..QuantizeStats::default()
        };
        for point in points {
            if !point.is_finite() {
                stats.non_finite += 1;
                continue;
            }
            let quantized = self.quantize(*point);
            if quantized.clamped {
                stats.clamped += 1;
            }
            set.insert(quantized.key);
        }
        (set, stats)
    }

    /// Expands a cell set into cell-center points, in ascending key order.
    #[must_use]
    pub fn devoxelize(&self, set: &VoxelSet<K>) -> Vec<Point> {
        set.sorted_keys()
            .into_iter()
            .map(|key| self.unpack(key))
            .collect()
    }
}

fn quantize_axis(coord: f64, precision: f64, axis_bits: u32) -> (u64, bool) {
    let max = axis_max(axis_bits);
    let idx = (coord * precision).round() + axis_bias(axis_bits) as f64;
    if idx.is_nan() {
        (axis_bias(axis_bits), true)
    } else if idx < 0.0 {
        (0, true)
    } else if idx > max as f64 {
        (max, true)
    } else {
        (idx as u64, false)
    }
}

fn unquantize_axis(idx: u64, precision: f64, axis_bits: u32) -> f64 {
    let signed = idx as i64 - axis_bias(axis_bits) as i64;
    signed as f64 / precision
}
