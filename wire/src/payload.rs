//! Uncompressed payload layout.
//!
//! Both payload kinds are flat record arrays with the record count implied by
//! the buffer length. Keys are little-endian and strictly ascending, which
//! makes the encoded bytes (and therefore the compressed frame) a pure
//! function of the voxel set.

use voxel::VoxelKey;

use crate::error::{DecodeError, LimitKind, WireResult};
use crate::limits::Limits;

/// P-frame flag for a key added since the previous frame.
pub const FLAG_ADDED: i8 = 1;

/// P-frame flag for a key removed since the previous frame.
pub const FLAG_REMOVED: i8 = -1;

/// Size of one P-frame record: key followed by a signed flag byte.
#[must_use]
pub const fn pframe_stride<K: VoxelKey>() -> usize {
    K::BYTES + 1
}

/// Serializes I-frame keys. `keys` must be strictly ascending.
pub fn encode_iframe_payload<K: VoxelKey>(keys: &[K], out: &mut Vec<u8>) {
    out.reserve(keys.len() * K::BYTES);
    for key in keys {
        key.write_le(out);
    }
}

/// Serializes P-frame records. Keys must be strictly ascending.
pub fn encode_pframe_payload<K: VoxelKey>(records: &[(K, i8)], out: &mut Vec<u8>) {
    out.reserve(records.len() * pframe_stride::<K>());
    for (key, flag) in records {
        key.write_le(out);
        out.extend_from_slice(&flag.to_le_bytes());
    }
}

/// Parses I-frame keys.
pub fn decode_iframe_payload<K: VoxelKey>(payload: &[u8], limits: &Limits) -> WireResult<Vec<K>> {
    let count = record_count(payload.len(), K::BYTES, limits)?;
    let mut keys = Vec::with_capacity(count);
    let mut previous: Option<u64> = None;
    for chunk in payload.chunks_exact(K::BYTES) {
        let key = read_key::<K>(chunk, &mut previous)?;
        keys.push(key);
    }
    Ok(keys)
}

/// Parses P-frame records, validating every flag.
pub fn decode_pframe_payload<K: VoxelKey>(
    payload: &[u8],
    limits: &Limits,
) -> WireResult<Vec<(K, i8)>> {
    let stride = pframe_stride::<K>();
    let count = record_count(payload.len(), stride, limits)?;
    let mut records = Vec::with_capacity(count);
    let mut previous: Option<u64> = None;
    for chunk in payload.chunks_exact(stride) {
        let (key_bytes, flag_bytes) = chunk.split_at(K::BYTES);
        let key = read_key::<K>(key_bytes, &mut previous)?;
        let flag = i8::from_le_bytes([flag_bytes[0]]);
        if flag != FLAG_ADDED && flag != FLAG_REMOVED {
            return Err(DecodeError::InvalidFlag {
                key: key.to_u64(),
                flag,
            });
        }
        records.push((key, flag));
    }
    Ok(records)
}

fn record_count(len: usize, stride: usize, limits: &Limits) -> WireResult<usize> {
    if len % stride != 0 {
        return Err(DecodeError::PayloadLengthMismatch { len, stride });
    }
    let count = len / stride;
    if count > limits.max_voxels {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::Voxels,
            limit: limits.max_voxels,
            actual: count,
        });
    }
    Ok(count)
}

fn read_key<K: VoxelKey>(bytes: &[u8], previous: &mut Option<u64>) -> WireResult<K> {
    let raw = K::read_le(bytes).ok_or(DecodeError::PayloadLengthMismatch {
        len: bytes.len(),
        stride: K::BYTES,
    })?;
    let key = K::try_from_u64(raw).ok_or(DecodeError::KeyOutOfRange {
        key: raw,
        key_bits: K::KEY_BITS,
    })?;
    if let Some(prev) = *previous {
        if raw <= prev {
            return Err(DecodeError::InvalidKeyOrder {
                previous: prev,
                current: raw,
            });
        }
    }
    *previous = Some(raw);
    Ok(key)
}
