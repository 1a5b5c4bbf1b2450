//! Single-frame inspection.

use std::fmt::Write as _;

use serde::Serialize;
use voxel::VoxelKey;
use wire::{
    decode_frame, decode_iframe_payload, decode_pframe_payload, DecodeError, FrameType, Limits,
    FLAG_ADDED, FLAG_REMOVED, HEADER_SIZE,
};

use crate::profile::Profile;

/// What a single frame contains, without any stream context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    pub frame_type: &'static str,
    pub header: u32,
    pub key_bits: u32,
    /// Whole frame, header included.
    pub frame_bytes: usize,
    pub compressed_bytes: usize,
    pub raw_bytes: usize,
    /// Keys in an I-frame, change records in a P-frame.
    pub records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<usize>,
    /// Frame bytes per raw payload byte; zero for an empty payload.
    pub compression_ratio: f64,
}

/// Decodes and validates one frame for the key width of `profile`.
pub fn inspect_frame(
    bytes: &[u8],
    profile: Profile,
    limits: &Limits,
) -> Result<InspectReport, DecodeError> {
    match profile {
        Profile::Pc30 => inspect_as::<u32>(bytes, limits),
        Profile::Pc60 => inspect_as::<u64>(bytes, limits),
    }
}

fn inspect_as<K: VoxelKey>(bytes: &[u8], limits: &Limits) -> Result<InspectReport, DecodeError> {
    let frame = decode_frame(bytes, limits)?;
    let (records, added, removed) = match frame.frame_type {
        FrameType::PFrame => {
            let records = decode_pframe_payload::<K>(&frame.payload, limits)?;
            let added = records.iter().filter(|(_, f)| *f == FLAG_ADDED).count();
            let removed = records.iter().filter(|(_, f)| *f == FLAG_REMOVED).count();
            (records.len(), Some(added), Some(removed))
        }
        _ => {
            let keys = decode_iframe_payload::<K>(&frame.payload, limits)?;
            (keys.len(), None, None)
        }
    };

    let raw_bytes = frame.payload.len();
    let compression_ratio = if raw_bytes == 0 {
        0.0
    } else {
        bytes.len() as f64 / raw_bytes as f64
    };

    Ok(InspectReport {
        frame_type: frame.frame_type.name(),
        header: frame.header,
        key_bits: K::KEY_BITS,
        frame_bytes: bytes.len(),
        compressed_bytes: bytes.len() - HEADER_SIZE,
        raw_bytes,
        records,
        added,
        removed,
        compression_ratio,
    })
}

/// Multi-line human-readable rendering of a report.
#[must_use]
pub fn format_inspect_pretty(report: &InspectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "frame: {} (header 0x{:08x}, {}-bit keys)",
        report.frame_type, report.header, report.key_bits
    );
    let _ = writeln!(
        out,
        "bytes: {} on wire, {} compressed, {} raw (ratio {:.3})",
        report.frame_bytes, report.compressed_bytes, report.raw_bytes, report.compression_ratio
    );
    match (report.added, report.removed) {
        (Some(added), Some(removed)) => {
            let _ = write!(
                out,
                "records: {} (+{added} -{removed})",
                report.records
            );
        }
        _ => {
            let _ = write!(out, "records: {} keys", report.records);
        }
    }
    out
}
