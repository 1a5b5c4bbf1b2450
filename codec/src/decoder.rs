//! Receiver side of a point-cloud stream.

use voxel::{Point, Quantizer, VoxelKey, VoxelSet};
use wire::{decode_frame, decode_iframe_payload, decode_pframe_payload, FrameType};

use crate::config::CodecConfig;
use crate::delta::{apply_delta_in_place, DeltaRecord};
use crate::error::{CodecError, CodecResult, DesyncReason};
use crate::state::CodecPhase;
use crate::stats::DecodeStats;

/// Rebuilds point clouds from the wire frames of one stream.
///
/// Frames must arrive in the order they were produced. A frame that fails to
/// decode leaves the tracked cloud untouched. A frame that decodes but does
/// not apply to the tracked cloud is a desync: the decoder drops its state
/// and accepts nothing but an I-frame until one arrives.
#[derive(Debug, Clone)]
pub struct CloudDecoder<K: VoxelKey> {
    config: CodecConfig,
    quantizer: Quantizer<K>,
    tracked: VoxelSet<K>,
    phase: CodecPhase,
    last_stats: Option<DecodeStats>,
}

impl CloudDecoder<u32> {
    /// Decoder for the 32-bit-key profile.
    #[must_use]
    pub fn pc30() -> Self {
        Self::with_valid_config(CodecConfig::pc30(), Quantizer::UNIT)
    }
}

impl CloudDecoder<u64> {
    /// Decoder for the 64-bit-key profile.
    #[must_use]
    pub fn pc60() -> Self {
        Self::with_valid_config(CodecConfig::pc60(), Quantizer::MILLIMETER)
    }
}

impl<K: VoxelKey> CloudDecoder<K> {
    /// Creates a decoder with a custom configuration.
    pub fn new(config: CodecConfig) -> CodecResult<Self> {
        config.validate()?;
        let quantizer = Quantizer::new(config.precision)?;
        Ok(Self::with_valid_config(config, quantizer))
    }

    fn with_valid_config(config: CodecConfig, quantizer: Quantizer<K>) -> Self {
        Self {
            config,
            quantizer,
            tracked: VoxelSet::new(),
            phase: CodecPhase::Fresh,
            last_stats: None,
        }
    }

    /// Decodes the next frame of the stream and returns the full cloud.
    ///
    /// Points are cell centers in ascending key order.
    pub fn decode_cloud(&mut self, bytes: &[u8]) -> CodecResult<Vec<Point>> {
        let limits = &self.config.limits;
        let frame = decode_frame(bytes, limits)?;

        let records = match frame.frame_type {
            FrameType::IFrame => {
                let keys = decode_iframe_payload::<K>(&frame.payload, limits)?;
                let records = keys.len();
                self.tracked = keys.into_iter().collect();
                records
            }
            FrameType::PFrame => {
                let wire_records = decode_pframe_payload::<K>(&frame.payload, limits)?;
                let delta = DeltaRecord::from_wire(&wire_records);
                if self.phase.is_fresh() {
                    return Err(self.desync(DesyncReason::NotSynced));
                }
                if let Err(reason) = apply_delta_in_place(&mut self.tracked, &delta) {
                    return Err(self.desync(reason));
                }
                delta.len()
            }
            FrameType::Unknown => {
                return Err(CodecError::Wire(wire::DecodeError::UnknownFrameType {
                    found: frame.header,
                }));
            }
        };

        self.phase = CodecPhase::Synced;
        let stats = DecodeStats {
            frame_type: frame.frame_type,
            compressed_bytes: bytes.len(),
            raw_bytes: frame.payload.len(),
            records,
            voxels: self.tracked.len(),
        };
        tracing::debug!(
            "decoded {}: {} records, {} voxels, {} -> {} bytes",
            stats.frame_type,
            stats.records,
            stats.voxels,
            stats.compressed_bytes,
            stats.raw_bytes
        );
        self.last_stats = Some(stats);

        Ok(self.current_cloud())
    }

    fn desync(&mut self, reason: DesyncReason) -> CodecError {
        tracing::warn!("decoder desynchronized: {reason}; waiting for an i-frame");
        self.tracked.clear();
        self.phase = CodecPhase::Fresh;
        self.last_stats = None;
        CodecError::Desync(reason)
    }

    /// Clears the tracked cloud. Only an I-frame is accepted next.
    pub fn reset_decoder(&mut self) {
        tracing::trace!("decoder reset");
        self.tracked.clear();
        self.phase = CodecPhase::Fresh;
        self.last_stats = None;
    }

    /// The cloud as of the last successfully decoded frame.
    ///
    /// Empty while [`CodecPhase::Fresh`].
    #[must_use]
    pub fn current_cloud(&self) -> Vec<Point> {
        self.quantizer.devoxelize(&self.tracked)
    }

    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    #[must_use]
    pub fn quantizer(&self) -> &Quantizer<K> {
        &self.quantizer
    }

    #[must_use]
    pub fn phase(&self) -> CodecPhase {
        self.phase
    }

    #[must_use]
    pub fn tracked_voxels(&self) -> usize {
        self.tracked.len()
    }

    /// Counters for the last successfully decoded frame.
    #[must_use]
    pub fn last_stats(&self) -> Option<&DecodeStats> {
        self.last_stats.as_ref()
    }
}
