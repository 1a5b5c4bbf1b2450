//! Sender side of a point-cloud stream.

use voxel::{Point, QuantizeStats, Quantizer, VoxelKey, VoxelSet};
use wire::{
    encode_frame, encode_iframe_payload, encode_pframe_payload, EncodeError, FrameType, LimitKind,
    Limits,
};

use crate::config::CodecConfig;
use crate::delta::diff;
use crate::error::CodecResult;
use crate::state::{CodecPhase, IFrameSchedule};
use crate::stats::EncodeStats;

/// Turns successive point clouds into wire frames.
///
/// One encoder serves exactly one ordered stream. The first frame after
/// construction or [`reset_encoder`](Self::reset_encoder) is an I-frame, as is
/// every `iframe_rate`-th frame after it; the rest are P-frames carrying the
/// difference against the previously sent cloud.
#[derive(Debug, Clone)]
pub struct CloudEncoder<K: VoxelKey> {
    config: CodecConfig,
    quantizer: Quantizer<K>,
    tracked: VoxelSet<K>,
    schedule: IFrameSchedule,
    phase: CodecPhase,
    last_stats: Option<EncodeStats>,
    total_clamped: u64,
}

impl CloudEncoder<u32> {
    /// Encoder for the 32-bit-key profile.
    #[must_use]
    pub fn pc30() -> Self {
        Self::with_valid_config(CodecConfig::pc30(), Quantizer::UNIT)
    }
}

impl CloudEncoder<u64> {
    /// Encoder for the 64-bit-key profile.
    #[must_use]
    pub fn pc60() -> Self {
        Self::with_valid_config(CodecConfig::pc60(), Quantizer::MILLIMETER)
    }
}

impl<K: VoxelKey> CloudEncoder<K> {
    /// Creates an encoder with a custom configuration.
    pub fn new(config: CodecConfig) -> CodecResult<Self> {
        config.validate()?;
        let quantizer = Quantizer::new(config.precision)?;
        Ok(Self::with_valid_config(config, quantizer))
    }

    fn with_valid_config(config: CodecConfig, quantizer: Quantizer<K>) -> Self {
        Self {
            schedule: IFrameSchedule::new(config.iframe_rate),
            config,
            quantizer,
            tracked: VoxelSet::new(),
            phase: CodecPhase::Fresh,
            last_stats: None,
            total_clamped: 0,
        }
    }

    /// Encodes the next cloud of the stream.
    ///
    /// Frames that a decoder with the same [`Limits`] would reject fail with
    /// [`EncodeError::LimitsExceeded`].
    ///
    /// On error nothing is committed: the tracked cloud, the I-frame counter
    /// and the phase are as they were before the call.
    pub fn encode_cloud(&mut self, points: &[Point]) -> CodecResult<Vec<u8>> {
        let (current, quantize_stats) = self.quantizer.voxelize(points);
        warn_quantize(&quantize_stats);
        let limits = &self.config.limits;

        let mut payload = Vec::new();
        let (frame_type, added, removed) = if self.schedule.iframe_due() {
            check_limit(LimitKind::Voxels, limits.max_voxels, current.len())?;
            encode_iframe_payload(&current.sorted_keys(), &mut payload);
            (FrameType::IFrame, 0, 0)
        } else {
            let delta = diff(&current, &self.tracked);
            check_limit(LimitKind::Voxels, limits.max_voxels, delta.len())?;
            encode_pframe_payload(&delta.to_wire(), &mut payload);
            (FrameType::PFrame, delta.added(), delta.removed())
        };
        check_limit(LimitKind::PayloadBytes, limits.max_payload_bytes, payload.len())?;

        let frame = encode_frame(frame_type, &payload, self.config.compression)?;
        check_limit(LimitKind::FrameBytes, limits.max_frame_bytes, frame.len())?;

        let stats = EncodeStats {
            frame_type,
            points: quantize_stats.points,
            voxels: current.len(),
            clamped: quantize_stats.clamped,
            non_finite: quantize_stats.non_finite,
            delta_added: added,
            delta_removed: removed,
            raw_bytes: payload.len(),
            compressed_bytes: frame.len(),
        };
        tracing::debug!(
            "encoded {} #{}: {} voxels (+{} -{}), {} -> {} bytes",
            frame_type,
            self.schedule.counter(),
            stats.voxels,
            added,
            removed,
            stats.raw_bytes,
            stats.compressed_bytes
        );

        self.tracked = current;
        self.schedule.advance();
        self.phase = CodecPhase::Synced;
        self.total_clamped += quantize_stats.clamped as u64;
        self.last_stats = Some(stats);
        Ok(frame)
    }

    /// Clears the tracked cloud and forces the next frame to be an I-frame.
    pub fn reset_encoder(&mut self) {
        tracing::trace!("encoder reset");
        self.tracked.clear();
        self.schedule.reset();
        self.phase = CodecPhase::Fresh;
        self.last_stats = None;
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

    /// Position within the I-frame cadence; `0` means the next frame is an
    /// I-frame.
    #[must_use]
    pub fn frame_counter(&self) -> u32 {
        self.schedule.counter()
    }

    /// Number of cells in the last sent cloud.
    #[must_use]
    pub fn tracked_voxels(&self) -> usize {
        self.tracked.len()
    }

    /// Counters for the last successfully encoded frame.
    #[must_use]
    pub fn last_stats(&self) -> Option<&EncodeStats> {
        self.last_stats.as_ref()
    }

    /// Clamped points across every frame encoded by this instance.
    #[must_use]
    pub fn total_clamped(&self) -> u64 {
        self.total_clamped
    }
}

fn check_limit(kind: LimitKind, limit: usize, actual: usize) -> Result<(), EncodeError> {
    if actual > limit {
        tracing::warn!("refusing to encode frame: {kind} limit exceeded, {actual} > {limit}");
        return Err(EncodeError::LimitsExceeded {
            kind,
            limit,
            actual,
        });
    }
    Ok(())
}

fn warn_quantize(stats: &QuantizeStats) {
    if stats.clamped > 0 {
        tracing::warn!(
            "{} of {} points clamped into the representable grid",
            stats.clamped,
            stats.points
        );
    }
    if stats.non_finite > 0 {
        tracing::warn!(
            "dropped {} of {} points with non-finite coordinates",
            stats.non_finite,
            stats.points
        );
    }
}
