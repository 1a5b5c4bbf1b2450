//! Per-instance codec configuration and the two named profiles.

use std::num::NonZeroU32;

use wire::{Compression, Limits};

use crate::error::{CodecError, CodecResult, ConfigReason};

/// Grid scale for the 32-bit-key profile (one cell per unit).
pub const PC30_PRECISION: f64 = 1.0;

/// Grid scale for the 64-bit-key profile (millimeter cells for meter input).
pub const PC60_PRECISION: f64 = 1000.0;

/// An I-frame every 10 frames for the 32-bit-key profile.
pub const PC30_IFRAME_RATE: NonZeroU32 = match NonZeroU32::new(10) {
    Some(rate) => rate,
    None => unreachable!(),
};

/// An I-frame every 5 frames for the 64-bit-key profile.
pub const PC60_IFRAME_RATE: NonZeroU32 = match NonZeroU32::new(5) {
    Some(rate) => rate,
    None => unreachable!(),
};

/// Settings fixed at construction of an encoder or decoder.
///
/// The key width is carried by the key type parameter of
/// [`CloudEncoder`](crate::CloudEncoder) and [`CloudDecoder`](crate::CloudDecoder),
/// not by this struct.
#[derive(Debug, Clone, PartialEq)]
pub struct CodecConfig {
    /// Scale factor applied to metric coordinates before rounding.
    pub precision: f64,
    /// Every `iframe_rate`-th frame is an I-frame.
    pub iframe_rate: NonZeroU32,
    /// DEFLATE level for produced frames.
    pub compression: Compression,
    /// Decode-side bounds.
    pub limits: Limits,
}

impl CodecConfig {
    /// Settings for the 32-bit-key profile.
    #[must_use]
    pub fn pc30() -> Self {
        Self {
            precision: PC30_PRECISION,
            iframe_rate: PC30_IFRAME_RATE,
            compression: Compression::default(),
            limits: Limits::default(),
        }
    }

    /// Settings for the 64-bit-key profile.
    #[must_use]
    pub fn pc60() -> Self {
        Self {
            precision: PC60_PRECISION,
            iframe_rate: PC60_IFRAME_RATE,
            compression: Compression::default(),
            limits: Limits::default(),
        }
    }

    #[must_use]
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub fn with_iframe_rate(mut self, iframe_rate: NonZeroU32) -> Self {
        self.iframe_rate = iframe_rate;
        self
    }

    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Checks the settings.
    pub fn validate(&self) -> CodecResult<()> {
        if !self.precision.is_finite() || self.precision <= 0.0 {
            return Err(CodecError::InvalidConfig(ConfigReason::InvalidPrecision {
                precision: self.precision,
            }));
        }
        Ok(())
    }
}
