//! Runtime selection between the 32-bit and 64-bit key profiles.

use clap::ValueEnum;
use codec::{CloudDecoder, CloudEncoder, CodecConfig, CodecResult, DecodeStats, EncodeStats};
use voxel::Point;

/// Named codec profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Profile {
    /// 30-bit keys, unit grid, I-frame every 10 frames.
    Pc30,
    /// 60-bit keys, millimeter grid, I-frame every 5 frames.
    #[default]
    Pc60,
}

impl Profile {
    /// Default configuration for this profile.
    #[must_use]
    pub fn config(self) -> CodecConfig {
        match self {
            Self::Pc30 => CodecConfig::pc30(),
            Self::Pc60 => CodecConfig::pc60(),
        }
    }

    #[must_use]
    pub const fn key_bits(self) -> u32 {
        match self {
            Self::Pc30 => <u32 as voxel::VoxelKey>::KEY_BITS,
            Self::Pc60 => <u64 as voxel::VoxelKey>::KEY_BITS,
        }
    }
}

/// Encoder for a profile chosen at runtime.
#[derive(Debug, Clone)]
pub enum StreamEncoder {
    Pc30(CloudEncoder<u32>),
    Pc60(CloudEncoder<u64>),
}

impl StreamEncoder {
    pub fn new(profile: Profile, config: CodecConfig) -> CodecResult<Self> {
        Ok(match profile {
            Profile::Pc30 => Self::Pc30(CloudEncoder::new(config)?),
            Profile::Pc60 => Self::Pc60(CloudEncoder::new(config)?),
        })
    }

    pub fn encode_cloud(&mut self, points: &[Point]) -> CodecResult<Vec<u8>> {
        match self {
            Self::Pc30(encoder) => encoder.encode_cloud(points),
            Self::Pc60(encoder) => encoder.encode_cloud(points),
        }
    }

    #[must_use]
    pub fn last_stats(&self) -> Option<&EncodeStats> {
        match self {
            Self::Pc30(encoder) => encoder.last_stats(),
            Self::Pc60(encoder) => encoder.last_stats(),
        }
    }
}

/// Decoder for a profile chosen at runtime.
#[derive(Debug, Clone)]
pub enum StreamDecoder {
    Pc30(CloudDecoder<u32>),
    Pc60(CloudDecoder<u64>),
}

impl StreamDecoder {
    pub fn new(profile: Profile, config: CodecConfig) -> CodecResult<Self> {
        Ok(match profile {
            Profile::Pc30 => Self::Pc30(CloudDecoder::new(config)?),
            Profile::Pc60 => Self::Pc60(CloudDecoder::new(config)?),
        })
    }

    pub fn decode_cloud(&mut self, bytes: &[u8]) -> CodecResult<Vec<Point>> {
        match self {
            Self::Pc30(decoder) => decoder.decode_cloud(bytes),
            Self::Pc60(decoder) => decoder.decode_cloud(bytes),
        }
    }

    /// Decodes the next frame, resetting after a desync.
    ///
    /// Returns `Ok(None)` for a frame that could not be applied to the tracked
    /// cloud; every frame up to the next I-frame then yields `Ok(None)` too.
    /// Malformed frames are still errors.
    pub fn decode_or_resync(&mut self, bytes: &[u8]) -> CodecResult<Option<Vec<Point>>> {
        match self.decode_cloud(bytes) {
            Ok(points) => Ok(Some(points)),
            Err(err) if err.requires_resync() => {
                tracing::warn!("{err}; skipping frames until the next i-frame");
                self.reset_decoder();
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub fn reset_decoder(&mut self) {
        match self {
            Self::Pc30(decoder) => decoder.reset_decoder(),
            Self::Pc60(decoder) => decoder.reset_decoder(),
        }
    }

    #[must_use]
    pub fn last_stats(&self) -> Option<&DecodeStats> {
        match self {
            Self::Pc30(decoder) => decoder.last_stats(),
            Self::Pc60(decoder) => decoder.last_stats(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_configs() {
        assert_eq!(Profile::Pc30.config(), CodecConfig::pc30());
        assert_eq!(Profile::Pc60.config(), CodecConfig::pc60());
        assert_eq!(Profile::Pc30.key_bits(), 30);
        assert_eq!(Profile::Pc60.key_bits(), 60);
    }

    #[test]
    fn profile_value_names() {
        assert_eq!(Profile::from_str("pc30", true).unwrap(), Profile::Pc30);
        assert_eq!(Profile::from_str("PC60", true).unwrap(), Profile::Pc60);
    }

    fn single(x: f64) -> Vec<Point> {
        vec![Point::new(x, 0.0, 0.0)]
    }

    #[test]
    fn lost_frame_skips_until_iframe() {
        let profile = Profile::Pc30;
        let mut encoder = StreamEncoder::new(profile, profile.config()).unwrap();
        let mut decoder = StreamDecoder::new(profile, profile.config()).unwrap();
        let frames: Vec<Vec<u8>> = (0..4)
            .map(|i| encoder.encode_cloud(&single(f64::from(i))).unwrap())
            .collect();

        assert_eq!(decoder.decode_or_resync(&frames[0]).unwrap(), Some(single(0.0)));
        // frames[1] never arrives
        assert_eq!(decoder.decode_or_resync(&frames[2]).unwrap(), None);
        assert_eq!(decoder.decode_or_resync(&frames[3]).unwrap(), None);

        let mut restarted = StreamEncoder::new(profile, profile.config()).unwrap();
        let iframe = restarted.encode_cloud(&single(7.0)).unwrap();
        assert_eq!(decoder.decode_or_resync(&iframe).unwrap(), Some(single(7.0)));
    }

    #[test]
    fn malformed_frame_is_still_an_error() {
        let mut decoder = StreamDecoder::new(Profile::Pc60, Profile::Pc60.config()).unwrap();
        assert!(decoder.decode_or_resync(&[0xFF, 0xFF, 0xFF, 0x00, 1, 2, 3]).is_err());
    }

    #[test]
    fn stream_roundtrip_both_profiles() {
        let points = vec![Point::new(1.0, 2.0, 3.0)];
        for profile in [Profile::Pc30, Profile::Pc60] {
            let mut encoder = StreamEncoder::new(profile, profile.config()).unwrap();
            let mut decoder = StreamDecoder::new(profile, profile.config()).unwrap();
            let frame = encoder.encode_cloud(&points).unwrap();
            assert_eq!(decoder.decode_cloud(&frame).unwrap(), points);
            assert_eq!(encoder.last_stats().unwrap().voxels, 1);
            assert_eq!(decoder.last_stats().unwrap().voxels, 1);
        }
    }
}
