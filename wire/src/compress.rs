//! Generic byte-stream compression (zlib / DEFLATE).
//!
//! Pure byte transform: nothing here interprets frame structure.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::{Decompress, FlushDecompress, Status};

use crate::error::{DecodeError, EncodeError, InflateError, LimitKind, WireResult};
use crate::limits::Limits;

/// Smallest growth step for the inflate buffer.
const MIN_INFLATE_CHUNK: usize = 4 * 1024;

/// Compression level, `0` (store) to `9` (smallest output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Compression(u32);

impl Compression {
    /// Highest supported level.
    pub const MAX_LEVEL: u32 = 9;

    /// Creates a level, clamped to [`MAX_LEVEL`](Self::MAX_LEVEL).
    #[must_use]
    pub const fn new(level: u32) -> Self {
        if level > Self::MAX_LEVEL {
            Self(Self::MAX_LEVEL)
        } else {
            Self(level)
        }
    }

    /// No compression, stored blocks only.
    #[must_use]
    pub const fn none() -> Self {
        Self(0)
    }

    /// Fastest compression.
    #[must_use]
    pub const fn fast() -> Self {
        Self(1)
    }

    /// Smallest output.
    #[must_use]
    pub const fn best() -> Self {
        Self(Self::MAX_LEVEL)
    }

    /// Returns the numeric level.
    #[must_use]
    pub const fn level(self) -> u32 {
        self.0
    }
}

impl Default for Compression {
    fn default() -> Self {
        Self(6)
    }
}

impl From<Compression> for flate2::Compression {
    fn from(level: Compression) -> Self {
        Self::new(level.0)
    }
}

/// Compresses `bytes` into a new zlib stream.
pub fn compress(bytes: &[u8], level: Compression) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::with_capacity(bytes.len() / 2 + 16);
    compress_into(bytes, level, &mut out)?;
    Ok(out)
}

/// Compresses `bytes` and appends the zlib stream to `out`.
pub fn compress_into(bytes: &[u8], level: Compression, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    let mut encoder = ZlibEncoder::new(out, level.into());
    encoder
        .write_all(bytes)
        .map_err(|err| EncodeError::Compression { kind: err.kind() })?;
    encoder
        .finish()
        .map_err(|err| EncodeError::Compression { kind: err.kind() })?;
    Ok(())
}

/// Inflates a zlib stream.
///
/// The stream must be complete, pass its checksum and span all of `bytes`.
/// Output is capped at `limits.max_payload_bytes`.
pub fn decompress(bytes: &[u8], limits: &Limits) -> WireResult<Vec<u8>> {
    let limit = limits.max_payload_bytes;
    let cap = limit.saturating_add(1);
    let mut inflater = Decompress::new(true);
    let initial = bytes.len().saturating_mul(4).max(MIN_INFLATE_CHUNK).min(cap);
    let mut out = Vec::with_capacity(initial);

    loop {
        if out.len() == out.capacity() {
            let grow = out.capacity().max(MIN_INFLATE_CHUNK).min(cap - out.len());
            out.reserve_exact(grow);
        }

        let consumed = usize::try_from(inflater.total_in()).map_err(|_| corrupt())?;
        let input = bytes.get(consumed..).ok_or_else(corrupt)?;
        let out_before = out.len();
        let status = inflater
            .decompress_vec(input, &mut out, FlushDecompress::None)
            .map_err(|_| corrupt())?;

        if out.len() > limit {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::PayloadBytes,
                limit,
                actual: out.len(),
            });
        }

        match status {
            Status::StreamEnd => {
                let consumed = usize::try_from(inflater.total_in()).map_err(|_| corrupt())?;
                if consumed < bytes.len() {
                    return Err(DecodeError::MalformedCompressedData {
                        reason: InflateError::TrailingBytes {
                            extra: bytes.len() - consumed,
                        },
                    });
                }
                return Ok(out);
            }
            Status::Ok | Status::BufError => {
                let consumed_now = usize::try_from(inflater.total_in()).map_err(|_| corrupt())?;
                let stalled = consumed_now == consumed && out.len() == out_before;
                if stalled && out.len() < out.capacity() {
                    return Err(DecodeError::MalformedCompressedData {
                        reason: InflateError::Truncated,
                    });
                }
            }
        }
    }
}

const fn corrupt() -> DecodeError {
    DecodeError::MalformedCompressedData {
        reason: InflateError::Corrupt,
    }
}
