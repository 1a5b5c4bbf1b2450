//! Frame header, payload layout and DEFLATE stage for the pcc codec.
//!
//! This crate handles the binary wire format of one frame: the fixed
//! frame-type sentinel, the serialized key / flag records, and the zlib
//! compression pass. It does not track state between frames.
//!
//! # Frame layout
//!
//! ```text
//! [ u32 LE frame-type sentinel ][ zlib( payload ) ]
//!
//! I-frame payload: key*            (ascending, LE, 4 or 8 bytes)
//! P-frame payload: (key, i8 flag)* (ascending, flag +1 added / -1 removed)
//! ```
//!
//! # Design Principles
//!
//! - **Fixed header position** - The sentinel is never content-sniffed.
//! - **Bounded decoding** - Frame, inflated payload and record counts are
//!   checked against [`Limits`] before they are trusted.
//! - **No domain knowledge** - Keys are opaque; this crate does not know what
//!   a point or a tracked state is.

mod compress;
mod error;
mod frame;
mod header;
mod limits;
mod payload;

pub use compress::{compress, compress_into, decompress, Compression};
pub use error::{DecodeError, EncodeError, InflateError, LimitKind, WireResult};
pub use frame::{decode_frame, encode_frame, peek_frame_type, DecodedFrame};
pub use header::{
    frame_type_to_header, header_to_frame_type, read_header, write_header, FrameType,
    HEADER_SIZE, IFRAME_ID, PFRAME_ID, UNKNOWN_ID,
};
pub use limits::Limits;
pub use payload::{
    decode_iframe_payload, decode_pframe_payload, encode_iframe_payload, encode_pframe_payload,
    pframe_stride, FLAG_ADDED, FLAG_REMOVED,
};
