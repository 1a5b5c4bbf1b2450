use proptest::prelude::*;
use wire::{
    compress, decode_frame, decode_pframe_payload, decompress, encode_frame,
    encode_pframe_payload, Compression, DecodeError, FrameType, Limits, FLAG_ADDED, FLAG_REMOVED,
};

fn pframe_records() -> impl Strategy<Value = Vec<(u32, i8)>> {
    prop::collection::btree_map(0u32..(1 << 30), any::<bool>(), 0..256).prop_map(|map| {
        map.into_iter()
            .map(|(key, added)| (key, if added { FLAG_ADDED } else { FLAG_REMOVED }))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_compress_inverse(bytes in prop::collection::vec(any::<u8>(), 0..4096), level in 0u32..=9) {
        let compressed = compress(&bytes, Compression::new(level)).unwrap();
        let restored = decompress(&compressed, &Limits::for_testing()).unwrap();
        prop_assert_eq!(restored, bytes);
    }

    #[test]
    fn prop_pframe_frame_roundtrip(records in pframe_records()) {
        let mut payload = Vec::new();
        encode_pframe_payload(&records, &mut payload);
        let bytes = encode_frame(FrameType::PFrame, &payload, Compression::fast()).unwrap();

        let frame = decode_frame(&bytes, &Limits::for_testing()).unwrap();
        prop_assert_eq!(frame.frame_type, FrameType::PFrame);
        let decoded: Vec<(u32, i8)> = decode_pframe_payload(&frame.payload, &Limits::for_testing()).unwrap();
        prop_assert_eq!(decoded, records);
    }

    #[test]
    fn prop_arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        match decode_frame(&bytes, &Limits::for_testing()) {
            Ok(frame) => prop_assert_ne!(frame.frame_type, FrameType::Unknown),
            Err(DecodeError::FrameTooSmall { .. })
            | Err(DecodeError::MalformedCompressedData { .. })
            | Err(DecodeError::UnknownFrameType { .. })
            | Err(DecodeError::LimitsExceeded { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }
}
