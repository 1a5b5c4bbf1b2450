use std::collections::BTreeSet;
use std::num::NonZeroU32;

use codec::{
    peek_frame_type, CloudDecoder, CloudEncoder, CodecConfig, CodecError, CodecPhase,
    DesyncReason, FrameType,
};
use voxel::{Point, Quantizer};

fn cloud(coords: &[(f64, f64, f64)]) -> Vec<Point> {
    coords.iter().copied().map(Point::from).collect()
}

fn as_set(points: &[Point]) -> BTreeSet<[u64; 3]> {
    points
        .iter()
        .map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
        .collect()
}

fn quantized(points: &[Point], q: &Quantizer<u64>) -> BTreeSet<[u64; 3]> {
    let centers: Vec<Point> = points.iter().map(|p| q.cell_center(*p)).collect();
    as_set(&centers)
}

/// Slow-moving synthetic scan: a ring of points drifting along x.
fn scan(frame: usize) -> Vec<Point> {
    (0..200)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / 200.0;
            Point::new(
                angle.cos() * 2.0 + frame as f64 * 0.004,
                angle.sin() * 2.0,
                0.3 * (i % 7) as f64,
            )
        })
        .collect()
}

#[test]
fn scenario_pc30_two_frames() {
    let mut encoder = CloudEncoder::pc30();
    let mut decoder = CloudDecoder::pc30();

    let frame1 = encoder
        .encode_cloud(&cloud(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)]))
        .unwrap();
    assert_eq!(peek_frame_type(&frame1).unwrap(), FrameType::IFrame);
    assert_eq!(encoder.last_stats().unwrap().voxels, 2);

    let frame2 = encoder
        .encode_cloud(&cloud(&[(1.0, 0.0, 0.0), (2.0, 0.0, 0.0)]))
        .unwrap();
    assert_eq!(peek_frame_type(&frame2).unwrap(), FrameType::PFrame);
    let stats = encoder.last_stats().unwrap();
    assert_eq!((stats.delta_added, stats.delta_removed), (1, 1));

    decoder.decode_cloud(&frame1).unwrap();
    let decoded = decoder.decode_cloud(&frame2).unwrap();
    assert_eq!(
        decoded,
        cloud(&[(1.0, 0.0, 0.0), (2.0, 0.0, 0.0)]),
        "ascending key order puts the smaller x first"
    );
}

#[test]
fn single_iframe_roundtrip_is_order_independent() {
    let points = scan(0);
    let mut reversed = points.clone();
    reversed.reverse();

    let mut a = CloudEncoder::pc60();
    let mut b = CloudEncoder::pc60();
    let frame_a = a.encode_cloud(&points).unwrap();
    let frame_b = b.encode_cloud(&reversed).unwrap();
    assert_eq!(frame_a, frame_b);

    let mut decoder = CloudDecoder::pc60();
    let decoded = decoder.decode_cloud(&frame_a).unwrap();
    assert_eq!(as_set(&decoded), quantized(&points, &Quantizer::MILLIMETER));
}

#[test]
fn points_in_one_cell_give_identical_frames() {
    let mut a = CloudEncoder::pc60();
    let mut b = CloudEncoder::pc60();
    let frame_a = a
        .encode_cloud(&cloud(&[(1.0001, 2.0, 3.0), (1.0004, 2.0002, 2.9996)]))
        .unwrap();
    let frame_b = b.encode_cloud(&cloud(&[(1.0, 2.0, 3.0)])).unwrap();
    assert_eq!(frame_a, frame_b);
}

#[test]
fn long_stream_tracks_every_frame() {
    let mut encoder = CloudEncoder::pc60();
    let mut decoder = CloudDecoder::pc60();
    let q = Quantizer::MILLIMETER;

    for i in 0..23 {
        let points = scan(i);
        let frame = encoder.encode_cloud(&points).unwrap();
        let expected = if i % 5 == 0 {
            FrameType::IFrame
        } else {
            FrameType::PFrame
        };
        assert_eq!(peek_frame_type(&frame).unwrap(), expected, "frame {i}");

        let decoded = decoder.decode_cloud(&frame).unwrap();
        assert_eq!(as_set(&decoded), quantized(&points, &q), "frame {i}");
        assert_eq!(decoder.tracked_voxels(), encoder.tracked_voxels());
    }
}

#[test]
fn pframes_are_smaller_for_slow_motion() {
    let mut encoder = CloudEncoder::pc60();
    let iframe = encoder.encode_cloud(&scan(0)).unwrap();
    let pframe = encoder.encode_cloud(&scan(0)).unwrap();
    assert!(pframe.len() < iframe.len());
}

#[test]
fn cadence_across_resets() {
    let config = CodecConfig::pc30().with_iframe_rate(NonZeroU32::new(4).unwrap());
    let mut encoder = CloudEncoder::<u32>::new(config).unwrap();
    let mut types = Vec::new();
    for i in 0..6 {
        if i == 2 {
            encoder.reset_encoder();
        }
        let frame = encoder
            .encode_cloud(&cloud(&[(i as f64, 0.0, 0.0)]))
            .unwrap();
        types.push(peek_frame_type(&frame).unwrap());
    }
    use FrameType::{IFrame as I, PFrame as P};
    assert_eq!(types, vec![I, P, I, P, P, P]);
    assert_eq!(encoder.frame_counter(), 0);
}

#[test]
fn lost_frame_is_detected_and_recovered() {
    let mut encoder = CloudEncoder::pc30();
    let mut decoder = CloudDecoder::pc30();

    let f1 = encoder.encode_cloud(&cloud(&[(0.0, 0.0, 0.0)])).unwrap();
    let _lost = encoder
        .encode_cloud(&cloud(&[(0.0, 0.0, 0.0), (5.0, 0.0, 0.0)]))
        .unwrap();
    let f3 = encoder.encode_cloud(&cloud(&[(0.0, 0.0, 0.0)])).unwrap();

    decoder.decode_cloud(&f1).unwrap();
    let err = decoder.decode_cloud(&f3).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Desync(DesyncReason::MissingKey { .. })
    ));
    assert!(err.requires_resync());
    assert_eq!(decoder.phase(), CodecPhase::Fresh);

    decoder.reset_decoder();
    encoder.reset_encoder();
    let resync = encoder.encode_cloud(&cloud(&[(3.0, 3.0, 3.0)])).unwrap();
    assert_eq!(
        decoder.decode_cloud(&resync).unwrap(),
        cloud(&[(3.0, 3.0, 3.0)])
    );
}

#[test]
fn empty_clouds_roundtrip() {
    let mut encoder = CloudEncoder::pc60();
    let mut decoder = CloudDecoder::pc60();
    for _ in 0..3 {
        let frame = encoder.encode_cloud(&[]).unwrap();
        assert!(decoder.decode_cloud(&frame).unwrap().is_empty());
    }
}

#[test]
fn profiles_reject_each_others_frames() {
    let mut encoder = CloudEncoder::pc60();
    let frame = encoder
        .encode_cloud(&cloud(&[(0.0, 0.0, 0.0), (0.001, 0.0, 0.0), (0.002, 0.0, 0.0)]))
        .unwrap();
    // Three 8-byte keys read as six 4-byte keys; the interleaved upper halves
    // break ascending order.
    let mut decoder = CloudDecoder::pc30();
    let err = decoder.decode_cloud(&frame).unwrap_err();
    assert!(matches!(err, CodecError::Wire(_)), "got {err:?}");
}
