use std::collections::BTreeSet;

use codec::{apply_delta, diff, CloudDecoder, CloudEncoder, Change};
use proptest::prelude::*;
use voxel::{Point, VoxelSet};

fn key_set() -> impl Strategy<Value = BTreeSet<u32>> {
    prop::collection::btree_set(0u32..4096, 0..128)
}

fn small_cloud() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-20i32..20, -20i32..20, -5i32..5), 0..64).prop_map(|coords| {
        coords
            .into_iter()
            .map(|(x, y, z)| Point::new(f64::from(x), f64::from(y), f64::from(z)))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_delta_reconstructs_current(previous in key_set(), current in key_set()) {
        let prev: VoxelSet<u32> = previous.iter().copied().collect();
        let cur: VoxelSet<u32> = current.iter().copied().collect();
        let delta = diff(&cur, &prev);

        let added: BTreeSet<u32> = current.difference(&previous).copied().collect();
        let removed: BTreeSet<u32> = previous.difference(&current).copied().collect();
        for &(key, change) in delta.entries() {
            match change {
                Change::Added => prop_assert!(added.contains(&key)),
                Change::Removed => prop_assert!(removed.contains(&key)),
            }
        }
        prop_assert_eq!(delta.len(), added.len() + removed.len());
        prop_assert!(delta.entries().windows(2).all(|w| w[0].0 < w[1].0));

        prop_assert_eq!(apply_delta(&prev, &delta).unwrap(), cur);
    }

    #[test]
    fn prop_stream_decoder_matches_encoder(clouds in prop::collection::vec(small_cloud(), 1..16)) {
        let mut encoder = CloudEncoder::pc30();
        let mut decoder = CloudDecoder::pc30();
        for points in &clouds {
            let frame = encoder.encode_cloud(points).unwrap();
            let decoded = decoder.decode_cloud(&frame).unwrap();

            let (expected, _) = encoder.quantizer().voxelize(points);
            prop_assert_eq!(decoded, encoder.quantizer().devoxelize(&expected));
        }
    }
}
