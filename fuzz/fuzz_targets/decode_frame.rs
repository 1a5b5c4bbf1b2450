#![no_main]

use codec::{CloudDecoder, CodecConfig, CodecPhase};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let config = CodecConfig::pc30().with_limits(wire::Limits::for_testing());
    let mut decoder = CloudDecoder::<u32>::new(config).unwrap();

    // Split the input into a sequence of length-prefixed frames fed to one decoder.
    let mut idx = 0usize;
    while idx < data.len() && idx < 8192 {
        let len = (data[idx] as usize % 200).saturating_add(1);
        idx += 1;
        let end = (idx + len).min(data.len());
        let frame = &data[idx..end];
        idx = end;

        let before = decoder.tracked_voxels();
        match decoder.decode_cloud(frame) {
            Ok(cloud) => assert_eq!(cloud.len(), decoder.tracked_voxels()),
            Err(err) if err.is_desync() => assert_eq!(decoder.phase(), CodecPhase::Fresh),
            Err(_) => assert_eq!(decoder.tracked_voxels(), before),
        }
    }
});
