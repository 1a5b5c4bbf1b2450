#![no_main]

use libfuzzer_sys::fuzz_target;
use wire::{compress, decompress, Compression, Limits};

fuzz_target!(|data: &[u8]| {
    let limits = Limits::for_testing();
    let _ = decompress(data, &limits);

    if data.len() <= limits.max_payload_bytes {
        let packed = compress(data, Compression::fast()).unwrap();
        assert_eq!(decompress(&packed, &limits).unwrap(), data);
    }
});
