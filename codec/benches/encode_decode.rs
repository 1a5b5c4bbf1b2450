//! Criterion benchmarks for per-frame encode and decode cost.

use codec::{CloudDecoder, CloudEncoder};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use voxel::Point;

/// A sweeping depth-sensor style scan: `rows * cols` points on a wavy surface.
fn make_scan(rows: usize, cols: usize, frame: usize) -> Vec<Point> {
    let shift = frame as f64 * 0.01;
    (0..rows * cols)
        .map(|i| {
            let (r, c) = ((i / cols) as f64, (i % cols) as f64);
            let x = c * 0.01 - 1.0;
            let y = r * 0.01 - 1.0;
            let z = 2.0 + 0.1 * ((x + shift) * 3.0).sin() * (y * 2.0).cos();
            Point::new(x, y, z)
        })
        .collect()
}

fn bench_encode_iframe(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_iframe_pc60");
    for side in [64usize, 160] {
        let scan = make_scan(side, side, 0);
        group.throughput(Throughput::Elements(scan.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &scan, |b, scan| {
            b.iter(|| {
                let mut encoder = CloudEncoder::pc60();
                black_box(encoder.encode_cloud(scan).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_encode_pframe(c: &mut Criterion) {
    let first = make_scan(160, 160, 0);
    let second = make_scan(160, 160, 1);

    c.bench_function("encode_pframe_pc60_25600", |b| {
        b.iter(|| {
            let mut encoder = CloudEncoder::pc60();
            encoder.encode_cloud(&first).unwrap();
            black_box(encoder.encode_cloud(&second).unwrap());
        });
    });
}

fn bench_decode_stream(c: &mut Criterion) {
    let mut encoder = CloudEncoder::pc60();
    let frames: Vec<Vec<u8>> = (0..5)
        .map(|i| encoder.encode_cloud(&make_scan(160, 160, i)).unwrap())
        .collect();

    c.bench_function("decode_stream_pc60_5x25600", |b| {
        b.iter(|| {
            let mut decoder = CloudDecoder::pc60();
            for frame in &frames {
                black_box(decoder.decode_cloud(frame).unwrap());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_encode_iframe,
    bench_encode_pframe,
    bench_decode_stream
);
criterion_main!(benches);
