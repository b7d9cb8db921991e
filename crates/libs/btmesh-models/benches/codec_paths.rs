use btmesh_models::AccessCodec;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const PROPERTY_STATUS: &[u8] = &[0x4e, 0x8c, 0x00, 0x01, 0x05];
const TIME_STATUS: &[u8] = &[0x5d, 0xbd, 0xf7, 0x67, 0x26, 0x00, 0x1a, 0xb2, 0x49, 0x02, 0x48];
const DURATION_TEST_STATUS: &[u8] =
    &[0xe9, 0x36, 0x01, 0x07, 0x05, 0x04, 0x03, 0x02, 0x01, 0x06, 0x08, 0x07, 0x05, 0x06, 0x34, 0x12];

fn bench_build_codec(c: &mut Criterion) {
    c.bench_function("btmesh_models/build_standard_codec", |b| {
        b.iter(|| {
            let codec = AccessCodec::standard().expect("standard codec must build");
            black_box(codec);
        });
    });
}

fn bench_decode(c: &mut Criterion) {
    let codec = AccessCodec::standard().expect("standard codec must build");
    for (name, wire) in [
        ("btmesh_models/decode_property_status", PROPERTY_STATUS),
        ("btmesh_models/decode_time_status", TIME_STATUS),
        ("btmesh_models/decode_duration_test_status", DURATION_TEST_STATUS),
    ] {
        c.bench_function(name, |b| {
            b.iter(|| {
                let message = codec.decode(black_box(wire)).expect("decode should succeed");
                black_box(message);
            });
        });
    }
}

fn bench_encode(c: &mut Criterion) {
    let codec = AccessCodec::standard().expect("standard codec must build");
    let message = codec.decode(DURATION_TEST_STATUS).expect("decode should succeed");
    c.bench_function("btmesh_models/encode_duration_test_status", |b| {
        b.iter(|| {
            let wire = codec.encode(black_box(&message)).expect("encode should succeed");
            black_box(wire);
        });
    });
}

criterion_group!(benches, bench_build_codec, bench_decode, bench_encode);
criterion_main!(benches);
