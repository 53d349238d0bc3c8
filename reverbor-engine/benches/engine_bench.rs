//! Block-processing throughput for both topologies.
//!
//! Run with: cargo bench -p reverbor-engine
//!
//! Reference deadlines at 48kHz:
//!   - 64 frames  = 1.33ms
//!   - 128 frames = 2.67ms
//!   - 256 frames = 5.33ms
//!   - 512 frames = 10.67ms

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use reverbor_engine::{CombBank, MultiTap, ReverbEngine, Topology};

const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

/// Interleaved stereo: short decaying burst followed by a quiet sine.
fn stereo_input(frames: usize) -> Vec<f32> {
    (0..frames)
        .flat_map(|i| {
            let x = if i < 10 { 1.0 - i as f32 / 10.0 } else { (i as f32 * 0.05).sin() * 0.1 };
            [x, x]
        })
        .collect()
}

fn bench_topologies(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/process");

    for &frames in BLOCK_SIZES {
        group.throughput(Throughput::Elements(frames as u64));
        let input = stereo_input(frames);
        let mut buf = input.clone();

        for topology in [Topology::CombBank, Topology::MultiTap] {
            let mut engine = ReverbEngine::with_topology(topology);
            engine.set_time(0.8);
            engine.set_depth(0.7);
            engine.set_mix(0.4);
            group.bench_with_input(BenchmarkId::new(topology.name(), frames), &frames, |b, &n| {
                b.iter(|| {
                    buf.copy_from_slice(&input);
                    black_box(engine.process(black_box(&mut buf), n))
                })
            });
        }
    }

    group.finish();
}

fn bench_static_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/static");
    let frames = 256;
    let input = stereo_input(frames);
    let mut buf = input.clone();

    let mut comb = ReverbEngine::new(CombBank::new());
    comb.set_time(0.8);
    comb.set_depth(0.7);
    group.bench_function("comb-bank", |b| {
        b.iter(|| {
            buf.copy_from_slice(&input);
            black_box(comb.process(black_box(&mut buf), frames))
        })
    });

    let mut taps = ReverbEngine::new(MultiTap::new());
    taps.set_time(0.8);
    taps.set_depth(0.7);
    group.bench_function("multi-tap", |b| {
        b.iter(|| {
            buf.copy_from_slice(&input);
            black_box(taps.process(black_box(&mut buf), frames))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_topologies, bench_static_dispatch);
criterion_main!(benches);
