//! Core throughput benchmarks.
//!
//! - RNG sampling across the call shapes games use per frame.
//! - Rewind window churn at the default capacity, where every push evicts.
//! - Recording digest over a one-minute session.
//!
//! Run with: `cargo bench --bench core_benchmarks`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use attract_core::prelude::*;

#[derive(Debug, Clone, serde::Serialize)]
struct Ship {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    shots: Vec<(f64, f64)>,
}

fn ship(seed: u64) -> Ship {
    let mut rng = Random::new(seed);
    Ship {
        x: rng.get_to(100.0),
        y: rng.get_to(100.0),
        vx: rng.get_signed_range(0.5, 1.5),
        vy: rng.get_signed_range(0.5, 1.5),
        shots: (0..8).map(|_| (rng.get_to(100.0), rng.get_to(100.0))).collect(),
    }
}

fn record(frame: u64, rng: &Random) -> FrameRecord<Ship> {
    FrameRecord::new(
        frame,
        InputSnapshot::held().at(frame as f64, 50.0),
        LedgerSnapshot {
            score: frame as f64,
            ticks: frame as i64,
        },
        rng.state(),
    )
    .with_state(ship(frame))
}

// ---------------------------------------------------------------------------
// RNG
// ---------------------------------------------------------------------------

fn bench_rng(c: &mut Criterion) {
    let mut group = c.benchmark_group("rng");

    group.bench_function("get_range", |b| {
        let mut rng = Random::new(42);
        b.iter(|| black_box(rng.get_range(black_box(-10.0), black_box(10.0))));
    });

    group.bench_function("get_int_range", |b| {
        let mut rng = Random::new(42);
        b.iter(|| black_box(rng.get_int_range(black_box(-1000), black_box(1000))));
    });

    group.bench_function("state_capture_restore", |b| {
        let mut rng = Random::new(42);
        b.iter(|| {
            let saved = rng.state();
            rng.get();
            rng.restore_state(black_box(&saved));
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Rewind window
// ---------------------------------------------------------------------------

fn bench_rewind(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewind");

    for capacity in [60usize, DEFAULT_REWIND_CAPACITY] {
        group.bench_with_input(
            BenchmarkId::new("push_full_window", capacity),
            &capacity,
            |b, &capacity| {
                let rng = Random::new(7);
                let mut window = RewindWindow::with_capacity(capacity);
                window.begin();
                for f in 0..capacity as u64 {
                    window.push(record(f, &rng));
                }
                let template = record(0, &rng);
                b.iter(|| window.push(black_box(template.clone())));
            },
        );
    }

    group.bench_function("fill_and_drain_600", |b| {
        let rng = Random::new(7);
        let frames: Vec<_> = (0..DEFAULT_REWIND_CAPACITY as u64)
            .map(|f| record(f, &rng))
            .collect();
        b.iter(|| {
            let mut window = RewindWindow::with_capacity(DEFAULT_REWIND_CAPACITY);
            for frame in &frames {
                window.push(frame.clone());
            }
            while let Some(frame) = window.pop() {
                black_box(frame);
            }
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Digest
// ---------------------------------------------------------------------------

fn bench_digest(c: &mut Criterion) {
    let rng = Random::new(3);
    let mut log = ReplayLog::new(DEFAULT_REWIND_CAPACITY);
    log.begin_recording(SessionSeed(3));
    for f in 0..3600 {
        log.record(record(f, &rng));
    }
    log.finish_recording();

    c.bench_function("digest_3600_frames", |b| {
        b.iter(|| {
            let recording = log.completed().unwrap();
            black_box(recording.digest().unwrap())
        });
    });
}

criterion_group!(benches, bench_rng, bench_rewind, bench_digest);
criterion_main!(benches);
