//! Benchmarks for the two talk-box rates.
//!
//! Run with: cargo bench
//!
//! At 48kHz a 256-sample block leaves 5.33ms for one `update_coefficients`
//! call plus 256 `process` calls.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use talkbox::analysis::{autocorrelation, levinson_durbin, DEFAULT_K_MAX};
use talkbox::{EngineConfig, TalkBox};

/// Common analysis block lengths.
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

/// LPC orders worth comparing.
const ORDERS: &[usize] = &[10, 20, 40];

fn test_voice(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / 48_000.0;
            0.3 * (2.0 * std::f32::consts::PI * 700.0 * t).sin()
                + 0.2 * (2.0 * std::f32::consts::PI * 2300.0 * t).sin()
        })
        .collect()
}

fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("talkbox/process");

    for &size in BLOCK_SIZES {
        let voice = test_voice(size);
        let mut talkbox = TalkBox::new(EngineConfig::new(48_000.0, 10, size)).unwrap();

        group.bench_with_input(BenchmarkId::new("block", size), &size, |b, _| {
            b.iter(|| {
                for &v in &voice {
                    let mut frame = [1.0, v];
                    talkbox.process(black_box(&mut frame));
                }
                talkbox.update_coefficients();
            })
        });
    }

    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("talkbox/analysis");
    let block = test_voice(256);

    for &order in ORDERS {
        let mut acf = vec![0.0; order + 1];
        group.bench_with_input(BenchmarkId::new("autocorrelation", order), &order, |b, _| {
            b.iter(|| autocorrelation(black_box(&block), &mut acf))
        });

        let mut a = vec![0.0; order];
        group.bench_with_input(BenchmarkId::new("levinson", order), &order, |b, _| {
            b.iter(|| levinson_durbin(black_box(&acf), &mut a, DEFAULT_K_MAX))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_process, bench_analysis);
criterion_main!(benches);
