//! Wrapped floats against the plain primitives.
//!
//! Each group folds the same inputs with the plain `f32`/`f64` operation and
//! with the `Fp` one, at several batch lengths.

use std::ops::{Add, Div, Mul};

use criterion::{
    criterion_group, criterion_main, measurement::Measurement, BatchSize, BenchmarkGroup,
    BenchmarkId, Criterion, Throughput,
};
use ffp_host::{Fp32, Fp64};

const LENGTHS: [usize; 5] = [1, 8, 64, 256, 1024];

/// `len` values evenly spread over `[lo, hi)`.
fn inputs(len: usize, lo: f64, hi: f64) -> Vec<f64> {
    (0..len)
        .map(|i| lo + (hi - lo) * (i as f64) / (len as f64))
        .collect()
}

fn fold<T>(
    group: &mut BenchmarkGroup<'_, impl Measurement>,
    id: &str,
    op: impl Fn(T, T) -> T + Copy,
    init: T,
    convert: impl Fn(f64) -> T + Copy,
    range: (f64, f64),
) where
    T: Copy,
{
    for len in LENGTHS {
        let values: Vec<T> = inputs(len, range.0, range.1).into_iter().map(convert).collect();
        group.throughput(Throughput::Elements(len as u64));
        group.bench_function(BenchmarkId::new(id, len), |b| {
            b.iter_batched_ref(
                || values.clone(),
                |vals| vals.iter().copied().fold(init, op),
                BatchSize::SmallInput,
            );
        });
    }
}

fn binary_group(
    c: &mut Criterion,
    name: &str,
    range: (f64, f64),
    ops: (fn(f32, f32) -> f32, fn(Fp32, Fp32) -> Fp32, fn(f64, f64) -> f64, fn(Fp64, Fp64) -> Fp64),
) {
    let mut group = c.benchmark_group(name);
    let (raw32, fp32, raw64, fp64) = ops;

    fold(&mut group, "std::f32", raw32, 1.0, |v| v as f32, range);
    fold(&mut group, "Fp32", fp32, Fp32::ONE, |v| Fp32::new(v as f32), range);
    fold(&mut group, "std::f64", raw64, 1.0, |v| v, range);
    fold(&mut group, "Fp64", fp64, Fp64::ONE, Fp64::new, range);
    group.finish();
}

fn add(c: &mut Criterion) {
    binary_group(c, "add", (0.0, 1.0), (f32::add, Fp32::add, f64::add, Fp64::add));
}

// near 1 to stay clear of subnormals and overflow
fn mul(c: &mut Criterion) {
    binary_group(c, "mul", (0.9, 1.1), (f32::mul, Fp32::mul, f64::mul, Fp64::mul));
}

fn div(c: &mut Criterion) {
    binary_group(c, "div", (0.9, 1.1), (f32::div, Fp32::div, f64::div, Fp64::div));
}

fn min(c: &mut Criterion) {
    binary_group(c, "min", (0.0, 1.0), (f32::min, Fp32::min, f64::min, Fp64::min));
}

fn max(c: &mut Criterion) {
    binary_group(c, "max", (0.0, 1.0), (f32::max, Fp32::max, f64::max, Fp64::max));
}

fn sqrt(c: &mut Criterion) {
    binary_group(
        c,
        "sqrt_sum",
        (0.0, 1.0),
        (
            |acc, v| acc + v.sqrt(),
            |acc, v| acc + v.sqrt(),
            |acc, v| acc + v.sqrt(),
            |acc, v| acc + v.sqrt(),
        ),
    );
}

criterion_group!(benches, add, mul, div, min, max, sqrt);
criterion_main!(benches);
