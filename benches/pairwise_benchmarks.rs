//! Benchmarks for the pairwise gravity kernels.
//!
//! Run with: cargo bench
//!
//! To compare against baseline:
//! 1. First run: cargo bench -- --save-baseline main
//! 2. After changes: cargo bench -- --baseline main

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use pairgrav::{make_positions, ParallelPairwiseGravity, PairwiseGravity};

const SIZES: [usize; 4] = [100, 200, 400, 800];

fn bench_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise");

    for n in SIZES {
        let masses = vec![1.0; n];
        let positions = make_positions(n, 3);
        let mut gravity = PairwiseGravity::new(&masses, 3, 0.1);

        group.throughput(Throughput::Elements((n * (n - 1) / 2) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &positions, |b, positions| {
            b.iter(|| {
                let acc = gravity.step(black_box(positions)).unwrap();
                black_box(acc[0][0]);
            });
        });
    }

    group.finish();
}

fn bench_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel");

    for n in SIZES {
        let masses = vec![1.0; n];
        let positions = make_positions(n, 3);

        for threads in [2, 4] {
            let mut gravity = ParallelPairwiseGravity::new(&masses, 3, 0.1, threads).unwrap();

            group.throughput(Throughput::Elements((n * (n - 1) / 2) as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{threads}t"), n),
                &positions,
                |b, positions| {
                    b.iter(|| {
                        let acc = gravity.step(black_box(positions)).unwrap();
                        black_box(acc[0][0]);
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_sequential, bench_parallel);
criterion_main!(benches);
