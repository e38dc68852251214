extern crate criterion;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use paulimer::{exact, PauliRegister, PauliRegisterSequence};
use quantum_core::{All, PauliLabel, Phase};
use rand::prelude::*;

pub fn register_multiply_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("PauliRegister::checked_mul");
    for size in [100usize, 1000usize, 10000usize] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, size| {
            bencher.iter_batched(
                || (random_register(*size), random_register(*size)),
                |pair| pair.0.checked_mul(&pair.1),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

pub fn sequence_multiply_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("PauliRegisterSequence::checked_mul");
    for terms in [4usize, 16usize, 64usize] {
        group.bench_with_input(BenchmarkId::from_parameter(terms), &terms, |bencher, terms| {
            bencher.iter_batched(
                || (random_sequence(16, *terms), random_sequence(16, *terms)),
                |pair| pair.0.checked_mul(&pair.1),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, register_multiply_benchmark, sequence_multiply_benchmark);
criterion_main!(benches);

fn random_register(width: usize) -> PauliRegister {
    let labels = PauliLabel::all();
    let labels = (0..width).map(|_| labels[thread_rng().gen_range(0..4)]).collect();
    PauliRegister::new(labels, Phase::from_exponent(thread_rng().gen_range(0..4)))
}

fn random_sequence(width: usize, terms: usize) -> PauliRegisterSequence {
    let terms = (0..terms).map(|_| {
        let numerator = thread_rng().gen_range(-8..=8);
        (random_register(width), exact((numerator, 8), (0, 1)))
    });
    PauliRegisterSequence::try_from_terms(width, terms).unwrap_or_else(|_| PauliRegisterSequence::zero(width))
}
