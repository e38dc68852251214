extern crate criterion;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fockmap::{check_anti_commutation, encode_hamiltonian, Encoding, Hamiltonian, LadderTable};

pub fn ladder_table_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("LadderTable::build");
    for mode_count in [16usize, 64usize, 256usize] {
        let encodings = [
            Encoding::bravyi_kitaev(mode_count).unwrap(),
            Encoding::balanced_ternary(mode_count).unwrap(),
        ];
        for encoding in encodings {
            group.bench_with_input(BenchmarkId::new(encoding.name(), mode_count), &encoding, |bencher, encoding| {
                bencher.iter(|| LadderTable::build(encoding));
            });
        }
    }
    group.finish();
}

pub fn anti_commutation_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("check_anti_commutation");
    for mode_count in [8usize, 16usize, 32usize] {
        let table = LadderTable::build(&Encoding::jordan_wigner(mode_count).unwrap()).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(mode_count), &table, |bencher, table| {
            bencher.iter(|| check_anti_commutation(table, "Jordan-Wigner"));
        });
    }
    group.finish();
}

pub fn hydrogen_benchmark(criterion: &mut Criterion) {
    let hamiltonian = Hamiltonian::h2_sto3g();
    let mut group = criterion.benchmark_group("encode_hamiltonian");
    for encoding in Encoding::built_in(hamiltonian.mode_count()).unwrap() {
        group.bench_with_input(BenchmarkId::from_parameter(encoding.name()), &encoding, |bencher, encoding| {
            bencher.iter(|| encode_hamiltonian(&hamiltonian, encoding));
        });
    }
    group.finish();
}

criterion_group!(benches, ladder_table_benchmark, anti_commutation_benchmark, hydrogen_benchmark);
criterion_main!(benches);
