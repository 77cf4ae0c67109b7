use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nrucache::config::CacheConfig;
use nrucache::geometry::{CacheGeometry, GeometryMode};
use nrucache::simulator::simulate;
use nrucache::trace::Trace;
use nrucache::util::get_configs;

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Examples");

    get_configs()
        .unwrap()
        .iter()
        .for_each(|case| {
            let config = CacheConfig::load(&case.config).unwrap();
            let geometry = CacheGeometry::resolve(&config, GeometryMode::Strict).unwrap();
            // For the purposes of this we aren't interested in IO effects
            let trace = Trace::load(&case.trace).unwrap();
            group.bench_with_input(BenchmarkId::new("Example: ", case.report.clone()), &(geometry, trace.addresses), |bench, (geometry, addresses)| {
                bench.iter(|| simulate(*geometry, addresses.iter().copied()));
            });
        });

    // A longer synthetic trace, the sample traces are tiny
    let addresses: Vec<u64> = (0..1_000_000u64).map(|i| i.wrapping_mul(2654435761) % (1 << 20)).collect();
    for associativity in [1, 2, 4, 8, 16] {
        let config = CacheConfig { address_bits: 32, block_size: 64, cache_sets: 64, associativity };
        let geometry = CacheGeometry::resolve(&config, GeometryMode::Strict).unwrap();
        group.bench_with_input(BenchmarkId::new("Synthetic", associativity), &addresses, |bench, addresses| {
            bench.iter(|| simulate(geometry, addresses.iter().copied()));
        });
    }
}

criterion_group!(
    name = benches;
    config = Criterion::default().significance_level(0.1).sample_size(10);
    targets = criterion_benchmark
);
criterion_main!(benches);
