//! Generation Benchmarks
//!
//! Freeform and circular generation, catalog construction and batch
//! option organisation.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ka_engine::{
    CapType, GenerationConfig, OptionOrganizer, PictographCatalog, SequenceGenerator, SliceSize,
    SortMethod,
};
use ka_notation::GridMode;

const LENGTHS: &[usize] = &[8, 16, 32, 64];

/// Benchmark freeform generation across lengths
fn bench_freeform(c: &mut Criterion) {
    let mut group = c.benchmark_group("freeform");

    for &length in LENGTHS {
        let config = GenerationConfig::advanced().with_length(length).with_seed(42);
        let mut generator = match SequenceGenerator::new(config) {
            Ok(g) => g,
            Err(e) => panic!("bench config rejected: {e}"),
        };

        group.bench_with_input(BenchmarkId::new("level3", length), &length, |b, _| {
            b.iter(|| black_box(generator.generate()))
        });
    }

    group.finish();
}

/// Benchmark circular generation for halved and quartered slices
fn bench_circular(c: &mut Criterion) {
    let mut group = c.benchmark_group("circular");

    for &length in LENGTHS {
        for (name, size) in [("halved", SliceSize::Halved), ("quartered", SliceSize::Quartered)] {
            let config = GenerationConfig::default()
                .with_cap(CapType::MirroredComplementaryRotated, size)
                .with_length(length)
                .with_level(2)
                .with_seed(7);
            let mut generator = match SequenceGenerator::new(config) {
                Ok(g) => g,
                Err(e) => panic!("bench config rejected: {e}"),
            };

            group.bench_with_input(BenchmarkId::new(name, length), &length, |b, _| {
                b.iter(|| black_box(generator.generate()))
            });
        }
    }

    group.finish();
}

/// Benchmark catalog construction and organising the full catalog
fn bench_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog");

    group.bench_function("build_diamond", |b| {
        b.iter(|| black_box(PictographCatalog::build(GridMode::Diamond)))
    });

    let catalog = PictographCatalog::build(GridMode::Box);
    let organizer = OptionOrganizer::new();
    for method in [SortMethod::Type, SortMethod::EndPosition, SortMethod::Reversals] {
        group.bench_with_input(
            BenchmarkId::new("organize", format!("{method:?}")),
            &method,
            |b, &method| b.iter(|| black_box(organizer.organize(catalog.all(), method))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_freeform, bench_circular, bench_catalog);
criterion_main!(benches);
