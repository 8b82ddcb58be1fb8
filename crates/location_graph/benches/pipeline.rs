//! Benchmarks for key normalization and the full pipeline.
//!
//! Run with:
//!   cargo bench --package location_graph --bench pipeline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use location_graph::config::DEFAULT_SENTINEL;
use location_graph::sources::{
    CardinalDirection, LandmarkConstant, MapAttributes, MapConnection, MapWarps, WarpTarget,
};
use location_graph::{normalize, Coordinates, Diagnostics, OrderTable, SourceBundle};

const RAW_KEYS: &[&str] = &[
    "Route 29",
    "SproutTower1F",
    "IcePath2BlackthornSide",
    "UNION_CAVE_B1F",
    "UnionCaveB2F",
    "team-rocket.base  b_1_f",
    "GoldenrodDeptStore5F",
    "Radio Tower 3",
];

/// A chain of `len` routes, each with a two-floor building warped from it.
fn synthetic_sources(len: usize) -> SourceBundle {
    let mut sources = SourceBundle::default();
    for i in 0..len {
        let name = format!("ROUTE_{}", i);
        sources.constants.push(LandmarkConstant::new(&name, i));
        sources.coordinates.push(Coordinates::new(i as i32, 0));

        let mut connections = Vec::new();
        if i + 1 < len {
            connections.push(MapConnection {
                direction: CardinalDirection::East,
                target: format!("ROUTE_{}", i + 1),
                offset: 0,
            });
        }
        sources.attributes.push(MapAttributes {
            map: format!("Route{}", i),
            connections,
        });
        sources.warps.push(MapWarps {
            map: format!("Route{}", i),
            warps: vec![
                WarpTarget { target: format!("ROUTE_{}_GATE_HOUSE_1F", i) },
                WarpTarget { target: format!("ROUTE_{}_GATE_HOUSE_1F", i) },
            ],
        });
        sources.warps.push(MapWarps {
            map: format!("Route{}GateHouse1F", i),
            warps: vec![
                WarpTarget { target: name.clone() },
                WarpTarget { target: format!("ROUTE_{}_GATE_HOUSE_B1F", i) },
            ],
        });
    }
    sources
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    group.throughput(Throughput::Elements(RAW_KEYS.len() as u64));
    group.bench_function("mixed_spellings", |b| {
        b.iter(|| {
            for key in RAW_KEYS {
                black_box(normalize(black_box(key)));
            }
        })
    });
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let table = OrderTable::curated();
    let mut group = c.benchmark_group("pipeline");

    for len in [16usize, 128, 512] {
        let sources = synthetic_sources(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &sources, |b, sources| {
            b.iter(|| {
                let mut diagnostics = Diagnostics::new();
                black_box(location_graph::run(
                    sources,
                    &table,
                    DEFAULT_SENTINEL,
                    &mut diagnostics,
                ))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_normalize, bench_pipeline);
criterion_main!(benches);
