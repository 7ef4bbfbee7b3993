//! Benchmarks for the diff engine.

use attack_diff::diff::DiffEngine;
use attack_diff::model::{AttackRecord, Domain, ObjectKind, Relationship, Snapshot, StixBundle};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

/// Old and new technique snapshots of `size` records with a mix of statuses.
fn releases(size: usize) -> (Snapshot, Snapshot, StixBundle) {
    let technique = |i: usize, version: &str, modified: &str| {
        AttackRecord::new(format!("attack-pattern--{i}"), "attack-pattern")
            .with_name(format!("Technique {i}"))
            .with_version(version)
            .with_modified(modified)
    };

    let old: Vec<_> = (0..size)
        .map(|i| technique(i, "1.0", "2020-01-01T00:00:00.000Z"))
        .collect();

    let mut new = Vec::with_capacity(size + size / 10);
    let mut relationships = Vec::new();
    for i in 0..size {
        let record = match i % 10 {
            0 => technique(i, "1.1", "2020-06-01T00:00:00.000Z"),
            1 => technique(i, "1.0", "2020-06-01T00:00:00.000Z"),
            2 => technique(i, "1.0", "2020-06-01T00:00:00.000Z").with_deprecated(true),
            3 => {
                relationships.push(Relationship::new(
                    format!("relationship--{i}"),
                    "revoked-by",
                    format!("attack-pattern--{i}"),
                    format!("attack-pattern--{}", size + i),
                ));
                technique(i, "1.0", "2020-06-01T00:00:00.000Z").with_revoked(true)
            }
            4 => continue,
            _ => technique(i, "1.0", "2020-01-01T00:00:00.000Z"),
        };
        new.push(record);
        if i % 10 == 3 {
            new.push(technique(size + i, "1.0", "2020-06-01T00:00:00.000Z"));
        }
    }

    let bundle = StixBundle::new(new.clone(), relationships);
    let old = Snapshot::from_records(ObjectKind::Technique, Domain::Enterprise, old)
        .expect("unique ids");
    let new = Snapshot::from_records(ObjectKind::Technique, Domain::Enterprise, new)
        .expect("unique ids");
    (old, new, bundle)
}

fn benchmark_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let engine = DiffEngine::new().with_minor_changes(true);

    for size in [100, 1_000, 10_000] {
        let (old, new, bundle) = releases(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(engine.classify(&old, &new, &bundle)));
        });
    }
    group.finish();
}

fn benchmark_identical_snapshots(c: &mut Criterion) {
    let (old, _, bundle) = releases(10_000);
    let engine = DiffEngine::new();
    c.bench_function("classify_identical_10000", |b| {
        b.iter(|| black_box(engine.classify(&old, &old, &bundle)));
    });
}

criterion_group!(benches, benchmark_classify, benchmark_identical_snapshots);
criterion_main!(benches);
