//! Benchmarks for timing table ingestion and queries
//!
//! Uses a synthetic field so it runs anywhere:
//! - ingestion + finalize of the whole competition
//! - per-run split and delta rows over all course columns
//! - BEST-k rows from the sorted pools

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use splitwall::TimingTableBuilder;
use splitwall::test_utils::synthetic_competition;
use std::hint::black_box;

fn bench_ingest_and_finalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_and_finalize");
    for runners in [50usize, 500, 2000] {
        let competition = synthetic_competition(runners, 20);
        group.throughput(Throughput::Elements(runners as u64));
        group.bench_with_input(BenchmarkId::from_parameter(runners), &competition, |b, competition| {
            b.iter(|| {
                let mut builder = TimingTableBuilder::new();
                builder.ingest_competition(black_box(competition));
                black_box(builder.finalize())
            })
        });
    }
    group.finish();
}

fn bench_row_queries(c: &mut Criterion) {
    let competition = synthetic_competition(500, 20);
    let columns = competition.course_columns();
    let mut builder = TimingTableBuilder::new();
    builder.ingest_competition(&competition);
    let table = builder.finalize();
    let run = &competition.runs[250];

    c.bench_function("splits_row", |b| b.iter(|| black_box(table.splits(black_box(run), &columns))));
    c.bench_function("delta_row", |b| b.iter(|| black_box(table.delta(black_box(run), &columns))));
    c.bench_function("best_delta_rows", |b| {
        b.iter(|| {
            for rank in 0..5 {
                black_box(table.best_deltas(rank, &columns));
            }
        })
    });
}

criterion_group!(benches, bench_ingest_and_finalize, bench_row_queries);
criterion_main!(benches);
