//! Benchmarks for the GreenLedger guest ledger
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use greenledger::factors::SourceCategory;
use greenledger::ledger::{GuestLedger, NewEntry};

fn seeded_ledger(count: usize) -> GuestLedger {
    let categories = [
        SourceCategory::Electricity,
        SourceCategory::Fuel,
        SourceCategory::Transport,
        SourceCategory::Waste,
    ];

    let ledger = GuestLedger::in_memory();
    let entries = (0..count)
        .map(|i| {
            NewEntry::new(categories[i % categories.len()])
                .amount((i % 500) as f64)
                .date(format!("2026-{:02}-{:02}", (i % 12) + 1, (i % 28) + 1))
        })
        .collect();
    ledger.append_bulk(entries).expect("seed ledger");
    ledger
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");

    group.bench_function("append_single", |b| {
        let ledger = GuestLedger::in_memory();
        b.iter(|| {
            ledger
                .append(black_box(
                    NewEntry::new(SourceCategory::Fuel)
                        .activity("diesel")
                        .amount(10.0)
                        .date("2026-03-01"),
                ))
                .unwrap()
        })
    });

    group.finish();
}

fn bench_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("views");

    for size in [100, 1000, 10000] {
        let ledger = seeded_ledger(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("summarize_{}", size), |b| {
            b.iter(|| black_box(ledger.summarize()))
        });

        group.bench_function(format!("list_{}", size), |b| {
            b.iter(|| black_box(ledger.list()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_append, bench_views);
criterion_main!(benches);
