//! Performance benchmarks for the salary conversion engine.
//!
//! Covers:
//! - A single gross → net conversion
//! - A single net → gross solve
//! - A full report with audit trace
//! - A batch of 1000 mixed conversions
//! - Solver cost across salary levels
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use vn_salary_engine::calculation::{convert_net_to_gross, gross_to_net, net_to_gross};
use vn_salary_engine::config::PolicyTable;
use vn_salary_engine::models::{ConversionInput, InsuranceBasis, Region};

fn bench_gross_to_net(c: &mut Criterion) {
    let policy = PolicyTable::statutory();
    let gross = Decimal::from(20_000_000);

    c.bench_function("gross_to_net", |b| {
        b.iter(|| {
            gross_to_net(
                black_box(&policy),
                black_box(gross),
                black_box(gross),
                0,
                Region::One,
            )
        })
    });
}

fn bench_net_to_gross(c: &mut Criterion) {
    let policy = PolicyTable::statutory();
    let target = Decimal::from(17_780_000);

    c.bench_function("net_to_gross", |b| {
        b.iter(|| {
            net_to_gross(
                black_box(&policy),
                black_box(target),
                InsuranceBasis::SameAsGross,
                0,
                Region::One,
            )
        })
    });
}

fn bench_report(c: &mut Criterion) {
    let policy = PolicyTable::statutory();
    let input = ConversionInput {
        amount: Decimal::from(17_780_000),
        insurance_basis: InsuranceBasis::SameAsGross,
        dependents: 1,
        region: Region::Two,
    };

    c.bench_function("convert_net_to_gross_report", |b| {
        b.iter(|| convert_net_to_gross(black_box(&policy), black_box(&input)))
    });
}

/// Batch of 1000 conversions across regions, dependents and insurance modes.
fn bench_batch_1000(c: &mut Criterion) {
    let policy = PolicyTable::statutory();

    let cases: Vec<(Decimal, InsuranceBasis, u32, Region)> = (0..1000u32)
        .map(|i| {
            let amount = Decimal::from(5_000_000 + i * 150_000);
            let basis = if i % 4 == 0 {
                InsuranceBasis::Custom(Decimal::from(5_310_000))
            } else {
                InsuranceBasis::SameAsGross
            };
            let region = Region::ALL[(i % 4) as usize];
            (amount, basis, i % 3, region)
        })
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(cases.len() as u64));
    group.sample_size(10);

    group.bench_function("net_to_gross_1000", |b| {
        b.iter(|| {
            let results: Vec<_> = cases
                .iter()
                .map(|(amount, basis, dependents, region)| {
                    net_to_gross(&policy, *amount, *basis, *dependents, *region)
                })
                .collect();
            black_box(results)
        })
    });

    group.finish();
}

/// Solver cost at salary levels in each tax band and above both caps.
fn bench_scaling(c: &mut Criterion) {
    let policy = PolicyTable::statutory();
    let mut group = c.benchmark_group("solver_scaling");

    for target in [8_000_000u64, 25_000_000, 50_000_000, 90_000_000, 200_000_000] {
        let amount = Decimal::from(target);
        group.bench_with_input(BenchmarkId::new("target_net", target), &amount, |b, amount| {
            b.iter(|| {
                net_to_gross(
                    &policy,
                    black_box(*amount),
                    InsuranceBasis::SameAsGross,
                    0,
                    Region::One,
                )
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_gross_to_net,
    bench_net_to_gross,
    bench_report,
    bench_batch_1000,
    bench_scaling,
);
criterion_main!(benches);
