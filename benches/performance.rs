use academy_billing::{billing_cycle, compute_billing_info, due_periods};
use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn sample_registrations(count: usize) -> Vec<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    (0..count)
        .map(|idx| start + Days::new((idx % 2000) as u64))
        .collect()
}

fn bench_dashboard_pass(c: &mut Criterion) {
    let registrations = sample_registrations(black_box(10_000));
    let reference = NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();

    c.bench_function("billing_cycle_10k_students", |b| {
        b.iter(|| {
            for registration in &registrations {
                black_box(billing_cycle(*registration, reference).unwrap());
            }
        })
    });

    let raw: Vec<String> = registrations
        .iter()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .collect();

    c.bench_function("compute_billing_info_10k_parsed", |b| {
        b.iter(|| {
            for registration in &raw {
                black_box(compute_billing_info(registration, reference).unwrap());
            }
        })
    });
}

fn bench_history(c: &mut Criterion) {
    let registration = NaiveDate::from_ymd_opt(2015, 8, 31).unwrap();
    let reference = NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();

    c.bench_function("due_periods_ten_years", |b| {
        b.iter(|| black_box(due_periods(registration, reference).unwrap()))
    });
}

criterion_group!(benches, bench_dashboard_pass, bench_history);
criterion_main!(benches);
