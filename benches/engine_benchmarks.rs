//! Performance benchmarks for the attendance engine.
//!
//! This benchmark suite tracks the hot paths of the engine:
//! - Single-day classification
//! - Full monthly detail for one employee
//! - A payroll run across a growing employee roster
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use attendance_engine::classify::{DayContext, classify_day};
use attendance_engine::config::ConfigLoader;
use attendance_engine::models::{AttendanceLogEntry, Employee, WorkSchedule};
use attendance_engine::payroll::generate_payroll_for_month;
use attendance_engine::report::employee_monthly_report;
use attendance_engine::store::MemoryStore;

fn punch(employee_id: &str, stamp: &str) -> AttendanceLogEntry {
    AttendanceLogEntry {
        employee_id: employee_id.to_string(),
        timestamp: NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").unwrap(),
        device_id: "gate-1".to_string(),
    }
}

fn employee(id: &str) -> Employee {
    Employee {
        id: id.to_string(),
        name: format!("Employee {id}"),
        department_id: Some(1),
        is_guest: false,
        joining_date: None,
        monthly_salary: Decimal::new(30_000, 0),
        fixed_allowance: Decimal::ZERO,
        leave_quota_override: None,
    }
}

/// Seeds a store with `count` employees attending every March weekday.
fn seeded_store(count: usize) -> (MemoryStore, ConfigLoader) {
    let store = MemoryStore::new();
    let config = ConfigLoader::default();
    for i in 0..count {
        let id = format!("emp_{i:04}");
        store.insert_employee(employee(&id));
        let mut day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        while day < NaiveDate::from_ymd_opt(2024, 4, 1).unwrap() {
            if !config.schedule().is_weekend(day) {
                store.insert_log(punch(&id, &format!("{day} 09:05:00")));
                store.insert_log(punch(&id, &format!("{day} 18:02:00")));
            }
            day = day.succ_opt().unwrap();
        }
    }
    (store, config)
}

fn bench_classify_day(c: &mut Criterion) {
    let schedule = WorkSchedule::default();
    let punches = vec![
        punch("emp_0001", "2024-03-05 09:20:00"),
        punch("emp_0001", "2024-03-05 13:00:00"),
        punch("emp_0001", "2024-03-05 17:30:00"),
    ];
    let context = DayContext {
        date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        punches: &punches,
        schedule: &schedule,
        is_holiday: false,
        on_leave: None,
    };

    c.bench_function("classify_single_day", |b| {
        b.iter(|| classify_day(black_box(&context)))
    });
}

fn bench_monthly_detail(c: &mut Criterion) {
    let (store, config) = seeded_store(1);

    c.bench_function("employee_monthly_detail", |b| {
        b.iter(|| {
            employee_monthly_report(
                black_box(&store),
                black_box(&config),
                "emp_0000",
                2024,
                3,
            )
        })
    });
}

fn bench_payroll_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("payroll_run");
    for count in [10usize, 100] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            // Fresh store per iteration batch so drafts recompute rather
            // than accrete advances.
            let (store, config) = seeded_store(count);
            b.iter(|| generate_payroll_for_month(black_box(&store), black_box(&config), 2024, 3))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_classify_day,
    bench_monthly_detail,
    bench_payroll_run
);
criterion_main!(benches);
