//! Benchmarks for the render path: NAV log parsing and page rendering
//!
//! Run with: cargo bench

use alloy_primitives::U256;
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use nav_dashboard::chain::{ContractAddress, ContractView};
use nav_dashboard::history::{HistoryLoader, UndatedPolicy};
use nav_dashboard::presenter::page::render_dashboard;
use nav_dashboard::presenter::{Overview, PresenterConfig};

fn create_nav_log(rows: usize) -> String {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let mut csv_data = String::from("date,nav,return\n");

    for i in 0..rows {
        let date = start + Duration::days(i as i64);
        let nav = 100.0 + i as f64 * 0.01;
        csv_data.push_str(&format!("{},{:.4},0.0001\n", date.format("%Y-%m-%d"), nav));
    }

    csv_data
}

fn bench_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("history");

    for size in [100, 1000, 10000] {
        let csv_data = create_nav_log(size);
        let loader = HistoryLoader::new();

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("load_{}", size), |b| {
            b.iter(|| loader.load_str(black_box(&csv_data)).unwrap())
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let view = ContractView {
        nav_raw: U256::from(1_234_500_000_000_000_000u64),
        total_supply_raw: U256::from(2_500_000u64) * U256::from(1_000_000_000_000_000_000u64),
        name: "Fund NAV Token".to_string(),
        symbol: "FNQT".to_string(),
        block: Some(1),
    };
    let contract = ContractAddress::parse("0xfD5a2488f3ea1F61FF462730B14f57a108a7f9eC").unwrap();
    let config = PresenterConfig::default();

    let history = HistoryLoader::new().load_str(&create_nav_log(1000)).unwrap();
    let (history, excluded) = history.apply_policy(UndatedPolicy::Exclude).unwrap();

    c.bench_function("build_overview", |b| {
        b.iter(|| {
            Overview::build(black_box(&view), &history, &contract, excluded, &config).unwrap()
        })
    });

    let overview = Overview::build(&view, &history, &contract, excluded, &config).unwrap();

    c.bench_function("render_dashboard", |b| {
        b.iter(|| render_dashboard(black_box(&overview)))
    });
}

criterion_group!(benches, bench_history, bench_render);
criterion_main!(benches);
