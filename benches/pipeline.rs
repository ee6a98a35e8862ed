use criterion::{black_box, criterion_group, criterion_main, Criterion};
use polars::prelude::*;
use solar_dashboard::{normalize, prepare};
use std::collections::BTreeSet;

fn synthetic_frame(rows: usize) -> PolarsResult<DataFrame> {
    let dates: Vec<String> = (0..rows)
        .map(|i| {
            let month = i / 40_000 % 12 + 1;
            let day = i / 1_440 % 28 + 1;
            format!("2023-{:02}-{:02} {:02}:{:02}", month, day, i / 60 % 24, i % 60)
        })
        .collect();
    let ghi: Vec<String> = (0..rows).map(|i| format!("{}", (i % 1_000) as f64 * 0.9)).collect();
    let tamb: Vec<String> = (0..rows).map(|i| format!("{}", 20 + i % 15)).collect();
    let region: Vec<&str> = (0..rows).map(|i| if i % 3 == 0 { "Kara" } else { "Lomé" }).collect();
    df!("Timestamp" => dates, "GHI" => ghi, "Tamb" => tamb, "Region" => region)
}

fn bench_pipeline(c: &mut Criterion) {
    let Ok(raw) = synthetic_frame(100_000) else {
        return;
    };
    let regions: BTreeSet<String> = ["Kara".to_string()].into();

    c.bench_function("normalize", |b| b.iter(|| normalize(black_box(raw.clone()))));

    let Ok(normalized) = normalize(raw.clone()) else {
        return;
    };
    c.bench_function("prepare_all_regions", |b| {
        b.iter(|| prepare(black_box(&normalized), &BTreeSet::new(), 20_000))
    });
    c.bench_function("prepare_one_region", |b| {
        b.iter(|| prepare(black_box(&normalized), &regions, 20_000))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
