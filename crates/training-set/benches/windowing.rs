//! Windowing and assembly benchmarks over a year of daily records.

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use preprocessor::{add_daily_features, HourlyRecord, PeakBand, HOURS_PER_DAY};
use training_set::{TrainingSetAssembler, WindowBuilder, WindowParams};

fn year_of_records(categories: &[&str]) -> Vec<preprocessor::DailyRecord> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let hourly: Vec<HourlyRecord> = categories
        .iter()
        .flat_map(|category| {
            (0..365).map(move |day| {
                let mut hourly = [0.0; HOURS_PER_DAY];
                for (hour, slot) in hourly.iter_mut().enumerate() {
                    *slot = ((day * 31 + hour * 7) % 50) as f64;
                }
                HourlyRecord {
                    date: start + Duration::days(day as i64),
                    category: category.to_string(),
                    hourly,
                }
            })
        })
        .collect();
    add_daily_features(hourly, &PeakBand::default()).unwrap()
}

fn windowing_benchmark(c: &mut Criterion) {
    let records = year_of_records(&["급속"]);
    c.bench_function("window_builder_365d", |b| {
        let mut builder = WindowBuilder::new(WindowParams::default()).unwrap();
        b.iter(|| builder.build(black_box(&records)).unwrap())
    });

    let mixed = year_of_records(&["급속", "완속", "기타", "초급속"]);
    let mut group = c.benchmark_group("assembler_4x365d");
    for parallel in [false, true] {
        let assembler = TrainingSetAssembler::new(WindowParams::default(), parallel).unwrap();
        let name = if parallel { "parallel" } else { "sequential" };
        group.bench_function(name, |b| b.iter(|| assembler.assemble(black_box(&mixed)).unwrap()));
    }
    group.finish();
}

criterion_group!(benches, windowing_benchmark);
criterion_main!(benches);
