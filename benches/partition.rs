//! This bench partitions a large collection of plants with long watering
//! histories into "needs water" and "okay".

#![allow(missing_docs)]

use chrono::{TimeDelta, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use plantcare::{Garden, Plant, PlantName, Threshold, domain::status};

/// Builds a garden where every third plant is overdue
fn preseed_garden() -> Garden {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
    let mut garden = Garden::with_capacity(1_000);
    for i in 0..1_000 {
        let name = PlantName::new(format!("Plant {i:04}")).unwrap();
        garden
            .insert(Plant::new(name.clone(), String::new(), String::new()))
            .unwrap();
        let days = if i % 3 == 0 { 300 } else { 365 };
        for day in (0..days).step_by(3) {
            garden
                .record_watering(&name, start + TimeDelta::days(day))
                .unwrap();
        }
    }
    garden
}

fn partition(c: &mut Criterion) {
    let garden = preseed_garden();
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
    let threshold = Threshold::default();

    c.bench_function("partition", |b| {
        b.iter(|| status::partition(garden.plants(), threshold, now));
    });
}

criterion_group!(benches, partition);
criterion_main!(benches);
