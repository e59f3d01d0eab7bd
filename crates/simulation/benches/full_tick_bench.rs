//! Criterion benchmark: full simulation tick at scale.
//!
//! Measures one `FixedUpdate` schedule execution (action executor, tick,
//! state hash and invariant scan) on developed cities of increasing size.
//! Each scenario lays out a road lattice every 8 tiles, zones the blocks
//! between them and drops utilities at regular intervals, then warms the
//! city up so the skip-list sees a realistic mix of busy and settled tiles.
//!
//! Run with: cargo bench -p simulation --bench full_tick_bench --features bench

use bevy::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use simulation::buildings::BuildingType;
use simulation::grid::ZoneType;
use simulation::test_harness::TestCity;

/// Ticks run before measuring so construction and growth are under way.
const WARMUP_TICKS: u32 = 300;

fn create_benchmark_city(size: usize) -> TestCity {
    let mut city = TestCity::new(size).with_tax_rate(5.0);

    for row in (0..size).step_by(8) {
        city = city.with_road(0, row, size - 1, row);
    }
    for col in (0..size).step_by(8) {
        city = city.with_road(col, 0, col, size - 1);
    }

    // Interior of each 8x8 block: cells 1..=7 on both axes.
    for block_row in 0..size / 8 {
        for block_col in 0..size / 8 {
            let zone = match (block_row + block_col) % 3 {
                0 => ZoneType::Residential,
                1 => ZoneType::Commercial,
                _ => ZoneType::Industrial,
            };
            let (x0, y0) = (block_col * 8 + 1, block_row * 8 + 1);
            let (x1, y1) = ((x0 + 6).min(size - 1), (y0 + 6).min(size - 1));
            city = city.with_zone_rect(x0, y0, x1, y1, zone);
        }
    }

    // Utilities every 24 tiles, on the corner of a block.
    for y in (1..size.saturating_sub(2)).step_by(24) {
        for x in (1..size.saturating_sub(4)).step_by(24) {
            city = city
                .with_building(x, y, BuildingType::PowerPlant)
                .with_building(x + 2, y, BuildingType::WaterTower);
        }
    }

    city.tick(WARMUP_TICKS);
    city
}

fn bench_full_sim_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_sim_tick");
    group.measurement_time(Duration::from_secs(30));
    group.sample_size(10);

    for &size in &[64usize, 128, 256] {
        // Build the city once per parameter (expensive setup).
        let mut city = create_benchmark_city(size);

        group.bench_with_input(
            BenchmarkId::new("fixed_update", format!("{size}x{size}")),
            &size,
            |b, _| {
                b.iter(|| {
                    city.world_mut().run_schedule(FixedUpdate);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_full_sim_tick);
criterion_main!(benches);
