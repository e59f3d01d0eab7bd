//! Criterion benchmarks for the bounded road-reachability search.
//!
//! Benchmarks:
//!   - tile directly beside a road (early exit)
//!   - tile deep inside a zone with no road (full search box)
//!   - whole-grid sweep reusing one scratch buffer
//!
//! Run with: cargo bench -p simulation --bench road_access_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use simulation::buildings::{Building, BuildingType};
use simulation::grid::{Grid, TileView, ZoneType};
use simulation::road_access::{has_road_access, RoadAccessScratch};

const SIZE: usize = 128;

/// Residential everywhere with a road every 16 rows.
fn zoned_grid() -> Grid {
    let mut w = Grid::new(SIZE).writer();
    for y in 0..SIZE {
        for x in 0..SIZE {
            if y % 16 == 0 {
                w.set_building(x, y, Building::new(BuildingType::Road));
            } else {
                w.tile_mut(x, y).zone = ZoneType::Residential;
            }
        }
    }
    w.finish()
}

fn bench_single_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("road_access");
    group.sample_size(1000);

    let grid = zoned_grid();
    let mut scratch = RoadAccessScratch::new();

    group.bench_function("beside_road", |b| {
        b.iter(|| black_box(has_road_access(&grid, black_box(40), black_box(17), &mut scratch)));
    });

    // Row 8 is 8 steps from both roads: the search exhausts its box.
    group.bench_function("unreachable", |b| {
        b.iter(|| black_box(has_road_access(&grid, black_box(40), black_box(8), &mut scratch)));
    });

    group.finish();
}

fn bench_grid_sweep(c: &mut Criterion) {
    let grid = zoned_grid();
    let mut scratch = RoadAccessScratch::new();

    c.bench_function("road_access_sweep_128", |b| {
        b.iter(|| {
            let mut reachable = 0usize;
            for y in 0..grid.size() {
                for x in 0..grid.size() {
                    reachable += usize::from(has_road_access(&grid, x, y, &mut scratch));
                }
            }
            black_box(reachable)
        });
    });
}

criterion_group!(benches, bench_single_queries, bench_grid_sweep);
criterion_main!(benches);
