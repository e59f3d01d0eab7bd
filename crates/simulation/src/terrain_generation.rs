//! Procedural terrain: noise-seeded lakes, edge oceans and forest cover.
//!
//! A single `u64` is drawn from the caller's RNG; every noise field and random
//! draw below derives from it, so the same seed always yields the same map.

use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::buildings::{Building, BuildingType};
use crate::config::{BASE_LAND_VALUE, COASTAL_LAND_BONUS, MIN_TERRAIN_GRID_SIZE, WATER_LAND_VALUE};
use crate::grid::{Grid, GridPos, GridWriter, TileView};

const LAKE_OCTAVES: i32 = 4;
const LAKE_FREQUENCY: f32 = 0.08;
const MIN_LAKES: usize = 2;
const MAX_LAKES: usize = 4;
const LAKE_MIN_TILES: usize = 40;
const LAKE_MAX_TILES: usize = 80;
/// Weight of normalized seed distance in the lake growth score.
const LAKE_DISTANCE_WEIGHT: f32 = 0.6;
const LAKE_JITTER: f32 = 0.08;

const OCEAN_EDGE_CHANCE: f64 = 0.35;
const OCEAN_COARSE_FREQUENCY: f32 = 0.04;
const OCEAN_FINE_FREQUENCY: f32 = 0.18;
const OCEAN_COARSE_WEIGHT: f32 = 0.7;

const FOREST_FREQUENCY: f32 = 0.1;
const FOREST_THRESHOLD: f32 = 0.62;
const FOREST_DENSITY: f64 = 0.7;
const COASTAL_TREE_CHANCE: f64 = 0.12;

const LAKE_NAMES: [&str; 12] = [
    "Crystal", "Willow", "Heron", "Silver", "Cedar", "Mirror", "Pine", "Amber", "Hollow",
    "Falcon", "Birch", "Stone",
];

// ---------------------------------------------------------------------------
// Water bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaterBodyKind {
    Lake,
    Ocean,
}

/// A named connected group of generated water tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterBody {
    pub name: String,
    pub kind: WaterBodyKind,
    pub tiles: Vec<GridPos>,
    pub centroid: (f32, f32),
}

impl WaterBody {
    fn new(name: String, kind: WaterBodyKind, tiles: Vec<GridPos>) -> Self {
        let n = tiles.len().max(1) as f32;
        let (sx, sy) = tiles
            .iter()
            .fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x as f32, sy + y as f32));
        Self {
            name,
            kind,
            tiles,
            centroid: (sx / n, sy / n),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Generate a fresh map. `size` below `MIN_TERRAIN_GRID_SIZE` is raised to it.
///
/// The result always holds at least two water bodies, and every `Water` tile
/// belongs to exactly one of them.
pub fn generate_terrain<R: Rng + ?Sized>(size: usize, rng: &mut R) -> (Grid, Vec<WaterBody>) {
    let size = size.max(MIN_TERRAIN_GRID_SIZE);
    let seed: u64 = rng.gen();
    let mut local = ChaCha8Rng::seed_from_u64(seed);
    let mut writer = Grid::new(size).writer();

    let mut bodies = generate_lakes(&mut writer, seed, &mut local);
    bodies.extend(generate_oceans(&mut writer, seed, &mut local));
    forest_and_coast(&mut writer, seed, &mut local);

    (writer.finish(), bodies)
}

fn noise_seed(seed: u64, salt: u64) -> i32 {
    (seed.wrapping_add(salt.wrapping_mul(0x9E37_79B9_7F4A_7C15)) >> 33) as i32
}

/// Sample a noise source over the whole grid, normalized to `[0, 1]`.
fn sample_field(noise: &FastNoiseLite, size: usize) -> Vec<f32> {
    let mut field = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let raw = noise.get_noise_2d(x as f32, y as f32);
            field.push(((raw + 1.0) * 0.5).clamp(0.0, 1.0));
        }
    }
    field
}

fn make_water(writer: &mut GridWriter, x: usize, y: usize) {
    let tile = writer.tile_mut(x, y);
    tile.building = Building::new(BuildingType::Water);
    tile.land_value = WATER_LAND_VALUE;
}

// ---------------------------------------------------------------------------
// Lakes
// ---------------------------------------------------------------------------

fn lake_noise(seed: u64) -> FastNoiseLite {
    let mut noise = FastNoiseLite::with_seed(noise_seed(seed, 1));
    noise.set_noise_type(Some(NoiseType::Value));
    noise.set_frequency(Some(LAKE_FREQUENCY));
    noise.set_fractal_type(Some(FractalType::FBm));
    noise.set_fractal_octaves(Some(LAKE_OCTAVES));
    noise
}

/// Interior cells no higher than any of their 8 neighbors, lowest first.
fn local_minima(field: &[f32], size: usize, margin: usize) -> Vec<GridPos> {
    let mut minima = Vec::new();
    for y in margin..size - margin {
        for x in margin..size - margin {
            let v = field[y * size + x];
            let lowest = (-1i32..=1).all(|dy| {
                (-1i32..=1).all(|dx| {
                    let nx = (x as i32 + dx) as usize;
                    let ny = (y as i32 + dy) as usize;
                    (dx == 0 && dy == 0) || v <= field[ny * size + nx]
                })
            });
            if lowest {
                minima.push((x, y));
            }
        }
    }
    minima.sort_by(|a, b| {
        field[a.1 * size + a.0]
            .total_cmp(&field[b.1 * size + b.0])
            .then(a.cmp(b))
    });
    minima
}

fn distance(a: GridPos, b: GridPos) -> f32 {
    let dx = a.0 as f32 - b.0 as f32;
    let dy = a.1 as f32 - b.1 as f32;
    (dx * dx + dy * dy).sqrt()
}

fn pick_lake_seeds(field: &[f32], size: usize, rng: &mut ChaCha8Rng) -> Vec<GridPos> {
    let margin = (size / 8).max(2);
    let separation = (size / 4).max(3) as f32;
    let wanted = rng.gen_range(MIN_LAKES..=MAX_LAKES);

    let mut seeds: Vec<GridPos> = Vec::with_capacity(wanted);
    for candidate in local_minima(field, size, margin) {
        if seeds.len() == wanted {
            break;
        }
        if seeds.iter().all(|&s| distance(s, candidate) >= separation) {
            seeds.push(candidate);
        }
    }
    if seeds.len() < MIN_LAKES {
        seeds = vec![(size / 4, size / 4), (3 * size / 4, 3 * size / 4)];
    }
    seeds
}

fn unique_lake_name(taken: &mut Vec<String>, rng: &mut ChaCha8Rng) -> String {
    let base = LAKE_NAMES.choose(rng).copied().unwrap_or("Blue");
    let mut name = format!("{base} Lake");
    let mut n = 2;
    while taken.contains(&name) {
        name = format!("{base} Lake {n}");
        n += 1;
    }
    taken.push(name.clone());
    name
}

fn generate_lakes(writer: &mut GridWriter, seed: u64, rng: &mut ChaCha8Rng) -> Vec<WaterBody> {
    let size = writer.size();
    let field = sample_field(&lake_noise(seed), size);
    let seeds = pick_lake_seeds(&field, size, rng);

    // Claim every seed before any lake grows so no lake can swallow another's.
    for &(x, y) in &seeds {
        make_water(writer, x, y);
    }

    let cap = (size * size / (4 * seeds.len())).max(4);
    let mut names = Vec::new();
    let mut bodies = Vec::with_capacity(seeds.len());
    for &seed_pos in &seeds {
        let target = rng.gen_range(LAKE_MIN_TILES..=LAKE_MAX_TILES).min(cap);
        let tiles = grow_lake(writer, &field, seed_pos, target, rng);
        let name = unique_lake_name(&mut names, rng);
        bodies.push(WaterBody::new(name, WaterBodyKind::Lake, tiles));
    }
    bodies
}

/// Grow one lake from its claimed seed, admitting the lowest-scoring frontier
/// tile each step until `target` tiles or an empty frontier.
fn grow_lake(
    writer: &mut GridWriter,
    field: &[f32],
    seed_pos: GridPos,
    target: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<GridPos> {
    let size = writer.size();
    let radius = ((target as f32) / std::f32::consts::PI).sqrt().max(1.0);
    let mut tiles = vec![seed_pos];
    let mut queued = vec![false; size * size];
    queued[seed_pos.1 * size + seed_pos.0] = true;
    let mut frontier: Vec<(GridPos, f32)> = Vec::new();

    let mut push_neighbors = |writer: &GridWriter,
                              frontier: &mut Vec<(GridPos, f32)>,
                              (x, y): GridPos,
                              rng: &mut ChaCha8Rng| {
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                // Lakes stay off the map border.
                if nx < 1 || ny < 1 || nx >= size as i32 - 1 || ny >= size as i32 - 1 {
                    continue;
                }
                let (nx, ny) = (nx as usize, ny as usize);
                let idx = ny * size + nx;
                if queued[idx] || writer.tile(nx, ny).building_type() == BuildingType::Water {
                    continue;
                }
                queued[idx] = true;
                let score = field[idx]
                    + LAKE_DISTANCE_WEIGHT * distance(seed_pos, (nx, ny)) / radius
                    + rng.gen::<f32>() * LAKE_JITTER;
                frontier.push(((nx, ny), score));
            }
        }
    };

    push_neighbors(writer, &mut frontier, seed_pos, rng);
    while tiles.len() < target && !frontier.is_empty() {
        let best = frontier
            .iter()
            .enumerate()
            .min_by(|a, b| a.1 .1.total_cmp(&b.1 .1))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let (pos, _) = frontier.swap_remove(best);
        // Another lake may have taken it since it was queued.
        if writer.tile(pos.0, pos.1).building_type() == BuildingType::Water {
            continue;
        }
        make_water(writer, pos.0, pos.1);
        tiles.push(pos);
        push_neighbors(writer, &mut frontier, pos, rng);
    }
    tiles
}

// ---------------------------------------------------------------------------
// Oceans
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    North,
    South,
    West,
    East,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::North, Edge::South, Edge::West, Edge::East];

    fn ocean_name(self) -> &'static str {
        match self {
            Edge::North => "Northern Sea",
            Edge::South => "Southern Bay",
            Edge::West => "Western Ocean",
            Edge::East => "Eastern Sound",
        }
    }

    /// Grid position `depth` tiles inward from the edge at offset `along`.
    fn inward(self, size: usize, along: usize, depth: usize) -> GridPos {
        match self {
            Edge::North => (along, depth),
            Edge::South => (along, size - 1 - depth),
            Edge::West => (depth, along),
            Edge::East => (size - 1 - depth, along),
        }
    }
}

fn coastline_noise(seed: u64, salt: u64, frequency: f32) -> FastNoiseLite {
    let mut noise = FastNoiseLite::with_seed(noise_seed(seed, salt));
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(frequency));
    noise
}

fn generate_oceans(writer: &mut GridWriter, seed: u64, rng: &mut ChaCha8Rng) -> Vec<WaterBody> {
    let size = writer.size();
    let max_depth = (size / 6).max(2) as f32;
    let coarse = coastline_noise(seed, 2, OCEAN_COARSE_FREQUENCY);
    let fine = coastline_noise(seed, 3, OCEAN_FINE_FREQUENCY);

    let mut bodies = Vec::new();
    for (i, edge) in Edge::ALL.into_iter().enumerate() {
        if !rng.gen_bool(OCEAN_EDGE_CHANCE) {
            continue;
        }
        let start = rng.gen_range(0..size / 3);
        let end = rng.gen_range(2 * size / 3..=size);
        let fade_window = ((end - start) / 5).max(2) as f32;
        let offset = (i * size) as f32;

        let mut tiles = Vec::new();
        for along in start..end {
            let from_end = (along - start).min(end - 1 - along) as f32 + 1.0;
            let fade = (from_end / fade_window).min(1.0);
            let t = along as f32 + offset;
            let blended = OCEAN_COARSE_WEIGHT * coarse.get_noise_2d(t, 0.0)
                + (1.0 - OCEAN_COARSE_WEIGHT) * fine.get_noise_2d(t, 0.0);
            let depth = (((blended + 1.0) * 0.5).clamp(0.0, 1.0) * fade * max_depth).round() as usize;
            for d in 0..depth {
                let (x, y) = edge.inward(size, along, d);
                if writer.tile(x, y).building_type() == BuildingType::Water {
                    continue;
                }
                make_water(writer, x, y);
                tiles.push((x, y));
            }
        }
        if !tiles.is_empty() {
            bodies.push(WaterBody::new(
                edge.ocean_name().to_owned(),
                WaterBodyKind::Ocean,
                tiles,
            ));
        }
    }
    bodies
}

// ---------------------------------------------------------------------------
// Forest and coast
// ---------------------------------------------------------------------------

fn forest_and_coast(writer: &mut GridWriter, seed: u64, rng: &mut ChaCha8Rng) {
    let size = writer.size();
    let mut noise = FastNoiseLite::with_seed(noise_seed(seed, 4));
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(FOREST_FREQUENCY));
    noise.set_fractal_type(Some(FractalType::FBm));
    noise.set_fractal_octaves(Some(3));
    let forest = sample_field(&noise, size);

    for y in 0..size {
        for x in 0..size {
            if writer.tile(x, y).building_type() == BuildingType::Water {
                continue;
            }
            let (neighbors, count) = writer.neighbors4(x, y);
            let coastal = neighbors[..count]
                .iter()
                .any(|&(nx, ny)| writer.tile(nx, ny).building_type() == BuildingType::Water);

            let wooded = (forest[y * size + x] > FOREST_THRESHOLD && rng.gen_bool(FOREST_DENSITY))
                || (coastal && rng.gen_bool(COASTAL_TREE_CHANCE));

            if wooded || coastal {
                let tile = writer.tile_mut(x, y);
                if wooded {
                    tile.building = Building::new(BuildingType::Tree);
                }
                if coastal {
                    tile.land_value = BASE_LAND_VALUE + COASTAL_LAND_BONUS;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn generate(size: usize, seed: u64) -> (Grid, Vec<WaterBody>) {
        generate_terrain(size, &mut ChaCha8Rng::seed_from_u64(seed))
    }

    fn assert_water_partitioned(grid: &Grid, bodies: &[WaterBody]) {
        let mut owners: HashMap<GridPos, usize> = HashMap::new();
        for body in bodies {
            for &pos in &body.tiles {
                *owners.entry(pos).or_default() += 1;
            }
        }
        for tile in grid.tiles() {
            let pos = (tile.x, tile.y);
            if tile.building_type() == BuildingType::Water {
                assert_eq!(owners.get(&pos), Some(&1), "water at {pos:?}");
            } else {
                assert!(!owners.contains_key(&pos), "land at {pos:?} claimed");
            }
        }
    }

    #[test]
    fn test_terrain_has_at_least_two_bodies() {
        for seed in 0..20 {
            let (_, bodies) = generate(64, seed);
            assert!(bodies.len() >= 2, "seed {seed}: {} bodies", bodies.len());
            assert!(bodies
                .iter()
                .filter(|b| b.kind == WaterBodyKind::Lake)
                .all(|b| !b.tiles.is_empty()));
        }
    }

    #[test]
    fn test_every_water_tile_in_exactly_one_body() {
        for seed in 0..20 {
            let (grid, bodies) = generate(50, seed);
            assert_water_partitioned(&grid, &bodies);
        }
    }

    #[test]
    fn test_same_seed_same_map() {
        let a = generate(64, 7);
        let b = generate(64, 7);
        assert_eq!(a, b);
        let c = generate(64, 8);
        assert_ne!(a.0, c.0);
    }

    #[test]
    fn test_minimum_size_still_has_two_lakes() {
        let (grid, bodies) = generate(4, 3);
        assert_eq!(grid.size(), MIN_TERRAIN_GRID_SIZE);
        let lakes = bodies
            .iter()
            .filter(|b| b.kind == WaterBodyKind::Lake)
            .count();
        assert!(lakes >= 2);
        assert_water_partitioned(&grid, &bodies);
    }

    #[test]
    fn test_lake_names_unique_and_land_values_stamped() {
        let (grid, bodies) = generate(70, 11);
        let mut names: Vec<&str> = bodies.iter().map(|b| b.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), bodies.len());
        for tile in grid.tiles() {
            match tile.building_type() {
                BuildingType::Water => assert_eq!(tile.land_value, WATER_LAND_VALUE),
                BuildingType::Grass | BuildingType::Tree => assert!(
                    tile.land_value == BASE_LAND_VALUE
                        || tile.land_value == BASE_LAND_VALUE + COASTAL_LAND_BONUS
                ),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_forest_grows_somewhere() {
        let trees: usize = (0..5)
            .map(|seed| {
                generate(64, seed)
                    .0
                    .tiles()
                    .filter(|t| t.building_type() == BuildingType::Tree)
                    .count()
            })
            .sum();
        assert!(trees > 0);
    }
}
