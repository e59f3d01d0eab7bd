use serde::{Deserialize, Serialize};

use crate::grid::{GridPos, ZoneType};

/// Closed building catalog, terrain included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuildingType {
    // Terrain
    Grass,
    Water,
    Road,
    Rail,
    Tree,
    /// Non-origin cell of a multi-tile footprint.
    Empty,

    // Residential
    HouseSmall,
    HouseMedium,
    Mansion,
    ApartmentLow,
    ApartmentHigh,

    // Commercial
    ShopSmall,
    ShopMedium,
    OfficeLow,
    OfficeHigh,
    Mall,

    // Industrial
    FactorySmall,
    FactoryMedium,
    Warehouse,
    FactoryLarge,

    // Services
    PoliceStation,
    FireStation,
    Hospital,
    School,
    University,

    // Utilities
    PowerPlant,
    WaterTower,

    // Parks
    Park,
    ParkLarge,

    // Transit
    SubwayStation,
    RailStation,

    // Special
    CityHall,
    Stadium,
    Museum,
    Airport,
    SpaceProgram,
    AmusementPark,
}

/// Catalog numbers for one building type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingStats {
    pub max_population: u32,
    pub max_jobs: u32,
    /// Pollution equilibrium the tile drifts toward. Negative for parks.
    pub pollution: f32,
}

const fn stats(max_population: u32, max_jobs: u32, pollution: f32) -> BuildingStats {
    BuildingStats {
        max_population,
        max_jobs,
        pollution,
    }
}

const RESIDENTIAL_TIERS: [BuildingType; 5] = [
    BuildingType::HouseSmall,
    BuildingType::HouseMedium,
    BuildingType::Mansion,
    BuildingType::ApartmentLow,
    BuildingType::ApartmentHigh,
];

const COMMERCIAL_TIERS: [BuildingType; 5] = [
    BuildingType::ShopSmall,
    BuildingType::ShopMedium,
    BuildingType::OfficeLow,
    BuildingType::OfficeHigh,
    BuildingType::Mall,
];

// The top industrial tier repeats: a level-5 plant is a FactoryLarge at level 5.
const INDUSTRIAL_TIERS: [BuildingType; 5] = [
    BuildingType::FactorySmall,
    BuildingType::FactoryMedium,
    BuildingType::Warehouse,
    BuildingType::FactoryLarge,
    BuildingType::FactoryLarge,
];

/// Catalog type a zone develops into at `level` (1-based).
pub fn zone_tier(zone: ZoneType, level: u8) -> Option<BuildingType> {
    let tiers = match zone {
        ZoneType::Residential => &RESIDENTIAL_TIERS,
        ZoneType::Commercial => &COMMERCIAL_TIERS,
        ZoneType::Industrial => &INDUSTRIAL_TIERS,
        ZoneType::None => return None,
    };
    let idx = usize::from(level.checked_sub(1)?);
    tiers.get(idx).copied()
}

impl BuildingType {
    /// `(width, height)` in tiles; origin is the top-left cell.
    pub fn footprint(self) -> (usize, usize) {
        use BuildingType::*;
        match self {
            Mansion | ApartmentLow | ApartmentHigh | OfficeLow | OfficeHigh | FactoryMedium
            | Warehouse | Hospital | School | PowerPlant | RailStation | CityHall | Museum => {
                (2, 2)
            }
            Mall | FactoryLarge | University | ParkLarge | Stadium | SpaceProgram => (3, 3),
            Airport | AmusementPark => (4, 4),
            _ => (1, 1),
        }
    }

    pub fn area(self) -> usize {
        let (w, h) = self.footprint();
        w * h
    }

    pub fn stats(self) -> BuildingStats {
        use BuildingType::*;
        match self {
            Grass | Water | Road | Rail | Tree | Empty => stats(0, 0, 0.0),

            HouseSmall => stats(6, 0, 0.0),
            HouseMedium => stats(12, 0, 0.0),
            Mansion => stats(18, 0, 0.0),
            ApartmentLow => stats(60, 0, 2.0),
            ApartmentHigh => stats(120, 0, 4.0),

            ShopSmall => stats(0, 8, 1.0),
            ShopMedium => stats(0, 16, 2.0),
            OfficeLow => stats(0, 50, 2.0),
            OfficeHigh => stats(0, 120, 3.0),
            Mall => stats(0, 200, 5.0),

            FactorySmall => stats(0, 20, 10.0),
            FactoryMedium => stats(0, 50, 20.0),
            Warehouse => stats(0, 40, 8.0),
            FactoryLarge => stats(0, 120, 35.0),

            PoliceStation => stats(0, 20, 0.0),
            FireStation => stats(0, 20, 0.0),
            Hospital => stats(0, 60, 0.0),
            School => stats(0, 25, 0.0),
            University => stats(0, 80, 0.0),

            PowerPlant => stats(0, 30, 40.0),
            WaterTower => stats(0, 5, 0.0),

            Park => stats(0, 2, -5.0),
            ParkLarge => stats(0, 6, -15.0),

            SubwayStation => stats(0, 5, 0.0),
            RailStation => stats(0, 10, 2.0),

            CityHall => stats(0, 40, 0.0),
            Stadium => stats(0, 60, 2.0),
            Museum => stats(0, 30, 0.0),
            Airport => stats(0, 200, 30.0),
            SpaceProgram => stats(0, 150, 10.0),
            AmusementPark => stats(0, 80, 3.0),
        }
    }

    pub fn is_terrain(self) -> bool {
        use BuildingType::*;
        matches!(self, Grass | Water | Road | Rail | Tree | Empty)
    }

    /// Types that are complete the moment they are placed.
    pub fn is_instant(self) -> bool {
        self.is_terrain() || self == BuildingType::Park
    }

    /// Tier-1 zone buildings. They may spawn and build without power or
    /// water, at reduced occupancy.
    pub fn is_starter(self) -> bool {
        use BuildingType::*;
        matches!(self, HouseSmall | ShopSmall | FactorySmall)
    }

    /// Types that can be absorbed into a larger building by consolidation.
    pub fn is_small(self) -> bool {
        use BuildingType::*;
        matches!(
            self,
            HouseSmall | HouseMedium | ShopSmall | ShopMedium | FactorySmall
        )
    }

    /// Self-powering infrastructure: construction never waits on utilities.
    pub fn is_utility(self) -> bool {
        matches!(self, BuildingType::PowerPlant | BuildingType::WaterTower)
    }

    /// Zone this type grows in, if it is a zone building.
    pub fn zone(self) -> Option<ZoneType> {
        use BuildingType::*;
        match self {
            HouseSmall | HouseMedium | Mansion | ApartmentLow | ApartmentHigh => {
                Some(ZoneType::Residential)
            }
            ShopSmall | ShopMedium | OfficeLow | OfficeHigh | Mall => Some(ZoneType::Commercial),
            FactorySmall | FactoryMedium | Warehouse | FactoryLarge => Some(ZoneType::Industrial),
            _ => None,
        }
    }

    pub fn is_zone_building(self) -> bool {
        self.zone().is_some()
    }

    pub fn is_green(self) -> bool {
        use BuildingType::*;
        matches!(self, Tree | Park | ParkLarge)
    }

    /// Eligible for random ignition: real structures, not terrain, parks or
    /// transit entrances.
    pub fn is_flammable(self) -> bool {
        use BuildingType::*;
        !self.is_terrain() && !matches!(self, Park | ParkLarge | SubwayStation | RailStation)
    }

    /// Placement price. Terrain that cannot be placed directly costs nothing.
    pub fn build_cost(self) -> f64 {
        use BuildingType::*;
        match self {
            Grass | Water | Empty | Tree => 0.0,
            Road => 25.0,
            Rail => 40.0,
            HouseSmall | ShopSmall | FactorySmall => 100.0,
            HouseMedium | ShopMedium => 250.0,
            Mansion | ApartmentLow | OfficeLow | FactoryMedium | Warehouse => 1_000.0,
            ApartmentHigh | OfficeHigh | FactoryLarge => 2_500.0,
            Mall => 5_000.0,
            PoliceStation | FireStation => 500.0,
            Hospital => 1_000.0,
            School => 400.0,
            University => 2_000.0,
            PowerPlant => 3_000.0,
            WaterTower => 1_000.0,
            Park => 150.0,
            ParkLarge => 600.0,
            SubwayStation => 750.0,
            RailStation => 1_000.0,
            CityHall => 2_500.0,
            Stadium => 5_000.0,
            Museum => 4_000.0,
            Airport => 10_000.0,
            SpaceProgram => 15_000.0,
            AmusementPark => 12_000.0,
        }
    }
}

/// The record held by every tile. Non-origin cells of a footprint hold an
/// `Empty` stub whose `origin` points back at the real record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub building_type: BuildingType,
    /// 1..=5 for zone buildings, 0 otherwise.
    pub level: u8,
    pub population: u32,
    pub jobs: u32,
    pub powered: bool,
    pub watered: bool,
    pub on_fire: bool,
    pub fire_progress: f32,
    /// Ticks since the last type change.
    pub age: u32,
    pub construction_progress: f32,
    pub abandoned: bool,
    pub flipped: bool,
    /// Back-reference to the footprint origin, set only on `Empty` stubs.
    pub origin: Option<GridPos>,
}

impl Building {
    pub fn new(building_type: BuildingType) -> Self {
        let level = if building_type.is_zone_building() { 1 } else { 0 };
        Self::with_level(building_type, level)
    }

    pub fn with_level(building_type: BuildingType, level: u8) -> Self {
        Self {
            building_type,
            level,
            population: 0,
            jobs: 0,
            powered: false,
            watered: false,
            on_fire: false,
            fire_progress: 0.0,
            age: 0,
            construction_progress: if building_type.is_instant() {
                100.0
            } else {
                0.0
            },
            abandoned: false,
            flipped: false,
            origin: None,
        }
    }

    pub fn stub(origin: GridPos) -> Self {
        Self {
            origin: Some(origin),
            ..Self::new(BuildingType::Empty)
        }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.construction_progress >= 100.0
    }

    pub fn is_stub(&self) -> bool {
        self.building_type == BuildingType::Empty
    }
}
