use crate::{
    automata::{mark_edges, post_clean, smooth, SmoothingMode, SmoothingRule},
    connector::{connect, detect_main_room, ConnectionMode},
    error::GenerationError,
    graph::{is_connected, room_graph},
    grid::Grid,
    passage::Passage,
    region::{extract_rooms, remove_small_wall_regions},
    room::{Room, RoomId},
    sampling::{random_fill, seeded_rng, Seed},
    symmetric_map::SymmetricMap,
    Coord, Tile, TileEncoder,
};

use petgraph::{
    dot::{Config, Dot},
    graph::UnGraph,
};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Everything needed to reproduce a cave. Missing fields take their `Default` values when parsed.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct CaveMapSpec {
    pub width: i32,
    pub height: i32,
    /// Thickness of the wall ring added around the finished cave.
    pub border_size: i32,
    /// Chance in percent that an interior tile starts out as wall.
    pub fill_percent: u32,
    pub seed: Seed,
    /// Ignore `seed` and draw a fresh one. The drawn seed is reported by `CaveMap::seed`.
    pub use_random_seed: bool,
    pub smooth_iterations: u32,
    pub death_threshold: u32,
    pub birth_threshold: u32,
    pub smoothing_mode: SmoothingMode,
    pub enable_post_cleaning: bool,
    pub post_cleaning_iterations: u32,
    pub post_cleaning_threshold: u32,
    /// Wall regions smaller than this become ground.
    pub wall_threshold_size: usize,
    /// Ground regions smaller than this become wall. The rest become rooms.
    pub ground_threshold_size: usize,
    pub connect_rooms: bool,
    pub connection_mode: ConnectionMode,
    pub passage_radius: i32,
    /// Mark walls that touch ground as `Tile::Edge`.
    pub mark_edges: bool,
}

impl Default for CaveMapSpec {
    fn default() -> Self {
        CaveMapSpec {
            width: 64,
            height: 64,
            border_size: 5,
            fill_percent: 47,
            seed: Seed::default(),
            use_random_seed: true,
            smooth_iterations: 15,
            death_threshold: 4,
            birth_threshold: 4,
            smoothing_mode: SmoothingMode::InPlace,
            enable_post_cleaning: true,
            post_cleaning_iterations: 1,
            post_cleaning_threshold: 5,
            wall_threshold_size: 50,
            ground_threshold_size: 50,
            connect_rooms: true,
            connection_mode: ConnectionMode::MainRoom,
            passage_radius: 2,
            mark_edges: false,
        }
    }
}

impl CaveMapSpec {
    pub fn from_ron_str(s: &str) -> Result<Self, GenerationError> {
        Ok(ron::de::from_str(s)?)
    }

    pub fn to_ron_string(&self) -> Result<String, GenerationError> {
        Ok(ron::ser::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GenerationError::InvalidConfiguration(format!(
                "map dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.border_size < 0 {
            return Err(GenerationError::InvalidConfiguration(format!(
                "border size must not be negative, got {}",
                self.border_size
            )));
        }
        let bordered = self.border_size.checked_mul(2).and_then(|b| {
            self.width
                .checked_add(b)?
                .checked_mul(self.height.checked_add(b)?)
        });
        if bordered.is_none() {
            return Err(GenerationError::InvalidConfiguration(format!(
                "a {}x{} map with border size {} is too large",
                self.width, self.height, self.border_size
            )));
        }
        if self.passage_radius < 0 {
            return Err(GenerationError::InvalidConfiguration(format!(
                "passage radius must not be negative, got {}",
                self.passage_radius
            )));
        }
        if self.fill_percent > 100 {
            return Err(GenerationError::InvalidConfiguration(format!(
                "fill percent must be at most 100, got {}",
                self.fill_percent
            )));
        }

        Ok(())
    }

    pub fn smoothing_rule(&self) -> SmoothingRule {
        SmoothingRule {
            birth_threshold: self.birth_threshold,
            death_threshold: self.death_threshold,
        }
    }

    pub fn resolve_seed(&self) -> Seed {
        if self.use_random_seed {
            Seed::random()
        } else {
            self.seed.clone()
        }
    }

    /// Generates a cave from the configured (or a freshly drawn) seed.
    pub fn generate(&self) -> Result<CaveMap, GenerationError> {
        self.validate()?;
        let seed = self.resolve_seed();
        log::debug!("Generating cave map from seed {}", seed);

        let mut map = self.generate_with_rng(&mut seeded_rng(&seed))?;
        map.seed = Some(seed);

        Ok(map)
    }

    /// Generates a cave drawing the initial noise from `rng`. `seed` and `use_random_seed` are
    /// ignored.
    pub fn generate_with_rng(&self, rng: &mut impl Rng) -> Result<CaveMap, GenerationError> {
        self.validate()?;

        let mut grid = Grid::new(self.width, self.height, Tile::Wall);
        random_fill(&mut grid, self.fill_percent, rng);

        let rule = self.smoothing_rule();
        for _ in 0..self.smooth_iterations {
            smooth(&mut grid, &rule, self.smoothing_mode);
        }
        log::debug!(
            "{} wall tiles after {} {:?} smoothing iterations",
            grid.count(Tile::Wall),
            self.smooth_iterations,
            self.smoothing_mode
        );

        remove_small_wall_regions(&mut grid, self.wall_threshold_size);
        let mut rooms = extract_rooms(&mut grid, self.ground_threshold_size);
        log::debug!("{} rooms after region filtering", rooms.len());

        let mut passages = SymmetricMap::new();
        if self.connect_rooms {
            detect_main_room(&mut rooms);
            connect(
                &mut rooms,
                &mut grid,
                self.connection_mode,
                self.passage_radius,
                &mut passages,
            );
        }

        if self.enable_post_cleaning {
            let mut cleared = 0;
            for _ in 0..self.post_cleaning_iterations {
                cleared += post_clean(&mut grid, self.post_cleaning_threshold);
            }
            log::debug!("Post cleaning cleared {} walls", cleared);
        }

        // Rooms and passages are moved along with the content so they index the bordered grid.
        let mut grid = grid.with_border(self.border_size);
        for room in rooms.iter_mut() {
            room.translate(self.border_size, self.border_size);
        }
        for passage in passages.values_mut() {
            passage.translate(self.border_size, self.border_size);
        }

        if self.mark_edges {
            let edges = mark_edges(&mut grid);
            log::debug!("Marked {} edge tiles", edges);
        }

        let map = CaveMap {
            grid,
            rooms,
            passages,
            seed: None,
            border_size: self.border_size,
        };
        log::debug!(
            "Room graph = {:?}",
            Dot::with_config(&map.connectivity_graph(), &[Config::EdgeNoLabel])
        );

        Ok(map)
    }
}

/// Shorthand for `spec.generate()`.
pub fn generate(spec: &CaveMapSpec) -> Result<CaveMap, GenerationError> {
    spec.generate()
}

/// A finished cave: the bordered grid and the rooms found in it.
#[derive(Clone, Debug)]
pub struct CaveMap {
    grid: Grid,
    rooms: Vec<Room>,
    passages: SymmetricMap<Passage>,
    seed: Option<Seed>,
    border_size: i32,
}

impl CaveMap {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Sorted largest first when rooms were connected, in discovery order otherwise.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn main_room(&self) -> Option<&Room> {
        self.rooms.iter().find(|r| r.is_main_room)
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// The seed the noise was drawn from. `None` when generated with a caller-supplied RNG.
    pub fn seed(&self) -> Option<&Seed> {
        self.seed.as_ref()
    }

    pub fn border_size(&self) -> i32 {
        self.border_size
    }

    pub fn passages(&self) -> impl Iterator<Item = &Passage> {
        self.passages.values()
    }

    pub fn passage_count(&self) -> usize {
        self.passages.len()
    }

    pub fn passage_between(&self, a: RoomId, b: RoomId) -> Option<&Passage> {
        self.passages.get(a, b)
    }

    pub fn connectivity_graph(&self) -> UnGraph<RoomId, ()> {
        room_graph(&self.rooms)
    }

    /// True when every room can reach every other room through passages.
    pub fn is_fully_connected(&self) -> bool {
        is_connected(&self.connectivity_graph())
    }

    /// Where the tile at `c` is drawn: the grid is centered on the origin.
    pub fn world_position(&self, c: &Coord) -> Coord {
        c.offset(-self.grid.width() / 2, -self.grid.height() / 2)
    }

    pub fn encode_tiles(&self, encoder: &mut impl TileEncoder) {
        for c in self.grid.coords() {
            if let Some(tile) = self.grid.tile(&c) {
                encoder.encode_tile(&self.world_position(&c), tile);
            }
        }
    }

    pub fn into_parts(self) -> (Grid, Vec<Room>) {
        (self.grid, self.rooms)
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
