pub mod automata;
pub mod connector;
pub mod error;
pub mod graph;
pub mod grid;
pub mod map_types;
pub mod passage;
pub mod region;
pub mod room;
pub mod sampling;

mod symmetric_map;

pub use error::GenerationError;
pub use grid::Grid;
pub use map_types::cave::{generate, CaveMap, CaveMapSpec};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Implement this to allow the generated cave to be drawn into your tile layer.
pub trait TileEncoder {
    /// `tile` is the tile kind to draw at the world position `point`.
    fn encode_tile(&mut self, point: &Coord, tile: Tile);
}

/// An `(x, y)` index into a `Grid`.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    pub fn squared_distance(&self, other: &Coord) -> i64 {
        let dx = i64::from(self.x - other.x);
        let dy = i64::from(self.y - other.y);

        dx * dx + dy * dy
    }

    /// The 4-neighbors, in the order the flood fill visits them.
    pub fn von_neumann_neighbors(&self) -> [Coord; 4] {
        [
            Coord::new(self.x - 1, self.y),
            Coord::new(self.x, self.y - 1),
            Coord::new(self.x, self.y + 1),
            Coord::new(self.x + 1, self.y),
        ]
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Coord {
        Coord::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Coord::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[repr(u8)]
pub enum Tile {
    Ground = 0,
    Wall = 1,
    /// Wall bordering ground. Only produced when edge marking is enabled.
    Edge = 2,
}

impl Tile {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Tile> {
        match code {
            0 => Some(Tile::Ground),
            1 => Some(Tile::Wall),
            2 => Some(Tile::Edge),
            _ => None,
        }
    }

    fn glyph(self) -> char {
        match self {
            Tile::Ground => '.',
            Tile::Wall => '#',
            Tile::Edge => '+',
        }
    }

    fn from_glyph(c: char) -> Option<Tile> {
        match c {
            '.' => Some(Tile::Ground),
            '#' => Some(Tile::Wall),
            '+' => Some(Tile::Edge),
            _ => None,
        }
    }
}
