use crate::{Coord, Tile};

use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

/// A fixed-size 2D array of tiles.
///
/// Storage is x-major, so iterating `coords()` visits every column in increasing y before
/// moving to the next column. Region discovery order depends on this.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

/// Unchecked serialized form of a `Grid`.
#[derive(Deserialize)]
struct GridData {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl TryFrom<GridData> for Grid {
    type Error = String;

    fn try_from(data: GridData) -> Result<Self, Self::Error> {
        if data.width < 0 || data.height < 0 {
            return Err(format!(
                "grid dimensions must not be negative, got {}x{}",
                data.width, data.height
            ));
        }
        let expected = (data.width as usize) * (data.height as usize);
        if data.tiles.len() != expected {
            return Err(format!(
                "a {}x{} grid needs {} tiles, got {}",
                data.width,
                data.height,
                expected,
                data.tiles.len()
            ));
        }

        Ok(Grid {
            width: data.width,
            height: data.height,
            tiles: data.tiles,
        })
    }
}

impl Grid {
    /// Non-positive dimensions produce an empty grid.
    pub fn new(width: i32, height: i32, fill: Tile) -> Self {
        let width = width.max(0);
        let height = height.max(0);

        Grid {
            width,
            height,
            tiles: vec![fill; (width as usize) * (height as usize)],
        }
    }

    /// Parses rows of `#` (wall), `.` (ground) and `+` (edge). Row `i` becomes `y = i`. Returns
    /// `None` for ragged rows or unknown characters.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as i32;
        let mut grid = Grid::new(width, height, Tile::Wall);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as i32 != width {
                return None;
            }
            for (x, c) in row.chars().enumerate() {
                grid.set(x as i32, y as i32, Tile::from_glyph(c)?);
            }
        }

        Some(grid)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_range(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (x as usize) * (self.height as usize) + y as usize
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Tile> {
        if self.in_range(x, y) {
            Some(self.tiles[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn tile(&self, c: &Coord) -> Option<Tile> {
        self.get(c.x, c.y)
    }

    pub fn is(&self, x: i32, y: i32, tile: Tile) -> bool {
        self.get(x, y) == Some(tile)
    }

    /// Returns false and leaves the grid untouched when `(x, y)` is out of range.
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        if !self.in_range(x, y) {
            return false;
        }
        let i = self.index(x, y);
        self.tiles[i] = tile;

        true
    }

    pub fn set_tile(&mut self, c: &Coord, tile: Tile) -> bool {
        self.set(c.x, c.y, tile)
    }

    pub fn is_border(&self, x: i32, y: i32) -> bool {
        x == 0 || x == self.width - 1 || y == 0 || y == self.height - 1
    }

    /// All coordinates, x outer and y inner.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| Coord::new(x, y)))
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|t| **t == tile).count()
    }

    /// Moore neighbors that are walls. Neighbors outside the grid count as walls.
    pub fn wall_neighbor_count(&self, x: i32, y: i32) -> u32 {
        let mut walls = 0;
        for nx in x - 1..=x + 1 {
            for ny in y - 1..=y + 1 {
                if nx == x && ny == y {
                    continue;
                }
                match self.get(nx, ny) {
                    Some(Tile::Wall) | None => walls += 1,
                    Some(_) => (),
                }
            }
        }

        walls
    }

    /// Moore neighbors that are ground. Neighbors outside the grid are not counted.
    pub fn ground_neighbor_count(&self, x: i32, y: i32) -> u32 {
        let mut ground = 0;
        for nx in x - 1..=x + 1 {
            for ny in y - 1..=y + 1 {
                if !(nx == x && ny == y) && self.is(nx, ny, Tile::Ground) {
                    ground += 1;
                }
            }
        }

        ground
    }

    /// A copy padded by a ring of walls `border` tiles thick. The original content sits at
    /// `(border, border)`.
    pub fn with_border(&self, border: i32) -> Grid {
        let border = border.max(0);
        let mut bordered = Grid::new(
            self.width + 2 * border,
            self.height + 2 * border,
            Tile::Wall,
        );
        for c in self.coords() {
            bordered.set(c.x + border, c.y + border, self.tiles[self.index(c.x, c.y)]);
        }

        bordered
    }

    /// The integer encoding of every tile, indexed `[x][y]`.
    pub fn codes(&self) -> Vec<Vec<u8>> {
        (0..self.width)
            .map(|x| {
                (0..self.height)
                    .map(|y| self.tiles[self.index(x, y)].code())
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", self.tiles[self.index(x, y)].glyph())?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
