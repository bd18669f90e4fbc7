use crate::{grid::Grid, room::Room, Coord, Tile};

use std::collections::VecDeque;

/// A maximal 4-connected set of same-kind tiles, in flood fill order.
pub type Region = Vec<Coord>;

/// Finds every 4-connected region of `tile`. Regions come out in scan order (x outer, y inner) of
/// their first tile, and each region lists its tiles in breadth-first order.
pub fn get_regions(grid: &Grid, tile: Tile) -> Vec<Region> {
    let mut visited = VisitedFlags::new(grid);
    let mut regions = Vec::new();
    for c in grid.coords() {
        if grid.tile(&c) == Some(tile) && !visited.is_set(&c) {
            regions.push(flood_fill(grid, c, &mut visited));
        }
    }

    regions
}

struct VisitedFlags {
    height: i32,
    flags: Vec<bool>,
}

impl VisitedFlags {
    fn new(grid: &Grid) -> Self {
        VisitedFlags {
            height: grid.height(),
            flags: vec![false; (grid.width() as usize) * (grid.height() as usize)],
        }
    }

    /// Callers only pass in-range coordinates.
    fn index(&self, c: &Coord) -> usize {
        (c.x as usize) * (self.height as usize) + c.y as usize
    }

    fn is_set(&self, c: &Coord) -> bool {
        self.flags[self.index(c)]
    }

    fn set(&mut self, c: &Coord) {
        let i = self.index(c);
        self.flags[i] = true;
    }
}

fn flood_fill(grid: &Grid, start: Coord, visited: &mut VisitedFlags) -> Region {
    let tile = grid.tile(&start);
    let mut region = Vec::new();
    let mut queue = VecDeque::new();
    visited.set(&start);
    queue.push_back(start);
    while let Some(c) = queue.pop_front() {
        region.push(c);
        for n in c.von_neumann_neighbors().iter() {
            // Out-of-range neighbors have no tile, so they never match.
            if grid.tile(n) == tile && !visited.is_set(n) {
                visited.set(n);
                queue.push_back(*n);
            }
        }
    }

    region
}

/// Overwrites every region of `tile` smaller than `min_size` with `replacement`. Returns the
/// regions that were kept, in discovery order.
pub fn erase_small_regions(
    grid: &mut Grid,
    tile: Tile,
    min_size: usize,
    replacement: Tile,
) -> Vec<Region> {
    let (kept, erased): (Vec<_>, Vec<_>) = get_regions(grid, tile)
        .into_iter()
        .partition(|r| r.len() >= min_size);
    log::debug!(
        "Erasing {} of {} {:?} regions below {} tiles",
        erased.len(),
        kept.len() + erased.len(),
        tile,
        min_size
    );
    for region in erased.iter() {
        for c in region.iter() {
            grid.set_tile(c, replacement);
        }
    }

    kept
}

pub fn remove_small_wall_regions(grid: &mut Grid, wall_threshold_size: usize) {
    erase_small_regions(grid, Tile::Wall, wall_threshold_size, Tile::Ground);
}

/// Fills in ground regions smaller than `ground_threshold_size` and turns the rest into rooms,
/// identified by their discovery index.
pub fn extract_rooms(grid: &mut Grid, ground_threshold_size: usize) -> Vec<Room> {
    erase_small_regions(grid, Tile::Ground, ground_threshold_size, Tile::Wall)
        .into_iter()
        .enumerate()
        .map(|(id, tiles)| Room::new(id, tiles))
        .collect()
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
