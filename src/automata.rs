//! Birth/death smoothing of a random fill into cave-like shapes, plus the cleanup passes that run
//! after rooms are connected.

use crate::{grid::Grid, Coord, Tile};

use serde::{Deserialize, Serialize};

/// How each smoothing iteration reads its neighborhood. The two modes give different caves for the
/// same seed.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum SmoothingMode {
    /// Tiles are updated in scan order in the same buffer, so later tiles may see neighbors that
    /// were already updated this iteration.
    InPlace,
    /// Every iteration reads the previous grid and writes a fresh one.
    DoubleBuffered,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SmoothingRule {
    /// Ground with more wall neighbors than this becomes wall.
    pub birth_threshold: u32,
    /// Wall with fewer wall neighbors than this becomes ground.
    pub death_threshold: u32,
}

impl SmoothingRule {
    pub fn next_tile(&self, tile: Tile, wall_neighbors: u32) -> Tile {
        match tile {
            Tile::Ground if wall_neighbors > self.birth_threshold => Tile::Wall,
            Tile::Wall if wall_neighbors < self.death_threshold => Tile::Ground,
            t => t,
        }
    }
}

pub fn smooth(grid: &mut Grid, rule: &SmoothingRule, mode: SmoothingMode) {
    match mode {
        SmoothingMode::InPlace => smooth_in_place(grid, rule),
        SmoothingMode::DoubleBuffered => *grid = smooth_double_buffered(grid, rule),
    }
}

pub fn smooth_in_place(grid: &mut Grid, rule: &SmoothingRule) {
    for c in grid.coords().collect::<Vec<_>>() {
        if let Some(tile) = grid.tile(&c) {
            let next = rule.next_tile(tile, grid.wall_neighbor_count(c.x, c.y));
            grid.set_tile(&c, next);
        }
    }
}

pub fn smooth_double_buffered(grid: &Grid, rule: &SmoothingRule) -> Grid {
    let mut next = grid.clone();
    for c in grid.coords() {
        if let Some(tile) = grid.tile(&c) {
            next.set_tile(&c, rule.next_tile(tile, grid.wall_neighbor_count(c.x, c.y)));
        }
    }

    next
}

/// Turns walls with at least `threshold` ground neighbors into ground. Only ever removes walls.
pub fn post_clean(grid: &mut Grid, threshold: u32) -> usize {
    let mut cleared = 0;
    for c in grid.coords().collect::<Vec<_>>() {
        if grid.tile(&c) == Some(Tile::Wall) && grid.ground_neighbor_count(c.x, c.y) >= threshold {
            grid.set_tile(&c, Tile::Ground);
            cleared += 1;
        }
    }

    cleared
}

/// Marks walls that have a ground 4-neighbor as `Tile::Edge`.
pub fn mark_edges(grid: &mut Grid) -> usize {
    let edges: Vec<Coord> = grid
        .coords()
        .filter(|c| grid.tile(c) == Some(Tile::Wall))
        .filter(|c| {
            c.von_neumann_neighbors()
                .iter()
                .any(|n| grid.tile(n) == Some(Tile::Ground))
        })
        .collect();
    for c in edges.iter() {
        grid.set_tile(c, Tile::Edge);
    }

    edges.len()
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
