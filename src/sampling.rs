use crate::{grid::Grid, Tile};

use fnv::FnvHasher;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hasher;

/// The seed a generation run is reproduced from.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Seed {
    Text(String),
    Number(u64),
}

impl Default for Seed {
    fn default() -> Self {
        Seed::Text(String::new())
    }
}

impl Seed {
    /// Text seeds are hashed with 64-bit FNV-1a over their UTF-8 bytes, so the same text gives
    /// the same stream on every platform.
    pub fn to_u64(&self) -> u64 {
        match self {
            Seed::Text(text) => {
                let mut hasher = FnvHasher::default();
                hasher.write(text.as_bytes());
                hasher.finish()
            }
            Seed::Number(n) => *n,
        }
    }

    pub fn random() -> Self {
        Seed::Number(rand::random())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Text(text) => write!(f, "{:?}", text),
            Seed::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Seed {
    fn from(text: &str) -> Self {
        Seed::Text(text.to_string())
    }
}

impl From<u64> for Seed {
    fn from(n: u64) -> Self {
        Seed::Number(n)
    }
}

pub fn seeded_rng(seed: &Seed) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.to_u64())
}

/// Makes the border of `grid` wall and every interior tile wall with probability
/// `fill_percent / 100`. One draw is taken per interior tile, x outer and y inner.
pub fn random_fill(grid: &mut Grid, fill_percent: u32, rng: &mut impl Rng) {
    let roll = Uniform::from(0..100u32);
    for c in grid.coords().collect::<Vec<_>>() {
        let tile = if grid.is_border(c.x, c.y) || roll.sample(rng) < fill_percent {
            Tile::Wall
        } else {
            Tile::Ground
        };
        grid.set_tile(&c, tile);
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_seed_hash_is_fnv1a() {
        // Reference values of 64-bit FNV-1a.
        assert_eq!(Seed::from("").to_u64(), 0xcbf2_9ce4_8422_2325);
        assert_eq!(Seed::from("a").to_u64(), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_number_seed_is_used_as_is() {
        assert_eq!(Seed::Number(42).to_u64(), 42);
    }

    #[test]
    fn test_fill_is_reproducible() {
        let mut a = Grid::new(20, 12, Tile::Ground);
        let mut b = Grid::new(20, 12, Tile::Ground);
        random_fill(&mut a, 47, &mut seeded_rng(&Seed::from("cave")));
        random_fill(&mut b, 47, &mut seeded_rng(&Seed::from("cave")));

        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_fill_leaves_only_border_walls() {
        let mut grid = Grid::new(10, 10, Tile::Wall);
        random_fill(&mut grid, 0, &mut seeded_rng(&Seed::Number(7)));

        for c in grid.coords() {
            let expected = if grid.is_border(c.x, c.y) {
                Tile::Wall
            } else {
                Tile::Ground
            };
            assert_eq!(grid.tile(&c), Some(expected));
        }
    }

    #[test]
    fn test_full_fill_is_all_wall() {
        let mut grid = Grid::new(10, 10, Tile::Ground);
        random_fill(&mut grid, 100, &mut seeded_rng(&Seed::Number(7)));

        assert_eq!(grid.count(Tile::Wall), 100);
    }
}
