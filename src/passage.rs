use crate::{grid::Grid, room::RoomId, Coord, Tile};

use serde::{Deserialize, Serialize};

/// A corridor carved between two rooms.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Passage {
    pub room_a: RoomId,
    pub room_b: RoomId,
    /// Edge tile of `room_a` the corridor starts at.
    pub from: Coord,
    /// Edge tile of `room_b` the corridor ends at.
    pub to: Coord,
}

impl Passage {
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.from = self.from.offset(dx, dy);
        self.to = self.to.offset(dx, dy);
    }
}

/// Integer line from `from` to `to`, both ends included. Steps one tile along the dominant axis at a
/// time and one tile along the other axis whenever the accumulated error reaches the dominant
/// length.
pub fn get_line(from: Coord, to: Coord) -> Vec<Coord> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    let inverted = dx.abs() < dy.abs();
    let (longest, shortest, step, gradient_step) = if inverted {
        (dy.abs(), dx.abs(), dy.signum(), dx.signum())
    } else {
        (dx.abs(), dy.abs(), dx.signum(), dy.signum())
    };

    let mut line = Vec::with_capacity(longest as usize + 1);
    let (mut x, mut y) = (from.x, from.y);
    let mut gradient_accumulation = longest / 2;
    for _ in 0..longest {
        line.push(Coord::new(x, y));

        if inverted {
            y += step;
        } else {
            x += step;
        }

        gradient_accumulation += shortest;
        if gradient_accumulation >= longest {
            if inverted {
                x += gradient_step;
            } else {
                y += gradient_step;
            }
            gradient_accumulation -= longest;
        }
    }
    debug_assert_eq!(Coord::new(x, y), to);
    line.push(Coord::new(x, y));

    line
}

/// Turns every in-range tile within `radius` of `center` into ground.
pub fn draw_circle(grid: &mut Grid, center: Coord, radius: i32) {
    // Only the part of the disc's bounding box inside the grid is visited. Offsets are at most
    // `i32::MAX`, so their squares and sum fit in an i64.
    let r = i64::from(radius.max(0));
    let (cx, cy) = (i64::from(center.x), i64::from(center.y));
    let (x_min, x_max) = ((cx - r).max(0), (cx + r).min(i64::from(grid.width()) - 1));
    let (y_min, y_max) = ((cy - r).max(0), (cy + r).min(i64::from(grid.height()) - 1));
    for x in x_min..=x_max {
        for y in y_min..=y_max {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r * r {
                grid.set(x as i32, y as i32, Tile::Ground);
            }
        }
    }
}

pub fn carve_passage(grid: &mut Grid, from: Coord, to: Coord, radius: i32) {
    for c in get_line(from, to) {
        draw_circle(grid, c, radius);
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
