use crate::Coord;

use fnv::{FnvHashMap, FnvHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stable identity of a room: its discovery index among the ground regions that survived
/// filtering. Independent of where the room ends up after sorting by size.
pub type RoomId = usize;

/// A connected ground region that survived region filtering.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub tiles: Vec<Coord>,
    /// Tiles with at least one 4-neighbor outside of `tiles`, in `tiles` order.
    pub edge_tiles: Vec<Coord>,
    pub is_main_room: bool,
    pub is_accessible_from_main_room: bool,
    pub connected_rooms: BTreeSet<RoomId>,
}

impl Room {
    pub fn new(id: RoomId, tiles: Vec<Coord>) -> Self {
        let members: FnvHashSet<Coord> = tiles.iter().cloned().collect();
        let edge_tiles = tiles
            .iter()
            .filter(|t| {
                t.von_neumann_neighbors()
                    .iter()
                    .any(|n| !members.contains(n))
            })
            .cloned()
            .collect();

        Room {
            id,
            tiles,
            edge_tiles,
            is_main_room: false,
            is_accessible_from_main_room: false,
            connected_rooms: BTreeSet::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_connected(&self, other: &Room) -> bool {
        self.connected_rooms.contains(&other.id)
    }

    /// Shifts every stored coordinate by `(dx, dy)`.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        for t in self.tiles.iter_mut().chain(self.edge_tiles.iter_mut()) {
            *t = t.offset(dx, dy);
        }
    }
}

/// Records a direct passage between the rooms at positions `a` and `b` of `rooms`. If either room
/// is reachable from the main room, everything now reachable through the other one is too.
pub fn connect_rooms(rooms: &mut [Room], a: usize, b: usize) {
    if rooms[a].is_accessible_from_main_room {
        mark_accessible_from_main_room(rooms, b);
    } else if rooms[b].is_accessible_from_main_room {
        mark_accessible_from_main_room(rooms, a);
    }

    let (id_a, id_b) = (rooms[a].id, rooms[b].id);
    rooms[a].connected_rooms.insert(id_b);
    rooms[b].connected_rooms.insert(id_a);
}

/// Flags the room at position `start` and every room transitively connected to it.
pub fn mark_accessible_from_main_room(rooms: &mut [Room], start: usize) {
    let positions: FnvHashMap<RoomId, usize> =
        rooms.iter().enumerate().map(|(i, r)| (r.id, i)).collect();

    let mut stack = vec![start];
    while let Some(i) = stack.pop() {
        if rooms[i].is_accessible_from_main_room {
            continue;
        }
        rooms[i].is_accessible_from_main_room = true;
        stack.extend(
            rooms[i]
                .connected_rooms
                .iter()
                .filter_map(|id| positions.get(id).cloned()),
        );
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

    fn square_room(id: RoomId, min: i32, side: i32) -> Room {
        let mut tiles = Vec::new();
        for x in min..min + side {
            for y in min..min + side {
                tiles.push(Coord::new(x, y));
            }
        }

        Room::new(id, tiles)
    }

    #[test]
    fn test_edge_tiles_of_square_are_its_perimeter() {
        let room = square_room(0, 0, 3);

        assert_eq!(room.size(), 9);
        assert_eq!(room.edge_tiles.len(), 8);
        assert!(!room.edge_tiles.contains(&Coord::new(1, 1)));
        assert!(room.edge_tiles.iter().all(|t| room.tiles.contains(t)));
    }

    #[test]
    fn test_single_tile_room_is_all_edge() {
        let room = Room::new(3, vec![Coord::new(5, 5)]);

        assert_eq!(room.edge_tiles, vec![Coord::new(5, 5)]);
    }

    #[test]
    fn test_connect_is_symmetric() {
        let mut rooms = vec![square_room(0, 0, 2), square_room(1, 5, 2)];
        connect_rooms(&mut rooms, 0, 1);

        assert!(rooms[0].is_connected(&rooms[1]));
        assert!(rooms[1].is_connected(&rooms[0]));
        assert!(!rooms[0].is_accessible_from_main_room);
    }

    #[test]
    fn test_accessibility_propagates_through_chain() {
        let mut rooms = vec![
            square_room(0, 0, 2),
            square_room(1, 5, 2),
            square_room(2, 10, 2),
            square_room(3, 15, 2),
        ];
        rooms[0].is_main_room = true;
        rooms[0].is_accessible_from_main_room = true;

        // 1 - 2 - 3 form a chain before it gets joined to the main room.
        connect_rooms(&mut rooms, 1, 2);
        connect_rooms(&mut rooms, 2, 3);
        assert!(rooms[1..].iter().all(|r| !r.is_accessible_from_main_room));

        connect_rooms(&mut rooms, 2, 0);
        assert!(rooms.iter().all(|r| r.is_accessible_from_main_room));
    }

    #[test]
    fn test_translate_moves_tiles_and_edges() {
        let mut room = square_room(0, 0, 2);
        room.translate(5, 5);

        assert!(room.tiles.contains(&Coord::new(5, 5)));
        assert!(room.edge_tiles.contains(&Coord::new(6, 6)));
        assert!(!room.tiles.contains(&Coord::new(0, 0)));
    }
}
