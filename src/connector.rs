use crate::{
    grid::Grid,
    passage::{carve_passage, Passage},
    room::{connect_rooms, Room},
    symmetric_map::SymmetricMap,
    Coord,
};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ConnectionMode {
    /// Keep joining the closest unreachable room to the reachable set until every room can be
    /// reached from the main room.
    MainRoom,
    /// Join every unconnected room to its nearest neighbor. Does not guarantee a single connected
    /// cave.
    Nearest,
}

/// The closest pair of edge tiles found so far between two rooms, by position in the room list.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Candidate {
    distance: i64,
    room_a: usize,
    room_b: usize,
    tile_a: Coord,
    tile_b: Coord,
}

/// Sorts `rooms` by descending size and flags the first one as the main room. Equal sizes keep
/// their discovery order.
pub fn detect_main_room(rooms: &mut [Room]) {
    rooms.sort_by(|r1, r2| r2.size().cmp(&r1.size()));
    if let Some(main) = rooms.first_mut() {
        main.is_main_room = true;
        main.is_accessible_from_main_room = true;
        log::debug!("Main room is {} with {} tiles", main.id, main.size());
    }
}

pub fn connect(
    rooms: &mut [Room],
    grid: &mut Grid,
    mode: ConnectionMode,
    passage_radius: i32,
    passages: &mut SymmetricMap<Passage>,
) {
    let carved = match mode {
        ConnectionMode::MainRoom => connect_to_main_room(rooms, grid, passage_radius, passages),
        ConnectionMode::Nearest => connect_nearest_rooms(rooms, grid, passage_radius, passages),
    };
    log::debug!("Carved {} passages ({:?})", carved, mode);
}

/// Repeatedly carves the shortest passage between a room that cannot reach the main room and one
/// that can. Stops when every room is reachable or no pair of edge tiles remains. Returns the
/// number of passages carved.
pub fn connect_to_main_room(
    rooms: &mut [Room],
    grid: &mut Grid,
    passage_radius: i32,
    passages: &mut SymmetricMap<Passage>,
) -> usize {
    let mut carved = 0;
    loop {
        let mut best = None;
        for a in 0..rooms.len() {
            if rooms[a].is_accessible_from_main_room {
                continue;
            }
            for b in 0..rooms.len() {
                if !rooms[b].is_accessible_from_main_room || rooms[a].is_connected(&rooms[b]) {
                    continue;
                }
                find_closest_tiles(rooms, a, b, &mut best);
            }
        }

        match best {
            Some(candidate) => {
                create_passage(rooms, grid, &candidate, passage_radius, passages);
                carved += 1;
            }
            None => break,
        }
    }

    let unreachable = rooms
        .iter()
        .filter(|r| !r.is_accessible_from_main_room)
        .count();
    if unreachable > 0 {
        log::debug!("{} rooms could not be joined to the main room", unreachable);
    }

    carved
}

/// Joins each room that has no passage yet to its nearest room, in passes, until a pass carves
/// nothing. Returns the number of passages carved.
pub fn connect_nearest_rooms(
    rooms: &mut [Room],
    grid: &mut Grid,
    passage_radius: i32,
    passages: &mut SymmetricMap<Passage>,
) -> usize {
    let mut carved = 0;
    loop {
        let mut carved_this_pass = 0;
        for a in 0..rooms.len() {
            if !rooms[a].connected_rooms.is_empty() {
                continue;
            }
            let mut best = None;
            for b in 0..rooms.len() {
                if a == b || rooms[a].is_connected(&rooms[b]) {
                    continue;
                }
                find_closest_tiles(rooms, a, b, &mut best);
            }
            if let Some(candidate) = best {
                create_passage(rooms, grid, &candidate, passage_radius, passages);
                carved_this_pass += 1;
            }
        }

        if carved_this_pass == 0 {
            break;
        }
        carved += carved_this_pass;
    }

    carved
}

/// Replaces `best` only with a strictly closer pair, so the first pair found wins a tie.
fn find_closest_tiles(rooms: &[Room], a: usize, b: usize, best: &mut Option<Candidate>) {
    for tile_a in rooms[a].edge_tiles.iter() {
        for tile_b in rooms[b].edge_tiles.iter() {
            let distance = tile_a.squared_distance(tile_b);
            if best.map_or(true, |c| distance < c.distance) {
                *best = Some(Candidate {
                    distance,
                    room_a: a,
                    room_b: b,
                    tile_a: *tile_a,
                    tile_b: *tile_b,
                });
            }
        }
    }
}

fn create_passage(
    rooms: &mut [Room],
    grid: &mut Grid,
    candidate: &Candidate,
    passage_radius: i32,
    passages: &mut SymmetricMap<Passage>,
) {
    connect_rooms(rooms, candidate.room_a, candidate.room_b);
    carve_passage(grid, candidate.tile_a, candidate.tile_b, passage_radius);

    let passage = Passage {
        room_a: rooms[candidate.room_a].id,
        room_b: rooms[candidate.room_b].id,
        from: candidate.tile_a,
        to: candidate.tile_b,
    };
    log::trace!(
        "Passage {} -> {} from {} to {}",
        passage.room_a,
        passage.room_b,
        passage.from,
        passage.to
    );
    passages.insert(passage.room_a, passage.room_b, passage);
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
    use crate::{region::extract_rooms, Tile};

    fn three_caves() -> Grid {
        Grid::from_rows(&[
            "##############",
            "#....#...##..#",
            "#....#...##..#",
            "#....#...##..#",
            "##############",
        ])
        .unwrap()
    }

    #[test]
    fn test_main_room_is_largest() {
        let mut grid = Grid::from_rows(&[
            "#######", //
            "#.#...#",
            "#.#...#",
            "#######",
        ])
        .unwrap();
        let mut rooms = extract_rooms(&mut grid, 1);
        detect_main_room(&mut rooms);

        assert_eq!(rooms[0].id, 1);
        assert!(rooms[0].is_main_room && rooms[0].is_accessible_from_main_room);
        assert_eq!(rooms.iter().filter(|r| r.is_main_room).count(), 1);
    }

    #[test]
    fn test_equal_sizes_keep_discovery_order() {
        let mut grid = Grid::from_rows(&["#.#.#.#"]).unwrap();
        let mut rooms = extract_rooms(&mut grid, 1);
        detect_main_room(&mut rooms);

        let ids: Vec<_> = rooms.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_no_rooms_is_not_an_error() {
        let mut grid = Grid::new(4, 4, Tile::Wall);
        let mut rooms: Vec<Room> = Vec::new();
        let mut passages = SymmetricMap::new();
        detect_main_room(&mut rooms);

        assert_eq!(connect_to_main_room(&mut rooms, &mut grid, 1, &mut passages), 0);
    }

    #[test]
    fn test_connect_to_main_room_joins_closest_rooms() {
        let mut grid = three_caves();
        let mut rooms = extract_rooms(&mut grid, 1);
        let mut passages = SymmetricMap::new();
        detect_main_room(&mut rooms);
        let carved = connect_to_main_room(&mut rooms, &mut grid, 0, &mut passages);

        assert_eq!(carved, 2);
        assert!(rooms.iter().all(|r| r.is_accessible_from_main_room));
        assert_eq!(
            passages.get(0, 1),
            Some(&Passage {
                room_a: 1,
                room_b: 0,
                from: Coord::new(6, 1),
                to: Coord::new(4, 1),
            })
        );
        assert_eq!(
            passages.get(2, 1).map(|p| (p.from, p.to)),
            Some((Coord::new(11, 1), Coord::new(8, 1)))
        );
        assert!(passages.get(0, 2).is_none());

        for x in [5, 9, 10].iter() {
            assert_eq!(grid.get(*x, 1), Some(Tile::Ground));
        }
        assert_eq!(grid.get(5, 2), Some(Tile::Wall));
    }

    #[test]
    fn test_connections_are_symmetric() {
        let mut grid = three_caves();
        let mut rooms = extract_rooms(&mut grid, 1);
        let mut passages = SymmetricMap::new();
        detect_main_room(&mut rooms);
        connect(
            &mut rooms,
            &mut grid,
            ConnectionMode::MainRoom,
            1,
            &mut passages,
        );

        for r1 in rooms.iter() {
            for r2 in rooms.iter() {
                assert_eq!(r1.is_connected(r2), r2.is_connected(r1));
            }
        }
    }

    #[test]
    fn test_nearest_mode_gives_every_room_a_passage() {
        let mut grid = three_caves();
        let mut rooms = extract_rooms(&mut grid, 1);
        let mut passages = SymmetricMap::new();
        let carved = connect_nearest_rooms(&mut rooms, &mut grid, 0, &mut passages);

        // Room 0 joins room 1, which leaves room 2 to join room 1 as well.
        assert_eq!(carved, 2);
        assert!(rooms.iter().all(|r| !r.connected_rooms.is_empty()));
        assert!(passages.get(0, 1).is_some());
        assert!(passages.get(1, 2).is_some());
    }

    #[test]
    fn test_tie_keeps_first_pair() {
        let rooms = vec![
            Room::new(0, vec![Coord::new(0, 0), Coord::new(0, 2)]),
            Room::new(1, vec![Coord::new(2, 1)]),
        ];
        let mut best = None;
        find_closest_tiles(&rooms, 0, 1, &mut best);

        let best = best.unwrap();
        assert_eq!(best.distance, 5);
        assert_eq!(best.tile_a, Coord::new(0, 0));
    }

    #[test]
    fn test_room_without_edge_tiles_is_skipped() {
        let mut rooms = vec![
            Room::new(0, vec![Coord::new(0, 0)]),
            Room::new(1, vec![Coord::new(3, 3)]),
        ];
        rooms[1].edge_tiles.clear();
        let mut best = None;
        find_closest_tiles(&rooms, 0, 1, &mut best);

        assert!(best.is_none());
    }
}
