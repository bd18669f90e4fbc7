use crate::room::{Room, RoomId};

use fnv::FnvHashMap;
use petgraph::{
    algo::connected_components,
    graph::{NodeIndex, UnGraph},
};

/// One node per room, weighted by its id, and one edge per carved passage.
pub fn room_graph(rooms: &[Room]) -> UnGraph<RoomId, ()> {
    let mut graph = UnGraph::default();
    let nodes: FnvHashMap<RoomId, NodeIndex> =
        rooms.iter().map(|r| (r.id, graph.add_node(r.id))).collect();
    for r in rooms.iter() {
        for other in r.connected_rooms.iter() {
            // Don't add the same undirected edge twice.
            if *other <= r.id {
                continue;
            }
            if let Some(n) = nodes.get(other) {
                graph.add_edge(nodes[&r.id], *n, ());
            }
        }
    }

    graph
}

pub fn is_connected<N, E>(graph: &UnGraph<N, E>) -> bool {
    graph.node_count() <= 1 || connected_components(graph) == 1
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
    use crate::{room::connect_rooms, Coord};

    fn rooms(n: usize) -> Vec<Room> {
        (0..n)
            .map(|i| Room::new(i, vec![Coord::new(3 * i as i32, 0)]))
            .collect()
    }

    #[test]
    fn test_graph_has_one_edge_per_connection() {
        let mut rooms = rooms(3);
        connect_rooms(&mut rooms, 0, 1);
        connect_rooms(&mut rooms, 1, 2);
        let graph = room_graph(&rooms);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(is_connected(&graph));
    }

    #[test]
    fn test_disconnected_rooms() {
        let mut rooms = rooms(4);
        connect_rooms(&mut rooms, 0, 2);
        connect_rooms(&mut rooms, 2, 3);
        let graph = room_graph(&rooms);

        assert_eq!(graph.edge_count(), 2);
        assert!(!is_connected(&graph));
        assert_eq!(connected_components(&graph), 2);
    }

    #[test]
    fn test_empty_graph_is_connected() {
        let graph = room_graph(&[]);

        assert!(is_connected(&graph));
    }
}
