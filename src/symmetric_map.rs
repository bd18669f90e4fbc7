use crate::room::RoomId;

use fnv::FnvHashMap;

/// Values keyed by an unordered pair of rooms.
#[derive(Clone, Debug)]
pub struct SymmetricMap<T> {
    map: FnvHashMap<(RoomId, RoomId), T>,
}

impl<T> Default for SymmetricMap<T> {
    fn default() -> Self {
        SymmetricMap::new()
    }
}

impl<T> SymmetricMap<T> {
    pub fn new() -> Self {
        SymmetricMap {
            map: FnvHashMap::default(),
        }
    }

    fn order_indices(i1: RoomId, i2: RoomId) -> (RoomId, RoomId) {
        if i1 > i2 {
            (i2, i1)
        } else {
            (i1, i2)
        }
    }

    pub fn get(&self, i1: RoomId, i2: RoomId) -> Option<&T> {
        self.map.get(&Self::order_indices(i1, i2))
    }

    pub fn insert(&mut self, i1: RoomId, i2: RoomId, value: T) {
        self.map.insert(Self::order_indices(i1, i2), value);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.map.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.map.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_pair_order() {
        let mut map = SymmetricMap::new();
        map.insert(4, 1, "door");

        assert_eq!(map.get(1, 4), Some(&"door"));
        assert_eq!(map.get(4, 1), Some(&"door"));
        assert_eq!(map.get(1, 2), None);
        assert_eq!(map.len(), 1);
    }
}
