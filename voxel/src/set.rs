//! Set of occupied voxel cells.

use std::collections::hash_set;
use std::collections::HashSet;

use crate::key::VoxelKey;

/// The set of grid cells occupied in one frame.
///
/// Membership tests are hashed. Serialization always goes through
/// [`sorted_keys`](Self::sorted_keys) so that encoded output is deterministic.
#[derive(Debug, Clone)]
pub struct VoxelSet<K> {
    keys: HashSet<K>,
}

impl<K: VoxelKey> PartialEq for VoxelSet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
    }
}

impl<K: VoxelKey> Eq for VoxelSet<K> {}

impl<K: VoxelKey> Default for VoxelSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: VoxelKey> VoxelSet<K> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: HashSet::new(),
        }
    }

    /// Creates an empty set with room for `capacity` keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: HashSet::with_capacity(capacity),
        }
    }

    /// Returns the number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if no cell is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns `true` if `key` is occupied.
    #[must_use]
    pub fn contains(&self, key: K) -> bool {
        self.keys.contains(&key)
    }

    /// Marks `key` as occupied. Returns `false` if it already was.
    pub fn insert(&mut self, key: K) -> bool {
        self.keys.insert(key)
    }

    /// Clears `key`. Returns `false` if it was not occupied.
    pub fn remove(&mut self, key: K) -> bool {
        self.keys.remove(&key)
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Reserves room for at least `additional` more keys.
    pub fn reserve(&mut self, additional: usize) {
        self.keys.reserve(additional);
    }

    /// Iterates keys in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.keys.iter().copied()
    }

    /// Returns the keys in ascending order.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<K> {
        let mut keys: Vec<K> = self.keys.iter().copied().collect();
        keys.sort_unstable();
        keys
    }
}

impl<K: VoxelKey> FromIterator<K> for VoxelSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl<K: VoxelKey> Extend<K> for VoxelSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.keys.extend(iter);
    }
}

impl<K: VoxelKey> IntoIterator for VoxelSet<K> {
    type Item = K;
    type IntoIter = hash_set::IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}
