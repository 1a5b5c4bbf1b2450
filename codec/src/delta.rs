//! Set difference between consecutive frames and its application.

use voxel::{VoxelKey, VoxelSet};
use wire::{FLAG_ADDED, FLAG_REMOVED};

use crate::error::DesyncReason;

/// How a key changed since the previous frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    Added,
    Removed,
}

impl Change {
    /// Wire flag for this change.
    #[must_use]
    pub const fn flag(self) -> i8 {
        match self {
            Self::Added => FLAG_ADDED,
            Self::Removed => FLAG_REMOVED,
        }
    }

    /// Parses a wire flag. Any value other than `+1` / `-1` is rejected.
    #[must_use]
    pub const fn from_flag(flag: i8) -> Option<Self> {
        match flag {
            FLAG_ADDED => Some(Self::Added),
            FLAG_REMOVED => Some(Self::Removed),
            _ => None,
        }
    }
}

/// Keys that changed between two frames, in ascending key order.
///
/// Keys absent from the record are unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaRecord<K> {
    entries: Vec<(K, Change)>,
}

impl<K: VoxelKey> Default for DeltaRecord<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: VoxelKey> DeltaRecord<K> {
    /// Builds a record from arbitrary entries, sorting them by key.
    ///
    /// Later entries for the same key replace earlier ones.
    #[must_use]
    pub fn from_entries(mut entries: Vec<(K, Change)>) -> Self {
        entries.reverse();
        entries.sort_by_key(|(key, _)| *key);
        entries.dedup_by_key(|(key, _)| *key);
        Self { entries }
    }

    /// Converts wire records (already validated as ascending, `±1`).
    #[must_use]
    pub fn from_wire(records: &[(K, i8)]) -> Self {
        let entries = records
            .iter()
            .filter_map(|&(key, flag)| Change::from_flag(flag).map(|change| (key, change)))
            .collect();
        Self { entries }
    }

    /// Flattens the record into wire `(key, flag)` pairs.
    #[must_use]
    pub fn to_wire(&self) -> Vec<(K, i8)> {
        self.entries
            .iter()
            .map(|&(key, change)| (key, change.flag()))
            .collect()
    }

    #[must_use]
    pub fn entries(&self) -> &[(K, Change)] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of additions.
    #[must_use]
    pub fn added(&self) -> usize {
        self.count(Change::Added)
    }

    /// Number of removals.
    #[must_use]
    pub fn removed(&self) -> usize {
        self.count(Change::Removed)
    }

    fn count(&self, change: Change) -> usize {
        self.entries.iter().filter(|(_, c)| *c == change).count()
    }
}

/// Computes the changes that turn `previous` into `current`.
#[must_use]
pub fn diff<K: VoxelKey>(current: &VoxelSet<K>, previous: &VoxelSet<K>) -> DeltaRecord<K> {
    let mut entries: Vec<(K, Change)> = current
        .iter()
        .filter(|key| !previous.contains(*key))
        .map(|key| (key, Change::Added))
        .chain(
            previous
                .iter()
                .filter(|key| !current.contains(*key))
                .map(|key| (key, Change::Removed)),
        )
        .collect();
    // A key is either added or removed, never both, so the order is total.
    entries.sort_unstable_by_key(|(key, _)| *key);
    DeltaRecord { entries }
}

/// Applies `delta` to a copy of `previous`.
pub fn apply_delta<K: VoxelKey>(
    previous: &VoxelSet<K>,
    delta: &DeltaRecord<K>,
) -> Result<VoxelSet<K>, DesyncReason> {
    let mut next = previous.clone();
    apply_delta_in_place(&mut next, delta)?;
    Ok(next)
}

/// Applies `delta` to `state`.
///
/// The whole record is validated before anything is changed, so `state` is
/// untouched on error.
pub fn apply_delta_in_place<K: VoxelKey>(
    state: &mut VoxelSet<K>,
    delta: &DeltaRecord<K>,
) -> Result<(), DesyncReason> {
    for &(key, change) in &delta.entries {
        match change {
            Change::Added if state.contains(key) => {
                return Err(DesyncReason::DuplicateKey { key: key.to_u64() });
            }
            Change::Removed if !state.contains(key) => {
                return Err(DesyncReason::MissingKey { key: key.to_u64() });
            }
            _ => {}
        }
    }

    state.reserve(delta.added());
    for &(key, change) in &delta.entries {
        match change {
            Change::Added => state.insert(key),
            Change::Removed => state.remove(key),
        };
    }
    Ok(())
}
