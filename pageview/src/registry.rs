use crate::key::{KeyMap, StableId};
use crate::{Group, GroupId, ItemId};

/// Maps an item to the group that currently owns it.
pub type ItemRegistry = Registry<ItemId, GroupId>;
/// Owns every live group of a list.
pub type GroupRegistry<N> = Registry<GroupId, Group<N>>;

/// A lookup table keyed by stable ids.
///
/// Ids come from [`Registry::allocate`] and are never handed out twice. Removing an entry
/// tombstones its id: later lookups miss instead of resolving to a newer entry.
#[derive(Clone, Debug)]
pub struct Registry<K, V> {
    next: u64,
    live: KeyMap<K, V>,
}

impl<K: StableId, V> Registry<K, V> {
    pub fn new() -> Self {
        Self {
            next: 0,
            live: KeyMap::new(),
        }
    }

    /// Reserves a fresh id without storing anything under it yet.
    pub fn allocate(&mut self) -> K {
        let id = K::from_raw(self.next);
        self.next = self.next.saturating_add(1);
        id
    }

    /// Allocates an id and stores `value` under it.
    pub fn insert_new(&mut self, value: V) -> K {
        let id = self.allocate();
        self.live.insert(id, value);
        id
    }

    /// Stores `value` under a previously allocated id, returning the replaced value.
    pub fn insert(&mut self, id: K, value: V) -> Option<V> {
        debug_assert!(id.raw() < self.next, "Registry::insert: id was never allocated");
        self.live.insert(id, value)
    }

    pub fn get(&self, id: K) -> Option<&V> {
        self.live.get(&id)
    }

    pub fn get_mut(&mut self, id: K) -> Option<&mut V> {
        self.live.get_mut(&id)
    }

    pub fn contains(&self, id: K) -> bool {
        self.live.contains_key(&id)
    }

    /// Removes and tombstones `id`.
    pub fn remove(&mut self, id: K) -> Option<V> {
        self.live.remove(&id)
    }

    /// Tombstones every live id.
    pub fn clear(&mut self) {
        self.live.clear();
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Iterates live entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.live.iter().map(|(k, v)| (*k, v))
    }
}

impl<K: StableId, V> Default for Registry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
