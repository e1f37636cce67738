#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = BTreeMap<K, V>;

/// An opaque, monotonically allocated id usable as a [`crate::Registry`] key.
pub trait StableId: Copy + Eq + Ord + core::hash::Hash {
    fn from_raw(raw: u64) -> Self;
    fn raw(self) -> u64;
}

impl StableId for crate::GroupId {
    fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    fn raw(self) -> u64 {
        self.0
    }
}

impl StableId for crate::ItemId {
    fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    fn raw(self) -> u64 {
        self.0
    }
}
