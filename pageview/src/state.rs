use alloc::vec::Vec;

use crate::{Coords, GroupId, Placement};

/// A lightweight, serializable snapshot of one group.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupSnapshot {
    pub id: GroupId,
    pub coords: Coords,
    pub items: usize,
    pub placement: Placement,
    pub lazy_loaded: bool,
}

/// A snapshot of a list's coordinate model and window state.
///
/// This is useful for debugging overlays and for asserting layout in tests without
/// reaching into the rendering surface.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListSnapshot {
    pub top: u64,
    pub width: u32,
    pub height: u64,
    pub start_index: usize,
    pub buffer_height: u64,
    pub groups: Vec<GroupSnapshot>,
}

impl ListSnapshot {
    /// Indexes of groups currently attached to the list root.
    pub fn onscreen(&self) -> Vec<usize> {
        self.groups
            .iter()
            .enumerate()
            .filter(|(_, g)| g.placement == Placement::Onscreen)
            .map(|(i, _)| i)
            .collect()
    }
}
