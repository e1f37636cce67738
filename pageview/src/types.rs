use alloc::string::String;

/// Stable handle of a [`crate::Group`].
///
/// Ids are allocated monotonically and never reused, so an id that outlived its group
/// (for example across a repartition) resolves to nothing instead of a newer group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupId(pub u64);

/// Stable handle of a [`crate::ListItem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u64);

/// Box metrics reported by the rendering surface.
///
/// `height` includes vertical margins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measure {
    pub top: u64,
    pub left: u64,
    pub width: u32,
    pub height: u32,
}

/// The visible part of the scroll axis, in surface coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub top: u64,
    pub height: u32,
}

impl Viewport {
    pub fn bottom(&self) -> u64 {
        self.top.saturating_add(self.height as u64)
    }
}

/// Where [`crate::Surface::materialize`] places a node inside its parent.
#[derive(Debug, PartialEq, Eq)]
pub enum Position<'a, N> {
    Append,
    Prepend,
    /// Directly after `anchor`. Surfaces fall back to `Append` when `anchor` is not a
    /// child of the parent.
    After(&'a N),
}

impl<N> Clone for Position<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for Position<'_, N> {}

/// Content accepted by [`crate::ListView::append`] and [`crate::ListView::prepend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content<N> {
    /// Serialized markup; the surface turns it into a single node.
    Markup(String),
    /// A ready-made node.
    Node(N),
    /// An item already in the list. It is detached from its current position first.
    Existing(ItemId),
}

impl<N> From<&str> for Content<N> {
    fn from(markup: &str) -> Self {
        Self::Markup(String::from(markup))
    }
}

impl<N> From<String> for Content<N> {
    fn from(markup: String) -> Self {
        Self::Markup(markup)
    }
}

impl<N> From<ItemId> for Content<N> {
    fn from(id: ItemId) -> Self {
        Self::Existing(id)
    }
}

/// Query accepted by [`crate::ListView::find`].
#[derive(Debug, PartialEq, Eq)]
pub enum Find<'a, N> {
    /// Items whose node is, or contains, the given node.
    Node(&'a N),
    /// Items whose node matches a surface-defined selector.
    Selector(&'a str),
}

impl<N> Clone for Find<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for Find<'_, N> {}

/// Where a group's node currently lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    /// Not attached anywhere (never materialized, or removed).
    #[default]
    Detached,
    /// Attached to the list root.
    Onscreen,
    /// Parked in the list's off-tree shadow parent.
    Stashed,
}

/// A group entering or leaving the visual tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageEvent {
    /// The group was attached to the list root.
    In,
    /// The group left the list root, either stashed or released.
    Out,
}
