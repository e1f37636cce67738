use crate::{Coords, GroupId, ItemId, Position, Surface};

/// One piece of list content with its cached position and size.
///
/// Positions are relative to the owning list. The owning group is a plain id lookup, not a
/// reference.
#[derive(Clone, Debug, PartialEq)]
pub struct ListItem<N> {
    id: ItemId,
    node: N,
    coords: Coords,
    group: Option<GroupId>,
}

impl<N> ListItem<N> {
    pub fn new(id: ItemId, node: N) -> Self {
        Self {
            id,
            node,
            coords: Coords::default(),
            group: None,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn top(&self) -> u64 {
        self.coords.top
    }

    pub fn bottom(&self) -> u64 {
        self.coords.bottom
    }

    pub fn width(&self) -> u32 {
        self.coords.width
    }

    pub fn height(&self) -> u64 {
        self.coords.height
    }

    /// The group currently owning this item, if any.
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub(crate) fn set_group(&mut self, group: Option<GroupId>) {
        self.group = group;
    }

    pub(crate) fn shift_down(&mut self, dy: u64) {
        self.coords.shift_down(dy);
    }

    pub(crate) fn shift_up(&mut self, dy: u64) {
        self.coords.shift_up(dy);
    }
}

impl<N: Clone + PartialEq + core::fmt::Debug> ListItem<N> {
    /// Measures the item by briefly materializing it at the end of `host`,
    /// then caches its coordinates starting at `top`.
    ///
    /// The node is detached again afterwards, so measuring never leaves a visible duplicate.
    pub fn update_coords<S: Surface<Node = N>>(
        &mut self,
        surface: &mut S,
        host: &N,
        top: u64,
    ) {
        surface.dematerialize(&self.node);
        surface.materialize(&self.node, host, Position::Append);
        let m = surface.measure(&self.node);
        surface.dematerialize(&self.node);
        self.coords = Coords::new(top, m.width, m.height as u64);
        ptrace!(item = self.id.0, top, height = m.height, "ListItem::update_coords");
    }

    /// Detaches the item's node from wherever it is attached.
    pub fn detach<S: Surface<Node = N>>(&self, surface: &mut S) {
        surface.dematerialize(&self.node);
    }
}
