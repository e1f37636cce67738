use alloc::vec::Vec;

use crate::{Coords, GroupId, ItemId, ListItem, Placement, Position, Surface};

/// A contiguous bucket of items, roughly one screenful tall, that is materialized and
/// dematerialized as a single unit.
///
/// All coordinates are relative to the owning list. An empty group has all-zero
/// coordinates.
#[derive(Clone, Debug)]
pub struct Group<N> {
    id: GroupId,
    node: N,
    items: Vec<ListItem<N>>,
    coords: Coords,
    placement: Placement,
    lazy_loaded: bool,
}

impl<N> Group<N> {
    pub fn new(id: GroupId, node: N) -> Self {
        Self {
            id,
            node,
            items: Vec::new(),
            coords: Coords::default(),
            placement: Placement::Detached,
            lazy_loaded: false,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    /// The group's root node.
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

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &ListItem<N>> {
        self.items.iter()
    }

    pub fn item(&self, id: ItemId) -> Option<&ListItem<N>> {
        self.items.iter().find(|it| it.id() == id)
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn is_onscreen(&self) -> bool {
        self.placement == Placement::Onscreen
    }

    pub fn is_lazy_loaded(&self) -> bool {
        self.lazy_loaded
    }

    /// Runs `callback` on the group's root node unless it already ran since the group last
    /// received new content. Returns whether it ran.
    pub fn lazyload(&mut self, callback: impl FnOnce(GroupId, &N)) -> bool {
        if self.lazy_loaded {
            return false;
        }
        callback(self.id, &self.node);
        self.lazy_loaded = true;
        true
    }

    /// Moves the group and all of its items down by `dy`.
    pub fn shift_down(&mut self, dy: u64) {
        if self.items.is_empty() {
            return;
        }
        self.coords.shift_down(dy);
        for item in &mut self.items {
            item.shift_down(dy);
        }
    }

    /// Moves the group and all of its items up by `dy`.
    pub fn shift_up(&mut self, dy: u64) {
        if self.items.is_empty() {
            return;
        }
        self.coords.shift_up(dy);
        for item in &mut self.items {
            item.shift_up(dy);
        }
    }

    /// Removes every item, leaving the group empty.
    ///
    /// Item nodes stay attached to the group node; the caller re-homes them.
    pub fn take_items(&mut self) -> Vec<ListItem<N>> {
        self.coords = Coords::default();
        let mut items = core::mem::take(&mut self.items);
        for item in &mut items {
            item.set_group(None);
        }
        items
    }

    /// Checks that the group spans exactly its items, laid out back to back.
    pub fn is_consistent(&self) -> bool {
        if !self.coords.is_consistent() {
            return false;
        }
        let mut expected_top = self.coords.top;
        for item in &self.items {
            if !item.coords().is_consistent() || item.top() != expected_top {
                return false;
            }
            expected_top = item.bottom();
        }
        self.items.is_empty() || expected_top == self.coords.bottom
    }

    fn recompute_coords(&mut self) {
        let (Some(first), Some(last)) = (self.items.first(), self.items.last()) else {
            self.coords = Coords::default();
            return;
        };
        let width = self.items.iter().map(|it| it.width()).max().unwrap_or(0);
        self.coords = Coords::new(first.top(), width, last.bottom() - first.top());
    }
}

impl<N: Clone + PartialEq + core::fmt::Debug> Group<N> {
    /// Whether the group may still accept items: its height is below
    /// `viewport height * ratio`, with the viewport read live from the surface.
    pub fn has_vacancy<S: Surface<Node = N>>(&self, surface: &S, page_to_screen_ratio: f64) -> bool {
        let limit = surface.viewport().height as f64 * page_to_screen_ratio;
        (self.coords.height as f64) < limit
    }

    /// Appends an item whose coordinates start at this group's bottom.
    pub fn append<S: Surface<Node = N>>(&mut self, surface: &mut S, mut item: ListItem<N>) {
        if self.items.is_empty() {
            self.coords.top = item.top();
        }
        debug_assert!(
            self.items.is_empty() || item.top() == self.coords.bottom,
            "Group::append: item does not start at the group bottom"
        );
        self.coords.bottom = item.bottom();
        self.coords.width = self.coords.width.max(item.width());
        self.coords.height = self.coords.bottom - self.coords.top;

        surface.materialize(item.node(), &self.node, Position::Append);
        item.set_group(Some(self.id));
        self.items.push(item);
        self.lazy_loaded = false;
    }

    /// Prepends an item that ends at this group's top.
    ///
    /// The caller must already have shifted this group (and every later one) down by the
    /// item's height.
    pub fn prepend<S: Surface<Node = N>>(&mut self, surface: &mut S, mut item: ListItem<N>) {
        if self.items.is_empty() {
            self.coords.bottom = item.bottom();
        }
        debug_assert!(
            self.items.is_empty() || item.bottom() == self.coords.top,
            "Group::prepend: item does not end at the group top"
        );
        self.coords.top = item.top();
        self.coords.width = self.coords.width.max(item.width());
        self.coords.height = self.coords.bottom - self.coords.top;

        surface.materialize(item.node(), &self.node, Position::Prepend);
        item.set_group(Some(self.id));
        self.items.insert(0, item);
        self.lazy_loaded = false;
    }

    /// Removes an item, detaching its node and moving the items below it up.
    pub fn remove_item<S: Surface<Node = N>>(
        &mut self,
        surface: &mut S,
        id: ItemId,
    ) -> Option<ListItem<N>> {
        let pos = self.items.iter().position(|it| it.id() == id)?;
        let mut item = self.items.remove(pos);
        item.detach(surface);
        item.set_group(None);

        let dy = item.height();
        for later in &mut self.items[pos..] {
            later.shift_up(dy);
        }
        self.recompute_coords();
        Some(item)
    }

    /// Attaches the group at the end of `parent`.
    ///
    /// Returns whether the group came onscreen; an onscreen group is left untouched.
    pub fn append_to<S: Surface<Node = N>>(&mut self, surface: &mut S, parent: &N) -> bool {
        self.materialize(surface, parent, Position::Append)
    }

    pub fn prepend_to<S: Surface<Node = N>>(&mut self, surface: &mut S, parent: &N) -> bool {
        self.materialize(surface, parent, Position::Prepend)
    }

    pub fn insert_after<S: Surface<Node = N>>(
        &mut self,
        surface: &mut S,
        parent: &N,
        anchor: &N,
    ) -> bool {
        self.materialize(surface, parent, Position::After(anchor))
    }

    fn materialize<S: Surface<Node = N>>(
        &mut self,
        surface: &mut S,
        parent: &N,
        position: Position<'_, N>,
    ) -> bool {
        if self.is_onscreen() {
            return false;
        }
        surface.materialize(&self.node, parent, position);
        self.placement = Placement::Onscreen;
        true
    }

    /// Moves an onscreen group into the off-tree `shadow` parent, keeping its nodes.
    ///
    /// Returns whether the group left the screen.
    pub fn stash<S: Surface<Node = N>>(&mut self, surface: &mut S, shadow: &N) -> bool {
        if !self.is_onscreen() {
            return false;
        }
        surface.dematerialize(&self.node);
        surface.materialize(&self.node, shadow, Position::Append);
        self.placement = Placement::Stashed;
        true
    }

    /// Detaches the group's node from the live or shadow parent.
    ///
    /// Returns whether the group left the screen (it was onscreen before).
    pub fn remove<S: Surface<Node = N>>(&mut self, surface: &mut S) -> bool {
        let was_onscreen = self.is_onscreen();
        if self.placement == Placement::Detached {
            return false;
        }
        surface.dematerialize(&self.node);
        self.placement = Placement::Detached;
        was_onscreen
    }
}
