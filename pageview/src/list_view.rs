use alloc::vec::Vec;

use crate::registry::{GroupRegistry, ItemRegistry};
use crate::{
    Config, Content, Find, Group, GroupId, GroupSnapshot, ItemId, LazyFn, ListItem,
    ListSnapshot, ListViewOptions, PageEvent, PageFn, Position, Surface,
};

/// The windowing controller.
///
/// A `ListView` owns an ordered sequence of groups and keeps only the window of groups
/// around the viewport materialized inside its root node:
///
/// ```text
/// root
/// ├── buffer spacer   (height = top of the first windowed group)
/// ├── group[start]
/// ├── group[start + 1]
/// └── ...             (window_size groups)
/// ```
///
/// It holds no rendering objects beyond node handles. Every operation that touches the
/// rendering environment takes the [`Surface`] explicitly.
pub struct ListView<N> {
    config: Config,
    lazy: Option<LazyFn<N>>,
    on_page: Option<PageFn<N>>,

    root: N,
    buffer: N,
    shadow: N,
    buffer_attached: bool,

    groups: Vec<GroupId>,
    registry: GroupRegistry<N>,
    items: ItemRegistry,

    start_index: usize,
    top: u64,
    width: u32,
    height: u64,
    buffer_height: u64,
}

impl<N: Clone + PartialEq + core::fmt::Debug> ListView<N> {
    /// Creates an empty list and attaches its root node to `parent`.
    pub fn new<S: Surface<Node = N>>(
        surface: &mut S,
        parent: &N,
        options: ListViewOptions<N>,
    ) -> Self {
        let root = surface.create_container();
        surface.materialize(&root, parent, Position::Append);
        Self::with_root(surface, root, options)
    }

    /// Takes over an existing, attached node as the list root.
    ///
    /// Every current child of `root` becomes an item, in visual order, and is regrouped
    /// like a fresh list.
    pub fn adopt<S: Surface<Node = N>>(
        surface: &mut S,
        root: N,
        options: ListViewOptions<N>,
    ) -> Self {
        let children = surface.children(&root);
        for child in &children {
            surface.dematerialize(child);
        }
        let mut list = Self::with_root(surface, root, options);
        let items: Vec<ListItem<N>> = children
            .into_iter()
            .map(|node| ListItem::new(list.items.allocate(), node))
            .collect();
        pdebug!(items = items.len(), "ListView::adopt");
        list.rebuild(surface, items);
        list
    }

    fn with_root<S: Surface<Node = N>>(
        surface: &mut S,
        root: N,
        options: ListViewOptions<N>,
    ) -> Self {
        let buffer = surface.create_container();
        let shadow = surface.create_container();

        surface.materialize(&buffer, &root, Position::Prepend);
        surface.set_height(&buffer, 0);
        surface.set_height(&root, 0);
        let top = surface.measure(&root).top;

        pdebug!(top, buffer_pages = options.config.buffer_pages, "ListView::new");
        Self {
            config: options.config,
            lazy: options.lazy,
            on_page: options.on_page,
            root,
            buffer,
            shadow,
            buffer_attached: true,
            groups: Vec::new(),
            registry: GroupRegistry::new(),
            items: ItemRegistry::new(),
            start_index: 0,
            top,
            width: 0,
            height: 0,
            buffer_height: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_lazy(&mut self, lazy: Option<LazyFn<N>>) {
        self.lazy = lazy;
    }

    pub fn set_on_page(&mut self, on_page: Option<PageFn<N>>) {
        self.on_page = on_page;
    }

    /// The list's root node.
    pub fn root(&self) -> &N {
        &self.root
    }

    /// The spacer standing in for every group above the window.
    pub fn buffer(&self) -> &N {
        &self.buffer
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Offset of the list origin in surface coordinates.
    pub fn top(&self) -> u64 {
        self.top
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn buffer_height(&self) -> u64 {
        self.buffer_height
    }

    /// Number of items in the list.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Group ids in list order.
    pub fn group_ids(&self) -> &[GroupId] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&Group<N>> {
        self.registry.get(id)
    }

    pub fn group_at(&self, index: usize) -> Option<&Group<N>> {
        let id = *self.groups.get(index)?;
        self.registry.get(id)
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group<N>> {
        self.groups.iter().filter_map(|id| self.registry.get(*id))
    }

    pub fn item(&self, id: ItemId) -> Option<&ListItem<N>> {
        let group = self.items.get(id)?;
        self.registry.get(*group)?.item(id)
    }

    /// Items in list order.
    pub fn items(&self) -> impl Iterator<Item = &ListItem<N>> {
        self.groups().flat_map(|g| g.items())
    }

    /// The index range of groups intended to be materialized.
    pub fn window(&self) -> core::ops::Range<usize> {
        let end = self
            .start_index
            .saturating_add(self.config.window_size())
            .min(self.groups.len());
        self.start_index.min(end)..end
    }

    pub fn onscreen_count(&self) -> usize {
        self.groups().filter(|g| g.is_onscreen()).count()
    }

    /// Appends content to the end of the list.
    ///
    /// Returns `None` (and changes nothing) when the content is empty or cannot be resolved.
    pub fn append<S: Surface<Node = N>>(
        &mut self,
        surface: &mut S,
        content: impl Into<Content<N>>,
    ) -> Option<ItemId> {
        let mut item = self.resolve_content(surface, content.into())?;
        item.update_coords(surface, &self.root, self.height);
        let id = item.id();
        ptrace!(item = id.0, height = item.height(), "ListView::append");

        self.height = self.height.saturating_add(item.height());
        surface.set_height(&self.root, self.height);
        self.push_item(surface, item);

        self.reconcile(surface, true);
        self.debug_check();
        Some(id)
    }

    /// Prepends content to the start of the list, moving everything else down.
    pub fn prepend<S: Surface<Node = N>>(
        &mut self,
        surface: &mut S,
        content: impl Into<Content<N>>,
    ) -> Option<ItemId> {
        let mut item = self.resolve_content(surface, content.into())?;
        item.update_coords(surface, &self.root, 0);
        let id = item.id();
        let dy = item.height();
        ptrace!(item = id.0, height = dy, "ListView::prepend");

        for gid in &self.groups {
            if let Some(group) = self.registry.get_mut(*gid) {
                group.shift_down(dy);
            }
        }
        self.height = self.height.saturating_add(dy);
        surface.set_height(&self.root, self.height);

        let ratio = self.config.page_to_screen_ratio;
        let first = self
            .groups
            .first()
            .copied()
            .filter(|gid| self.registry.get(*gid).is_some_and(|g| g.has_vacancy(&*surface, ratio)));
        let gid = match first {
            Some(gid) => gid,
            None => {
                let gid = self.create_group(surface);
                let had_groups = !self.groups.is_empty();
                self.groups.insert(0, gid);
                if had_groups {
                    self.start_index += 1;
                }
                gid
            }
        };

        self.width = self.width.max(item.width());
        self.items.insert(id, gid);
        if let Some(group) = self.registry.get_mut(gid) {
            group.prepend(surface, item);
        }

        self.reconcile(surface, true);
        self.debug_check();
        Some(id)
    }

    /// Items (in list order) whose node matches the query.
    pub fn find<S: Surface<Node = N>>(&self, surface: &S, query: Find<'_, N>) -> Vec<&ListItem<N>> {
        self.items()
            .filter(|item| match query {
                Find::Node(node) => surface.contains(item.node(), node),
                Find::Selector(selector) => surface.matches(item.node(), selector),
            })
            .collect()
    }

    /// Removes an item from the list and hands it back, detached.
    ///
    /// Everything below the item moves up by its height. When the removal empties its
    /// group, or leaves a previously full group with vacancy again, the whole list is
    /// repartitioned.
    pub fn remove_item<S: Surface<Node = N>>(
        &mut self,
        surface: &mut S,
        id: ItemId,
    ) -> Option<ListItem<N>> {
        let gid = self.items.remove(id)?;
        let Some(index) = self.groups.iter().position(|g| *g == gid) else {
            pwarn!(item = id.0, group = gid.0, "remove_item: owner group is not in the list");
            debug_assert!(false, "remove_item: owner group is not in the list");
            return None;
        };

        let ratio = self.config.page_to_screen_ratio;
        let group = self.registry.get_mut(gid)?;
        let was_full = !group.has_vacancy(surface, ratio);
        let item = group.remove_item(surface, id)?;
        let too_small = group.is_empty() || (was_full && group.has_vacancy(surface, ratio));

        let dy = item.height();
        for later in &self.groups[index + 1..] {
            if let Some(group) = self.registry.get_mut(*later) {
                group.shift_up(dy);
            }
        }
        self.height = self.height.saturating_sub(dy);
        surface.set_height(&self.root, self.height);
        pdebug!(item = id.0, group = gid.0, too_small, "ListView::remove_item");

        if too_small {
            self.repartition(surface);
        } else {
            self.reconcile(surface, true);
            self.debug_check();
        }
        Some(item)
    }

    /// Detaches the list from its parent and releases every group.
    pub fn remove<S: Surface<Node = N>>(&mut self, surface: &mut S) {
        surface.dematerialize(&self.root);
        self.cleanup(surface);
    }

    /// Detaches every group, its items and the buffer spacer, and forgets all items and
    /// groups. The root is left in place with zero height.
    ///
    /// The list stays usable: later appends start over from an empty list.
    pub fn cleanup<S: Surface<Node = N>>(&mut self, surface: &mut S) {
        self.release(surface, false);
    }

    /// Like [`ListView::cleanup`], but puts every item node back under the root in list
    /// order instead of detaching it. Returns how many nodes were put back.
    ///
    /// The restored nodes are plain children of the root again; [`ListView::update`]
    /// takes them over anew.
    pub fn recycle<S: Surface<Node = N>>(&mut self, surface: &mut S) -> usize {
        self.release(surface, true)
    }

    /// Takes over nodes that were attached directly under the root since the last pass,
    /// appending them as items in visual order.
    ///
    /// Existing groups are kept. Returns the number of adopted nodes.
    pub fn update<S: Surface<Node = N>>(&mut self, surface: &mut S) -> usize {
        let group_nodes: Vec<N> = self.groups().map(|g| g.node().clone()).collect();
        let fresh: Vec<N> = surface
            .children(&self.root)
            .into_iter()
            .filter(|node| *node != self.buffer && !group_nodes.contains(node))
            .collect();
        if fresh.is_empty() {
            return 0;
        }

        let count = fresh.len();
        for node in &fresh {
            surface.dematerialize(node);
        }
        for node in fresh {
            let mut item = ListItem::new(self.items.allocate(), node);
            item.update_coords(surface, &self.root, self.height);
            self.height = self.height.saturating_add(item.height());
            self.push_item(surface, item);
        }
        surface.set_height(&self.root, self.height);
        pdebug!(count, items = self.items.len(), "ListView::update");

        self.reconcile(surface, true);
        self.debug_check();
        count
    }

    /// Re-runs the windowing decision against the live viewport.
    ///
    /// Exits early when the window start did not move. Returns the (possibly new) start
    /// index.
    pub fn update_start_index<S: Surface<Node = N>>(&mut self, surface: &mut S) -> usize {
        self.reconcile(surface, false);
        self.start_index
    }

    /// Rebuilds every group from the flat item sequence, re-measuring each item.
    ///
    /// Old groups are detached and their ids tombstoned.
    pub fn repartition<S: Surface<Node = N>>(&mut self, surface: &mut S) {
        pdebug!(groups = self.groups.len(), items = self.items.len(), "ListView::repartition");
        let mut items = Vec::with_capacity(self.items.len());
        for gid in self.groups.drain(..) {
            if let Some(mut group) = self.registry.remove(gid) {
                items.extend(group.take_items());
                let left = group.remove(surface);
                notify(&self.on_page, left, PageEvent::Out, &group);
            }
        }
        self.rebuild(surface, items);
    }

    /// Re-measures the list origin and every item top-down, then re-buckets the items into
    /// fresh groups.
    fn rebuild<S: Surface<Node = N>>(&mut self, surface: &mut S, items: Vec<ListItem<N>>) {
        self.top = surface.measure(&self.root).top;
        self.start_index = 0;
        self.width = 0;
        self.height = 0;
        for mut item in items {
            item.update_coords(surface, &self.root, self.height);
            self.height = self.height.saturating_add(item.height());
            self.push_item(surface, item);
        }
        surface.set_height(&self.root, self.height);

        self.reconcile(surface, true);
        self.debug_check();
    }

    /// Index of the group whose midpoint is closest to the midpoint of `[top, bottom]`.
    ///
    /// The search starts from the group last found closest and walks towards the range,
    /// so small scroll steps cost a few comparisons. Ties go to the later group. `top`
    /// and `bottom` are surface coordinates.
    pub fn index_within_range(&self, top: u64, bottom: u64) -> Option<usize> {
        let len = self.groups.len();
        if len == 0 {
            return None;
        }

        let range_mid2 = top as i128 + bottom as i128 - 2 * self.top as i128;
        let diff = |index: usize| -> i128 {
            let mid2 = self.group_at(index).map_or(0, |g| g.coords().midpoint2());
            range_mid2 - mid2 as i128
        };

        let seed = self
            .start_index
            .saturating_add(self.config.buffer_pages)
            .min(len - 1);
        let seed_diff = diff(seed);

        if seed_diff < 0 {
            let mut prev = seed_diff;
            for index in (0..seed).rev() {
                let d = diff(index);
                if d >= 0 {
                    return Some(if prev.abs() <= d.abs() { index + 1 } else { index });
                }
                prev = d;
            }
            Some(0)
        } else if seed_diff > 0 {
            let mut prev = seed_diff;
            for index in seed + 1..len {
                let d = diff(index);
                if d <= 0 {
                    return Some(if prev.abs() < d.abs() { index - 1 } else { index });
                }
                prev = d;
            }
            Some(len - 1)
        } else {
            Some(seed)
        }
    }

    /// The window start for `[top, bottom]`: the closest group minus the buffer pages.
    pub fn start_index_within_range(&self, top: u64, bottom: u64) -> Option<usize> {
        let index = self.index_within_range(top, bottom)?;
        Some(
            index
                .saturating_sub(self.config.buffer_pages)
                .min(self.groups.len()),
        )
    }

    /// A serializable view of the coordinate model and window state.
    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            top: self.top,
            width: self.width,
            height: self.height,
            start_index: self.start_index,
            buffer_height: self.buffer_height,
            groups: self
                .groups()
                .map(|g| GroupSnapshot {
                    id: g.id(),
                    coords: g.coords(),
                    items: g.len(),
                    placement: g.placement(),
                    lazy_loaded: g.is_lazy_loaded(),
                })
                .collect(),
        }
    }

    /// Checks the coordinate model: every group consistent and non-empty, groups ascending
    /// and non-overlapping, the last group ending at the list height, and `start_index`
    /// pointing at a group (or `0` for an empty list).
    pub fn is_consistent(&self) -> bool {
        let mut prev_bottom = 0u64;
        for gid in &self.groups {
            let Some(group) = self.registry.get(*gid) else {
                return false;
            };
            if group.is_empty() || !group.is_consistent() || group.top() < prev_bottom {
                return false;
            }
            prev_bottom = group.bottom();
        }
        let start_ok = if self.groups.is_empty() {
            self.start_index == 0
        } else {
            self.start_index < self.groups.len()
        };
        start_ok && prev_bottom == self.height && self.registry.len() == self.groups.len()
    }

    fn debug_check(&self) {
        debug_assert!(self.is_consistent(), "ListView coordinate model is inconsistent");
        debug_assert!(
            self.onscreen_count() <= self.config.window_size(),
            "ListView materialized more groups than the window holds"
        );
    }

    fn resolve_content<S: Surface<Node = N>>(
        &mut self,
        surface: &mut S,
        content: Content<N>,
    ) -> Option<ListItem<N>> {
        match content {
            Content::Markup(markup) => {
                if markup.trim().is_empty() {
                    ptrace!("resolve_content: empty markup");
                    return None;
                }
                let node = surface.wrap(&markup)?;
                Some(ListItem::new(self.items.allocate(), node))
            }
            Content::Node(node) => Some(ListItem::new(self.items.allocate(), node)),
            // Keeps its id: the caller re-registers it under the new owner.
            Content::Existing(id) => self.remove_item(surface, id),
        }
    }

    fn create_group<S: Surface<Node = N>>(&mut self, surface: &mut S) -> GroupId {
        let id = self.registry.allocate();
        let node = surface.create_container();
        self.registry.insert(id, Group::new(id, node));
        ptrace!(group = id.0, "create_group");
        id
    }

    /// Appends an item with already cached coordinates to the trailing group, opening a new
    /// group when the trailing one is full.
    fn push_item<S: Surface<Node = N>>(&mut self, surface: &mut S, item: ListItem<N>) {
        let ratio = self.config.page_to_screen_ratio;
        let last = self
            .groups
            .last()
            .copied()
            .filter(|gid| self.registry.get(*gid).is_some_and(|g| g.has_vacancy(&*surface, ratio)));
        let gid = match last {
            Some(gid) => gid,
            None => {
                let gid = self.create_group(surface);
                self.groups.push(gid);
                gid
            }
        };

        self.width = self.width.max(item.width());
        self.items.insert(item.id(), gid);
        if let Some(group) = self.registry.get_mut(gid) {
            group.append(surface, item);
        }
    }

    /// Moves the window to the live viewport.
    ///
    /// Without `force`, an unchanged start index is a no-op. With it, the window is
    /// re-filled and the buffer re-measured even when the start index stays put.
    fn reconcile<S: Surface<Node = N>>(&mut self, surface: &mut S, force: bool) {
        self.attach_buffer(surface);
        let viewport = surface.viewport();
        let Some(next) = self.start_index_within_range(viewport.top, viewport.bottom()) else {
            self.start_index = 0;
            self.update_buffer(surface);
            return;
        };

        if next != self.start_index {
            ptrace!(from = self.start_index, to = next, "reconcile: window moved");
            let window = self.config.window_size();
            let len = self.groups.len();
            let next_end = next.saturating_add(window).min(len);
            let old_end = self.start_index.saturating_add(window).min(len);
            for index in self.start_index..old_end {
                if (next..next_end).contains(&index) {
                    continue;
                }
                if let Some(group) = self.registry.get_mut(self.groups[index]) {
                    let left = group.stash(surface, &self.shadow);
                    notify(&self.on_page, left, PageEvent::Out, group);
                }
            }
            self.start_index = next;
        } else if !force {
            return;
        }

        self.insert_groups_in_view(surface);
        self.update_buffer(surface);
        self.lazyload_window();
    }

    /// Materializes every window group that is not onscreen yet, keeping visual order equal
    /// to group order.
    ///
    /// New groups are appended to the root while the groups already onscreen all come
    /// before them. Once an already-onscreen group shows up after a freshly inserted one,
    /// that group and every group after it are re-inserted right after their predecessor.
    fn insert_groups_in_view<S: Surface<Node = N>>(&mut self, surface: &mut S) {
        let mut inserted = false;
        let mut in_order = true;
        let mut prev: Option<N> = None;

        for index in self.window() {
            let Some(group) = self.registry.get_mut(self.groups[index]) else {
                continue;
            };
            if inserted && group.is_onscreen() {
                in_order = false;
            }

            if !in_order {
                let was_onscreen = group.is_onscreen();
                group.remove(surface);
                let anchor = prev.as_ref().unwrap_or(&self.buffer);
                group.insert_after(surface, &self.root, anchor);
                notify(&self.on_page, !was_onscreen, PageEvent::In, group);
            } else if group.append_to(surface, &self.root) {
                inserted = true;
                notify(&self.on_page, true, PageEvent::In, group);
            }
            prev = Some(group.node().clone());
        }
    }

    fn attach_buffer<S: Surface<Node = N>>(&mut self, surface: &mut S) {
        if !self.buffer_attached {
            surface.materialize(&self.buffer, &self.root, Position::Prepend);
            self.buffer_attached = true;
        }
    }

    fn release<S: Surface<Node = N>>(&mut self, surface: &mut S, recycle: bool) -> usize {
        pdebug!(groups = self.groups.len(), items = self.items.len(), recycle, "ListView::release");
        let mut restored = 0;
        let mut restored_height = 0u64;
        for gid in self.groups.drain(..) {
            let Some(mut group) = self.registry.remove(gid) else {
                continue;
            };
            let left = group.remove(surface);
            notify(&self.on_page, left, PageEvent::Out, &group);
            for item in group.take_items() {
                if recycle {
                    surface.materialize(item.node(), &self.root, Position::Append);
                    restored += 1;
                    restored_height = restored_height.saturating_add(item.height());
                } else {
                    item.detach(surface);
                }
            }
        }
        self.registry.clear();
        self.items.clear();
        surface.dematerialize(&self.buffer);
        self.buffer_attached = false;
        self.start_index = 0;
        self.width = 0;
        self.height = 0;
        self.buffer_height = 0;
        surface.set_height(&self.root, restored_height);
        restored
    }

    fn update_buffer<S: Surface<Node = N>>(&mut self, surface: &mut S) {
        self.buffer_height = self.group_at(self.start_index).map_or(0, |g| g.top());
        surface.set_height(&self.buffer, self.buffer_height);
    }

    fn lazyload_window(&mut self) {
        let Some(lazy) = self.lazy.clone() else {
            return;
        };
        for index in self.window() {
            if let Some(group) = self.registry.get_mut(self.groups[index]) {
                group.lazyload(|id, node| lazy(id, node));
            }
        }
    }
}

impl<N> core::fmt::Debug for ListView<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListView")
            .field("config", &self.config)
            .field("groups", &self.groups.len())
            .field("items", &self.items.len())
            .field("start_index", &self.start_index)
            .field("top", &self.top)
            .field("height", &self.height)
            .field("buffer_height", &self.buffer_height)
            .finish_non_exhaustive()
    }
}

fn notify<N>(hook: &Option<PageFn<N>>, fired: bool, event: PageEvent, group: &Group<N>) {
    if !fired {
        return;
    }
    ptrace!(group = group.id().0, ?event, "page event");
    if let Some(hook) = hook {
        hook(event, group.id(), group.node());
    }
}
