use alloc::vec::Vec;

use pageview::{
    Config, Content, ItemId, ListItem, ListView, ListViewOptions, Registry, StableId,
    Subscription, Surface, ViewportEvent, ViewportEvents,
};

use crate::Scheduler;

/// Handle of a list registered with a [`ScrollCoordinator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewId(pub u64);

impl StableId for ViewId {
    fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    fn raw(self) -> u64 {
        self.0
    }
}

/// Deferred work the coordinator runs on [`ScrollCoordinator::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Task {
    /// Move every list's window to the live viewport.
    Scroll,
    /// Rebuild every list's groups for the new viewport size.
    Resize,
}

/// Shared owner of the host surface and every active list.
///
/// One coordinator per surface. It subscribes to scroll and resize signals while at least
/// one list is registered and fans the resulting work out to all of them:
/// - scroll signals are throttled: the first one schedules a pass, later ones are dropped
///   until that pass has run
/// - resize signals are debounced: each one pushes the repartition back
///
/// Adapters forward host signals to `on_scroll` / `on_resize` and call `tick(now_ms)` from
/// their timer or frame loop.
pub struct ScrollCoordinator<S: Surface> {
    surface: S,
    config: Config,
    views: Registry<ViewId, ListView<S::Node>>,
    order: Vec<ViewId>,
    scheduler: Scheduler<Task>,
    scroll_sub: Option<Subscription>,
    resize_sub: Option<Subscription>,
}

impl<S: Surface + ViewportEvents> ScrollCoordinator<S> {
    pub fn new(surface: S, config: Config) -> Self {
        Self {
            surface,
            config,
            views: Registry::new(),
            order: Vec::new(),
            scheduler: Scheduler::new(),
            scroll_sub: None,
            resize_sub: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// List options carrying this coordinator's config.
    pub fn options(&self) -> ListViewOptions<S::Node> {
        ListViewOptions::new(self.config)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_subscribed(&self) -> bool {
        self.scroll_sub.is_some() || self.resize_sub.is_some()
    }

    /// Creates a list under `parent` and registers it.
    ///
    /// The first registered list subscribes the coordinator to viewport signals.
    pub fn create(&mut self, parent: &S::Node, options: ListViewOptions<S::Node>) -> ViewId {
        if self.order.is_empty() {
            self.subscribe();
        }
        let view = ListView::new(&mut self.surface, parent, options);
        let id = self.views.insert_new(view);
        self.order.push(id);
        cdebug!(view = id.0, views = self.order.len(), "ScrollCoordinator::create");
        id
    }

    /// Registers an existing node as a list root, taking over its children as items.
    pub fn adopt(&mut self, root: S::Node, options: ListViewOptions<S::Node>) -> ViewId {
        if self.order.is_empty() {
            self.subscribe();
        }
        let view = ListView::adopt(&mut self.surface, root, options);
        let id = self.views.insert_new(view);
        self.order.push(id);
        cdebug!(view = id.0, views = self.order.len(), "ScrollCoordinator::adopt");
        id
    }

    /// Releases a list and deregisters it.
    ///
    /// Disposing the last list unsubscribes from viewport signals and drops pending work.
    /// Returns `false` for an unknown or already disposed id.
    pub fn dispose(&mut self, id: ViewId) -> bool {
        let Some(mut view) = self.views.remove(id) else {
            return false;
        };
        view.cleanup(&mut self.surface);
        self.order.retain(|v| *v != id);
        cdebug!(view = id.0, views = self.order.len(), "ScrollCoordinator::dispose");

        if self.order.is_empty() {
            self.unsubscribe();
            self.scheduler.clear();
        }
        true
    }

    /// Records a scroll signal.
    ///
    /// Returns whether a pass was scheduled. While one is pending, further signals are
    /// coalesced into it.
    pub fn on_scroll(&mut self, now_ms: u64) -> bool {
        if self.order.is_empty() {
            return false;
        }
        if self.scheduler.is_pending(Task::Scroll) {
            ctrace!(now_ms, "on_scroll: coalesced");
            return false;
        }
        self.scheduler
            .schedule(Task::Scroll, now_ms, self.config.scroll_throttle_ms);
        ctrace!(now_ms, "on_scroll: scheduled");
        true
    }

    /// Records a resize signal, pushing any pending repartition back.
    ///
    /// Returns the new deadline, or `None` when no list is registered.
    pub fn on_resize(&mut self, now_ms: u64) -> Option<u64> {
        if self.order.is_empty() {
            return None;
        }
        let deadline = self
            .scheduler
            .schedule(Task::Resize, now_ms, self.config.resize_debounce_ms);
        ctrace!(now_ms, deadline, "on_resize: scheduled");
        Some(deadline)
    }

    /// Runs every task due at `now_ms` and returns how many ran.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        let due = self.scheduler.take_due(now_ms);
        for task in &due {
            self.run(*task);
        }
        due.len()
    }

    /// Runs `task` against every list immediately, bypassing the scheduler.
    pub fn run(&mut self, task: Task) {
        cdebug!(?task, views = self.order.len(), "ScrollCoordinator::run");
        for id in &self.order {
            let Some(view) = self.views.get_mut(*id) else {
                continue;
            };
            match task {
                Task::Scroll => {
                    view.update_start_index(&mut self.surface);
                }
                Task::Resize => view.repartition(&mut self.surface),
            }
        }
    }

    pub fn is_scroll_pending(&self) -> bool {
        self.scheduler.is_pending(Task::Scroll)
    }

    pub fn is_resize_pending(&self) -> bool {
        self.scheduler.is_pending(Task::Resize)
    }

    /// When the next `tick` has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    pub fn view(&self, id: ViewId) -> Option<&ListView<S::Node>> {
        self.views.get(id)
    }

    /// Registered lists in creation order.
    pub fn views(&self) -> impl Iterator<Item = (ViewId, &ListView<S::Node>)> {
        self.order
            .iter()
            .filter_map(|id| self.views.get(*id).map(|view| (*id, view)))
    }

    /// Runs `f` with a list and the surface it draws into.
    pub fn with_view<R>(
        &mut self,
        id: ViewId,
        f: impl FnOnce(&mut ListView<S::Node>, &mut S) -> R,
    ) -> Option<R> {
        let view = self.views.get_mut(id)?;
        Some(f(view, &mut self.surface))
    }

    pub fn append(&mut self, id: ViewId, content: impl Into<Content<S::Node>>) -> Option<ItemId> {
        self.with_view(id, |view, surface| view.append(surface, content))
            .flatten()
    }

    pub fn prepend(&mut self, id: ViewId, content: impl Into<Content<S::Node>>) -> Option<ItemId> {
        self.with_view(id, |view, surface| view.prepend(surface, content))
            .flatten()
    }

    pub fn remove_item(&mut self, id: ViewId, item: ItemId) -> Option<ListItem<S::Node>> {
        self.with_view(id, |view, surface| view.remove_item(surface, item))
            .flatten()
    }

    fn subscribe(&mut self) {
        if self.scroll_sub.is_none() {
            self.scroll_sub = Some(self.surface.subscribe(ViewportEvent::Scroll));
        }
        if self.resize_sub.is_none() {
            self.resize_sub = Some(self.surface.subscribe(ViewportEvent::Resize));
        }
    }

    fn unsubscribe(&mut self) {
        if let Some(sub) = self.scroll_sub.take() {
            self.surface.unsubscribe(sub);
        }
        if let Some(sub) = self.resize_sub.take() {
            self.surface.unsubscribe(sub);
        }
    }
}

impl<S: Surface> core::fmt::Debug for ScrollCoordinator<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollCoordinator")
            .field("config", &self.config)
            .field("views", &self.order)
            .field("scheduler", &self.scheduler)
            .field("subscribed", &self.scroll_sub.is_some())
            .finish_non_exhaustive()
    }
}
