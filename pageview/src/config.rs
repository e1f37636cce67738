use alloc::sync::Arc;

use crate::{GroupId, PageEvent};

/// A callback fired once per group when the group's content first becomes visible.
///
/// It receives the group id and the group's root node; this is the hook for deferred
/// image/content loading.
pub type LazyFn<N> = Arc<dyn Fn(GroupId, &N) + Send + Sync>;

/// Observes groups entering and leaving the list root.
///
/// Reordering a group that stays onscreen reports nothing.
pub type PageFn<N> = Arc<dyn Fn(PageEvent, GroupId, &N) + Send + Sync>;

/// Process-wide tuning knobs.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize` and missing
/// fields fall back to their defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// A group stops accepting appended items once it is this many viewports tall.
    pub page_to_screen_ratio: f64,
    /// Groups kept materialized on each side of the group closest to the viewport.
    pub buffer_pages: usize,
    /// Minimum delay between two windowing passes driven by scroll signals.
    pub scroll_throttle_ms: u64,
    /// Quiet period after the last resize signal before groups are rebuilt.
    pub resize_debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_to_screen_ratio: 3.0,
            buffer_pages: 1,
            scroll_throttle_ms: 150,
            resize_debounce_ms: 200,
        }
    }
}

impl Config {
    /// Number of groups materialized at steady state: `2 * buffer_pages + 1`.
    pub fn window_size(&self) -> usize {
        self.buffer_pages.saturating_mul(2).saturating_add(1)
    }

    pub fn with_page_to_screen_ratio(mut self, ratio: f64) -> Self {
        self.page_to_screen_ratio = ratio;
        self
    }

    pub fn with_buffer_pages(mut self, buffer_pages: usize) -> Self {
        self.buffer_pages = buffer_pages;
        self
    }

    pub fn with_scroll_throttle_ms(mut self, delay_ms: u64) -> Self {
        self.scroll_throttle_ms = delay_ms;
        self
    }

    pub fn with_resize_debounce_ms(mut self, delay_ms: u64) -> Self {
        self.resize_debounce_ms = delay_ms;
        self
    }
}

/// Configuration for a single [`crate::ListView`].
///
/// Cheap to clone: callbacks live in an `Arc`.
pub struct ListViewOptions<N> {
    pub config: Config,
    /// Optional lazy-load hook, see [`LazyFn`].
    pub lazy: Option<LazyFn<N>>,
    /// Optional page-in/page-out hook, see [`PageFn`].
    pub on_page: Option<PageFn<N>>,
}

impl<N> ListViewOptions<N> {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            lazy: None,
            on_page: None,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn with_lazy(mut self, f: impl Fn(GroupId, &N) + Send + Sync + 'static) -> Self {
        self.lazy = Some(Arc::new(f));
        self
    }

    pub fn without_lazy(mut self) -> Self {
        self.lazy = None;
        self
    }

    pub fn with_on_page(mut self, f: impl Fn(PageEvent, GroupId, &N) + Send + Sync + 'static) -> Self {
        self.on_page = Some(Arc::new(f));
        self
    }

    pub fn without_on_page(mut self) -> Self {
        self.on_page = None;
        self
    }
}

impl<N> Default for ListViewOptions<N> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<N> Clone for ListViewOptions<N> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            lazy: self.lazy.clone(),
            on_page: self.on_page.clone(),
        }
    }
}

impl<N> core::fmt::Debug for ListViewOptions<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListViewOptions")
            .field("config", &self.config)
            .field("lazy", &self.lazy.is_some())
            .field("on_page", &self.on_page.is_some())
            .finish()
    }
}
