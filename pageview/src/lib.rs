//! A headless paging engine for very long lists.
//!
//! For scroll throttling, resize debouncing and multi-view coordination, see the
//! `pageview-adapter` crate.
//!
//! Instead of materializing every item of a list, this crate buckets items into roughly
//! screen-sized groups ("pages") and keeps only the groups around the viewport attached to
//! the visual tree. As the viewport moves, groups are stashed and re-inserted as whole
//! units, and a spacer above the window preserves the scroll height of everything skipped.
//!
//! It is UI-agnostic. The host provides a [`Surface`]:
//! - node creation and markup wrapping
//! - attach/detach of nodes inside a parent
//! - box measurement
//! - the current viewport
//!
//! ```
//! use pageview::mock::MockSurface;
//! use pageview::{Config, ListView, ListViewOptions, Surface};
//!
//! let mut surface = MockSurface::new(300);
//! let parent = surface.create_container();
//! let options = ListViewOptions::new(Config::default().with_page_to_screen_ratio(1.0));
//! let mut list = ListView::new(&mut surface, &parent, options);
//!
//! for _ in 0..10 {
//!     list.append(&mut surface, "<li data-height=\"100\">row</li>");
//! }
//! assert_eq!(list.group_count(), 4);
//! assert_eq!(list.onscreen_count(), 3);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod config;
mod coords;
mod group;
mod item;
mod key;
mod list_view;
pub mod mock;
mod registry;
mod state;
mod surface;
mod types;


pub use config::{Config, LazyFn, ListViewOptions, PageFn};
pub use coords::Coords;
pub use group::Group;
pub use item::ListItem;
pub use key::StableId;
pub use list_view::ListView;
pub use registry::{GroupRegistry, ItemRegistry, Registry};
pub use state::{GroupSnapshot, ListSnapshot};
pub use surface::{Subscription, Surface, ViewportEvent, ViewportEvents};
pub use types::{
    Content, Find, GroupId, ItemId, Measure, PageEvent, Placement, Position, Viewport,
};
