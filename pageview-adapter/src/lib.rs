//! Adapter utilities for the `pageview` crate.
//!
//! `pageview` windows a single list against a [`pageview::Surface`]. Hosts usually run
//! several lists against one scrolling viewport and need to keep scroll and resize
//! signals from re-running the windowing pass on every event. This crate provides:
//!
//! - [`ScrollCoordinator`]: owns the surface and every active list, subscribes to viewport
//!   signals while any list exists, throttles scroll passes and debounces repartitions
//! - [`Scheduler`]: token-keyed deferred tasks with cancel-by-token and an injected clock
//!
//! No timers run on their own. Adapters forward signals and call `tick(now_ms)`.
//!
//! ```
//! use pageview::mock::MockSurface;
//! use pageview::{Config, Surface};
//! use pageview_adapter::ScrollCoordinator;
//!
//! let mut surface = MockSurface::new(300);
//! let parent = surface.create_container();
//! let mut coordinator =
//!     ScrollCoordinator::new(surface, Config::default().with_page_to_screen_ratio(1.0));
//! let options = coordinator.options();
//! let list = coordinator.create(&parent, options);
//! for _ in 0..10 {
//!     coordinator.append(list, "<li data-height=\"100\">row</li>");
//! }
//!
//! coordinator.surface_mut().scroll_to(600);
//! assert!(coordinator.on_scroll(0));
//! assert_eq!(coordinator.tick(150), 1);
//! assert_eq!(coordinator.view(list).map(|v| v.start_index()), Some(1));
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod coordinator;
mod scheduler;

#[cfg(test)]
mod tests;

pub use coordinator::{ScrollCoordinator, Task, ViewId};
pub use scheduler::{Scheduler, Timer};
