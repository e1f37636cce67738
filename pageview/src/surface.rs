use alloc::vec::Vec;

use crate::{Measure, Position, Viewport};

/// The rendering environment a [`crate::ListView`] draws into.
///
/// The engine never creates or measures visual nodes itself; it asks the surface. Node
/// handles are cheap to clone and compared by identity.
///
/// `materialize` and `dematerialize` must be idempotent. Materializing a node that already
/// has a parent moves it.
pub trait Surface {
    type Node: Clone + PartialEq + core::fmt::Debug;

    /// Creates an empty, detached container node (used for list roots, group roots, the
    /// buffer spacer and the shadow parent).
    fn create_container(&mut self) -> Self::Node;

    /// Turns serialized markup into a single attachable node.
    ///
    /// Returns `None` when the markup produces no node.
    fn wrap(&mut self, markup: &str) -> Option<Self::Node>;

    fn materialize(&mut self, node: &Self::Node, parent: &Self::Node, position: Position<'_, Self::Node>);

    fn dematerialize(&mut self, node: &Self::Node);

    /// Box metrics of a materialized node, relative to a stable origin.
    fn measure(&self, node: &Self::Node) -> Measure;

    /// Forces the extent of a container on the scroll axis.
    fn set_height(&mut self, node: &Self::Node, height: u64);

    /// The current viewport. Read live; never cached by the engine.
    fn viewport(&self) -> Viewport;

    /// Direct children of `node`, in visual order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    /// Whether `node` matches a surface-defined selector.
    fn matches(&self, node: &Self::Node, selector: &str) -> bool;
}

/// Viewport signals a host can deliver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewportEvent {
    Scroll,
    Resize,
}

/// Handle returned by [`ViewportEvents::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subscription(pub u64);

/// Event subscription half of the host contract.
///
/// A subscription tells the host to start forwarding a kind of signal; dropping the last
/// one lets the host stop producing it.
pub trait ViewportEvents {
    fn subscribe(&mut self, event: ViewportEvent) -> Subscription;

    fn unsubscribe(&mut self, subscription: Subscription);
}
