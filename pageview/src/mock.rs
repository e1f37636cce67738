//! An in-memory [`Surface`] for tests, examples and headless simulations.

use alloc::string::String;
use alloc::vec::Vec;

use crate::{Measure, Position, Subscription, Surface, Viewport, ViewportEvent, ViewportEvents};

/// Handle of a node in a [`MockSurface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MockNode(u32);

#[derive(Clone, Debug, Default)]
struct NodeData {
    parent: Option<MockNode>,
    children: Vec<MockNode>,
    width: u32,
    height: u64,
    offset_top: u64,
    markup: String,
}

/// A node tree with fixed-size leaves and a scrollable viewport.
///
/// - `wrap` reads the node height from a `data-height="N"` attribute, falling back to the
///   default item size.
/// - `measure` reports `top` as the sum of `offset_top` along the ancestor chain.
/// - `matches` is a substring test against the node's markup.
#[derive(Clone, Debug)]
pub struct MockSurface {
    nodes: Vec<NodeData>,
    viewport: Viewport,
    item_width: u32,
    item_height: u32,
    subscriptions: Vec<(Subscription, ViewportEvent)>,
    next_subscription: u64,
    materialize_calls: usize,
}

impl MockSurface {
    pub fn new(viewport_height: u32) -> Self {
        Self {
            nodes: Vec::new(),
            viewport: Viewport {
                top: 0,
                height: viewport_height,
            },
            item_width: 100,
            item_height: 100,
            subscriptions: Vec::new(),
            next_subscription: 0,
            materialize_calls: 0,
        }
    }

    /// Sets the size used by `wrap` when the markup carries no height.
    pub fn with_item_size(mut self, width: u32, height: u32) -> Self {
        self.item_width = width;
        self.item_height = height;
        self
    }

    /// Creates a detached leaf of a fixed size.
    pub fn create_node(&mut self, width: u32, height: u32) -> MockNode {
        self.push(NodeData {
            width,
            height: height as u64,
            ..NodeData::default()
        })
    }

    pub fn viewport_top(&self) -> u64 {
        self.viewport.top
    }

    pub fn scroll_to(&mut self, top: u64) {
        self.viewport.top = top;
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport.height = height;
    }

    /// Resizes a leaf, as a reflow would.
    pub fn set_node_height(&mut self, node: MockNode, height: u32) {
        if let Some(data) = self.data_mut(node) {
            data.height = height as u64;
        }
    }

    pub fn set_offset_top(&mut self, node: MockNode, top: u64) {
        if let Some(data) = self.data_mut(node) {
            data.offset_top = top;
        }
    }

    pub fn parent(&self, node: MockNode) -> Option<MockNode> {
        self.data(node).and_then(|d| d.parent)
    }

    pub fn height_of(&self, node: MockNode) -> u64 {
        self.data(node).map_or(0, |d| d.height)
    }

    pub fn markup(&self, node: MockNode) -> &str {
        self.data(node).map_or("", |d| d.markup.as_str())
    }

    /// Number of live subscriptions for `event`.
    pub fn subscriptions(&self, event: ViewportEvent) -> usize {
        self.subscriptions.iter().filter(|(_, e)| *e == event).count()
    }

    /// Total `materialize` calls so far.
    pub fn materialize_calls(&self) -> usize {
        self.materialize_calls
    }

    fn push(&mut self, data: NodeData) -> MockNode {
        let node = MockNode(self.nodes.len() as u32);
        self.nodes.push(data);
        node
    }

    fn data(&self, node: MockNode) -> Option<&NodeData> {
        self.nodes.get(node.0 as usize)
    }

    fn data_mut(&mut self, node: MockNode) -> Option<&mut NodeData> {
        self.nodes.get_mut(node.0 as usize)
    }

    fn detach(&mut self, node: MockNode) {
        let Some(parent) = self.data_mut(node).and_then(|d| d.parent.take()) else {
            return;
        };
        if let Some(p) = self.data_mut(parent) {
            p.children.retain(|c| *c != node);
        }
    }
}

fn parse_height(markup: &str) -> Option<u32> {
    const ATTR: &str = "data-height=\"";
    let start = markup.find(ATTR)? + ATTR.len();
    let rest = &markup[start..];
    let end = rest.find('"')?;
    rest[..end].trim().parse().ok()
}

impl Surface for MockSurface {
    type Node = MockNode;

    fn create_container(&mut self) -> MockNode {
        self.push(NodeData::default())
    }

    fn wrap(&mut self, markup: &str) -> Option<MockNode> {
        if markup.trim().is_empty() {
            return None;
        }
        let height = parse_height(markup).unwrap_or(self.item_height);
        let width = self.item_width;
        Some(self.push(NodeData {
            width,
            height: height as u64,
            markup: String::from(markup),
            ..NodeData::default()
        }))
    }

    fn materialize(&mut self, node: &MockNode, parent: &MockNode, position: Position<'_, MockNode>) {
        if node == parent || self.data(*node).is_none() || self.data(*parent).is_none() {
            return;
        }
        self.materialize_calls += 1;
        self.detach(*node);
        let node = *node;
        let Some(p) = self.data_mut(*parent) else {
            return;
        };
        match position {
            Position::Append => p.children.push(node),
            Position::Prepend => p.children.insert(0, node),
            Position::After(anchor) => match p.children.iter().position(|c| c == anchor) {
                Some(i) => p.children.insert(i + 1, node),
                None => p.children.push(node),
            },
        }
        if let Some(d) = self.data_mut(node) {
            d.parent = Some(*parent);
        }
    }

    fn dematerialize(&mut self, node: &MockNode) {
        self.detach(*node);
    }

    fn measure(&self, node: &MockNode) -> Measure {
        let Some(data) = self.data(*node) else {
            return Measure::default();
        };
        let mut top = data.offset_top;
        let mut cur = data.parent;
        while let Some(p) = cur.and_then(|p| self.data(p)) {
            top = top.saturating_add(p.offset_top);
            cur = p.parent;
        }
        Measure {
            top,
            left: 0,
            width: data.width,
            height: u32::try_from(data.height).unwrap_or(u32::MAX),
        }
    }

    fn set_height(&mut self, node: &MockNode, height: u64) {
        if let Some(data) = self.data_mut(*node) {
            data.height = height;
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn children(&self, node: &MockNode) -> Vec<MockNode> {
        self.data(*node).map(|d| d.children.clone()).unwrap_or_default()
    }

    fn contains(&self, ancestor: &MockNode, node: &MockNode) -> bool {
        let mut cur = Some(*node);
        while let Some(n) = cur {
            if n == *ancestor {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }

    fn matches(&self, node: &MockNode, selector: &str) -> bool {
        !selector.is_empty() && self.markup(*node).contains(selector)
    }
}

impl ViewportEvents for MockSurface {
    fn subscribe(&mut self, event: ViewportEvent) -> Subscription {
        let subscription = Subscription(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.push((subscription, event));
        subscription
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        self.subscriptions.retain(|(s, _)| *s != subscription);
    }
}
