use crate::*;

use alloc::string::String;
use alloc::vec::Vec;
use pageview::mock::{MockNode, MockSurface};
use pageview::{Config, Position, Surface, ViewportEvent};

fn row(height: u32) -> String {
    alloc::format!("<li data-height=\"{height}\">row</li>")
}

fn coordinator(viewport_height: u32) -> ScrollCoordinator<MockSurface> {
    ScrollCoordinator::new(
        MockSurface::new(viewport_height),
        Config::default().with_page_to_screen_ratio(1.0),
    )
}

fn add_list(c: &mut ScrollCoordinator<MockSurface>, rows: usize) -> ViewId {
    let parent: MockNode = c.surface_mut().create_container();
    let options = c.options();
    let id = c.create(&parent, options);
    for _ in 0..rows {
        assert!(c.append(id, row(100)).is_some());
    }
    id
}

fn start_of(c: &ScrollCoordinator<MockSurface>, id: ViewId) -> usize {
    c.view(id).map(|v| v.start_index()).unwrap()
}

#[test]
fn scheduler_fires_in_deadline_order() {
    let mut s = Scheduler::new();
    s.schedule('a', 0, 300);
    s.schedule('b', 0, 100);
    s.schedule('c', 50, 50);
    assert_eq!(s.next_deadline(), Some(100));
    assert_eq!(s.take_due(99), Vec::<char>::new());
    assert_eq!(s.take_due(100), alloc::vec!['b', 'c']);
    assert_eq!(s.len(), 1);
    assert_eq!(s.take_due(1_000), alloc::vec!['a']);
    assert!(s.is_empty());
}

#[test]
fn scheduler_replaces_and_cancels_by_token() {
    let mut s = Scheduler::new();
    assert_eq!(s.schedule(1u8, 0, 200), 200);
    assert_eq!(s.schedule(1u8, 150, 200), 350);
    assert_eq!(s.len(), 1);
    assert_eq!(s.deadline(1), Some(350));
    assert!(s.take_due(200).is_empty());

    assert!(s.cancel(1));
    assert!(!s.cancel(1));
    assert!(!s.is_pending(1));
    assert_eq!(s.next_deadline(), None);
}

#[test]
fn scroll_signals_are_throttled_and_coalesced() {
    let mut c = coordinator(300);
    let list = add_list(&mut c, 10);

    assert!(c.on_scroll(0));
    assert!(!c.on_scroll(40));
    assert!(!c.on_scroll(90));
    assert_eq!(c.next_deadline(), Some(150));

    c.surface_mut().scroll_to(600);
    assert_eq!(c.tick(149), 0);
    assert_eq!(start_of(&c, list), 0);

    // The pass reads the viewport when it runs, not when it was scheduled.
    assert_eq!(c.tick(150), 1);
    assert_eq!(start_of(&c, list), 1);
    assert!(!c.is_scroll_pending());

    assert!(c.on_scroll(200));
    assert_eq!(c.next_deadline(), Some(350));
}

#[test]
fn resize_signals_are_debounced() {
    let mut c = coordinator(300);
    let list = add_list(&mut c, 10);
    assert_eq!(c.view(list).map(|v| v.group_count()), Some(4));

    assert_eq!(c.on_resize(0), Some(200));
    assert_eq!(c.on_resize(100), Some(300));
    c.surface_mut().set_viewport_height(600);

    assert_eq!(c.tick(250), 0);
    assert_eq!(c.view(list).map(|v| v.group_count()), Some(4));

    assert_eq!(c.tick(300), 1);
    assert_eq!(c.view(list).map(|v| v.group_count()), Some(2));
    assert!(!c.is_resize_pending());
}

#[test]
fn scroll_and_resize_run_in_deadline_order() {
    let mut c = coordinator(300);
    let list = add_list(&mut c, 10);

    c.on_resize(0);
    c.on_scroll(10);
    c.surface_mut().set_viewport_height(600);
    c.surface_mut().scroll_to(600);

    assert_eq!(c.tick(1_000), 2);
    let view = c.view(list).unwrap();
    assert_eq!(view.group_count(), 2);
    assert!(view.is_consistent());
}

#[test]
fn passes_fan_out_to_every_list() {
    let mut c = coordinator(300);
    let a = add_list(&mut c, 10);
    let b = add_list(&mut c, 10);
    assert_eq!(c.len(), 2);
    let ids: Vec<ViewId> = c.views().map(|(id, _)| id).collect();
    assert_eq!(ids, alloc::vec![a, b]);

    c.surface_mut().scroll_to(600);
    c.on_scroll(0);
    c.tick(150);
    assert_eq!(start_of(&c, a), 1);
    assert_eq!(start_of(&c, b), 1);
}

#[test]
fn subscriptions_follow_the_first_and_last_list() {
    let mut c = coordinator(300);
    assert!(!c.is_subscribed());
    assert!(!c.on_scroll(0));
    assert_eq!(c.on_resize(0), None);

    let a = add_list(&mut c, 3);
    let b = add_list(&mut c, 3);
    assert!(c.is_subscribed());
    assert_eq!(c.surface().subscriptions(ViewportEvent::Scroll), 1);
    assert_eq!(c.surface().subscriptions(ViewportEvent::Resize), 1);

    assert!(c.dispose(a));
    assert!(!c.dispose(a));
    assert!(c.view(a).is_none());
    assert_eq!(c.surface().subscriptions(ViewportEvent::Scroll), 1);

    c.on_scroll(0);
    c.on_resize(0);
    assert!(c.dispose(b));
    assert!(c.is_empty());
    assert!(!c.is_subscribed());
    assert_eq!(c.surface().subscriptions(ViewportEvent::Scroll), 0);
    assert_eq!(c.surface().subscriptions(ViewportEvent::Resize), 0);
    assert_eq!(c.next_deadline(), None);
    assert_eq!(c.tick(10_000), 0);
}

#[test]
fn disposed_list_releases_its_groups() {
    let mut c = coordinator(300);
    let list = add_list(&mut c, 10);
    let root = *c.view(list).unwrap().root();
    assert!(!c.surface().children(&root).is_empty());

    c.dispose(list);
    assert!(c.surface().children(&root).is_empty());
}

#[test]
fn wrappers_reach_the_registered_list() {
    let mut c = coordinator(300);
    let list = add_list(&mut c, 2);

    let first = c.prepend(list, row(50)).unwrap();
    let order: Vec<_> = c.view(list).unwrap().items().map(|it| it.id()).collect();
    assert_eq!(order.first(), Some(&first));

    let removed = c.remove_item(list, first).unwrap();
    assert_eq!(removed.id(), first);
    assert_eq!(c.view(list).map(|v| v.len()), Some(2));

    let len = c.with_view(list, |view, surface| {
        view.append(surface, row(100));
        view.len()
    });
    assert_eq!(len, Some(3));

    let missing = ViewId(99);
    assert_eq!(c.append(missing, row(100)), None);
    assert_eq!(c.with_view(missing, |view, _| view.len()), None);
}

#[test]
fn adopted_list_is_driven_like_a_created_one() {
    let mut c = coordinator(300);
    let root = c.surface_mut().create_container();
    for _ in 0..10 {
        let surface = c.surface_mut();
        let node = surface.create_node(100, 100);
        surface.materialize(&node, &root, Position::Append);
    }
    let options = c.options();
    let list = c.adopt(root, options);
    assert!(c.is_subscribed());
    assert_eq!(c.view(list).map(|v| v.group_count()), Some(4));

    c.surface_mut().scroll_to(600);
    c.on_scroll(0);
    c.tick(150);
    assert_eq!(start_of(&c, list), 1);
    assert_eq!(c.surface().children(&root).first(), c.view(list).map(|v| v.buffer()));
}
