// Example: simulate a host forwarding scroll/resize signals to a coordinator.
use pageview::mock::MockSurface;
use pageview::{Config, Surface};
use pageview_adapter::ScrollCoordinator;

fn main() {
    let mut surface = MockSurface::new(300);
    let feed = surface.create_container();
    let sidebar = surface.create_container();
    let mut c = ScrollCoordinator::new(surface, Config::default().with_page_to_screen_ratio(1.0));

    let options = c.options();
    let a = c.create(&feed, options);
    let options = c.options();
    let b = c.create(&sidebar, options);
    for i in 0..40 {
        c.append(a, format!("<li data-height=\"100\">post {i}</li>"));
        c.append(b, format!("<li data-height=\"60\">link {i}</li>"));
    }

    // A burst of scroll events, one every 16ms.
    let mut now_ms = 0u64;
    for step in 0..30u64 {
        c.surface_mut().scroll_to(step * 40);
        c.on_scroll(now_ms);
        let ran = c.tick(now_ms);
        if ran > 0 {
            for (id, view) in c.views() {
                println!("t={now_ms} {id:?} start_index={}", view.start_index());
            }
        }
        now_ms += 16;
    }

    c.surface_mut().set_viewport_height(600);
    c.on_resize(now_ms);
    c.on_resize(now_ms + 50);
    let deadline = c.next_deadline().unwrap_or(now_ms);
    c.tick(deadline);
    for (id, view) in c.views() {
        println!("after resize {id:?} groups={}", view.group_count());
    }

    c.dispose(a);
    c.dispose(b);
    println!("subscribed={}", c.is_subscribed());
}
