// Example: a long list scrolled through a small viewport.
use pageview::mock::MockSurface;
use pageview::{Config, ListView, ListViewOptions, Surface};

fn main() {
    let mut surface = MockSurface::new(400);
    let parent = surface.create_container();
    let options = ListViewOptions::new(Config::default())
        .with_lazy(|group: pageview::GroupId, _node: &pageview::mock::MockNode| {
            println!("  lazy load {group:?}");
        });
    let mut list = ListView::new(&mut surface, &parent, options);

    for i in 0..500u32 {
        let height = 40 + (i * 37) % 80;
        list.append(&mut surface, format!("<li data-height=\"{height}\">row {i}</li>"));
    }
    println!(
        "items={} groups={} height={} window={:?}",
        list.len(),
        list.group_count(),
        list.height(),
        list.window()
    );

    for top in [0u64, 5_000, 20_000, 1_000] {
        surface.scroll_to(top);
        let start = list.update_start_index(&mut surface);
        println!(
            "scroll_top={top} start_index={start} buffer={} onscreen={:?}",
            list.buffer_height(),
            list.snapshot().onscreen()
        );
    }

    let hits = list.find(&surface, pageview::Find::Selector("row 250<"));
    println!("row 250 top={:?}", hits.first().map(|it| it.top()));
}
