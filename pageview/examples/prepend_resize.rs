// Example: prepending older rows and rebuilding groups after a resize.
use pageview::mock::MockSurface;
use pageview::{Config, ListView, ListViewOptions, Surface};

fn main() {
    let mut surface = MockSurface::new(300);
    let parent = surface.create_container();
    let options = ListViewOptions::new(Config::default().with_page_to_screen_ratio(1.0));
    let mut list = ListView::new(&mut surface, &parent, options);

    for _ in 0..10 {
        list.append(&mut surface, "<li data-height=\"100\">message</li>");
    }
    surface.scroll_to(600);
    list.update_start_index(&mut surface);
    println!("before prepend: {:?}", list.snapshot());

    list.prepend(&mut surface, "<li data-height=\"50\">older message</li>");
    println!(
        "after prepend: start_index={} buffer={} groups={}",
        list.start_index(),
        list.buffer_height(),
        list.group_count()
    );

    surface.set_viewport_height(600);
    list.repartition(&mut surface);
    println!(
        "after resize: groups={} onscreen={:?}",
        list.group_count(),
        list.snapshot().onscreen()
    );
}
