//! Wrap demo: flick a five-item carousel past both ends and watch the
//! selection snap back onto the real items.
//!
//! Run with: RUST_LOG=orbit=debug cargo run -p orbit --example wrap_demo

use std::sync::Arc;

use orbit::prelude::*;

fn main() -> Result<(), CycleError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("orbit=debug")),
        )
        .init();

    let items = Arc::new(ObservableList::new(vec!["A", "B", "C", "D", "E"]));
    let carousel = Arc::new(Carousel::cyclic(items.clone(), CycleConfig::default())?);
    let host = Arc::new(SelectionSlot::new());
    let _binding = carousel.bind(&host);

    if let Some(coordinator) = carousel.coordinator() {
        coordinator
            .cycle_selection_changed()
            .connect(|index| println!("  settled on outer index {index}"));
    }

    print_view(&carousel)?;
    carousel.attach(&*host);

    println!("flick backwards past the first item");
    flick(&carousel, &host, &[1, 0])?;

    println!("flick forwards past the last item");
    flick(&carousel, &host, &[6, 7, 8])?;

    println!("append F to the source");
    items.push("F")?;
    print_view(&carousel)?;

    Ok(())
}

fn flick(
    carousel: &Carousel<&'static str>,
    host: &SelectionSlot,
    path: &[usize],
) -> Result<(), CycleError> {
    for &index in path {
        host.select(index);
        carousel.on_view_changed(host, true)?;
    }
    carousel.on_view_changed(host, false)?;
    if let Some(index) = host.selected_index() {
        println!("  showing {} at {index}", carousel.get(index)?);
    }
    Ok(())
}

fn print_view(carousel: &Carousel<&'static str>) -> Result<(), CycleError> {
    let view = (0..carousel.count())
        .map(|index| {
            let item = carousel.get(index)?;
            Ok(if carousel.keep_container_alive(index) {
                format!("({item})")
            } else {
                item.to_string()
            })
        })
        .collect::<Result<Vec<_>, CycleError>>()?;
    println!("view: {}", view.join(" "));
    Ok(())
}
