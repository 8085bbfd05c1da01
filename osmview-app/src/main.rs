use osmview::{
    animation::clock::SystemClock,
    core::hash::format_map_hash,
    input::events::{InputEvent, KeyCode, KeyModifiers, MapEvent},
    runtime::{drive_until_idle, DEFAULT_FRAME_INTERVAL},
    LayerKey, MapPane, Point, ViewerConfig,
};

/// Headless viewer session: replays a short scripted tour and prints every move end as a
/// shareable `#map=` fragment.
///
/// Usage: `osmview-app [config.json] [#map=Z/LAT/LON]`
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) if !path.starts_with('#') => ViewerConfig::from_path(&path)?,
        Some(hash) => {
            let mut pane = session(ViewerConfig::default());
            pane.restore_from_hash(&hash)?;
            return tour(pane).await;
        }
        None => ViewerConfig::default(),
    };

    let mut pane = session(config);
    if let Some(hash) = args.next() {
        pane.restore_from_hash(&hash)?;
    }
    tour(pane).await
}

fn session(config: ViewerConfig) -> MapPane {
    log::info!("tiles from {}", config.tile_url_template);
    let mut pane =
        MapPane::new(config, Box::new(SystemClock::new())).with_size(1024.0, 768.0);
    pane.on("moveend", |event| {
        if let MapEvent::MoveEnd(coords) = event {
            println!("moveend {}", format_map_hash(coords));
        }
    });
    pane.on("layertoggle", |event| {
        if let MapEvent::LayerToggled { key, visible } = event {
            println!("layer {} visible={}", key, visible);
        }
    });
    pane
}

async fn settle(pane: &mut MapPane) {
    drive_until_idle(pane, DEFAULT_FRAME_INTERVAL).await;
    pane.process_events();
}

async fn tour(mut pane: MapPane) -> Result<(), Box<dyn std::error::Error>> {
    settle(&mut pane).await;
    println!("start {}", pane.hash());

    for layer in pane.list_layers() {
        println!("{:<12} {:<16} visible={}", layer.key, layer.name, layer.visible);
    }

    // a short hop animates, a long one cross-fades
    let here = pane.coordinates();
    pane.move_to(here.zoom as i32, here.lat + 0.002, here.lon - 0.003);
    settle(&mut pane).await;
    pane.move_to(here.zoom as i32, 51.5007, -0.1246);
    settle(&mut pane).await;

    pane.handle_input(InputEvent::KeyDown {
        key: KeyCode::ArrowRight,
        modifiers: KeyModifiers::shift(),
        repeat: false,
    });
    settle(&mut pane).await;

    pane.handle_input(InputEvent::Wheel {
        delta_y: 100.0,
        offset: Point::new(300.0, 200.0),
    });
    settle(&mut pane).await;

    pane.toggle_layer(LayerKey::Grid, false);
    pane.toggle_layer(LayerKey::Grid, true);
    pane.process_events();

    let tiles = pane.tile_layer();
    println!(
        "{} tiles, first {}",
        tiles.images().len(),
        tiles.images().first().map_or("-", |image| image.url.as_str())
    );
    println!("end {}", pane.hash());
    log::info!("tour finished");
    Ok(())
}
