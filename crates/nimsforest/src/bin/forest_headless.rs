//! Headless viewer run.
//!
//! Builds a fixture cluster, drives the scene through a scripted pointer
//! session, and prints what happened. Useful for eyeballing the pipeline
//! without a windowing host:
//!
//! ```text
//! forest_headless [config.toml]
//! ```

use std::path::Path;
use std::process::ExitCode;

use nimsforest::{ForestController, ViewerConfig, ViewerEvent};
use nimsforest_loader::FixtureSource;
use nimsforest_model::grid_to_iso;
use nimsforest_scene::DrawCommand;

fn main() -> ExitCode {
    let config = match std::env::args().nth(1) {
        Some(path) => match ViewerConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("✗ {err}");
                return ExitCode::FAILURE;
            }
        },
        None => ViewerConfig::default(),
    };

    println!("=== NIMSFOREST HEADLESS RUN ===\n");

    let mut controller = ForestController::new(1280.0, 720.0, &config);
    let events = controller.events();
    let mut source = FixtureSource::new(config.fixture_seed, config.fixture_lands);

    println!("--- Refresh ---");
    if let Err(err) = controller.refresh_from(&mut source) {
        eprintln!("✗ refresh failed: {err}");
        return ExitCode::FAILURE;
    }
    report(&events.drain());

    if let Some(lines) = controller.summary_lines() {
        println!("\n--- Cluster summary ---");
        for line in lines {
            println!("  {line}");
        }
    }

    let list = controller.scene().draw_list();
    let (mut tiles, mut labels, mut markers) = (0, 0, 0);
    for command in &list {
        match command {
            DrawCommand::Tile { .. } => tiles += 1,
            DrawCommand::Label { .. } => labels += 1,
            DrawCommand::Marker { .. } => markers += 1,
            DrawCommand::Notice { .. } => {}
        }
    }
    println!("\n--- Draw list ---");
    println!("  {} commands: {tiles} tiles, {labels} labels, {markers} markers", list.len());
    println!("  {} hit targets", controller.scene().target_count());

    println!("\n--- Pointer session ---");
    // Drag the map, release, then click the first land's tile.
    controller.scene_mut().on_pointer_down(640.0, 360.0);
    controller.scene_mut().on_pointer_move(700.0, 380.0, true);
    controller.scene_mut().on_pointer_up(700.0, 380.0);
    println!("  dragged 60x20 px, scroll now {:?}", controller.scene().camera().scroll());

    let screen = controller
        .scene()
        .camera()
        .world_to_screen(grid_to_iso(0, 0));
    controller.scene_mut().on_pointer_down(screen.x, screen.y);
    controller.scene_mut().on_pointer_up(screen.x, screen.y);
    report(&events.drain());

    if let Some(lines) = controller.detail_lines() {
        println!("\n--- Selection detail ---");
        for line in lines {
            println!("  {line}");
        }
    }

    controller.scene_mut().on_wheel(300.0);
    println!("\n  zoomed out to {:.2}", controller.scene().camera().zoom());

    controller.dispose();
    println!("\n✓ session complete");
    ExitCode::SUCCESS
}

fn report(events: &[ViewerEvent]) {
    for event in events {
        match event {
            ViewerEvent::WorldReplaced {
                land_count,
                workload_count,
            } => println!("  world replaced: {land_count} lands, {workload_count} workloads"),
            ViewerEvent::SelectionChanged { selection } => match selection {
                Some(s) => println!("  selected: {} {}", s.kind.name(), s.id),
                None => println!("  selection cleared"),
            },
            ViewerEvent::FetchFailed { source, reason } => {
                println!("  fetch from {source} failed: {reason}");
            }
        }
    }
}
