//! End-to-end pipeline tests: snapshot in, draw commands and selections out.

use std::sync::{Arc, Mutex};

use nimsforest_model::{
    grid_to_iso, ScreenVec, Selection, Summary, Workload, WorkloadKind, World,
};
use nimsforest_scene::{DrawCommand, ForestScene};

fn workload(id: &str, kind: WorkloadKind) -> Workload {
    Workload {
        id: id.to_owned(),
        name: id.to_owned(),
        ram_allocated: 1_000_000_000,
        kind,
    }
}

fn cluster(size: i32) -> Arc<World> {
    let mut lands = Vec::new();
    for gy in 0..size {
        for gx in 0..size {
            let id = format!("land-{gx}-{gy}");
            lands.push(nimsforest_model::Land {
                id: id.clone(),
                hostname: format!("{id}.cluster"),
                ram_total: 64_000_000_000,
                ram_allocated: 24_000_000_000,
                cpu_cores: 16,
                cpu_freq_ghz: 2.8,
                gpu_vram: None,
                gpu_tflops: None,
                occupancy: 0.375,
                is_manaland: false,
                grid_x: gx,
                grid_y: gy,
                trees: vec![workload(
                    &format!("{id}-tree"),
                    WorkloadKind::Tree {
                        subjects: vec!["events".to_owned()],
                    },
                )],
                treehouses: vec![workload(
                    &format!("{id}-th"),
                    WorkloadKind::Treehouse {
                        script_path: "/srv/session.sh".to_owned(),
                    },
                )],
                nims: Vec::new(),
            });
        }
    }
    let land_count = lands.len() as u32;
    Arc::new(World {
        lands,
        summary: Summary {
            land_count,
            manaland_count: 0,
            tree_count: land_count,
            treehouse_count: land_count,
            nim_count: 0,
            total_ram: u64::from(land_count) * 64_000_000_000,
            ram_allocated: u64::from(land_count) * 24_000_000_000,
            occupancy: 0.375,
        },
    })
}

fn selection_sink(scene: &mut ForestScene) -> Arc<Mutex<Vec<Selection>>> {
    let seen: Arc<Mutex<Vec<Selection>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    scene.set_on_select(Box::new(move |s| {
        sink.lock().unwrap().push(s.clone());
    }));
    seen
}

#[test]
fn full_cluster_renders_every_entity() {
    let world = cluster(4);
    let mut scene = ForestScene::new(1280.0, 720.0);
    scene.set_world(world);

    let list = scene.draw_list();
    let tiles = list
        .iter()
        .filter(|c| matches!(c, DrawCommand::Tile { .. }))
        .count();
    let labels = list
        .iter()
        .filter(|c| matches!(c, DrawCommand::Label { .. }))
        .count();
    let markers = list
        .iter()
        .filter(|c| matches!(c, DrawCommand::Marker { .. }))
        .count();

    assert_eq!(tiles, 16);
    assert_eq!(labels, 16);
    assert_eq!(markers, 32);
    // One hit target per tile plus one per marker.
    assert_eq!(scene.target_count(), 48);
}

#[test]
fn draw_list_is_depth_sorted() {
    let mut scene = ForestScene::new(1280.0, 720.0);
    scene.set_world(cluster(5));

    let depths: Vec<f32> = scene.draw_list().iter().map(DrawCommand::depth).collect();
    assert!(depths.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn click_after_pan_resolves_against_moved_camera() {
    let mut scene = ForestScene::new(1280.0, 720.0);
    scene.set_world(cluster(3));
    let seen = selection_sink(&mut scene);

    // Drag the map 100 px right, release, then click where land-0-0 now is.
    scene.on_pointer_down(400.0, 300.0);
    scene.on_pointer_move(500.0, 300.0, true);
    scene.on_pointer_up(500.0, 300.0);
    assert!(seen.lock().unwrap().is_empty());

    // Aim at the tile's east half: the center itself sits under a neighbour
    // land's marker stack, which would win on depth.
    let tile = grid_to_iso(0, 0);
    let screen = scene
        .camera()
        .world_to_screen(ScreenVec::new(tile.x + 22.0, tile.y));
    scene.on_pointer_down(screen.x, screen.y);
    scene.on_pointer_up(screen.x, screen.y);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].id, "land-0-0");
}

#[test]
fn zoom_scales_screen_distances() {
    let mut scene = ForestScene::new(1280.0, 720.0);
    scene.set_world(cluster(2));

    let a = grid_to_iso(0, 0);
    let b = grid_to_iso(1, 1);
    let before = {
        let sa = scene.camera().world_to_screen(a);
        let sb = scene.camera().world_to_screen(b);
        (sb.y - sa.y).abs()
    };

    // Enough wheel ticks down that the 0.5 clamp floor engages; the nominal
    // 500 leave accumulated float error just above it.
    for _ in 0..1000 {
        scene.on_wheel(1.0);
    }
    assert!((scene.camera().zoom() - 0.5).abs() < f32::EPSILON);

    let after = {
        let sa = scene.camera().world_to_screen(a);
        let sb = scene.camera().world_to_screen(b);
        (sb.y - sa.y).abs()
    };
    assert!((after - before * 0.5).abs() < 0.01);
}

#[test]
fn snapshot_replacement_drops_stale_targets() {
    let mut scene = ForestScene::new(1280.0, 720.0);
    scene.set_world(cluster(4));
    assert_eq!(scene.target_count(), 48);

    scene.set_world(cluster(2));
    assert_eq!(scene.target_count(), 12);

    // Old entity ids are gone from the hit space.
    let seen = selection_sink(&mut scene);
    let screen = scene.camera().world_to_screen(grid_to_iso(3, 3));
    scene.on_pointer_down(screen.x, screen.y);
    scene.on_pointer_up(screen.x, screen.y);
    assert!(seen
        .lock()
        .unwrap()
        .iter()
        .all(|s| s.id != "land-3-3"));
}

#[test]
fn marker_click_beats_overlapping_tile() {
    // A marker stacked over a neighbour tile wins the hit because its depth
    // nudge puts it above the tile.
    let mut scene = ForestScene::new(1280.0, 720.0);
    scene.set_world(cluster(1));
    let seen = selection_sink(&mut scene);

    let base = grid_to_iso(0, 0);
    let marker = ScreenVec::new(base.x, base.y - 20.0);
    let screen = scene.camera().world_to_screen(marker);
    scene.on_pointer_down(screen.x, screen.y);
    scene.on_pointer_up(screen.x, screen.y);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].id, "land-0-0-tree");
    assert_eq!(seen[0].land_id.as_deref(), Some("land-0-0"));
}
