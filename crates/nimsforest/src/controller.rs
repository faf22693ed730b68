//! The viewer controller.
//!
//! Wires the pieces together: pulls snapshots from a [`WorldSource`],
//! guards against out-of-order refreshes, swaps the shared world handle,
//! rebuilds the scene, revalidates the selection, and emits [`ViewerEvent`]s
//! for the host to react to. It also assembles the sidebar text so hosts
//! render strings instead of reimplementing formatting.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{info, warn};

use nimsforest_loader::{RefreshGuard, SnapshotResult, WorldSource};
use nimsforest_model::{format_bytes, EntityKind, Selection, WorkloadKind, World};
use nimsforest_scene::ForestScene;

use crate::config::ViewerConfig;
use crate::events::{EventBus, EventReceiver, EventSender, ViewerEvent};

/// Events the bus buffers before dropping.
const EVENT_CAPACITY: usize = 256;

/// Owns the scene and the refresh loop state.
pub struct ForestController {
    scene: ForestScene,
    world: Arc<RwLock<Option<Arc<World>>>>,
    selection: Arc<Mutex<Option<Selection>>>,
    guard: RefreshGuard,
    sender: EventSender,
    receiver: EventReceiver,
}

impl ForestController {
    /// Creates a controller with the given viewport and config.
    #[must_use]
    pub fn new(viewport_width: f32, viewport_height: f32, config: &ViewerConfig) -> Self {
        let bus = EventBus::new(EVENT_CAPACITY);
        let sender = bus.sender();
        let receiver = bus.receiver();

        let mut scene = ForestScene::with_tuning(
            viewport_width,
            viewport_height,
            config.camera_tuning(),
            config.drag_threshold,
        );

        let selection: Arc<Mutex<Option<Selection>>> = Arc::new(Mutex::new(None));
        let click_selection = Arc::clone(&selection);
        let click_sender = sender.clone();
        scene.set_on_select(Box::new(move |picked| {
            *click_selection.lock() = Some(picked.clone());
            click_sender.send(ViewerEvent::SelectionChanged {
                selection: Some(picked.clone()),
            });
        }));

        Self {
            scene,
            world: Arc::new(RwLock::new(None)),
            selection,
            guard: RefreshGuard::new(),
            sender,
            receiver,
        }
    }

    /// The host's event receiver. Clone freely.
    #[must_use]
    pub fn events(&self) -> EventReceiver {
        self.receiver.clone()
    }

    /// A shared read handle on the current world. Readers see whole
    /// snapshots only; replacement is atomic.
    #[must_use]
    pub fn world_handle(&self) -> Arc<RwLock<Option<Arc<World>>>> {
        Arc::clone(&self.world)
    }

    /// The current selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.selection.lock().clone()
    }

    /// The scene, for pointer delegation and draw-list extraction.
    pub fn scene_mut(&mut self) -> &mut ForestScene {
        &mut self.scene
    }

    /// Read access to the scene.
    #[must_use]
    pub const fn scene(&self) -> &ForestScene {
        &self.scene
    }

    /// Pulls one snapshot from `source` and applies it.
    ///
    /// On success the world handle is swapped, the scene rebuilt, the
    /// selection revalidated, and `WorldReplaced` emitted. On failure the
    /// previous snapshot stays rendered and `FetchFailed` is emitted; the
    /// viewer never blanks while a refresh is in flight.
    ///
    /// # Errors
    ///
    /// Propagates the source's fetch error or a stale-refresh rejection.
    pub fn refresh_from(&mut self, source: &mut dyn WorldSource) -> SnapshotResult<()> {
        let ticket = self.guard.begin();

        let world = match source.fetch() {
            Ok(world) => world,
            Err(err) => {
                warn!("refresh from {} failed: {err}", source.name());
                self.sender.send(ViewerEvent::FetchFailed {
                    source: source.name().to_owned(),
                    reason: err.to_string(),
                });
                return Err(err);
            }
        };

        self.guard.complete(ticket)?;
        self.apply_world(Arc::new(world));
        Ok(())
    }

    /// Applies a snapshot directly, bypassing any source.
    pub fn apply_world(&mut self, world: Arc<World>) {
        *self.world.write() = Some(Arc::clone(&world));
        self.scene.set_world(Arc::clone(&world));

        // A selection that no longer resolves in the new snapshot is
        // cleared rather than left dangling over a repurposed tile.
        let cleared = {
            let mut slot = self.selection.lock();
            match slot.as_ref() {
                Some(current) if !current.resolves_in(&world) => {
                    info!("selection {} no longer resolves, clearing", current.id);
                    *slot = None;
                    true
                }
                _ => false,
            }
        };
        if cleared {
            self.sender
                .send(ViewerEvent::SelectionChanged { selection: None });
        }

        self.sender.send(ViewerEvent::WorldReplaced {
            land_count: world.lands.len(),
            workload_count: world.workload_count(),
        });
    }

    /// Clears the selection (sidebar close button).
    pub fn clear_selection(&mut self) {
        let had = self.selection.lock().take().is_some();
        if had {
            self.sender
                .send(ViewerEvent::SelectionChanged { selection: None });
        }
    }

    /// Tears everything down.
    pub fn dispose(&mut self) {
        self.scene.dispose();
        *self.world.write() = None;
        *self.selection.lock() = None;
    }

    // -------------------------------------------------------------------
    // Sidebar text
    // -------------------------------------------------------------------

    /// Formatted cluster-summary lines, or `None` before the first snapshot.
    #[must_use]
    pub fn summary_lines(&self) -> Option<Vec<String>> {
        let handle = self.world.read();
        let world = handle.as_ref()?;
        let s = &world.summary;
        Some(vec![
            format!("Lands: {} ({} manalands)", s.land_count, s.manaland_count),
            format!(
                "Workloads: {} trees, {} treehouses, {} nims",
                s.tree_count, s.treehouse_count, s.nim_count
            ),
            format!(
                "RAM: {} / {}",
                format_bytes(s.ram_allocated),
                format_bytes(s.total_ram)
            ),
            format!("Occupancy: {:.1}%", s.occupancy_percent()),
        ])
    }

    /// Formatted detail lines for the current selection, or `None` when
    /// nothing is selected (or the selection no longer resolves).
    #[must_use]
    pub fn detail_lines(&self) -> Option<Vec<String>> {
        let selection = self.selection()?;
        let handle = self.world.read();
        let world = handle.as_ref()?;

        match selection.kind {
            EntityKind::Land => world.land(&selection.id).map(land_lines),
            _ => {
                let (land, workload) = match &selection.land_id {
                    Some(land_id) => world.workload_on(land_id, &selection.id)?,
                    None => world.workload(&selection.id)?,
                };
                Some(workload_lines(land.id.as_str(), workload))
            }
        }
    }
}

fn land_lines(land: &nimsforest_model::Land) -> Vec<String> {
    let mut lines = vec![
        format!("{} ({})", land.id, land.hostname),
        format!(
            "RAM: {} / {}",
            format_bytes(land.ram_allocated),
            format_bytes(land.ram_total)
        ),
        format!(
            "CPU: {} cores @ {:.1} GHz",
            land.cpu_cores, land.cpu_freq_ghz
        ),
        format!("Occupancy: {:.1}%", land.occupancy_percent()),
    ];
    if let (Some(vram), Some(tflops)) = (land.gpu_vram, land.gpu_tflops) {
        lines.push(format!(
            "GPU: {} VRAM, {tflops:.0} TFLOPs",
            format_bytes(vram)
        ));
    }
    lines.push(format!("Workloads: {}", land.workload_count()));
    lines
}

fn workload_lines(land_id: &str, workload: &nimsforest_model::Workload) -> Vec<String> {
    let mut lines = vec![
        format!("{} ({})", workload.name, workload.kind.entity_kind().name()),
        format!("On land: {land_id}"),
        format!("RAM: {}", format_bytes(workload.ram_allocated)),
    ];
    match &workload.kind {
        WorkloadKind::Tree { subjects } => {
            if !subjects.is_empty() {
                lines.push(format!("Subjects: {}", subjects.join(", ")));
            }
        }
        WorkloadKind::Treehouse { script_path } => {
            lines.push(format!("Script: {script_path}"));
        }
        WorkloadKind::Nim { ai_enabled, model } => {
            lines.push(format!(
                "AI: {}",
                if *ai_enabled { "enabled" } else { "disabled" }
            ));
            if let Some(model) = model {
                lines.push(format!("Model: {model}"));
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimsforest_loader::{FixtureSource, SnapshotError};
    use nimsforest_model::{grid_to_iso, Land, Summary, Workload};

    struct FailingSource;

    impl WorldSource for FailingSource {
        fn fetch(&mut self) -> SnapshotResult<World> {
            Err(SnapshotError::Transport { status: 503 })
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn controller() -> ForestController {
        ForestController::new(1280.0, 720.0, &ViewerConfig::default())
    }

    fn one_land_world(land_id: &str) -> Arc<World> {
        Arc::new(World {
            lands: vec![Land {
                id: land_id.to_owned(),
                hostname: format!("{land_id}.cluster"),
                ram_total: 64_000_000_000,
                ram_allocated: 24_000_000_000,
                cpu_cores: 16,
                cpu_freq_ghz: 2.8,
                gpu_vram: None,
                gpu_tflops: None,
                occupancy: 0.375,
                is_manaland: false,
                grid_x: 0,
                grid_y: 0,
                trees: vec![Workload {
                    id: format!("{land_id}-tree"),
                    name: "gateway".to_owned(),
                    ram_allocated: 2_000_000_000,
                    kind: WorkloadKind::Tree {
                        subjects: vec!["http".to_owned(), "metrics".to_owned()],
                    },
                }],
                treehouses: Vec::new(),
                nims: Vec::new(),
            }],
            summary: Summary {
                land_count: 1,
                manaland_count: 0,
                tree_count: 1,
                treehouse_count: 0,
                nim_count: 0,
                total_ram: 64_000_000_000,
                ram_allocated: 24_000_000_000,
                occupancy: 0.375,
            },
        })
    }

    fn click_tile(controller: &mut ForestController) {
        let screen = controller
            .scene()
            .camera()
            .world_to_screen(grid_to_iso(0, 0));
        controller.scene_mut().on_pointer_down(screen.x, screen.y);
        controller.scene_mut().on_pointer_up(screen.x, screen.y);
    }

    #[test]
    fn refresh_applies_world_and_emits_event() {
        let mut controller = controller();
        let events = controller.events();
        let mut source = FixtureSource::new(42, 6);

        controller.refresh_from(&mut source).unwrap();
        assert!(controller.summary_lines().is_some());

        let replaced = events
            .drain()
            .into_iter()
            .any(|e| matches!(e, ViewerEvent::WorldReplaced { land_count: 6, .. }));
        assert!(replaced);
    }

    #[test]
    fn failed_refresh_keeps_previous_world() {
        let mut controller = controller();
        let events = controller.events();

        let mut good = FixtureSource::new(42, 6);
        controller.refresh_from(&mut good).unwrap();
        let _ = events.drain();

        let mut bad = FailingSource;
        assert!(controller.refresh_from(&mut bad).is_err());

        // Previous snapshot is still rendered.
        assert!(controller.summary_lines().is_some());
        assert!(controller.scene().target_count() > 0);

        let failed = events
            .drain()
            .into_iter()
            .any(|e| matches!(e, ViewerEvent::FetchFailed { .. }));
        assert!(failed);
    }

    #[test]
    fn click_sets_selection_and_emits_event() {
        let mut controller = controller();
        let events = controller.events();
        controller.apply_world(one_land_world("land-a"));
        let _ = events.drain();

        click_tile(&mut controller);

        let selection = controller.selection().unwrap();
        assert_eq!(selection.kind, EntityKind::Land);
        assert_eq!(selection.id, "land-a");

        let changed = events.drain().into_iter().any(|e| {
            matches!(
                e,
                ViewerEvent::SelectionChanged {
                    selection: Some(_)
                }
            )
        });
        assert!(changed);
    }

    #[test]
    fn stale_selection_cleared_on_world_replace() {
        let mut controller = controller();
        controller.apply_world(one_land_world("land-a"));
        click_tile(&mut controller);
        assert!(controller.selection().is_some());

        let events = controller.events();
        let _ = events.drain();
        controller.apply_world(one_land_world("land-b"));

        assert!(controller.selection().is_none());
        let cleared = events
            .drain()
            .into_iter()
            .any(|e| matches!(e, ViewerEvent::SelectionChanged { selection: None }));
        assert!(cleared);
    }

    #[test]
    fn surviving_selection_persists_across_replace() {
        let mut controller = controller();
        controller.apply_world(one_land_world("land-a"));
        click_tile(&mut controller);

        controller.apply_world(one_land_world("land-a"));
        assert_eq!(controller.selection().unwrap().id, "land-a");
    }

    #[test]
    fn clear_selection_emits_once() {
        let mut controller = controller();
        controller.apply_world(one_land_world("land-a"));
        click_tile(&mut controller);

        let events = controller.events();
        let _ = events.drain();

        controller.clear_selection();
        assert!(controller.selection().is_none());
        assert_eq!(events.drain().len(), 1);

        // Clearing an empty selection is silent.
        controller.clear_selection();
        assert!(events.drain().is_empty());
    }

    #[test]
    fn detail_lines_for_land_selection() {
        let mut controller = controller();
        controller.apply_world(one_land_world("land-a"));
        click_tile(&mut controller);

        let lines = controller.detail_lines().unwrap();
        assert!(lines[0].starts_with("land-a"));
        assert!(lines.iter().any(|l| l == "RAM: 24GB / 64GB"));
        assert!(lines.iter().any(|l| l == "CPU: 16 cores @ 2.8 GHz"));
        assert!(lines.iter().any(|l| l == "Occupancy: 37.5%"));
        // No GPU line on a plain land.
        assert!(!lines.iter().any(|l| l.starts_with("GPU:")));
    }

    #[test]
    fn summary_lines_use_byte_formatting() {
        let mut controller = controller();
        controller.apply_world(one_land_world("land-a"));

        let lines = controller.summary_lines().unwrap();
        assert!(lines.iter().any(|l| l == "RAM: 24GB / 64GB"));
        assert!(lines.iter().any(|l| l == "Occupancy: 37.5%"));
    }

    #[test]
    fn dispose_clears_everything() {
        let mut controller = controller();
        controller.apply_world(one_land_world("land-a"));
        click_tile(&mut controller);

        controller.dispose();
        assert!(controller.selection().is_none());
        assert!(controller.summary_lines().is_none());
        assert_eq!(controller.scene().target_count(), 0);
    }
}
