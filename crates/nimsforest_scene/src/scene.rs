//! The scene itself.
//!
//! `ForestScene` owns the retained layout built from the latest snapshot,
//! the camera, the gesture machine, and the selection callback. It rebuilds
//! from scratch on every `set_world` - discarding and relaying tens of tiles
//! is cheaper than getting a diff wrong.

use std::sync::Arc;

use nimsforest_model::{
    grid_to_iso, Land, ScreenVec, Selection, WorkloadKind, World, TILE_HEIGHT, TILE_WIDTH,
};

use crate::camera::{Camera, CameraTuning};
use crate::draw::{DrawCommand, MarkerKind, TileKind};
use crate::hit::{hit_test, HitShape, HitTarget, Rect};
use crate::input::{GestureEvent, GestureTracker};

/// First marker sits this far above the tile anchor.
const MARKER_STACK_START: f32 = -20.0;
/// Vertical spacing between stacked markers.
const MARKER_SPACING: f32 = 24.0;
/// Marker sprite footprint (square).
const MARKER_SIZE: f32 = 32.0;
/// Marker draw scale at rest.
const MARKER_SCALE: f32 = 0.8;
/// Marker draw scale while hovered.
const MARKER_SCALE_HOVER: f32 = 0.9;
/// Gap between a tile's bottom point and its label.
const LABEL_GAP: f32 = 4.0;
/// Characters of the entity id shown on a tile label.
const LABEL_ID_LEN: usize = 8;
/// Depth offset of a label above its tile.
const LABEL_DEPTH_NUDGE: f32 = 0.01;
/// Depth offset of markers above their tile.
const MARKER_DEPTH_NUDGE: f32 = 0.1;

/// Message shown when the snapshot holds no lands.
const EMPTY_NOTICE: &str = "No Land detected.\nStart your forest daemon to see nodes.";

/// Selection notification callback.
pub type SelectCallback = Box<dyn FnMut(&Selection) + Send>;

/// One retained scene element. Draw commands are derived from these so the
/// hover highlight can change without touching the layout.
#[derive(Debug, Clone)]
enum Node {
    Tile {
        position: ScreenVec,
        depth: f32,
        kind: TileKind,
        target: usize,
    },
    Label {
        position: ScreenVec,
        depth: f32,
        text: String,
    },
    Marker {
        position: ScreenVec,
        depth: f32,
        kind: MarkerKind,
        target: usize,
    },
}

impl Node {
    const fn depth(&self) -> f32 {
        match self {
            Self::Tile { depth, .. } | Self::Label { depth, .. } | Self::Marker { depth, .. } => {
                *depth
            }
        }
    }
}

/// Isometric scene renderer and interaction engine.
///
/// Constructed and disposed explicitly by its owner; holds no global state,
/// so repeated mount/unmount cycles cannot leak.
pub struct ForestScene {
    world: Option<Arc<World>>,
    camera: Camera,
    gesture: GestureTracker,
    nodes: Vec<Node>,
    targets: Vec<HitTarget>,
    hovered: Option<usize>,
    placeholder: Option<&'static str>,
    on_select: Option<SelectCallback>,
}

impl ForestScene {
    /// Creates a scene with default tuning. Until the first `set_world` the
    /// scene renders the empty-state notice.
    #[must_use]
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self::with_tuning(
            viewport_width,
            viewport_height,
            CameraTuning::default(),
            crate::input::DRAG_THRESHOLD_PX,
        )
    }

    /// Creates a scene with explicit camera tuning and drag threshold.
    #[must_use]
    pub fn with_tuning(
        viewport_width: f32,
        viewport_height: f32,
        camera: CameraTuning,
        drag_threshold: f32,
    ) -> Self {
        Self {
            world: None,
            camera: Camera::with_tuning(viewport_width, viewport_height, camera),
            gesture: GestureTracker::with_threshold(drag_threshold),
            nodes: Vec::new(),
            targets: Vec::new(),
            hovered: None,
            placeholder: Some(EMPTY_NOTICE),
            on_select: None,
        }
    }

    /// Replaces the snapshot and rebuilds the whole scene from it.
    pub fn set_world(&mut self, world: Arc<World>) {
        self.world = Some(world);
        self.rebuild();
    }

    /// Registers the selection callback. Invoked exactly once per confirmed
    /// click on a hit target; never for drags or empty-space clicks.
    pub fn set_on_select(&mut self, callback: SelectCallback) {
        self.on_select = Some(callback);
    }

    /// The snapshot currently rendered, if any.
    #[must_use]
    pub fn world(&self) -> Option<&Arc<World>> {
        self.world.as_ref()
    }

    /// The camera, for presentation transforms.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Resizes the viewport (does not recenter).
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.camera.set_viewport(width, height);
    }

    /// Number of registered hit targets.
    #[must_use]
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Index of the hovered target, if any. Cosmetic only.
    #[must_use]
    pub const fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Tears the scene down: layout, hit targets, snapshot reference, and
    /// the selection callback are all released.
    pub fn dispose(&mut self) {
        self.nodes.clear();
        self.targets.clear();
        self.world = None;
        self.hovered = None;
        self.placeholder = None;
        self.on_select = None;
        tracing::info!("scene disposed");
    }

    // -------------------------------------------------------------------
    // Input surface
    // -------------------------------------------------------------------

    /// Pointer button pressed at a screen position.
    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.gesture.pointer_down(x, y);
    }

    /// Pointer moved. Pans while dragging; always refreshes the hover state.
    pub fn on_pointer_move(&mut self, x: f32, y: f32, is_down: bool) {
        if let GestureEvent::Pan { dx, dy } = self.gesture.pointer_move(x, y, is_down) {
            self.camera.pan(dx, dy);
        }
        self.update_hover(x, y);
    }

    /// Pointer button released. A release that stayed under the drag
    /// threshold resolves to a selection when it lands on a hit target.
    pub fn on_pointer_up(&mut self, x: f32, y: f32) {
        if let GestureEvent::Click { position } = self.gesture.pointer_up(x, y) {
            let world_pos = self.camera.screen_to_world(position);
            if let Some(index) = hit_test(&self.targets, world_pos) {
                let selection = self.targets[index].selection.clone();
                tracing::info!(
                    "selected {} {}",
                    selection.kind.name(),
                    selection.id.as_str()
                );
                if let Some(callback) = self.on_select.as_mut() {
                    callback(&selection);
                }
            }
        }
    }

    /// Wheel input. Independent of the gesture machine.
    pub fn on_wheel(&mut self, delta_y: f32) {
        self.camera.apply_wheel(delta_y);
    }

    // -------------------------------------------------------------------
    // Output surface
    // -------------------------------------------------------------------

    /// Produces the draw-command list for the current frame, sorted by
    /// painter depth. Safe to call any number of times between rebuilds.
    #[must_use]
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        if let Some(text) = self.placeholder {
            return vec![DrawCommand::Notice {
                text: text.to_owned(),
            }];
        }

        self.nodes
            .iter()
            .map(|node| match node {
                Node::Tile {
                    position,
                    depth,
                    kind,
                    target,
                } => DrawCommand::Tile {
                    position: *position,
                    depth: *depth,
                    kind: *kind,
                    hovered: self.hovered == Some(*target),
                },
                Node::Label {
                    position,
                    depth,
                    text,
                } => DrawCommand::Label {
                    position: *position,
                    depth: *depth,
                    text: text.clone(),
                },
                Node::Marker {
                    position,
                    depth,
                    kind,
                    target,
                } => {
                    let hovered = self.hovered == Some(*target);
                    DrawCommand::Marker {
                        position: *position,
                        depth: *depth,
                        kind: *kind,
                        scale: if hovered { MARKER_SCALE_HOVER } else { MARKER_SCALE },
                        hovered,
                    }
                }
            })
            .collect()
    }

    // -------------------------------------------------------------------
    // Rebuild
    // -------------------------------------------------------------------

    fn rebuild(&mut self) {
        self.nodes.clear();
        self.targets.clear();
        self.hovered = None;
        self.placeholder = None;

        let Some(world) = self.world.clone() else {
            self.placeholder = Some(EMPTY_NOTICE);
            return;
        };

        if world.is_empty() {
            self.placeholder = Some(EMPTY_NOTICE);
            tracing::info!("scene rebuilt empty: no lands in snapshot");
            return;
        }

        for land in &world.lands {
            self.spawn_land(land);
        }

        // Stable sort: equal depths keep registration order, so a land's
        // markers stay stacked over its own tile.
        self.nodes
            .sort_by(|a, b| a.depth().total_cmp(&b.depth()));

        self.center_camera(&world);

        tracing::info!(
            "scene rebuilt: {} lands, {} workloads, {} hit targets",
            world.lands.len(),
            world.workload_count(),
            self.targets.len()
        );
    }

    fn spawn_land(&mut self, land: &Land) {
        let position = grid_to_iso(land.grid_x, land.grid_y);
        #[allow(clippy::cast_precision_loss)]
        let depth = (land.grid_x + land.grid_y) as f32;

        let tile_kind = if land.is_manaland {
            TileKind::Manaland
        } else {
            TileKind::Land
        };

        let tile_target = self.targets.len();
        self.targets.push(HitTarget {
            shape: HitShape::Diamond {
                center: position,
                half_width: TILE_WIDTH / 2.0,
                half_height: TILE_HEIGHT / 2.0,
            },
            depth,
            selection: Selection::land(land.id.clone()),
        });
        self.nodes.push(Node::Tile {
            position,
            depth,
            kind: tile_kind,
            target: tile_target,
        });

        self.nodes.push(Node::Label {
            position: ScreenVec::new(position.x, position.y + TILE_HEIGHT / 2.0 + LABEL_GAP),
            depth: depth + LABEL_DEPTH_NUDGE,
            text: land.id.chars().take(LABEL_ID_LEN).collect(),
        });

        let mut offset_y = MARKER_STACK_START;
        for workload in land.workloads() {
            let marker_kind = match &workload.kind {
                WorkloadKind::Tree { .. } => MarkerKind::Tree,
                WorkloadKind::Treehouse { .. } => MarkerKind::Treehouse,
                WorkloadKind::Nim { .. } => MarkerKind::Nim,
            };
            let center = ScreenVec::new(position.x, position.y + offset_y);

            let target = self.targets.len();
            self.targets.push(HitTarget {
                shape: HitShape::Box(Rect::centered(center, MARKER_SIZE, MARKER_SIZE)),
                depth: depth + MARKER_DEPTH_NUDGE,
                selection: Selection::workload(
                    workload.kind.entity_kind(),
                    workload.id.clone(),
                    land.id.clone(),
                ),
            });
            self.nodes.push(Node::Marker {
                position: center,
                depth: depth + MARKER_DEPTH_NUDGE,
                kind: marker_kind,
                target,
            });

            offset_y -= MARKER_SPACING;
        }
    }

    /// Centers the camera on the midpoint of the projected land positions.
    /// Runs once per non-empty rebuild, never continuously.
    fn center_camera(&mut self, world: &World) {
        let mut min_x = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_y = f32::NEG_INFINITY;

        for land in &world.lands {
            let p = grid_to_iso(land.grid_x, land.grid_y);
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        self.camera
            .center_on(ScreenVec::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0));
    }

    fn update_hover(&mut self, x: f32, y: f32) {
        let world_pos = self.camera.screen_to_world(ScreenVec::new(x, y));
        self.hovered = hit_test(&self.targets, world_pos);
    }
}

impl std::fmt::Debug for ForestScene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForestScene")
            .field("lands", &self.world.as_ref().map_or(0, |w| w.lands.len()))
            .field("nodes", &self.nodes.len())
            .field("targets", &self.targets.len())
            .field("hovered", &self.hovered)
            .finish_non_exhaustive()
    }
}
