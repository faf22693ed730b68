//! # NimsForest Scene Engine
//!
//! Renders a cluster snapshot as an isometric tile map and resolves pointer
//! input against it.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      SCENE PIPELINE                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  World Snapshot → Layout → Depth Sort → Draw Commands        │
//! │        ↓             ↓                       ↑               │
//! │  Pointer Events → Gesture Machine → Camera / Hit Test        │
//! │                                          ↓                   │
//! │                                   Selection Callback         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is headless: it never touches a window or a GPU. It consumes
//! `on_pointer_down` / `on_pointer_move` / `on_pointer_up` / `on_wheel` and
//! produces a depth-sorted [`DrawCommand`](draw::DrawCommand) list plus
//! selection notifications. A snapshot replaces the scene wholesale; there
//! is deliberately no incremental diffing at cluster-map scale.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod camera;
pub mod draw;
pub mod hit;
pub mod input;
pub mod scene;
pub mod style;

pub use camera::{Camera, CameraTuning};
pub use draw::{DrawCommand, MarkerKind, TileKind};
pub use hit::{hit_test, HitShape, HitTarget, Rect};
pub use input::{GestureEvent, GesturePhase, GestureTracker};
pub use scene::{ForestScene, SelectCallback};
pub use style::{occupancy_color, Color};
