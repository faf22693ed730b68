//! # NimsForest
//!
//! Isometric cluster-topology viewer. A cluster snapshot (lands carrying
//! tree/treehouse/nim workloads) becomes an isometric tile map with
//! clickable entities, a panning and zooming camera, and a selection
//! surface for a sidebar to consume.
//!
//! ## Crate layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ nimsforest          controller, events, config           │
//! ├──────────────────────────────────────────────────────────┤
//! │ nimsforest_scene    camera, gestures, hit tests, drawing │
//! ├──────────────────────────────────────────────────────────┤
//! │ nimsforest_loader   sources, decoding, refresh ordering  │
//! ├──────────────────────────────────────────────────────────┤
//! │ nimsforest_model    world types, projection, formatting  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The controller is the single entry point for hosts: feed it pointer
//! events and a [`WorldSource`](nimsforest_loader::WorldSource), drain its
//! [`ViewerEvent`]s, and render its draw list.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod controller;
pub mod events;

pub use config::{ConfigError, ViewerConfig};
pub use controller::ForestController;
pub use events::{EventBus, EventReceiver, EventSender, ViewerEvent};

pub use nimsforest_loader as loader;
pub use nimsforest_model as model;
pub use nimsforest_scene as scene;
