//! # NimsForest World Model
//!
//! Typed, immutable snapshot of a compute cluster: hosts ("lands"), the
//! workloads running on them ("trees", "treehouses", "nims"), and an
//! aggregate summary. A `World` is the unit of atomic replacement - the
//! viewer never patches one in place, it swaps the whole value.
//!
//! Also home to the isometric grid math and the byte-formatting helper,
//! because every other crate needs them and none of them may pull in a
//! rendering dependency to get them.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bytes;
pub mod iso;
pub mod world;

pub use bytes::format_bytes;
pub use iso::{grid_to_iso, iso_to_grid, ScreenVec, TILE_HEIGHT, TILE_WIDTH};
pub use world::{
    EntityKind, Land, OccupancyBand, Selection, Summary, Workload, WorkloadKind, World,
};
