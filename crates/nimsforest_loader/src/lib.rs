//! # NimsForest Loader
//!
//! Gets cluster snapshots into the viewer: pluggable [`WorldSource`]s,
//! lenient wire decoding, a deterministic fixture generator for offline
//! work, and a monotonic guard that drops out-of-order refresh results.
//!
//! Decoding is strict about lands and the summary but lenient about
//! individual workloads: an element with an unrecognized `type` tag is
//! skipped with a warning rather than failing the whole snapshot, so a
//! newer daemon never blanks the map.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod fixture;
pub mod snapshot;

pub use error::{SnapshotError, SnapshotResult};
pub use fixture::FixtureSource;
pub use snapshot::{decode_world, FileSource, RefreshGuard, RefreshTicket, WorldSource};
