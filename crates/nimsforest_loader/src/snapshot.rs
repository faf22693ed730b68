//! Snapshot sources and wire decoding.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{debug, warn};

use nimsforest_model::{Land, Summary, Workload, World};

use crate::error::{SnapshotError, SnapshotResult};

/// A place snapshots come from. The controller polls one of these; swapping
/// implementations swaps live daemon, file replay, or synthetic data.
pub trait WorldSource {
    /// Fetches one snapshot. A failed fetch must leave the source reusable.
    fn fetch(&mut self) -> SnapshotResult<World>;

    /// Human-readable source name, for logs.
    fn name(&self) -> &str;
}

/// Reads snapshots from a JSON file on disk. Re-reads on every fetch, so a
/// file updated in place behaves like a polled endpoint.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    /// Creates a source backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }
}

impl WorldSource for FileSource {
    fn fetch(&mut self) -> SnapshotResult<World> {
        let bytes = std::fs::read(&self.path)?;
        decode_world(&bytes)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// Wire mirrors: identical to the model except workload arrays stay raw so a
// single unknown element cannot poison the land it sits on.

#[derive(Deserialize)]
struct WireWorld {
    lands: Vec<WireLand>,
    summary: Summary,
}

#[derive(Deserialize)]
struct WireLand {
    id: String,
    hostname: String,
    ram_total: u64,
    ram_allocated: u64,
    cpu_cores: u32,
    cpu_freq_ghz: f32,
    #[serde(default)]
    gpu_vram: Option<u64>,
    #[serde(default)]
    gpu_tflops: Option<f32>,
    occupancy: f32,
    is_manaland: bool,
    grid_x: i32,
    grid_y: i32,
    #[serde(default)]
    trees: Vec<serde_json::Value>,
    #[serde(default)]
    treehouses: Vec<serde_json::Value>,
    #[serde(default)]
    nims: Vec<serde_json::Value>,
}

fn decode_workloads(land_id: &str, slot: &str, raw: Vec<serde_json::Value>) -> Vec<Workload> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<Workload>(value) {
            Ok(workload) => Some(workload),
            Err(err) => {
                warn!("skipping unrecognized workload in {land_id}/{slot}: {err}");
                None
            }
        })
        .collect()
}

/// Decodes a snapshot document.
///
/// Lands and the summary are mandatory and strictly typed; a malformed land
/// fails the whole decode. Workload elements are decoded one by one and
/// unrecognized ones are dropped with a warning.
///
/// # Errors
///
/// Returns [`SnapshotError::Parse`] when the document is not valid JSON or
/// its mandatory structure does not match.
pub fn decode_world(bytes: &[u8]) -> SnapshotResult<World> {
    let wire: WireWorld = serde_json::from_slice(bytes)?;

    let lands = wire
        .lands
        .into_iter()
        .map(|land| Land {
            trees: decode_workloads(&land.id, "trees", land.trees),
            treehouses: decode_workloads(&land.id, "treehouses", land.treehouses),
            nims: decode_workloads(&land.id, "nims", land.nims),
            id: land.id,
            hostname: land.hostname,
            ram_total: land.ram_total,
            ram_allocated: land.ram_allocated,
            cpu_cores: land.cpu_cores,
            cpu_freq_ghz: land.cpu_freq_ghz,
            gpu_vram: land.gpu_vram,
            gpu_tflops: land.gpu_tflops,
            occupancy: land.occupancy,
            is_manaland: land.is_manaland,
            grid_x: land.grid_x,
            grid_y: land.grid_y,
        })
        .collect::<Vec<_>>();

    debug!("decoded snapshot: {} lands", lands.len());
    Ok(World {
        lands,
        summary: wire.summary,
    })
}

/// Ticket handed out for one refresh attempt. Opaque outside this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket(u64);

/// Serializes overlapping refreshes: results must apply in request order.
///
/// Each refresh takes a ticket up front; when its result arrives, `complete`
/// either admits it or reports it stale because a later request already
/// landed. The viewer never moves backwards in time.
#[derive(Debug, Default)]
pub struct RefreshGuard {
    issued: u64,
    applied: u64,
}

impl RefreshGuard {
    /// Creates a guard with no outstanding refreshes.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            issued: 0,
            applied: 0,
        }
    }

    /// Registers a new refresh attempt and returns its ticket.
    pub fn begin(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Admits a completed refresh, or rejects it as stale.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Stale`] when a refresh requested after this
    /// one has already been applied.
    pub fn complete(&mut self, ticket: RefreshTicket) -> SnapshotResult<()> {
        if ticket.0 <= self.applied {
            return Err(SnapshotError::Stale {
                got: ticket.0,
                newest: self.applied,
            });
        }
        self.applied = ticket.0;
        Ok(())
    }
}
