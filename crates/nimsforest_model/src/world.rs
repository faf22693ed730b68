//! Cluster snapshot types.
//!
//! These mirror the snapshot wire format one-to-one. Numeric invariants
//! (`ram_allocated <= ram_total`, `cpu_cores > 0`) are expected of producers
//! but never enforced here: a violating snapshot still renders, the numbers
//! are simply shown as given.

use serde::{Deserialize, Serialize};

/// A workload running on a land.
///
/// The wire format tags each entry with a lowercase `type` discriminant and
/// keeps the kind-specific payload flat alongside the common fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    /// Unique, stable workload id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// RAM reserved for this workload, in bytes.
    pub ram_allocated: u64,
    /// Kind discriminant plus kind-specific payload.
    #[serde(flatten)]
    pub kind: WorkloadKind,
}

/// Kind-specific workload payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkloadKind {
    /// General long-running service.
    Tree {
        /// Message subjects the service participates in.
        #[serde(default)]
        subjects: Vec<String>,
    },
    /// Interactive development session.
    Treehouse {
        /// Entry-point script for the session.
        script_path: String,
    },
    /// AI / model-serving task.
    Nim {
        /// Whether inference is currently enabled.
        #[serde(default)]
        ai_enabled: bool,
        /// Model identifier, when one is loaded.
        #[serde(default)]
        model: Option<String>,
    },
}

impl WorkloadKind {
    /// Maps the payload to its entity kind.
    #[must_use]
    pub const fn entity_kind(&self) -> EntityKind {
        match self {
            Self::Tree { .. } => EntityKind::Tree,
            Self::Treehouse { .. } => EntityKind::Treehouse,
            Self::Nim { .. } => EntityKind::Nim,
        }
    }
}

/// A physical or virtual host in the cluster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Land {
    /// Unique land id.
    pub id: String,
    /// Host name.
    pub hostname: String,
    /// Total RAM in bytes.
    pub ram_total: u64,
    /// RAM reserved by workloads, in bytes.
    pub ram_allocated: u64,
    /// CPU core count.
    pub cpu_cores: u32,
    /// CPU base frequency in GHz.
    pub cpu_freq_ghz: f32,
    /// GPU memory in bytes. Present only on manalands.
    #[serde(default)]
    pub gpu_vram: Option<u64>,
    /// GPU throughput in TFLOPs. Present only on manalands.
    #[serde(default)]
    pub gpu_tflops: Option<f32>,
    /// Occupancy as a fraction in `[0, 1]`.
    pub occupancy: f32,
    /// Whether this land has GPU capability.
    pub is_manaland: bool,
    /// Lattice column.
    pub grid_x: i32,
    /// Lattice row.
    pub grid_y: i32,
    /// General services on this land.
    #[serde(default)]
    pub trees: Vec<Workload>,
    /// Interactive sessions on this land.
    #[serde(default)]
    pub treehouses: Vec<Workload>,
    /// AI tasks on this land.
    #[serde(default)]
    pub nims: Vec<Workload>,
}

impl Land {
    /// All workloads in the fixed concatenation order: trees, then
    /// treehouses, then nims. This order is load-bearing for marker stacking.
    pub fn workloads(&self) -> impl Iterator<Item = &Workload> {
        self.trees
            .iter()
            .chain(self.treehouses.iter())
            .chain(self.nims.iter())
    }

    /// Total workload count across all three collections.
    #[must_use]
    pub fn workload_count(&self) -> usize {
        self.trees.len() + self.treehouses.len() + self.nims.len()
    }

    /// Finds a workload on this land by id.
    #[must_use]
    pub fn workload(&self, id: &str) -> Option<&Workload> {
        self.workloads().find(|w| w.id == id)
    }

    /// Occupancy scaled to `[0, 100]` for display and thresholds.
    #[must_use]
    pub fn occupancy_percent(&self) -> f32 {
        self.occupancy * 100.0
    }

    /// Load band of this land's occupancy.
    #[must_use]
    pub fn occupancy_band(&self) -> OccupancyBand {
        OccupancyBand::of_percent(self.occupancy_percent())
    }
}

/// Load classification of an occupancy value, for gauge coloring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OccupancyBand {
    /// Below 50%.
    Low,
    /// 50% to below 80%.
    Elevated,
    /// 80% and up.
    Critical,
}

impl OccupancyBand {
    /// Classifies a percentage value.
    #[must_use]
    pub fn of_percent(percent: f32) -> Self {
        if percent < 50.0 {
            Self::Low
        } else if percent < 80.0 {
            Self::Elevated
        } else {
            Self::Critical
        }
    }
}

/// Aggregate totals for a snapshot. Supplied by the producer and trusted as
/// given - never recomputed on the viewer side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of lands.
    pub land_count: u32,
    /// Number of manalands among them.
    pub manaland_count: u32,
    /// Number of trees across the cluster.
    pub tree_count: u32,
    /// Number of treehouses across the cluster.
    pub treehouse_count: u32,
    /// Number of nims across the cluster.
    pub nim_count: u32,
    /// Total RAM across the cluster, in bytes.
    pub total_ram: u64,
    /// Reserved RAM across the cluster, in bytes.
    pub ram_allocated: u64,
    /// Cluster-wide occupancy as a fraction in `[0, 1]`.
    pub occupancy: f32,
}

impl Summary {
    /// Occupancy scaled to `[0, 100]` for display and thresholds.
    #[must_use]
    pub fn occupancy_percent(&self) -> f32 {
        self.occupancy * 100.0
    }

    /// Load band of the cluster-wide occupancy.
    #[must_use]
    pub fn occupancy_band(&self) -> OccupancyBand {
        OccupancyBand::of_percent(self.occupancy_percent())
    }
}

/// A full cluster snapshot: all lands plus the aggregate summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Lands in producer order. Render order follows this order.
    pub lands: Vec<Land>,
    /// Aggregate totals.
    pub summary: Summary,
}

impl World {
    /// Returns true when the snapshot holds no lands at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lands.is_empty()
    }

    /// Finds a land by id.
    #[must_use]
    pub fn land(&self, id: &str) -> Option<&Land> {
        self.lands.iter().find(|l| l.id == id)
    }

    /// Finds a workload anywhere in the cluster, returning its land too.
    #[must_use]
    pub fn workload(&self, id: &str) -> Option<(&Land, &Workload)> {
        self.lands
            .iter()
            .find_map(|land| land.workload(id).map(|w| (land, w)))
    }

    /// Finds a workload on a specific land.
    #[must_use]
    pub fn workload_on(&self, land_id: &str, id: &str) -> Option<(&Land, &Workload)> {
        let land = self.land(land_id)?;
        land.workload(id).map(|w| (land, w))
    }

    /// Total workload count across all lands.
    #[must_use]
    pub fn workload_count(&self) -> usize {
        self.lands.iter().map(Land::workload_count).sum()
    }
}

/// What category of entity a selection points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A host tile.
    Land,
    /// A general service marker.
    Tree,
    /// An interactive session marker.
    Treehouse,
    /// An AI task marker.
    Nim,
}

impl EntityKind {
    /// Lowercase display name matching the wire discriminant.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Land => "land",
            Self::Tree => "tree",
            Self::Treehouse => "treehouse",
            Self::Nim => "nim",
        }
    }
}

/// The currently selected entity, as reported by a confirmed click.
///
/// `land_id` is carried for workload selections even though workload ids are
/// globally unique, so downstream lookups need no cluster-wide scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Entity category.
    pub kind: EntityKind,
    /// Entity id.
    pub id: String,
    /// Owning land, for workload selections.
    pub land_id: Option<String>,
}

impl Selection {
    /// Selection of a land tile.
    #[must_use]
    pub fn land(id: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Land,
            id: id.into(),
            land_id: None,
        }
    }

    /// Selection of a workload marker.
    #[must_use]
    pub fn workload(kind: EntityKind, id: impl Into<String>, land_id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            land_id: Some(land_id.into()),
        }
    }

    /// Whether this selection still points at a live entity in `world`.
    #[must_use]
    pub fn resolves_in(&self, world: &World) -> bool {
        match self.kind {
            EntityKind::Land => world.land(&self.id).is_some(),
            _ => {
                let found = match &self.land_id {
                    Some(land_id) => world.workload_on(land_id, &self.id),
                    None => world.workload(&self.id),
                };
                found.is_some_and(|(_, w)| w.kind.entity_kind() == self.kind)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(id: &str) -> Workload {
        Workload {
            id: id.to_owned(),
            name: format!("{id}-svc"),
            ram_allocated: 2_000_000_000,
            kind: WorkloadKind::Tree {
                subjects: vec!["http".to_owned()],
            },
        }
    }

    fn nim(id: &str) -> Workload {
        Workload {
            id: id.to_owned(),
            name: format!("{id}-infer"),
            ram_allocated: 4_000_000_000,
            kind: WorkloadKind::Nim {
                ai_enabled: true,
                model: Some("llama-3.1-8b".to_owned()),
            },
        }
    }

    fn land(id: &str, gx: i32, gy: i32) -> Land {
        Land {
            id: id.to_owned(),
            hostname: format!("{id}.local"),
            ram_total: 32_000_000_000,
            ram_allocated: 12_000_000_000,
            cpu_cores: 8,
            cpu_freq_ghz: 3.6,
            gpu_vram: None,
            gpu_tflops: None,
            occupancy: 0.375,
            is_manaland: false,
            grid_x: gx,
            grid_y: gy,
            trees: vec![tree(&format!("{id}-t1")), tree(&format!("{id}-t2"))],
            treehouses: Vec::new(),
            nims: vec![nim(&format!("{id}-n1"))],
        }
    }

    fn world() -> World {
        World {
            lands: vec![land("land-1", 0, 0), land("land-2", 1, 0)],
            summary: Summary {
                land_count: 2,
                manaland_count: 0,
                tree_count: 4,
                treehouse_count: 0,
                nim_count: 2,
                total_ram: 64_000_000_000,
                ram_allocated: 24_000_000_000,
                occupancy: 0.375,
            },
        }
    }

    #[test]
    fn occupancy_is_a_fraction() {
        // Pinned unit convention: snapshots carry a fraction, display scales.
        let w = world();
        assert!((w.summary.occupancy_percent() - 37.5).abs() < 1e-6);
        assert!((w.lands[0].occupancy_percent() - 37.5).abs() < 1e-6);
    }

    #[test]
    fn occupancy_band_boundaries() {
        assert_eq!(OccupancyBand::of_percent(37.5), OccupancyBand::Low);
        assert_eq!(OccupancyBand::of_percent(49.9), OccupancyBand::Low);
        assert_eq!(OccupancyBand::of_percent(50.0), OccupancyBand::Elevated);
        assert_eq!(OccupancyBand::of_percent(79.9), OccupancyBand::Elevated);
        assert_eq!(OccupancyBand::of_percent(80.0), OccupancyBand::Critical);
        assert_eq!(OccupancyBand::of_percent(120.0), OccupancyBand::Critical);
    }

    #[test]
    fn workload_iteration_order_is_trees_treehouses_nims() {
        let mut l = land("land-9", 0, 0);
        l.treehouses.push(Workload {
            id: "land-9-h1".to_owned(),
            name: "lab".to_owned(),
            ram_allocated: 1_000_000_000,
            kind: WorkloadKind::Treehouse {
                script_path: "/notebooks/lab.ipynb".to_owned(),
            },
        });
        let order: Vec<_> = l.workloads().map(|w| w.id.as_str()).collect();
        assert_eq!(order, ["land-9-t1", "land-9-t2", "land-9-h1", "land-9-n1"]);
    }

    #[test]
    fn selection_resolution() {
        let w = world();
        assert!(Selection::land("land-1").resolves_in(&w));
        assert!(!Selection::land("land-404").resolves_in(&w));

        let sel = Selection::workload(EntityKind::Nim, "land-2-n1", "land-2");
        assert!(sel.resolves_in(&w));

        // Wrong kind for an existing id does not resolve.
        let sel = Selection::workload(EntityKind::Tree, "land-2-n1", "land-2");
        assert!(!sel.resolves_in(&w));

        // Wrong owning land does not resolve.
        let sel = Selection::workload(EntityKind::Nim, "land-2-n1", "land-1");
        assert!(!sel.resolves_in(&w));
    }

    #[test]
    fn cluster_wide_workload_lookup() {
        let w = world();
        let (l, found) = w.workload("land-1-t2").expect("present");
        assert_eq!(l.id, "land-1");
        assert_eq!(found.name, "land-1-t2-svc");
        assert_eq!(w.workload_count(), 6);
    }
}
