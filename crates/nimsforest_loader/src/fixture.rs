//! Deterministic synthetic clusters, for demos and offline development.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use nimsforest_model::{Land, Summary, Workload, WorkloadKind, World};

use crate::error::SnapshotResult;
use crate::snapshot::WorldSource;

const SERVICE_NAMES: &[&str] = &[
    "gateway", "registry", "scheduler", "mailer", "archive", "relay",
];
const NIM_MODELS: &[&str] = &["sentinel-7b", "sentinel-13b", "forester-3b"];

/// A [`WorldSource`] that fabricates a cluster from a seed.
///
/// The same seed and land count always produce byte-identical worlds, so
/// fixtures are stable across runs and usable in tests.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    seed: u64,
    land_count: u32,
}

impl FixtureSource {
    /// Creates a generator for `land_count` lands from `seed`.
    #[must_use]
    pub const fn new(seed: u64, land_count: u32) -> Self {
        Self { seed, land_count }
    }

    fn generate(&self) -> World {
        let mut rng = StdRng::seed_from_u64(self.seed);
        // Near-square lattice, filled row-major.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let side = (f64::from(self.land_count).sqrt().ceil() as u32).max(1);

        let mut lands = Vec::with_capacity(self.land_count as usize);
        for index in 0..self.land_count {
            let land_id = format!("land-{index}-{:04x}", rng.gen::<u16>());
            let is_manaland = rng.gen_bool(0.25);
            let ram_total: u64 = *[32, 64, 128].get(rng.gen_range(0..3)).unwrap_or(&64)
                * 1_000_000_000;

            let mut trees = Vec::new();
            for t in 0..rng.gen_range(0..=2_u32) {
                trees.push(Workload {
                    id: format!("{land_id}-tree-{t}"),
                    name: (*SERVICE_NAMES
                        .get(rng.gen_range(0..SERVICE_NAMES.len()))
                        .unwrap_or(&"service"))
                    .to_owned(),
                    ram_allocated: rng.gen_range(1..=4) * 1_000_000_000,
                    kind: WorkloadKind::Tree {
                        subjects: vec!["events".to_owned()],
                    },
                });
            }

            let mut treehouses = Vec::new();
            if rng.gen_bool(0.3) {
                treehouses.push(Workload {
                    id: format!("{land_id}-th-0"),
                    name: "workbench".to_owned(),
                    ram_allocated: 2_000_000_000,
                    kind: WorkloadKind::Treehouse {
                        script_path: "/srv/forest/session.sh".to_owned(),
                    },
                });
            }

            let mut nims = Vec::new();
            if is_manaland && rng.gen_bool(0.7) {
                nims.push(Workload {
                    id: format!("{land_id}-nim-0"),
                    name: "inference".to_owned(),
                    ram_allocated: rng.gen_range(4..=16) * 1_000_000_000,
                    kind: WorkloadKind::Nim {
                        ai_enabled: true,
                        model: Some(
                            (*NIM_MODELS
                                .get(rng.gen_range(0..NIM_MODELS.len()))
                                .unwrap_or(&"sentinel-7b"))
                            .to_owned(),
                        ),
                    },
                });
            }

            let ram_allocated: u64 = trees
                .iter()
                .chain(treehouses.iter())
                .chain(nims.iter())
                .map(|w| w.ram_allocated)
                .sum();
            #[allow(clippy::cast_precision_loss)]
            let occupancy = (ram_allocated as f64 / ram_total as f64).min(1.0) as f32;

            #[allow(clippy::cast_possible_wrap)]
            lands.push(Land {
                id: land_id.clone(),
                hostname: format!("{land_id}.forest.local"),
                ram_total,
                ram_allocated,
                cpu_cores: 4 * rng.gen_range(1..=8),
                cpu_freq_ghz: rng.gen_range(2.0..=4.0),
                gpu_vram: is_manaland.then(|| rng.gen_range(8..=48) * 1_000_000_000),
                gpu_tflops: is_manaland.then(|| rng.gen_range(10.0..=90.0)),
                occupancy,
                is_manaland,
                grid_x: (index % side) as i32,
                grid_y: (index / side) as i32,
                trees,
                treehouses,
                nims,
            });
        }

        let summary = summarize(&lands);
        World { lands, summary }
    }
}

/// Computes the cluster summary from the land list. The generator keeps the
/// two consistent by construction.
fn summarize(lands: &[Land]) -> Summary {
    let total_ram: u64 = lands.iter().map(|l| l.ram_total).sum();
    let ram_allocated: u64 = lands.iter().map(|l| l.ram_allocated).sum();
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    Summary {
        land_count: lands.len() as u32,
        manaland_count: lands.iter().filter(|l| l.is_manaland).count() as u32,
        tree_count: lands.iter().map(|l| l.trees.len()).sum::<usize>() as u32,
        treehouse_count: lands.iter().map(|l| l.treehouses.len()).sum::<usize>() as u32,
        nim_count: lands.iter().map(|l| l.nims.len()).sum::<usize>() as u32,
        total_ram,
        ram_allocated,
        occupancy: if total_ram == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            {
                (ram_allocated as f64 / total_ram as f64) as f32
            }
        },
    }
}

impl WorldSource for FixtureSource {
    fn fetch(&mut self) -> SnapshotResult<World> {
        let world = self.generate();
        debug!(
            "generated fixture: seed {}, {} lands",
            self.seed,
            world.lands.len()
        );
        Ok(world)
    }

    fn name(&self) -> &str {
        "fixture"
    }
}
