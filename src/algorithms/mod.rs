mod aldous_broder;
mod backtracker;
mod binary_tree;
mod hunt_and_kill;
mod sidewinder;
mod wilsons;

use std::{fmt, str::FromStr, sync::Arc};

use hashbrown::HashMap;
use rand::{thread_rng, Rng as _, SeedableRng as _};
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

use crate::{
    cell::Cell,
    error::MazeError,
    grid::Grid,
    islands::sorted_islands,
    progress::ProgressHandle,
    registry::Registry,
};

pub use aldous_broder::AldousBroder;
pub use backtracker::Backtracker;
pub use binary_tree::{Bias, BinaryTree};
pub use hunt_and_kill::HuntAndKill;
pub use sidewinder::Sidewinder;
pub use wilsons::Wilsons;

/// Random number generator used for anything where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Registry of the carving algorithms.
pub type CarverRegistry = Registry<dyn Carver>;

/// A maze-carving strategy operating on a single island.
///
/// `island` is the row-major sorted cell list of one neighbor-connected
/// component of `grid`; the carver adds links until the island's cells form
/// a spanning tree and returns the resulting grid. Returns `None` when the
/// run was stopped through the progress handle.
pub trait Carver: fmt::Debug + Sync + Send {
    fn carve(
        &self,
        grid: Grid,
        island: &[Cell],
        rng: &mut Random,
        progress: ProgressHandle,
    ) -> Option<Grid>;

    fn guess_progress_complexity(&self, island_len: usize) -> usize {
        island_len
    }
}

/// String-keyed options for algorithms constructed by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params {
    map: HashMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.map.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn parsed<T: FromStr>(&self, key: &str) -> Option<Result<T, T::Err>> {
        self.get(key).map(|s| s.parse())
    }

    pub fn parsed_or<T: FromStr>(&self, key: &str, default: T) -> T {
        match self.parsed(key) {
            None | Some(Err(_)) => default,
            Some(Ok(v)) => v,
        }
    }

    pub fn parsed_or_warn<T: FromStr>(&self, key: &str, default: T) -> T {
        match self.parsed(key) {
            None => default,
            Some(Ok(v)) => v,
            Some(Err(_)) => {
                log::warn!("invalid value for parameter '{}', using default", key);
                default
            }
        }
    }
}

/// Carver registry with every built-in algorithm under its canonical name.
pub fn default_registry() -> CarverRegistry {
    let mut registry = CarverRegistry::with_default(Arc::new(Backtracker));
    registry.register("aldous_broder".into(), Arc::new(AldousBroder));
    registry.register("wilsons".into(), Arc::new(Wilsons));
    registry.register("backtracker".into(), Arc::new(Backtracker));
    registry.register("binary_tree".into(), Arc::new(BinaryTree::default()));
    registry.register("sidewinder".into(), Arc::new(Sidewinder::default()));
    registry.register("hunt_and_kill".into(), Arc::new(HuntAndKill));
    registry
}

/// Runs a carver over every island of a grid.
///
/// Islands are discovered up front and carved independently, so masked,
/// disconnected grids come out with one spanning tree per island. With
/// [`Generator::parallel`], islands are carved on rayon workers, each with
/// its own long-jumped RNG stream, and the carved links merged afterward.
#[derive(Clone)]
pub struct Generator {
    carver: Arc<dyn Carver>,
    seed: Option<u64>,
    parallel: bool,
}

impl Generator {
    pub fn new(carver: Arc<dyn Carver>) -> Self {
        Self {
            carver,
            seed: None,
            parallel: false,
        }
    }

    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn generate(&self, grid: &Grid, progress: ProgressHandle) -> Result<Grid, MazeError> {
        let seed = self.seed.unwrap_or_else(|| thread_rng().gen());
        log::debug!("carving with seed {}", seed);
        let mut rng = Random::seed_from_u64(seed);

        let islands = sorted_islands(grid);

        let out = if self.parallel && islands.len() > 1 {
            let rngs = split_rng(&mut rng, islands.len());
            let progresses: Vec<_> = islands
                .iter()
                .map(|island| {
                    let local = progress.split();
                    local.lock().from = self.carver.guess_progress_complexity(island.len());
                    local
                })
                .collect();

            let carved: Vec<Grid> = islands
                .into_par_iter()
                .zip(rngs)
                .zip(progresses)
                .map(|((island, mut rng), local)| {
                    self.carver.carve(grid.clone(), &island, &mut rng, local)
                })
                .collect::<Option<_>>()
                .ok_or(MazeError::Stopped)?;

            // islands are disjoint, so replaying each part's links cannot clash
            let mut merged = grid.clone();
            for part in carved {
                for (a, b) in part.link_pairs() {
                    merged = merged.with_link(a, b);
                }
            }
            merged
        } else {
            let mut out = grid.clone();
            for island in &islands {
                out = self
                    .carver
                    .carve(out, island, &mut rng, progress.split())
                    .ok_or(MazeError::Stopped)?;
            }
            out
        };

        progress.lock().finish();
        Ok(out)
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("carver", &self.carver)
            .field("seed", &self.seed)
            .field("parallel", &self.parallel)
            .finish()
    }
}

fn split_rng(rng: &mut Random, count: usize) -> Vec<Random> {
    (0..count)
        .map(|_| {
            rng.long_jump();
            rng.clone()
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressHandle;

    #[test]
    fn default_registry_knows_all_algorithms() {
        let registry = default_registry();
        for name in [
            "aldous_broder",
            "wilsons",
            "backtracker",
            "binary_tree",
            "sidewinder",
            "hunt_and_kill",
        ] {
            assert!(registry.is_registered(name), "{name} missing");
        }
        assert!(registry.get_default().is_some());
        assert!(!registry.is_registered("kruskals"));
    }

    #[test]
    fn generator_is_deterministic_for_a_seed() {
        let grid = Grid::new(8, 8).unwrap();
        let generator = Generator::new(Arc::new(Backtracker)).seeded(77);

        let a = generator.generate(&grid, ProgressHandle::new()).unwrap();
        let b = generator.generate(&grid, ProgressHandle::new()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn generator_carves_every_island() {
        // two disconnected 2x2 blocks
        let grid = Grid::from_cells([
            Cell(0, 0),
            Cell(0, 1),
            Cell(1, 0),
            Cell(1, 1),
            Cell(0, 3),
            Cell(0, 4),
            Cell(1, 3),
            Cell(1, 4),
        ]);

        let carved = Generator::new(Arc::new(Backtracker))
            .seeded(5)
            .generate(&grid, ProgressHandle::new())
            .unwrap();

        crate::algorithms::test_support::assert_spanning_tree(&carved);
        // the gap stays uncarved
        assert!(!carved.is_linked(Cell(0, 1), Cell(0, 2)));
    }

    #[test]
    fn parallel_generation_matches_contract() {
        let grid = Grid::from_cells(
            // three single-row islands
            (0..3).flat_map(|i| (0..4).map(move |c| Cell(i * 2, c))),
        );

        let carved = Generator::new(Arc::new(Wilsons))
            .seeded(11)
            .parallel(true)
            .generate(&grid, ProgressHandle::new())
            .unwrap();

        crate::algorithms::test_support::assert_spanning_tree(&carved);
    }

    #[test]
    fn stopped_generation_reports_stopped() {
        let grid = Grid::new(6, 6).unwrap();
        let progress = ProgressHandle::new();
        progress.stop();

        let result = Generator::new(Arc::new(Backtracker))
            .seeded(1)
            .generate(&grid, progress);
        assert_eq!(result.unwrap_err(), MazeError::Stopped);
    }

    #[test]
    fn params_parse_and_warn() {
        let mut params = Params::new();
        params.set("weight", "0.25");
        params.set("bad", "abc");

        assert_eq!(params.parsed_or("weight", 0.5f64), 0.25);
        assert_eq!(params.parsed_or("missing", 7i32), 7);
        assert_eq!(params.parsed_or_warn("bad", 3i32), 3);
    }
}
