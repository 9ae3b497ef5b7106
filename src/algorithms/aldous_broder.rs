use hashbrown::HashSet;
use rand::seq::SliceRandom as _;

use crate::{cell::Cell, grid::Grid, progress::ProgressHandle};

use super::{Carver, Random};

/// Uniform spanning tree via unbiased random walk.
///
/// Walks the neighbor relation from a random start, linking into each cell
/// the first time the walk enters it. Statistically uniform over all
/// spanning trees, but the walk has no completion bound, so the stop flag is
/// checked on every step.
#[derive(Debug)]
pub struct AldousBroder;

impl Carver for AldousBroder {
    fn carve(
        &self,
        mut grid: Grid,
        island: &[Cell],
        rng: &mut Random,
        progress: ProgressHandle,
    ) -> Option<Grid> {
        progress.lock().from = island.len();

        let mut current = *island.choose(rng)?;
        let mut visited: HashSet<Cell> = HashSet::with_capacity(island.len());
        visited.insert(current);
        progress.lock().done = 1;

        while visited.len() < island.len() {
            let next = *grid.neighbors(current).choose(rng)?;
            if visited.insert(next) {
                grid = grid.with_link(current, next);
                progress.lock().done = visited.len();
            }
            current = next;

            if progress.is_stopped() {
                return None;
            }
        }

        progress.lock().finish();
        Some(grid)
    }
}
