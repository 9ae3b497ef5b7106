use hashbrown::HashSet;
use rand::seq::SliceRandom as _;
use smallvec::SmallVec;

use crate::{cell::Cell, grid::Grid, progress::ProgressHandle};

use super::{Carver, Random};

/// Randomized depth-first carving with explicit backtracking.
///
/// Keeps its own stack instead of recursing, so deep corridors on large
/// grids cannot exhaust the call stack. A cell's candidates are re-filtered
/// at the moment it is on top of the stack, which skips neighbors already
/// linked by a deeper branch.
#[derive(Debug)]
pub struct Backtracker;

impl Carver for Backtracker {
    fn carve(
        &self,
        mut grid: Grid,
        island: &[Cell],
        rng: &mut Random,
        progress: ProgressHandle,
    ) -> Option<Grid> {
        progress.lock().from = island.len();

        let start = *island.choose(rng)?;
        let mut visited: HashSet<Cell> = HashSet::with_capacity(island.len());
        let mut stack = Vec::new();

        visited.insert(start);
        stack.push(start);

        while let Some(current) = stack.pop() {
            let unvisited: SmallVec<[Cell; 4]> = grid
                .neighbors(current)
                .into_iter()
                .filter(|cell| !visited.contains(cell))
                .collect();

            if let Some(&next) = unvisited.choose(rng) {
                stack.push(current);
                grid = grid.with_link(current, next);
                visited.insert(next);
                stack.push(next);
            }

            progress.lock().done = visited.len();
            if progress.is_stopped() {
                return None;
            }
        }

        progress.lock().finish();
        Some(grid)
    }
}
