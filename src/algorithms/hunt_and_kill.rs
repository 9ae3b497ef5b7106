use hashbrown::HashSet;
use rand::seq::SliceRandom as _;
use smallvec::SmallVec;

use crate::{cell::Cell, grid::Grid, progress::ProgressHandle};

use super::{Carver, Random};

/// Random walk with scan-based restarts.
///
/// Walks to uniformly chosen unvisited neighbors until it dead-ends, then
/// hunts: scans the island row-major for the first unvisited cell adjacent
/// to the visited region, links it to one of its visited neighbors, and
/// walks on from there.
#[derive(Debug)]
pub struct HuntAndKill;

impl Carver for HuntAndKill {
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

        loop {
            let unvisited: SmallVec<[Cell; 4]> = grid
                .neighbors(current)
                .into_iter()
                .filter(|cell| !visited.contains(cell))
                .collect();

            if let Some(&next) = unvisited.choose(rng) {
                grid = grid.with_link(current, next);
                visited.insert(next);
                current = next;
            } else {
                // hunt for the first unvisited cell bordering the tree
                let found = island.iter().copied().find_map(|cell| {
                    if visited.contains(&cell) {
                        return None;
                    }
                    let linked_into: SmallVec<[Cell; 4]> = grid
                        .neighbors(cell)
                        .into_iter()
                        .filter(|n| visited.contains(n))
                        .collect();
                    linked_into.choose(rng).map(|&target| (cell, target))
                });

                match found {
                    Some((cell, target)) => {
                        grid = grid.with_link(cell, target);
                        visited.insert(cell);
                        current = cell;
                    }
                    None => break,
                }
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
