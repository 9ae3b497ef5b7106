use hashbrown::HashSet;
use rand::seq::SliceRandom as _;
use smallvec::SmallVec;

use crate::{cell::Cell, grid::Grid, progress::ProgressHandle};

use super::{Carver, Random};

/// Uniform spanning tree via loop-erased random walks.
///
/// Each walk starts from an unvisited cell and wanders until it hits the
/// visited set, never stepping onto its own trace; the finished walk is
/// carved as a whole. Complements [`super::AldousBroder`]: slow while the
/// visited set is small, fast once it grows.
#[derive(Debug)]
pub struct Wilsons;

impl Carver for Wilsons {
    fn carve(
        &self,
        mut grid: Grid,
        island: &[Cell],
        rng: &mut Random,
        progress: ProgressHandle,
    ) -> Option<Grid> {
        progress.lock().from = island.len();

        let first = *island.choose(rng)?;
        let mut unvisited: HashSet<Cell> = island.iter().copied().collect();
        unvisited.remove(&first);
        progress.lock().done = 1;

        while !unvisited.is_empty() {
            // island order keeps the draw independent of hash iteration order
            let pool: Vec<Cell> = island
                .iter()
                .copied()
                .filter(|cell| unvisited.contains(cell))
                .collect();
            let mut path = vec![*pool.choose(rng)?];

            loop {
                let current = *path.last()?;
                let candidates: SmallVec<[Cell; 4]> = grid
                    .neighbors(current)
                    .into_iter()
                    .filter(|next| !path.contains(next))
                    .collect();

                let Some(&next) = candidates.choose(rng) else {
                    // walk boxed itself in, restart it from its first cell
                    path.truncate(1);
                    continue;
                };

                if unvisited.contains(&next) {
                    path.push(next);
                } else {
                    path.push(next);
                    for pair in path.windows(2) {
                        grid = grid.with_link(pair[0], pair[1]);
                    }
                    for cell in &path {
                        unvisited.remove(cell);
                    }
                    progress.lock().done = island.len() - unvisited.len();
                    break;
                }

                if progress.is_stopped() {
                    return None;
                }
            }
        }

        progress.lock().finish();
        Some(grid)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::algorithms::test_support::{assert_spanning_tree, carve_seeded};

    #[test]
    fn carves_a_spanning_tree() {
        let grid = Grid::new(6, 6).unwrap();
        let carved = carve_seeded(Arc::new(Wilsons), &grid, 42);
        assert_spanning_tree(&carved);
    }

    #[test]
    fn handles_narrow_masked_shapes() {
        // an L-shaped corridor forces plenty of loop erasure restarts
        let grid = Grid::from_cells(
            (0..6)
                .map(|row| Cell(row, 0))
                .chain((1..5).map(|col| Cell(5, col))),
        );
        let carved = carve_seeded(Arc::new(Wilsons), &grid, 3);
        assert_spanning_tree(&carved);
    }

    #[test]
    fn two_cell_island_gets_one_link() {
        let grid = Grid::from_cells([Cell(0, 0), Cell(0, 1)]);
        let carved = carve_seeded(Arc::new(Wilsons), &grid, 9);
        assert_eq!(carved.link_count(), 1);
        assert!(carved.is_linked(Cell(0, 0), Cell(0, 1)));
    }
}
