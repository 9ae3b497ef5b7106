use hashbrown::HashSet;

use crate::{
    cell::Cell,
    grid::Grid,
    path::{self, Relation},
};

/// Partition of the grid's cells into neighbor-connected components.
///
/// Uses physical adjacency, ignoring any carving, so a masked grid reports
/// its disconnected parts before an algorithm runs. Island order is
/// unspecified.
pub fn islands(grid: &Grid) -> Vec<HashSet<Cell>> {
    let mut frontier: HashSet<Cell> = grid.cells().collect();
    let mut parts = Vec::new();

    while let Some(&seed) = frontier.iter().next() {
        let island: HashSet<Cell> = path::distances(grid, Relation::Neighbors, seed, None)
            .into_keys()
            .collect();

        for cell in &island {
            frontier.remove(cell);
        }
        parts.push(island);
    }

    parts
}

/// Islands as row-major sorted cell lists, in a deterministic order.
///
/// Carvers take their island this way so that seeded runs do not depend on
/// hash iteration order.
pub fn sorted_islands(grid: &Grid) -> Vec<Vec<Cell>> {
    let mut parts: Vec<Vec<Cell>> = islands(grid)
        .into_iter()
        .map(|island| {
            let mut cells: Vec<_> = island.into_iter().collect();
            cells.sort();
            cells
        })
        .collect();

    parts.sort_by_key(|island| island.first().copied());
    parts
}
