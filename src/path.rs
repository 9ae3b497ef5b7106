use std::collections::VecDeque;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::{cell::Cell, grid::Grid};

/// Which relation a traversal expands through.
///
/// `Neighbors` is raw lattice adjacency (pre-carving), `Linked` follows only
/// carved passages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Neighbors,
    Linked,
}

impl Relation {
    pub fn expand(self, grid: &Grid, cell: Cell) -> SmallVec<[Cell; 4]> {
        match self {
            Relation::Neighbors => grid.neighbors(cell),
            Relation::Linked => grid.linked(cell).collect(),
        }
    }
}

/// Breadth-first distance map from `source`.
///
/// Cells unreachable from `source` are absent from the map. With a `goal`,
/// traversal stops once the goal is dequeued; distances assigned up to that
/// point match the full run.
pub fn distances(
    grid: &Grid,
    relation: Relation,
    source: Cell,
    goal: Option<Cell>,
) -> HashMap<Cell, u32> {
    let mut dist = HashMap::new();
    if !grid.contains(source) {
        return dist;
    }

    dist.insert(source, 0);
    let mut frontier = VecDeque::from([source]);

    while let Some(current) = frontier.pop_front() {
        if goal == Some(current) {
            break;
        }

        let next_dist = dist[&current] + 1;
        for next in relation.expand(grid, current) {
            if !dist.contains_key(&next) {
                dist.insert(next, next_dist);
                frontier.push_back(next);
            }
        }
    }

    dist
}

/// Shortest path from `start` to `goal` along carved links, or `None` when
/// the goal is not linked-reachable.
///
/// Runs BFS backward from `goal`, then walks downhill from `start`. Ties are
/// broken by coordinate order, so the result is deterministic for a given
/// grid.
pub fn shortest_path(grid: &Grid, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    if start == goal {
        return grid.contains(start).then(|| vec![start]);
    }

    let to_goal = distances(grid, Relation::Linked, goal, Some(start));
    to_goal.get(&start)?;

    let mut path = vec![start];
    let mut current = start;
    while current != goal {
        let here = to_goal[&current];
        let next = grid
            .linked(current)
            .filter_map(|cell| to_goal.get(&cell).map(|&d| (d, cell)))
            .filter(|&(d, _)| d < here)
            .min()?;

        current = next.1;
        path.push(current);
    }

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor(len: i32) -> Grid {
        let mut grid = Grid::new(1, len).unwrap();
        for col in 0..len - 1 {
            grid = grid.with_link(Cell(0, col), Cell(0, col + 1));
        }
        grid
    }

    #[test]
    fn source_distance_is_zero() {
        let grid = Grid::new(3, 3).unwrap();
        let dist = distances(&grid, Relation::Neighbors, Cell(1, 1), None);
        assert_eq!(dist[&Cell(1, 1)], 0);
        assert_eq!(dist.len(), 9);
        assert_eq!(dist[&Cell(0, 0)], 2);
        assert_eq!(dist[&Cell(2, 2)], 2);
    }

    #[test]
    fn unreachable_cells_are_absent() {
        // two disconnected cells, no links carved
        let grid = Grid::from_cells([Cell(0, 0), Cell(0, 2)]);
        let dist = distances(&grid, Relation::Neighbors, Cell(0, 0), None);
        assert_eq!(dist.len(), 1);
        assert!(!dist.contains_key(&Cell(0, 2)));

        let full = Grid::new(1, 3).unwrap();
        let dist = distances(&full, Relation::Linked, Cell(0, 0), None);
        assert_eq!(dist.len(), 1);
    }

    #[test]
    fn missing_source_gives_empty_map() {
        let grid = Grid::new(2, 2).unwrap();
        assert!(distances(&grid, Relation::Neighbors, Cell(9, 9), None).is_empty());
    }

    #[test]
    fn early_exit_matches_full_run() {
        let grid = corridor(6);
        let full = distances(&grid, Relation::Linked, Cell(0, 0), None);
        let early = distances(&grid, Relation::Linked, Cell(0, 0), Some(Cell(0, 3)));

        for (cell, d) in &early {
            assert_eq!(full[cell], *d);
        }
        assert_eq!(early[&Cell(0, 3)], 3);
    }

    #[test]
    fn shortest_path_walks_the_corridor() {
        let grid = corridor(4);
        let path = shortest_path(&grid, Cell(0, 0), Cell(0, 3)).unwrap();
        assert_eq!(
            path,
            vec![Cell(0, 0), Cell(0, 1), Cell(0, 2), Cell(0, 3)]
        );
    }

    #[test]
    fn shortest_path_distances_step_by_one() {
        let mut grid = Grid::new(3, 3).unwrap();
        // carve a zigzag spanning tree by hand
        for (a, b) in [
            (Cell(0, 0), Cell(0, 1)),
            (Cell(0, 1), Cell(0, 2)),
            (Cell(0, 2), Cell(1, 2)),
            (Cell(1, 2), Cell(1, 1)),
            (Cell(1, 1), Cell(1, 0)),
            (Cell(1, 0), Cell(2, 0)),
            (Cell(2, 0), Cell(2, 1)),
            (Cell(2, 1), Cell(2, 2)),
        ] {
            grid = grid.with_link(a, b);
        }

        let path = shortest_path(&grid, Cell(0, 0), Cell(2, 2)).unwrap();
        let dist = distances(&grid, Relation::Linked, Cell(0, 0), None);
        for pair in path.windows(2) {
            assert_eq!(dist[&pair[1]], dist[&pair[0]] + 1);
        }
        assert_eq!(path.len(), 9);
    }

    #[test]
    fn no_path_between_unlinked_cells() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(shortest_path(&grid, Cell(0, 0), Cell(1, 1)), None);
    }

    #[test]
    fn trivial_path_to_self() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(
            shortest_path(&grid, Cell(1, 0), Cell(1, 0)),
            Some(vec![Cell(1, 0)])
        );
        assert_eq!(shortest_path(&grid, Cell(9, 9), Cell(9, 9)), None);
    }
}
