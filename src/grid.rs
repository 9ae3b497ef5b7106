use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::{
    cell::{Cell, Direction},
    dims::Dims,
    error::MazeError,
};

/// Cell universe plus the carved link relation.
///
/// The set of cells is fixed at construction (full rectangle or an explicit
/// mask); carving only ever touches `links`. Mutation goes through [`Grid::link`]
/// (copy-on-write) or [`Grid::with_link`] (by value), both of which keep the
/// relation mirrored, so callers can hold earlier snapshots without them being
/// invalidated by later carving.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    size: Dims,
    cells: HashSet<Cell>,
    links: HashMap<Cell, HashSet<Cell>>,
}

impl Grid {
    /// Full rectangular grid with no links.
    pub fn new(rows: i32, cols: i32) -> Result<Self, MazeError> {
        let size = Dims(rows, cols);
        if !size.all_positive() {
            return Err(MazeError::InvalidDimensions(size));
        }

        Ok(Self {
            size,
            cells: Cell::iter_fill(Cell::ZERO, Cell(rows, cols)).collect(),
            links: HashMap::new(),
        })
    }

    /// Masked grid from an explicit cell set; size is inferred from the
    /// maximal coordinates. Negative coordinates are discarded.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let cells: HashSet<Cell> = cells
            .into_iter()
            .filter(|cell| cell.all_non_negative())
            .collect();

        let size = cells.iter().fold(Dims::ZERO, |size, cell| {
            Dims(size.0.max(cell.0 + 1), size.1.max(cell.1 + 1))
        });

        Self {
            size,
            cells,
            links: HashMap::new(),
        }
    }

    pub fn size(&self) -> Dims {
        self.size
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.in_bounds(self.size) && self.cells.contains(&cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Existing lattice neighbors of `cell`, in fixed direction order.
    pub fn neighbors(&self, cell: Cell) -> SmallVec<[Cell; 4]> {
        Direction::get_in_order()
            .into_iter()
            .map(|dir| cell + dir)
            .filter(|pos| self.contains(*pos))
            .collect()
    }

    /// New grid with `a` and `b` linked both ways. No-op when the cells are
    /// already linked, equal, or not part of the grid.
    pub fn link(&self, a: Cell, b: Cell) -> Grid {
        self.clone().with_link(a, b)
    }

    /// By-value variant of [`Grid::link`] for callers that own the grid and
    /// thread it through a carving loop.
    pub fn with_link(mut self, a: Cell, b: Cell) -> Grid {
        if a == b || !self.contains(a) || !self.contains(b) {
            return self;
        }

        self.links.entry(a).or_default().insert(b);
        self.links.entry(b).or_default().insert(a);
        self
    }

    /// Cells linked to `cell`; empty when none.
    pub fn linked(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        self.links.get(&cell).into_iter().flatten().copied()
    }

    pub fn is_linked(&self, a: Cell, b: Cell) -> bool {
        self.links.get(&a).is_some_and(|set| set.contains(&b))
    }

    /// Number of bidirectional link pairs.
    pub fn link_count(&self) -> usize {
        self.links.values().map(|set| set.len()).sum::<usize>() / 2
    }

    /// Every link pair once, with the smaller endpoint first.
    pub fn link_pairs(&self) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        self.links
            .iter()
            .flat_map(|(&a, set)| set.iter().map(move |&b| (a, b)))
            .filter(|(a, b)| a < b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_non_positive_dimensions() {
        assert_eq!(
            Grid::new(0, 4).unwrap_err(),
            MazeError::InvalidDimensions(Dims(0, 4))
        );
        assert_eq!(
            Grid::new(3, -1).unwrap_err(),
            MazeError::InvalidDimensions(Dims(3, -1))
        );
    }

    #[test]
    fn new_fills_rectangle() {
        let grid = Grid::new(3, 4).unwrap();
        assert_eq!(grid.size(), Dims(3, 4));
        assert_eq!(grid.cell_count(), 12);
        assert_eq!(grid.link_count(), 0);
        assert!(grid.contains(Cell(2, 3)));
        assert!(!grid.contains(Cell(3, 0)));
    }

    #[test]
    fn from_cells_infers_size() {
        // plus-shaped mask on a 3x3 universe
        let grid = Grid::from_cells([Cell(0, 1), Cell(1, 0), Cell(1, 1), Cell(1, 2), Cell(2, 1)]);
        assert_eq!(grid.size(), Dims(3, 3));
        assert_eq!(grid.cell_count(), 5);
        assert!(grid.contains(Cell(1, 2)));
        assert!(!grid.contains(Cell(0, 0)));
        assert!(!grid.contains(Cell(2, 2)));
    }

    #[test]
    fn from_cells_drops_negative_coordinates() {
        let grid = Grid::from_cells([Cell(-1, 0), Cell(0, 0)]);
        assert_eq!(grid.cell_count(), 1);
        assert_eq!(grid.size(), Dims(1, 1));
    }

    #[test]
    fn neighbors_respect_bounds_and_mask() {
        let grid = Grid::new(2, 2).unwrap();
        let n = grid.neighbors(Cell(0, 0));
        assert_eq!(n.as_slice(), &[Cell(1, 0), Cell(0, 1)]);

        let masked = Grid::from_cells([Cell(0, 1), Cell(1, 0), Cell(1, 1), Cell(1, 2), Cell(2, 1)]);
        let n = masked.neighbors(Cell(1, 1));
        assert_eq!(n.len(), 4);
        let n = masked.neighbors(Cell(0, 1));
        assert_eq!(n.as_slice(), &[Cell(1, 1)]);
    }

    #[test]
    fn link_is_symmetric_and_leaves_original_untouched() {
        let grid = Grid::new(2, 2).unwrap();
        let carved = grid.link(Cell(0, 0), Cell(0, 1));

        assert!(carved.is_linked(Cell(0, 0), Cell(0, 1)));
        assert!(carved.is_linked(Cell(0, 1), Cell(0, 0)));
        assert!(!grid.is_linked(Cell(0, 0), Cell(0, 1)));
    }

    #[test]
    fn link_is_idempotent() {
        let grid = Grid::new(2, 2).unwrap();
        let once = grid.link(Cell(0, 0), Cell(0, 1));
        let twice = once.link(Cell(0, 1), Cell(0, 0));
        assert_eq!(once, twice);
        assert_eq!(twice.link_count(), 1);
    }

    #[test]
    fn link_ignores_missing_cells_and_self_links() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(grid.link(Cell(0, 0), Cell(5, 5)).link_count(), 0);
        assert_eq!(grid.link(Cell(0, 0), Cell(0, 0)).link_count(), 0);
    }

    #[test]
    fn link_pairs_yield_each_pair_once() {
        let grid = Grid::new(2, 2)
            .unwrap()
            .with_link(Cell(0, 0), Cell(0, 1))
            .with_link(Cell(0, 1), Cell(1, 1));

        let mut pairs: Vec<_> = grid.link_pairs().collect();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![(Cell(0, 0), Cell(0, 1)), (Cell(0, 1), Cell(1, 1))]
        );
    }
}
