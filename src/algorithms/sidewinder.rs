use rand::{seq::SliceRandom as _, Rng as _};
use smallvec::SmallVec;

use crate::{
    cell::{Cell, Direction},
    error::MazeError,
    grid::Grid,
    progress::ProgressHandle,
};

use super::{Carver, Params, Random};

/// Row-by-row run carving.
///
/// Cells of a row are grouped left to right into runs: each cell extends its
/// run eastward with probability `weight`, and a closing run links one of its
/// cells north. Top-row cells have nothing above them and always extend, a
/// missing eastern neighbor always closes. Like [`super::BinaryTree`], the
/// spanning-tree guarantee needs rectangular islands; a masked run with no
/// row above it gets no vertical link.
#[derive(Debug)]
pub struct Sidewinder {
    weight: f64,
}

impl Default for Sidewinder {
    fn default() -> Self {
        Self { weight: 0.5 }
    }
}

impl Sidewinder {
    /// `weight` is the probability of extending a run eastward; must lie in
    /// `[0, 1]`.
    pub fn new(weight: f64) -> Result<Self, MazeError> {
        if !(0.0..=1.0).contains(&weight) {
            return Err(MazeError::invalid_option(
                "weight",
                format!("weight {weight} outside [0, 1]"),
            ));
        }
        Ok(Self { weight })
    }

    pub fn from_params(params: &Params) -> Result<Self, MazeError> {
        match params.get("weight") {
            None => Ok(Self::default()),
            Some(raw) => {
                let weight: f64 = raw.parse().map_err(|_| {
                    MazeError::invalid_option("weight", format!("`{raw}` is not a number"))
                })?;
                Self::new(weight)
            }
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    fn close_run(grid: Grid, run: &[Cell], rng: &mut Random) -> Grid {
        let candidates: SmallVec<[Cell; 8]> = run
            .iter()
            .copied()
            .filter(|&cell| grid.contains(cell + Direction::North))
            .collect();

        match candidates.choose(rng) {
            Some(&cell) => grid.with_link(cell, cell + Direction::North),
            None => grid,
        }
    }
}

impl Carver for Sidewinder {
    fn carve(
        &self,
        mut grid: Grid,
        island: &[Cell],
        rng: &mut Random,
        progress: ProgressHandle,
    ) -> Option<Grid> {
        progress.lock().from = island.len();

        // island is row-major sorted, so runs build up left to right
        let mut run: Vec<Cell> = Vec::new();
        for (i, &cell) in island.iter().enumerate() {
            run.push(cell);

            let east = cell + Direction::East;
            let has_east = grid.contains(east);
            let has_north = grid.contains(cell + Direction::North);

            let close = !has_east || (has_north && !rng.gen_bool(self.weight));
            if close {
                grid = Self::close_run(grid, &run, rng);
                run.clear();
            } else {
                grid = grid.with_link(cell, east);
            }

            progress.lock().done = i + 1;
            if progress.is_stopped() {
                return None;
            }
        }

        progress.lock().finish();
        Some(grid)
    }
}
