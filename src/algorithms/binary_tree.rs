use std::str::FromStr;

use rand::seq::SliceRandom as _;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    cell::{Cell, Direction},
    error::MazeError,
    grid::Grid,
    progress::ProgressHandle,
};

use super::{Carver, Params, Random};

/// Diagonal quadrant naming the two directions a cell may link toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bias {
    #[default]
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl Bias {
    pub fn directions(self) -> [Direction; 2] {
        use Direction::*;
        match self {
            Bias::Northeast => [North, East],
            Bias::Northwest => [North, West],
            Bias::Southeast => [South, East],
            Bias::Southwest => [South, West],
        }
    }
}

impl FromStr for Bias {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "northeast" => Ok(Bias::Northeast),
            "northwest" => Ok(Bias::Northwest),
            "southeast" => Ok(Bias::Southeast),
            "southwest" => Ok(Bias::Southwest),
            other => Err(MazeError::invalid_option(
                "bias",
                format!("unknown bias `{other}`"),
            )),
        }
    }
}

/// One biased coin flip per cell: link toward one of the two bias directions
/// that exists.
///
/// Produces two unbroken hallways along the sides matching the bias. On
/// irregular masks a cell may have neither direction available and stays
/// unlinked, so the spanning-tree guarantee holds on rectangular islands
/// only.
#[derive(Debug, Default)]
pub struct BinaryTree {
    bias: Bias,
}

impl BinaryTree {
    pub fn new(bias: Bias) -> Self {
        Self { bias }
    }

    pub fn from_params(params: &Params) -> Result<Self, MazeError> {
        let bias = match params.get("bias") {
            Some(raw) => raw.parse()?,
            None => Bias::default(),
        };
        Ok(Self::new(bias))
    }

    pub fn bias(&self) -> Bias {
        self.bias
    }
}

impl Carver for BinaryTree {
    fn carve(
        &self,
        mut grid: Grid,
        island: &[Cell],
        rng: &mut Random,
        progress: ProgressHandle,
    ) -> Option<Grid> {
        progress.lock().from = island.len();

        for (i, &cell) in island.iter().enumerate() {
            let open: SmallVec<[Cell; 2]> = self
                .bias
                .directions()
                .into_iter()
                .map(|dir| cell + dir)
                .filter(|next| grid.contains(*next))
                .collect();

            if let Some(&next) = open.choose(rng) {
                grid = grid.with_link(cell, next);
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
