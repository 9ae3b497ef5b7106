pub mod algorithms;
pub mod cell;
pub mod dims;
pub mod error;
pub mod grid;
pub mod islands;
pub mod path;
pub mod progress;
pub mod registry;

pub use cell::{Cell, Direction};
pub use dims::Dims;
pub use error::MazeError;
pub use grid::Grid;
