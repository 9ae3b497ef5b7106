use thiserror::Error;

use crate::dims::Dims;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("invalid grid dimensions {0:?}, rows and columns must be positive")]
    InvalidDimensions(Dims),

    #[error("invalid option `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },

    #[error("maze generation was stopped")]
    Stopped,
}

impl MazeError {
    pub fn invalid_option(name: &'static str, reason: impl Into<String>) -> Self {
        MazeError::InvalidOption {
            name,
            reason: reason.into(),
        }
    }
}
