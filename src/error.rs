//! Error types for the gridworld crate

use thiserror::Error;

use crate::types::Cell;

/// Main error type for the gridworld crate
///
/// Every variant except the I/O and serialization ones is a configuration
/// error. They are raised while building a [`GridWorld`](crate::grid::GridWorld)
/// or validating learning parameters, never from inside the training loop.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("start cell {cell} is outside the {rows}x{cols} grid")]
    StartOutOfBounds { cell: Cell, rows: usize, cols: usize },

    #[error("start cell {cell} is an obstacle")]
    StartIsObstacle { cell: Cell },

    #[error("start cell {cell} is a terminal cell")]
    StartIsTerminal { cell: Cell },

    #[error("obstacle {cell} is outside the {rows}x{cols} grid")]
    ObstacleOutOfBounds { cell: Cell, rows: usize, cols: usize },

    #[error("terminal cell {cell} is outside the {rows}x{cols} grid")]
    TerminalOutOfBounds { cell: Cell, rows: usize, cols: usize },

    #[error("terminal cell {cell} coincides with an obstacle")]
    TerminalIsObstacle { cell: Cell },

    #[error("terminal cell {cell} is configured more than once")]
    DuplicateTerminal { cell: Cell },

    #[error("reward {reward} for terminal cell {cell} must be finite")]
    InvalidReward { cell: Cell, reward: f64 },

    #[error("invalid parameter {name}={value} (expected {expected})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    /// Attach an operation description to an I/O error.
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            operation: operation.into(),
            source,
        }
    }
}
