//! Builder pattern for GridWorld construction
//!
//! Provides a fluent API for describing a grid world. All configuration
//! errors are detected in [`GridWorldBuilder::build`], before any training
//! can start.

use std::collections::{BTreeMap, BTreeSet};

use super::world::GridWorld;
use crate::{
    error::{Error, Result},
    types::Cell,
};

/// Builder for constructing validated [`GridWorld`] instances.
///
/// # Examples
///
/// ```
/// use gridworld::grid::GridWorldBuilder;
/// use gridworld::types::Cell;
///
/// let world = GridWorldBuilder::new()
///     .rows(3)
///     .cols(4)
///     .obstacle(Cell::new(1, 1))
///     .goal(Cell::new(0, 3), 1.0)
///     .trap(Cell::new(1, 3), -1.0)
///     .start(Cell::new(2, 0))
///     .build()
///     .unwrap();
///
/// assert!(world.is_terminal(Cell::new(0, 3)));
/// ```
#[derive(Debug, Clone)]
pub struct GridWorldBuilder {
    rows: usize,
    cols: usize,
    obstacles: Vec<Cell>,
    terminals: Vec<(Cell, f64)>,
    start: Cell,
}

impl GridWorldBuilder {
    /// Create a new builder: an empty 1x1 grid starting at `(0,0)`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn cols(mut self, cols: usize) -> Self {
        self.cols = cols;
        self
    }

    /// Set both dimensions at once.
    pub fn dimensions(self, rows: usize, cols: usize) -> Self {
        self.rows(rows).cols(cols)
    }

    /// Mark a cell as impassable.
    pub fn obstacle(mut self, cell: Cell) -> Self {
        self.obstacles.push(cell);
        self
    }

    /// Mark several cells as impassable.
    pub fn obstacles(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
        self.obstacles.extend(cells);
        self
    }

    /// Add an episode-ending cell with the reward received on entering it.
    pub fn terminal(mut self, cell: Cell, reward: f64) -> Self {
        self.terminals.push((cell, reward));
        self
    }

    /// Alias of [`terminal`](Self::terminal) for positive rewards.
    pub fn goal(self, cell: Cell, reward: f64) -> Self {
        self.terminal(cell, reward)
    }

    /// Alias of [`terminal`](Self::terminal) for negative rewards.
    pub fn trap(self, cell: Cell, reward: f64) -> Self {
        self.terminal(cell, reward)
    }

    pub fn start(mut self, cell: Cell) -> Self {
        self.start = cell;
        self
    }

    /// Validate the configuration and build the world.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the dimensions are zero, an obstacle
    /// or terminal lies outside the grid, a terminal is an obstacle or is
    /// listed twice, a reward is not finite, or the start cell is outside the
    /// grid, an obstacle, or terminal.
    pub fn build(self) -> Result<GridWorld> {
        let Self {
            rows,
            cols,
            obstacles,
            terminals,
            start,
        } = self;

        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        let in_bounds = |cell: Cell| cell.row < rows && cell.col < cols;

        let mut obstacle_set = BTreeSet::new();
        for cell in obstacles {
            if !in_bounds(cell) {
                return Err(Error::ObstacleOutOfBounds { cell, rows, cols });
            }
            obstacle_set.insert(cell);
        }

        let mut terminal_map = BTreeMap::new();
        for (cell, reward) in terminals {
            if !in_bounds(cell) {
                return Err(Error::TerminalOutOfBounds { cell, rows, cols });
            }
            if obstacle_set.contains(&cell) {
                return Err(Error::TerminalIsObstacle { cell });
            }
            if !reward.is_finite() {
                return Err(Error::InvalidReward { cell, reward });
            }
            if terminal_map.insert(cell, reward).is_some() {
                return Err(Error::DuplicateTerminal { cell });
            }
        }

        if !in_bounds(start) {
            return Err(Error::StartOutOfBounds {
                cell: start,
                rows,
                cols,
            });
        }
        if obstacle_set.contains(&start) {
            return Err(Error::StartIsObstacle { cell: start });
        }
        if terminal_map.contains_key(&start) {
            return Err(Error::StartIsTerminal { cell: start });
        }

        Ok(GridWorld {
            rows,
            cols,
            obstacles: obstacle_set,
            terminals: terminal_map,
            start,
        })
    }
}

impl Default for GridWorldBuilder {
    fn default() -> Self {
        Self {
            rows: 1,
            cols: 1,
            obstacles: Vec::new(),
            terminals: Vec::new(),
            start: Cell::new(0, 0),
        }
    }
}
