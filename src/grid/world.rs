//! Immutable grid world: validity, rewards and deterministic transitions

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::builder::GridWorldBuilder;
use crate::types::{Action, Cell};

/// Kind of a terminal cell, derived from the sign of its reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalKind {
    /// Terminal with a strictly positive reward.
    Goal,
    /// Terminal with a zero or negative reward.
    Trap,
}

impl TerminalKind {
    /// Classify a terminal reward.
    pub fn from_reward(reward: f64) -> Self {
        if reward > 0.0 {
            TerminalKind::Goal
        } else {
            TerminalKind::Trap
        }
    }
}

/// The three mutually exclusive kinds of cell (terminals split by kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Open,
    Obstacle,
    Goal,
    Trap,
}

/// A rectangular grid world with obstacles and terminal cells.
///
/// Construct through [`GridWorld::builder`], which validates the
/// configuration, or [`GridWorld::classic`] for the canonical 3x4 world.
#[derive(Debug, Clone, PartialEq)]
pub struct GridWorld {
    pub(super) rows: usize,
    pub(super) cols: usize,
    pub(super) obstacles: BTreeSet<Cell>,
    pub(super) terminals: BTreeMap<Cell, f64>,
    pub(super) start: Cell,
}

impl GridWorld {
    /// Start configuring a new grid world.
    pub fn builder() -> GridWorldBuilder {
        GridWorldBuilder::new()
    }

    /// The canonical 3x4 world.
    ///
    /// ```text
    ///   .  .  .  G(+1)
    ///   .  #  .  X(-1)
    ///   S  .  .  .
    /// ```
    pub fn classic() -> Self {
        let mut terminals = BTreeMap::new();
        terminals.insert(Cell::new(0, 3), 1.0);
        terminals.insert(Cell::new(1, 3), -1.0);
        Self {
            rows: 3,
            cols: 4,
            obstacles: BTreeSet::from([Cell::new(1, 1)]),
            terminals,
            start: Cell::new(2, 0),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell every episode starts from.
    pub fn start(&self) -> Cell {
        self.start
    }

    /// Obstacle cells in row-major order.
    pub fn obstacles(&self) -> impl Iterator<Item = Cell> + '_ {
        self.obstacles.iter().copied()
    }

    /// Terminal cells with their rewards, in row-major order.
    pub fn terminals(&self) -> impl Iterator<Item = (Cell, f64)> + '_ {
        self.terminals.iter().map(|(cell, reward)| (*cell, *reward))
    }

    /// Whether the cell lies inside the grid.
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// A cell the agent may occupy: inside the grid and not an obstacle.
    pub fn is_valid(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.is_obstacle(cell)
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    pub fn is_terminal(&self, cell: Cell) -> bool {
        self.terminals.contains_key(&cell)
    }

    /// Reward received on entering `cell`; zero for non-terminal cells.
    pub fn reward_of(&self, cell: Cell) -> f64 {
        self.terminals.get(&cell).copied().unwrap_or(0.0)
    }

    /// Goal or trap, if `cell` is terminal.
    pub fn terminal_kind(&self, cell: Cell) -> Option<TerminalKind> {
        self.terminals
            .get(&cell)
            .map(|&reward| TerminalKind::from_reward(reward))
    }

    /// Classify a cell. Out-of-bounds cells are reported as obstacles.
    pub fn kind_of(&self, cell: Cell) -> CellKind {
        if !self.is_valid(cell) {
            return CellKind::Obstacle;
        }
        match self.terminal_kind(cell) {
            Some(TerminalKind::Goal) => CellKind::Goal,
            Some(TerminalKind::Trap) => CellKind::Trap,
            None => CellKind::Open,
        }
    }

    /// Deterministic transition.
    ///
    /// Moving off the grid or into an obstacle leaves the agent where it was.
    pub fn attempt_move(&self, cell: Cell, action: Action) -> Cell {
        cell.step(action)
            .filter(|&candidate| self.is_valid(candidate))
            .unwrap_or(cell)
    }

    /// Every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell::new(row, col)))
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Always false for a built world.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_layout() {
        let world = GridWorld::classic();
        assert_eq!(world.rows(), 3);
        assert_eq!(world.cols(), 4);
        assert_eq!(world.start(), Cell::new(2, 0));
        assert!(world.is_obstacle(Cell::new(1, 1)));
        assert_eq!(world.kind_of(Cell::new(0, 3)), CellKind::Goal);
        assert_eq!(world.kind_of(Cell::new(1, 3)), CellKind::Trap);
        assert_eq!(world.kind_of(Cell::new(2, 2)), CellKind::Open);
    }

    #[test]
    fn test_is_valid() {
        let world = GridWorld::classic();
        assert!(world.is_valid(Cell::new(0, 0)));
        assert!(!world.is_valid(Cell::new(1, 1)));
        assert!(!world.is_valid(Cell::new(3, 0)));
        assert!(!world.is_valid(Cell::new(0, 4)));
    }

    #[test]
    fn test_reward_of() {
        let world = GridWorld::classic();
        assert_eq!(world.reward_of(Cell::new(0, 3)), 1.0);
        assert_eq!(world.reward_of(Cell::new(1, 3)), -1.0);
        assert_eq!(world.reward_of(Cell::new(2, 2)), 0.0);
    }

    #[test]
    fn test_attempt_move_bumps() {
        let world = GridWorld::classic();
        // Off the left edge
        assert_eq!(world.attempt_move(Cell::new(2, 0), Action::Left), Cell::new(2, 0));
        // Off the bottom edge
        assert_eq!(world.attempt_move(Cell::new(2, 0), Action::Down), Cell::new(2, 0));
        // Into the obstacle
        assert_eq!(world.attempt_move(Cell::new(1, 0), Action::Right), Cell::new(1, 0));
        // Regular moves
        assert_eq!(world.attempt_move(Cell::new(2, 0), Action::Up), Cell::new(1, 0));
        assert_eq!(world.attempt_move(Cell::new(2, 0), Action::Right), Cell::new(2, 1));
    }

    #[test]
    fn test_cells_row_major() {
        let world = GridWorld::classic();
        let cells: Vec<Cell> = world.cells().collect();
        assert_eq!(cells.len(), 12);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[4], Cell::new(1, 0));
        assert_eq!(cells[11], Cell::new(2, 3));
    }

    #[test]
    fn test_zero_reward_terminal_is_trap() {
        assert_eq!(TerminalKind::from_reward(0.0), TerminalKind::Trap);
        assert_eq!(TerminalKind::from_reward(0.5), TerminalKind::Goal);
    }
}
