//! Core value types shared by every module: grid cells and agent actions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A grid position identified by `(row, col)`.
///
/// Row 0 is the top row, column 0 the leftmost column. Serialized as a
/// two-element array `[row, col]` so configuration files stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Create a new cell.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Neighbouring cell in the direction of `action`, ignoring any grid.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant
    /// (moving up from row 0 or left from column 0). Upper bounds are the
    /// grid's business.
    pub fn step(self, action: Action) -> Option<Cell> {
        let (row, col) = match action {
            Action::Up => (self.row.checked_sub(1)?, self.col),
            Action::Down => (self.row.checked_add(1)?, self.col),
            Action::Left => (self.row, self.col.checked_sub(1)?),
            Action::Right => (self.row, self.col.checked_add(1)?),
        };
        Some(Cell::new(row, col))
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell::new(row, col)
    }
}

impl From<Cell> for (usize, usize) {
    fn from(cell: Cell) -> Self {
        (cell.row, cell.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// One of the four moves available in every cell.
///
/// The declaration order is the action index order and is significant:
/// greedy selection breaks ties in favour of the lowest index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// Number of actions.
    pub const COUNT: usize = 4;

    /// All actions in index order.
    pub const ALL: [Action; Action::COUNT] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// Index of the action (up=0, down=1, left=2, right=3).
    pub const fn index(self) -> usize {
        match self {
            Action::Up => 0,
            Action::Down => 1,
            Action::Left => 2,
            Action::Right => 3,
        }
    }

    /// Human-readable label used in the Q-value table.
    pub const fn label(self) -> &'static str {
        match self {
            Action::Up => "Go Up",
            Action::Down => "Go Down",
            Action::Left => "Go Left",
            Action::Right => "Go Right",
        }
    }

    /// Arrow glyph used in the grid rendering.
    pub const fn arrow(self) -> char {
        match self {
            Action::Up => '↑',
            Action::Down => '↓',
            Action::Left => '←',
            Action::Right => '→',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_index_matches_order() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
        }
    }

    #[test]
    fn test_step_at_origin() {
        let origin = Cell::new(0, 0);
        assert_eq!(origin.step(Action::Up), None);
        assert_eq!(origin.step(Action::Left), None);
        assert_eq!(origin.step(Action::Down), Some(Cell::new(1, 0)));
        assert_eq!(origin.step(Action::Right), Some(Cell::new(0, 1)));
    }

    #[test]
    fn test_cell_serializes_as_pair() {
        let json = serde_json::to_string(&Cell::new(2, 3)).unwrap();
        assert_eq!(json, "[2,3]");
        let cell: Cell = serde_json::from_str("[1,1]").unwrap();
        assert_eq!(cell, Cell::new(1, 1));
    }
}
