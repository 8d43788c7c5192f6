//! Q-table implementation for temporal difference learning

use crate::types::{Action, Cell};

/// Dense Q-table mapping (cell, action) pairs to Q-values
///
/// Holds exactly `rows * cols * 4` entries, one per action for every cell of
/// the grid, including obstacle and terminal cells. All entries start at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    rows: usize,
    cols: usize,
    /// Q-values in row-major cell order, one array of action values per cell
    q_values: Vec<[f64; Action::COUNT]>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a zero-initialized Q-table for a `rows` x `cols` grid
    pub fn new(rows: usize, cols: usize, learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            rows,
            cols,
            q_values: vec![[0.0; Action::COUNT]; rows * cols],
            learning_rate,
            discount_factor,
        }
    }

    fn slot(&self, cell: Cell) -> Option<usize> {
        (cell.row < self.rows && cell.col < self.cols).then(|| cell.row * self.cols + cell.col)
    }

    /// Get Q-value for a cell-action pair (zero outside the grid)
    pub fn value(&self, cell: Cell, action: Action) -> f64 {
        self.slot(cell)
            .map_or(0.0, |slot| self.q_values[slot][action.index()])
    }

    /// All four Q-values of a cell, indexed by [`Action::index`]
    pub fn action_values(&self, cell: Cell) -> [f64; Action::COUNT] {
        self.slot(cell)
            .map_or([0.0; Action::COUNT], |slot| self.q_values[slot])
    }

    /// Overwrite the Q-value of a cell-action pair
    pub fn update(&mut self, cell: Cell, action: Action, new_value: f64) {
        debug_assert!(new_value.is_finite(), "Q-value must stay finite");
        if let Some(slot) = self.slot(cell) {
            self.q_values[slot][action.index()] = new_value;
        }
    }

    /// Greedy action (highest Q-value); ties go to the lowest action index
    pub fn best_action(&self, cell: Cell) -> Action {
        let values = self.action_values(cell);
        let mut best = Action::Up;
        for action in &Action::ALL[1..] {
            if values[action.index()] > values[best.index()] {
                best = *action;
            }
        }
        best
    }

    /// Maximum Q-value over the four actions
    pub fn best_value(&self, cell: Cell) -> f64 {
        self.action_values(cell)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// Terminal successors are not special-cased: their entries are never
    /// updated, so they contribute their initial value of zero.
    /// Returns the new Q-value.
    pub fn q_learning_update(
        &mut self,
        cell: Cell,
        action: Action,
        reward: f64,
        next_cell: Cell,
    ) -> f64 {
        let current_q = self.value(cell, action);
        let td_target = reward + self.discount_factor * self.best_value(next_cell);
        let td_error = td_target - current_q;
        let new_q = current_q + self.learning_rate * td_error;
        self.update(cell, action, new_q);
        new_q
    }

    /// Total number of (cell, action) entries
    pub fn size(&self) -> usize {
        self.q_values.len() * Action::COUNT
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Iterate over every entry as `(cell, action, value)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Action, f64)> + '_ {
        self.q_values.iter().enumerate().flat_map(move |(slot, values)| {
            let cell = Cell::new(slot / self.cols, slot % self.cols);
            Action::ALL
                .into_iter()
                .map(move |action| (cell, action, values[action.index()]))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qtable_initialization() {
        let qtable = QTable::new(3, 4, 0.9, 0.5);
        assert_eq!(qtable.size(), 48);
        assert!(qtable.iter().all(|(_, _, q)| q == 0.0));
    }

    #[test]
    fn test_qtable_update_get() {
        let mut qtable = QTable::new(3, 4, 0.9, 0.5);
        let cell = Cell::new(2, 1);
        qtable.update(cell, Action::Left, 1.5);
        assert_eq!(qtable.value(cell, Action::Left), 1.5);
        assert_eq!(qtable.value(cell, Action::Right), 0.0);
        assert_eq!(qtable.value(Cell::new(2, 2), Action::Left), 0.0);
    }

    #[test]
    fn test_best_value() {
        let mut qtable = QTable::new(2, 2, 0.9, 0.5);
        let cell = Cell::new(0, 1);
        qtable.update(cell, Action::Up, -0.5);
        qtable.update(cell, Action::Down, 1.5);
        qtable.update(cell, Action::Left, 0.8);
        qtable.update(cell, Action::Right, -2.0);
        assert_eq!(qtable.best_value(cell), 1.5);
        assert_eq!(qtable.best_action(cell), Action::Down);
    }

    #[test]
    fn test_best_action_ties_go_to_lowest_index() {
        let mut qtable = QTable::new(1, 1, 0.9, 0.5);
        let cell = Cell::new(0, 0);
        assert_eq!(qtable.best_action(cell), Action::Up);

        qtable.update(cell, Action::Up, -1.0);
        qtable.update(cell, Action::Left, 0.3);
        qtable.update(cell, Action::Right, 0.3);
        assert_eq!(qtable.best_action(cell), Action::Left);

        qtable.update(cell, Action::Down, 0.3);
        assert_eq!(qtable.best_action(cell), Action::Down);
    }

    #[test]
    fn test_best_value_all_negative() {
        let mut qtable = QTable::new(1, 1, 0.9, 0.5);
        let cell = Cell::new(0, 0);
        for action in Action::ALL {
            qtable.update(cell, action, -1.0 - action.index() as f64);
        }
        assert_eq!(qtable.best_value(cell), -1.0);
    }

    #[test]
    fn test_q_learning_update() {
        let mut qtable = QTable::new(3, 4, 0.9, 0.5);
        let cell = Cell::new(0, 1);
        let next = Cell::new(0, 2);
        qtable.update(next, Action::Right, 0.99);

        let new_q = qtable.q_learning_update(cell, Action::Right, -0.01, next);

        // 0.0 + 0.9 * (-0.01 + 0.5 * 0.99 - 0.0) = 0.4365
        assert!((new_q - 0.4365).abs() < 1e-12);
        assert_eq!(qtable.value(cell, Action::Right), new_q);
    }

    #[test]
    fn test_update_into_terminal_uses_zero_future() {
        let mut qtable = QTable::new(3, 4, 0.9, 0.5);
        let cell = Cell::new(0, 2);
        let goal = Cell::new(0, 3);
        for _ in 0..50 {
            qtable.q_learning_update(cell, Action::Right, 0.99, goal);
        }
        assert!((qtable.value(cell, Action::Right) - 0.99).abs() < 1e-12);
    }
}
