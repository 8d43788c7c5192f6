//! Policy extraction and reporting
//!
//! Everything here is read-only over a trained [`QTable`]: the per-cell
//! report, its two text renderings, and the greedy rollout from the start
//! cell.

use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    grid::{CellKind, GridWorld, TerminalKind},
    q_learning::QTable,
    types::{Action, Cell},
};

/// What the report says about one cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellReport {
    Obstacle,
    Goal { reward: f64 },
    Trap { reward: f64 },
    Regular {
        /// Q-values indexed by [`Action::index`]
        values: [f64; Action::COUNT],
        best: Action,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellEntry {
    pub cell: Cell,
    #[serde(flatten)]
    pub report: CellReport,
}

/// Greedy policy and Q-values for every cell of a grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyReport {
    pub rows: usize,
    pub cols: usize,
    /// One entry per cell, row-major
    pub entries: Vec<CellEntry>,
}

impl PolicyReport {
    pub fn new(world: &GridWorld, q_table: &QTable) -> Self {
        let entries = world
            .cells()
            .map(|cell| {
                let report = match world.kind_of(cell) {
                    CellKind::Obstacle => CellReport::Obstacle,
                    CellKind::Goal => CellReport::Goal {
                        reward: world.reward_of(cell),
                    },
                    CellKind::Trap => CellReport::Trap {
                        reward: world.reward_of(cell),
                    },
                    CellKind::Open => CellReport::Regular {
                        values: q_table.action_values(cell),
                        best: q_table.best_action(cell),
                    },
                };
                CellEntry { cell, report }
            })
            .collect();

        Self {
            rows: world.rows(),
            cols: world.cols(),
            entries,
        }
    }

    pub fn entry(&self, cell: Cell) -> Option<&CellEntry> {
        if cell.row >= self.rows || cell.col >= self.cols {
            return None;
        }
        self.entries.get(cell.row * self.cols + cell.col)
    }

    /// Greedy action for a regular cell
    pub fn best_action(&self, cell: Cell) -> Option<Action> {
        match self.entry(cell)?.report {
            CellReport::Regular { best, .. } => Some(best),
            _ => None,
        }
    }

    /// Per-cell table of the four Q-values and the best action
    pub fn render_table(&self) -> String {
        let mut out =
            String::from("Position | Q(up) | Q(down) | Q(left) | Q(right) | Best Action\n");
        for entry in &self.entries {
            let position = format!(" {}  |", entry.cell);
            let line = match entry.report {
                CellReport::Obstacle => format!("{position}  Wall"),
                CellReport::Goal { .. } => format!("{position}  Goal"),
                CellReport::Trap { .. } => format!("{position}  Trap"),
                CellReport::Regular { values, best } => format!(
                    "{position} {:5.2} | {:6.2} | {:6.2} | {:7.2} | {}",
                    values[0],
                    values[1],
                    values[2],
                    values[3],
                    best.label()
                ),
            };
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// One symbol per cell: `#` wall, `G` goal, `X` trap, arrows elsewhere
    pub fn render_grid(&self) -> String {
        let rule = "-".repeat(self.cols * 6 + 1);
        let mut out = String::from("Learned Policy (Grid View):\n");
        out.push_str(&rule);
        out.push('\n');
        for row in self.entries.chunks(self.cols.max(1)) {
            out.push('|');
            for entry in row {
                let symbol = match entry.report {
                    CellReport::Obstacle => '#',
                    CellReport::Goal { .. } => 'G',
                    CellReport::Trap { .. } => 'X',
                    CellReport::Regular { best, .. } => best.arrow(),
                };
                out.push_str(&format!("  {symbol}  |"));
            }
            out.push('\n');
        }
        out.push_str(&rule);
        out.push('\n');
        out.push_str("Legend: G=Goal, X=Trap, #=Wall\n");
        out
    }
}

impl fmt::Display for PolicyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.render_table(), self.render_grid())
    }
}

/// How a greedy rollout ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RolloutEnd {
    /// Entered a terminal cell
    Terminal(TerminalKind),
    /// Returned to an already visited cell; the greedy policy cycles forever
    Loop,
    /// Ran out of steps
    StepCap,
}

/// Path followed by the greedy policy from the start cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rollout {
    /// Visited cells, start first, final cell last
    pub path: Vec<Cell>,
    pub end: RolloutEnd,
}

impl Rollout {
    pub fn reached_goal(&self) -> bool {
        self.end == RolloutEnd::Terminal(TerminalKind::Goal)
    }

    /// Number of moves taken
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn visits(&self, cell: Cell) -> bool {
        self.path.contains(&cell)
    }
}

/// Follow `best_action` from the start cell until a terminal, a cycle, or
/// `max_steps` moves.
pub fn greedy_rollout(world: &GridWorld, q_table: &QTable, max_steps: usize) -> Rollout {
    let mut cell = world.start();
    let mut path = vec![cell];
    let mut visited = HashSet::from([cell]);

    let end = loop {
        if let Some(kind) = world.terminal_kind(cell) {
            break RolloutEnd::Terminal(kind);
        }
        if path.len() > max_steps {
            break RolloutEnd::StepCap;
        }
        let next = world.attempt_move(cell, q_table.best_action(cell));
        path.push(next);
        if !visited.insert(next) {
            break RolloutEnd::Loop;
        }
        cell = next;
    };

    if !matches!(end, RolloutEnd::Terminal(_)) {
        tracing::warn!(?end, steps = path.len() - 1, "greedy policy does not reach a terminal cell");
    }

    Rollout { path, end }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_tuned_table() -> QTable {
        // Route: (2,0) up (1,0) up (0,0) right (0,1) right (0,2) right (0,3)
        let mut table = QTable::new(3, 4, 0.9, 0.5);
        table.update(Cell::new(2, 0), Action::Up, 0.1);
        table.update(Cell::new(1, 0), Action::Up, 0.2);
        table.update(Cell::new(0, 0), Action::Right, 0.3);
        table.update(Cell::new(0, 1), Action::Right, 0.5);
        table.update(Cell::new(0, 2), Action::Right, 0.99);
        table.update(Cell::new(1, 2), Action::Up, 0.4);
        table.update(Cell::new(2, 3), Action::Left, 0.05);
        table
    }

    #[test]
    fn test_report_classifies_cells() {
        let world = GridWorld::classic();
        let report = PolicyReport::new(&world, &hand_tuned_table());
        assert_eq!(report.entries.len(), 12);
        assert_eq!(report.entry(Cell::new(1, 1)).unwrap().report, CellReport::Obstacle);
        assert_eq!(
            report.entry(Cell::new(0, 3)).unwrap().report,
            CellReport::Goal { reward: 1.0 }
        );
        assert_eq!(
            report.entry(Cell::new(1, 3)).unwrap().report,
            CellReport::Trap { reward: -1.0 }
        );
        assert_eq!(report.best_action(Cell::new(0, 2)), Some(Action::Right));
        assert_eq!(report.best_action(Cell::new(1, 1)), None);
        assert!(report.entry(Cell::new(3, 0)).is_none());
    }

    #[test]
    fn test_render_table() {
        let world = GridWorld::classic();
        let table = PolicyReport::new(&world, &hand_tuned_table()).render_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 13);
        assert!(lines[0].starts_with("Position | Q(up)"));
        assert_eq!(lines[3], " (0,2)  |  0.00 |   0.00 |   0.00 |    0.99 | Go Right");
        assert_eq!(lines[4], " (0,3)  |  Goal");
        assert_eq!(lines[6], " (1,1)  |  Wall");
        assert_eq!(lines[8], " (1,3)  |  Trap");
    }

    #[test]
    fn test_render_grid() {
        let world = GridWorld::classic();
        let grid = PolicyReport::new(&world, &hand_tuned_table()).render_grid();
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines[1], "-------------------------");
        assert_eq!(lines[2], "|  →  |  →  |  →  |  G  |");
        assert_eq!(lines[3], "|  ↑  |  #  |  ↑  |  X  |");
        assert_eq!(lines[4], "|  ↑  |  ↑  |  ↑  |  ←  |");
        assert!(lines[6].starts_with("Legend"));
    }

    #[test]
    fn test_greedy_rollout_reaches_goal() {
        let world = GridWorld::classic();
        let rollout = greedy_rollout(&world, &hand_tuned_table(), 100);
        assert!(rollout.reached_goal());
        assert_eq!(rollout.steps(), 5);
        assert_eq!(rollout.path.first(), Some(&Cell::new(2, 0)));
        assert_eq!(rollout.path.last(), Some(&Cell::new(0, 3)));
        assert!(!rollout.visits(Cell::new(1, 3)));
    }

    #[test]
    fn test_greedy_rollout_detects_loop() {
        // Untrained table: always Up, so (2,0) -> (1,0) -> (0,0) -> bump
        let world = GridWorld::classic();
        let table = QTable::new(3, 4, 0.9, 0.5);
        let rollout = greedy_rollout(&world, &table, 100);
        assert_eq!(rollout.end, RolloutEnd::Loop);
        assert_eq!(
            rollout.path,
            vec![Cell::new(2, 0), Cell::new(1, 0), Cell::new(0, 0), Cell::new(0, 0)]
        );
    }

    #[test]
    fn test_greedy_rollout_step_cap() {
        let world = GridWorld::classic();
        let rollout = greedy_rollout(&world, &hand_tuned_table(), 2);
        assert_eq!(rollout.end, RolloutEnd::StepCap);
        assert_eq!(rollout.steps(), 2);
    }
}
