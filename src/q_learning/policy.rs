//! Epsilon-greedy action selection

use serde::{Deserialize, Serialize};

use crate::{
    ports::RandomSource,
    q_learning::q_table::QTable,
    types::{Action, Cell},
};

/// Outcome of one epsilon-greedy decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "action", rename_all = "lowercase")]
pub enum Selection {
    /// Uniformly random action
    Explore(Action),
    /// Greedy action from the Q-table
    Exploit(Action),
}

impl Selection {
    pub fn action(self) -> Action {
        match self {
            Selection::Explore(action) | Selection::Exploit(action) => action,
        }
    }

    pub fn is_exploration(self) -> bool {
        matches!(self, Selection::Explore(_))
    }
}

/// ε-greedy policy over a [`QTable`]
///
/// Every call consumes one uniform draw to pick between exploring and
/// exploiting, plus one action-index draw when exploring.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpsilonGreedy;

impl EpsilonGreedy {
    pub fn select(
        &self,
        q_table: &QTable,
        cell: Cell,
        epsilon: f64,
        rng: &mut dyn RandomSource,
    ) -> Selection {
        if rng.uniform() < epsilon {
            // Explore: random action
            let action = Action::ALL[rng.action_index() % Action::COUNT];
            Selection::Explore(action)
        } else {
            // Exploit: greedy action based on Q-values
            Selection::Exploit(q_table.best_action(cell))
        }
    }
}
