//! Tabular Q-learning
//!
//! Q-learning is off-policy temporal difference control: every step moves
//! the estimate Q(s,a) toward the immediate reward plus the discounted best
//! value of the successor state, whatever action the agent takes next.
//!
//! ## Components
//!
//! | Type | Role |
//! |------|------|
//! | [`QTable`] | Dense value table, one entry per (cell, action) |
//! | [`EpsilonGreedy`] | Explore with probability ε, otherwise act greedily |
//! | [`ExplorationSchedule`] | Per-episode multiplicative ε decay with a floor |
//! | [`QLearningAgent`] | Owns the three above plus the random source |
//!
//! ## Usage Example
//!
//! ```
//! use gridworld::q_learning::QLearningAgent;
//! use gridworld::types::{Action, Cell};
//!
//! let mut agent = QLearningAgent::new(
//!     3,    // rows
//!     4,    // cols
//!     0.9,  // learning_rate
//!     0.5,  // discount_factor
//!     1.0,  // epsilon (exploration)
//!     0.99, // epsilon_decay
//!     0.01, // min_epsilon
//! )
//! .with_seed(42);
//!
//! let action = agent.select_action(Cell::new(2, 0)).action();
//! agent.learn(Cell::new(2, 0), action, -0.01, Cell::new(1, 0));
//! agent.end_episode();
//! assert!(agent.epsilon() < 1.0);
//! ```

pub mod agent;
pub mod exploration;
pub mod policy;
pub mod q_table;

// Public re-exports
pub use agent::QLearningAgent;
pub use exploration::ExplorationSchedule;
pub use policy::{EpsilonGreedy, Selection};
pub use q_table::QTable;
