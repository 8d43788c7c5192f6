//! Grid world model
//!
//! The static description of the environment: dimensions, impassable
//! obstacle cells, episode-ending terminal cells with their rewards, and the
//! start cell. A [`GridWorld`] never changes once built; every query on it is
//! a pure function of its configuration.

pub mod builder;
pub mod world;

pub use builder::GridWorldBuilder;
pub use world::{CellKind, GridWorld, TerminalKind};
