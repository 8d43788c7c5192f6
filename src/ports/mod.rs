//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the learning core and its
//! surroundings. The core owns these traits; concrete implementations live
//! in [`crate::adapters`] and [`crate::pipeline`].

pub mod observer;
pub mod random;

pub use observer::Observer;
pub use random::RandomSource;
