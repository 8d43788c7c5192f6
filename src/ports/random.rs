//! Randomness port - the single source of randomness for action selection
//!
//! Exploration draws through this trait instead of a global generator, so
//! production code can use an OS-seeded generator while tests inject a
//! fixed seed or a scripted sequence.

/// Source of the two kinds of random draws epsilon-greedy selection needs.
///
/// # Examples
///
/// ```
/// use gridworld::adapters::StdRandom;
/// use gridworld::ports::RandomSource;
///
/// let mut rng = StdRandom::seeded(7);
/// let u = rng.uniform();
/// assert!((0.0..1.0).contains(&u));
/// assert!(rng.action_index() < 4);
/// ```
pub trait RandomSource: Send {
    /// Uniform real in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Uniform action index in `0..Action::COUNT`. Larger values are
    /// reduced modulo `Action::COUNT` by the selector.
    fn action_index(&mut self) -> usize;

    /// Restart the sequence from the source's seed, if it has one.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn reseed(&mut self, _seed: u64) {}
}
