//! Statistics over the episode reward history

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Summary statistics of a reward history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (zero for fewer than two episodes)
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Number of trailing episodes averaged in `recent_mean`
    pub window: usize,
    /// Mean reward of the last `window` episodes
    pub recent_mean: f64,
}

impl RewardStats {
    /// Compute statistics; `window` is clamped to the history length.
    ///
    /// An empty history yields all-zero statistics.
    pub fn from_history(history: &[f64], window: usize) -> Self {
        if history.is_empty() {
            return Self {
                count: 0,
                mean: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0,
                window: 0,
                recent_mean: 0.0,
            };
        }

        let window = window.clamp(1, history.len());
        let recent = &history[history.len() - window..];
        let std_dev = if history.len() < 2 {
            0.0
        } else {
            history.iter().std_dev()
        };

        Self {
            count: history.len(),
            mean: history.iter().mean(),
            std_dev,
            min: Statistics::min(history.iter()),
            max: Statistics::max(history.iter()),
            window,
            recent_mean: recent.iter().mean(),
        }
    }
}

/// Trailing moving average; element `i` averages episodes `i+1-window ..= i`
/// (fewer at the start).
pub fn moving_average(history: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut sum = 0.0;
    history
        .iter()
        .enumerate()
        .map(|(i, &reward)| {
            sum += reward;
            if i >= window {
                sum -= history[i - window];
            }
            sum / (i + 1).min(window) as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_stats() {
        let history = [1.0, -1.0, 0.5, 0.5];
        let stats = RewardStats::from_history(&history, 2);
        assert_eq!(stats.count, 4);
        assert!((stats.mean - 0.25).abs() < 1e-12);
        assert_eq!(stats.min, -1.0);
        assert_eq!(stats.max, 1.0);
        assert_eq!(stats.window, 2);
        assert!((stats.recent_mean - 0.5).abs() < 1e-12);
        assert!(stats.std_dev > 0.0);
    }

    #[test]
    fn test_reward_stats_empty_and_single() {
        let empty = RewardStats::from_history(&[], 10);
        assert_eq!(empty.count, 0);
        assert_eq!(empty.mean, 0.0);

        let single = RewardStats::from_history(&[0.7], 10);
        assert_eq!(single.window, 1);
        assert_eq!(single.std_dev, 0.0);
        assert!((single.recent_mean - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_moving_average() {
        let averaged = moving_average(&[1.0, 3.0, 5.0, 7.0], 2);
        assert_eq!(averaged, vec![1.0, 2.0, 4.0, 6.0]);
        assert!(moving_average(&[], 5).is_empty());
    }
}
