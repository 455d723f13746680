use std::ops::{Add, AddAssign};

use crate::game::GameResult;

/// Leaf counts per outcome class accumulated under a subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct OutcomeDistribution {
    pub red_win: u64,
    pub yellow_win: u64,
    pub tie: u64,
    pub undecided: u64,
}

impl OutcomeDistribution {
    /// Distribution with a single leaf of class `result`
    pub fn single(result: GameResult) -> Self {
        let mut dist = Self::default();
        dist.record(result, 1);
        dist
    }

    /// Add `count` leaves of class `result`
    pub fn record(&mut self, result: GameResult, count: u64) {
        *self.slot(result) += count;
    }

    pub fn get(&self, result: GameResult) -> u64 {
        match result {
            GameResult::RedWin => self.red_win,
            GameResult::YellowWin => self.yellow_win,
            GameResult::Tie => self.tie,
            GameResult::Undecided => self.undecided,
        }
    }

    pub fn total(&self) -> u64 {
        self.red_win + self.yellow_win + self.tie + self.undecided
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    fn slot(&mut self, result: GameResult) -> &mut u64 {
        match result {
            GameResult::RedWin => &mut self.red_win,
            GameResult::YellowWin => &mut self.yellow_win,
            GameResult::Tie => &mut self.tie,
            GameResult::Undecided => &mut self.undecided,
        }
    }
}

impl AddAssign for OutcomeDistribution {
    fn add_assign(&mut self, other: Self) {
        self.red_win += other.red_win;
        self.yellow_win += other.yellow_win;
        self.tie += other.tie;
        self.undecided += other.undecided;
    }
}

impl Add for OutcomeDistribution {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl std::iter::Sum for OutcomeDistribution {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_counts_one_leaf() {
        for result in GameResult::ALL {
            let dist = OutcomeDistribution::single(result);
            assert_eq!(dist.get(result), 1);
            assert_eq!(dist.total(), 1);
        }
    }

    #[test]
    fn test_elementwise_sum() {
        let total: OutcomeDistribution = [
            OutcomeDistribution::single(GameResult::RedWin),
            OutcomeDistribution::single(GameResult::RedWin),
            OutcomeDistribution::single(GameResult::Tie),
        ]
        .into_iter()
        .sum();
        assert_eq!(total.red_win, 2);
        assert_eq!(total.tie, 1);
        assert_eq!(total.yellow_win, 0);
        assert_eq!(total.total(), 3);
    }

    #[test]
    fn test_record_adds_to_one_class() {
        let mut dist = OutcomeDistribution::single(GameResult::Tie);
        dist.record(GameResult::Tie, 4);
        dist.record(GameResult::YellowWin, 2);
        assert_eq!(dist.tie, 5);
        assert_eq!(dist.yellow_win, 2);
        assert_eq!(dist.red_win + dist.undecided, 0);
        let expected = OutcomeDistribution {
            red_win: 1,
            yellow_win: 2,
            tie: 5,
            undecided: 0,
        };
        assert_eq!(dist + OutcomeDistribution::single(GameResult::RedWin), expected);
    }

    #[test]
    fn test_default_is_empty() {
        assert!(OutcomeDistribution::default().is_empty());
        assert!(!OutcomeDistribution::single(GameResult::Undecided).is_empty());
    }
}
