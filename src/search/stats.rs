//! Per-move outcome statistics: the entry points callers use and the
//! conversion from raw counts to percentages.

use std::collections::BTreeMap;

use crate::error::{MoveError, SearchError};
use crate::game::{classify, legal_moves, Board, GameResult, Player};

use super::dispatcher::ParallelDispatcher;
use super::evaluator::{SearchMode, SearchStats, TreeEvaluator};
use super::memo::LocalMemo;
use super::outcome::OutcomeDistribution;

/// Share of leaves per outcome class, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct Percentages {
    pub red_win: f64,
    pub yellow_win: f64,
    pub tie: f64,
    pub undecided: f64,
}

impl Percentages {
    /// All zeros when the distribution is empty
    pub fn from_distribution(dist: &OutcomeDistribution) -> Self {
        let total = dist.total();
        if total == 0 {
            return Self::default();
        }
        let pct = |count: u64| 100.0 * count as f64 / total as f64;
        Percentages {
            red_win: pct(dist.red_win),
            yellow_win: pct(dist.yellow_win),
            tie: pct(dist.tie),
            undecided: pct(dist.undecided),
        }
    }

    pub fn get(&self, result: GameResult) -> f64 {
        match result {
            GameResult::RedWin => self.red_win,
            GameResult::YellowWin => self.yellow_win,
            GameResult::Tie => self.tie,
            GameResult::Undecided => self.undecided,
        }
    }

    pub fn sum(&self) -> f64 {
        self.red_win + self.yellow_win + self.tie + self.undecided
    }
}

/// Convert counts to percentages
pub fn percentages(dist: &OutcomeDistribution) -> Percentages {
    Percentages::from_distribution(dist)
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ColumnStatistics {
    pub distribution: OutcomeDistribution,
    pub percentages: Percentages,
}

/// Statistics for every legal first move of a position.
///
/// Distributions produced in different modes are not comparable, so the
/// mode travels with the numbers.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MoveStatistics {
    pub mode: SearchMode,
    pub depth: usize,
    pub mover: Player,
    pub columns: BTreeMap<usize, ColumnStatistics>,
    pub search: SearchStats,
}

impl MoveStatistics {
    fn from_distributions(
        mode: SearchMode,
        depth: usize,
        mover: Player,
        distributions: BTreeMap<usize, OutcomeDistribution>,
        search: SearchStats,
    ) -> Self {
        let columns = distributions
            .into_iter()
            .map(|(column, distribution)| {
                let percentages = percentages(&distribution);
                (
                    column,
                    ColumnStatistics {
                        distribution,
                        percentages,
                    },
                )
            })
            .collect();
        MoveStatistics {
            mode,
            depth,
            mover,
            columns,
            search,
        }
    }

    pub fn percentages_for(&self, column: usize) -> Option<Percentages> {
        self.columns.get(&column).map(|stats| stats.percentages)
    }

    /// Sum of all column distributions
    pub fn total(&self) -> OutcomeDistribution {
        self.columns.values().map(|stats| stats.distribution).sum()
    }

    /// Column with the highest win share for the mover; ties go to the
    /// lowest column
    pub fn best_column(&self) -> Option<usize> {
        let target = GameResult::win_for(self.mover);
        self.columns
            .iter()
            .fold(None, |best: Option<(usize, f64)>, (&column, stats)| {
                let share = stats.percentages.get(target);
                match best {
                    Some((_, best_share)) if best_share >= share => best,
                    _ => Some((column, share)),
                }
            })
            .map(|(column, _)| column)
    }
}

/// Boards after each legal first move. An already decided root has none.
pub(crate) fn root_moves(board: &Board, mover: Player) -> Result<Vec<(usize, Board)>, MoveError> {
    if classify(board).is_terminal() {
        return Ok(Vec::new());
    }
    legal_moves(board)
        .into_iter()
        .map(|column| {
            let mut child = board.clone();
            child.apply(column, mover)?;
            Ok((column, child))
        })
        .collect()
}

/// Outcome statistics for each legal move of `mover`, searching `depth` plies
/// including the move itself. Runs on the calling thread with one memo cache
/// for the whole call.
pub fn evaluate_move_statistics(
    board: &Board,
    mover: Player,
    depth: usize,
    mode: SearchMode,
) -> Result<MoveStatistics, SearchError> {
    let mut evaluator = TreeEvaluator::new(mode);
    let mut memo = LocalMemo::new();
    let child_depth = depth.saturating_sub(1);

    let mut distributions = BTreeMap::new();
    for (column, child) in root_moves(board, mover)? {
        let dist = evaluator.evaluate(&child, mover.other(), child_depth, &mut memo)?;
        distributions.insert(column, dist);
    }

    Ok(MoveStatistics::from_distributions(
        mode,
        depth,
        mover,
        distributions,
        evaluator.stats(),
    ))
}

/// Same as [`evaluate_move_statistics`], with each first move searched on
/// the dispatcher's worker pool.
pub fn evaluate_move_statistics_parallel(
    board: &Board,
    mover: Player,
    depth: usize,
    mode: SearchMode,
    dispatcher: &ParallelDispatcher,
) -> Result<MoveStatistics, SearchError> {
    let (distributions, stats) = dispatcher.dispatch(board, mover, depth, mode)?;
    Ok(MoveStatistics::from_distributions(
        mode,
        depth,
        mover,
        distributions,
        stats,
    ))
}
