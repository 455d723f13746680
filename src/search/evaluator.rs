use std::ops::AddAssign;

use crate::error::MoveError;
use crate::game::{classify, classify_after, legal_moves, Board, GameResult, Player};

use super::memo::{MemoCache, MemoKey};
use super::outcome::OutcomeDistribution;

/// How the search treats an immediately available win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Count every line of play uniformly.
    #[default]
    Exhaustive,
    /// A mover with a winning move takes it: such a node counts as a single
    /// win and its other moves are not expanded. Not comparable with
    /// `Exhaustive` counts.
    Smart,
}

impl SearchMode {
    pub fn name(self) -> &'static str {
        match self {
            SearchMode::Exhaustive => "exhaustive",
            SearchMode::Smart => "smart",
        }
    }
}

/// Work counters for one or more searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct SearchStats {
    /// Positions expanded (memo hits excluded)
    pub nodes: u64,
    pub cache_hits: u64,
    pub leaves: u64,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, other: Self) {
        self.nodes += other.nodes;
        self.cache_hits += other.cache_hits;
        self.leaves += other.leaves;
    }
}

/// Exhaustive outcome-statistics search.
///
/// Every step works on a private copy of the board; the caller's board is
/// never mutated.
#[derive(Debug, Clone)]
pub struct TreeEvaluator {
    mode: SearchMode,
    stats: SearchStats,
}

impl TreeEvaluator {
    pub fn new(mode: SearchMode) -> Self {
        TreeEvaluator {
            mode,
            stats: SearchStats::default(),
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Distribution of outcomes over all lines of play from `board` with
    /// `mover` to move, looking at most `depth` plies ahead.
    ///
    /// The depth is clamped to the number of empty cells, which bounds the
    /// recursion on any board.
    pub fn evaluate<M: MemoCache>(
        &mut self,
        board: &Board,
        mover: Player,
        depth: usize,
        memo: &mut M,
    ) -> Result<OutcomeDistribution, MoveError> {
        let result = classify(board);
        if result.is_terminal() {
            return Ok(self.leaf(result));
        }
        let depth = depth.min(board.empty_cells());
        self.live_node(board, mover, depth, memo)
    }

    fn leaf(&mut self, result: GameResult) -> OutcomeDistribution {
        self.stats.leaves += 1;
        OutcomeDistribution::single(result)
    }

    /// Search a position already known to be undecided
    fn live_node<M: MemoCache>(
        &mut self,
        board: &Board,
        mover: Player,
        depth: usize,
        memo: &mut M,
    ) -> Result<OutcomeDistribution, MoveError> {
        if depth == 0 {
            return Ok(self.leaf(GameResult::Undecided));
        }

        let key = MemoKey::new(board, mover, depth);
        if let Some(dist) = memo.lookup(&key) {
            self.stats.cache_hits += 1;
            return Ok(dist);
        }

        self.stats.nodes += 1;
        let dist = self.expand(board, mover, depth, memo)?;
        memo.store(key, dist);
        Ok(dist)
    }

    fn expand<M: MemoCache>(
        &mut self,
        board: &Board,
        mover: Player,
        depth: usize,
        memo: &mut M,
    ) -> Result<OutcomeDistribution, MoveError> {
        let moves = legal_moves(board);
        let mut children = Vec::with_capacity(moves.len());
        for column in moves {
            let mut child = board.clone();
            let (row, col) = child.apply(column, mover)?;
            let result = classify_after(&child, row, col, mover);
            if self.mode == SearchMode::Smart && result.winner() == Some(mover) {
                return Ok(self.leaf(result));
            }
            children.push((child, result));
        }

        let mut total = OutcomeDistribution::default();
        for (child, result) in children {
            total += if result.is_terminal() {
                self.leaf(result)
            } else {
                self.live_node(&child, mover.other(), depth - 1, memo)?
            };
        }
        Ok(total)
    }
}
