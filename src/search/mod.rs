//! Exhaustive game-tree statistics: the recursive evaluator, its memo
//! caches, root-level parallel dispatch and per-move aggregation.

mod dispatcher;
mod evaluator;
pub mod memo;
mod outcome;
mod stats;
pub mod tree;

pub use dispatcher::{CacheScope, ParallelDispatcher};
pub use evaluator::{SearchMode, SearchStats, TreeEvaluator};
pub use memo::{LocalMemo, MemoCache, MemoKey, NoMemo, SharedMemo};
pub use outcome::OutcomeDistribution;
pub use stats::{
    evaluate_move_statistics, evaluate_move_statistics_parallel, percentages, ColumnStatistics,
    MoveStatistics, Percentages,
};
pub use tree::{explore, MoveTree};
