use std::collections::BTreeMap;
use std::sync::mpsc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::SearchError;
use crate::game::{Board, Player};

use super::evaluator::{SearchMode, SearchStats, TreeEvaluator};
use super::memo::{LocalMemo, SharedMemo};
use super::outcome::OutcomeDistribution;
use super::stats::root_moves;

/// Which memo cache root workers use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheScope {
    /// Each worker owns a private cache.
    #[default]
    PerWorker,
    /// All workers of one dispatch share a locked cache.
    Shared,
}

/// Runs the root of a statistics search on a worker pool, one task per
/// legal first move.
///
/// The pool is built by the caller and passed in; nothing here is global.
pub struct ParallelDispatcher {
    pool: ThreadPool,
    cache: CacheScope,
}

impl ParallelDispatcher {
    /// Build a dedicated pool. `threads == 0` lets rayon pick the count.
    pub fn new(threads: usize, cache: CacheScope) -> Result<Self, SearchError> {
        let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
        Ok(Self::with_pool(pool, cache))
    }

    pub fn with_pool(pool: ThreadPool, cache: CacheScope) -> Self {
        ParallelDispatcher { pool, cache }
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn cache_scope(&self) -> CacheScope {
        self.cache
    }

    /// Search every first move of `mover` on its own task and merge the
    /// results by column.
    ///
    /// Each task gets its own copy of the child board and its own evaluator.
    /// The calling thread folds each result in as its task completes; the
    /// merge only sums per column, so completion order does not matter. A
    /// panicking task is re-raised here once the other tasks have finished.
    ///
    /// Must not be called from a task running on this dispatcher's own pool.
    pub fn dispatch(
        &self,
        board: &Board,
        mover: Player,
        depth: usize,
        mode: SearchMode,
    ) -> Result<(BTreeMap<usize, OutcomeDistribution>, SearchStats), SearchError> {
        let moves = root_moves(board, mover)?;
        let child_depth = depth.saturating_sub(1);
        let shared = SharedMemo::new();
        let cache = self.cache;

        let (tx, rx) = mpsc::channel();
        self.pool.in_place_scope(|scope| {
            for (column, child) in moves {
                let tx = tx.clone();
                let shared = &shared;
                scope.spawn(move |_| {
                    let mut evaluator = TreeEvaluator::new(mode);
                    let opponent = mover.other();
                    let result = match cache {
                        CacheScope::PerWorker => {
                            evaluator.evaluate(&child, opponent, child_depth, &mut LocalMemo::new())
                        }
                        CacheScope::Shared => {
                            evaluator.evaluate(&child, opponent, child_depth, &mut shared.handle())
                        }
                    };
                    // Sending only fails once an earlier error has ended the merge.
                    let _ = tx.send((column, result, evaluator.stats()));
                });
            }
            drop(tx);

            let mut distributions = BTreeMap::new();
            let mut stats = SearchStats::default();
            for (column, result, worker_stats) in rx {
                distributions.insert(column, result?);
                stats += worker_stats;
            }
            Ok((distributions, stats))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::stats::{evaluate_move_statistics, evaluate_move_statistics_parallel};
    use crate::test_util::{board_from_rows, random_playout};

    #[test]
    fn test_parallel_matches_sequential() {
        let dispatcher = ParallelDispatcher::new(4, CacheScope::PerWorker).unwrap();
        for seed in 30..33 {
            let board = random_playout(seed, 10, |_, _| {});
            let mover = board.mover();
            for mode in [SearchMode::Exhaustive, SearchMode::Smart] {
                let sequential = evaluate_move_statistics(&board, mover, 4, mode).unwrap();
                let parallel =
                    evaluate_move_statistics_parallel(&board, mover, 4, mode, &dispatcher).unwrap();
                assert_eq!(sequential.columns, parallel.columns, "seed {seed}");
            }
        }
    }

    #[test]
    fn test_shared_cache_matches_per_worker() {
        let per_worker = ParallelDispatcher::new(3, CacheScope::PerWorker).unwrap();
        let shared = ParallelDispatcher::new(3, CacheScope::Shared).unwrap();
        let board = Board::standard();
        let (a, _) = per_worker
            .dispatch(&board, Player::Red, 5, SearchMode::Exhaustive)
            .unwrap();
        let (b, shared_stats) = shared
            .dispatch(&board, Player::Red, 5, SearchMode::Exhaustive)
            .unwrap();
        assert_eq!(a, b);
        assert!(shared_stats.cache_hits > 0);
    }

    #[test]
    fn test_single_thread_pool_is_deterministic() {
        let dispatcher = ParallelDispatcher::new(1, CacheScope::Shared).unwrap();
        assert_eq!(dispatcher.threads(), 1);
        let board = random_playout(8, 7, |_, _| {});
        let (first, _) = dispatcher
            .dispatch(&board, board.mover(), 4, SearchMode::Smart)
            .unwrap();
        let (second, _) = dispatcher
            .dispatch(&board, board.mover(), 4, SearchMode::Smart)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_dispatch_from_another_pool() {
        let outer = ThreadPoolBuilder::new().num_threads(1).build().unwrap();
        let dispatcher = ParallelDispatcher::new(1, CacheScope::PerWorker).unwrap();
        let board = Board::standard();
        let (columns, stats) = outer
            .install(|| dispatcher.dispatch(&board, Player::Red, 3, SearchMode::Exhaustive))
            .unwrap();
        assert_eq!(columns.len(), 7);
        assert!(columns.values().all(|dist| dist.undecided == 49));
        assert_eq!(stats.leaves, 343);
    }

    #[test]
    fn test_decided_root_dispatches_nothing() {
        let dispatcher = ParallelDispatcher::new(2, CacheScope::PerWorker).unwrap();
        let board = board_from_rows(&["....", "Y...", "Y...", "Y...", "Y..."]);
        let (columns, stats) = dispatcher
            .dispatch(&board, Player::Red, 3, SearchMode::Exhaustive)
            .unwrap();
        assert!(columns.is_empty());
        assert_eq!(stats, SearchStats::default());
    }

    #[test]
    fn test_dispatcher_accepts_caller_pool() {
        let pool = ThreadPoolBuilder::new().num_threads(2).build().unwrap();
        let dispatcher = ParallelDispatcher::with_pool(pool, CacheScope::Shared);
        assert_eq!(dispatcher.cache_scope(), CacheScope::Shared);
        let (columns, _) = dispatcher
            .dispatch(&Board::standard(), Player::Red, 1, SearchMode::Exhaustive)
            .unwrap();
        assert_eq!(columns.len(), 7);
        assert!(columns.values().all(|dist| dist.undecided == 1));
    }
}
