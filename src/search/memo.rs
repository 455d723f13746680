//! Memoization of subtree distributions.
//!
//! A key is only meaningful for one board shape, so a cache lives for one
//! top-level evaluation unless it is shared explicitly. The remaining depth is
//! part of the key because the same board at a different depth yields a
//! different distribution.

use std::sync::Mutex;

use rustc_hash::FxHashMap;

use crate::game::{Board, BoardKey, Player};

use super::outcome::OutcomeDistribution;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoKey {
    pub board: BoardKey,
    pub mover: Player,
    pub depth: usize,
}

impl MemoKey {
    pub fn new(board: &Board, mover: Player, depth: usize) -> Self {
        MemoKey {
            board: board.key(),
            mover,
            depth,
        }
    }
}

/// Storage for computed subtree distributions. Lookups may miss for any
/// reason; the evaluator recomputes on a miss.
pub trait MemoCache {
    fn lookup(&mut self, key: &MemoKey) -> Option<OutcomeDistribution>;
    fn store(&mut self, key: MemoKey, dist: OutcomeDistribution);
}

/// Cache that never stores anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMemo;

impl MemoCache for NoMemo {
    fn lookup(&mut self, _key: &MemoKey) -> Option<OutcomeDistribution> {
        None
    }

    fn store(&mut self, _key: MemoKey, _dist: OutcomeDistribution) {}
}

/// Single-owner cache for one evaluation call.
#[derive(Debug, Default)]
pub struct LocalMemo {
    entries: FxHashMap<MemoKey, OutcomeDistribution>,
}

impl LocalMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MemoCache for LocalMemo {
    fn lookup(&mut self, key: &MemoKey) -> Option<OutcomeDistribution> {
        self.entries.get(key).copied()
    }

    fn store(&mut self, key: MemoKey, dist: OutcomeDistribution) {
        self.entries.insert(key, dist);
    }
}

#[derive(Debug, Clone, Copy)]
struct SharedEntry {
    dist: OutcomeDistribution,
    total: u64,
}

/// Best-effort cache shared by root workers.
///
/// Reads and writes take the lock. A poisoned lock or an entry whose recorded
/// total disagrees with its counts is a miss, never an error.
#[derive(Debug, Default)]
pub struct SharedMemo {
    entries: Mutex<FxHashMap<MemoKey, SharedEntry>>,
}

impl SharedMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries; 0 if the lock is poisoned
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-worker handle implementing [`MemoCache`]
    pub fn handle(&self) -> SharedMemoHandle<'_> {
        SharedMemoHandle { memo: self }
    }

    fn get(&self, key: &MemoKey) -> Option<OutcomeDistribution> {
        let entries = self.entries.lock().ok()?;
        let entry = entries.get(key)?;
        (entry.dist.total() == entry.total).then_some(entry.dist)
    }

    fn insert(&self, key: MemoKey, dist: OutcomeDistribution) {
        if let Ok(mut entries) = self.entries.lock() {
            let total = dist.total();
            entries.insert(key, SharedEntry { dist, total });
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SharedMemoHandle<'a> {
    memo: &'a SharedMemo,
}

impl MemoCache for SharedMemoHandle<'_> {
    fn lookup(&mut self, key: &MemoKey) -> Option<OutcomeDistribution> {
        self.memo.get(key)
    }

    fn store(&mut self, key: MemoKey, dist: OutcomeDistribution) {
        self.memo.insert(key, dist);
    }
}

#[cfg(test)]
mod tests {
    use std::panic::AssertUnwindSafe;

    use super::*;
    use crate::game::GameResult;

    fn key(depth: usize) -> MemoKey {
        MemoKey::new(&Board::standard(), Player::Red, depth)
    }

    #[test]
    fn test_local_store_and_lookup() {
        let mut memo = LocalMemo::new();
        let dist = OutcomeDistribution::single(GameResult::Tie);
        assert_eq!(memo.lookup(&key(2)), None);
        memo.store(key(2), dist);
        assert_eq!(memo.lookup(&key(2)), Some(dist));
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn test_depth_is_part_of_key() {
        let mut memo = LocalMemo::new();
        memo.store(key(2), OutcomeDistribution::single(GameResult::Tie));
        assert_eq!(memo.lookup(&key(3)), None);
    }

    #[test]
    fn test_mover_is_part_of_key() {
        let mut memo = LocalMemo::new();
        memo.store(key(1), OutcomeDistribution::single(GameResult::Tie));
        let yellow = MemoKey::new(&Board::standard(), Player::Yellow, 1);
        assert_eq!(memo.lookup(&yellow), None);
    }

    #[test]
    fn test_no_memo_always_misses() {
        let mut memo = NoMemo;
        memo.store(key(1), OutcomeDistribution::single(GameResult::Tie));
        assert_eq!(memo.lookup(&key(1)), None);
    }

    #[test]
    fn test_shared_handles_see_each_other() {
        let memo = SharedMemo::new();
        let dist = OutcomeDistribution::single(GameResult::RedWin);
        memo.handle().store(key(1), dist);
        assert_eq!(memo.handle().lookup(&key(1)), Some(dist));
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn test_corrupted_entry_is_a_miss() {
        let memo = SharedMemo::new();
        memo.entries.lock().unwrap().insert(
            key(1),
            SharedEntry {
                dist: OutcomeDistribution::single(GameResult::Tie),
                total: 7,
            },
        );
        assert_eq!(memo.handle().lookup(&key(1)), None);
    }

    #[test]
    fn test_poisoned_lock_is_a_miss() {
        let memo = SharedMemo::new();
        memo.handle()
            .store(key(1), OutcomeDistribution::single(GameResult::Tie));

        let _ = std::panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = memo.entries.lock().unwrap();
            panic!("poison the cache lock");
        }));

        let mut handle = memo.handle();
        assert_eq!(handle.lookup(&key(1)), None);
        handle.store(key(2), OutcomeDistribution::single(GameResult::Tie));
        assert!(memo.is_empty());
    }
}
