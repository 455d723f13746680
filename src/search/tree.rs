//! Materialized move trees for inspecting how a distribution was built.
//!
//! Unlike [`TreeEvaluator`](super::TreeEvaluator) this keeps every node, so it
//! is only practical for shallow depths.

use crate::error::MoveError;
use crate::game::{classify, classify_after, legal_moves, Board, GameResult, Player};

use super::evaluator::SearchMode;
use super::outcome::OutcomeDistribution;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MoveTree {
    /// Column played to reach this node; `None` at the root
    pub column: Option<usize>,
    /// Player who moves from this node
    pub mover: Player,
    /// Classification of the board at this node
    pub result: GameResult,
    pub distribution: OutcomeDistribution,
    pub children: Vec<MoveTree>,
}

impl MoveTree {
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(MoveTree::node_count).sum::<usize>()
    }
}

/// Build the full move tree under `board`. The distribution at each node
/// matches what [`TreeEvaluator`](super::TreeEvaluator) computes for the same
/// arguments.
pub fn explore(
    board: &Board,
    mover: Player,
    depth: usize,
    mode: SearchMode,
) -> Result<MoveTree, MoveError> {
    let result = classify(board);
    let depth = depth.min(board.empty_cells());
    explore_node(board, None, mover, result, depth, mode)
}

fn explore_node(
    board: &Board,
    column: Option<usize>,
    mover: Player,
    result: GameResult,
    depth: usize,
    mode: SearchMode,
) -> Result<MoveTree, MoveError> {
    let mut node = MoveTree {
        column,
        mover,
        result,
        distribution: OutcomeDistribution::single(result),
        children: Vec::new(),
    };
    if result.is_terminal() || depth == 0 {
        return Ok(node);
    }

    let mut children = Vec::new();
    for col in legal_moves(board) {
        let mut child = board.clone();
        let (row, col) = child.apply(col, mover)?;
        let child_result = classify_after(&child, row, col, mover);
        if mode == SearchMode::Smart && child_result.winner() == Some(mover) {
            // Only the winning line is kept.
            let win = explore_node(&child, Some(col), mover.other(), child_result, 0, mode)?;
            node.distribution = win.distribution;
            node.children = vec![win];
            return Ok(node);
        }
        children.push(explore_node(
            &child,
            Some(col),
            mover.other(),
            child_result,
            depth - 1,
            mode,
        )?);
    }

    node.distribution = children.iter().map(|child| child.distribution).sum();
    node.children = children;
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::memo::LocalMemo;
    use crate::search::TreeEvaluator;
    use crate::test_util::{board_from_rows, random_playout};

    #[test]
    fn test_tree_matches_evaluator() {
        for mode in [SearchMode::Exhaustive, SearchMode::Smart] {
            for seed in 20..23 {
                let board = random_playout(seed, 9, |_, _| {});
                let mover = board.mover();
                let tree = explore(&board, mover, 3, mode).unwrap();
                let dist = TreeEvaluator::new(mode)
                    .evaluate(&board, mover, 3, &mut LocalMemo::new())
                    .unwrap();
                assert_eq!(tree.distribution, dist, "seed {seed} mode {}", mode.name());
            }
        }
    }

    #[test]
    fn test_tree_shape_on_empty_board() {
        let tree = explore(&Board::standard(), Player::Red, 2, SearchMode::Exhaustive).unwrap();
        assert_eq!(tree.column, None);
        assert_eq!(tree.children.len(), 7);
        assert_eq!(tree.node_count(), 1 + 7 + 49);
        assert_eq!(tree.children[3].column, Some(3));
        assert_eq!(tree.children[3].mover, Player::Yellow);
    }

    #[test]
    fn test_smart_tree_keeps_only_winning_line() {
        let board = board_from_rows(&["....", "R...", "R...", "R..."]);
        let tree = explore(&board, Player::Red, 3, SearchMode::Smart).unwrap();
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].column, Some(0));
        assert_eq!(tree.children[0].result, GameResult::RedWin);
    }

    #[test]
    fn test_tree_serializes() {
        let tree = explore(&Board::new(2, 2), Player::Red, 1, SearchMode::Exhaustive).unwrap();
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["children"].as_array().unwrap().len(), 2);
        assert_eq!(json["children"][0]["result"], "undecided");
    }
}
