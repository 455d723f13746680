use super::board::Board;

/// Legal moves for an arbitrary board snapshot, in ascending column order.
pub fn legal_moves(board: &Board) -> Vec<usize> {
    board.valid_columns()
}
