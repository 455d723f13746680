use super::board::{Board, Cell};

/// Drop floating pieces on an externally built board.
///
/// Each column is split into segments at masked cells; inside a segment the
/// pieces fall to the segment's bottom and keep their vertical order. Returns
/// the number of pieces that moved. Boards produced by `Board::apply` are
/// always settled already.
pub fn settle(board: &mut Board) -> usize {
    let mut moved = 0;
    for col in 0..board.cols() {
        let mut row = 0;
        while row < board.rows() {
            if !board.is_playable(row, col) {
                row += 1;
                continue;
            }
            let start = row;
            while row < board.rows() && board.is_playable(row, col) {
                row += 1;
            }
            moved += settle_segment(board, col, start, row);
        }
    }
    moved
}

fn settle_segment(board: &mut Board, col: usize, start: usize, end: usize) -> usize {
    let pieces: Vec<(usize, Cell)> = (start..end)
        .filter_map(|row| match board.get(row, col) {
            Some(cell @ (Cell::Red | Cell::Yellow)) => Some((row, cell)),
            _ => None,
        })
        .collect();

    let mut moved = 0;
    for (offset, &(from, cell)) in pieces.iter().enumerate() {
        let to = start + offset;
        if to != from {
            moved += 1;
        }
        board.set(to, col, Some(cell));
    }
    for row in start + pieces.len()..end {
        board.set(row, col, Some(Cell::Empty));
    }
    moved
}
