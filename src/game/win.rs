//! Line-of-four detection, both from a just-placed cell and by scanning a
//! whole board.

use super::board::{Board, Cell};
use super::player::Player;

/// Pieces in a row needed to win.
pub const CONNECT: usize = 4;

/// Axis directions as (row step, col step): horizontal, vertical,
/// diagonal up-right (/), diagonal down-right (\).
const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Count same-colored cells from (row, col) in one direction, excluding the
/// start cell. Edges and masked cells stop the scan.
fn run_length(board: &Board, row: usize, col: usize, (dr, dc): (isize, isize), cell: Cell) -> usize {
    let mut count = 0;
    let mut r = row as isize + dr;
    let mut c = col as isize + dc;
    while board.get_signed(r, c) == Some(cell) {
        count += 1;
        r += dr;
        c += dc;
    }
    count
}

/// Check if the piece at (row, col) is part of a line of four
pub fn check_win_at(board: &Board, row: usize, col: usize) -> bool {
    let cell = match board.get(row, col) {
        Some(cell @ (Cell::Red | Cell::Yellow)) => cell,
        _ => return false,
    };

    AXES.iter().any(|&(dr, dc)| {
        let forward = run_length(board, row, col, (dr, dc), cell);
        let backward = run_length(board, row, col, (-dr, -dc), cell);
        forward + backward + 1 >= CONNECT
    })
}

/// Full scan: does `player` own any line of four?
pub fn has_line(board: &Board, player: Player) -> bool {
    let cell = player.to_cell();
    (0..board.rows()).any(|row| {
        (0..board.cols()).any(|col| board.get(row, col) == Some(cell) && check_win_at(board, row, col))
    })
}

/// Full scan for a winner. Red is reported first if both colors own a line,
/// which only happens on boards built by hand.
pub fn find_winner(board: &Board) -> Option<Player> {
    [Player::Red, Player::Yellow]
        .into_iter()
        .find(|&player| has_line(board, player))
}
