use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game::{legal_moves, Board, Cell, Player, COLS, ROWS};

/// Build a board from a picture, top row first.
///
/// `.` empty, `R` red, `Y` yellow, `#` masked out of play.
pub fn board_from_rows(picture: &[&str]) -> Board {
    let rows = picture.len();
    let cols = picture.first().map_or(0, |line| line.chars().count());
    let mut board = Board::new(rows, cols);
    for (i, line) in picture.iter().enumerate() {
        let row = rows - 1 - i;
        for (col, ch) in line.chars().enumerate() {
            let cell = match ch {
                '.' => Some(Cell::Empty),
                'R' => Some(Cell::Red),
                'Y' => Some(Cell::Yellow),
                '#' => None,
                other => panic!("unexpected board character {other:?}"),
            };
            board.set(row, col, cell);
        }
    }
    board
}

/// Full 6x7 board with no line of four. Column pairs alternate the starting
/// color so every horizontal and diagonal run stops at two.
pub fn tie_board() -> Board {
    let mut board = Board::standard();
    for col in 0..COLS {
        for row in 0..ROWS {
            let cell = if (row + col / 2) % 2 == 0 {
                Cell::Red
            } else {
                Cell::Yellow
            };
            board.set(row, col, Some(cell));
        }
    }
    board
}

/// Play up to `plies` uniformly random legal moves, alternating colors from
/// Red. Calls `after_move` with the board after every placement.
pub fn random_playout(
    seed: u64,
    plies: usize,
    mut after_move: impl FnMut(&Board, (usize, usize)),
) -> Board {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::standard();
    let mut player = Player::Red;
    for _ in 0..plies {
        let moves = legal_moves(&board);
        if moves.is_empty() {
            break;
        }
        let col = moves[rng.random_range(0..moves.len())];
        let placed = board.apply(col, player).expect("legal move applies");
        after_move(&board, placed);
        player = player.other();
    }
    board
}
