//! Board input boundary.
//!
//! External boards arrive as cell values in {-1, 0, 1, null}: 1 is Red, -1 is
//! Yellow, 0 is empty and null masks the coordinate out of play. Everything
//! here is rejected before a search starts; the engine itself assumes a valid
//! board.

use crate::error::InvalidBoardError;

use super::board::{Board, Cell, MAX_COLS, MAX_ROWS};
use super::player::Player;

/// Column-major board description, each column listed bottom-first.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoardInput {
    pub rows: usize,
    pub columns: Vec<Vec<Option<i64>>>,
}

impl BoardInput {
    /// Describe an existing board in the input format
    pub fn from_board(board: &Board) -> Self {
        let columns = (0..board.cols())
            .map(|col| {
                (0..board.rows())
                    .map(|row| board.get(row, col).map(encode_cell))
                    .collect()
            })
            .collect();
        BoardInput {
            rows: board.rows(),
            columns,
        }
    }

    /// Validate and build the board
    pub fn into_board(self) -> Result<Board, InvalidBoardError> {
        let cols = self.columns.len();
        if let Some((col, column)) = self
            .columns
            .iter()
            .enumerate()
            .find(|(_, column)| column.len() != self.rows)
        {
            return Err(InvalidBoardError::ColumnLength {
                column: col,
                expected: self.rows,
                found: column.len(),
            });
        }
        check_dimensions(self.rows, cols)?;

        let mut board = Board::new(self.rows, cols);
        for (col, column) in self.columns.iter().enumerate() {
            for (row, &value) in column.iter().enumerate() {
                board.set(row, col, decode_cell(row, col, value)?);
            }
        }
        check_support(&board)?;
        Ok(board)
    }
}

/// Build a board from `(row, col) -> value` entries. Coordinates that are not
/// listed are masked out of play.
pub fn from_coordinates(
    rows: usize,
    cols: usize,
    entries: impl IntoIterator<Item = ((i64, i64), Option<i64>)>,
) -> Result<Board, InvalidBoardError> {
    check_dimensions(rows, cols)?;

    let mut board = Board::with_mask(rows, cols, |_, _| false);
    for ((row, col), value) in entries {
        let in_range = row >= 0 && col >= 0 && (row as usize) < rows && (col as usize) < cols;
        if !in_range {
            return Err(InvalidBoardError::OutOfBounds {
                row,
                col,
                rows,
                cols,
            });
        }
        let (row, col) = (row as usize, col as usize);
        board.set(row, col, decode_cell(row, col, value)?);
    }
    check_support(&board)?;
    Ok(board)
}

fn check_dimensions(rows: usize, cols: usize) -> Result<(), InvalidBoardError> {
    if rows == 0 || cols == 0 || rows > MAX_ROWS || cols > MAX_COLS {
        return Err(InvalidBoardError::Dimensions { rows, cols });
    }
    Ok(())
}

fn check_support(board: &Board) -> Result<(), InvalidBoardError> {
    match board.first_unsupported() {
        Some((row, col)) => Err(InvalidBoardError::Unsupported { row, col }),
        None => Ok(()),
    }
}

fn decode_cell(row: usize, col: usize, value: Option<i64>) -> Result<Option<Cell>, InvalidBoardError> {
    match value {
        None => Ok(None),
        Some(0) => Ok(Some(Cell::Empty)),
        Some(value) => [Player::Red, Player::Yellow]
            .into_iter()
            .find(|player| player.sign() == value)
            .map(|player| Some(player.to_cell()))
            .ok_or(InvalidBoardError::InvalidCellValue { row, col, value }),
    }
}

fn encode_cell(cell: Cell) -> i64 {
    Player::from_cell(cell).map_or(0, Player::sign)
}
