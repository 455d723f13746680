use crate::error::MoveError;

use super::player::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Widest board the input boundary accepts.
pub const MAX_COLS: usize = 64;

/// Tallest board the input boundary accepts.
pub const MAX_ROWS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

/// Fixed-size grid. Row 0 is the bottom row.
///
/// Each coordinate holds `Some(cell)` when playable and `None` when the
/// coordinate is masked out of play. Masked cells never hold pieces, never
/// count toward a line of four and act as a floor for the cell above them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Cell>>,
}

/// Canonical encoding of a board's contents, used as a memo key.
///
/// Two bits per cell packed into words; the dimensions are part of the key so
/// boards of different shapes never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardKey {
    rows: usize,
    cols: usize,
    words: Box<[u64]>,
}

const CELLS_PER_WORD: usize = 32;

impl Board {
    /// Create an empty, fully playable board
    pub fn new(rows: usize, cols: usize) -> Self {
        Board {
            rows,
            cols,
            cells: vec![Some(Cell::Empty); rows * cols],
        }
    }

    /// The canonical 6x7 board
    pub fn standard() -> Self {
        Self::new(ROWS, COLS)
    }

    /// Create an empty board where only coordinates accepted by `playable`
    /// can hold pieces
    pub fn with_mask(rows: usize, cols: usize, playable: impl Fn(usize, usize) -> bool) -> Self {
        let mut board = Self::new(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                if !playable(row, col) {
                    let idx = board.index(row, col);
                    board.cells[idx] = None;
                }
            }
        }
        board
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Get the cell at a position; `None` for masked or out-of-range coordinates
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[self.index(row, col)]
    }

    /// Signed lookup used by directional scans
    pub(crate) fn get_signed(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        self.get(row as usize, col as usize)
    }

    pub fn is_playable(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some()
    }

    /// Raw write with no gravity or support checks. Used when building boards
    /// from external input and by the gravity resolver.
    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Option<Cell>) {
        let idx = self.index(row, col);
        self.cells[idx] = cell;
    }

    /// Highest playable row in a column
    fn top_playable(&self, col: usize) -> Option<usize> {
        (0..self.rows).rev().find(|&row| self.is_playable(row, col))
    }

    fn is_supported_at(&self, row: usize, col: usize) -> bool {
        if row == 0 {
            return true;
        }
        !matches!(self.get(row - 1, col), Some(Cell::Empty))
    }

    /// Row where a piece dropped in `col` lands
    fn landing_row(&self, col: usize) -> Option<usize> {
        (0..self.rows).find(|&row| {
            self.get(row, col) == Some(Cell::Empty) && self.is_supported_at(row, col)
        })
    }

    /// Check if a column accepts no more pieces
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols {
            return true;
        }
        match self.top_playable(col) {
            Some(row) => self.get(row, col) != Some(Cell::Empty),
            None => true,
        }
    }

    /// Columns whose topmost playable cell is empty, in ascending order
    pub fn valid_columns(&self) -> Vec<usize> {
        (0..self.cols).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Drop a piece in a column, returns the `(row, column)` where it landed.
    ///
    /// The board is left untouched on error.
    pub fn apply(&mut self, column: usize, player: Player) -> Result<(usize, usize), MoveError> {
        if column >= self.cols {
            return Err(MoveError::InvalidColumn {
                column,
                cols: self.cols,
            });
        }

        let row = self
            .landing_row(column)
            .ok_or(MoveError::ColumnFull { column })?;
        self.set(row, column, Some(player.to_cell()));
        Ok((row, column))
    }

    /// True when every column's topmost playable cell is occupied
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| self.is_column_full(col))
    }

    /// Number of pieces on the board
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Some(Cell::Red | Cell::Yellow)))
            .count()
    }

    /// Number of playable cells still empty
    pub fn empty_cells(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Some(Cell::Empty)))
            .count()
    }

    /// Player to move, derived from piece count parity (Red moves first)
    pub fn mover(&self) -> Player {
        if self.piece_count() % 2 == 0 {
            Player::Red
        } else {
            Player::Yellow
        }
    }

    /// First occupied cell (scanning bottom-up, column by column) that rests
    /// on an empty cell
    pub fn first_unsupported(&self) -> Option<(usize, usize)> {
        for col in 0..self.cols {
            for row in 1..self.rows {
                let occupied = matches!(self.get(row, col), Some(Cell::Red | Cell::Yellow));
                if occupied && !self.is_supported_at(row, col) {
                    return Some((row, col));
                }
            }
        }
        None
    }

    /// Check the support invariant: no floating pieces
    pub fn is_supported(&self) -> bool {
        self.first_unsupported().is_none()
    }

    /// Canonical encoding of every cell
    pub fn key(&self) -> BoardKey {
        let word_count = self.cells.len().div_ceil(CELLS_PER_WORD);
        let mut words = vec![0u64; word_count];
        for (i, cell) in self.cells.iter().enumerate() {
            let bits: u64 = match cell {
                Some(Cell::Empty) => 0,
                Some(Cell::Red) => 1,
                Some(Cell::Yellow) => 2,
                None => 3,
            };
            words[i / CELLS_PER_WORD] |= bits << ((i % CELLS_PER_WORD) * 2);
        }
        BoardKey {
            rows: self.rows,
            cols: self.cols,
            words: words.into_boxed_slice(),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
