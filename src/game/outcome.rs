use super::board::Board;
use super::player::Player;
use super::win::{check_win_at, find_winner};

/// Classification of a board.
///
/// `Undecided` covers both a live game and a position cut off by the search
/// horizon; callers that need to tell them apart track the depth themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    RedWin,
    YellowWin,
    Tie,
    Undecided,
}

impl GameResult {
    pub const ALL: [GameResult; 4] = [
        GameResult::RedWin,
        GameResult::YellowWin,
        GameResult::Tie,
        GameResult::Undecided,
    ];

    pub fn win_for(player: Player) -> Self {
        match player {
            Player::Red => GameResult::RedWin,
            Player::Yellow => GameResult::YellowWin,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::RedWin => Some(Player::Red),
            GameResult::YellowWin => Some(Player::Yellow),
            GameResult::Tie | GameResult::Undecided => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != GameResult::Undecided
    }

    pub fn name(self) -> &'static str {
        match self {
            GameResult::RedWin => "red_win",
            GameResult::YellowWin => "yellow_win",
            GameResult::Tie => "tie",
            GameResult::Undecided => "undecided",
        }
    }
}

/// Classify a board with no known last move (full scan)
pub fn classify(board: &Board) -> GameResult {
    match find_winner(board) {
        Some(player) => GameResult::win_for(player),
        None if board.is_full() => GameResult::Tie,
        None => GameResult::Undecided,
    }
}

/// Classify a board right after `player` placed a piece at (row, col).
///
/// Assumes the board was undecided before that move.
pub fn classify_after(board: &Board, row: usize, col: usize, player: Player) -> GameResult {
    if check_win_at(board, row, col) {
        GameResult::win_for(player)
    } else if board.is_full() {
        GameResult::Tie
    } else {
        GameResult::Undecided
    }
}
