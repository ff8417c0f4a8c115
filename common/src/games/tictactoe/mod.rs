mod board;
mod bot_controller;
mod error;
mod game_state;
mod types;
mod win_detector;

pub use board::{BoardState, get_available_moves};
pub use bot_controller::{
    WIN_SCORE, calculate_medium_move, calculate_minimax_move, score, score_moves, select_move,
};
pub use error::IllegalMoveError;
pub use game_state::{BotSettings, TicTacToeGameState};
pub use types::{CELL_COUNT, Cell, Difficulty, Mark, Outcome};
pub use win_detector::{WIN_LINES, check_win, check_win_with_line, evaluate_cells};
