//! Game engine and computer opponent for 3x3 tic-tac-toe.
//!
//! [`games::tictactoe::BoardState`] holds the grid and enforces turn order,
//! [`games::tictactoe::select_move`] picks a cell for the player to move with
//! an exhaustive minimax search at the requested [`games::tictactoe::Difficulty`].

pub mod config;
pub mod games;
pub mod logger;
