use derive_more::{Display, Error};

use super::types::Mark;

/// A move the board refused. The board is never modified when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum IllegalMoveError {
    #[display("Position {} is out of bounds", _0)]
    OutOfRange(#[error(not(source))] usize),
    #[display("Cell {} is already marked", _0)]
    Occupied(#[error(not(source))] usize),
    #[display("Not {}'s turn, {} is expected to move", got, expected)]
    WrongTurn { expected: Mark, got: Mark },
    #[display("Game is already over")]
    GameOver,
}
