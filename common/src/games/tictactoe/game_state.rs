use crate::games::SessionRng;
use crate::log;
use super::board::BoardState;
use super::bot_controller::select_move;
use super::error::IllegalMoveError;
use super::types::{Difficulty, Mark, Outcome};

/// Which mark the computer plays and how well.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BotSettings {
    pub mark: Mark,
    pub difficulty: Difficulty,
}

/// One game as the UI sees it: the board, the optional computer player and
/// the last placed cell.
#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    board: BoardState,
    bot: Option<BotSettings>,
    last_move: Option<usize>,
    bot_gave_up: bool,
}

impl TicTacToeGameState {
    pub fn new(bot: Option<BotSettings>) -> Self {
        Self::from_board(BoardState::new(), bot)
    }

    /// Continues a game from an already set up position.
    pub fn from_board(board: BoardState, bot: Option<BotSettings>) -> Self {
        Self {
            board,
            bot,
            last_move: None,
            bot_gave_up: false,
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn bot(&self) -> Option<BotSettings> {
        self.bot
    }

    pub fn outcome(&self) -> Outcome {
        self.board.evaluate()
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    /// Set when the computer found no move. The board is left as it was and
    /// the game ends there.
    pub fn bot_gave_up(&self) -> bool {
        self.bot_gave_up
    }

    pub fn is_over(&self) -> bool {
        self.bot_gave_up || self.outcome().is_terminal()
    }

    pub fn is_bot_turn(&self) -> bool {
        match self.bot {
            Some(bot) => !self.is_over() && self.board.current_player() == bot.mark,
            None => false,
        }
    }

    /// Places the current player's mark for a human move.
    pub fn place_mark(&mut self, index: usize) -> Result<Outcome, IllegalMoveError> {
        let mark = self.board.current_player();

        if self.bot_gave_up {
            return Err(IllegalMoveError::GameOver);
        }

        if self.is_bot_turn() {
            return Err(IllegalMoveError::WrongTurn {
                expected: mark,
                got: mark.opponent(),
            });
        }

        let outcome = self.board.apply_move(index, mark)?;
        self.last_move = Some(index);
        log!("{} placed on cell {}", mark, index);
        log_if_over(outcome);
        Ok(outcome)
    }

    /// Runs the search for the computer player and applies its choice.
    pub fn play_bot_turn(&mut self, rng: &mut SessionRng) -> Option<Outcome> {
        let bot = self.bot?;
        if !self.is_bot_turn() {
            return None;
        }
        let selection = select_move(&self.board, bot.difficulty, rng);
        self.apply_bot_selection(selection)
    }

    /// Applies a move chosen by `select_move` for the computer player. A
    /// missing selection ends the game without touching the board.
    pub fn apply_bot_selection(&mut self, selection: Option<usize>) -> Option<Outcome> {
        let bot = self.bot?;
        if !self.is_bot_turn() {
            return None;
        }

        let Some(index) = selection else {
            log!("{} ({}) found no move, game over", bot.mark, bot.difficulty);
            self.bot_gave_up = true;
            return None;
        };

        match self.board.apply_move(index, bot.mark) {
            Ok(outcome) => {
                self.last_move = Some(index);
                log!("{} ({}) placed on cell {}", bot.mark, bot.difficulty, index);
                log_if_over(outcome);
                Some(outcome)
            }
            Err(e) => {
                log!("Rejected bot move {}: {}", index, e);
                None
            }
        }
    }

    pub fn reset(&mut self) {
        self.board.reset();
        self.last_move = None;
        self.bot_gave_up = false;
        log!("Game restarted");
    }

    pub fn status_text(&self) -> String {
        let outcome = self.outcome();
        let current = self.board.current_player();

        if let Some(mark) = outcome.winner() {
            format!("{} wins!", mark)
        } else if outcome == Outcome::Draw {
            "It's a tie!".to_string()
        } else if self.bot_gave_up {
            format!("{} found no move, game over", current)
        } else if self.is_bot_turn() {
            format!("{} is thinking...", current)
        } else {
            format!("{} to move", current)
        }
    }
}

fn log_if_over(outcome: Outcome) {
    match outcome {
        Outcome::Win(mark) => log!("Game over, {} wins", mark),
        Outcome::Draw => log!("Game over, draw"),
        Outcome::InProgress => {}
    }
}
