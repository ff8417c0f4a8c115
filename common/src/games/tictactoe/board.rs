use std::fmt;

use super::error::IllegalMoveError;
use super::types::{CELL_COUNT, Cell, Mark, Outcome};
use super::win_detector::evaluate_cells;

pub fn get_available_moves(board: &BoardState) -> Vec<usize> {
    board.legal_moves()
}

/// The 3x3 grid in row-major order plus the mark expected to move next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    cells: [Cell; CELL_COUNT],
    current_player: Mark,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
            current_player: Mark::X,
        }
    }

    /// Builds a board from raw cells. No consistency checks are made, so
    /// positions that alternating play cannot reach are accepted.
    pub fn from_cells(cells: [Cell; CELL_COUNT], current_player: Mark) -> Self {
        Self {
            cells,
            current_player,
        }
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn current_player(&self) -> Mark {
        self.current_player
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn is_valid_move(&self, index: usize) -> bool {
        matches!(self.cell(index), Some(Cell::Empty))
    }

    pub fn apply_move(&mut self, index: usize, mark: Mark) -> Result<Outcome, IllegalMoveError> {
        if self.evaluate().is_terminal() {
            return Err(IllegalMoveError::GameOver);
        }

        if index >= CELL_COUNT {
            return Err(IllegalMoveError::OutOfRange(index));
        }

        if !self.is_valid_move(index) {
            return Err(IllegalMoveError::Occupied(index));
        }

        if mark != self.current_player {
            return Err(IllegalMoveError::WrongTurn {
                expected: self.current_player,
                got: mark,
            });
        }

        self.cells[index] = Cell::Marked(mark);
        self.current_player = mark.opponent();

        Ok(self.evaluate())
    }

    pub fn evaluate(&self) -> Outcome {
        evaluate_cells(&self.cells)
    }

    pub fn legal_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f, "---+---+---")?;
            }
            let symbols: Vec<String> = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| match cell {
                    Cell::Marked(mark) => mark.to_string(),
                    Cell::Empty => (row * 3 + col + 1).to_string(),
                })
                .collect();
            writeln!(f, " {} | {} | {} ", symbols[0], symbols[1], symbols[2])?;
        }
        Ok(())
    }
}
