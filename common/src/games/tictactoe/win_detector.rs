use super::types::{CELL_COUNT, Cell, Mark, Outcome};

/// Rows, then columns, then the two diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// First fully-owned line in `WIN_LINES` order, if any.
pub fn check_win(cells: &[Cell; CELL_COUNT]) -> Option<Mark> {
    check_win_with_line(cells).map(|(mark, _)| mark)
}

pub fn check_win_with_line(cells: &[Cell; CELL_COUNT]) -> Option<(Mark, [usize; 3])> {
    for line in WIN_LINES {
        let [a, b, c] = line;
        if let Cell::Marked(mark) = cells[a]
            && cells[b] == cells[a]
            && cells[c] == cells[a]
        {
            return Some((mark, line));
        }
    }
    None
}

pub fn evaluate_cells(cells: &[Cell; CELL_COUNT]) -> Outcome {
    if let Some(mark) = check_win(cells) {
        return Outcome::Win(mark);
    }

    if cells.iter().all(|cell| !cell.is_empty()) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
