use crate::games::SessionRng;
use super::board::{BoardState, get_available_moves};
use super::types::{CELL_COUNT, Cell, Difficulty, Mark, Outcome};
use super::win_detector::evaluate_cells;

pub const WIN_SCORE: i32 = 10;

/// Score of a finished game from the point of view of `bot_mark`, `None`
/// while the game is still running. Wins and losses are not discounted by
/// depth.
pub fn score(outcome: Outcome, bot_mark: Mark) -> Option<i32> {
    match outcome {
        Outcome::Win(mark) if mark == bot_mark => Some(WIN_SCORE),
        Outcome::Win(_) => Some(-WIN_SCORE),
        Outcome::Draw => Some(0),
        Outcome::InProgress => None,
    }
}

/// Picks a cell for whoever is to move on `board`. `None` means no move was
/// found; the board is left for the caller to handle.
pub fn select_move(
    board: &BoardState,
    difficulty: Difficulty,
    rng: &mut SessionRng,
) -> Option<usize> {
    match difficulty {
        Difficulty::Easy => calculate_random_move(board, rng),
        Difficulty::Medium => calculate_medium_move(board),
        Difficulty::Hard => calculate_minimax_move(board),
    }
}

fn calculate_random_move(board: &BoardState, rng: &mut SessionRng) -> Option<usize> {
    if board.evaluate().is_terminal() {
        return None;
    }
    rng.choose(&get_available_moves(board)).copied()
}

/// First move with the strictly greatest score.
pub fn calculate_minimax_move(board: &BoardState) -> Option<usize> {
    let mut best_move = None;
    let mut best_score = i32::MIN;

    for (index, score) in score_moves(board) {
        if score > best_score {
            best_score = score;
            best_move = Some(index);
        }
    }

    best_move
}

/// Threshold starts at zero and ties go to the later move, so losing-only
/// positions yield no move at all.
pub fn calculate_medium_move(board: &BoardState) -> Option<usize> {
    let mut best_move = None;
    let mut best_score = 0;

    for (index, score) in score_moves(board) {
        if score >= best_score {
            best_score = score;
            best_move = Some(index);
        }
    }

    best_move
}

/// Exact minimax score of every legal move for the player to move, in
/// ascending cell order. Empty for finished games.
pub fn score_moves(board: &BoardState) -> Vec<(usize, i32)> {
    if board.evaluate().is_terminal() {
        return Vec::new();
    }

    let bot_mark = board.current_player();
    let mut cells = *board.cells();

    get_available_moves(board)
        .into_iter()
        .map(|index| {
            cells[index] = Cell::Marked(bot_mark);
            let score = minimax(&mut cells, false, bot_mark, i32::MIN, i32::MAX);
            cells[index] = Cell::Empty;
            (index, score)
        })
        .collect()
}

fn minimax(
    cells: &mut [Cell; CELL_COUNT],
    is_maximizing: bool,
    bot_mark: Mark,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    if let Some(value) = score(evaluate_cells(cells), bot_mark) {
        return value;
    }

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for index in 0..CELL_COUNT {
            if !cells[index].is_empty() {
                continue;
            }

            cells[index] = Cell::Marked(bot_mark);
            let eval = minimax(cells, false, bot_mark, alpha, beta);
            cells[index] = Cell::Empty;

            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let opponent_mark = bot_mark.opponent();
        let mut min_eval = i32::MAX;
        for index in 0..CELL_COUNT {
            if !cells[index].is_empty() {
                continue;
            }

            cells[index] = Cell::Marked(opponent_mark);
            let eval = minimax(cells, true, bot_mark, alpha, beta);
            cells[index] = Cell::Empty;

            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: Cell = Cell::Empty;
    const X: Cell = Cell::Marked(Mark::X);
    const O: Cell = Cell::Marked(Mark::O);
    const CORNERS: [usize; 4] = [0, 2, 6, 8];

    fn full_minimax(cells: &mut [Cell; CELL_COUNT], mover: Mark, bot_mark: Mark) -> i32 {
        if let Some(value) = score(evaluate_cells(cells), bot_mark) {
            return value;
        }
        let mut scores = Vec::new();
        for index in 0..CELL_COUNT {
            if cells[index].is_empty() {
                cells[index] = Cell::Marked(mover);
                scores.push(full_minimax(cells, mover.opponent(), bot_mark));
                cells[index] = Cell::Empty;
            }
        }
        if mover == bot_mark {
            scores.into_iter().max().unwrap()
        } else {
            scores.into_iter().min().unwrap()
        }
    }

    fn center_opening() -> BoardState {
        let mut board = BoardState::new();
        board.apply_move(4, Mark::X).unwrap();
        board
    }

    fn lost_for_o() -> BoardState {
        // X threatens both 2 and 6, O cannot cover both.
        BoardState::from_cells([X, X, E, X, O, E, E, E, O], Mark::O)
    }

    #[test]
    fn test_score_is_relative_to_bot_mark() {
        assert_eq!(score(Outcome::Win(Mark::O), Mark::O), Some(10));
        assert_eq!(score(Outcome::Win(Mark::X), Mark::O), Some(-10));
        assert_eq!(score(Outcome::Draw, Mark::O), Some(0));
        assert_eq!(score(Outcome::Win(Mark::X), Mark::X), Some(10));
    }

    #[test]
    fn test_running_game_has_no_score() {
        assert_eq!(score(Outcome::InProgress, Mark::O), None);
        assert_eq!(score(Outcome::InProgress, Mark::X), None);
    }

    #[test]
    fn test_pruned_scores_match_plain_minimax() {
        let boards = [
            center_opening(),
            lost_for_o(),
            BoardState::from_cells([X, E, E, E, E, E, E, E, O], Mark::X),
            BoardState::from_cells([X, O, X, O, O, E, X, E, E], Mark::O),
        ];

        for board in boards {
            let mover = board.current_player();
            for (index, pruned) in score_moves(&board) {
                let mut cells = *board.cells();
                cells[index] = Cell::Marked(mover);
                let plain = full_minimax(&mut cells, mover.opponent(), mover);
                assert_eq!(pruned, plain, "cell {} on\n{}", index, board);
            }
        }
    }

    #[test]
    fn test_hard_answers_center_with_corner() {
        let board = center_opening();
        let chosen = calculate_minimax_move(&board).unwrap();
        assert!(CORNERS.contains(&chosen));
        assert_eq!(chosen, 0);
    }

    #[test]
    fn test_edge_reply_to_center_loses() {
        let scores = score_moves(&center_opening());
        for (index, score) in scores {
            if CORNERS.contains(&index) {
                assert_eq!(score, 0);
            } else {
                assert_eq!(score, -WIN_SCORE);
            }
        }
    }

    #[test]
    fn test_hard_takes_immediate_win() {
        let mut board = BoardState::from_cells([X, O, X, O, O, E, X, E, E], Mark::O);
        let chosen = calculate_minimax_move(&board).unwrap();
        // 5 completes the middle row, 7 the middle column; the first wins the tie.
        assert_eq!(chosen, 5);
        assert_eq!(board.apply_move(chosen, Mark::O), Ok(Outcome::Win(Mark::O)));
        assert_eq!(board.evaluate(), Outcome::Win(Mark::O));
    }

    #[test]
    fn test_winning_on_seven_completes_middle_column() {
        let mut board = BoardState::from_cells([X, O, X, O, O, E, X, E, E], Mark::O);
        assert_eq!(board.apply_move(7, Mark::O), Ok(Outcome::Win(Mark::O)));
    }

    #[test]
    fn test_medium_prefers_last_of_equal_scores() {
        assert_eq!(calculate_medium_move(&center_opening()), Some(8));

        let board = BoardState::from_cells([X, O, X, O, O, E, X, E, E], Mark::O);
        assert_eq!(calculate_medium_move(&board), Some(8));
        assert_eq!(calculate_minimax_move(&board), Some(5));
    }

    #[test]
    fn test_medium_gives_up_where_hard_still_moves() {
        let board = lost_for_o();
        let scores = score_moves(&board);
        assert!(scores.iter().all(|&(_, score)| score == -WIN_SCORE));

        let hard = calculate_minimax_move(&board);
        assert_eq!(hard, Some(2));
        assert_eq!(calculate_medium_move(&board), None);

        let hard_score = scores
            .iter()
            .find(|&&(index, _)| Some(index) == hard)
            .map(|&(_, score)| score)
            .unwrap();
        assert_eq!(hard_score, -WIN_SCORE);
    }

    #[test]
    fn test_medium_never_picks_losing_move_when_draw_exists() {
        let board = center_opening();
        let chosen = calculate_medium_move(&board).unwrap();
        let scores = score_moves(&board);
        let chosen_score = scores.iter().find(|&&(i, _)| i == chosen).unwrap().1;
        assert!(chosen_score >= 0);
    }

    #[test]
    fn test_hard_never_loses_to_perfect_opponent() {
        for opening in 0..CELL_COUNT {
            let mut board = BoardState::new();
            board.apply_move(opening, Mark::X).unwrap();

            while !board.evaluate().is_terminal() {
                let mover = board.current_player();
                let chosen = calculate_minimax_move(&board).unwrap();
                board.apply_move(chosen, mover).unwrap();
            }

            assert_ne!(board.evaluate(), Outcome::Win(Mark::X), "opening {}", opening);
            assert_eq!(board.evaluate(), Outcome::Draw, "opening {}", opening);
        }
    }

    fn hard_o_survives_every_line(board: &BoardState) {
        match board.evaluate() {
            Outcome::Win(Mark::X) => panic!("O lost on\n{}", board),
            Outcome::Win(Mark::O) | Outcome::Draw => return,
            Outcome::InProgress => {}
        }

        if board.current_player() == Mark::O {
            let chosen = calculate_minimax_move(board).unwrap();
            let mut next = board.clone();
            next.apply_move(chosen, Mark::O).unwrap();
            hard_o_survives_every_line(&next);
        } else {
            for index in board.legal_moves() {
                let mut next = board.clone();
                next.apply_move(index, Mark::X).unwrap();
                hard_o_survives_every_line(&next);
            }
        }
    }

    #[test]
    fn test_hard_never_loses_against_any_opponent() {
        hard_o_survives_every_line(&BoardState::new());
    }

    #[test]
    fn test_hard_plays_for_x_too() {
        // X completes the top row instead of blocking O's middle row.
        let board = BoardState::from_cells([X, X, E, O, O, E, E, E, E], Mark::X);
        assert_eq!(calculate_minimax_move(&board), Some(2));
    }

    #[test]
    fn test_hard_blocks_immediate_threat() {
        let board = BoardState::from_cells([X, X, E, E, O, E, E, E, E], Mark::O);
        assert_eq!(calculate_minimax_move(&board), Some(2));
    }

    #[test]
    fn test_select_move_does_not_mutate_board() {
        let board = center_opening();
        let before = board.clone();
        let mut rng = SessionRng::new(7);
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            select_move(&board, difficulty, &mut rng);
            assert_eq!(board, before);
        }
    }

    #[test]
    fn test_easy_returns_only_legal_moves() {
        let board = BoardState::from_cells([X, O, X, E, O, E, E, X, E], Mark::O);
        let legal = board.legal_moves();
        let mut rng = SessionRng::new(42);
        for _ in 0..100 {
            let chosen = select_move(&board, Difficulty::Easy, &mut rng).unwrap();
            assert!(legal.contains(&chosen));
        }
    }

    #[test]
    fn test_easy_is_reproducible_for_seed() {
        let board = BoardState::new();
        let mut first = SessionRng::new(1234);
        let mut second = SessionRng::new(1234);
        let a: Vec<_> = (0..20)
            .map(|_| select_move(&board, Difficulty::Easy, &mut first))
            .collect();
        let b: Vec<_> = (0..20)
            .map(|_| select_move(&board, Difficulty::Easy, &mut second))
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_move_on_finished_board() {
        let mut rng = SessionRng::new(0);
        let full = BoardState::from_cells([X, O, X, X, O, O, O, X, X], Mark::O);
        let won = BoardState::from_cells([O, O, O, X, X, E, X, E, E], Mark::X);
        for board in [full, won] {
            for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
                assert_eq!(select_move(&board, difficulty, &mut rng), None);
            }
        }
    }
}
