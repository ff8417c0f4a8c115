use std::time::Duration;

use common::games::SessionRng;
use common::games::tictactoe::{BotSettings, TicTacToeGameState, select_move};
use common::log;
use tokio::io::{AsyncBufReadExt, BufReader};

pub struct RunnerSettings {
    pub bot: Option<BotSettings>,
    pub bot_delay: Duration,
    pub seed: Option<u64>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Place(usize),
    Restart,
    Quit,
    Unknown(String),
}

/// Cells are typed 1-9, matching the numbers drawn on empty cells.
pub fn parse_command(line: &str) -> Command {
    let input = line.trim().to_ascii_lowercase();
    match input.as_str() {
        "q" | "quit" | "exit" => Command::Quit,
        "r" | "restart" => Command::Restart,
        _ => match input.parse::<usize>() {
            Ok(cell) if (1..=9).contains(&cell) => Command::Place(cell - 1),
            _ => Command::Unknown(input),
        },
    }
}

pub fn render(game: &TicTacToeGameState) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&game.board().to_string());
    out.push('\n');
    out.push_str(&game.status_text());
    if game.is_over() {
        out.push_str("  (r: restart, q: quit)");
    }
    out
}

pub async fn run_game(settings: RunnerSettings) -> Result<(), String> {
    let mut rng = match settings.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Starting game, bot: {:?}, seed: {}", settings.bot, rng.seed());

    let mut game = TicTacToeGameState::new(settings.bot);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", render(&game));

    loop {
        if let Some(bot) = game.bot()
            && game.is_bot_turn()
        {
            tokio::time::sleep(settings.bot_delay).await;

            let board = game.board().clone();
            let (selection, returned_rng) = tokio::task::spawn_blocking(move || {
                let selection = select_move(&board, bot.difficulty, &mut rng);
                (selection, rng)
            })
            .await
            .map_err(|e| format!("Bot search failed: {}", e))?;
            rng = returned_rng;

            game.apply_bot_selection(selection);
            println!("{}", render(&game));
            continue;
        }

        let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| format!("Failed to read input: {}", e))?
        else {
            break;
        };

        match parse_command(&line) {
            Command::Quit => break,
            Command::Restart => {
                game.reset();
                println!("{}", render(&game));
            }
            Command::Place(index) => match game.place_mark(index) {
                Ok(_) => println!("{}", render(&game)),
                Err(e) => println!("{}", e),
            },
            Command::Unknown(input) if input.is_empty() => {}
            Command::Unknown(input) => {
                println!("Unknown command '{}', type 1-9, r or q", input);
            }
        }
    }

    log!("Leaving game");
    Ok(())
}
