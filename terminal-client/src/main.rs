mod config;
mod game_runner;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use common::config::Validate;
use common::games::tictactoe::{BotSettings, Difficulty, Mark};
use common::{log, logger};

use config::{Config, get_config_manager};
use game_runner::{RunnerSettings, run_game};

#[derive(Parser)]
#[command(name = "tictactoe_terminal", about = "Play tic-tac-toe against a minimax bot")]
struct Args {
    /// easy, medium or hard
    #[arg(long)]
    difficulty: Option<Difficulty>,
    /// Mark played by the computer (x or o)
    #[arg(long)]
    bot_mark: Option<Mark>,
    /// Two humans share the keyboard, no computer player. Pass false to
    /// turn off a saved setting
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    two_players: Option<bool>,
    /// Seed for the easy bot's random moves
    #[arg(long)]
    seed: Option<u64>,
    /// Pause before the computer moves, in milliseconds
    #[arg(long)]
    bot_delay_ms: Option<u64>,
    /// Config file, defaults to tictactoe_config.yaml next to the executable
    #[arg(long)]
    config: Option<PathBuf>,
    /// Store the effective settings back into the config file
    #[arg(long)]
    save_config: bool,
    /// Do not write log lines to stderr
    #[arg(long)]
    quiet: bool,
    /// Prefix log lines with the program name
    #[arg(long)]
    use_log_prefix: bool,
}

fn merge_args(args: &Args, config: Config) -> Config {
    Config {
        difficulty: args.difficulty.unwrap_or(config.difficulty),
        bot_mark: args.bot_mark.unwrap_or(config.bot_mark),
        bot_delay_ms: args.bot_delay_ms.unwrap_or(config.bot_delay_ms),
        two_players: args.two_players.unwrap_or(config.two_players),
        seed: args.seed.or(config.seed),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if !args.quiet {
        let prefix = args.use_log_prefix.then(|| "TicTacToe".to_string());
        logger::init_logger(prefix);
    }

    let config_manager = get_config_manager(args.config.as_deref());
    let config = merge_args(&args, config_manager.get_config()?);
    config.validate()?;

    if args.save_config {
        config_manager.set_config(&config)?;
        log!("Saved settings");
    }

    let bot = (!config.two_players).then_some(BotSettings {
        mark: config.bot_mark,
        difficulty: config.difficulty,
    });

    println!("Type 1-9 to place a mark, r to restart, q to quit.");

    run_game(RunnerSettings {
        bot,
        bot_delay: Duration::from_millis(config.bot_delay_ms),
        seed: config.seed,
    })
    .await?;

    Ok(())
}
