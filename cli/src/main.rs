use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use sweeper_core::{Coord, Game, GameConfig};

use command::Command;

mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Play minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Number of rows
    #[arg(long, default_value_t = GameConfig::DEFAULT_SIZE.0)]
    rows: Coord,

    /// Number of columns
    #[arg(long, default_value_t = GameConfig::DEFAULT_SIZE.1)]
    cols: Coord,

    /// Number of mines, defaults to one per ten cells
    #[arg(short, long)]
    mines: Option<u16>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        let size = (self.rows, self.cols);
        match self.mines {
            Some(mines) => GameConfig::new(size, mines),
            None => GameConfig::with_default_density(size),
        }
    }
}

const HELP: &str = "commands: r <row> <col> reveal, f <row> <col> flag, n restart, q quit";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let config = args.game_config();
    let mut game = Game::new(config, seed)
        .with_context(|| format!("cannot start a game with {config:?}"))?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{HELP}")?;
    write!(stdout, "{}", render::render(&game))?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err:#}\n{HELP}")?;
                continue;
            }
        };

        let applied = match command {
            Command::Reveal(coords) => game.on_reveal(coords).map(|outcome| outcome.has_update()),
            Command::Flag(coords) => game.on_flag(coords).map(|outcome| outcome.has_update()),
            Command::Restart => {
                game.on_restart();
                Ok(true)
            }
            Command::Quit => break,
        };

        match applied {
            Ok(true) => write!(stdout, "{}", render::render(&game))?,
            Ok(false) if game.is_finished() => writeln!(stdout, "game over, n to restart")?,
            Ok(false) => writeln!(stdout, "nothing to do there")?,
            Err(err) => {
                log::warn!("{:?} rejected: {}", command, err);
                writeln!(stdout, "{err}")?;
            }
        }
    }

    Ok(())
}
