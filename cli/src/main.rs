use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sapper_core::{Board, Coord, Game, GameConfig, Position, TileCount};
use std::io::{self, BufRead, Write};
use web_time::Instant;

use command::Command;
use presenter::TextPresenter;

mod command;
mod presenter;

#[derive(Copy, Clone, Debug, PartialEq, ValueEnum)]
enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl Preset {
    fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::beginner(),
            Self::Intermediate => GameConfig::intermediate(),
            Self::Expert => GameConfig::expert(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Clear the minefield without stepping on a mine", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board dimensions and mine count to start from
    #[arg(short, long, value_enum, default_value_t = Preset::Beginner)]
    preset: Preset,

    /// Board width, overrides the preset
    #[arg(long)]
    width: Option<Coord>,

    /// Board height, overrides the preset
    #[arg(long)]
    height: Option<Coord>,

    /// Number of mines, overrides the preset
    #[arg(short, long)]
    bombs: Option<TileCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn config(&self) -> Result<GameConfig> {
        let preset = self.preset.config();
        let size = Position::new(
            self.width.unwrap_or(preset.size.x),
            self.height.unwrap_or(preset.size.y),
        );
        let bombs = self.bombs.unwrap_or(preset.bombs);
        GameConfig::new(size, bombs).context("Invalid board configuration")
    }
}

fn new_game(config: GameConfig, seed: Option<u64>) -> Result<Game<TextPresenter>> {
    let board = match seed {
        Some(seed) => Board::with_seed(config.size, config.bombs, seed),
        None => Board::from_config(config),
    }?;
    log::debug!("New {:?} game with seed {}", config, board.seed());
    Ok(Game::new(board, TextPresenter::default()))
}

fn flush_frame(game: &mut Game<TextPresenter>, out: &mut impl Write) -> Result<()> {
    if let Some(frame) = game.presenter_mut().take_frame() {
        writeln!(out, "{frame}")?;
    }
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = args.config()?;
    let mut round = 0;
    let mut game = new_game(config, args.seed)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", command::HELP)?;
    game.tick(0.0);
    flush_frame(&mut game, &mut out)?;

    let mut last_input = Instant::now();
    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read input")?;

        let now = Instant::now();
        game.tick(now.duration_since(last_input).as_secs_f64());
        last_input = now;

        match command::parse(&line) {
            Ok(Command::Act(pos, action)) if game.board().is_in_bounds(pos) => {
                let outcome = game.handle(pos, action)?;
                log::debug!("{:?} at {} -> {:?}", action, pos, outcome);
            }
            Ok(Command::Act(pos, _)) => {
                writeln!(out, "{pos} is outside the board")?;
            }
            Ok(Command::NewGame) => {
                round += 1;
                game = new_game(config, args.seed.map(|seed| seed.wrapping_add(round)))?;
                game.tick(0.0);
            }
            Ok(Command::Help) => writeln!(out, "{}", command::HELP)?,
            Ok(Command::Quit) => break,
            Err(err) => writeln!(out, "{err:#}")?,
        }

        flush_frame(&mut game, &mut out)?;
    }

    Ok(())
}
