use anyhow::{Context, Result, bail};
use sapper_core::{Action, Coord, Position};

pub const HELP: &str = "\
commands:
  r X Y   reveal the tile at column X, row Y (or chord on a revealed one)
  f X Y   toggle a flag on the tile at column X, row Y
  n       start a new game
  h       show this help
  q       quit";

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Act(Position, Action),
    NewGame,
    Help,
    Quit,
}

pub fn parse(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Command::Help);
    };

    let command = match verb {
        "r" | "reveal" => Command::Act(parse_position(&mut words)?, Action::Primary),
        "f" | "flag" => Command::Act(parse_position(&mut words)?, Action::Secondary),
        "n" | "new" => Command::NewGame,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" => Command::Quit,
        other => bail!("unknown command {other:?}, try h"),
    };

    if let Some(extra) = words.next() {
        bail!("unexpected argument {extra:?}");
    }
    Ok(command)
}

fn parse_position<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Position> {
    let mut coord = |axis: &str| -> Result<Coord> {
        let word = words.next().with_context(|| format!("missing {axis} coordinate"))?;
        word.parse()
            .with_context(|| format!("invalid {axis} coordinate {word:?}"))
    };
    let x = coord("x")?;
    let y = coord("y")?;
    Ok(Position::new(x, y))
}
