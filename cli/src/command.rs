use std::str::FromStr;

use anyhow::{Context, bail};
use sweeper_core::Coord2;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Restart,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };

        let command = match verb {
            "r" | "reveal" => Command::Reveal(parse_coords(&mut words)?),
            "f" | "flag" => Command::Flag(parse_coords(&mut words)?),
            "n" | "new" | "restart" => Command::Restart,
            "q" | "quit" => Command::Quit,
            other => bail!("unknown command {other:?}, expected r, f, n or q"),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected argument {extra:?}");
        }
        Ok(command)
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let mut next = |axis: &str| -> anyhow::Result<u8> {
        let word = words.next().with_context(|| format!("missing {axis}"))?;
        word.parse()
            .with_context(|| format!("invalid {axis} {word:?}"))
    };
    let row = next("row")?;
    let col = next("column")?;
    Ok((row, col))
}
