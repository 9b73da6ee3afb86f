//! Prompt commands typed by the player.

use anyhow::{anyhow, bail, Result};
use shared::domain::Coord;

pub const HELP: &str = "\
commands:
  create            host a new room
  join <code>       join an existing room
  <square>          tap a square, e.g. `e2` or `6,4` (tap twice to move)
  tap <square>      same as above
  ping              ask the server for a pong
  show              redraw the board
  help              this text
  quit              disconnect and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create,
    Join(String),
    Tap(Coord),
    Ping,
    Show,
    Help,
    Quit,
}

/// Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "create" | "host" => Command::Create,
        "join" => {
            if rest.is_empty() {
                bail!("usage: join <code>");
            }
            Command::Join(rest.to_string())
        }
        "tap" | "t" => Command::Tap(Coord::parse(rest)?),
        "ping" => Command::Ping,
        "show" | "board" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Tap(
            Coord::parse(line).map_err(|_| anyhow!("unknown command {line:?}; try `help`"))?,
        ),
    };
    Ok(Some(command))
}
