use kaboom_core::{Coord, Coord2};
use thiserror::Error;

pub const HELP: &str = "\
Commands (rows and columns count from 0):
  r ROW COL   reveal a cell
  f ROW COL   flag or unflag a cell
  c ROW COL   reveal around a number whose mines are all flagged
  n           start a new game
  j           print the board as JSON
  h           show this help
  q           quit";

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Chord(Coord2),
    Restart,
    Json,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command {0:?}, type 'h' for help")]
    Unknown(String),
    #[error("'{0}' needs a row and a column")]
    MissingCoords(&'static str),
    #[error("Invalid coordinate {0:?}")]
    InvalidCoord(String),
    #[error("Too many arguments for '{0}'")]
    TrailingInput(&'static str),
}

impl Command {
    /// Parses a line of input, `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };

        let (name, command): (&'static str, fn(Coord2) -> Command) =
            match verb.to_ascii_lowercase().as_str() {
                "r" | "reveal" => ("reveal", Command::Reveal),
                "f" | "flag" => ("flag", Command::Flag),
                "c" | "chord" => ("chord", Command::Chord),
                "n" | "new" | "restart" => return no_args(words, "new", Command::Restart),
                "j" | "json" => return no_args(words, "json", Command::Json),
                "h" | "help" | "?" => return no_args(words, "help", Command::Help),
                "q" | "quit" | "exit" => return no_args(words, "quit", Command::Quit),
                _ => return Err(CommandError::Unknown(verb.to_owned())),
            };

        let (Some(row), Some(col)) = (words.next(), words.next()) else {
            return Err(CommandError::MissingCoords(name));
        };
        let coords = (parse_coord(row)?, parse_coord(col)?);
        if words.next().is_some() {
            return Err(CommandError::TrailingInput(name));
        }
        Ok(Some(command(coords)))
    }
}

fn no_args<'a>(
    mut rest: impl Iterator<Item = &'a str>,
    name: &'static str,
    command: Command,
) -> Result<Option<Command>, CommandError> {
    match rest.next() {
        Some(_) => Err(CommandError::TrailingInput(name)),
        None => Ok(Some(command)),
    }
}

fn parse_coord(word: &str) -> Result<Coord, CommandError> {
    word.parse()
        .map_err(|_| CommandError::InvalidCoord(word.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cell_commands() {
        assert_eq!(Command::parse("r 3 4"), Ok(Some(Command::Reveal((3, 4)))));
        assert_eq!(Command::parse("  FLAG 0 12 "), Ok(Some(Command::Flag((0, 12)))));
        assert_eq!(Command::parse("c 15 29"), Ok(Some(Command::Chord((15, 29)))));
    }

    #[test]
    fn parses_session_commands() {
        assert_eq!(Command::parse("n"), Ok(Some(Command::Restart)));
        assert_eq!(Command::parse("json"), Ok(Some(Command::Json)));
        assert_eq!(Command::parse("?"), Ok(Some(Command::Help)));
        assert_eq!(Command::parse("quit"), Ok(Some(Command::Quit)));
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            Command::parse("boom"),
            Err(CommandError::Unknown("boom".to_owned()))
        );
        assert_eq!(
            Command::parse("r 3"),
            Err(CommandError::MissingCoords("reveal"))
        );
        assert_eq!(
            Command::parse("f -1 2"),
            Err(CommandError::InvalidCoord("-1".to_owned()))
        );
        assert_eq!(
            Command::parse("c 1 2 3"),
            Err(CommandError::TrailingInput("chord"))
        );
        assert_eq!(Command::parse("q now"), Err(CommandError::TrailingInput("quit")));
    }
}
