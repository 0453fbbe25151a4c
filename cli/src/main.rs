use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use kaboom_core::{BoardGenerator, CellCount, Coord, Difficulty, GameConfig, GameSession};

mod command;
mod logger;
mod render;

use command::{Command, HELP};
use render::BoardView;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
enum Preset {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl From<Preset> for Difficulty {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Easy => Difficulty::Easy,
            Preset::Medium => Difficulty::Medium,
            Preset::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset, overridden field by field with --rows, --cols and --mines
    #[arg(short, long, value_enum, default_value_t)]
    difficulty: Preset,

    #[arg(long)]
    rows: Option<Coord>,

    #[arg(long)]
    cols: Option<Coord>,

    #[arg(long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn config(&self) -> anyhow::Result<GameConfig> {
        let preset = Difficulty::from(self.difficulty).config();
        let rows = self.rows.unwrap_or(preset.rows());
        let cols = self.cols.unwrap_or(preset.cols());
        let mines = self.mines.unwrap_or(preset.mines());
        GameConfig::new(rows, cols, mines)
            .with_context(|| format!("Cannot set up a {rows}x{cols} board with {mines} mines"))
    }
}

/// What the loop does after a command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Step {
    Redraw,
    Unchanged,
    Json,
    Help,
    Quit,
}

fn step<G: BoardGenerator>(
    session: &mut GameSession<G>,
    command: Command,
) -> kaboom_core::Result<Step> {
    let changed = match command {
        Command::Reveal(coords) => session.apply_reveal(coords)?.has_update(),
        Command::Flag(coords) => session.apply_flag_toggle(coords)?.has_update(),
        Command::Chord(coords) => session.apply_chord(coords)?.has_update(),
        Command::Restart => {
            session.restart();
            true
        }
        Command::Json => return Ok(Step::Json),
        Command::Help => return Ok(Step::Help),
        Command::Quit => return Ok(Step::Quit),
    };
    Ok(if changed { Step::Redraw } else { Step::Unchanged })
}

/// Runs commands from `input` until it ends or the player quits.
fn play<G: BoardGenerator>(
    session: &mut GameSession<G>,
    input: impl BufRead,
    mut out: impl Write,
) -> anyhow::Result<()> {
    write!(out, "{}", BoardView(&session.snapshot()))?;
    writeln!(out, "Type 'h' for help.")?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        match step(session, command) {
            Ok(Step::Redraw) => write!(out, "{}", BoardView(&session.snapshot()))?,
            Ok(Step::Unchanged) => writeln!(out, "Nothing changed.")?,
            Ok(Step::Json) => {
                let json = serde_json::to_string_pretty(&session.snapshot())?;
                writeln!(out, "{json}")?;
            }
            Ok(Step::Help) => writeln!(out, "{HELP}")?,
            Ok(Step::Quit) => break,
            Err(err) => {
                log::warn!("{command:?} rejected: {err}");
                writeln!(out, "{err}")?;
            }
        }
        out.flush()?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.verbose.log_level_filter())?;

    let config = args.config()?;
    log::debug!("config: {config:?}, seed: {:?}", args.seed);
    let mut session = match args.seed {
        Some(seed) => GameSession::with_seed(config, seed),
        None => GameSession::new(config),
    };

    play(&mut session, io::stdin().lock(), io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaboom_core::{GameStatus, Grid};
    use std::io::Cursor;

    fn run(session: &mut GameSession, input: &str) -> String {
        let mut out = Vec::new();
        play(session, Cursor::new(input), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn corner_mine() -> GameSession {
        GameSession::from_grid(Grid::from_mine_coords((3, 3), &[(0, 0)]).unwrap())
    }

    #[test]
    fn opening_the_empty_corner_wins() {
        let mut session = corner_mine();

        let text = run(&mut session, "r 2 2\n");

        assert_eq!(session.status(), GameStatus::Won);
        assert!(text.contains("0 #1.\n1 11.\n2 ...\n"), "{text}");
        assert!(text.contains("You win!"));
    }

    #[test]
    fn errors_are_reported_and_play_continues() {
        let mut session = corner_mine();

        let text = run(&mut session, "r 9 9\nboom\nf 0 0\nf 0 0\n");

        assert!(text.contains("outside the (3, 3) grid"), "{text}");
        assert!(text.contains("Unknown command \"boom\""));
        assert!(text.contains("Flags: 1 / 1"));
        assert_eq!(session.flags_placed(), 0);
        assert_eq!(session.status(), GameStatus::InProgress);
    }

    #[test]
    fn quit_stops_reading() {
        let mut session = corner_mine();

        run(&mut session, "q\nr 2 2\n");

        assert_eq!(session.status(), GameStatus::InProgress);
    }

    #[test]
    fn json_hides_unrevealed_mines() {
        let mut session = corner_mine();

        let text = run(&mut session, "j\n");

        assert!(text.contains("\"status\": \"InProgress\""), "{text}");
        assert!(!text.contains("\"mine\": true"));
    }

    #[test]
    fn repeated_reveal_changes_nothing() {
        let mut session = corner_mine();

        let text = run(&mut session, "r 0 1\nr 0 1\n");

        assert!(text.contains("Nothing changed."));
        assert_eq!(session.status(), GameStatus::InProgress);
    }

    #[test]
    fn overrides_apply_on_top_of_the_preset() {
        let args = Args::parse_from(["kaboom", "-d", "hard", "--mines", "50"]);
        let config = args.config().unwrap();
        assert_eq!((config.rows(), config.cols(), config.mines()), (16, 30, 50));

        let args = Args::parse_from(["kaboom", "--rows", "3", "--cols", "3", "--mines", "1"]);
        assert!(args.config().is_err());
    }
}
