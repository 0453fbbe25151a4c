use std::fmt;

use kaboom_core::{CellView, Coord, Coord2, GameStatus, Snapshot, ToNdIndex};

/// Text rendering of a snapshot: column header, one line per row, then the status bar.
pub struct BoardView<'a>(pub &'a Snapshot);

impl BoardView<'_> {
    fn glyph(&self, coords: Coord2) -> char {
        let view: CellView = self.0.cells[coords.to_nd_index()];
        match view {
            _ if self.0.triggered_mine == Some(coords) => 'X',
            CellView { is_flagged: true, .. } => 'F',
            CellView {
                is_revealed: false, ..
            } => '#',
            CellView {
                mine: Some(true), ..
            } => '*',
            CellView {
                adjacent_mines: Some(count @ 1..=8),
                ..
            } => char::from(b'0' + count),
            _ => '.',
        }
    }

    fn header(
        f: &mut fmt::Formatter<'_>,
        label_width: usize,
        cols: Coord,
        digit: impl Fn(Coord) -> char,
    ) -> fmt::Result {
        write!(f, "{:label_width$} ", "")?;
        for col in 0..cols {
            write!(f, "{}", digit(col))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        let (rows, cols) = snapshot.size;
        let label_width = rows.saturating_sub(1).to_string().len();

        if cols > 10 {
            Self::header(f, label_width, cols, |col| match col / 10 {
                0 => ' ',
                tens => digit(tens % 10),
            })?;
        }
        Self::header(f, label_width, cols, |col| digit(col % 10))?;

        for row in 0..rows {
            write!(f, "{row:>label_width$} ")?;
            for col in 0..cols {
                write!(f, "{}", self.glyph((row, col)))?;
            }
            writeln!(f)?;
        }

        write!(f, "Flags: {} / {}", snapshot.flags_placed, snapshot.mine_count)?;
        if let Some(elapsed) = snapshot.elapsed {
            write!(f, "   Time: {}s", elapsed.as_secs())?;
        }
        writeln!(f)?;

        match snapshot.status {
            GameStatus::NotStarted => writeln!(f, "Reveal any cell to start!"),
            GameStatus::InProgress => Ok(()),
            GameStatus::Won => writeln!(f, "You win! Type 'n' for a new game."),
            GameStatus::Lost => writeln!(f, "You hit a mine! Type 'n' for a new game."),
        }
    }
}

fn digit(value: Coord) -> char {
    char::from_digit(u32::from(value), 10).unwrap_or('?')
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaboom_core::{GameSession, Grid};

    fn render(session: &GameSession) -> String {
        BoardView(&session.snapshot()).to_string()
    }

    #[test]
    fn renders_hidden_board_before_start() {
        let session = GameSession::with_seed(kaboom_core::Difficulty::Easy.config(), 1);

        let text = render(&session);

        assert!(text.starts_with("  012345678\n0 #########\n"));
        assert!(text.contains("8 #########\n"));
        assert!(text.contains("Flags: 0 / 10\n"));
        assert!(text.contains("Reveal any cell to start!"));
    }

    #[test]
    fn renders_numbers_flags_and_triggered_mine() {
        let grid = Grid::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();
        let mut session = GameSession::from_grid(grid);
        session.apply_reveal((0, 2)).unwrap();
        session.apply_flag_toggle((1, 0)).unwrap();

        assert!(render(&session).contains("0 #1.\n1 F21\n2 ###\n"));

        session.apply_reveal((2, 2)).unwrap();
        let text = render(&session);
        assert!(text.contains("0 *1.\n1 F21\n2 ##X\n"), "{text}");
        assert!(text.contains("You hit a mine!"));
    }

    #[test]
    fn wide_boards_get_a_tens_header() {
        let session = GameSession::with_seed(kaboom_core::Difficulty::Hard.config(), 1);

        let text = render(&session);
        let mut lines = text.lines();

        let tens = format!("{}{}{}", " ".repeat(13), "1".repeat(10), "2".repeat(10));
        assert_eq!(lines.next(), Some(tens.as_str()));
        assert_eq!(
            lines.next(),
            Some("   012345678901234567890123456789")
        );
        assert_eq!(lines.next(), Some(format!(" 0 {}", "#".repeat(30)).as_str()));
    }
}
