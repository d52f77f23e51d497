//! Board representation: a plain 8x8 array of optional pieces.
//! Boards are values; every rules operation clones before it changes anything.
use crate::notation::NotationError;
use crate::types::*;
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    /// 64 cells, indexed by Coord::index()
    cells: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Self { cells: [None; 64] }
    }

    /// Creates the standard starting position: twelve men per side on the
    /// dark squares of their three home ranks.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();

        for coord in Coord::all().filter(|c| c.is_dark()) {
            match coord.rank().index() {
                0..=2 => board.set_piece(coord, Some(Piece::new(Player::A))),
                5..=7 => board.set_piece(coord, Some(Piece::new(Player::B))),
                _ => {}
            }
        }

        board
    }

    /// Gets the piece at the given cell.
    pub fn piece_at(&self, coord: Coord) -> Option<Piece> {
        self.cells[coord.index() as usize]
    }

    /// Sets the piece at the given cell.
    pub fn set_piece(&mut self, coord: Coord, piece: Option<Piece>) {
        self.cells[coord.index() as usize] = piece;
    }

    /// Moves whatever is on `from` to `to`, leaving `from` empty.
    pub(crate) fn move_piece(&mut self, from: Coord, to: Coord) {
        let piece = self.cells[from.index() as usize].take();
        self.cells[to.index() as usize] = piece;
    }

    pub fn is_empty(&self, coord: Coord) -> bool {
        self.piece_at(coord).is_none()
    }

    /// Returns true if the cell holds a piece owned by `player`.
    pub fn is_owned_by(&self, coord: Coord, player: Player) -> bool {
        self.piece_at(coord).is_some_and(|p| p.owner == player)
    }

    /// Returns true if the cell holds a piece owned by `player`'s opponent.
    pub fn is_enemy(&self, coord: Coord, player: Player) -> bool {
        self.is_owned_by(coord, player.opponent())
    }

    /// Iterates over occupied cells in scan order (rank 0 first).
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(move |c| self.piece_at(c).map(|p| (c, p)))
    }

    /// Iterates over the cells holding `player`'s pieces.
    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.owner == player)
    }

    /// Counts the pieces owned by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.pieces_of(player).count()
    }

    /// Renders the board as an ASCII grid seen from `perspective`'s chair.
    ///
    /// From B's side rank 0 is on top with files A..H; from A's side rank 7
    /// is on top with files H..A.
    pub fn render(&self, perspective: Player) -> String {
        let (files, ranks): (Vec<u8>, Vec<u8>) = match perspective {
            Player::B => ((0..8).collect(), (0..8).collect()),
            Player::A => ((0..8).rev().collect(), (0..8).rev().collect()),
        };

        let mut out = String::from("  ");
        for &file in &files {
            out.push(' ');
            out.push((b'A' + file) as char);
        }
        out.push_str(" \n");

        for &rank in &ranks {
            out.push_str(SEPARATOR);
            out.push('\n');
            out.push_str(&format!("{rank} |"));
            for &file in &files {
                let cell = Coord::from_indices(file, rank).and_then(|c| self.piece_at(c));
                out.push(cell.map_or(' ', Piece::to_char));
                out.push('|');
            }
            out.push('\n');
        }
        out.push_str(SEPARATOR);

        out
    }

    /// Parses the output of [`Board::render`] in either orientation.
    pub fn parse_render(text: &str) -> Result<Self, NotationError> {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());

        let header = lines
            .next()
            .ok_or_else(|| NotationError::InvalidFormat("empty board text".to_string()))?;
        let files = header
            .split_whitespace()
            .map(|token| {
                let mut chars = token.chars();
                match (chars.next().and_then(File::from_char), chars.next()) {
                    (Some(file), None) => Ok(file),
                    _ => Err(NotationError::InvalidFormat(format!(
                        "bad column header: {header}"
                    ))),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        if files.len() != 8 {
            return Err(NotationError::InvalidFormat(format!(
                "expected 8 columns, got {}",
                files.len()
            )));
        }

        let mut board = Self::empty();
        let mut rows = 0;

        for line in lines.filter(|l| !l.trim_start().starts_with('+')) {
            let rank = line
                .chars()
                .next()
                .and_then(Rank::from_char)
                .ok_or_else(|| NotationError::InvalidFormat(format!("bad row: {line}")))?;

            let (start, end) = match (line.find('|'), line.rfind('|')) {
                (Some(s), Some(e)) if e > s => (s, e),
                _ => return Err(NotationError::InvalidFormat(format!("bad row: {line}"))),
            };
            let cells: Vec<&str> = line[start + 1..end].split('|').collect();
            if cells.len() != 8 {
                return Err(NotationError::InvalidFormat(format!(
                    "expected 8 cells in row {}",
                    rank.index()
                )));
            }

            for (cell, &file) in cells.iter().zip(&files) {
                let mut chars = cell.chars();
                let piece = match (chars.next(), chars.next()) {
                    (Some(' '), None) => None,
                    (Some(c), None) => Some(Piece::from_char(c).ok_or(NotationError::InvalidPiece(c))?),
                    _ => {
                        return Err(NotationError::InvalidFormat(format!(
                            "bad cell '{cell}' in row {}",
                            rank.index()
                        )))
                    }
                };
                board.set_piece(Coord::new(file, rank), piece);
            }
            rows += 1;
        }

        if rows != 8 {
            return Err(NotationError::InvalidFormat(format!(
                "expected 8 rows, got {rows}"
            )));
        }

        Ok(board)
    }
}

const SEPARATOR: &str = "  +-+-+-+-+-+-+-+-+";

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(Player::A))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(s: &str) -> Coord {
        crate::notation::parse_coord(s).unwrap()
    }

    #[test]
    fn test_starting_position() {
        let board = Board::starting_position();

        assert_eq!(board.count(Player::A), 12);
        assert_eq!(board.count(Player::B), 12);
        assert_eq!(board.piece_at(coord("A0")), Some(Piece::new(Player::A)));
        assert_eq!(board.piece_at(coord("A2")), Some(Piece::new(Player::A)));
        assert_eq!(board.piece_at(coord("H7")), Some(Piece::new(Player::B)));
        assert!(board.is_empty(coord("B0")));
        assert!(board.pieces().all(|(c, _)| c.is_dark()));
        assert!(board
            .pieces()
            .all(|(c, _)| !(3..=4).contains(&c.rank().index())));
    }

    #[test]
    fn test_ownership_queries() {
        let board = Board::starting_position();

        assert!(board.is_owned_by(coord("A2"), Player::A));
        assert!(!board.is_owned_by(coord("A2"), Player::B));
        assert!(board.is_enemy(coord("H7"), Player::A));
        assert!(!board.is_owned_by(coord("B3"), Player::A));
        assert!(!board.is_enemy(coord("B3"), Player::A));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Board::starting_position();
        let mut copy = original.clone();
        copy.set_piece(coord("A0"), None);

        assert!(original.piece_at(coord("A0")).is_some());
        assert!(copy.piece_at(coord("A0")).is_none());
    }

    #[test]
    fn test_render_layout() {
        let board = Board::starting_position();
        let text = board.render(Player::B);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "   A B C D E F G H ");
        assert_eq!(lines[1], SEPARATOR);
        assert_eq!(lines[2], "0 |o| |o| |o| |o| |");
        assert_eq!(lines.len(), 18);

        let flipped = board.render(Player::A);
        assert!(flipped.starts_with("   H G F E D C B A \n"));
        assert!(flipped.contains("7 |x| |x| |x| |x| |"));
    }

    #[test]
    fn test_render_parse_round_trip() {
        let mut board = Board::starting_position();
        board.set_piece(coord("C4"), Some(Piece::king(Player::B)));
        board.set_piece(coord("H7"), None);
        board.set_piece(coord("D3"), Some(Piece::king(Player::A)));

        for perspective in [Player::A, Player::B] {
            let parsed = Board::parse_render(&board.render(perspective)).unwrap();
            assert_eq!(parsed, board);
        }
    }

    #[test]
    fn test_parse_render_rejects_garbage() {
        assert!(Board::parse_render("").is_err());
        assert!(Board::parse_render("   A B C\n0 |o|").is_err());

        let text = Board::starting_position()
            .render(Player::B)
            .replace("0 |o|", "0 |q|");
        assert_eq!(
            Board::parse_render(&text),
            Err(NotationError::InvalidPiece('q'))
        );
    }
}
