use std::fmt;

/// One of the two sides in a game of checkers.
///
/// `A` starts on ranks 0-2 and advances toward rank 7. `B` starts on ranks
/// 5-7, advances toward rank 0, and is the side the engine plays by default.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// Returns the other side.
    pub const fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Returns the rank on which this player's men are crowned.
    pub const fn crowning_rank(self) -> Rank {
        match self {
            Player::A => Rank::LAST,
            Player::B => Rank::FIRST,
        }
    }

    /// Returns true if a rank delta moves away from this player's home rank.
    pub const fn is_forward(self, rank_delta: i8) -> bool {
        match self {
            Player::A => rank_delta > 0,
            Player::B => rank_delta < 0,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => write!(f, "Player 1"),
            Player::B => write!(f, "Player 2"),
        }
    }
}

/// Diagonal directions as `(rank delta, file delta)`, in generation order.
pub const KING_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (1, 1), (1, -1), (-1, 1)];
const A_MAN_DIRECTIONS: [(i8, i8); 2] = [(1, -1), (1, 1)];
const B_MAN_DIRECTIONS: [(i8, i8); 2] = [(-1, -1), (-1, 1)];

/// A checker. Kings are men with the crown flag set, not a separate kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Piece {
    pub owner: Player,
    pub is_king: bool,
}

impl Piece {
    /// Creates an uncrowned piece.
    pub const fn new(owner: Player) -> Self {
        Self {
            owner,
            is_king: false,
        }
    }

    /// Creates a king.
    pub const fn king(owner: Player) -> Self {
        Self {
            owner,
            is_king: true,
        }
    }

    /// Returns the same piece with the crown set.
    pub const fn crowned(self) -> Self {
        Self::king(self.owner)
    }

    /// Directions this piece may move or jump in.
    pub fn directions(self) -> &'static [(i8, i8)] {
        match (self.is_king, self.owner) {
            (true, _) => &KING_DIRECTIONS,
            (false, Player::A) => &A_MAN_DIRECTIONS,
            (false, Player::B) => &B_MAN_DIRECTIONS,
        }
    }

    /// Returns the board character for this piece (`o`, `x`, `O` or `X`).
    pub const fn to_char(self) -> char {
        match (self.owner, self.is_king) {
            (Player::A, false) => 'o',
            (Player::A, true) => 'O',
            (Player::B, false) => 'x',
            (Player::B, true) => 'X',
        }
    }

    /// Parses a board character.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'o' => Some(Piece::new(Player::A)),
            'O' => Some(Piece::king(Player::A)),
            'x' => Some(Piece::new(Player::B)),
            'X' => Some(Piece::king(Player::B)),
            _ => None,
        }
    }
}

/// A file on the board (A-H).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct File(u8);

impl File {
    /// Creates a new file from index (0-7).
    /// Returns None if index is out of range.
    pub const fn new(index: u8) -> Option<Self> {
        if index < 8 {
            Some(File(index))
        } else {
            None
        }
    }

    /// Creates a file from a letter. Lowercase is accepted.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'A'..='H' => Some(File(c as u8 - b'A')),
            'a'..='h' => Some(File(c as u8 - b'a')),
            _ => None,
        }
    }

    /// Returns the file as an uppercase letter.
    pub const fn to_char(self) -> char {
        (b'A' + self.0) as char
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the file `delta` columns away, if on the board.
    pub const fn offset(self, delta: i8) -> Option<Self> {
        let new_file = self.0 as i8 + delta;
        if new_file >= 0 && new_file < 8 {
            Some(File(new_file as u8))
        } else {
            None
        }
    }
}

/// A rank on the board (0-7).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(u8);

impl Rank {
    pub const FIRST: Rank = Rank(0);
    pub const LAST: Rank = Rank(7);

    /// Creates a new rank from index (0-7).
    /// Returns None if index is out of range.
    pub const fn new(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Rank(index))
        } else {
            None
        }
    }

    /// Creates a rank from a digit ('0'-'7').
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='7' => Some(Rank(c as u8 - b'0')),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        (b'0' + self.0) as char
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the rank `delta` rows away, if on the board.
    pub const fn offset(self, delta: i8) -> Option<Self> {
        let new_rank = self.0 as i8 + delta;
        if new_rank >= 0 && new_rank < 8 {
            Some(Rank(new_rank as u8))
        } else {
            None
        }
    }
}

/// A cell on the board, stored as `rank * 8 + file`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Coord(u8);

impl Coord {
    pub const fn new(file: File, rank: Rank) -> Self {
        Coord(rank.0 * 8 + file.0)
    }

    /// Creates a coordinate from raw `(file, rank)` indices.
    pub const fn from_indices(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Coord(rank * 8 + file))
        } else {
            None
        }
    }

    pub const fn file(self) -> File {
        File(self.0 % 8)
    }

    pub const fn rank(self) -> Rank {
        Rank(self.0 / 8)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns true for the squares checkers are played on.
    pub const fn is_dark(self) -> bool {
        (self.file().0 + self.rank().0) % 2 == 0
    }

    /// Returns the coordinate `(rank_delta, file_delta)` away, if on the board.
    pub const fn offset(self, rank_delta: i8, file_delta: i8) -> Option<Self> {
        let file = match self.file().offset(file_delta) {
            Some(f) => f,
            None => return None,
        };
        match self.rank().offset(rank_delta) {
            Some(rank) => Some(Coord::new(file, rank)),
            None => None,
        }
    }

    /// Signed `(rank delta, file delta)` from `self` to `other`.
    pub const fn delta(self, other: Coord) -> (i8, i8) {
        (
            other.rank().0 as i8 - self.rank().0 as i8,
            other.file().0 as i8 - self.file().0 as i8,
        )
    }

    /// Returns the cell halfway to `other`, when both deltas are even.
    pub const fn midpoint(self, other: Coord) -> Option<Self> {
        let (dr, df) = self.delta(other);
        if dr % 2 != 0 || df % 2 != 0 {
            return None;
        }
        self.offset(dr / 2, df / 2)
    }

    /// Iterates over every cell, rank 0 first and file A first within a rank.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..64).map(Coord)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file().to_char(), self.rank().to_char())
    }
}

/// One full turn: the starting cell followed by every landing cell.
///
/// Two coordinates are a step or a single jump. Longer paths are jump chains
/// where each consecutive pair is a single jump by the same piece.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    path: Vec<Coord>,
}

impl Move {
    /// Creates a two-coordinate move.
    pub fn new(from: Coord, to: Coord) -> Self {
        Self {
            path: vec![from, to],
        }
    }

    /// Creates a move from a full path. Returns None for fewer than two cells.
    pub fn from_path(path: Vec<Coord>) -> Option<Self> {
        if path.len() < 2 {
            None
        } else {
            Some(Self { path })
        }
    }

    pub fn from(&self) -> Coord {
        self.path[0]
    }

    /// Final landing cell.
    pub fn to(&self) -> Coord {
        self.path[self.path.len() - 1]
    }

    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    /// Returns true if the first leg jumps over a cell.
    pub fn is_jump(&self) -> bool {
        is_jump_leg(self.path[0], self.path[1])
    }

    /// Appends further landing cells of a jump chain.
    pub fn extend<I: IntoIterator<Item = Coord>>(&mut self, landings: I) {
        self.path.extend(landings);
    }

    /// Iterates over consecutive `(from, to)` legs.
    pub fn legs(&self) -> impl Iterator<Item = (Coord, Coord)> + '_ {
        self.path.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Returns true when `from -> to` has the shape of a single jump.
pub fn is_jump_leg(from: Coord, to: Coord) -> bool {
    let (dr, df) = from.delta(to);
    dr.abs() == 2 && df.abs() == 2
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coord) in self.path.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{coord}")?;
        }
        Ok(())
    }
}
