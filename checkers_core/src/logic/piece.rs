use serde::{Deserialize, Serialize};

pub const ROWS: usize = 8;
pub const COLS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Starts on rows 0-2 and advances toward row 7.
    Light,
    /// Starts on rows 5-7 and advances toward row 0.
    Dark,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Light => 0,
            Self::Dark => 1,
        }
    }

    /// Row delta of a forward move.
    pub const fn forward(self) -> i8 {
        match self {
            Self::Light => 1,
            Self::Dark => -1,
        }
    }

    /// Row on which a man of this color is crowned.
    pub const fn terminal_row(self) -> usize {
        match self {
            Self::Light => ROWS - 1,
            Self::Dark => 0,
        }
    }

    /// Light is the maximizing side of every search.
    pub const fn is_maximizing(self) -> bool {
        matches!(self, Self::Light)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "Light"),
            Self::Dark => write!(f, "Dark"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Returns `None` when the coordinates fall off the board.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < ROWS && col < COLS {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub(crate) fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row.checked_add_signed(isize::from(d_row))?;
        let col = self.col.checked_add_signed(isize::from(d_col))?;
        Self::new(row, col)
    }

    /// Dark squares of the standard layout; the only cells pieces ever use.
    pub const fn is_playable(self) -> bool {
        (self.row + self.col) % 2 == 1
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub is_king: bool,
    pub row: usize,
    pub col: usize,
}

impl Piece {
    #[must_use]
    pub const fn new(row: usize, col: usize, color: Color) -> Self {
        Self {
            color,
            is_king: false,
            row,
            col,
        }
    }

    #[must_use]
    pub const fn king(row: usize, col: usize, color: Color) -> Self {
        Self {
            color,
            is_king: true,
            row,
            col,
        }
    }

    pub const fn position(&self) -> Position {
        Position {
            row: self.row,
            col: self.col,
        }
    }

    pub(crate) fn move_to(&mut self, to: Position) {
        self.row = to.row;
        self.col = to.col;
    }

    pub(crate) fn make_king(&mut self) {
        self.is_king = true;
    }

    /// Row deltas this piece may travel along, Dark direction first.
    pub(crate) fn directions(&self) -> impl Iterator<Item = i8> {
        let up = self.is_king || self.color == Color::Dark;
        let down = self.is_king || self.color == Color::Light;
        [(up, -1), (down, 1)]
            .into_iter()
            .filter_map(|(allowed, step)| allowed.then_some(step))
    }

    pub(crate) const fn symbol(&self) -> char {
        match (self.color, self.is_king) {
            (Color::Light, false) => 'l',
            (Color::Light, true) => 'L',
            (Color::Dark, false) => 'd',
            (Color::Dark, true) => 'D',
        }
    }
}
