use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;

pub use crate::logic::piece::{Color, Piece, Position, COLS, ROWS};

const SQUARES: usize = ROWS * COLS;

/// Rows each side fills at the start of a game.
const LIGHT_START_ROWS: std::ops::Range<usize> = 0..3;
const DARK_START_ROWS: std::ops::Range<usize> = 5..8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Piece),
}

impl Cell {
    pub const fn piece(self) -> Option<Piece> {
        match self {
            Self::Empty => None,
            Self::Occupied(piece) => Some(piece),
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramError {
    RowCount(usize),
    RowLength { row: usize, len: usize },
    UnknownSymbol { row: usize, col: usize, symbol: char },
    UnplayableSquare { row: usize, col: usize },
}

impl std::fmt::Display for DiagramError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RowCount(n) => write!(f, "expected {ROWS} rows, found {n}"),
            Self::RowLength { row, len } => {
                write!(f, "row {row} has {len} squares, expected {COLS}")
            }
            Self::UnknownSymbol { row, col, symbol } => {
                write!(f, "unknown symbol '{symbol}' at ({row}, {col})")
            }
            Self::UnplayableSquare { row, col } => {
                write!(f, "piece on unplayable square ({row}, {col})")
            }
        }
    }
}

impl std::error::Error for DiagramError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    // Mailbox, row-major
    #[serde(with = "BigArray")]
    grid: [Cell; SQUARES],
    pub(crate) light_count: u8,
    pub(crate) dark_count: u8,
    pub(crate) light_kings: u8,
    pub(crate) dark_kings: u8,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard opening layout: twelve men per side on the playable squares.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        for row in 0..ROWS {
            for col in 0..COLS {
                if (row + col) % 2 == 0 {
                    continue;
                }
                if LIGHT_START_ROWS.contains(&row) {
                    board.place(Piece::new(row, col, Color::Light));
                } else if DARK_START_ROWS.contains(&row) {
                    board.place(Piece::new(row, col, Color::Dark));
                }
            }
        }
        board
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            grid: [Cell::Empty; SQUARES],
            light_count: 0,
            dark_count: 0,
            light_kings: 0,
            dark_kings: 0,
        }
    }

    /// Panics when `row` or `col` is outside the board.
    #[must_use]
    pub const fn square_index(row: usize, col: usize) -> usize {
        assert!(row < ROWS && col < COLS, "board coordinate out of bounds");
        row * COLS + col
    }

    /// Direct lookup. Out-of-range coordinates are a programming error and panic.
    #[must_use]
    pub const fn get_piece(&self, row: usize, col: usize) -> Cell {
        self.grid[Self::square_index(row, col)]
    }

    #[must_use]
    pub const fn cell(&self, pos: Position) -> Cell {
        self.get_piece(pos.row, pos.col)
    }

    #[must_use]
    pub const fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.cell(pos).piece()
    }

    fn set_cell(&mut self, pos: Position, cell: Cell) {
        self.grid[Self::square_index(pos.row, pos.col)] = cell;
    }

    /// Puts `piece` on its own square, replacing whatever was there.
    /// Counters are kept in step with the grid.
    pub fn place(&mut self, piece: Piece) {
        let pos = piece.position();
        debug_assert!(pos.is_playable(), "piece placed on unplayable square {pos}");
        if let Some(existing) = self.piece_at(pos) {
            self.remove(&[existing]);
        }
        self.set_cell(pos, Cell::Occupied(piece));
        *self.count_mut(piece.color) += 1;
        if piece.is_king {
            *self.kings_mut(piece.color) += 1;
        }
    }

    #[must_use]
    pub const fn count(&self, color: Color) -> u8 {
        match color {
            Color::Light => self.light_count,
            Color::Dark => self.dark_count,
        }
    }

    #[must_use]
    pub const fn kings(&self, color: Color) -> u8 {
        match color {
            Color::Light => self.light_kings,
            Color::Dark => self.dark_kings,
        }
    }

    fn count_mut(&mut self, color: Color) -> &mut u8 {
        match color {
            Color::Light => &mut self.light_count,
            Color::Dark => &mut self.dark_count,
        }
    }

    fn kings_mut(&mut self, color: Color) -> &mut u8 {
        match color {
            Color::Light => &mut self.light_kings,
            Color::Dark => &mut self.dark_kings,
        }
    }

    /// All pieces of `color` in row-major order.
    #[must_use]
    pub fn pieces_of(&self, color: Color) -> Vec<Piece> {
        self.grid
            .iter()
            .filter_map(|cell| cell.piece())
            .filter(|piece| piece.color == color)
            .collect()
    }

    /// Moves the piece standing on `piece`'s square to `to`, crowning it when
    /// a man reaches its terminal row. Returns the piece as it stands after
    /// the move, or `None` without touching the board if the source square is
    /// empty or the destination is occupied.
    ///
    /// This does not check legality; see [`Board::play`] for the validated path.
    pub fn apply_move(&mut self, piece: &Piece, to: Position) -> Option<Piece> {
        let from = piece.position();
        let mut moving = self.piece_at(from)?;
        if !self.cell(to).is_empty() {
            return None;
        }

        self.set_cell(from, Cell::Empty);
        moving.move_to(to);

        if !moving.is_king && to.row == moving.color.terminal_row() {
            moving.make_king();
            *self.kings_mut(moving.color) += 1;
        }

        self.set_cell(to, Cell::Occupied(moving));
        Some(moving)
    }

    /// Vacates the squares of `pieces`, updating counters for each piece
    /// actually found there.
    pub fn remove(&mut self, pieces: &[Piece]) {
        for piece in pieces {
            let pos = piece.position();
            let Some(current) = self.piece_at(pos) else {
                continue;
            };
            self.set_cell(pos, Cell::Empty);
            *self.count_mut(current.color) -= 1;
            if current.is_king {
                *self.kings_mut(current.color) -= 1;
            }
        }
    }

    #[must_use]
    pub fn has_legal_moves(&self, color: Color) -> bool {
        self.pieces_of(color)
            .iter()
            .any(|piece| !self.valid_moves(piece).is_empty())
    }

    /// Total number of destinations available to `color`.
    #[must_use]
    pub fn mobility(&self, color: Color) -> usize {
        self.pieces_of(color)
            .iter()
            .map(|piece| self.valid_moves(piece).len())
            .sum()
    }

    /// A side that cannot move loses, Dark checked first. Failing that, a side
    /// with no pieces left loses.
    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        if !self.has_legal_moves(Color::Dark) {
            return Some(Color::Light);
        }
        if !self.has_legal_moves(Color::Light) {
            return Some(Color::Dark);
        }

        if self.dark_count == 0 {
            return Some(Color::Light);
        }
        if self.light_count == 0 {
            return Some(Color::Dark);
        }

        None
    }

    /// Recomputes piece and king counts from the grid and compares them with
    /// the incremental counters.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut counts = [0u8; 2];
        let mut kings = [0u8; 2];
        for (sq, cell) in self.grid.iter().enumerate() {
            let Some(piece) = cell.piece() else {
                continue;
            };
            if piece.row * COLS + piece.col != sq || !piece.position().is_playable() {
                return false;
            }
            counts[piece.color.index()] += 1;
            if piece.is_king {
                kings[piece.color.index()] += 1;
            }
        }
        counts == [self.light_count, self.dark_count]
            && kings == [self.light_kings, self.dark_kings]
    }

    /// One line per row, row 0 first: `.` empty, `l`/`d` men, `L`/`D` kings.
    #[must_use]
    pub fn to_diagram(&self) -> String {
        let mut out = String::with_capacity(SQUARES + ROWS);
        for row in 0..ROWS {
            for col in 0..COLS {
                out.push(self.get_piece(row, col).piece().map_or('.', |p| p.symbol()));
            }
            if row + 1 < ROWS {
                out.push('\n');
            }
        }
        out
    }

    /// Parses the format produced by [`Board::to_diagram`]. Blank lines and
    /// surrounding whitespace are ignored.
    pub fn from_diagram(diagram: &str) -> Result<Self, DiagramError> {
        let rows: Vec<&str> = diagram
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != ROWS {
            return Err(DiagramError::RowCount(rows.len()));
        }

        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != COLS {
                return Err(DiagramError::RowLength { row, len });
            }
            for (col, symbol) in line.chars().enumerate() {
                let piece = match symbol {
                    '.' => continue,
                    'l' => Piece::new(row, col, Color::Light),
                    'L' => Piece::king(row, col, Color::Light),
                    'd' => Piece::new(row, col, Color::Dark),
                    'D' => Piece::king(row, col, Color::Dark),
                    _ => return Err(DiagramError::UnknownSymbol { row, col, symbol }),
                };
                if !piece.position().is_playable() {
                    return Err(DiagramError::UnplayableSquare { row, col });
                }
                board.place(piece);
            }
        }
        Ok(board)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_diagram())
    }
}
