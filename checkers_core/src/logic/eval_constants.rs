// Default evaluation weights

pub const VAL_PIECE: f64 = 1.0;
pub const VAL_KING: f64 = 3.0;

pub const WEIGHT_ADVANCEMENT: f64 = 1.0;
pub const WEIGHT_MOBILITY: f64 = 0.3;
pub const WEIGHT_KING_SAFETY: f64 = 0.2;
pub const WEIGHT_CENTER: f64 = 0.5;

/// Kings on these rows count as sheltered.
pub const KING_SAFE_ROWS: [usize; 4] = [0, 1, 6, 7];

/// Rows that make up the centre of the board.
pub const CENTER_ROWS: std::ops::Range<usize> = 2..6;

pub const DEFAULT_DEPTH: u8 = 4;
