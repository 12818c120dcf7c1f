//! Rules and search engine for two-player checkers.
//!
//! `logic` holds the board, move generation and game state. `engine` holds
//! evaluation, configuration and the alpha-beta search.

pub mod engine;
pub mod logic;

pub use engine::search::{minimax, simulate, AlphaBetaEngine, SearchResult};
pub use logic::board::{Board, Cell, Color, Piece, Position};
pub use logic::game::{GameState, GameStatus};
pub use logic::generator::MoveMap;
pub use logic::rules::MoveError;
