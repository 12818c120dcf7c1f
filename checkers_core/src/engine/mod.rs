use crate::logic::board::Board;
use crate::logic::game::GameState;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod eval;
pub mod search;


pub use crate::logic::game::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchLimit {
    Depth(u8),
    Time(u64), // milliseconds
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
    pub time_ms: u64,
    pub score: f64,
}

/// Static score of a position. Positive favours Light.
pub trait Evaluator {
    fn evaluate(&self, board: &Board) -> f64;
}

pub trait Searcher {
    fn search(&mut self, game_state: &GameState, limit: SearchLimit) -> Option<(Move, SearchStats)>;
}
