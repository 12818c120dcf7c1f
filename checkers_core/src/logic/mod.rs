pub mod board;
pub mod eval_constants;
pub mod game;
pub mod generator;
pub mod piece;
pub mod rules;
