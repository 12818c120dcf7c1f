//! Command-line options for the self-play driver.

use checkers_core::engine::SearchLimit;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Plays the checkers engine against itself and logs every move.
#[derive(Parser, Debug)]
#[command(name = "checkers")]
#[command(about = "Headless checkers engine self-play", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Thinking time per move. Without it each side searches to the depth
    /// in its config
    #[arg(short, long, value_enum)]
    pub difficulty: Option<Difficulty>,

    /// Fixed search depth for both sides; overrides the difficulty
    #[arg(long)]
    pub depth: Option<u8>,

    /// Engine tuning file for Light (JSON multipliers)
    #[arg(long)]
    pub light_config: Option<PathBuf>,

    /// Engine tuning file for Dark (JSON multipliers)
    #[arg(long)]
    pub dark_config: Option<PathBuf>,

    /// Random plies played before the engines take over
    #[arg(long, default_value = "0")]
    pub random_plies: usize,

    /// Seed for the random opening plies
    #[arg(long, default_value = "0")]
    pub seed: u64,

    /// Stop the game after this many plies
    #[arg(long, default_value = "200")]
    pub max_plies: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub const fn limit(self) -> SearchLimit {
        match self {
            Self::Easy => SearchLimit::Time(500),
            Self::Medium => SearchLimit::Time(2000),
            Self::Hard => SearchLimit::Time(5000),
        }
    }
}

impl Cli {
    #[must_use]
    pub fn limit(&self) -> Option<SearchLimit> {
        self.depth
            .map(SearchLimit::Depth)
            .or_else(|| self.difficulty.map(Difficulty::limit))
    }
}
