use crate::cli::Cli;
use checkers_core::engine::config::EngineConfig;
use checkers_core::engine::search::AlphaBetaEngine;
use checkers_core::engine::{SearchLimit, Searcher};
use checkers_core::logic::board::Color;
use checkers_core::logic::game::{GameState, GameStatus};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub enum AppError {
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadConfig { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            Self::ParseConfig { path, source } => {
                write!(f, "invalid engine config {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadConfig { source, .. } => Some(source),
            Self::ParseConfig { source, .. } => Some(source),
        }
    }
}

/// Reads a tuning file, or the defaults when no path is given.
///
/// # Errors
/// Fails when the file cannot be read or is not a valid config.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, AppError> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let json = std::fs::read_to_string(path).map_err(|source| AppError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    EngineConfig::load_from_json(&json).map_err(|source| AppError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won(Color),
    /// Ply limit reached with both sides still playing.
    Unfinished,
    /// The engine offered a move the game refused.
    Stalled(Color),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Won(color) => write!(f, "{color} wins"),
            Self::Unfinished => write!(f, "no result"),
            Self::Stalled(color) => write!(f, "{color} engine stalled"),
        }
    }
}

/// Engine against engine, one config per side.
pub struct SelfPlay {
    pub game: GameState,
    light: AlphaBetaEngine,
    dark: AlphaBetaEngine,
    /// Shared limit; `None` lets each engine use its config depth.
    limit: Option<SearchLimit>,
    max_plies: usize,
}

impl SelfPlay {
    pub fn new(
        light_config: EngineConfig,
        dark_config: EngineConfig,
        limit: Option<SearchLimit>,
        max_plies: usize,
    ) -> Self {
        Self {
            game: GameState::new(),
            light: AlphaBetaEngine::new(Arc::new(light_config)),
            dark: AlphaBetaEngine::new(Arc::new(dark_config)),
            limit,
            max_plies,
        }
    }

    /// Builds a match from command-line options.
    ///
    /// # Errors
    /// Fails when either engine config cannot be loaded.
    pub fn from_cli(cli: &Cli) -> Result<Self, AppError> {
        let light = load_config(cli.light_config.as_deref())?;
        let dark = load_config(cli.dark_config.as_deref())?;
        Ok(Self::new(light, dark, cli.limit(), cli.max_plies))
    }

    #[must_use]
    pub fn plies(&self) -> usize {
        self.game.history.len()
    }

    /// Plays up to `count` uniformly random moves. Returns how many were made.
    pub fn random_opening<R: Rng>(&mut self, count: usize, rng: &mut R) -> usize {
        let mut played = 0;
        while played < count && self.game.status == GameStatus::Playing {
            let moves = self.game.legal_moves(self.game.turn);
            let Some(mv) = moves.choose(rng) else {
                break;
            };
            if self.game.make_move(mv.from, mv.to).is_err() {
                break;
            }
            tracing::info!(ply = self.plies(), "random {mv}");
            played += 1;
        }
        played
    }

    /// Asks the side to move for a move and plays it. `false` once the game
    /// cannot continue.
    pub fn step(&mut self) -> bool {
        if self.game.status != GameStatus::Playing {
            return false;
        }
        let turn = self.game.turn;
        let engine = match turn {
            Color::Light => &mut self.light,
            Color::Dark => &mut self.dark,
        };
        let limit = self.limit.unwrap_or_else(|| engine.default_limit());
        let Some((mv, stats)) = engine.search(&self.game, limit) else {
            return false;
        };

        match self.game.make_move(mv.from, mv.to) {
            Ok(()) => {
                tracing::info!(
                    ply = self.plies(),
                    depth = stats.depth,
                    nodes = stats.nodes,
                    time_ms = stats.time_ms,
                    score = stats.score,
                    "{turn} plays {mv}"
                );
                true
            }
            Err(e) => {
                tracing::error!("{turn} engine move {mv} rejected: {e}");
                false
            }
        }
    }

    pub fn run(&mut self) -> Outcome {
        while self.plies() < self.max_plies {
            if !self.step() {
                break;
            }
        }
        match self.game.status {
            GameStatus::Won(color) => Outcome::Won(color),
            GameStatus::Playing if self.plies() < self.max_plies => {
                Outcome::Stalled(self.game.turn)
            }
            GameStatus::Playing => Outcome::Unfinished,
        }
    }
}
