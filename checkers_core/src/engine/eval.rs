use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{Board, Color, Piece, ROWS};
use crate::logic::eval_constants::{CENTER_ROWS, KING_SAFE_ROWS};
use std::sync::Arc;

pub struct HeuristicEvaluator {
    config: Arc<EngineConfig>,
}

impl HeuristicEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }
}

impl Default for HeuristicEvaluator {
    fn default() -> Self {
        Self::new(Arc::new(EngineConfig::default()))
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&self, board: &Board) -> f64 {
        score(board, &self.config)
    }
}

impl Board {
    /// Heuristic score with the default weights. Positive favours Light.
    #[must_use]
    pub fn evaluate(&self) -> f64 {
        score(self, &EngineConfig::default())
    }
}

/// Per-side tallies that feed the positional terms.
#[derive(Default)]
struct SideTerms {
    advancement: f64,
    safe_kings: f64,
    center: f64,
}

impl SideTerms {
    fn collect(board: &Board, color: Color) -> Self {
        let mut terms = Self::default();
        for piece in board.pieces_of(color) {
            if piece.is_king {
                if KING_SAFE_ROWS.contains(&piece.row) {
                    terms.safe_kings += 1.0;
                }
            } else {
                terms.advancement += rows_advanced(&piece);
            }
            if CENTER_ROWS.contains(&piece.row) {
                terms.center += 1.0;
            }
        }
        terms
    }
}

#[allow(clippy::cast_precision_loss)]
fn rows_advanced(piece: &Piece) -> f64 {
    let rows = match piece.color {
        Color::Light => piece.row,
        Color::Dark => ROWS - 1 - piece.row,
    };
    rows as f64
}

#[allow(clippy::cast_precision_loss)]
pub fn score(board: &Board, config: &EngineConfig) -> f64 {
    // 1. Material
    let men = f64::from(board.count(Color::Light)) - f64::from(board.count(Color::Dark));
    let kings = f64::from(board.kings(Color::Light)) - f64::from(board.kings(Color::Dark));
    let mut score = men * config.val_piece + kings * config.val_king;

    // 2. Advancement, king safety, centre control
    let light = SideTerms::collect(board, Color::Light);
    let dark = SideTerms::collect(board, Color::Dark);
    score += (light.advancement - dark.advancement) * config.weight_advancement;
    score += (light.safe_kings - dark.safe_kings) * config.weight_king_safety;
    score += (light.center - dark.center) * config.weight_center;

    // 3. Mobility
    let mobility = board.mobility(Color::Light) as f64 - board.mobility(Color::Dark) as f64;
    score += mobility * config.weight_mobility;

    score
}
