use crate::engine::config::EngineConfig;
use crate::engine::eval::HeuristicEvaluator;
use crate::engine::{Evaluator, Move, SearchLimit, SearchStats, Searcher};
use crate::logic::board::{Board, Color, Piece, Position};
use crate::logic::game::{legal_moves, GameState, GameStatus};
use std::sync::Arc;
use std::time::{Duration, Instant};

const MAX_DEPTH: u8 = 64;
const TIME_CHECK_INTERVAL: u64 = 1024;

/// Outcome of one search call. `board` is the position to play into (or the
/// node itself when it was terminal), `best_move` the move leading there.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub score: f64,
    pub board: Option<Board>,
    pub best_move: Option<Move>,
}

/// Successor of `board` after `piece` moves to `to` and `captured` are taken
/// off. The input board is left untouched.
#[must_use]
pub fn simulate(board: &Board, piece: &Piece, to: Position, captured: &[Piece]) -> Board {
    let mut next = board.clone();
    next.apply_move(piece, to);
    if !captured.is_empty() {
        next.remove(captured);
    }
    next
}

/// Every position `color` can reach in one move, paired with that move.
pub fn successors(board: &Board, color: Color) -> Vec<(Move, Board)> {
    legal_moves(board, color)
        .into_iter()
        .filter_map(|mv| {
            let piece = board.piece_at(mv.from)?;
            let next = simulate(board, &piece, mv.to, &mv.captured);
            Some((mv, next))
        })
        .collect()
}

/// Depth-limited minimax with alpha-beta pruning using the default
/// evaluation. Light maximizes, Dark minimizes.
///
/// A side with no moves has already lost, so such nodes are scored as
/// terminal. The sentinel score (`-inf` for Light, `+inf` for Dark) with no
/// board only comes back from a search cut short by its deadline.
#[must_use]
pub fn minimax(board: &Board, depth: u8, to_move: Color, alpha: f64, beta: f64) -> SearchResult {
    let evaluator = HeuristicEvaluator::default();
    Minimax::new(&evaluator).search(board, depth, to_move, alpha, beta)
}

pub struct Minimax<'a, E: Evaluator> {
    evaluator: &'a E,
    pub nodes: u64,
    deadline: Option<Instant>,
    aborted: bool,
}

impl<'a, E: Evaluator> Minimax<'a, E> {
    pub const fn new(evaluator: &'a E) -> Self {
        Self {
            evaluator,
            nodes: 0,
            deadline: None,
            aborted: false,
        }
    }

    /// Stops the search once `deadline` passes. Scores returned after that
    /// are meaningless; check [`Minimax::aborted`].
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub const fn aborted(&self) -> bool {
        self.aborted
    }

    fn check_time(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        if let Some(deadline) = self.deadline {
            if self.nodes % TIME_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                self.aborted = true;
            }
        }
        self.aborted
    }

    pub fn search(
        &mut self,
        board: &Board,
        depth: u8,
        to_move: Color,
        mut alpha: f64,
        mut beta: f64,
    ) -> SearchResult {
        self.nodes += 1;

        if depth == 0 || board.winner().is_some() {
            return SearchResult {
                score: self.evaluator.evaluate(board),
                board: Some(board.clone()),
                best_move: None,
            };
        }

        let maximizing = to_move.is_maximizing();
        let mut best = SearchResult {
            score: if maximizing {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            },
            board: None,
            best_move: None,
        };

        for (mv, child) in successors(board, to_move) {
            if self.check_time() {
                break;
            }

            let score = self
                .search(&child, depth - 1, to_move.opposite(), alpha, beta)
                .score;

            // Strict comparison: the first child reaching a score keeps it.
            if maximizing {
                if score > best.score {
                    best = SearchResult {
                        score,
                        board: Some(child),
                        best_move: Some(mv),
                    };
                }
                alpha = alpha.max(best.score);
            } else {
                if score < best.score {
                    best = SearchResult {
                        score,
                        board: Some(child),
                        best_move: Some(mv),
                    };
                }
                beta = beta.min(best.score);
            }

            if beta <= alpha {
                break;
            }
        }

        best
    }
}

pub struct AlphaBetaEngine {
    config: Arc<EngineConfig>,
    evaluator: HeuristicEvaluator,
}

impl AlphaBetaEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: HeuristicEvaluator::new(config.clone()),
            config,
        }
    }

    /// Fixed-depth limit taken from the engine's config.
    pub fn default_limit(&self) -> SearchLimit {
        SearchLimit::Depth(self.config.depth)
    }

    /// One full-width search of `board` to `depth`.
    pub fn search_depth(
        &self,
        board: &Board,
        depth: u8,
        to_move: Color,
        deadline: Option<Instant>,
    ) -> (SearchResult, u64, bool) {
        let mut searcher = Minimax::new(&self.evaluator);
        if let Some(deadline) = deadline {
            searcher = searcher.with_deadline(deadline);
        }
        let result = searcher.search(
            board,
            depth,
            to_move,
            f64::NEG_INFINITY,
            f64::INFINITY,
        );
        (result, searcher.nodes, searcher.aborted())
    }
}

impl Searcher for AlphaBetaEngine {
    fn search(&mut self, game_state: &GameState, limit: SearchLimit) -> Option<(Move, SearchStats)> {
        if game_state.status != GameStatus::Playing {
            return None;
        }

        let start = Instant::now();
        let (max_depth, deadline) = match limit {
            SearchLimit::Depth(d) => (d.max(1), None),
            SearchLimit::Time(ms) => (MAX_DEPTH, Some(start + Duration::from_millis(ms))),
        };
        let first_depth = if deadline.is_some() { 1 } else { max_depth };

        let mut best: Option<(Move, SearchStats)> = None;
        let mut nodes = 0;

        for depth in first_depth..=max_depth {
            // Depth 1 always completes so a timed search has a move to offer.
            let iteration_deadline = deadline.filter(|_| depth > 1);
            let (result, iteration_nodes, aborted) =
                self.search_depth(&game_state.board, depth, game_state.turn, iteration_deadline);
            nodes += iteration_nodes;

            if aborted {
                log::debug!("depth {depth} abandoned after {iteration_nodes} nodes");
                break;
            }

            let Some(mv) = result.best_move else {
                break;
            };

            #[allow(clippy::cast_possible_truncation)]
            let stats = SearchStats {
                depth,
                nodes,
                time_ms: start.elapsed().as_millis() as u64,
                score: result.score,
            };
            log::debug!(
                "depth {depth} score {:.2} nodes {nodes} best {mv}",
                result.score
            );
            best = Some((mv, stats));

            if deadline.is_some_and(|d| Instant::now() >= d) {
                break;
            }
        }

        best
    }
}
