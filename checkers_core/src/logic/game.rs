use crate::logic::board::{Board, Color, Piece, Position};
use crate::logic::rules::MoveError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won(Color),
}

/// A move for one side: which piece goes where and what it jumps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub captured: Vec<Piece>,
}

impl Move {
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from, sep, self.to)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Position,
    pub to: Position,
    pub piece: Piece,
    pub captured: Vec<Piece>,
    pub color: Color,
    pub promoted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Color,
    pub status: GameStatus,
    pub last_move: Option<(Position, Position)>,
    pub history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard opening position with Light to move.
    #[must_use]
    pub fn new() -> Self {
        Self::from_board(Board::new(), Color::Light)
    }

    #[must_use]
    pub fn from_board(board: Board, turn: Color) -> Self {
        let mut state = Self {
            board,
            turn,
            status: GameStatus::Playing,
            last_move: None,
            history: Vec::new(),
        };
        state.update_status();
        state
    }

    /// Every move available to `color`, pieces in row-major order.
    #[must_use]
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        legal_moves(&self.board, color)
    }

    /// The validated entry point for interactive callers. Nothing changes
    /// unless the move is legal for the side on move.
    pub fn make_move(&mut self, from: Position, to: Position) -> Result<(), MoveError> {
        if self.status != GameStatus::Playing {
            return Err(MoveError::GameOver);
        }

        let piece = self
            .board
            .piece_at(from)
            .ok_or(MoveError::NoPieceAtSource)?;
        if piece.color != self.turn {
            log::warn!("rejected {from}->{to}: {} is not on move", piece.color);
            return Err(MoveError::NotYourTurn);
        }

        let captured = self.board.play(&piece, to).inspect_err(|err| {
            log::warn!("rejected {from}->{to}: {err}");
        })?;

        let promoted = !piece.is_king
            && self
                .board
                .piece_at(to)
                .is_some_and(|landed| landed.is_king);

        self.history.push(MoveRecord {
            from,
            to,
            piece,
            captured,
            color: self.turn,
            promoted,
        });
        self.turn = self.turn.opposite();
        self.last_move = Some((from, to));

        self.update_status();

        Ok(())
    }

    /// Plays a move produced by the engine through the same validation.
    pub fn apply(&mut self, mv: &Move) -> Result<(), MoveError> {
        self.make_move(mv.from, mv.to)
    }

    fn update_status(&mut self) {
        if let Some(winner) = self.board.winner() {
            self.status = GameStatus::Won(winner);
        }
    }
}

/// Every move available to `color` on `board`, pieces in row-major order and
/// each piece's destinations in generation order.
#[must_use]
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    board
        .pieces_of(color)
        .iter()
        .flat_map(|piece| {
            board
                .valid_moves(piece)
                .into_iter()
                .map(move |(to, captured)| Move {
                    from: piece.position(),
                    to,
                    captured,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_opening_has_seven_moves() {
        let game = GameState::new();
        let moves = game.legal_moves(Color::Light);
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|mv| !mv.is_capture()));
        assert_eq!(moves[0].to_string(), "(2, 1)-(3, 0)");
    }

    #[test]
    fn test_make_move_flips_turn_and_records() {
        let mut game = GameState::new();
        game.make_move(pos(2, 1), pos(3, 2)).unwrap();

        assert_eq!(game.turn, Color::Dark);
        assert_eq!(game.last_move, Some((pos(2, 1), pos(3, 2))));
        assert_eq!(game.history.len(), 1);
        assert_eq!(game.history[0].color, Color::Light);
        assert!(!game.history[0].promoted);
        assert!(game.board.is_consistent());
    }

    #[test]
    fn test_make_move_rejections_leave_state_untouched() {
        let mut game = GameState::new();
        let before = game.board.clone();

        assert_eq!(
            game.make_move(pos(5, 0), pos(4, 1)),
            Err(MoveError::NotYourTurn)
        );
        assert_eq!(
            game.make_move(pos(3, 0), pos(4, 1)),
            Err(MoveError::NoPieceAtSource)
        );
        assert_eq!(
            game.make_move(pos(2, 1), pos(4, 3)),
            Err(MoveError::IllegalDestination)
        );
        assert_eq!(game.board, before);
        assert_eq!(game.turn, Color::Light);
        assert!(game.history.is_empty());
    }

    #[test]
    fn test_winning_capture_ends_game() {
        let board = Board::from_diagram(
            "........
             ........
             ...l....
             ....d...
             ........
             ........
             ........
             ........",
        )
        .unwrap();
        let mut game = GameState::from_board(board, Color::Light);
        assert_eq!(game.status, GameStatus::Playing);

        game.make_move(pos(2, 3), pos(4, 5)).unwrap();
        assert_eq!(game.status, GameStatus::Won(Color::Light));
        assert_eq!(game.history[0].captured.len(), 1);
        assert_eq!(
            game.make_move(pos(4, 5), pos(5, 6)),
            Err(MoveError::GameOver)
        );
    }

    #[test]
    fn test_promotion_is_recorded() {
        let board = Board::from_diagram(
            "........
             ........
             ........
             ........
             ........
             d.......
             .....l..
             ........",
        )
        .unwrap();
        let mut game = GameState::from_board(board, Color::Light);
        game.make_move(pos(6, 5), pos(7, 6)).unwrap();
        assert!(game.history[0].promoted);
        assert_eq!(game.board.kings(Color::Light), 1);
    }
}
