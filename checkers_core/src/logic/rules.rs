use crate::logic::board::{Board, Piece, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    NoPieceAtSource,
    NotYourTurn,
    IllegalDestination,
    GameOver,
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPieceAtSource => write!(f, "no piece on the source square"),
            Self::NotYourTurn => write!(f, "piece belongs to the side not on move"),
            Self::IllegalDestination => write!(f, "destination is not a legal move for this piece"),
            Self::GameOver => write!(f, "game is already decided"),
        }
    }
}

impl std::error::Error for MoveError {}

impl Board {
    /// Applies `piece`'s move to `to` and removes the pieces jumped on the way.
    ///
    /// The destination is checked against [`Board::valid_moves`] before the
    /// board is touched; a rejected move leaves the board unchanged. Returns
    /// the captured pieces.
    pub fn play(&mut self, piece: &Piece, to: Position) -> Result<Vec<Piece>, MoveError> {
        let current = self
            .piece_at(piece.position())
            .ok_or(MoveError::NoPieceAtSource)?;
        if current.color != piece.color {
            return Err(MoveError::NoPieceAtSource);
        }

        let moves = self.valid_moves(&current);
        let captured = moves
            .get(to)
            .ok_or(MoveError::IllegalDestination)?
            .to_vec();

        self.apply_move(&current, to);
        self.remove(&captured);
        Ok(captured)
    }
}
