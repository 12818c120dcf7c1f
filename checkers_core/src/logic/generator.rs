use crate::logic::board::{Board, Cell, Color, Piece, Position, ROWS};
use serde::{Deserialize, Serialize};

/// Destinations reachable by one piece, each with the pieces jumped on the
/// way there in path order.
///
/// Insertion order is kept. Inserting a destination that is already present
/// replaces its captures in place, so when two capture paths end on the same
/// square the one generated last wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveMap {
    entries: Vec<(Position, Vec<Piece>)>,
}

impl MoveMap {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, to: Position, captured: Vec<Piece>) {
        if let Some(entry) = self.entries.iter_mut().find(|(pos, _)| *pos == to) {
            entry.1 = captured;
        } else {
            self.entries.push((to, captured));
        }
    }

    pub fn extend(&mut self, other: Self) {
        for (to, captured) in other.entries {
            self.insert(to, captured);
        }
    }

    #[must_use]
    pub fn get(&self, to: Position) -> Option<&[Piece]> {
        self.entries
            .iter()
            .find(|(pos, _)| *pos == to)
            .map(|(_, captured)| captured.as_slice())
    }

    #[must_use]
    pub fn contains(&self, to: Position) -> bool {
        self.get(to).is_some()
    }

    pub fn destinations(&self) -> impl Iterator<Item = Position> + '_ {
        self.entries.iter().map(|(pos, _)| *pos)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (Position, Vec<Piece>)> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn has_captures(&self) -> bool {
        self.entries.iter().any(|(_, captured)| !captured.is_empty())
    }
}

impl<'a> IntoIterator for &'a MoveMap {
    type Item = &'a (Position, Vec<Piece>);
    type IntoIter = std::slice::Iter<'a, (Position, Vec<Piece>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for MoveMap {
    type Item = (Position, Vec<Piece>);
    type IntoIter = std::vec::IntoIter<(Position, Vec<Piece>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// One diagonal walk: the row step is fixed for the whole chain, the column
/// step picks the left or right diagonal.
#[derive(Clone, Copy)]
struct Ray {
    color: Color,
    row_step: i8,
    col_step: i8,
}

impl Board {
    /// Every destination `piece` can reach this turn.
    ///
    /// Men walk toward the opponent's back row, kings walk both ways. Jump
    /// chains are followed until no further jump is available, and only the
    /// final landing square of a chain is reported. Captures are optional:
    /// plain steps are listed alongside jumps.
    #[must_use]
    pub fn valid_moves(&self, piece: &Piece) -> MoveMap {
        let mut moves = MoveMap::new();
        let from = piece.position();

        for row_step in piece.directions() {
            for col_step in [-1, 1] {
                let ray = Ray {
                    color: piece.color,
                    row_step,
                    col_step,
                };
                self.traverse(from, ray, &[], &mut moves);
            }
        }

        moves
    }

    /// Walks at most two squares from `origin` along `ray`.
    ///
    /// `skipped` holds the pieces already jumped in this chain. When it is
    /// non-empty only further jumps are accepted.
    fn traverse(&self, origin: Position, ray: Ray, skipped: &[Piece], moves: &mut MoveMap) {
        let mut jumped: Option<Piece> = None;
        let mut current = origin;

        for _ in 0..window(origin.row, ray.row_step) {
            let Some(next) = current.offset(ray.row_step, ray.col_step) else {
                break;
            };
            current = next;

            match self.cell(current) {
                Cell::Empty => {
                    match jumped {
                        None if skipped.is_empty() => moves.insert(current, Vec::new()),
                        None => {}
                        Some(victim) => {
                            let mut captured = skipped.to_vec();
                            captured.push(victim);
                            self.continue_chain(current, ray, captured, moves);
                        }
                    }
                    break;
                }
                Cell::Occupied(other) if other.color == ray.color => break,
                Cell::Occupied(other) => {
                    if jumped.is_some() {
                        break;
                    }
                    jumped = Some(other);
                }
            }
        }
    }

    /// Records `landing` unless a further jump can be made from it, in which
    /// case the longer chains are recorded instead.
    fn continue_chain(&self, landing: Position, ray: Ray, captured: Vec<Piece>, moves: &mut MoveMap) {
        let mut extended = MoveMap::new();
        for col_step in [-1, 1] {
            let next = Ray { col_step, ..ray };
            self.traverse(landing, next, &captured, &mut extended);
        }

        if extended.is_empty() {
            moves.insert(landing, captured);
        } else {
            moves.extend(extended);
        }
    }
}

/// Number of squares a walk may visit from `row`: one step plus the landing
/// square of a jump, clipped at the board edge.
fn window(row: usize, row_step: i8) -> usize {
    if row_step < 0 {
        row.min(2)
    } else {
        (ROWS - 1 - row).min(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_opening_moves() {
        let board = Board::new();
        let front = board.piece_at(pos(2, 1)).unwrap();
        let moves = board.valid_moves(&front);
        let dests: Vec<Position> = moves.destinations().collect();
        assert_eq!(dests, vec![pos(3, 0), pos(3, 2)]);
        assert!(!moves.has_captures());

        let back = board.piece_at(pos(0, 1)).unwrap();
        assert!(board.valid_moves(&back).is_empty());
    }

    #[test]
    fn test_single_jump() {
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
        let light = board.piece_at(pos(2, 3)).unwrap();
        let dark = board.piece_at(pos(3, 4)).unwrap();
        let moves = board.valid_moves(&light);

        assert_eq!(moves.get(pos(4, 5)), Some(&[dark][..]));
        assert_eq!(moves.get(pos(3, 2)), Some(&[][..]));
        assert!(!moves.contains(pos(3, 4)));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn test_king_jumps_backwards() {
        let board = Board::from_diagram(
            "........
             ........
             ........
             ..d.....
             ...L....
             ........
             ........
             ........",
        )
        .unwrap();
        let king = board.piece_at(pos(4, 3)).unwrap();
        let dark = board.piece_at(pos(3, 2)).unwrap();
        let moves = board.valid_moves(&king);

        assert_eq!(moves.get(pos(2, 1)), Some(&[dark][..]));
        assert!(!moves.contains(pos(3, 2)));
        let dests: Vec<Position> = moves.destinations().collect();
        assert_eq!(dests, vec![pos(2, 1), pos(3, 4), pos(5, 2), pos(5, 4)]);
    }

    #[test]
    fn test_double_jump_reports_only_final_landing() {
        let board = Board::from_diagram(
            ".l......
             ..d.....
             ........
             ..d.....
             ........
             ........
             ........
             ........",
        )
        .unwrap();
        let light = board.piece_at(pos(0, 1)).unwrap();
        let first = board.piece_at(pos(1, 2)).unwrap();
        let second = board.piece_at(pos(3, 2)).unwrap();
        let moves = board.valid_moves(&light);

        assert_eq!(moves.get(pos(4, 1)), Some(&[first, second][..]));
        assert!(!moves.contains(pos(2, 3)));
        assert_eq!(moves.get(pos(1, 0)), Some(&[][..]));
    }

    #[test]
    fn test_blocked_by_own_piece_and_double_occupancy() {
        let board = Board::from_diagram(
            "........
             ........
             ...l....
             ..l.d...
             .....d..
             ........
             ........
             ........",
        )
        .unwrap();
        let light = board.piece_at(pos(2, 3)).unwrap();
        assert!(board.valid_moves(&light).is_empty());
    }

    #[test]
    fn test_jump_landing_must_be_on_board() {
        let board = Board::from_diagram(
            ".l......
             ..d.....
             ........
             ........
             ........
             ........
             ........
             ........",
        )
        .unwrap();
        let dark = board.piece_at(pos(1, 2)).unwrap();
        let dests: Vec<Position> = board.valid_moves(&dark).destinations().collect();
        assert_eq!(dests, vec![pos(0, 3)]);
    }

    #[test]
    fn test_duplicate_destination_keeps_last_path() {
        let mut map = MoveMap::new();
        let a = Piece::new(3, 2, Color::Dark);
        let b = Piece::new(3, 4, Color::Dark);
        map.insert(pos(4, 3), vec![a]);
        map.insert(pos(5, 0), Vec::new());
        map.insert(pos(4, 3), vec![b]);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(pos(4, 3)), Some(&[b][..]));
        let dests: Vec<Position> = map.destinations().collect();
        assert_eq!(dests, vec![pos(4, 3), pos(5, 0)]);
    }

    #[test]
    fn test_converging_chains_last_path_wins() {
        // Two chains from (0,3) land on (4,3): via (1,2),(3,2) and via
        // (1,4),(3,4). The right-hand chain is generated last.
        let board = Board::from_diagram(
            "...l....
             ..d.d...
             ........
             ..d.d...
             ........
             ........
             ........
             ........",
        )
        .unwrap();
        let light = board.piece_at(pos(0, 3)).unwrap();
        let right_first = board.piece_at(pos(1, 4)).unwrap();
        let right_second = board.piece_at(pos(3, 4)).unwrap();
        let moves = board.valid_moves(&light);

        assert_eq!(moves.get(pos(4, 3)), Some(&[right_first, right_second][..]));
    }
}
