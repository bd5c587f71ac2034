//! Board occupancy and the live piece set.
//!
//! The board owns every piece still in play. A piece's `pos` and the cell
//! that names it are only ever written together, through `place`,
//! `relocate` and `remove`. The board has no policy: callers validate bounds
//! and occupancy before mutating it.

use std::collections::BTreeMap;

use crate::config::game::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::entities::{Piece, Placement};
use crate::game::types::{PieceId, PieceKind, Position, Side};

#[derive(Debug, Clone)]
pub struct Board {
    // Indexed [y][x].
    cells: Vec<Vec<Option<PieceId>>>,
    pieces: BTreeMap<PieceId, Piece>,
    next_id: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: vec![vec![None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            pieces: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        (0..BOARD_WIDTH).contains(&pos.x) && (0..BOARD_HEIGHT).contains(&pos.y)
    }

    fn index(&self, pos: Position) -> Option<(usize, usize)> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some((usize::try_from(pos.x).ok()?, usize::try_from(pos.y).ok()?))
    }

    pub fn occupant_at(&self, pos: Position) -> Option<PieceId> {
        let (x, y) = self.index(pos)?;
        self.cells[y][x]
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(&id)
    }

    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.occupant_at(pos).and_then(|id| self.pieces.get(&id))
    }

    /// All pieces in play, in id order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = &Piece> {
        self.pieces.values().filter(move |p| p.side == side)
    }

    /// Create a piece from its preset on an empty in-bounds cell.
    pub(crate) fn spawn(&mut self, kind: PieceKind, side: Side, pos: Position) -> Option<PieceId> {
        if !self.in_bounds(pos) || self.occupant_at(pos).is_some() {
            return None;
        }
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.pieces.insert(id, Piece::new(id, kind, side, pos));
        self.place(id, pos);
        Some(id)
    }

    pub(crate) fn spawn_all(&mut self, placements: &[Placement]) {
        for placement in placements {
            self.spawn(placement.kind, placement.side, placement.pos);
        }
    }

    /// Put `id` on `pos`, overwriting whatever was there, and record the new
    /// position on the piece. The piece's old cell must already be cleared.
    pub(crate) fn place(&mut self, id: PieceId, pos: Position) {
        debug_assert!(self.in_bounds(pos), "place out of bounds: {pos}");
        let Some((x, y)) = self.index(pos) else {
            return;
        };
        self.cells[y][x] = Some(id);
        if let Some(piece) = self.pieces.get_mut(&id) {
            piece.pos = pos;
        }
    }

    pub(crate) fn clear(&mut self, pos: Position) {
        if let Some((x, y)) = self.index(pos) {
            self.cells[y][x] = None;
        }
    }

    /// Move a piece from its current cell to `to` as one step.
    pub(crate) fn relocate(&mut self, id: PieceId, to: Position) -> Option<Position> {
        let from = self.pieces.get(&id)?.pos;
        self.clear(from);
        self.place(id, to);
        Some(from)
    }

    /// Take a piece out of play, freeing its cell.
    pub(crate) fn remove(&mut self, id: PieceId) -> Option<Piece> {
        let piece = self.pieces.remove(&id)?;
        if self.occupant_at(piece.pos) == Some(id) {
            self.clear(piece.pos);
        }
        Some(piece)
    }

    pub(crate) fn tick_heal_cooldowns(&mut self, side: Side) {
        self.pieces
            .values_mut()
            .filter(|p| p.side == side)
            .for_each(Piece::reduce_heal_cooldown);
    }

    /// True when every piece sits on the cell that names it and no cell names
    /// a piece that is out of play.
    pub fn is_consistent(&self) -> bool {
        let pieces_agree = self
            .pieces
            .values()
            .all(|p| self.occupant_at(p.pos) == Some(p.id));
        let occupied = self.cells.iter().flatten().filter(|c| c.is_some()).count();
        let cells_agree = self
            .cells
            .iter()
            .flatten()
            .flatten()
            .all(|id| self.pieces.contains_key(id));
        pieces_agree && cells_agree && occupied == self.pieces.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_bounds() {
        let board = Board::new();
        assert!(board.in_bounds(Position::new(0, 0)));
        assert!(board.in_bounds(Position::new(15, 7)));
        assert!(!board.in_bounds(Position::new(16, 0)));
        assert!(!board.in_bounds(Position::new(0, 8)));
        assert!(!board.in_bounds(Position::new(-1, 3)));
        assert_eq!(board.occupant_at(Position::new(-1, 3)), None);
    }

    #[test]
    fn test_spawn_refuses_occupied_or_outside() {
        let mut board = Board::new();
        let pos = Position::new(3, 3);
        let id = board.spawn(PieceKind::Archer, Side::White, pos);
        assert!(id.is_some());
        assert_eq!(board.occupant_at(pos), id);
        assert_eq!(board.spawn(PieceKind::Mage, Side::Black, pos), None);
        assert_eq!(board.spawn(PieceKind::Mage, Side::Black, Position::new(20, 0)), None);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_relocate_keeps_board_and_piece_in_sync() {
        let mut board = Board::new();
        let from = Position::new(1, 1);
        let to = Position::new(2, 3);
        let id = board.spawn(PieceKind::Cavalry, Side::White, from).unwrap();

        assert_eq!(board.relocate(id, to), Some(from));
        assert_eq!(board.occupant_at(from), None);
        assert_eq!(board.occupant_at(to), Some(id));
        assert_eq!(board.piece(id).unwrap().pos, to);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_remove_frees_cell() {
        let mut board = Board::new();
        let pos = Position::new(4, 4);
        let id = board.spawn(PieceKind::Castle, Side::Black, pos).unwrap();

        let removed = board.remove(id).unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(board.occupant_at(pos), None);
        assert!(board.piece(id).is_none());
        assert!(board.is_consistent());
    }

    #[test]
    fn test_desync_is_detected() {
        let mut board = Board::new();
        let id = board.spawn(PieceKind::Castle, Side::Black, Position::new(4, 4)).unwrap();
        // Clearing the cell without moving the piece breaks the invariant.
        board.clear(Position::new(4, 4));
        assert!(!board.is_consistent());
        board.place(id, Position::new(4, 4));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_tick_only_touches_one_side() {
        let mut board = Board::new();
        let white = board.spawn(PieceKind::Mage, Side::White, Position::new(0, 0)).unwrap();
        let black = board.spawn(PieceKind::Mage, Side::Black, Position::new(15, 0)).unwrap();
        board.piece_mut(white).unwrap().start_heal_cooldown();
        board.piece_mut(black).unwrap().start_heal_cooldown();

        board.tick_heal_cooldowns(Side::White);
        assert_eq!(board.piece(white).unwrap().heal_cooldown, 1);
        assert_eq!(board.piece(black).unwrap().heal_cooldown, 2);
    }
}
