//! Piece movement system.
//!
//! This module handles relocating pieces on the board.

use crate::game::board::Board;
use crate::game::types::{PieceId, Position};

/// Move the specified piece to `to`.
/// Returns the cell it left, or `None` if the piece is not in play.
pub fn move_piece(board: &mut Board, piece: PieceId, to: Position) -> Option<Position> {
    board.relocate(piece, to)
}
