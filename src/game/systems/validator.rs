//! Action legality.
//!
//! Checks run in a fixed order and the first failure wins: side, phase,
//! permission, range activity, range geometry, bounds, then occupancy.
//! Nothing here mutates state.

use std::collections::BTreeSet;

use crate::game::board::Board;
use crate::game::entities::Piece;
use crate::game::error::Rejection;
use crate::game::permissions::{CallerPermissions, Capabilities};
use crate::game::turn::TurnState;
use crate::game::types::{ActionKind, PhaseKind, Position};

/// Full check of a proposed action, naming the first rule it breaks.
pub fn check_action(
    piece: &Piece,
    kind: ActionKind,
    target: Position,
    turn: TurnState,
    permissions: &CallerPermissions,
    board: &Board,
) -> Result<(), Rejection> {
    let active = turn.active_side();
    if piece.side != active {
        return Err(Rejection::NotActiveSide { piece: piece.side, active });
    }
    if kind.phase_kind() != turn.phase_kind() {
        return Err(Rejection::WrongPhase);
    }
    if !permissions.has(piece.side, Capabilities::from(kind)) {
        return Err(Rejection::MissingPermission);
    }
    let range = piece
        .range_for(kind)
        .filter(|r| r.is_active())
        .ok_or(Rejection::RangeInactive)?;
    // TODO: occlusion for ranges flagged `line_of_sight` once blocking rules exist.
    if !range.contains(piece.pos, target) {
        return Err(Rejection::OutOfRange(target));
    }
    if !board.in_bounds(target) {
        return Err(Rejection::OutOfBounds(target));
    }
    check_occupancy(piece, kind, target, board)
}

pub fn legal(
    piece: &Piece,
    kind: ActionKind,
    target: Position,
    turn: TurnState,
    permissions: &CallerPermissions,
    board: &Board,
) -> bool {
    check_action(piece, kind, target, turn, permissions, board).is_ok()
}

/// What must (or must not) stand on the target cell.
fn check_occupancy(piece: &Piece, kind: ActionKind, target: Position, board: &Board) -> Result<(), Rejection> {
    let occupant = board.piece_at(target);
    match kind {
        ActionKind::Move => match occupant {
            None => Ok(()),
            Some(_) => Err(Rejection::TargetOccupied(target)),
        },
        ActionKind::Attack => match occupant {
            Some(other) if other.side != piece.side => Ok(()),
            _ => Err(Rejection::NoEnemyAtTarget(target)),
        },
        ActionKind::Heal => {
            let Some(other) = occupant.filter(|o| o.side == piece.side) else {
                return Err(Rejection::NoAllyAtTarget(target));
            };
            if !other.is_wounded() {
                return Err(Rejection::TargetAtFullHealth(target));
            }
            if !piece.is_heal_ready() {
                return Err(Rejection::HealOnCooldown(piece.heal_cooldown));
            }
            Ok(())
        }
    }
}

/// Passing the turn needs the same permission as acting in the current phase.
pub fn check_skip(turn: TurnState, permissions: &CallerPermissions) -> Result<(), Rejection> {
    let side = turn.active_side();
    let allowed = match turn.phase_kind() {
        PhaseKind::Move => permissions.has(side, Capabilities::MOVE),
        PhaseKind::Attack => {
            permissions.has(side, Capabilities::ATTACK) || permissions.has(side, Capabilities::HEAL)
        }
    };
    if allowed { Ok(()) } else { Err(Rejection::MissingPermission) }
}

/// Cells a piece could target with `kind`, for highlighting. Ignores whose
/// turn it is and who is asking.
pub fn legal_targets(piece: &Piece, kind: ActionKind, board: &Board) -> BTreeSet<Position> {
    let Some(range) = piece.range_for(kind).filter(|r| r.is_active()) else {
        return BTreeSet::new();
    };
    range
        .ring(piece.pos)
        .filter(|target| board.in_bounds(*target))
        .filter(|target| check_occupancy(piece, kind, *target, board).is_ok())
        .collect()
}
