//! Reasons a request is turned away by the engine.
//!
//! A rejection is a security boundary, not a recoverable game error: it is
//! logged for diagnostics and the caller is told nothing.

use thiserror::Error;

use crate::game::types::{PieceId, Position, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the game is over")]
    GameOver,

    #[error("piece {0} does not exist")]
    UnknownPiece(PieceId),

    #[error("piece belongs to {piece:?} but it is {active:?}'s turn")]
    NotActiveSide { piece: Side, active: Side },

    #[error("action is not allowed in the current phase")]
    WrongPhase,

    #[error("caller lacks the permission for this action")]
    MissingPermission,

    #[error("piece has no range for this action")]
    RangeInactive,

    #[error("target {0} is out of range")]
    OutOfRange(Position),

    #[error("target {0} is off the board")]
    OutOfBounds(Position),

    #[error("target {0} is occupied")]
    TargetOccupied(Position),

    #[error("no enemy at {0}")]
    NoEnemyAtTarget(Position),

    #[error("no ally at {0}")]
    NoAllyAtTarget(Position),

    #[error("ally at {0} is already at full health")]
    TargetAtFullHealth(Position),

    #[error("heal is on cooldown for {0} more turn(s)")]
    HealOnCooldown(i32),
}
