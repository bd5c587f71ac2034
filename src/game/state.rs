//! Authoritative game state.
//!
//! `GameState::submit_action` and `GameState::skip` are the only paths that
//! change the board, piece stats or the turn once play has started.

use std::collections::BTreeSet;

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::game::board::Board;
use crate::game::entities::{Layout, Piece};
use crate::game::error::Rejection;
use crate::game::permissions::{Capabilities, PermissionTable};
use crate::game::systems::{check_action, check_skip, legal_targets, move_piece, resolve_attack, resolve_heal};
use crate::game::turn::{TurnController, TurnState};
use crate::game::types::{ActionKind, ConnectionId, PieceId, PieceKind, Position, Side};

/// What an accepted action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ActionOutcome {
    Moved { piece: PieceId, from: Position, to: Position },
    Attacked { piece: PieceId, target: PieceId, damage: i32, killed: bool },
    Healed { piece: PieceId, target: PieceId },
}

/// Health as shown to a caller allowed to see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthView {
    pub health: i32,
    pub max_health: i32,
}

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    turn: TurnController,
    permissions: PermissionTable,
    layout: Layout,
    winner: Option<Side>,
    game_over: bool,
    rng: StdRng,
}

impl GameState {
    /// Create a game with the given opening layout and an OS-seeded RNG.
    pub fn new(layout: Layout) -> Self {
        Self::with_rng(layout, StdRng::from_os_rng())
    }

    /// Create a game with a caller-provided RNG, e.g. a seeded one in tests.
    pub fn with_rng(layout: Layout, rng: StdRng) -> Self {
        let mut board = Board::new();
        board.spawn_all(&layout.placements());
        GameState {
            board,
            turn: TurnController::new(),
            permissions: PermissionTable::new(),
            layout,
            winner: None,
            game_over: false,
            rng,
        }
    }

    pub fn seeded(layout: Layout, seed: u64) -> Self {
        Self::with_rng(layout, StdRng::seed_from_u64(seed))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn permissions(&self) -> &PermissionTable {
        &self.permissions
    }

    // Setup interface.

    /// Spawn a piece. `None` if the cell is off the board or taken.
    pub fn create_piece(&mut self, kind: PieceKind, side: Side, pos: Position) -> Option<PieceId> {
        let id = self.board.spawn(kind, side, pos);
        match id {
            Some(id) => info!("[GameState] Created {:?} {} for {:?} at {}", kind, id, side, pos),
            None => warn!("[GameState] Cannot create {:?} at {}", kind, pos),
        }
        id
    }

    pub fn set_permissions(&mut self, connection: ConnectionId, side: Side, capabilities: Capabilities) {
        self.permissions.set_permissions(connection, side, capabilities);
    }

    pub fn clear_permissions(&mut self, connection: ConnectionId, side: Side) {
        self.permissions.clear_permissions(connection, side);
    }

    // Play.

    /// Validate and apply one action, then advance the turn.
    /// On rejection nothing changes.
    pub fn submit_action(
        &mut self,
        caller: ConnectionId,
        piece_id: PieceId,
        kind: ActionKind,
        target: Position,
    ) -> Result<ActionOutcome, Rejection> {
        let result = self.apply_action(caller, piece_id, kind, target);
        match &result {
            Ok(outcome) => info!("[GameState] connection={} {:?} -> now {:?}", caller, outcome, self.turn.current()),
            Err(rejection) => warn!(
                "[Validator] Rejected {:?} of {} to {} from connection={}: {}",
                kind, piece_id, target, caller, rejection
            ),
        }
        result
    }

    fn apply_action(
        &mut self,
        caller: ConnectionId,
        piece_id: PieceId,
        kind: ActionKind,
        target: Position,
    ) -> Result<ActionOutcome, Rejection> {
        if self.game_over {
            return Err(Rejection::GameOver);
        }
        let piece = self.board.piece(piece_id).ok_or(Rejection::UnknownPiece(piece_id))?;
        let permissions = self.permissions.for_connection(caller);
        check_action(piece, kind, target, self.turn.current(), &permissions, &self.board)?;

        let outcome = match kind {
            ActionKind::Move => {
                let from = move_piece(&mut self.board, piece_id, target).unwrap_or(target);
                ActionOutcome::Moved { piece: piece_id, from, to: target }
            }
            ActionKind::Attack => {
                // Validation guarantees an enemy on the target cell.
                let defender = self.board.occupant_at(target).ok_or(Rejection::NoEnemyAtTarget(target))?;
                let report = resolve_attack(&mut self.board, piece_id, defender, &mut self.rng);
                ActionOutcome::Attacked {
                    piece: piece_id,
                    target: defender,
                    damage: report.damage,
                    killed: report.killed,
                }
            }
            ActionKind::Heal => {
                let ally = self.board.occupant_at(target).ok_or(Rejection::NoAllyAtTarget(target))?;
                resolve_heal(&mut self.board, piece_id, ally);
                ActionOutcome::Healed { piece: piece_id, target: ally }
            }
        };

        self.turn.advance(&mut self.board);
        Ok(outcome)
    }

    /// Pass the current phase without acting.
    pub fn skip(&mut self, caller: ConnectionId) -> Result<TurnState, Rejection> {
        if self.game_over {
            warn!("[Validator] Rejected skip from connection={}: {}", caller, Rejection::GameOver);
            return Err(Rejection::GameOver);
        }
        let permissions = self.permissions.for_connection(caller);
        if let Err(rejection) = check_skip(self.turn.current(), &permissions) {
            warn!("[Validator] Rejected skip of {:?} from connection={}: {}", self.turn.current(), caller, rejection);
            return Err(rejection);
        }
        let turn = self.turn.advance(&mut self.board);
        info!("[GameState] connection={} skipped -> now {:?}", caller, turn);
        Ok(turn)
    }

    /// Latch the end of the game. The win condition itself is decided elsewhere.
    pub fn declare_winner(&mut self, side: Side) {
        self.game_over = true;
        self.winner = Some(side);
        info!("[GameState] {:?} is the winner", side);
    }

    /// Rebuild the opening layout and start over from white's move.
    /// Permissions are kept.
    pub fn restart(&mut self) {
        self.board = Board::new();
        self.board.spawn_all(&self.layout.placements());
        self.turn.reset();
        self.game_over = false;
        self.winner = None;
        info!("[GameState] Restarted with {:?} layout", self.layout);
    }

    // Queries.

    pub fn current_turn(&self) -> TurnState {
        self.turn.current()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Snapshot of whatever stands on `pos`.
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.board.piece_at(pos).cloned()
    }

    pub fn legal_targets(&self, piece_id: PieceId, kind: ActionKind) -> BTreeSet<Position> {
        self.board
            .piece(piece_id)
            .map(|piece| legal_targets(piece, kind, &self.board))
            .unwrap_or_default()
    }

    /// Health of a piece, only for callers holding `ViewHealth` on its side.
    pub fn view_health(&self, caller: ConnectionId, piece_id: PieceId) -> Option<HealthView> {
        let piece = self.board.piece(piece_id)?;
        let permissions = self.permissions.for_connection(caller);
        if !permissions.has(piece.side, Capabilities::VIEW_HEALTH) {
            return None;
        }
        Some(HealthView { health: piece.health, max_health: piece.max_health })
    }
}
