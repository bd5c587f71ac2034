//! Turn phases.
//!
//! A full round is four phases: white moves, white attacks, black moves,
//! black attacks. Leaving an attack phase ticks the heal cooldowns of the
//! side that just acted.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::game::board::Board;
use crate::game::types::{PhaseKind, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TurnState {
    #[default]
    WhiteMove,
    WhiteAttack,
    BlackMove,
    BlackAttack,
}

impl TurnState {
    pub const ALL: [TurnState; 4] = [
        TurnState::WhiteMove,
        TurnState::WhiteAttack,
        TurnState::BlackMove,
        TurnState::BlackAttack,
    ];

    pub fn active_side(self) -> Side {
        match self {
            TurnState::WhiteMove | TurnState::WhiteAttack => Side::White,
            TurnState::BlackMove | TurnState::BlackAttack => Side::Black,
        }
    }

    pub fn phase_kind(self) -> PhaseKind {
        match self {
            TurnState::WhiteMove | TurnState::BlackMove => PhaseKind::Move,
            TurnState::WhiteAttack | TurnState::BlackAttack => PhaseKind::Attack,
        }
    }

    pub fn next(self) -> TurnState {
        match self {
            TurnState::WhiteMove => TurnState::WhiteAttack,
            TurnState::WhiteAttack => TurnState::BlackMove,
            TurnState::BlackMove => TurnState::BlackAttack,
            TurnState::BlackAttack => TurnState::WhiteMove,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TurnController {
    current: TurnState,
}

impl TurnController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> TurnState {
        self.current
    }

    /// Move to the next phase. Returns the new phase.
    pub fn advance(&mut self, board: &mut Board) -> TurnState {
        let leaving = self.current;
        if leaving.phase_kind() == PhaseKind::Attack {
            board.tick_heal_cooldowns(leaving.active_side());
        }
        self.current = leaving.next();
        debug!("[TurnController] {:?} -> {:?}", leaving, self.current);
        self.current
    }

    pub fn reset(&mut self) {
        self.current = TurnState::WhiteMove;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{PieceKind, Position};

    #[test]
    fn test_phase_derivations() {
        let expected = [
            (TurnState::WhiteMove, Side::White, PhaseKind::Move),
            (TurnState::WhiteAttack, Side::White, PhaseKind::Attack),
            (TurnState::BlackMove, Side::Black, PhaseKind::Move),
            (TurnState::BlackAttack, Side::Black, PhaseKind::Attack),
        ];
        for (turn, side, kind) in expected {
            assert_eq!(turn.active_side(), side);
            assert_eq!(turn.phase_kind(), kind);
        }
    }

    #[test]
    fn test_phases_cycle_in_order() {
        let mut board = Board::new();
        let mut turn = TurnController::new();
        assert_eq!(turn.current(), TurnState::WhiteMove);

        for round in 0..3 {
            for expected in TurnState::ALL {
                assert_eq!(turn.current(), expected, "round {round}");
                turn.advance(&mut board);
            }
        }
        assert_eq!(turn.current(), TurnState::WhiteMove);
    }

    #[test]
    fn test_cooldown_ticks_only_after_own_attack_phase() {
        let mut board = Board::new();
        let white = board.spawn(PieceKind::Mage, Side::White, Position::new(0, 0)).unwrap();
        let black = board.spawn(PieceKind::Mage, Side::Black, Position::new(15, 0)).unwrap();
        board.piece_mut(white).unwrap().start_heal_cooldown();
        board.piece_mut(black).unwrap().start_heal_cooldown();

        let mut turn = TurnController::new();
        let cooldowns = |board: &Board| {
            (
                board.piece(white).unwrap().heal_cooldown,
                board.piece(black).unwrap().heal_cooldown,
            )
        };

        turn.advance(&mut board); // leave whiteMove
        assert_eq!(cooldowns(&board), (2, 2));
        turn.advance(&mut board); // leave whiteAttack
        assert_eq!(cooldowns(&board), (1, 2));
        turn.advance(&mut board); // leave blackMove
        assert_eq!(cooldowns(&board), (1, 2));
        turn.advance(&mut board); // leave blackAttack
        assert_eq!(cooldowns(&board), (1, 1));

        for _ in 0..8 {
            turn.advance(&mut board);
        }
        assert_eq!(cooldowns(&board), (0, 0));
    }

    #[test]
    fn test_reset_returns_to_white_move() {
        let mut board = Board::new();
        let mut turn = TurnController::new();
        turn.advance(&mut board);
        turn.advance(&mut board);
        turn.reset();
        assert_eq!(turn.current(), TurnState::WhiteMove);
    }
}
