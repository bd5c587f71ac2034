//! Opening layouts.
//!
//! A layout is the list of pieces placed on a fresh board. The standard one
//! is the two opposing armies on the outer columns; the main castles are not
//! part of it and are left to whoever decides the win condition.

use serde::{Deserialize, Serialize};

use crate::game::types::{PieceKind, Position, Side};

/// One piece to spawn at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub kind: PieceKind,
    pub side: Side,
    pub pos: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// No pieces; the setup collaborator creates them one by one.
    Empty,
    #[default]
    Standard,
}

/// Back rank: mages on the corners, archers around the castle gap.
const BACK_RANK: [(i32, PieceKind); 6] = [
    (0, PieceKind::Mage),
    (1, PieceKind::Archer),
    (2, PieceKind::Archer),
    (5, PieceKind::Archer),
    (6, PieceKind::Archer),
    (7, PieceKind::Mage),
];

/// Front rank, one piece per row.
const FRONT_RANK: [PieceKind; 8] = [
    PieceKind::Castle,
    PieceKind::Cavalry,
    PieceKind::FootSoldier,
    PieceKind::FootSoldier,
    PieceKind::FootSoldier,
    PieceKind::FootSoldier,
    PieceKind::Cavalry,
    PieceKind::Castle,
];

impl Layout {
    pub fn placements(self) -> Vec<Placement> {
        match self {
            Layout::Empty => Vec::new(),
            Layout::Standard => [(Side::White, 0, 1), (Side::Black, 15, 14)]
                .into_iter()
                .flat_map(|(side, back_x, front_x)| army(side, back_x, front_x))
                .collect(),
        }
    }
}

fn army(side: Side, back_x: i32, front_x: i32) -> Vec<Placement> {
    let back = BACK_RANK.iter().map(move |&(y, kind)| Placement {
        kind,
        side,
        pos: Position::new(back_x, y),
    });
    let front = (0..).zip(FRONT_RANK).map(move |(y, kind)| Placement {
        kind,
        side,
        pos: Position::new(front_x, y),
    });
    back.chain(front).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_standard_layout_is_symmetric() {
        let placements = Layout::Standard.placements();
        let white = placements.iter().filter(|p| p.side == Side::White).count();
        let black = placements.iter().filter(|p| p.side == Side::Black).count();
        assert_eq!(white, 14);
        assert_eq!(black, 14);

        for p in placements.iter().filter(|p| p.side == Side::White) {
            let mirrored = Position::new(15 - p.pos.x, p.pos.y);
            assert!(placements
                .iter()
                .any(|q| q.side == Side::Black && q.pos == mirrored && q.kind == p.kind));
        }
    }

    #[test]
    fn test_standard_layout_has_no_overlap() {
        let placements = Layout::Standard.placements();
        let cells: HashSet<Position> = placements.iter().map(|p| p.pos).collect();
        assert_eq!(cells.len(), placements.len());
    }

    #[test]
    fn test_empty_layout() {
        assert!(Layout::Empty.placements().is_empty());
    }
}
