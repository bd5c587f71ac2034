use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier the transport assigns to a remote caller.
pub type ConnectionId = u64;

/// A cell coordinate. Signed so that out-of-board targets sent by clients
/// can be represented and rejected instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

/// What a piece is asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Move,
    Attack,
    Heal,
}

impl ActionKind {
    /// The phase kind in which this action is legal.
    pub fn phase_kind(self) -> PhaseKind {
        match self {
            ActionKind::Move => PhaseKind::Move,
            ActionKind::Attack | ActionKind::Heal => PhaseKind::Attack,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Move,
    Attack,
}

/// A square ring of target cells around an actor: Chebyshev distance at most
/// `max`, minus the inner square where both axes are closer than `min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeDescriptor {
    pub min: i32,
    pub max: i32,
    /// Carried for every descriptor but not enforced by validation.
    pub line_of_sight: bool,
}

impl RangeDescriptor {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max, line_of_sight: false }
    }

    pub const fn with_line_of_sight(min: i32, max: i32) -> Self {
        Self { min, max, line_of_sight: true }
    }

    pub fn is_active(&self) -> bool {
        self.min >= 0 && self.max >= 0
    }

    /// Geometric ring test only; activity and board bounds are checked elsewhere.
    pub fn contains(&self, origin: Position, target: Position) -> bool {
        let dx = (i64::from(target.x) - i64::from(origin.x)).abs();
        let dy = (i64::from(target.y) - i64::from(origin.y)).abs();
        let (min, max) = (i64::from(self.min), i64::from(self.max));
        dx.max(dy) <= max && !(dx < min && dy < min)
    }

    /// Every cell of the ring around `origin`, bounds not applied.
    pub fn ring(&self, origin: Position) -> impl Iterator<Item = Position> + '_ {
        let reach = self.max.max(0);
        (origin.x - reach..=origin.x + reach)
            .flat_map(move |x| (origin.y - reach..=origin.y + reach).map(move |y| Position::new(x, y)))
            .filter(move |target| self.contains(origin, *target))
    }
}

/// The unit kinds a side can field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    Castle,
    FootSoldier,
    Archer,
    Mage,
    Cavalry,
}
