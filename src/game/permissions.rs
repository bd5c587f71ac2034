//! Per-connection capability grants.
//!
//! Each connection holds an independent set of capability bits per side. The
//! setup collaborator fills the table before play; during play the engine
//! only reads it.

use std::collections::HashMap;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::game::types::{ActionKind, ConnectionId, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Self = Self(0);
    pub const VIEW_HEALTH: Self = Self(1);
    pub const MOVE: Self = Self(2);
    pub const ATTACK: Self = Self(4);
    pub const HEAL: Self = Self(8);

    pub const FULL_MOVE: Self = Self::MOVE;
    pub const FULL_ATTACK: Self = Self(Self::ATTACK.0 | Self::HEAL.0);
    pub const FULL_INTERACT: Self = Self(Self::VIEW_HEALTH.0 | Self::FULL_MOVE.0 | Self::FULL_ATTACK.0);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every bit of `other` is granted.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Capabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Capabilities {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<ActionKind> for Capabilities {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Move => Capabilities::MOVE,
            ActionKind::Attack => Capabilities::ATTACK,
            ActionKind::Heal => Capabilities::HEAL,
        }
    }
}

/// One caller's grants for both sides, resolved once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallerPermissions {
    pub white: Capabilities,
    pub black: Capabilities,
}

impl CallerPermissions {
    pub fn get(&self, side: Side) -> Capabilities {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }

    /// Asking for the empty set is true only when nothing is granted.
    pub fn has(&self, side: Side, wanted: Capabilities) -> bool {
        let granted = self.get(side);
        if wanted.is_empty() {
            return granted.is_empty();
        }
        granted.contains(wanted)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PermissionTable {
    grants: HashMap<ConnectionId, HashMap<Side, Capabilities>>,
}

impl PermissionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_permissions(&mut self, connection: ConnectionId, side: Side, capabilities: Capabilities) {
        self.grants.entry(connection).or_default().insert(side, capabilities);
    }

    pub fn clear_permissions(&mut self, connection: ConnectionId, side: Side) {
        if let Some(sides) = self.grants.get_mut(&connection) {
            sides.remove(&side);
            if sides.is_empty() {
                self.grants.remove(&connection);
            }
        }
    }

    pub fn get(&self, connection: ConnectionId, side: Side) -> Capabilities {
        self.grants
            .get(&connection)
            .and_then(|sides| sides.get(&side))
            .copied()
            .unwrap_or(Capabilities::NONE)
    }

    pub fn for_connection(&self, connection: ConnectionId) -> CallerPermissions {
        CallerPermissions {
            white: self.get(connection, Side::White),
            black: self.get(connection, Side::Black),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_connection_has_nothing() {
        let table = PermissionTable::new();
        let perms = table.for_connection(42);
        assert_eq!(perms.get(Side::White), Capabilities::NONE);
        assert!(!perms.has(Side::White, Capabilities::MOVE));
        assert!(perms.has(Side::White, Capabilities::NONE));
    }

    #[test]
    fn test_grants_are_per_side() {
        let mut table = PermissionTable::new();
        table.set_permissions(1, Side::White, Capabilities::FULL_MOVE | Capabilities::ATTACK);

        let perms = table.for_connection(1);
        assert!(perms.has(Side::White, Capabilities::MOVE));
        assert!(perms.has(Side::White, Capabilities::ATTACK));
        assert!(!perms.has(Side::White, Capabilities::HEAL));
        assert!(!perms.has(Side::White, Capabilities::FULL_ATTACK));
        assert!(!perms.has(Side::Black, Capabilities::MOVE));
        assert!(!perms.has(Side::White, Capabilities::NONE));
    }

    #[test]
    fn test_clear_permissions() {
        let mut table = PermissionTable::new();
        table.set_permissions(7, Side::Black, Capabilities::FULL_INTERACT);
        table.clear_permissions(7, Side::Black);
        assert_eq!(table.get(7, Side::Black), Capabilities::NONE);
    }

    #[test]
    fn test_full_interact_covers_everything() {
        let all = Capabilities::FULL_INTERACT;
        for cap in [
            Capabilities::VIEW_HEALTH,
            Capabilities::MOVE,
            Capabilities::ATTACK,
            Capabilities::HEAL,
        ] {
            assert!(all.contains(cap));
        }
        assert_eq!(all.bits(), 15);
    }
}
