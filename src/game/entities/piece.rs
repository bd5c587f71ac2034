//! Piece entity logic.
//!
//! This module holds per-unit stats, the kind presets pieces are created
//! from, and the small health/cooldown mutations combat applies to them.

use serde::{Deserialize, Serialize};

use crate::game::types::{ActionKind, PieceId, PieceKind, Position, RangeDescriptor, Side};

/// Starting stats for a unit kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiecePreset {
    pub speed: i32,
    pub max_health: i32,
    pub base_damage: i32,
    pub attack: Option<RangeDescriptor>,
    pub heal: Option<RangeDescriptor>,
    pub max_heal_cooldown: i32,
}

impl PieceKind {
    pub fn preset(self) -> PiecePreset {
        match self {
            PieceKind::Castle => PiecePreset {
                speed: 1,
                max_health: 100,
                base_damage: 10,
                attack: Some(RangeDescriptor::new(1, 1)),
                heal: None,
                max_heal_cooldown: 0,
            },
            PieceKind::FootSoldier => PiecePreset {
                speed: 2,
                max_health: 60,
                base_damage: 10,
                attack: Some(RangeDescriptor::new(1, 1)),
                heal: None,
                max_heal_cooldown: 0,
            },
            PieceKind::Archer => PiecePreset {
                speed: 2,
                max_health: 30,
                base_damage: 30,
                attack: Some(RangeDescriptor::new(1, 4)),
                heal: None,
                max_heal_cooldown: 0,
            },
            PieceKind::Mage => PiecePreset {
                speed: 2,
                max_health: 30,
                base_damage: 20,
                attack: Some(RangeDescriptor::with_line_of_sight(1, 1)),
                heal: Some(RangeDescriptor::with_line_of_sight(1, 1)),
                max_heal_cooldown: 2,
            },
            PieceKind::Cavalry => PiecePreset {
                speed: 3,
                max_health: 60,
                base_damage: 20,
                attack: Some(RangeDescriptor::new(1, 1)),
                heal: None,
                max_heal_cooldown: 0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub side: Side,
    pub pos: Position,
    pub speed: i32,
    pub attack: Option<RangeDescriptor>,
    pub heal: Option<RangeDescriptor>,
    pub health: i32,
    pub max_health: i32,
    pub base_damage: i32,
    pub heal_cooldown: i32,
    pub max_heal_cooldown: i32,
}

impl Piece {
    /// Build a piece at full health from its kind preset.
    pub fn new(id: PieceId, kind: PieceKind, side: Side, pos: Position) -> Self {
        let preset = kind.preset();
        Self {
            id,
            kind,
            side,
            pos,
            speed: preset.speed,
            attack: preset.attack,
            heal: preset.heal,
            health: preset.max_health,
            max_health: preset.max_health,
            base_damage: preset.base_damage,
            heal_cooldown: 0,
            max_heal_cooldown: preset.max_heal_cooldown,
        }
    }

    /// Movement is always the ring `1..=speed`.
    pub fn move_range(&self) -> RangeDescriptor {
        RangeDescriptor::new(1, self.speed)
    }

    /// The descriptor an action is measured against, `None` if the piece
    /// cannot perform it at all.
    pub fn range_for(&self, kind: ActionKind) -> Option<RangeDescriptor> {
        match kind {
            ActionKind::Move => Some(self.move_range()),
            ActionKind::Attack => self.attack,
            ActionKind::Heal => self.heal,
        }
    }

    pub fn is_wounded(&self) -> bool {
        self.health < self.max_health
    }

    pub fn is_heal_ready(&self) -> bool {
        self.heal_cooldown == 0
    }

    /// Apply damage, flooring health at 0. Returns true if the piece died.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        self.health = (self.health - damage.max(0)).max(0);
        self.health == 0
    }

    pub fn heal_fully(&mut self) {
        self.health = self.max_health;
    }

    pub fn start_heal_cooldown(&mut self) {
        self.heal_cooldown = self.max_heal_cooldown;
    }

    pub fn reduce_heal_cooldown(&mut self) {
        if self.heal_cooldown > 0 {
            self.heal_cooldown -= 1;
        }
    }
}
