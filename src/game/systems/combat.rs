//! Damage and heal resolution.
//!
//! Callers have already validated the action; nothing here re-checks it and
//! nothing here can fail.

use log::info;
use rand::Rng;

use crate::config::game::{DAMAGE_VARIANCE_MAX, DAMAGE_VARIANCE_MIN};
use crate::game::board::Board;
use crate::game::types::PieceId;

/// What an attack did to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackReport {
    pub damage: i32,
    pub remaining_health: i32,
    pub killed: bool,
}

/// `round(base * U)` with `U` uniform in the configured variance band.
pub fn roll_damage(base_damage: i32, rng: &mut impl Rng) -> i32 {
    let multiplier = rng.random_range(DAMAGE_VARIANCE_MIN..=DAMAGE_VARIANCE_MAX);
    (f64::from(base_damage) * multiplier).round() as i32
}

pub fn resolve_attack(
    board: &mut Board,
    attacker: PieceId,
    defender: PieceId,
    rng: &mut impl Rng,
) -> AttackReport {
    let base_damage = board.piece(attacker).map_or(0, |p| p.base_damage);
    let damage = roll_damage(base_damage, rng);

    let (remaining_health, killed) = match board.piece_mut(defender) {
        Some(target) => {
            let killed = target.take_damage(damage);
            (target.health, killed)
        }
        None => (0, false),
    };

    if killed {
        if let Some(dead) = board.remove(defender) {
            info!("[Combat] {:?} {} destroyed at {}", dead.kind, dead.id, dead.pos);
        }
    }

    AttackReport { damage, remaining_health, killed }
}

pub fn resolve_heal(board: &mut Board, healer: PieceId, target: PieceId) {
    if let Some(target) = board.piece_mut(target) {
        target.heal_fully();
    }
    if let Some(healer) = board.piece_mut(healer) {
        healer.start_heal_cooldown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{PieceKind, Position, Side};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_damage_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        let rolls: Vec<i32> = (0..2000).map(|_| roll_damage(30, &mut rng)).collect();

        assert!(rolls.iter().all(|d| (23..=38).contains(d)));
        // Both ends of the band show up and the mean sits near the base.
        assert!(rolls.iter().any(|&d| d <= 25));
        assert!(rolls.iter().any(|&d| d >= 35));
        let mean = rolls.iter().sum::<i32>() as f64 / rolls.len() as f64;
        assert!((mean - 30.0).abs() < 1.0, "mean was {mean}");
    }

    #[test]
    fn test_attack_reduces_health() {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(1);
        let archer = board.spawn(PieceKind::Archer, Side::White, Position::new(0, 0)).unwrap();
        let castle = board.spawn(PieceKind::Castle, Side::Black, Position::new(0, 4)).unwrap();

        let report = resolve_attack(&mut board, archer, castle, &mut rng);
        assert!((23..=38).contains(&report.damage));
        assert!(!report.killed);
        assert_eq!(board.piece(castle).unwrap().health, 100 - report.damage);
        assert_eq!(report.remaining_health, 100 - report.damage);
    }

    #[test]
    fn test_lethal_attack_removes_piece() {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(3);
        let cavalry = board.spawn(PieceKind::Cavalry, Side::White, Position::new(2, 2)).unwrap();
        let mage = board.spawn(PieceKind::Mage, Side::Black, Position::new(3, 2)).unwrap();
        board.piece_mut(mage).unwrap().health = 1;

        let report = resolve_attack(&mut board, cavalry, mage, &mut rng);
        assert!(report.killed);
        assert_eq!(report.remaining_health, 0);
        assert!(board.piece(mage).is_none());
        assert_eq!(board.occupant_at(Position::new(3, 2)), None);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_heal_restores_and_starts_cooldown() {
        let mut board = Board::new();
        let mage = board.spawn(PieceKind::Mage, Side::White, Position::new(0, 0)).unwrap();
        let soldier = board.spawn(PieceKind::FootSoldier, Side::White, Position::new(0, 1)).unwrap();
        board.piece_mut(soldier).unwrap().take_damage(45);

        resolve_heal(&mut board, mage, soldier);
        assert_eq!(board.piece(soldier).unwrap().health, 60);
        assert_eq!(board.piece(mage).unwrap().heal_cooldown, 2);
    }
}
