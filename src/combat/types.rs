use serde::{Deserialize, Serialize};

use crate::core::constants::*;
use crate::dungeon::types::Position;

/// Enemy chassis classes, weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyType {
    Drone,
    Battle,
    Assault,
    Boss,
}

impl EnemyType {
    pub const ALL: [EnemyType; 4] = [
        EnemyType::Drone,
        EnemyType::Battle,
        EnemyType::Assault,
        EnemyType::Boss,
    ];

    /// Display character once scanned or encountered
    pub fn icon(&self) -> char {
        match self {
            EnemyType::Drone => 'd',
            EnemyType::Battle => 'B',
            EnemyType::Assault => 'A',
            EnemyType::Boss => 'X',
        }
    }

    /// Name used in mission log messages
    pub fn name(&self) -> &'static str {
        match self {
            EnemyType::Drone => "drone",
            EnemyType::Battle => "battle",
            EnemyType::Assault => "assault",
            EnemyType::Boss => "boss",
        }
    }

    /// Unscaled (health, damage, defense, experience)
    pub fn base_stats(&self) -> (u32, u32, u32, u32) {
        match self {
            EnemyType::Drone => DRONE_STATS,
            EnemyType::Battle => BATTLE_STATS,
            EnemyType::Assault => ASSAULT_STATS,
            EnemyType::Boss => BOSS_STATS,
        }
    }
}

/// Glyph for an enemy whose type has not been revealed
pub const UNKNOWN_ENEMY_ICON: char = 'e';

/// Stat multiplier for enemies on a given level
pub fn level_multiplier(level: u32) -> f64 {
    1.0 + level.saturating_sub(1) as f64 * ENEMY_SCALING_PER_LEVEL
}

/// Scales a base stat for the level, flooring to an integer
pub fn scale_stat(base: u32, level: u32) -> u32 {
    (base as f64 * level_multiplier(level)).floor() as u32
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    /// Unique within the level that spawned it
    pub id: u32,
    pub position: Position,
    pub enemy_type: EnemyType,
    pub health: i32,
    pub max_health: i32,
    pub damage: u32,
    pub defense: u32,
    pub experience: u32,
    /// Sticky: once set the enemy's type stays revealed
    pub encountered: bool,
}

impl Enemy {
    /// Creates an enemy with stats scaled for `level`
    pub fn spawn(id: u32, position: Position, enemy_type: EnemyType, level: u32) -> Self {
        let (health, damage, defense, experience) = enemy_type.base_stats();
        let health = scale_stat(health, level) as i32;
        Self {
            id,
            position,
            enemy_type,
            health,
            max_health: health,
            damage: scale_stat(damage, level),
            defense: scale_stat(defense, level),
            experience: scale_stat(experience, level),
            encountered: enemy_type == EnemyType::Boss,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// What happened to the enemy after one exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnemyOutcome {
    /// Enemy is still standing; replaces the roster entry with the same id
    Survived(Enemy),
    /// Enemy died and must be removed from the roster; carries its final record
    Destroyed(Enemy),
}

impl EnemyOutcome {
    /// The enemy record after the exchange
    pub fn enemy(&self) -> &Enemy {
        match self {
            EnemyOutcome::Survived(enemy) | EnemyOutcome::Destroyed(enemy) => enemy,
        }
    }
}

/// Individual beats of an exchange, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    PlayerHit { damage: u32 },
    PlayerMissed,
    EnemyDestroyed { experience: u32 },
    EnemyHit { damage: u32 },
    PlayerDestroyed,
}

/// Result of one bump-to-attack exchange. The resolver never touches the
/// session; the controller applies this delta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatResult {
    pub enemy_type: EnemyType,
    pub enemy: EnemyOutcome,
    /// Player health after the counter-attack
    pub player_health: u32,
    /// Experience awarded to the pilot (zero unless the enemy died)
    pub experience_gained: u32,
    pub player_destroyed: bool,
    pub events: Vec<CombatEvent>,
}

impl CombatResult {
    pub fn enemy_destroyed(&self) -> bool {
        matches!(self.enemy, EnemyOutcome::Destroyed(_))
    }

    /// Mission log lines for this exchange
    pub fn log_messages(&self) -> Vec<String> {
        let name = self.enemy_type.name();
        self.events
            .iter()
            .map(|event| match event {
                CombatEvent::PlayerHit { damage } => format!("Hit {name} for {damage} damage!"),
                CombatEvent::PlayerMissed => format!("Missed {name}!"),
                CombatEvent::EnemyDestroyed { experience } => {
                    format!("Destroyed {name}! +{experience} exp")
                }
                CombatEvent::EnemyHit { damage } => {
                    format!("{name} hits you for {damage} damage!")
                }
                CombatEvent::PlayerDestroyed => "Your mecha has been destroyed!".to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_multiplier() {
        assert!((level_multiplier(1) - 1.0).abs() < f64::EPSILON);
        assert!((level_multiplier(11) - 2.0).abs() < 1e-9);
        assert!((level_multiplier(20) - 2.9).abs() < 1e-9);
    }

    #[test]
    fn test_spawn_drone_level_one_uses_base_stats() {
        let enemy = Enemy::spawn(0, Position::new(5, 5), EnemyType::Drone, 1);
        assert_eq!(enemy.health, 20);
        assert_eq!(enemy.max_health, 20);
        assert_eq!(enemy.damage, 5);
        assert_eq!(enemy.defense, 0);
        assert_eq!(enemy.experience, 10);
        assert!(!enemy.encountered);
    }

    #[test]
    fn test_spawn_scales_and_floors() {
        // Level 4: multiplier 1.3 -> battle 40*1.3=52, 12*1.3=15.6, 3*1.3=3.9, 25*1.3=32.5
        let enemy = Enemy::spawn(1, Position::new(5, 5), EnemyType::Battle, 4);
        assert_eq!(enemy.health, 52);
        assert_eq!(enemy.damage, 15);
        assert_eq!(enemy.defense, 3);
        assert_eq!(enemy.experience, 32);
    }

    #[test]
    fn test_boss_starts_encountered() {
        let boss = Enemy::spawn(0, Position::new(5, 5), EnemyType::Boss, 5);
        assert!(boss.encountered);
        assert_eq!(boss.health, 210);
    }

    #[test]
    fn test_scaling_is_monotonic_per_type() {
        for enemy_type in EnemyType::ALL {
            let mut previous = Enemy::spawn(0, Position::default(), enemy_type, 1);
            for level in 2..=20 {
                let current = Enemy::spawn(0, Position::default(), enemy_type, level);
                assert!(current.max_health >= previous.max_health);
                assert!(current.damage >= previous.damage);
                assert!(current.defense >= previous.defense);
                assert!(current.experience >= previous.experience);
                previous = current;
            }
        }
    }

    #[test]
    fn test_icons_are_distinct_from_unknown_marker() {
        for enemy_type in EnemyType::ALL {
            assert_ne!(enemy_type.icon(), UNKNOWN_ENEMY_ICON);
        }
    }

    #[test]
    fn test_log_messages_follow_event_order() {
        let result = CombatResult {
            enemy_type: EnemyType::Drone,
            enemy: EnemyOutcome::Destroyed(Enemy::spawn(
                0,
                Position::new(4, 4),
                EnemyType::Drone,
                1,
            )),
            player_health: 100,
            experience_gained: 10,
            player_destroyed: false,
            events: vec![
                CombatEvent::PlayerHit { damage: 10 },
                CombatEvent::EnemyDestroyed { experience: 10 },
            ],
        };
        assert_eq!(
            result.log_messages(),
            vec!["Hit drone for 10 damage!", "Destroyed drone! +10 exp"]
        );
        assert!(result.enemy_destroyed());
    }
}
