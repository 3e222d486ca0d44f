use super::types::{CombatEvent, CombatResult, Enemy, EnemyOutcome};
use crate::character::types::Unit;
use crate::core::constants::*;
use rand::Rng;

/// Damage the player deals per hit, after the enemy's defense
pub fn player_damage(player: &Unit, enemy: &Enemy) -> u32 {
    player
        .mecha
        .weapons
        .damage
        .saturating_sub(enemy.defense)
        .max(MIN_DAMAGE)
}

/// Damage the enemy deals per counter-attack, after the player's armor
pub fn enemy_damage(player: &Unit, enemy: &Enemy) -> u32 {
    enemy
        .damage
        .saturating_sub(player.mecha.armor.defense)
        .max(MIN_DAMAGE)
}

/// Rolls the player's attack. Draws one value uniform in [0, 100).
pub fn roll_hit(accuracy: u32, rng: &mut impl Rng) -> bool {
    let roll: f64 = rng.gen_range(0.0..HIT_ROLL_MAX);
    roll <= accuracy as f64
}

/// Resolves one bump-to-attack exchange.
///
/// The player strikes first. A killing blow ends the exchange with no
/// counter-attack; otherwise the enemy always answers. Inputs are left
/// untouched: the returned result carries the updated enemy record (or its
/// removal) and the player's new health for the caller to apply.
pub fn resolve_combat(player: &Unit, enemy: &Enemy, rng: &mut impl Rng) -> CombatResult {
    let mut enemy = enemy.clone();
    enemy.encountered = true;

    let dealt = player_damage(player, &enemy);
    let taken = enemy_damage(player, &enemy);
    let mut events = Vec::new();

    if roll_hit(player.mecha.weapons.accuracy, rng) {
        enemy.health -= dealt as i32;
        events.push(CombatEvent::PlayerHit { damage: dealt });

        if !enemy.is_alive() {
            events.push(CombatEvent::EnemyDestroyed {
                experience: enemy.experience,
            });
            tracing::debug!(enemy = enemy.id, kind = enemy.enemy_type.name(), "enemy destroyed");
            return CombatResult {
                enemy_type: enemy.enemy_type,
                experience_gained: enemy.experience,
                enemy: EnemyOutcome::Destroyed(enemy),
                player_health: player.pilot.health,
                player_destroyed: false,
                events,
            };
        }
    } else {
        events.push(CombatEvent::PlayerMissed);
    }

    let player_health = player.pilot.health.saturating_sub(taken);
    events.push(CombatEvent::EnemyHit { damage: taken });

    let player_destroyed = player_health == 0;
    if player_destroyed {
        events.push(CombatEvent::PlayerDestroyed);
    }

    tracing::debug!(
        enemy = enemy.id,
        enemy_health = enemy.health,
        player_health,
        "combat exchange"
    );

    CombatResult {
        enemy_type: enemy.enemy_type,
        enemy: EnemyOutcome::Survived(enemy),
        player_health,
        experience_gained: 0,
        player_destroyed,
        events,
    }
}
