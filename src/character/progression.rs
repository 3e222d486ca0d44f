//! Pilot experience and level-up growth.

use super::types::Unit;
use crate::core::constants::*;

/// Experience required to advance from `pilot_level` to the next level.
pub fn exp_needed(pilot_level: u32) -> u64 {
    pilot_level as u64 * EXP_PER_PILOT_LEVEL
}

/// Adds experience without resolving level-ups.
pub fn add_experience(unit: &mut Unit, amount: u32) {
    unit.pilot.experience += amount as u64;
}

/// Resolves every level-up the current experience pays for.
///
/// Each level consumes `exp_needed` of the pre-increment level and grows the
/// pilot and every mecha subsystem. Health and fuel are raised together with
/// their maximums and are not clamped at the moment of the raise. Returns the
/// number of levels gained.
pub fn apply_level_ups(unit: &mut Unit) -> u32 {
    let mut gained = 0;

    while unit.pilot.experience >= exp_needed(unit.pilot.level) {
        let needed = exp_needed(unit.pilot.level);
        unit.pilot.experience -= needed;
        unit.pilot.level += 1;

        unit.pilot.max_health += LEVEL_UP_HEALTH;
        unit.pilot.health += LEVEL_UP_HEALTH;

        let mecha = &mut unit.mecha;
        mecha.weapons.damage += LEVEL_UP_DAMAGE;
        mecha.armor.defense += LEVEL_UP_DEFENSE;
        mecha.sensors.range += LEVEL_UP_SENSOR_RANGE;
        mecha.movement.max_fuel += LEVEL_UP_FUEL;
        mecha.movement.fuel += LEVEL_UP_FUEL;

        gained += 1;
        tracing::debug!(level = unit.pilot.level, "pilot level up");
    }

    gained
}
