//! Player unit: the pilot and the mecha they drive.

use crate::core::constants::*;
use crate::dungeon::types::{Position, START_POSITION};
use serde::{Deserialize, Serialize};

/// Persistent character record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pilot {
    pub name: String,
    pub level: u32,
    pub experience: u64,
    pub health: u32,
    pub max_health: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapons {
    pub damage: u32,
    /// Hit chance in percent
    pub accuracy: u32,
    pub range: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    pub defense: u32,
    pub durability: u32,
    pub max_durability: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensors {
    /// Manhattan reveal radius
    pub range: u32,
    pub detection: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub speed: u32,
    pub fuel: u32,
    pub max_fuel: u32,
}

/// Equipment record with four subsystems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mecha {
    pub weapons: Weapons,
    pub armor: Armor,
    pub sensors: Sensors,
    pub movement: Movement,
}

/// The player-controlled unit. Carried across levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub position: Position,
    pub pilot: Pilot,
    pub mecha: Mecha,
}

impl Default for Unit {
    fn default() -> Self {
        Self::new()
    }
}

impl Unit {
    /// A fresh rookie in a factory-stock mecha, standing on the start cell
    pub fn new() -> Self {
        Self {
            position: START_POSITION,
            pilot: Pilot {
                name: STARTING_PILOT_NAME.to_string(),
                level: 1,
                experience: 0,
                health: STARTING_HEALTH,
                max_health: STARTING_HEALTH,
            },
            mecha: Mecha {
                weapons: Weapons {
                    damage: STARTING_WEAPON_DAMAGE,
                    accuracy: STARTING_WEAPON_ACCURACY,
                    range: STARTING_WEAPON_RANGE,
                },
                armor: Armor {
                    defense: STARTING_ARMOR_DEFENSE,
                    durability: STARTING_ARMOR_DURABILITY,
                    max_durability: STARTING_ARMOR_DURABILITY,
                },
                sensors: Sensors {
                    range: STARTING_SENSOR_RANGE,
                    detection: STARTING_SENSOR_DETECTION,
                },
                movement: Movement {
                    speed: STARTING_SPEED,
                    fuel: STARTING_FUEL,
                    max_fuel: STARTING_FUEL,
                },
            },
        }
    }

    pub fn is_alive(&self) -> bool {
        self.pilot.health > 0
    }

    /// Burns fuel for one step, never below zero. Returns the remaining fuel.
    pub fn burn_fuel(&mut self) -> u32 {
        let movement = &mut self.mecha.movement;
        movement.fuel = movement.fuel.saturating_sub(FUEL_PER_MOVE);
        movement.fuel
    }

    /// Adds fuel, capped at the tank size
    pub fn refuel(&mut self, amount: u32) {
        let movement = &mut self.mecha.movement;
        movement.fuel = movement.fuel.saturating_add(amount).min(movement.max_fuel);
    }

    /// Restores health, capped at max health
    pub fn repair(&mut self, amount: u32) {
        let pilot = &mut self.pilot;
        pilot.health = pilot.health.saturating_add(amount).min(pilot.max_health);
    }

    /// Puts the unit on the start cell and tops up the tank for a new level:
    /// a full tank on level 1, otherwise a partial refill.
    pub fn enter_level(&mut self, level: u32) {
        self.position = START_POSITION;
        if level == 1 {
            self.mecha.movement.fuel = self.mecha.movement.max_fuel;
        } else {
            self.refuel(FUEL_LEVEL_REFILL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_unit_starting_stats() {
        let unit = Unit::new();
        assert_eq!(unit.position, Position::new(1, 1));
        assert_eq!(unit.pilot.name, "Rookie");
        assert_eq!(unit.pilot.level, 1);
        assert_eq!(unit.pilot.experience, 0);
        assert_eq!(unit.pilot.health, 100);
        assert_eq!(unit.pilot.max_health, 100);
        assert_eq!(unit.mecha.weapons.damage, 10);
        assert_eq!(unit.mecha.weapons.accuracy, 80);
        assert_eq!(unit.mecha.armor.defense, 5);
        assert_eq!(unit.mecha.sensors.range, 1);
        assert_eq!(unit.mecha.movement.fuel, 100);
        assert_eq!(unit.mecha.movement.max_fuel, 100);
    }

    #[test]
    fn test_burn_fuel_stops_at_zero() {
        let mut unit = Unit::new();
        unit.mecha.movement.fuel = 1;
        assert_eq!(unit.burn_fuel(), 0);
        assert_eq!(unit.burn_fuel(), 0);
    }

    #[test]
    fn test_refuel_caps_at_max() {
        let mut unit = Unit::new();
        unit.mecha.movement.fuel = 90;
        unit.refuel(50);
        assert_eq!(unit.mecha.movement.fuel, 100);
    }

    #[test]
    fn test_repair_caps_at_max_health() {
        let mut unit = Unit::new();
        unit.pilot.health = 40;
        unit.repair(30);
        assert_eq!(unit.pilot.health, 70);
        unit.repair(30);
        assert_eq!(unit.pilot.health, 100);
    }

    #[test]
    fn test_enter_level_one_fills_tank() {
        let mut unit = Unit::new();
        unit.mecha.movement.fuel = 3;
        unit.position = Position::new(7, 4);
        unit.enter_level(1);
        assert_eq!(unit.mecha.movement.fuel, 100);
        assert_eq!(unit.position, START_POSITION);
    }

    #[test]
    fn test_enter_later_level_partial_refill() {
        let mut unit = Unit::new();
        unit.mecha.movement.fuel = 50;
        unit.enter_level(2);
        assert_eq!(unit.mecha.movement.fuel, 70);

        unit.mecha.movement.fuel = 95;
        unit.enter_level(3);
        assert_eq!(unit.mecha.movement.fuel, 100);
    }

    #[test]
    fn test_is_alive() {
        let mut unit = Unit::new();
        assert!(unit.is_alive());
        unit.pilot.health = 0;
        assert!(!unit.is_alive());
    }
}
