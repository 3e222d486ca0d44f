//! Item pickup effects.

use super::types::ItemType;
use crate::character::types::Unit;

/// Applies a pickup to the unit and returns the mission log line.
pub fn apply_item(unit: &mut Unit, item_type: ItemType) -> String {
    let value = item_type.value();
    match item_type {
        ItemType::Repair => unit.repair(value),
        ItemType::WeaponUpgrade => unit.mecha.weapons.damage += value,
        ItemType::ArmorPlating => unit.mecha.armor.defense += value,
        ItemType::FuelCell => unit.refuel(value),
    }
    tracing::debug!(item = item_type.name(), "item applied");
    format!("Found {}!", item_type.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repair_heals_capped() {
        let mut unit = Unit::new();
        unit.pilot.health = 50;
        apply_item(&mut unit, ItemType::Repair);
        assert_eq!(unit.pilot.health, 80);

        unit.pilot.health = 95;
        apply_item(&mut unit, ItemType::Repair);
        assert_eq!(unit.pilot.health, 100);
    }

    #[test]
    fn test_weapon_upgrade_adds_damage() {
        let mut unit = Unit::new();
        apply_item(&mut unit, ItemType::WeaponUpgrade);
        assert_eq!(unit.mecha.weapons.damage, 15);
    }

    #[test]
    fn test_armor_plating_adds_defense() {
        let mut unit = Unit::new();
        apply_item(&mut unit, ItemType::ArmorPlating);
        assert_eq!(unit.mecha.armor.defense, 8);
    }

    #[test]
    fn test_fuel_cell_refuels_capped() {
        let mut unit = Unit::new();
        unit.mecha.movement.fuel = 20;
        apply_item(&mut unit, ItemType::FuelCell);
        assert_eq!(unit.mecha.movement.fuel, 70);

        apply_item(&mut unit, ItemType::FuelCell);
        assert_eq!(unit.mecha.movement.fuel, 100);
    }

    #[test]
    fn test_pickup_message() {
        let mut unit = Unit::new();
        assert_eq!(apply_item(&mut unit, ItemType::FuelCell), "Found Fuel Cell!");
    }
}
