use crate::core::constants::*;
use crate::dungeon::types::Position;
use serde::{Deserialize, Serialize};

/// Pickup kinds found lying around a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Repair,
    WeaponUpgrade,
    ArmorPlating,
    FuelCell,
}

impl ItemType {
    /// Roll table order; the generator picks uniformly by index
    pub const ALL: [ItemType; 4] = [
        ItemType::Repair,
        ItemType::WeaponUpgrade,
        ItemType::ArmorPlating,
        ItemType::FuelCell,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ItemType::Repair => "Repair Kit",
            ItemType::WeaponUpgrade => "Weapon Upgrade",
            ItemType::ArmorPlating => "Armor Plating",
            ItemType::FuelCell => "Fuel Cell",
        }
    }

    /// Magnitude of the item's effect
    pub fn value(&self) -> u32 {
        match self {
            ItemType::Repair => REPAIR_AMOUNT,
            ItemType::WeaponUpgrade => WEAPON_UPGRADE_DAMAGE,
            ItemType::ArmorPlating => ARMOR_PLATING_DEFENSE,
            ItemType::FuelCell => FUEL_CELL_AMOUNT,
        }
    }

    /// Every pickup shares one glyph; the type is told apart by color
    /// in the presentation layer.
    pub fn icon(&self) -> char {
        ITEM_ICON
    }
}

/// Glyph for items, scanned or not
pub const ITEM_ICON: char = '+';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique within the level that spawned it
    pub id: u32,
    pub position: Position,
    pub item_type: ItemType,
}

impl Item {
    pub fn new(id: u32, position: Position, item_type: ItemType) -> Self {
        Self {
            id,
            position,
            item_type,
        }
    }
}
