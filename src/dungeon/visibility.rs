//! Sensor reveal rules.
//!
//! Pure functions over positions and ranges; nothing here touches state.

use super::types::Position;
use crate::combat::types::Enemy;
use crate::items::types::Item;

/// True when `target` lies within `sensor_range` Manhattan steps of `observer`.
pub fn is_revealed(observer: Position, target: Position, sensor_range: u32) -> bool {
    observer.manhattan(target) as i64 <= sensor_range as i64
}

/// An enemy shows its true type once encountered or while in sensor range.
pub fn enemy_revealed(enemy: &Enemy, observer: Position, sensor_range: u32) -> bool {
    enemy.encountered || is_revealed(observer, enemy.position, sensor_range)
}

/// Items only show their type while in sensor range.
pub fn item_revealed(item: &Item, observer: Position, sensor_range: u32) -> bool {
    is_revealed(observer, item.position, sensor_range)
}
