//! Per-frame view of the session handed to the presentation layer.
//!
//! Every reveal decision is made here so a renderer only maps tiles to
//! pixels and never re-derives sensor logic.

use crate::character::progression::exp_needed;
use crate::character::types::Unit;
use crate::combat::types::{EnemyType, UNKNOWN_ENEMY_ICON};
use crate::core::constants::{FUEL_GAUGE_WARN_THRESHOLD, FUEL_LOW_THRESHOLD};
use crate::core::game_log::GameLog;
use crate::core::session::GamePhase;
use crate::dungeon::types::{CellKind, Level, Position};
use crate::dungeon::visibility::{enemy_revealed, item_revealed};
use crate::items::types::{ItemType, ITEM_ICON};
use serde::Serialize;

pub const PLAYER_ICON: char = '@';

/// Color band for the fuel gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FuelGauge {
    Normal,
    Low,
    Critical,
}

impl FuelGauge {
    pub fn from_fuel(fuel: u32) -> Self {
        if fuel <= FUEL_LOW_THRESHOLD {
            FuelGauge::Critical
        } else if fuel <= FUEL_GAUGE_WARN_THRESHOLD {
            FuelGauge::Low
        } else {
            FuelGauge::Normal
        }
    }
}

/// What the renderer should draw in one cell. `None` kinds are unscanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tile {
    Wall,
    Floor,
    Exit,
    Player,
    Enemy(Option<EnemyType>),
    Item(Option<ItemType>),
}

impl Tile {
    pub fn glyph(&self) -> char {
        match self {
            Tile::Wall => CellKind::Wall.icon(),
            Tile::Floor => CellKind::Floor.icon(),
            Tile::Exit => CellKind::Exit.icon(),
            Tile::Player => PLAYER_ICON,
            Tile::Enemy(Some(kind)) => kind.icon(),
            Tile::Enemy(None) => UNKNOWN_ENEMY_ICON,
            Tile::Item(Some(kind)) => kind.icon(),
            Tile::Item(None) => ITEM_ICON,
        }
    }
}

impl From<CellKind> for Tile {
    fn from(cell: CellKind) -> Self {
        match cell {
            CellKind::Floor => Tile::Floor,
            CellKind::Wall => Tile::Wall,
            CellKind::Exit => Tile::Exit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub position: Position,
    pub revealed: bool,
    /// Present only when revealed
    pub enemy_type: Option<EnemyType>,
    /// (health, max_health), present only when revealed
    pub health: Option<(i32, i32)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub id: u32,
    pub position: Position,
    pub revealed: bool,
    pub item_type: Option<ItemType>,
}

/// Snapshot of everything the presentation layer shows
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub phase: GamePhase,
    pub level: u32,
    pub width: usize,
    pub height: usize,
    /// Indexed `tiles[y][x]`; empty while no level is loaded
    pub tiles: Vec<Vec<Tile>>,
    pub player: Unit,
    pub enemies: Vec<EnemyView>,
    pub items: Vec<ItemView>,
    pub log: Vec<String>,
    pub enemies_remaining: usize,
    pub exp_needed: u64,
    pub fuel_gauge: FuelGauge,
}

impl Frame {
    /// Builds the frame for the current session state
    pub fn build(
        phase: GamePhase,
        level_number: u32,
        level: Option<&Level>,
        player: &Unit,
        log: &GameLog,
    ) -> Self {
        let sensor_range = player.mecha.sensors.range;
        let observer = player.position;

        let enemies: Vec<EnemyView> = level
            .map(|l| l.enemies.as_slice())
            .unwrap_or_default()
            .iter()
            .filter(|e| e.is_alive())
            .map(|e| {
                let revealed = enemy_revealed(e, observer, sensor_range);
                EnemyView {
                    id: e.id,
                    position: e.position,
                    revealed,
                    enemy_type: revealed.then_some(e.enemy_type),
                    health: revealed.then_some((e.health, e.max_health)),
                }
            })
            .collect();

        let items: Vec<ItemView> = level
            .map(|l| l.items.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|i| {
                let revealed = item_revealed(i, observer, sensor_range);
                ItemView {
                    id: i.id,
                    position: i.position,
                    revealed,
                    item_type: revealed.then_some(i.item_type),
                }
            })
            .collect();

        let (width, height, tiles) = match level {
            Some(level) => {
                let tiles = compose_tiles(level, player.position, &enemies, &items);
                (level.grid.width(), level.grid.height(), tiles)
            }
            None => (0, 0, Vec::new()),
        };

        Self {
            phase,
            level: level_number,
            width,
            height,
            tiles,
            player: player.clone(),
            enemies_remaining: enemies.len(),
            enemies,
            items,
            log: log.to_vec(),
            exp_needed: exp_needed(player.pilot.level),
            fuel_gauge: FuelGauge::from_fuel(player.mecha.movement.fuel),
        }
    }

    pub fn tile(&self, pos: Position) -> Option<Tile> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        self.tiles.get(pos.y as usize)?.get(pos.x as usize).copied()
    }

    /// Plain-text map, one row per line
    pub fn render_ascii(&self) -> String {
        self.tiles
            .iter()
            .map(|row| row.iter().map(Tile::glyph).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Layers cells, items, enemies and the player, topmost last
fn compose_tiles(
    level: &Level,
    player: Position,
    enemies: &[EnemyView],
    items: &[ItemView],
) -> Vec<Vec<Tile>> {
    let mut tiles: Vec<Vec<Tile>> = level
        .grid
        .rows()
        .iter()
        .map(|row| row.iter().map(|&c| Tile::from(c)).collect())
        .collect();

    let mut put = |pos: Position, tile: Tile| {
        if pos.x >= 0 && pos.y >= 0 {
            if let Some(slot) = tiles
                .get_mut(pos.y as usize)
                .and_then(|row| row.get_mut(pos.x as usize))
            {
                *slot = tile;
            }
        }
    };

    for item in items {
        put(item.position, Tile::Item(item.item_type));
    }
    for enemy in enemies {
        put(enemy.position, Tile::Enemy(enemy.enemy_type));
    }
    put(player, Tile::Player);

    tiles
}
