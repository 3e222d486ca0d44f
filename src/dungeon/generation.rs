//! Level procedural generation.
//!
//! RNG draws happen in a fixed order so a seeded generator reproduces the
//! same level: wall layout first, then each enemy (position, then type),
//! then each item (position, then type).

use super::types::{CellKind, Grid, Level, Position, START_POSITION};
use crate::combat::types::{Enemy, EnemyType};
use crate::core::constants::*;
use crate::items::types::{Item, ItemType};
use rand::Rng;

/// Grid (width, height) for a level, growing with depth up to the caps
pub fn grid_dimensions(level: u32) -> (usize, usize) {
    let level = level.max(1) as usize;
    let width = (GRID_BASE_WIDTH + level - 1).min(GRID_MAX_WIDTH);
    let height = (GRID_BASE_HEIGHT + level / 2).min(GRID_MAX_HEIGHT);
    (width, height)
}

pub fn is_boss_level(level: u32) -> bool {
    level % BOSS_LEVEL_INTERVAL == 0
}

/// Number of enemies on a level: a lone boss, or a growing roster
pub fn enemy_count(level: u32) -> usize {
    if is_boss_level(level) {
        1
    } else {
        (ENEMY_COUNT_BASE + level as f64 * ENEMY_COUNT_PER_LEVEL).floor() as usize
    }
}

pub fn item_count(level: u32) -> usize {
    (ITEM_COUNT_BASE + level as f64 * ITEM_COUNT_PER_LEVEL).floor() as usize
}

/// Number of random wall placements attempted for a layout
pub fn wall_count(width: usize, height: usize) -> usize {
    ((width * height) as f64 * WALL_DENSITY).floor() as usize
}

/// Generates a complete level: layout, enemy roster and item roster
pub fn generate_level(level: u32, rng: &mut impl Rng) -> Level {
    let (width, height) = grid_dimensions(level);
    let grid = generate_layout(width, height, rng);

    let enemies = place_enemies(&grid, level, rng);
    let items = place_items(&grid, level, &enemies, rng);

    tracing::info!(
        level,
        width,
        height,
        enemies = enemies.len(),
        items = items.len(),
        boss = is_boss_level(level),
        "level generated"
    );

    Level {
        number: level,
        grid,
        enemies,
        items,
    }
}

/// Builds the wall layout, redrawing it while the exit is cut off from the start
fn generate_layout(width: usize, height: usize, rng: &mut impl Rng) -> Grid {
    let mut grid = build_layout(width, height, rng);

    for attempt in 1..MAX_LAYOUT_ATTEMPTS {
        if grid.is_reachable(START_POSITION, grid.exit_position()) {
            return grid;
        }
        tracing::debug!(attempt, "exit unreachable, redrawing walls");
        grid = build_layout(width, height, rng);
    }

    if !grid.is_reachable(START_POSITION, grid.exit_position()) {
        tracing::warn!(width, height, "no connected layout found, keeping last draw");
    }
    grid
}

fn build_layout(width: usize, height: usize, rng: &mut impl Rng) -> Grid {
    let mut grid = Grid::bordered(width, height);
    scatter_walls(&mut grid, rng);
    clear_exit_zone(&mut grid);
    clear_start_zone(&mut grid);
    grid
}

/// Drops random walls, keeping a one-cell margin inside the border
fn scatter_walls(grid: &mut Grid, rng: &mut impl Rng) {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    if width < 5 || height < 5 {
        return;
    }

    let exit = grid.exit_position();
    for _ in 0..wall_count(grid.width(), grid.height()) {
        let x = rng.gen_range(2..width - 2);
        let y = rng.gen_range(2..height - 2);
        let pos = Position::new(x, y);
        if pos != exit && pos != START_POSITION {
            grid.set(pos, CellKind::Wall);
        }
    }
}

/// Marks the exit and opens its eight neighbors
fn clear_exit_zone(grid: &mut Grid) {
    let exit = grid.exit_position();
    grid.set(exit, CellKind::Exit);

    for dy in -1..=1 {
        for dx in -1..=1 {
            let pos = exit.offset(dx, dy);
            if grid.is_interior(pos) && grid.is_wall(pos) {
                grid.set(pos, CellKind::Floor);
            }
        }
    }
}

/// Opens the 3x3 block anchored at the start cell
fn clear_start_zone(grid: &mut Grid) {
    for dy in 0..=2 {
        for dx in 0..=2 {
            let pos = START_POSITION.offset(dx, dy);
            if grid.is_interior(pos) && grid.is_wall(pos) {
                grid.set(pos, CellKind::Floor);
            }
        }
    }
}

/// Rolls the chassis for a non-boss enemy from the level's tier table
pub fn roll_enemy_type(level: u32, rng: &mut impl Rng) -> EnemyType {
    if is_boss_level(level) {
        EnemyType::Boss
    } else if level >= ENEMY_TIER_ASSAULT_LEVEL {
        let roll: f64 = rng.gen();
        if roll < TIER_HIGH_ASSAULT_CHANCE {
            EnemyType::Assault
        } else if roll < TIER_HIGH_BATTLE_CHANCE {
            EnemyType::Battle
        } else {
            EnemyType::Drone
        }
    } else if level >= ENEMY_TIER_BATTLE_LEVEL {
        if rng.gen::<f64>() < TIER_MID_BATTLE_CHANCE {
            EnemyType::Battle
        } else {
            EnemyType::Drone
        }
    } else {
        EnemyType::Drone
    }
}

pub fn roll_item_type(rng: &mut impl Rng) -> ItemType {
    ItemType::ALL[rng.gen_range(0..ItemType::ALL.len())]
}

fn place_enemies(grid: &Grid, level: u32, rng: &mut impl Rng) -> Vec<Enemy> {
    let exit = grid.exit_position();
    let mut enemies: Vec<Enemy> = Vec::with_capacity(enemy_count(level));

    for _ in 0..enemy_count(level) {
        let position = sample_position(grid, rng, |pos| {
            !grid.is_wall(pos)
                && pos != START_POSITION
                && pos != exit
                && pos.manhattan(START_POSITION) >= ENEMY_MIN_START_DISTANCE
                && !enemies.iter().any(|e| e.position == pos)
        });
        let Some(position) = position else {
            tracing::warn!(level, "no free cell for enemy, roster truncated");
            break;
        };

        let enemy_type = roll_enemy_type(level, rng);
        let id = enemies.len() as u32;
        tracing::debug!(
            id,
            x = position.x,
            y = position.y,
            kind = enemy_type.name(),
            "enemy placed"
        );
        enemies.push(Enemy::spawn(id, position, enemy_type, level));
    }

    enemies
}

fn place_items(grid: &Grid, level: u32, enemies: &[Enemy], rng: &mut impl Rng) -> Vec<Item> {
    let exit = grid.exit_position();
    let mut items: Vec<Item> = Vec::with_capacity(item_count(level));

    for _ in 0..item_count(level) {
        let position = sample_position(grid, rng, |pos| {
            !grid.is_wall(pos)
                && pos != START_POSITION
                && pos != exit
                && !enemies.iter().any(|e| e.position == pos)
                && !items.iter().any(|i| i.position == pos)
                && pos.manhattan(START_POSITION) >= ITEM_MIN_START_DISTANCE
        });
        let Some(position) = position else {
            tracing::warn!(level, "no free cell for item, roster truncated");
            break;
        };

        let item_type = roll_item_type(rng);
        let id = items.len() as u32;
        tracing::debug!(
            id,
            x = position.x,
            y = position.y,
            kind = item_type.name(),
            "item placed"
        );
        items.push(Item::new(id, position, item_type));
    }

    items
}

/// Rejection-samples an interior cell accepted by `is_valid`.
///
/// After `MAX_PLACEMENT_ATTEMPTS` misses it falls back to the first valid
/// interior cell in row-major order, and returns `None` only when no interior
/// cell is valid at all.
pub fn sample_position(
    grid: &Grid,
    rng: &mut impl Rng,
    is_valid: impl Fn(Position) -> bool,
) -> Option<Position> {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    if width < 3 || height < 3 {
        return None;
    }

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let x = rng.gen_range(1..width - 1);
        let y = rng.gen_range(1..height - 1);
        let pos = Position::new(x, y);
        if is_valid(pos) {
            return Some(pos);
        }
    }

    tracing::warn!(
        attempts = MAX_PLACEMENT_ATTEMPTS,
        "rejection sampling exhausted, scanning for a free cell"
    );
    (1..height - 1)
        .flat_map(|y| (1..width - 1).map(move |x| Position::new(x, y)))
        .find(|&pos| is_valid(pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_grid_dimensions_formula() {
        assert_eq!(grid_dimensions(1), (15, 10));
        assert_eq!(grid_dimensions(2), (16, 11));
        assert_eq!(grid_dimensions(11), (25, 15));
        assert_eq!(grid_dimensions(16), (25, 18));
        assert_eq!(grid_dimensions(20), (25, 18));
    }

    #[test]
    fn test_enemy_and_item_counts() {
        assert_eq!(enemy_count(1), 3);
        assert_eq!(enemy_count(2), 4);
        assert_eq!(enemy_count(4), 5);
        assert_eq!(enemy_count(5), 1);
        assert_eq!(enemy_count(19), 12);
        assert_eq!(item_count(1), 2);
        assert_eq!(item_count(4), 3);
        assert_eq!(item_count(20), 8);
    }

    #[test]
    fn test_wall_count() {
        assert_eq!(wall_count(15, 10), 12);
        assert_eq!(wall_count(25, 18), 36);
    }

    #[test]
    fn test_borders_are_walls_every_level() {
        for level in 1..=MAX_LEVEL {
            let mut rng = create_test_rng(level as u64);
            let generated = generate_level(level, &mut rng);
            let grid = &generated.grid;
            let (w, h) = (grid.width() as i32, grid.height() as i32);
            assert_eq!((grid.width(), grid.height()), grid_dimensions(level));
            for x in 0..w {
                assert!(grid.is_wall(Position::new(x, 0)));
                assert!(grid.is_wall(Position::new(x, h - 1)));
            }
            for y in 0..h {
                assert!(grid.is_wall(Position::new(0, y)));
                assert!(grid.is_wall(Position::new(w - 1, y)));
            }
        }
    }

    #[test]
    fn test_start_and_exit_zones_clear() {
        for seed in 0..50 {
            for level in [1, 7, 13, 20] {
                let mut rng = create_test_rng(seed);
                let generated = generate_level(level, &mut rng);
                let grid = &generated.grid;
                let exit = grid.exit_position();

                assert_eq!(grid.get(exit), Some(CellKind::Exit));
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        let pos = exit.offset(dx, dy);
                        // Neighbors on the border stay walls
                        assert_eq!(grid.is_wall(pos), !grid.is_interior(pos));
                    }
                }
                for dy in 0..=2 {
                    for dx in 0..=2 {
                        assert!(!grid.is_wall(START_POSITION.offset(dx, dy)));
                    }
                }
            }
        }
    }

    #[test]
    fn test_exit_reachable_from_start() {
        for seed in 0..100 {
            let mut rng = create_test_rng(seed);
            let generated = generate_level(20, &mut rng);
            let grid = &generated.grid;
            assert!(grid.is_reachable(START_POSITION, grid.exit_position()));
        }
    }

    #[test]
    fn test_boss_level_roster() {
        for level in [5, 10, 15, 20] {
            let mut rng = create_test_rng(7);
            let generated = generate_level(level, &mut rng);
            assert_eq!(generated.enemies.len(), 1);
            assert_eq!(generated.enemies[0].enemy_type, EnemyType::Boss);
            assert!(generated.enemies[0].encountered);
        }
    }

    #[test]
    fn test_regular_level_roster() {
        for level in (1..=MAX_LEVEL).filter(|l| !is_boss_level(*l)) {
            let mut rng = create_test_rng(level as u64 * 31);
            let generated = generate_level(level, &mut rng);
            assert_eq!(generated.enemies.len(), enemy_count(level));
            for enemy in &generated.enemies {
                assert_ne!(enemy.enemy_type, EnemyType::Boss);
                assert!(!enemy.encountered);
            }
        }
    }

    #[test]
    fn test_early_levels_only_drones() {
        for level in 1..8 {
            if is_boss_level(level) {
                continue;
            }
            let mut rng = create_test_rng(99);
            let generated = generate_level(level, &mut rng);
            assert!(generated
                .enemies
                .iter()
                .all(|e| e.enemy_type == EnemyType::Drone));
        }
    }

    #[test]
    fn test_mid_tier_never_rolls_assault() {
        let mut rng = create_test_rng(3);
        for _ in 0..500 {
            let kind = roll_enemy_type(9, &mut rng);
            assert!(matches!(kind, EnemyType::Battle | EnemyType::Drone));
        }
    }

    #[test]
    fn test_high_tier_rolls_all_three_types() {
        let mut rng = create_test_rng(3);
        let rolls: Vec<EnemyType> = (0..500).map(|_| roll_enemy_type(16, &mut rng)).collect();
        assert!(rolls.contains(&EnemyType::Assault));
        assert!(rolls.contains(&EnemyType::Battle));
        assert!(rolls.contains(&EnemyType::Drone));
        assert!(!rolls.contains(&EnemyType::Boss));
    }

    #[test]
    fn test_enemy_placement_constraints() {
        for seed in 0..50 {
            let mut rng = create_test_rng(seed);
            let generated = generate_level(12, &mut rng);
            let exit = generated.grid.exit_position();
            for enemy in &generated.enemies {
                assert!(!generated.grid.is_wall(enemy.position));
                assert_ne!(enemy.position, exit);
                assert!(enemy.position.manhattan(START_POSITION) >= 3);
            }
        }
    }

    #[test]
    fn test_enemies_never_share_a_cell() {
        // Level 14 packs the largest regular roster (10) into a 25x17 grid
        for seed in 0..50 {
            let mut rng = create_test_rng(seed);
            let generated = generate_level(14, &mut rng);
            assert_eq!(generated.enemies.len(), enemy_count(14));
            for (i, a) in generated.enemies.iter().enumerate() {
                for b in &generated.enemies[i + 1..] {
                    assert_ne!(a.position, b.position, "seed {seed}");
                }
            }
        }
    }

    #[test]
    fn test_item_placement_constraints() {
        for seed in 0..50 {
            let mut rng = create_test_rng(seed);
            let generated = generate_level(18, &mut rng);
            let exit = generated.grid.exit_position();
            for (i, item) in generated.items.iter().enumerate() {
                assert!(!generated.grid.is_wall(item.position));
                assert_ne!(item.position, exit);
                assert!(item.position.manhattan(START_POSITION) >= 2);
                assert!(!generated.enemies.iter().any(|e| e.position == item.position));
                assert!(!generated.items[..i]
                    .iter()
                    .any(|other| other.position == item.position));
            }
            assert_eq!(generated.items.len(), item_count(18));
        }
    }

    #[test]
    fn test_ids_unique_within_level() {
        let mut rng = create_test_rng(11);
        let generated = generate_level(14, &mut rng);
        for (i, enemy) in generated.enemies.iter().enumerate() {
            assert_eq!(enemy.id, i as u32);
        }
        for (i, item) in generated.items.iter().enumerate() {
            assert_eq!(item.id, i as u32);
        }
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = generate_level(9, &mut create_test_rng(2024));
        let b = generate_level(9, &mut create_test_rng(2024));
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_position_falls_back_to_scan() {
        let grid = Grid::bordered(6, 6);
        let target = Position::new(4, 3);
        let mut rng = create_test_rng(1);
        // A single valid cell is still found even if sampling never lands on it
        let found = sample_position(&grid, &mut rng, |pos| pos == target);
        assert_eq!(found, Some(target));
    }

    #[test]
    fn test_sample_position_none_when_nothing_valid() {
        let grid = Grid::bordered(6, 6);
        let mut rng = create_test_rng(1);
        assert_eq!(sample_position(&grid, &mut rng, |_| false), None);
    }
}
