//! Shortest-path driver for headless runs.
//!
//! Walls block; enemies and items do not, since bumping an enemy attacks it
//! and stepping on an item picks it up.

use crate::dungeon::types::{Direction, Level, Position};
use std::collections::VecDeque;

/// First step on a shortest path from `from` to each reachable cell.
/// `None` for unreachable cells and for `from` itself.
fn first_steps(level: &Level, from: Position) -> Vec<Vec<Option<(Direction, u32)>>> {
    let grid = &level.grid;
    let mut steps = vec![vec![None; grid.width()]; grid.height()];
    let mut queue = VecDeque::new();
    let mut visited = vec![vec![false; grid.width()]; grid.height()];

    if !grid.in_bounds(from) {
        return steps;
    }
    visited[from.y as usize][from.x as usize] = true;

    for direction in Direction::ALL {
        let (dx, dy) = direction.delta();
        let next = from.offset(dx, dy);
        if grid.get(next).is_some_and(|c| c.is_traversable()) {
            visited[next.y as usize][next.x as usize] = true;
            steps[next.y as usize][next.x as usize] = Some((direction, 1));
            queue.push_back(next);
        }
    }

    while let Some(current) = queue.pop_front() {
        let Some((direction, distance)) = steps[current.y as usize][current.x as usize] else {
            continue;
        };
        for next in grid.open_neighbors(current) {
            let seen = &mut visited[next.y as usize][next.x as usize];
            if !*seen {
                *seen = true;
                steps[next.y as usize][next.x as usize] = Some((direction, distance + 1));
                queue.push_back(next);
            }
        }
    }

    steps
}

/// Next move toward the nearest live enemy, or toward the exit once the
/// level is clear. `None` when no target can be reached.
pub fn next_step(level: &Level, from: Position) -> Option<Direction> {
    let steps = first_steps(level, from);
    let lookup = |pos: Position| steps.get(pos.y as usize)?.get(pos.x as usize).copied()?;

    let nearest_enemy = level
        .enemies
        .iter()
        .filter(|e| e.is_alive())
        .filter_map(|e| lookup(e.position))
        .min_by_key(|&(_, distance)| distance);

    match nearest_enemy {
        Some((direction, _)) => Some(direction),
        None if level.enemies_remaining() == 0 => {
            lookup(level.grid.exit_position()).map(|(d, _)| d)
        }
        None => None,
    }
}
