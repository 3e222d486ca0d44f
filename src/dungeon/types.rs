//! Level grid data structures.

use crate::combat::types::Enemy;
use crate::core::constants::BOSS_LEVEL_INTERVAL;
use crate::items::types::Item;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Kind of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Floor,
    Wall,
    Exit,
}

impl CellKind {
    /// Returns the display character for this cell
    pub fn icon(&self) -> char {
        match self {
            CellKind::Floor => '.',
            CellKind::Wall => '#',
            CellKind::Exit => '>',
        }
    }

    pub fn is_traversable(&self) -> bool {
        !matches!(self, CellKind::Wall)
    }
}

/// Grid coordinate. Signed so that neighbor offsets can step off the map
/// and be rejected by bounds checks instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// The fixed start cell of every level
pub const START_POSITION: Position = Position::new(1, 1);

/// Cardinal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Offset (dx, dy) for this direction, y grows downwards
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Parses a raw offset. Only single-axis unit steps are directions.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Rectangular level layout, indexed `cells[y][x]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<CellKind>>,
}

impl Grid {
    /// Creates an all-floor grid with walls along the border
    pub fn bordered(width: usize, height: usize) -> Self {
        let mut cells = vec![vec![CellKind::Floor; width]; height];
        for (y, row) in cells.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                    *cell = CellKind::Wall;
                }
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Exit cell sits one step in from the bottom-right corner
    pub fn exit_position(&self) -> Position {
        Position::new(self.width as i32 - 2, self.height as i32 - 2)
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// True for cells that are neither on the border nor outside the grid
    pub fn is_interior(&self, pos: Position) -> bool {
        pos.x > 0
            && pos.y > 0
            && (pos.x as usize) + 1 < self.width
            && (pos.y as usize) + 1 < self.height
    }

    /// Cell at position, if it exists
    pub fn get(&self, pos: Position) -> Option<CellKind> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.cells[pos.y as usize][pos.x as usize])
    }

    pub fn set(&mut self, pos: Position, kind: CellKind) {
        if self.in_bounds(pos) {
            self.cells[pos.y as usize][pos.x as usize] = kind;
        }
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        self.get(pos) == Some(CellKind::Wall)
    }

    pub fn rows(&self) -> &[Vec<CellKind>] {
        &self.cells
    }

    /// Counts cells of the given kind
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&c| c == kind)
            .count()
    }

    /// Traversable 4-connected neighbors of a cell
    pub fn open_neighbors(&self, pos: Position) -> Vec<Position> {
        Direction::ALL
            .iter()
            .map(|dir| {
                let (dx, dy) = dir.delta();
                pos.offset(dx, dy)
            })
            .filter(|&p| self.get(p).is_some_and(|c| c.is_traversable()))
            .collect()
    }

    /// Flood fill over traversable cells; true if `to` can be reached from `from`
    pub fn is_reachable(&self, from: Position, to: Position) -> bool {
        if !self.get(from).is_some_and(|c| c.is_traversable()) {
            return false;
        }
        if from == to {
            return true;
        }

        let mut visited = vec![vec![false; self.width]; self.height];
        let mut queue: VecDeque<Position> = VecDeque::new();
        visited[from.y as usize][from.x as usize] = true;
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            for next in self.open_neighbors(current) {
                if next == to {
                    return true;
                }
                let seen = &mut visited[next.y as usize][next.x as usize];
                if !*seen {
                    *seen = true;
                    queue.push_back(next);
                }
            }
        }

        false
    }
}

/// One generated level: layout plus the rosters it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub number: u32,
    pub grid: Grid,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
}

impl Level {
    pub fn is_boss_level(&self) -> bool {
        self.number % BOSS_LEVEL_INTERVAL == 0
    }

    /// Live enemy standing on `pos`, if any
    pub fn enemy_at(&self, pos: Position) -> Option<&Enemy> {
        self.enemies
            .iter()
            .find(|e| e.position == pos && e.is_alive())
    }

    pub fn item_at(&self, pos: Position) -> Option<&Item> {
        self.items.iter().find(|i| i.position == pos)
    }

    pub fn enemies_remaining(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    /// Replaces the roster entry with the same id
    pub fn update_enemy(&mut self, enemy: Enemy) {
        if let Some(slot) = self.enemies.iter_mut().find(|e| e.id == enemy.id) {
            *slot = enemy;
        }
    }

    pub fn remove_enemy(&mut self, id: u32) {
        self.enemies.retain(|e| e.id != id);
    }

    /// Removes and returns the item with the given id
    pub fn take_item(&mut self, id: u32) -> Option<Item> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    /// Mission log line for entering this level
    pub fn entry_message(&self) -> String {
        if self.is_boss_level() {
            format!("Entered level {} - BOSS LEVEL!", self.number)
        } else {
            format!("Entered level {}", self.number)
        }
    }
}
