//! Turn sequencing for one play session.
//!
//! The session owns every piece of mutable game state: the RNG, the current
//! level, the player unit, the mission log and the save slots. Each call to
//! [`Session::attempt_move`] runs one turn to completion.

use crate::character::progression::{add_experience, apply_level_ups};
use crate::character::types::Unit;
use crate::combat::logic::resolve_combat;
use crate::combat::types::{CombatResult, Enemy, EnemyOutcome};
use crate::core::constants::*;
use crate::core::frame::Frame;
use crate::core::game_log::GameLog;
use crate::dungeon::generation::generate_level;
use crate::dungeon::types::{CellKind, Direction, Level, Position};
use crate::items::logic::apply_item;
use crate::items::types::{Item, ItemType};
use chrono::{TimeZone, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const WELCOME_MESSAGE: &str = "Welcome to Mecha Dungeon Delver!";
pub const EXIT_LOCKED_MESSAGE: &str = "Defeat all enemies before advancing!";
pub const LEVEL_CLEARED_MESSAGE: &str = "Level cleared! Moving to next level...";
pub const VICTORY_MESSAGE: &str = "Congratulations! You have completed all 20 levels!";
pub const FUEL_DEPLETED_MESSAGE: &str = "Warning: Fuel depleted! Movement will be limited.";
pub const FUEL_LOW_MESSAGE: &str = "Warning: Fuel running low!";
pub const LEVEL_UP_MESSAGE: &str = "LEVEL UP! Stats improved!";
pub const GAME_SAVED_MESSAGE: &str = "Game saved!";
pub const GAME_LOADED_MESSAGE: &str = "Game loaded!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Menu,
    Playing,
    Dead,
    Victory,
}

/// What a single movement intent did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Not playing, or the offset is not a cardinal unit step
    Ignored,
    /// Target is off the map or a wall; nothing changed
    Blocked,
    /// Bumped a live enemy; the player did not move
    Attacked(CombatResult),
    /// Stepped onto an item and used it
    PickedUp { item: ItemType, fuel: u32 },
    /// Plain step onto open floor
    Moved { fuel: u32 },
    /// Exit refused because enemies remain
    ExitLocked { enemies_remaining: usize },
    /// Exit taken; the next level has been generated
    LevelCleared { next_level: u32 },
    /// Exit of the final level taken
    Victory,
}

/// Deep copy of the state needed to resume a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSnapshot {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub player: Unit,
    /// Unix seconds
    pub timestamp: i64,
}

impl SaveSnapshot {
    /// Menu label, e.g. "Save 2 - Level 4 - 2026-10-19 14:03"
    pub fn label(&self) -> String {
        let when = Utc
            .timestamp_opt(self.timestamp, 0)
            .single()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        format!("{} - Level {} - {}", self.name, self.level, when)
    }
}

pub struct Session<R: Rng = ChaCha8Rng> {
    rng: R,
    phase: GamePhase,
    level_number: u32,
    level: Option<Level>,
    player: Unit,
    log: GameLog,
    saves: Vec<SaveSnapshot>,
    turns: u64,
}

impl Session<ChaCha8Rng> {
    /// Session whose generation and combat rolls replay exactly for `seed`
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> Session<R> {
    /// Creates a session sitting in the menu
    pub fn new(rng: R) -> Self {
        let mut log = GameLog::new();
        log.push(WELCOME_MESSAGE);
        Self {
            rng,
            phase: GamePhase::Menu,
            level_number: 1,
            level: None,
            player: Unit::new(),
            log,
            saves: Vec::new(),
            turns: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn level_number(&self) -> u32 {
        self.level_number
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    /// Mutable access to the loaded level, for scripted setups
    pub fn level_mut(&mut self) -> Option<&mut Level> {
        self.level.as_mut()
    }

    pub fn player(&self) -> &Unit {
        &self.player
    }

    /// Mutable access to the player, for scripted setups
    pub fn player_mut(&mut self) -> &mut Unit {
        &mut self.player
    }

    pub fn log(&self) -> &GameLog {
        &self.log
    }

    pub fn saves(&self) -> &[SaveSnapshot] {
        &self.saves
    }

    /// Replaces the save slot list, e.g. with slots read from disk
    pub fn set_saves(&mut self, saves: Vec<SaveSnapshot>) {
        self.saves = saves;
    }

    /// Turns that moved the player
    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Starts a fresh run on level 1 with a new unit
    pub fn start_new_game(&mut self) {
        self.player = Unit::new();
        self.level_number = 1;
        self.turns = 0;
        self.phase = GamePhase::Playing;
        tracing::info!("new game started");
        self.enter_level();
    }

    pub fn return_to_menu(&mut self) {
        self.phase = GamePhase::Menu;
    }

    /// Generates the current level number and puts the player on its start cell
    fn enter_level(&mut self) {
        let level = generate_level(self.level_number, &mut self.rng);
        self.player.enter_level(self.level_number);
        self.log.push(level.entry_message());
        self.level = Some(level);
    }

    /// Handles one movement intent. Anything but a cardinal unit step is ignored.
    pub fn attempt_move(&mut self, dx: i32, dy: i32) -> TurnOutcome {
        match Direction::from_delta(dx, dy) {
            Some(direction) => self.step(direction),
            None => TurnOutcome::Ignored,
        }
    }

    pub fn step(&mut self, direction: Direction) -> TurnOutcome {
        if self.phase != GamePhase::Playing {
            return TurnOutcome::Ignored;
        }
        let Some(level) = self.level.as_ref() else {
            return TurnOutcome::Ignored;
        };

        let (dx, dy) = direction.delta();
        let target = self.player.position.offset(dx, dy);

        let cell = match level.grid.get(target) {
            None | Some(CellKind::Wall) => return TurnOutcome::Blocked,
            Some(cell) => cell,
        };

        if let Some(enemy) = level.enemy_at(target).cloned() {
            return self.attack(enemy);
        }

        if let Some(item) = level.item_at(target).cloned() {
            return self.pick_up(item, target);
        }

        if cell == CellKind::Exit {
            return self.use_exit();
        }

        let fuel = self.move_player(target);
        TurnOutcome::Moved { fuel }
    }

    fn attack(&mut self, enemy: Enemy) -> TurnOutcome {
        let result = resolve_combat(&self.player, &enemy, &mut self.rng);

        for message in result.log_messages() {
            self.log.push(message);
        }
        self.player.pilot.health = result.player_health;

        if let Some(level) = self.level.as_mut() {
            match &result.enemy {
                EnemyOutcome::Survived(updated) => level.update_enemy(updated.clone()),
                EnemyOutcome::Destroyed(destroyed) => level.remove_enemy(destroyed.id),
            }
        }

        if result.experience_gained > 0 {
            add_experience(&mut self.player, result.experience_gained);
            self.resolve_progression();
        }

        if result.player_destroyed {
            self.phase = GamePhase::Dead;
            tracing::info!(level = self.level_number, "player destroyed");
        }

        TurnOutcome::Attacked(result)
    }

    fn pick_up(&mut self, item: Item, target: Position) -> TurnOutcome {
        if let Some(level) = self.level.as_mut() {
            level.take_item(item.id);
        }
        let message = apply_item(&mut self.player, item.item_type);
        self.log.push(message);

        let fuel = self.move_player(target);
        TurnOutcome::PickedUp {
            item: item.item_type,
            fuel,
        }
    }

    fn use_exit(&mut self) -> TurnOutcome {
        let remaining = self.level.as_ref().map_or(0, Level::enemies_remaining);
        if remaining > 0 {
            self.log.push(EXIT_LOCKED_MESSAGE);
            return TurnOutcome::ExitLocked {
                enemies_remaining: remaining,
            };
        }

        if self.level_number >= MAX_LEVEL {
            self.phase = GamePhase::Victory;
            self.log.push(VICTORY_MESSAGE);
            tracing::info!(pilot_level = self.player.pilot.level, "campaign complete");
            return TurnOutcome::Victory;
        }

        self.level_number += 1;
        self.log.push(LEVEL_CLEARED_MESSAGE);
        tracing::info!(next_level = self.level_number, "level cleared");
        self.enter_level();
        TurnOutcome::LevelCleared {
            next_level: self.level_number,
        }
    }

    /// Moves onto `target` and burns one step of fuel. Empty tanks only warn.
    fn move_player(&mut self, target: Position) -> u32 {
        self.player.position = target;
        self.turns += 1;

        let fuel = self.player.burn_fuel();
        if fuel == 0 {
            self.log.push(FUEL_DEPLETED_MESSAGE);
        } else if fuel <= FUEL_LOW_THRESHOLD {
            self.log.push(FUEL_LOW_MESSAGE);
        }
        fuel
    }

    fn resolve_progression(&mut self) {
        let gained = apply_level_ups(&mut self.player);
        for _ in 0..gained {
            self.log.push(LEVEL_UP_MESSAGE);
        }
    }

    /// Deep copy of level number and player, stamped now
    pub fn snapshot(&self) -> SaveSnapshot {
        SaveSnapshot {
            id: Uuid::new_v4().to_string(),
            name: format!("Save {}", self.saves.len() + 1),
            level: self.level_number,
            player: self.player.clone(),
            timestamp: Utc::now().timestamp(),
        }
    }

    /// Appends a snapshot to the save slots. Only allowed mid-run.
    pub fn save_game(&mut self) -> Option<&SaveSnapshot> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        let snapshot = self.snapshot();
        self.saves.push(snapshot);
        self.log.push(GAME_SAVED_MESSAGE);
        self.saves.last()
    }

    /// Resumes from a snapshot. The saved level is entered at a freshly
    /// generated layout; the saved map itself is not kept.
    pub fn restore(&mut self, snapshot: &SaveSnapshot) {
        self.level_number = snapshot.level.clamp(1, MAX_LEVEL);
        self.player = snapshot.player.clone();
        self.phase = GamePhase::Playing;
        self.log.push(GAME_LOADED_MESSAGE);
        tracing::info!(level = self.level_number, save = %snapshot.name, "snapshot restored");
        self.enter_level();
    }

    /// Restores save slot `index`; false if there is no such slot
    pub fn load_game(&mut self, index: usize) -> bool {
        match self.saves.get(index).cloned() {
            Some(snapshot) => {
                self.restore(&snapshot);
                true
            }
            None => false,
        }
    }

    /// View of the current state for the presentation layer
    pub fn frame(&self) -> Frame {
        Frame::build(
            self.phase,
            self.level_number,
            self.level.as_ref(),
            &self.player,
            &self.log,
        )
    }
}
