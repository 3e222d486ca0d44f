// Campaign
pub const MAX_LEVEL: u32 = 20;
pub const BOSS_LEVEL_INTERVAL: u32 = 5;

// Grid dimensions: width = BASE + (level - 1), height = BASE + level / 2
pub const GRID_BASE_WIDTH: usize = 15;
pub const GRID_BASE_HEIGHT: usize = 10;
pub const GRID_MAX_WIDTH: usize = 25;
pub const GRID_MAX_HEIGHT: usize = 18;
pub const WALL_DENSITY: f64 = 0.08;

// Generation bounds
pub const MAX_LAYOUT_ATTEMPTS: u32 = 20;
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1_000;
pub const ENEMY_MIN_START_DISTANCE: i32 = 3;
pub const ITEM_MIN_START_DISTANCE: i32 = 2;

// Roster sizes: count = BASE + level * PER_LEVEL (floored)
pub const ENEMY_COUNT_BASE: f64 = 3.0;
pub const ENEMY_COUNT_PER_LEVEL: f64 = 0.5;
pub const ITEM_COUNT_BASE: f64 = 2.0;
pub const ITEM_COUNT_PER_LEVEL: f64 = 0.3;

// Enemy scaling: multiplier = 1 + (level - 1) * STEP
pub const ENEMY_SCALING_PER_LEVEL: f64 = 0.1;

// Enemy tier thresholds
pub const ENEMY_TIER_BATTLE_LEVEL: u32 = 8;
pub const ENEMY_TIER_ASSAULT_LEVEL: u32 = 15;
pub const TIER_HIGH_ASSAULT_CHANCE: f64 = 0.4;
pub const TIER_HIGH_BATTLE_CHANCE: f64 = 0.7;
pub const TIER_MID_BATTLE_CHANCE: f64 = 0.6;

// Enemy base stats: (health, damage, defense, experience)
pub const DRONE_STATS: (u32, u32, u32, u32) = (20, 5, 0, 10);
pub const BATTLE_STATS: (u32, u32, u32, u32) = (40, 12, 3, 25);
pub const ASSAULT_STATS: (u32, u32, u32, u32) = (60, 18, 5, 40);
pub const BOSS_STATS: (u32, u32, u32, u32) = (150, 25, 8, 100);

// Item effects
pub const REPAIR_AMOUNT: u32 = 30;
pub const WEAPON_UPGRADE_DAMAGE: u32 = 5;
pub const ARMOR_PLATING_DEFENSE: u32 = 3;
pub const FUEL_CELL_AMOUNT: u32 = 50;

// Combat
pub const MIN_DAMAGE: u32 = 1;
pub const HIT_ROLL_MAX: f64 = 100.0;

// Fuel
pub const FUEL_PER_MOVE: u32 = 1;
pub const FUEL_LEVEL_REFILL: u32 = 20;
pub const FUEL_LOW_THRESHOLD: u32 = 10;
pub const FUEL_GAUGE_WARN_THRESHOLD: u32 = 40;

// Starting unit
pub const STARTING_PILOT_NAME: &str = "Rookie";
pub const STARTING_HEALTH: u32 = 100;
pub const STARTING_WEAPON_DAMAGE: u32 = 10;
pub const STARTING_WEAPON_ACCURACY: u32 = 80;
pub const STARTING_WEAPON_RANGE: u32 = 1;
pub const STARTING_ARMOR_DEFENSE: u32 = 5;
pub const STARTING_ARMOR_DURABILITY: u32 = 100;
pub const STARTING_SENSOR_RANGE: u32 = 1;
pub const STARTING_SENSOR_DETECTION: u32 = 70;
pub const STARTING_SPEED: u32 = 1;
pub const STARTING_FUEL: u32 = 100;

// Pilot progression: exp needed = level * EXP_PER_PILOT_LEVEL
pub const EXP_PER_PILOT_LEVEL: u64 = 100;
pub const LEVEL_UP_HEALTH: u32 = 20;
pub const LEVEL_UP_DAMAGE: u32 = 2;
pub const LEVEL_UP_DEFENSE: u32 = 1;
pub const LEVEL_UP_SENSOR_RANGE: u32 = 1;
pub const LEVEL_UP_FUEL: u32 = 20;

// Mission log
pub const LOG_CAPACITY: usize = 10;

// Snapshot file format: "MECHADLV" + format revision
pub const SAVE_VERSION_MAGIC: u64 = 0x4D45_4348_4144_0001;
