//! Sky Raid - simulation core of a vertical-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, power-ups)
//! - `scheduler`: Fixed-rate tick driver and serialized input channel
//! - `settings`: Data-driven game balance

pub mod scheduler;
pub mod settings;
pub mod sim;

pub use scheduler::{Command, InputHandle, TickReport, TickScheduler};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;
    /// Fixed simulation timestep in milliseconds
    pub const TICK_MS: f32 = 1000.0 / TICK_HZ as f32;

    /// Playfield dimensions (origin top-left, y grows downward)
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Fraction of visual size used for collision
    pub const HITBOX_SCALE: f32 = 0.7;

    /// Entity visual sizes (width, height)
    pub const PLAYER_SIZE: (f32, f32) = (40.0, 40.0);
    pub const BULLET_SIZE: (f32, f32) = (10.0, 10.0);
    pub const ENEMY_BULLET_SIZE: (f32, f32) = (15.0, 15.0);
    pub const POWERUP_SIZE: (f32, f32) = (20.0, 20.0);
    pub const LIGHT_ENEMY_SIZE: (f32, f32) = (50.0, 60.0);
    pub const HEAVY_ENEMY_SIZE: (f32, f32) = (50.0, 60.0);
    pub const SHOOTER_ENEMY_SIZE: (f32, f32) = (50.0, 50.0);

    /// Per-tick movement offsets (pixels/tick)
    pub const BULLET_SPEED: f32 = 15.0;
    pub const ENEMY_SPEED: f32 = 3.0;
    pub const ENEMY_BULLET_SPEED: f32 = 6.0;

    /// Difficulty curve
    pub const DIFFICULTY_STEP_SECS: f32 = 30.0;
    pub const SPEED_MULTIPLIER_PER_STEP: f32 = 0.5;
    pub const MAX_SPEED_MULTIPLIER: f32 = 3.0;

    /// Wave schedule
    pub const WAVE_INTERVAL_MS: f32 = 2000.0;
    pub const WAVE_JITTER: f32 = 0.2;
    pub const SECOND_FORMATION_SECS: f32 = 120.0;

    /// Enemy type weighting
    pub const SHOOTER_CHANCE: f32 = 0.2;
    pub const HEAVY_CHANCE_START: f32 = 0.5;
    pub const HEAVY_CHANCE_END: f32 = 0.7;
    pub const HEAVY_RAMP_START_SECS: f32 = 60.0;
    pub const HEAVY_RAMP_SECS: f32 = 540.0;

    /// Enemy health per kind
    pub const LIGHT_HEALTH: i32 = 3;
    pub const HEAVY_HEALTH: i32 = 5;
    pub const SHOOTER_HEALTH: i32 = 2;

    /// Chance a destroyed enemy drops a power-up
    pub const DROP_CHANCE: f32 = 0.1;

    /// Power-up durations
    pub const SHIELD_DURATION_MS: f32 = 10_000.0;
    pub const BOOST_DURATION_MS: f32 = 10_000.0;

    /// Auto-fire intervals
    pub const FIRE_INTERVAL_MS: f32 = 200.0;
    pub const BOOSTED_FIRE_INTERVAL_MS: f32 = 100.0;

    /// Shooter enemies fire this often
    pub const ENEMY_FIRE_INTERVAL_MS: f32 = 1500.0;

    /// Boss
    pub const BOSS_INTERVAL_SECS: f32 = 120.0;
    pub const BOSS_HEALTH: i32 = 100;
    pub const BOSS_Y: f32 = 160.0;
    pub const BOSS_SIZE: (f32, f32) = (360.0, 200.0);

    /// Score per kill
    pub const LIGHT_SCORE: u64 = 100;
    pub const HEAVY_SCORE: u64 = 250;
    pub const SHOOTER_SCORE: u64 = 150;
    pub const BOSS_SCORE: u64 = 5000;

    /// Player start position measured from the bottom edge
    pub const PLAYER_START_FROM_BOTTOM: f32 = 100.0;
}

/// Convert a millisecond duration to whole ticks (nearest, at least one)
#[inline]
pub fn ms_to_ticks(ms: f32) -> u32 {
    ((ms / consts::TICK_MS).round() as u32).max(1)
}

/// Convert seconds of survival time to ticks
#[inline]
pub fn secs_to_ticks(secs: f32) -> u64 {
    (secs * consts::TICK_HZ as f32).round() as u64
}

/// Clamp a point so an entity of the given size stays fully on screen
#[inline]
pub fn clamp_to_screen(pos: Vec2, size: Vec2, screen: Vec2) -> Vec2 {
    let half = size * 0.5;
    let max = (screen - half).max(half);
    pos.clamp(half, max)
}
