//! Game balance settings
//!
//! Every gameplay tunable lives here so a run can be replayed or rebalanced
//! from a JSON file without touching the simulation code.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::ms_to_ticks;

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Gameplay tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Fraction of visual size used as the collision extent
    pub hitbox_scale: f32,

    // === Motion (pixels per tick) ===
    pub bullet_speed: f32,
    pub enemy_speed: f32,
    pub enemy_bullet_speed: f32,

    // === Difficulty ===
    pub difficulty_step_secs: f32,
    pub speed_multiplier_per_step: f32,
    pub max_speed_multiplier: f32,

    // === Waves ===
    pub wave_interval_ms: f32,
    /// Fractional jitter applied to the wave interval (0.2 = ±20%)
    pub wave_jitter: f32,
    pub second_formation_secs: f32,
    pub shooter_chance: f32,
    pub heavy_chance_start: f32,
    pub heavy_chance_end: f32,
    pub heavy_ramp_start_secs: f32,
    pub heavy_ramp_secs: f32,
    pub enemy_fire_interval_ms: f32,

    // === Power-ups ===
    pub drop_chance: f32,
    pub shield_duration_ms: f32,
    pub boost_duration_ms: f32,
    pub fire_interval_ms: f32,
    pub boosted_fire_interval_ms: f32,

    // === Boss ===
    pub boss_interval_secs: f32,
    pub boss_health: i32,
    pub boss_y: f32,
    pub boss_width: f32,
    pub boss_height: f32,

    // === Score ===
    pub light_score: u64,
    pub heavy_score: u64,
    pub shooter_score: u64,
    pub boss_score: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            hitbox_scale: HITBOX_SCALE,

            bullet_speed: BULLET_SPEED,
            enemy_speed: ENEMY_SPEED,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,

            difficulty_step_secs: DIFFICULTY_STEP_SECS,
            speed_multiplier_per_step: SPEED_MULTIPLIER_PER_STEP,
            max_speed_multiplier: MAX_SPEED_MULTIPLIER,

            wave_interval_ms: WAVE_INTERVAL_MS,
            wave_jitter: WAVE_JITTER,
            second_formation_secs: SECOND_FORMATION_SECS,
            shooter_chance: SHOOTER_CHANCE,
            heavy_chance_start: HEAVY_CHANCE_START,
            heavy_chance_end: HEAVY_CHANCE_END,
            heavy_ramp_start_secs: HEAVY_RAMP_START_SECS,
            heavy_ramp_secs: HEAVY_RAMP_SECS,
            enemy_fire_interval_ms: ENEMY_FIRE_INTERVAL_MS,

            drop_chance: DROP_CHANCE,
            shield_duration_ms: SHIELD_DURATION_MS,
            boost_duration_ms: BOOST_DURATION_MS,
            fire_interval_ms: FIRE_INTERVAL_MS,
            boosted_fire_interval_ms: BOOSTED_FIRE_INTERVAL_MS,

            boss_interval_secs: BOSS_INTERVAL_SECS,
            boss_health: BOSS_HEALTH,
            boss_y: BOSS_Y,
            boss_width: BOSS_SIZE.0,
            boss_height: BOSS_SIZE.1,

            light_score: LIGHT_SCORE,
            heavy_score: HEAVY_SCORE,
            shooter_score: SHOOTER_SCORE,
            boss_score: BOSS_SCORE,
        }
    }
}

impl Settings {
    /// Parse settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    /// Keep valid settings, otherwise warn and fall back to defaults
    pub fn or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: &str) -> SettingsError {
            SettingsError::Invalid {
                field,
                reason: reason.to_string(),
            }
        }

        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(invalid("screen", "dimensions must be positive"));
        }
        if !(self.hitbox_scale > 0.0 && self.hitbox_scale <= 1.0) {
            return Err(invalid("hitbox_scale", "must be in (0, 1]"));
        }
        let probabilities = [
            ("shooter_chance", self.shooter_chance),
            ("heavy_chance_start", self.heavy_chance_start),
            ("heavy_chance_end", self.heavy_chance_end),
            ("drop_chance", self.drop_chance),
            ("wave_jitter", self.wave_jitter),
        ];
        for (field, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(field, "must be in [0, 1]"));
            }
        }
        let intervals = [
            ("wave_interval_ms", self.wave_interval_ms),
            ("fire_interval_ms", self.fire_interval_ms),
            ("boosted_fire_interval_ms", self.boosted_fire_interval_ms),
            ("enemy_fire_interval_ms", self.enemy_fire_interval_ms),
            ("difficulty_step_secs", self.difficulty_step_secs),
            ("boss_interval_secs", self.boss_interval_secs),
            ("heavy_ramp_secs", self.heavy_ramp_secs),
            ("bullet_speed", self.bullet_speed),
            ("enemy_speed", self.enemy_speed),
            ("enemy_bullet_speed", self.enemy_bullet_speed),
        ];
        for (field, v) in intervals {
            if !(v > 0.0) {
                return Err(invalid(field, "must be positive"));
            }
        }
        if self.max_speed_multiplier < 1.0 {
            return Err(invalid("max_speed_multiplier", "must be at least 1"));
        }
        if self.boss_health <= 0 {
            return Err(invalid("boss_health", "must be positive"));
        }
        Ok(())
    }

    /// Screen extent as a vector
    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    pub fn boss_size(&self) -> Vec2 {
        Vec2::new(self.boss_width, self.boss_height)
    }

    /// Boss spawn point: horizontally centered at `boss_y`
    pub fn boss_position(&self) -> Vec2 {
        Vec2::new(self.screen_width / 2.0, self.boss_y)
    }

    pub fn shield_ticks(&self) -> u32 {
        ms_to_ticks(self.shield_duration_ms)
    }

    pub fn boost_ticks(&self) -> u32 {
        ms_to_ticks(self.boost_duration_ms)
    }

    pub fn fire_interval_ticks(&self) -> u32 {
        ms_to_ticks(self.fire_interval_ms)
    }

    pub fn boosted_fire_interval_ticks(&self) -> u32 {
        ms_to_ticks(self.boosted_fire_interval_ms)
    }

    pub fn wave_interval_ticks(&self) -> u32 {
        ms_to_ticks(self.wave_interval_ms)
    }

    pub fn enemy_fire_interval_ticks(&self) -> u32 {
        ms_to_ticks(self.enemy_fire_interval_ms)
    }

    pub fn boss_interval_ticks(&self) -> u32 {
        ms_to_ticks(self.boss_interval_secs * 1000.0)
    }
}
