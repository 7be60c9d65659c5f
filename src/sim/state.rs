//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]. External code
//! only ever reads it; mutation goes through [`super::tick`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::Settings;

/// Entity identifier, unique for the lifetime of a run
pub type EntityId = u32;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Basic enemy waves are spawning
    Wave,
    /// A boss is on screen, waves are suspended
    Boss,
    /// Player died; state is frozen until restart
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub alive: bool,
    /// Shield active: enemy contact and enemy fire are ignored
    pub invincible: bool,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            alive: true,
            invincible: false,
        }
    }

    pub fn size() -> Vec2 {
        Vec2::from(PLAYER_SIZE)
    }
}

/// Basic enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Light,
    Heavy,
    /// Fires bullets straight down at a fixed rate
    Shooter,
}

impl EnemyKind {
    /// Starting health
    pub fn health(self) -> i32 {
        match self {
            EnemyKind::Light => LIGHT_HEALTH,
            EnemyKind::Heavy => HEAVY_HEALTH,
            EnemyKind::Shooter => SHOOTER_HEALTH,
        }
    }

    /// Visual size (collision uses the scaled hitbox)
    pub fn size(self) -> Vec2 {
        match self {
            EnemyKind::Light => Vec2::from(LIGHT_ENEMY_SIZE),
            EnemyKind::Heavy => Vec2::from(HEAVY_ENEMY_SIZE),
            EnemyKind::Shooter => Vec2::from(SHOOTER_ENEMY_SIZE),
        }
    }

    pub fn score(self, settings: &Settings) -> u64 {
        match self {
            EnemyKind::Light => settings.light_score,
            EnemyKind::Heavy => settings.heavy_score,
            EnemyKind::Shooter => settings.shooter_score,
        }
    }
}

/// A basic enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub health: i32,
    pub alive: bool,
    /// Ticks until the next shot (only meaningful for shooters)
    #[serde(default)]
    pub fire_ticks: u32,
}

impl Enemy {
    pub fn new(id: EntityId, kind: EnemyKind, pos: Vec2, fire_ticks: u32) -> Self {
        Self {
            id,
            kind,
            pos,
            health: kind.health(),
            alive: true,
            fire_ticks,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.kind.size()
    }
}

/// A projectile (player shots travel up, enemy shots travel down)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: EntityId,
    pub pos: Vec2,
    pub alive: bool,
}

impl Bullet {
    pub fn new(id: EntityId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            alive: true,
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Temporary invincibility
    Shield,
    /// Temporary fire-rate boost
    Speed,
}

/// A falling power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub id: EntityId,
    pub kind: PowerupKind,
    pub pos: Vec2,
}

/// The boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub health: i32,
    pub alive: bool,
    pub size: Vec2,
}

/// Discrete effects produced by a tick, for audio/UI consumers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player auto-fire produced a bullet
    BulletFired,
    /// Terminal transition; emitted exactly once per run
    PlayerDied,
    WaveSpawned { wave: u32, formations: u8 },
    BossSpawned,
    BossDefeated,
    EnemyDestroyed { id: EntityId, kind: EnemyKind },
    PowerupDropped { kind: PowerupKind },
    PowerupCollected { kind: PowerupKind },
    ShieldExpired,
    BoostExpired,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance settings the run was started with
    pub settings: Settings,
    /// Survival clock in ticks
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// Active enemies (ascending id)
    pub enemies: Vec<Enemy>,
    /// Player bullets (ascending id)
    pub bullets: Vec<Bullet>,
    /// Enemy bullets (ascending id)
    pub enemy_bullets: Vec<Bullet>,
    /// Falling power-ups (ascending id)
    pub powerups: Vec<Powerup>,
    pub boss: Option<Boss>,
    /// Number of waves spawned so far
    pub wave_count: u32,
    /// Ticks until the next wave may spawn
    pub wave_timer: u32,
    /// Ticks until the next boss check
    pub boss_countdown: u32,
    /// Fire-rate boost remaining (ticks)
    pub boost_ticks: u32,
    /// Shield remaining (ticks)
    pub shield_ticks: u32,
    /// Auto-fire interval currently in effect (ticks)
    pub fire_interval: u32,
    /// Ticks until the next player shot
    pub fire_countdown: u32,
    pub score: u64,
    /// Set by collision resolution when the player is struck
    #[serde(default)]
    pub player_hit: bool,
    /// Next entity ID
    next_id: EntityId,
}

impl GameState {
    /// Create a fresh run
    pub fn new(seed: u64, settings: Settings) -> Self {
        let start = Vec2::new(
            settings.screen_width / 2.0,
            settings.screen_height - PLAYER_START_FROM_BOTTOM,
        );
        let fire_interval = settings.fire_interval_ticks();
        Self {
            seed,
            time_ticks: 0,
            phase: GamePhase::Wave,
            player: Player::new(start),
            enemies: Vec::new(),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            powerups: Vec::new(),
            boss: None,
            wave_count: 0,
            wave_timer: settings.wave_interval_ticks(),
            boss_countdown: settings.boss_interval_ticks(),
            boost_ticks: 0,
            shield_ticks: 0,
            fire_interval,
            fire_countdown: fire_interval,
            score: 0,
            player_hit: false,
            next_id: 1,
            settings,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The ID the next spawned entity will receive
    pub fn peek_next_id(&self) -> EntityId {
        self.next_id
    }

    /// Survival time in seconds
    pub fn survival_secs(&self) -> f32 {
        self.time_ticks as f32 / TICK_HZ as f32
    }

    /// Whole difficulty steps survived
    pub fn difficulty_factor(&self) -> u32 {
        (self.survival_secs() / self.settings.difficulty_step_secs).floor() as u32
    }

    /// Enemy/power-up speed scale for the current difficulty
    pub fn enemy_speed_multiplier(&self) -> f32 {
        let s = &self.settings;
        (1.0 + s.speed_multiplier_per_step * self.difficulty_factor() as f32)
            .min(s.max_speed_multiplier)
    }

    /// Current per-tick enemy displacement
    pub fn enemy_step(&self) -> f32 {
        self.settings.enemy_speed * self.enemy_speed_multiplier()
    }

    pub fn boss_active(&self) -> bool {
        self.boss.as_ref().is_some_and(|b| b.alive)
    }

    /// Terminal once the player has died
    pub fn is_terminal(&self) -> bool {
        !self.player.alive
    }

    /// Set the player's position from external control (clamped to screen)
    pub fn set_player_position(&mut self, pos: Vec2) {
        if self.is_terminal() {
            return;
        }
        self.player.pos = crate::clamp_to_screen(pos, Player::size(), self.settings.screen());
    }

    /// Recompute the phase from the entity set
    pub fn refresh_phase(&mut self) {
        self.phase = if !self.player.alive {
            GamePhase::GameOver
        } else if self.boss_active() {
            GamePhase::Boss
        } else {
            GamePhase::Wave
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(7, Settings::default());
        assert!(state.player.alive);
        assert!(!state.player.invincible);
        assert_eq!(state.phase, GamePhase::Wave);
        assert_eq!(state.peek_next_id(), 1);
        assert_eq!(state.fire_interval, 12);
        assert_eq!(state.player.pos, Vec2::new(200.0, 700.0));
    }

    #[test]
    fn test_ids_monotonic() {
        let mut state = GameState::new(7, Settings::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
        assert_eq!(state.peek_next_id(), b + 1);
    }

    #[test]
    fn test_difficulty_curve() {
        let mut state = GameState::new(7, Settings::default());
        assert_eq!(state.difficulty_factor(), 0);
        assert_eq!(state.enemy_speed_multiplier(), 1.0);

        state.time_ticks = 30 * 60;
        assert_eq!(state.difficulty_factor(), 1);
        assert_eq!(state.enemy_speed_multiplier(), 1.5);

        state.time_ticks = 59 * 60;
        assert_eq!(state.difficulty_factor(), 1);

        // Capped at 3x
        state.time_ticks = 3600 * 60;
        assert_eq!(state.enemy_speed_multiplier(), 3.0);
        assert_eq!(state.enemy_step(), 9.0);
    }

    #[test]
    fn test_set_player_position_clamps_and_freezes() {
        let mut state = GameState::new(7, Settings::default());
        state.set_player_position(Vec2::new(-100.0, 100.0));
        assert_eq!(state.player.pos, Vec2::new(20.0, 100.0));

        state.player.alive = false;
        state.set_player_position(Vec2::new(200.0, 200.0));
        assert_eq!(state.player.pos, Vec2::new(20.0, 100.0));
    }

    #[test]
    fn test_enemy_kind_stats() {
        assert_eq!(EnemyKind::Light.health(), 3);
        assert_eq!(EnemyKind::Heavy.health(), 5);
        assert_eq!(EnemyKind::Shooter.health(), 2);
        let enemy = Enemy::new(4, EnemyKind::Heavy, Vec2::ZERO, 0);
        assert_eq!(enemy.health, 5);
        assert!(enemy.alive);
    }
}
