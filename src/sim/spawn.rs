//! Enemy wave and boss spawning
//!
//! Waves are fixed formations dropped in from above the screen once the
//! previous wave is gone. The boss runs on its own clock and replaces the
//! current wave when it arrives.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{Boss, Enemy, EnemyKind, GameEvent, GameState};
use crate::ms_to_ticks;

/// A fixed layout of enemy offsets (relative to the formation's top-left)
#[derive(Debug, Clone, Copy)]
pub struct Formation {
    pub name: &'static str,
    pub offsets: &'static [(f32, f32)],
}

impl Formation {
    /// Horizontal span of the offsets
    pub fn width(&self) -> f32 {
        let (min, max) = self
            .offsets
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &(x, _)| (lo.min(x), hi.max(x)));
        if min > max { 0.0 } else { max - min }
    }
}

/// Wide V
const V_SHAPE: &[(f32, f32)] = &[
    (0.0, 0.0),
    (50.0, 0.0),
    (150.0, 0.0),
    (250.0, 0.0),
    (300.0, 0.0),
    (50.0, 50.0),
    (100.0, 50.0),
    (200.0, 50.0),
    (250.0, 50.0),
    (150.0, 100.0),
];

/// Single row
const LINE: &[(f32, f32)] = &[
    (0.0, 0.0),
    (50.0, 0.0),
    (100.0, 0.0),
    (150.0, 0.0),
    (200.0, 0.0),
    (250.0, 0.0),
    (300.0, 0.0),
];

/// 3x7 block
const BLOCK: &[(f32, f32)] = &[
    (0.0, 0.0),
    (50.0, 0.0),
    (100.0, 0.0),
    (150.0, 0.0),
    (200.0, 0.0),
    (250.0, 0.0),
    (300.0, 0.0),
    (0.0, 50.0),
    (50.0, 50.0),
    (100.0, 50.0),
    (150.0, 50.0),
    (200.0, 50.0),
    (250.0, 50.0),
    (300.0, 50.0),
    (0.0, 100.0),
    (50.0, 100.0),
    (100.0, 100.0),
    (150.0, 100.0),
    (200.0, 100.0),
    (250.0, 100.0),
    (300.0, 100.0),
];

/// All formations a wave can pick from
pub const FORMATIONS: [Formation; 3] = [
    Formation {
        name: "v-shape",
        offsets: V_SHAPE,
    },
    Formation {
        name: "line",
        offsets: LINE,
    },
    Formation {
        name: "block",
        offsets: BLOCK,
    },
];

/// Formations enter this far above the top edge
const FORMATION_ENTRY_Y: f32 = -100.0;

/// Horizontal shift of each formation in a double wave
const DOUBLE_WAVE_SHIFT_X: f32 = 50.0;

/// The second formation of a double wave trails the first by this much
const DOUBLE_WAVE_TRAIL_Y: f32 = 150.0;

/// Run the spawn stage for one tick
pub fn update<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R, events: &mut Vec<GameEvent>) {
    update_boss(state, events);

    state.wave_timer = state.wave_timer.saturating_sub(1);
    if state.wave_timer == 0 && !state.boss_active() && state.enemies.is_empty() {
        spawn_wave(state, rng, events, &FORMATIONS);
    }
}

/// Probability of a heavy enemy (cumulative with the shooter chance)
pub fn heavy_chance(state: &GameState) -> f32 {
    let s = &state.settings;
    let ramp = ((state.survival_secs() - s.heavy_ramp_start_secs) / s.heavy_ramp_secs).clamp(0.0, 1.0);
    s.heavy_chance_start + ramp * (s.heavy_chance_end - s.heavy_chance_start)
}

/// Weighted enemy type draw
pub fn roll_enemy_kind<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> EnemyKind {
    let roll: f32 = rng.random();
    if roll < state.settings.shooter_chance {
        EnemyKind::Shooter
    } else if roll < heavy_chance(state) {
        EnemyKind::Heavy
    } else {
        EnemyKind::Light
    }
}

/// Spawn one or two formations and rearm the wave timer
pub fn spawn_wave<R: Rng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
    formations: &[Formation],
) {
    let center_x = state.settings.screen_width / 2.0;
    let double = state.survival_secs() >= state.settings.second_formation_secs;

    let placements = if double {
        vec![
            Vec2::new(center_x - DOUBLE_WAVE_SHIFT_X, 0.0),
            Vec2::new(center_x + DOUBLE_WAVE_SHIFT_X, -DOUBLE_WAVE_TRAIL_Y),
        ]
    } else {
        vec![Vec2::new(center_x, 0.0)]
    };

    let mut spawned = 0u8;
    for anchor in placements {
        let Some(formation) = formations.choose(rng) else {
            continue;
        };
        if formation.offsets.is_empty() {
            continue;
        }
        spawn_formation(state, rng, formation, anchor);
        spawned += 1;
    }

    if spawned == 0 {
        return;
    }

    state.wave_count += 1;
    let jitter = state.settings.wave_jitter;
    let factor = 1.0 - jitter + rng.random::<f32>() * 2.0 * jitter;
    state.wave_timer = ms_to_ticks(state.settings.wave_interval_ms * factor);

    log::info!(
        "Wave {}: {} formation(s) at {:.1}s, next in {} ticks",
        state.wave_count,
        spawned,
        state.survival_secs(),
        state.wave_timer
    );
    events.push(GameEvent::WaveSpawned {
        wave: state.wave_count,
        formations: spawned,
    });
}

/// Place one formation horizontally centered on `anchor.x`
fn spawn_formation<R: Rng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    formation: &Formation,
    anchor: Vec2,
) {
    let left = anchor.x - formation.width() / 2.0;
    let fire_ticks = state.settings.enemy_fire_interval_ticks();

    for &(dx, dy) in formation.offsets {
        let kind = roll_enemy_kind(state, rng);
        let pos = Vec2::new(left + dx, FORMATION_ENTRY_Y + anchor.y + dy);
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, kind, pos, fire_ticks));
    }
}

/// Boss clock: every interval, spawn a boss if none is present
fn update_boss(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.boss_countdown = state.boss_countdown.saturating_sub(1);
    if state.boss_countdown > 0 {
        return;
    }
    state.boss_countdown = state.settings.boss_interval_ticks();

    if state.boss.is_some() {
        return;
    }
    spawn_boss(state, events);
}

/// Spawn the boss and clear the active wave
pub fn spawn_boss(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let cleared = state.enemies.len();
    state.enemies.clear();
    state.boss = Some(Boss {
        pos: state.settings.boss_position(),
        health: state.settings.boss_health,
        alive: true,
        size: state.settings.boss_size(),
    });

    log::info!(
        "Boss spawned at {:.1}s ({} enemies cleared)",
        state.survival_secs(),
        cleared
    );
    events.push(GameEvent::BossSpawned);
}
