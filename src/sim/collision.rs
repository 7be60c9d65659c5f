//! Collision detection and resolution
//!
//! Every entity collides as an axis-aligned box centered on its position,
//! shrunk by the configured hitbox scale. Two boxes overlap when their centers
//! are closer than the sum of their scaled half-extents on both axes.
//!
//! Resolution runs in a fixed order each tick:
//! 1. player bullets vs enemies (first overlap in id order takes the hit)
//! 2. player bullets vs boss (only for bullets that hit no enemy)
//! 3. player vs power-ups
//! 4. player vs enemies/boss (fatal, skipped while invincible)
//! 5. player vs enemy bullets (fatal, skipped while invincible)
//!
//! Bullets are judged against the enemies and boss present when resolution
//! starts, so a target killed mid-pass keeps absorbing shots for the rest of
//! the tick. Removals are applied once per collection after all hits are
//! known, before the player checks run.

use glam::Vec2;
use rand::Rng;

use super::effects;
use super::state::{GameEvent, GameState, Player, Powerup, PowerupKind};
use crate::consts::{BULLET_SIZE, ENEMY_BULLET_SIZE, POWERUP_SIZE};

/// A scaled axis-aligned hitbox
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Hitbox {
    /// Build a hitbox from a visual size and the scale factor
    pub fn new(center: Vec2, size: Vec2, scale: f32) -> Self {
        Self {
            center,
            half_extents: size * 0.5 * scale,
        }
    }

    /// Check overlap with another hitbox
    #[inline]
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        let reach = self.half_extents + other.half_extents;
        let delta = (self.center - other.center).abs();
        delta.x < reach.x && delta.y < reach.y
    }
}

/// Overlap test for two entities given their visual sizes
#[inline]
pub fn overlaps(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2, scale: f32) -> bool {
    Hitbox::new(a_pos, a_size, scale).overlaps(&Hitbox::new(b_pos, b_size, scale))
}

/// Resolve all collisions for this tick
pub fn resolve<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R, events: &mut Vec<GameEvent>) {
    state.player_hit = false;

    resolve_bullets(state, rng, events);
    resolve_pickups(state, events);
    resolve_player_hits(state);
}

/// Steps 1-2: player bullets against enemies, then the boss
fn resolve_bullets<R: Rng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    let scale = state.settings.hitbox_scale;
    let bullet_size = Vec2::from(BULLET_SIZE);
    let secs = state.survival_secs();
    let mut drops: Vec<(PowerupKind, Vec2)> = Vec::new();

    for bullet in state.bullets.iter_mut() {
        if !bullet.alive {
            continue;
        }

        // Enemies killed earlier this tick still absorb shots
        let target = state
            .enemies
            .iter_mut()
            .find(|e| overlaps(bullet.pos, bullet_size, e.pos, e.size(), scale));

        if let Some(enemy) = target {
            bullet.alive = false;
            enemy.health -= 1;
            if enemy.alive && enemy.health <= 0 {
                enemy.alive = false;
                state.score += enemy.kind.score(&state.settings);
                events.push(GameEvent::EnemyDestroyed {
                    id: enemy.id,
                    kind: enemy.kind,
                });

                if rng.random_bool(f64::from(state.settings.drop_chance.clamp(0.0, 1.0))) {
                    let kind = if rng.random_bool(0.5) {
                        PowerupKind::Shield
                    } else {
                        PowerupKind::Speed
                    };
                    drops.push((kind, enemy.pos));
                }
            }
            continue;
        }

        if let Some(boss) = state.boss.as_mut() {
            if overlaps(bullet.pos, bullet_size, boss.pos, boss.size, scale) {
                bullet.alive = false;
                boss.health -= 1;
                if boss.alive && boss.health <= 0 {
                    boss.alive = false;
                    state.score += state.settings.boss_score;
                    events.push(GameEvent::BossDefeated);
                    log::info!("Boss defeated at {:.1}s", secs);
                }
            }
        }
    }

    state.bullets.retain(|b| b.alive);
    state.enemies.retain(|e| e.alive);
    if state.boss.as_ref().is_some_and(|b| !b.alive) {
        state.boss = None;
    }

    for (kind, pos) in drops {
        let id = state.next_entity_id();
        log::debug!("Enemy dropped {:?} power-up (id {})", kind, id);
        state.powerups.push(Powerup { id, kind, pos });
        events.push(GameEvent::PowerupDropped { kind });
    }
}

/// Step 3: player collects overlapping power-ups
fn resolve_pickups(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let scale = state.settings.hitbox_scale;
    let player_pos = state.player.pos;
    let powerup_size = Vec2::from(POWERUP_SIZE);

    let (collected, remaining): (Vec<Powerup>, Vec<Powerup>) = std::mem::take(&mut state.powerups)
        .into_iter()
        .partition(|p| overlaps(player_pos, Player::size(), p.pos, powerup_size, scale));
    state.powerups = remaining;

    for powerup in collected {
        log::debug!("Collected {:?} power-up (id {})", powerup.kind, powerup.id);
        effects::apply_pickup(state, powerup.kind);
        events.push(GameEvent::PowerupCollected {
            kind: powerup.kind,
        });
    }
}

/// Steps 4-5: anything hostile touching an unshielded player is fatal
fn resolve_player_hits(state: &mut GameState) {
    if state.player.invincible {
        return;
    }

    let scale = state.settings.hitbox_scale;
    let player_pos = state.player.pos;
    let player_size = Player::size();

    let touched_enemy = state
        .enemies
        .iter()
        .any(|e| overlaps(player_pos, player_size, e.pos, e.size(), scale));
    let touched_boss = state
        .boss
        .as_ref()
        .is_some_and(|b| overlaps(player_pos, player_size, b.pos, b.size, scale));
    let shot = state.enemy_bullets.iter().any(|b| {
        overlaps(
            player_pos,
            player_size,
            b.pos,
            Vec2::from(ENEMY_BULLET_SIZE),
            scale,
        )
    });

    if touched_enemy || touched_boss || shot {
        state.player_hit = true;
    }
}
