//! Entity motion and off-screen culling
//!
//! Player bullets travel up at a fixed speed; enemies, enemy bullets and
//! power-ups fall. Culling here is the only way off-screen entities leave the
//! state. The player is positioned by external control and never moves here.

use glam::Vec2;

use super::state::{Bullet, EnemyKind, GameState};
use crate::consts::{BULLET_SIZE, ENEMY_BULLET_SIZE, POWERUP_SIZE};

/// Advance every moving entity one tick and drop those that left the screen
pub fn integrate(state: &mut GameState) {
    let bullet_step = state.settings.bullet_speed;
    let enemy_step = state.enemy_step();
    let enemy_bullet_step = state.settings.enemy_bullet_speed;
    let bottom = state.settings.screen_height;

    // Bullets exit through the top edge
    let bullet_half = BULLET_SIZE.1 / 2.0;
    for bullet in &mut state.bullets {
        bullet.pos.y -= bullet_step;
    }
    state.bullets.retain(|b| b.pos.y + bullet_half > 0.0);

    // Everything else exits through the bottom edge
    for enemy in &mut state.enemies {
        enemy.pos.y += enemy_step;
    }
    state
        .enemies
        .retain(|e| e.pos.y - e.size().y / 2.0 < bottom);

    let powerup_half = POWERUP_SIZE.1 / 2.0;
    for powerup in &mut state.powerups {
        powerup.pos.y += enemy_step;
    }
    state.powerups.retain(|p| p.pos.y - powerup_half < bottom);

    let enemy_bullet_half = ENEMY_BULLET_SIZE.1 / 2.0;
    for bullet in &mut state.enemy_bullets {
        bullet.pos.y += enemy_bullet_step;
    }
    state
        .enemy_bullets
        .retain(|b| b.pos.y - enemy_bullet_half < bottom);
}

/// Shooter enemies that are on screen count down and fire straight down
pub fn fire_enemy_weapons(state: &mut GameState) {
    let interval = state.settings.enemy_fire_interval_ticks();
    let mut muzzles: Vec<Vec2> = Vec::new();

    for enemy in &mut state.enemies {
        if enemy.kind != EnemyKind::Shooter || enemy.pos.y < 0.0 {
            continue;
        }
        enemy.fire_ticks = enemy.fire_ticks.saturating_sub(1);
        if enemy.fire_ticks == 0 {
            enemy.fire_ticks = interval;
            muzzles.push(enemy.pos + Vec2::new(0.0, enemy.size().y / 2.0));
        }
    }

    for pos in muzzles {
        let id = state.next_entity_id();
        state.enemy_bullets.push(Bullet::new(id, pos));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{Enemy, Powerup, PowerupKind};

    #[test]
    fn test_bullets_move_up_and_cull() {
        let mut state = GameState::new(1, Settings::default());
        state.bullets.push(Bullet::new(1, Vec2::new(100.0, 300.0)));
        state.bullets.push(Bullet::new(2, Vec2::new(100.0, 10.0)));

        integrate(&mut state);

        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.y, 285.0);
    }

    #[test]
    fn test_enemies_fall_with_difficulty() {
        let mut state = GameState::new(1, Settings::default());
        state
            .enemies
            .push(Enemy::new(1, EnemyKind::Light, Vec2::new(100.0, -50.0), 0));
        integrate(&mut state);
        assert_eq!(state.enemies[0].pos.y, -47.0);

        // Two difficulty steps: 2x speed
        state.time_ticks = 60 * 60;
        integrate(&mut state);
        assert_eq!(state.enemies[0].pos.y, -41.0);
    }

    #[test]
    fn test_entities_above_screen_are_kept() {
        let mut state = GameState::new(1, Settings::default());
        state
            .enemies
            .push(Enemy::new(1, EnemyKind::Heavy, Vec2::new(100.0, -500.0), 0));
        integrate(&mut state);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_bottom_cull() {
        let mut state = GameState::new(1, Settings::default());
        state
            .enemies
            .push(Enemy::new(1, EnemyKind::Light, Vec2::new(100.0, 829.0), 0));
        state.powerups.push(Powerup {
            id: 2,
            kind: PowerupKind::Shield,
            pos: Vec2::new(100.0, 808.0),
        });
        state.enemy_bullets.push(Bullet::new(3, Vec2::new(100.0, 790.0)));

        integrate(&mut state);

        assert!(state.enemies.is_empty());
        assert!(state.powerups.is_empty());
        assert_eq!(state.enemy_bullets.len(), 1);
    }

    #[test]
    fn test_shooters_fire_on_interval() {
        let mut state = GameState::new(1, Settings::default());
        let id = state.next_entity_id();
        state
            .enemies
            .push(Enemy::new(id, EnemyKind::Shooter, Vec2::new(100.0, 100.0), 2));
        let id = state.next_entity_id();
        state
            .enemies
            .push(Enemy::new(id, EnemyKind::Light, Vec2::new(200.0, 100.0), 1));

        fire_enemy_weapons(&mut state);
        assert!(state.enemy_bullets.is_empty());
        fire_enemy_weapons(&mut state);
        assert_eq!(state.enemy_bullets.len(), 1);
        assert_eq!(state.enemy_bullets[0].pos, Vec2::new(100.0, 125.0));
        assert_eq!(state.enemies[0].fire_ticks, 90);
    }

    #[test]
    fn test_offscreen_shooters_hold_fire() {
        let mut state = GameState::new(1, Settings::default());
        state
            .enemies
            .push(Enemy::new(1, EnemyKind::Shooter, Vec2::new(100.0, -100.0), 1));
        fire_enemy_weapons(&mut state);
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.enemies[0].fire_ticks, 1);
    }
}
