//! Timed power-up effects and player auto-fire
//!
//! Both buffs are tick-counted: a pickup sets the remaining duration to the
//! full value and [`update`] counts it down once per tick. A pickup while the
//! same buff is running restarts the countdown rather than stacking.

use super::state::{Bullet, GameEvent, GameState, PowerupKind};

/// Apply a collected power-up
pub fn apply_pickup(state: &mut GameState, kind: PowerupKind) {
    match kind {
        PowerupKind::Shield => {
            state.player.invincible = true;
            state.shield_ticks = state.settings.shield_ticks();
        }
        PowerupKind::Speed => {
            state.boost_ticks = state.settings.boost_ticks();
            // Boosted rate takes over now, not after the stale base countdown
            let boosted = state.settings.boosted_fire_interval_ticks();
            state.fire_interval = boosted;
            state.fire_countdown = boosted;
        }
    }
}

/// Count down active buffs, then run the auto-fire countdown
pub fn update(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.shield_ticks > 0 {
        state.shield_ticks -= 1;
        if state.shield_ticks == 0 {
            state.player.invincible = false;
            events.push(GameEvent::ShieldExpired);
        }
    }

    if state.boost_ticks > 0 {
        state.boost_ticks -= 1;
        if state.boost_ticks == 0 {
            events.push(GameEvent::BoostExpired);
        }
    }

    state.fire_interval = if state.boost_ticks > 0 {
        state.settings.boosted_fire_interval_ticks()
    } else {
        state.settings.fire_interval_ticks()
    };

    auto_fire(state, events);
}

/// Self-scheduling shot countdown: fire at zero, then rearm
fn auto_fire(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.fire_countdown = state.fire_countdown.saturating_sub(1);
    if state.fire_countdown > 0 {
        return;
    }

    let id = state.next_entity_id();
    state.bullets.push(Bullet::new(id, state.player.pos));
    state.fire_countdown = state.fire_interval;
    events.push(GameEvent::BulletFired);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn run_ticks(state: &mut GameState, n: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..n {
            update(state, &mut events);
        }
        events
    }

    fn shots(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::BulletFired))
            .count()
    }

    #[test]
    fn test_base_fire_rate() {
        let mut state = GameState::new(1, Settings::default());
        // 12 ticks per shot at 200 ms
        let events = run_ticks(&mut state, 11);
        assert_eq!(shots(&events), 0);
        let events = run_ticks(&mut state, 1);
        assert_eq!(shots(&events), 1);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos, state.player.pos);
        let events = run_ticks(&mut state, 24);
        assert_eq!(shots(&events), 2);
    }

    #[test]
    fn test_shield_expires_after_duration() {
        let mut state = GameState::new(1, Settings::default());
        apply_pickup(&mut state, PowerupKind::Shield);
        assert!(state.player.invincible);

        // 10 s at 60 Hz
        let events = run_ticks(&mut state, 599);
        assert!(state.player.invincible);
        assert!(!events.contains(&GameEvent::ShieldExpired));

        let events = run_ticks(&mut state, 1);
        assert!(!state.player.invincible);
        assert!(events.contains(&GameEvent::ShieldExpired));
    }

    #[test]
    fn test_second_shield_restarts_countdown() {
        let mut state = GameState::new(1, Settings::default());
        apply_pickup(&mut state, PowerupKind::Shield);
        run_ticks(&mut state, 400);
        apply_pickup(&mut state, PowerupKind::Shield);
        run_ticks(&mut state, 400);
        assert!(state.player.invincible);
        run_ticks(&mut state, 200);
        assert!(!state.player.invincible);
    }

    #[test]
    fn test_speed_pickup_overrides_stale_countdown() {
        let mut state = GameState::new(1, Settings::default());
        // 150 ms left on the base countdown
        state.fire_countdown = 9;
        apply_pickup(&mut state, PowerupKind::Speed);
        assert_eq!(state.fire_countdown, 6);

        let events = run_ticks(&mut state, 5);
        assert_eq!(shots(&events), 0);
        let events = run_ticks(&mut state, 1);
        assert_eq!(shots(&events), 1);
        // Rearmed with the boosted interval
        assert_eq!(state.fire_countdown, 6);
        assert_eq!(state.fire_interval, 6);
    }

    #[test]
    fn test_boost_reverts_to_base_rate() {
        let mut state = GameState::new(1, Settings::default());
        apply_pickup(&mut state, PowerupKind::Speed);
        let events = run_ticks(&mut state, 600);
        assert_eq!(state.boost_ticks, 0);
        assert!(events.contains(&GameEvent::BoostExpired));
        assert_eq!(state.fire_interval, 12);
        // 600 ticks at 6 ticks/shot
        assert_eq!(shots(&events), 100);
    }
}
