//! Terminal outcome detection

use super::state::{GameEvent, GameState};

/// Turn a collision hit into player death
///
/// Returns true on the tick the run ends.
pub fn update(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if !state.player_hit || !state.player.alive {
        return false;
    }

    state.player.alive = false;
    state.refresh_phase();
    events.push(GameEvent::PlayerDied);
    log::info!(
        "Player destroyed at {:.1}s (wave {}, score {})",
        state.survival_secs(),
        state.wave_count,
        state.score
    );
    true
}
