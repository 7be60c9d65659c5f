//! Read-only per-tick view of the simulation for renderers and UI

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{EnemyKind, EntityId, GamePhase, GameState, PowerupKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub alive: bool,
    pub invincible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub health: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub id: EntityId,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerupView {
    pub id: EntityId,
    pub kind: PowerupKind,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossView {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub max_health: i32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub survival_secs: f32,
    pub wave: u32,
    pub score: u64,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub enemy_bullets: Vec<BulletView>,
    pub powerups: Vec<PowerupView>,
    pub boss: Option<BossView>,
    /// Remaining shield time (seconds)
    pub shield_secs: f32,
    /// Remaining fire-rate boost time (seconds)
    pub boost_secs: f32,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let secs = |ticks: u32| ticks as f32 * crate::consts::SIM_DT;
        Self {
            tick: state.time_ticks,
            survival_secs: state.survival_secs(),
            wave: state.wave_count,
            score: state.score,
            phase: state.phase,
            player: PlayerView {
                pos: state.player.pos,
                alive: state.player.alive,
                invincible: state.player.invincible,
            },
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    kind: e.kind,
                    pos: e.pos,
                    health: e.health,
                })
                .collect(),
            bullets: state
                .bullets
                .iter()
                .map(|b| BulletView { id: b.id, pos: b.pos })
                .collect(),
            enemy_bullets: state
                .enemy_bullets
                .iter()
                .map(|b| BulletView { id: b.id, pos: b.pos })
                .collect(),
            powerups: state
                .powerups
                .iter()
                .map(|p| PowerupView {
                    id: p.id,
                    kind: p.kind,
                    pos: p.pos,
                })
                .collect(),
            boss: state.boss.as_ref().map(|b| BossView {
                pos: b.pos,
                size: b.size,
                health: b.health,
                max_health: state.settings.boss_health,
            }),
            shield_secs: secs(state.shield_ticks),
            boost_secs: secs(state.boost_ticks),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
