//! Sky Raid headless runner
//!
//! Drives a run with a simple sweeping autopilot and logs the outcome. Useful
//! for balance smoke tests and determinism checks (same seed, same result).
//!
//! Usage: sky-raid [--seed N] [--ticks N] [--settings FILE] [--realtime] [--json]

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;

use sky_raid::consts::TICK_HZ;
use sky_raid::sim::GameEvent;
use sky_raid::{Settings, TickScheduler};

/// Command-line options
#[derive(Debug, Parser)]
#[command(name = "sky-raid", version, about = "Headless Sky Raid simulation runner")]
struct Options {
    /// Run seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Stop after this many ticks (default: ten minutes of play)
    #[arg(long = "ticks", default_value_t = 10 * 60 * TICK_HZ as u64)]
    max_ticks: u64,

    /// Balance settings JSON file
    #[arg(long = "settings")]
    settings_path: Option<PathBuf>,

    /// Pace ticks at 60 Hz instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

/// Sweep left and right along the bottom of the screen
fn autopilot_target(tick: u64, settings: &Settings) -> Vec2 {
    let t = tick as f32 / TICK_HZ as f32;
    let x = settings.screen_width / 2.0 + settings.screen_width * 0.4 * (t * 0.8).sin();
    Vec2::new(x, settings.screen_height - 100.0)
}

fn main() {
    env_logger::init();
    let options = Options::parse();

    let settings = match &options.settings_path {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    log::info!("Sky Raid (headless) starting with seed {}", options.seed);

    let mut scheduler = TickScheduler::new(options.seed, settings.clone());
    let input = scheduler.input_handle();
    let mut shots = 0u64;
    let mut kills = 0u64;

    let mut on_tick = |_: &sky_raid::sim::GameState, report: &sky_raid::TickReport| {
        for event in &report.events {
            match event {
                GameEvent::BulletFired => shots += 1,
                GameEvent::EnemyDestroyed { .. } => kills += 1,
                _ => {}
            }
        }
        input.move_player(autopilot_target(report.tick, &settings));
    };

    let ran = if options.realtime {
        scheduler.run_realtime(options.max_ticks, &mut on_tick)
    } else {
        scheduler.run_headless(options.max_ticks, &mut on_tick)
    };

    let state = scheduler.state();
    log::info!(
        "Finished after {} ticks: survived {:.1}s, wave {}, score {}, {} shots, {} kills{}",
        ran,
        state.survival_secs(),
        state.wave_count,
        state.score,
        shots,
        kills,
        if state.is_terminal() { " (player died)" } else { "" }
    );

    if options.json {
        match scheduler.snapshot().to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    }
}
