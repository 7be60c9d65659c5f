//! Fixed-rate tick driver
//!
//! The scheduler owns the committed [`GameState`] and the run RNG. External
//! input (player control from a touch/drag handler) never touches the state
//! directly: it is posted through an [`InputHandle`] and drained in arrival
//! order at the start of the next tick, so every mutation happens inside one
//! serialized step.
//!
//! Each step uses the nominal 1/60 s; a step that starts late is not followed
//! by catch-up steps.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::TICK_HZ;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Snapshot, TickInput, tick};

/// Commands merged into the simulation at tick boundaries
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Move the player (pre-clamped by the caller; clamped again here)
    MovePlayer(Vec2),
}

/// Cloneable sender for external input
#[derive(Debug, Clone)]
pub struct InputHandle {
    tx: Sender<Command>,
}

impl InputHandle {
    /// Queue a command for the next tick
    ///
    /// Returns false if the scheduler has been dropped.
    pub fn send(&self, command: Command) -> bool {
        self.tx.send(command).is_ok()
    }

    pub fn move_player(&self, pos: Vec2) -> bool {
        self.send(Command::MovePlayer(pos))
    }
}

/// Result of one executed tick
#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick: u64,
    pub events: Vec<GameEvent>,
}

impl TickReport {
    /// True if the player fired this tick (audio cue)
    pub fn bullet_fired(&self) -> bool {
        self.events.contains(&GameEvent::BulletFired)
    }

    /// True on the tick the run ended (UI transition)
    pub fn player_died(&self) -> bool {
        self.events.contains(&GameEvent::PlayerDied)
    }
}

/// Drives the step pipeline for one run
pub struct TickScheduler {
    state: GameState,
    rng: Pcg32,
    tx: Sender<Command>,
    rx: Receiver<Command>,
}

impl TickScheduler {
    /// Nominal period between ticks
    pub const PERIOD: Duration = Duration::from_nanos(1_000_000_000 / TICK_HZ as u64);

    /// Start a new run
    ///
    /// Settings that fail validation are replaced by the defaults.
    pub fn new(seed: u64, settings: Settings) -> Self {
        let (tx, rx) = mpsc::channel();
        Self::bind(GameState::new(seed, settings.or_default()), tx, rx)
    }

    fn bind(state: GameState, tx: Sender<Command>, rx: Receiver<Command>) -> Self {
        log::info!("Run started with seed: {}", state.seed);
        Self {
            rng: Pcg32::seed_from_u64(state.seed),
            state,
            tx,
            rx,
        }
    }

    /// Handle for posting external input
    pub fn input_handle(&self) -> InputHandle {
        InputHandle {
            tx: self.tx.clone(),
        }
    }

    /// Committed state (read-only)
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// True once the player has died; no further ticks run
    pub fn is_stopped(&self) -> bool {
        self.state.is_terminal()
    }

    /// Run exactly one step
    ///
    /// Returns `None` without touching the state once the run is over.
    pub fn step(&mut self) -> Option<TickReport> {
        if self.is_stopped() {
            // Input posted after death is discarded
            while self.rx.try_recv().is_ok() {}
            return None;
        }

        let input = self.drain_input();
        let events = tick(&mut self.state, &input, &mut self.rng);
        Some(TickReport {
            tick: self.state.time_ticks,
            events,
        })
    }

    /// Collapse queued commands into this tick's input (latest position wins)
    fn drain_input(&mut self) -> TickInput {
        let mut input = TickInput::default();
        while let Ok(command) = self.rx.try_recv() {
            match command {
                Command::MovePlayer(pos) => input.player_pos = Some(pos),
            }
        }
        input
    }

    /// Run ticks as fast as possible until death or `max_ticks`
    pub fn run_headless(&mut self, max_ticks: u64, mut on_tick: impl FnMut(&GameState, &TickReport)) -> u64 {
        let mut ran = 0;
        while ran < max_ticks {
            let Some(report) = self.step() else {
                break;
            };
            ran += 1;
            on_tick(&self.state, &report);
        }
        ran
    }

    /// Run ticks paced at the nominal period until death or `max_ticks`
    ///
    /// A tick that starts late runs once; periods missed meanwhile are
    /// dropped rather than queued.
    pub fn run_realtime(&mut self, max_ticks: u64, mut on_tick: impl FnMut(&GameState, &TickReport)) -> u64 {
        let mut ran = 0;
        let mut deadline = Instant::now();
        while ran < max_ticks {
            let now = Instant::now();
            if now < deadline {
                std::thread::sleep(deadline - now);
            } else if now > deadline {
                log::debug!("Tick {} late by {:?}", ran, now - deadline);
                // Rebase so the next tick waits a full period
                deadline = now;
            }

            let Some(report) = self.step() else {
                break;
            };
            ran += 1;
            on_tick(&self.state, &report);
            deadline += Self::PERIOD;
        }
        ran
    }

    /// Discard this run and start a fresh one
    ///
    /// The returned scheduler is bound to a newly constructed state; input
    /// handles obtained earlier keep working.
    pub fn restart(self, seed: u64) -> Self {
        let settings = self.state.settings.clone();
        log::info!(
            "Restarting (previous run: {:.1}s, score {})",
            self.state.survival_secs(),
            self.state.score
        );
        // Drop input aimed at the old run
        while self.rx.try_recv().is_ok() {}
        Self::bind(GameState::new(seed, settings), self.tx, self.rx)
    }
}
