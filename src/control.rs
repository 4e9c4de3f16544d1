//! Run lifecycle
//!
//! [`Game`] is the host's only handle on the simulation. It owns the current
//! run, queues viewport changes until the next frame, throttles the HUD
//! snapshot and reports lifecycle changes as [`HostEvent`]s.
//!
//! ```text
//! Idle --start--> Running <--pause/resume--> Paused
//!                    |
//!                  death
//!                    v
//!                 GameOver --start--> Running
//! ```

use crate::consts::HUD_REFRESH;
use crate::prng::Mulberry32;
use crate::sim::{Difficulty, GameEvent, HudSnapshot, InputIntent, Mode, SimState, step};

/// Where the current run is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Nothing started yet
    Idle,
    Running,
    Paused,
    /// Last run ended; its final state stays visible
    GameOver,
}

/// Lifecycle notification for the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// A fresh run began
    Started,
    /// Running flag changed (pausing does not count)
    RunningChanged(bool),
    /// Run ended with this (rounded) score
    GameOver { score: u64 },
}

/// Result of one [`Game::advance`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No run active
    Idle,
    /// Run frozen, nothing stepped
    Paused,
    Stepped,
    /// This frame ended the run
    GameOver { score: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Viewport {
    width: f32,
    height: f32,
    dpr: f32,
}

impl Viewport {
    fn sanitized(width: f32, height: f32, dpr: f32) -> Self {
        let dim = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            width: dim(width),
            height: dim(height),
            dpr: if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 },
        }
    }
}

/// The game session
pub struct Game {
    state: SimState,
    phase: RunPhase,
    difficulty: Difficulty,
    mode: Mode,
    viewport: Viewport,
    pending_resize: Option<Viewport>,
    input_locked: bool,
    /// Source of run seeds
    seeds: Mulberry32,
    events: Vec<HostEvent>,
    hud: HudSnapshot,
    hud_timer: f32,
}

impl Game {
    /// New idle session. `seed` determines the sequence of run seeds.
    pub fn new(seed: u32, width: f32, height: f32, dpr: f32) -> Self {
        let viewport = Viewport::sanitized(width, height, dpr);
        let difficulty = Difficulty::default();
        let mode = Mode::default();
        let state = SimState::new(
            0,
            difficulty,
            mode,
            viewport.width,
            viewport.height,
            viewport.dpr,
        );
        let hud = state.hud();

        Self {
            state,
            phase: RunPhase::Idle,
            difficulty,
            mode,
            viewport,
            pending_resize: None,
            input_locked: false,
            seeds: Mulberry32::new(seed),
            events: Vec::new(),
            hud,
            hud_timer: 0.0,
        }
    }

    /// Start a fresh run, replacing any active one
    pub fn start(&mut self) -> bool {
        if !self.can_start() {
            return false;
        }
        let seed = self.seeds.next_raw();
        self.begin(seed);
        true
    }

    /// Start a run with an explicit seed
    pub fn start_with_seed(&mut self, seed: u32) -> bool {
        if !self.can_start() {
            return false;
        }
        self.begin(seed);
        true
    }

    /// Same as [`Game::start`]
    pub fn restart(&mut self) -> bool {
        self.start()
    }

    fn can_start(&self) -> bool {
        if self.input_locked {
            log::debug!("Start ignored: input locked");
        }
        !self.input_locked
    }

    fn begin(&mut self, seed: u32) {
        self.apply_pending_resize();
        let vp = self.viewport;
        self.state = SimState::new(
            seed,
            self.difficulty,
            self.mode,
            vp.width,
            vp.height,
            vp.dpr,
        );
        self.phase = RunPhase::Running;
        self.hud = self.state.hud();
        self.hud_timer = 0.0;

        self.events.push(HostEvent::RunningChanged(true));
        self.events.push(HostEvent::Started);
        log::info!(
            "Run started: {} / {} (seed {:#010x})",
            self.difficulty.as_str(),
            self.mode.as_str(),
            seed
        );
    }

    pub fn pause(&mut self) {
        if self.phase == RunPhase::Running {
            self.phase = RunPhase::Paused;
            log::info!("Paused at t={:.1}s", self.state.time);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == RunPhase::Paused {
            self.phase = RunPhase::Running;
            log::info!("Resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            RunPhase::Running => self.pause(),
            RunPhase::Paused => self.resume(),
            _ => {}
        }
    }

    /// A run is active (paused runs count)
    pub fn is_running(&self) -> bool {
        matches!(self.phase, RunPhase::Running | RunPhase::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == RunPhase::Paused
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Select the difficulty for the next run. Ignored mid-run.
    pub fn set_difficulty(&mut self, key: &str) -> bool {
        if self.is_running() {
            log::debug!("Difficulty change ignored mid-run");
            return false;
        }
        self.difficulty = Difficulty::from_key(key);
        true
    }

    /// Select the mode for the next run. Ignored mid-run.
    pub fn set_mode(&mut self, key: &str) -> bool {
        if self.is_running() {
            log::debug!("Mode change ignored mid-run");
            return false;
        }
        self.mode = Mode::from_key(key);
        true
    }

    /// While locked (a menu has focus) start/restart do nothing
    pub fn set_input_lock(&mut self, locked: bool) {
        self.input_locked = locked;
    }

    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    /// Queue a viewport change; applied before the next step
    pub fn resize(&mut self, width: f32, height: f32, dpr: f32) {
        self.pending_resize = Some(Viewport::sanitized(width, height, dpr));
    }

    fn apply_pending_resize(&mut self) {
        if let Some(vp) = self.pending_resize.take() {
            self.viewport = vp;
            self.state.resize(vp.width, vp.height, vp.dpr);
            log::debug!("Viewport {}x{} @{}x", vp.width, vp.height, vp.dpr);
        }
    }

    /// Drive one animation frame
    pub fn advance(&mut self, frame_dt: f32, input: &InputIntent) -> FrameOutcome {
        self.apply_pending_resize();

        match self.phase {
            RunPhase::Idle | RunPhase::GameOver => return FrameOutcome::Idle,
            RunPhase::Paused => return FrameOutcome::Paused,
            RunPhase::Running => {}
        }

        let dt = crate::clamp_dt(frame_dt);
        step(&mut self.state, input, dt);

        self.hud_timer += dt;
        if self.hud_timer >= HUD_REFRESH {
            self.hud = self.state.hud();
            self.hud_timer = 0.0;
        }

        if self.state.alive {
            return FrameOutcome::Stepped;
        }

        let score = self.state.display_score();
        self.phase = RunPhase::GameOver;
        self.hud = self.state.hud();
        self.events.push(HostEvent::GameOver { score });
        self.events.push(HostEvent::RunningChanged(false));
        log::info!("Game over: {} ({})", score, self.mode.as_str());
        FrameOutcome::GameOver { score }
    }

    /// Lifecycle events since the last call
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    /// Simulation events (sound cues) since the last call
    pub fn drain_game_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Read-only view for the renderer
    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// Seed of the current (or last) run
    pub fn seed(&self) -> u32 {
        self.state.seed
    }

    /// HUD numbers, refreshed at most every [`HUD_REFRESH`] seconds
    pub fn hud(&self) -> HudSnapshot {
        self.hud
    }
}
