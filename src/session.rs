//! The session: top-level mode machine and the per-tick frame driver.
//!
//! `Session` is a plain value with a single mutation point: [`Session::tick`]
//! applies the frame's input events through a total transition table, then
//! (in Playing only) advances physics, the pipe track, collision and the
//! score, in that order. The hosting loop decides the cadence; nothing in
//! here blocks, draws or touches the disk. Side effects are surfaced as
//! [`Cue`]s and a `finalized` flag in the returned [`TickReport`].

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bird::Bird;
use crate::collision;
use crate::config::{ConfigError, GameConfig};
use crate::score::Scoreboard;
use crate::track::{Pipe, Track};

/// Top-level mode. Simulation ticks run only in `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Playing,
    Paused,
    GameOver,
    Settings,
    Leaderboard,
    Credits,
}

/// Abstract input events fed by the shell. Pairs not listed in the
/// transition table are no-ops, never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Start,
    Flap,
    PauseToggle,
    Restart,
    NavigateTo(Mode),
    Return,
}

/// Audio cue notifications emitted by the simulation. Whether anything is
/// audible is the audio collaborator's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Flap,
    Score,
    Collision,
}

/// What one frame produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub cues: Vec<Cue>,
    /// Set when this frame ended the run; carries the final score. The
    /// shell persists the scoreboard when it sees this.
    pub finalized: Option<u32>,
}

/// Immutable per-frame read for the renderer.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub mode: Mode,
    pub tick: u64,
    pub score: u32,
    pub best: u32,
    pub bird: &'a Bird,
    pub pipes: &'a [Pipe],
    pub scoreboard: &'a Scoreboard,
    pub config: &'a GameConfig,
}

/// One playthrough plus the menus around it.
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    mode: Mode,
    tick: u64,
    score: u32,
    bird: Bird,
    track: Track,
    scoreboard: Scoreboard,
    player: String,
    rng: StdRng,
}

impl Session {
    /// Validates the configuration up front; no tick-time failures after
    /// this succeeds.
    pub fn new(
        config: GameConfig,
        scoreboard: Scoreboard,
        player: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Self::build(config, scoreboard, player.into(), StdRng::from_entropy())
    }

    /// Deterministic construction for tests and replays.
    pub fn with_seed(
        config: GameConfig,
        scoreboard: Scoreboard,
        player: impl Into<String>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::build(config, scoreboard, player.into(), StdRng::seed_from_u64(seed))
    }

    fn build(
        config: GameConfig,
        scoreboard: Scoreboard,
        player: String,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let bird = Bird::new(&config);
        Ok(Self {
            config,
            mode: Mode::Menu,
            tick: 0,
            score: 0,
            bird,
            track: Track::new(),
            scoreboard,
            player,
            rng,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            mode: self.mode,
            tick: self.tick,
            score: self.score,
            best: self.scoreboard.best(),
            bird: &self.bird,
            pipes: &self.track.pipes,
            scoreboard: &self.scoreboard,
            config: &self.config,
        }
    }

    /// One frame: apply this frame's events, then advance the simulation
    /// if we are Playing. Pause takes effect only here, at the boundary.
    pub fn tick(&mut self, inputs: &[InputEvent]) -> TickReport {
        let mut report = TickReport::default();
        for &ev in inputs {
            self.apply(ev, &mut report);
        }
        if self.mode == Mode::Playing {
            self.step(&mut report);
        }
        report
    }

    /// Total transition table. Anything not matched is a deliberate no-op.
    fn apply(&mut self, ev: InputEvent, report: &mut TickReport) {
        use InputEvent::*;
        match (self.mode, ev) {
            (Mode::Menu, Start) => {
                self.reset_run();
                self.mode = Mode::Playing;
            }
            (Mode::Menu, NavigateTo(to))
                if matches!(to, Mode::Settings | Mode::Leaderboard | Mode::Credits) =>
            {
                self.mode = to;
            }
            (Mode::Playing, Flap) => {
                self.bird.flap(self.config.flap_impulse);
                report.cues.push(Cue::Flap);
            }
            (Mode::Playing, PauseToggle) => self.mode = Mode::Paused,
            (Mode::Paused, PauseToggle) => self.mode = Mode::Playing,
            (Mode::GameOver, Restart) => {
                self.reset_run();
                self.mode = Mode::Playing;
            }
            (Mode::GameOver, Return) => {
                self.reset_run();
                self.mode = Mode::Menu;
            }
            (Mode::Settings | Mode::Leaderboard | Mode::Credits, Return) => {
                self.mode = Mode::Menu;
            }
            _ => {}
        }
    }

    /// One simulation step. Ordering is load-bearing: physics, then the
    /// track, then collision, then the committed transition, so a frame
    /// never observes "collided" and "still playing" together.
    fn step(&mut self, report: &mut TickReport) {
        self.tick += 1;

        self.bird.apply_gravity(self.config.gravity);
        self.bird.integrate();

        self.track.maybe_spawn(&self.config, self.tick, &mut self.rng);
        self.track.advance(self.config.pipe_speed);
        let cleared = self
            .track
            .clear_passed(self.bird.x, self.config.pipe_w);
        self.score += cleared;
        for _ in 0..cleared {
            report.cues.push(Cue::Score);
        }
        self.track.prune(self.config.pipe_w);

        // Any collision kind is terminal for the run.
        if collision::check(&self.bird, &self.track.pipes, &self.config).is_some() {
            self.scoreboard
                .record(&self.player, self.score, self.config.record);
            report.cues.push(Cue::Collision);
            report.finalized = Some(self.score);
            self.mode = Mode::GameOver;
        }
    }

    /// Discard the prior run entirely; no partial carry-over.
    fn reset_run(&mut self) {
        self.tick = 0;
        self.score = 0;
        self.bird = Bird::new(&self.config);
        self.track = Track::new();
    }
}
