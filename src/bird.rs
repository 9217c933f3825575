//! The player-controlled body: vertical physics plus a couple of purely
//! cosmetic values (sprite frame, tilt) derived from it.

use crate::config::GameConfig;

/// Axis-aligned bird body. `x` and the size never change during play.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    /// Rows per tick, positive = downward.
    pub velocity: f64,
    pub width: f64,
    pub height: f64,
}

impl Bird {
    /// A bird at the session's starting position: fixed column, vertically
    /// centered in the playable band, at rest.
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            x: cfg.bird_x,
            y: cfg.sky_h() / 2.0,
            velocity: 0.0,
            width: cfg.bird_w,
            height: cfg.bird_h,
        }
    }

    pub fn apply_gravity(&mut self, g: f64) {
        self.velocity += g;
    }

    pub fn integrate(&mut self) {
        self.y += self.velocity;
    }

    /// Instantaneous upward kick: velocity is set, not accumulated.
    pub fn flap(&mut self, impulse: f64) {
        self.velocity = impulse;
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Wing animation frame (0..3), a pure function of the tick counter.
    pub fn sprite_frame(tick: u64) -> usize {
        (tick / 5 % 3) as usize
    }

    /// Visual pitch in `-1.0..=1.0` (nose up when rising). No feedback
    /// into physics.
    pub fn tilt(&self, cfg: &GameConfig) -> f64 {
        (self.velocity / -cfg.flap_impulse).clamp(-1.0, 1.0)
    }
}
