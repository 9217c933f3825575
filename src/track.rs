//! The pipe track: an ordered queue of gap obstacles scrolling left, plus
//! the random gap generator feeding it.

use rand::Rng;

use crate::config::{GameConfig, SpawnPolicy};

/// One pipe pair. The gap spans `[gap_top, gap_top + gap_h)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub x: f64,
    pub gap_top: f64,
    /// Flips false -> true exactly once, when the trailing edge passes the
    /// bird's column.
    pub cleared: bool,
}

/// Vertical offset for the next gap, drawn uniformly so the gap lies fully
/// within `[margin_top, field_h - margin_bottom - gap_h]`. `margin_bottom`
/// here is measured from the bottom of the playable band, so callers fold
/// the ground height into it. Always in range for a validated config.
pub fn next_gap_top<R: Rng>(
    rng: &mut R,
    field_h: f64,
    gap_h: f64,
    margin_top: f64,
    margin_bottom: f64,
) -> f64 {
    let max = field_h - margin_bottom - gap_h;
    rng.gen_range(margin_top..=max)
}

/// Obstacle queue, sorted by ascending x at all times. Spawns append at the
/// right edge and advancing shifts everything uniformly, so the order only
/// breaks if a core bug writes through it; `restore_order` self-heals that
/// in release and asserts in debug.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub pipes: Vec<Pipe>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift every pipe left by `dx`.
    pub fn advance(&mut self, dx: f64) {
        for p in &mut self.pipes {
            p.x -= dx;
        }
    }

    /// Spawn a pipe at the right edge when the configured policy says so.
    pub fn maybe_spawn<R: Rng>(&mut self, cfg: &GameConfig, tick: u64, rng: &mut R) {
        let due = match cfg.spawn {
            SpawnPolicy::EveryTicks(n) => n > 0 && tick % n == 0,
            SpawnPolicy::SingleAhead => self
                .pipes
                .last()
                .is_none_or(|p| p.x < cfg.field_w / 2.0),
        };
        if due {
            let gap_top = next_gap_top(
                rng,
                cfg.field_h,
                cfg.gap_h,
                cfg.gap_margin_top,
                cfg.gap_margin_bottom + cfg.ground_h,
            );
            self.pipes.push(Pipe {
                x: cfg.field_w,
                gap_top,
                cleared: false,
            });
            self.restore_order();
        }
    }

    /// Flip `cleared` on pipes whose trailing edge has passed `bird_x`,
    /// returning how many flipped this tick.
    pub fn clear_passed(&mut self, bird_x: f64, pipe_w: f64) -> u32 {
        let mut n = 0;
        for p in &mut self.pipes {
            if !p.cleared && p.x + pipe_w < bird_x {
                p.cleared = true;
                n += 1;
            }
        }
        n
    }

    /// Drop pipes whose trailing edge has reached the left boundary.
    pub fn prune(&mut self, pipe_w: f64) {
        self.pipes.retain(|p| p.x + pipe_w > 0.0);
    }

    fn restore_order(&mut self) {
        let sorted = self.pipes.windows(2).all(|w| w[0].x <= w[1].x);
        debug_assert!(sorted, "pipe track out of order");
        if !sorted {
            self.pipes.sort_by(|a, b| a.x.total_cmp(&b.x));
        }
    }
}
