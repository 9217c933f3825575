//! Discrete per-tick collision test: AABB vs gap, then field bounds.
//! Pure and deterministic; the session treats any hit as terminal.

use crate::bird::Bird;
use crate::config::GameConfig;
use crate::track::Pipe;

/// Which rule fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Overlapping a pipe outside its gap.
    Obstacle,
    /// Above the ceiling or into the ground.
    OutOfBounds,
}

/// Sample the bird against every pipe and the field bounds. Obstacle hits
/// take precedence over bounds hits; partial overlap counts (no swept
/// test, displacement per tick is bounded well below the pipe width).
pub fn check(bird: &Bird, pipes: &[Pipe], cfg: &GameConfig) -> Option<Collision> {
    for p in pipes {
        let overlaps_x = bird.right() > p.x && bird.left() < p.x + cfg.pipe_w;
        if overlaps_x && (bird.top() < p.gap_top || bird.bottom() > p.gap_top + cfg.gap_h) {
            return Some(Collision::Obstacle);
        }
    }
    if bird.top() < 0.0 || bird.bottom() > cfg.sky_h() {
        return Some(Collision::OutOfBounds);
    }
    None
}
