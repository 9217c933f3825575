//! Session configuration: physics constants, field geometry and the
//! policies that vary between variants of the game.
//!
//! Everything here is fixed for a session's lifetime; changing a value
//! means constructing a new [`crate::session::Session`].

use std::fmt;

/// When the track spawns the next pipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnPolicy {
    /// Spawn a pipe every `n` ticks.
    EveryTicks(u64),
    /// Spawn the next pipe once the leading pipe's x falls below the
    /// field's horizontal midpoint (also when the track is empty).
    SingleAhead,
}

/// How a finished run is folded into the persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordPolicy {
    /// Keep the best `n` runs of all time, sorted descending.
    TopN(usize),
    /// Keep only the single best score.
    BestOnly,
}

/// All tunables for one session, in logical field units.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub field_w: f64,
    pub field_h: f64,
    /// Height of the ground strip at the bottom of the field. The playable
    /// band is `[0, field_h - ground_h)`.
    pub ground_h: f64,

    /// Velocity gained per tick while airborne.
    pub gravity: f64,
    /// Velocity a flap sets (negative = upward kick, not additive).
    pub flap_impulse: f64,

    /// Vertical size of the passable gap.
    pub gap_h: f64,
    /// Gap may not start above this.
    pub gap_margin_top: f64,
    /// Gap may not end closer than this to the top of the ground.
    pub gap_margin_bottom: f64,
    pub pipe_w: f64,
    /// Horizontal pipe movement per tick.
    pub pipe_speed: f64,
    pub spawn: SpawnPolicy,

    /// Bird's fixed column during play.
    pub bird_x: f64,
    pub bird_w: f64,
    pub bird_h: f64,

    pub record: RecordPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_w: 480.0,
            field_h: 640.0,
            ground_h: 80.0,
            gravity: 0.45,
            flap_impulse: -7.0,
            gap_h: 140.0,
            gap_margin_top: 60.0,
            gap_margin_bottom: 60.0,
            pipe_w: 52.0,
            pipe_speed: 2.5,
            spawn: SpawnPolicy::EveryTicks(90),
            bird_x: 80.0,
            bird_w: 34.0,
            bird_h: 24.0,
            record: RecordPolicy::TopN(5),
        }
    }
}

/// Construction-time validation failures. These never occur at tick time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Field width or height is not a positive finite number.
    BadFieldSize,
    /// Ground strip does not fit inside the field.
    BadGroundHeight,
    /// Gap plus its margins does not fit in the playable band.
    GapTooLarge,
    /// Bird does not fit through the gap.
    BirdTooLarge,
    /// Pipe speed, pipe width or gravity is not positive.
    BadMotion,
    /// Flap impulse must be a negative (upward) velocity.
    BadImpulse,
    /// `SpawnPolicy::EveryTicks(0)` would spawn a pipe every tick forever.
    BadSpawnInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::BadFieldSize => "field dimensions must be positive",
            Self::BadGroundHeight => "ground height must fit inside the field",
            Self::GapTooLarge => "gap plus margins exceeds the playable band",
            Self::BirdTooLarge => "bird is larger than the gap",
            Self::BadMotion => "pipe speed, pipe width and gravity must be positive",
            Self::BadImpulse => "flap impulse must be negative (upward)",
            Self::BadSpawnInterval => "spawn interval must be at least one tick",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    /// Top of the ground strip; the bottom bound of the playable band.
    pub fn sky_h(&self) -> f64 {
        self.field_h - self.ground_h
    }

    /// Highest valid `gap_top`.
    pub fn gap_top_min(&self) -> f64 {
        self.gap_margin_top
    }

    /// Lowest valid `gap_top`.
    pub fn gap_top_max(&self) -> f64 {
        self.sky_h() - self.gap_margin_bottom - self.gap_h
    }

    /// Fail-fast check run once at session construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.field_w > 0.0 && self.field_h > 0.0)
            || !self.field_w.is_finite()
            || !self.field_h.is_finite()
        {
            return Err(ConfigError::BadFieldSize);
        }
        if self.ground_h < 0.0 || self.ground_h >= self.field_h {
            return Err(ConfigError::BadGroundHeight);
        }
        if self.gap_h <= 0.0 || self.gap_top_max() < self.gap_top_min() {
            return Err(ConfigError::GapTooLarge);
        }
        if self.bird_h >= self.gap_h || self.bird_w <= 0.0 || self.bird_h <= 0.0 {
            return Err(ConfigError::BirdTooLarge);
        }
        if self.pipe_speed <= 0.0 || self.pipe_w <= 0.0 || self.gravity <= 0.0 {
            return Err(ConfigError::BadMotion);
        }
        if self.flap_impulse >= 0.0 {
            return Err(ConfigError::BadImpulse);
        }
        if self.spawn == SpawnPolicy::EveryTicks(0) {
            return Err(ConfigError::BadSpawnInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn gap_band_from_defaults() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.gap_top_min(), 60.0);
        // 640 - 80 - 60 - 140
        assert_eq!(cfg.gap_top_max(), 360.0);
    }

    #[test]
    fn rejects_gap_larger_than_field() {
        let cfg = GameConfig {
            gap_h: 700.0,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::GapTooLarge));
    }

    #[test]
    fn rejects_zero_field() {
        let cfg = GameConfig {
            field_h: 0.0,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::BadFieldSize));
    }

    #[test]
    fn rejects_downward_impulse() {
        let cfg = GameConfig {
            flap_impulse: 3.0,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::BadImpulse));
    }

    #[test]
    fn rejects_zero_spawn_interval() {
        let cfg = GameConfig {
            spawn: SpawnPolicy::EveryTicks(0),
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::BadSpawnInterval));
    }

    #[test]
    fn rejects_bird_taller_than_gap() {
        let cfg = GameConfig {
            bird_h: 150.0,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::BirdTooLarge));
    }
}
