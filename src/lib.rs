//! flappy-term: a Flappy Bird arcade game for the terminal.
//!
//! The simulation core (`config`, `bird`, `track`, `collision`, `score`,
//! `session`) is pure and scheduler-neutral: the binary drives it at a
//! fixed cadence, but any loop or test harness can call
//! [`Session::tick`] directly. `render`, `audio` and `store` are the thin
//! I/O shell around it.

pub mod audio;
pub mod bird;
pub mod collision;
pub mod config;
pub mod render;
pub mod score;
pub mod session;
pub mod store;
pub mod track;

pub use config::{ConfigError, GameConfig, RecordPolicy, SpawnPolicy};
pub use session::{Cue, InputEvent, Mode, Session, Snapshot, TickReport};
