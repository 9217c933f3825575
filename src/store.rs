//! JSON persistence under `~/.flappy-term/`: settings and the scoreboard.
//!
//! Everything here is best-effort from the game's point of view: a missing
//! or corrupt file loads as the default value, and callers ignore write
//! errors rather than interrupt a run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::score::Scoreboard;

const SETTINGS_FILE: &str = "settings.json";
const SCORES_FILE: &str = "scores.json";

/// Player preferences that outlive a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub sound_enabled: bool,
    /// Name attached to leaderboard entries.
    pub player_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            player_name: "PLAYER".to_string(),
        }
    }
}

/// The `~/.flappy-term/` directory, created on first use.
pub fn data_dir() -> io::Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
    let dir = home.join(".flappy-term");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn file_path(name: &str) -> io::Result<PathBuf> {
    Ok(data_dir()?.join(name))
}

/// Read a JSON file, falling back to `T::default()` on any failure.
fn read_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Write a value as pretty-printed JSON.
fn write_json<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

/// Load a named file from the data directory, defaulting on any failure.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(name: &str) -> T {
    match file_path(name) {
        Ok(path) => read_json_or_default(&path),
        Err(_) => T::default(),
    }
}

/// Save a named file into the data directory.
pub fn save_json<T: Serialize>(name: &str, value: &T) -> io::Result<()> {
    write_json(&file_path(name)?, value)
}

pub fn load_settings() -> Settings {
    load_json_or_default(SETTINGS_FILE)
}

pub fn save_settings(settings: &Settings) -> io::Result<()> {
    save_json(SETTINGS_FILE, settings)
}

pub fn load_scoreboard() -> Scoreboard {
    load_json_or_default(SCORES_FILE)
}

pub fn save_scoreboard(board: &Scoreboard) -> io::Result<()> {
    save_json(SCORES_FILE, board)
}
