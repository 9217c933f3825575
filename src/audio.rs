//! Synthesized audio cues. The simulation only emits [`Cue`] values; this
//! module decides whether and how they sound. Fire-and-forget: every cue
//! plays on a detached sink, and a missing audio device simply mutes the
//! game.

use fundsp::prelude64::*;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamBuilder, Sink, mixer::Mixer};

use crate::session::Cue;

const SR: f64 = 44100.0;

pub struct Audio {
    stream: Option<OutputStream>,
    enabled: bool,
}

impl Audio {
    /// Opens the default output device; on failure the game runs silent.
    pub fn new(enabled: bool) -> Self {
        Self {
            stream: OutputStreamBuilder::open_default_stream().ok(),
            enabled,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn play(&self, cue: Cue) {
        if !self.enabled {
            return;
        }
        let Some(stream) = &self.stream else { return };
        let mixer = stream.mixer();
        match cue {
            Cue::Flap => play_flap(mixer),
            Cue::Score => play_score(mixer),
            Cue::Collision => play_death(mixer),
        }
    }
}

/// Render `secs` of a unit generator into a one-shot rodio buffer.
fn render(mut unit: impl AudioUnit, secs: f64) -> SamplesBuffer {
    let n = (SR * secs) as usize;
    let samples: Vec<f32> = (0..n).map(|_| unit.get_mono()).collect();
    SamplesBuffer::new(1, SR as u32, samples)
}

fn play_detached(mixer: &Mixer, source: SamplesBuffer) {
    let sink = Sink::connect_new(mixer);
    sink.append(source);
    sink.detach();
}

/// Short upward chirp on each wing beat.
fn play_flap(mixer: &Mixer) {
    let freq = lfo(|t| lerp11(350.0, 700.0, (t / 0.08).min(1.0)));
    let gain = lfo(|t| lerp11(0.12, 0.0, (t / 0.1).min(1.0)));
    let sound = (freq >> sine()) * gain;
    play_detached(mixer, render(sound, 0.1));
}

/// Two-note ding when a pipe is cleared.
fn play_score(mixer: &Mixer) {
    let freq = lfo(|t| if t < 0.07 { 880.0 } else { 1174.0 });
    let gain = lfo(|t| lerp11(0.1, 0.0, (t / 0.16).min(1.0)));
    let sound = (freq >> sine()) * gain;
    play_detached(mixer, render(sound, 0.16));
}

/// Falling sawtooth sweep on collision (400Hz down to 80Hz).
fn play_death(mixer: &Mixer) {
    let freq = lfo(|t| lerp11(400.0, 80.0, (t / 0.4).min(1.0)));
    let gain = lfo(|t| lerp11(0.15, 0.0, (t / 0.5).min(1.0)));
    let sound = (freq >> saw()) * gain;
    play_detached(mixer, render(sound, 0.5));
}
