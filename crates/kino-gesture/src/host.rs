//! Host player seam
//!
//! The engine never talks to a concrete video element. Everything it reads or
//! writes goes through [`PlayerHost`], implemented by the embedding player.

use crate::types::PlayerBounds;
use serde::{Deserialize, Serialize};

/// The host video player as seen by the gesture engine
pub trait PlayerHost {
    /// Current playback position (seconds)
    fn current_time(&self) -> f64;
    /// Content duration (seconds); non-finite or zero for live/unknown streams
    fn duration(&self) -> f64;
    /// Volume in `[0, 1]`
    fn volume(&self) -> f64;
    fn muted(&self) -> bool;
    fn playback_rate(&self) -> f64;
    fn is_fullscreen(&self) -> bool;
    /// True while the player's "locked controls" mode is engaged
    fn is_locked(&self) -> bool;
    /// Bounding box of the player's root element
    fn bounds(&self) -> PlayerBounds;

    fn set_current_time(&mut self, time: f64);
    fn set_volume(&mut self, volume: f64);
    fn set_muted(&mut self, muted: bool);
    fn set_playback_rate(&mut self, rate: f64);
    /// Flip between playing and paused
    fn toggle_play(&mut self);
    /// Hide any control overlay the host showed on its own
    fn hide_controls(&mut self);
}

/// In-memory player used by tests and trace replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedPlayer {
    pub current_time: f64,
    pub duration: f64,
    pub volume: f64,
    pub muted: bool,
    pub playback_rate: f64,
    pub fullscreen: bool,
    pub locked: bool,
    pub playing: bool,
    pub controls_visible: bool,
    pub bounds: PlayerBounds,
}

impl Default for SimulatedPlayer {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            duration: 240.0,
            volume: 0.5,
            muted: false,
            playback_rate: 1.0,
            fullscreen: true,
            locked: false,
            playing: true,
            controls_visible: false,
            bounds: PlayerBounds::new(0.0, 0.0, 360.0, 360.0),
        }
    }
}

impl SimulatedPlayer {
    /// Fullscreen player of the given size, positioned at the viewport origin
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            bounds: PlayerBounds::new(0.0, 0.0, width, height),
            ..Default::default()
        }
    }
}

impl PlayerHost for SimulatedPlayer {
    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn muted(&self) -> bool {
        self.muted
    }

    fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn is_locked(&self) -> bool {
        self.locked
    }

    fn bounds(&self) -> PlayerBounds {
        self.bounds
    }

    fn set_current_time(&mut self, time: f64) {
        self.current_time = time;
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.playback_rate = rate;
    }

    fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    fn hide_controls(&mut self) {
        self.controls_visible = false;
    }
}
