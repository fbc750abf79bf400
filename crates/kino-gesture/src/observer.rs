//! UI callbacks
//!
//! Fire-and-forget notifications for the seek/volume HUD and skip notices.
//! The engine renders nothing itself.

use crate::types::DoubleTapAction;
use serde::{Deserialize, Serialize};

/// Receives gesture feedback. Every callback is optional.
pub trait GestureObserver {
    /// Volume changed by a vertical drag, `0..=1`
    fn on_volume_gesture_change(&mut self, _volume: f64) {}

    /// Vertical drag finished
    fn on_volume_gesture_end(&mut self) {}

    /// Seek preview moved to `_preview_time` seconds
    fn on_seek_preview_change(&mut self, _preview_time: f64) {}

    /// Horizontal drag finished (committed or cancelled)
    fn on_seek_preview_end(&mut self) {}

    /// Double tap skipped backward or forward by `_seconds`
    fn on_skip_notice(&mut self, _action: DoubleTapAction, _seconds: f64) {}
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl GestureObserver for NoopObserver {}

/// Gesture feedback as data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GestureEvent {
    VolumeChange { volume: f64 },
    VolumeEnd,
    SeekPreview { time: f64 },
    SeekPreviewEnd,
    SkipNotice { action: DoubleTapAction, seconds: f64 },
}

/// Observer that records every callback in order
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub events: Vec<GestureEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain recorded events
    pub fn take(&mut self) -> Vec<GestureEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of recorded events matching `predicate`
    pub fn count(&self, predicate: impl Fn(&GestureEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}

impl GestureObserver for RecordingObserver {
    fn on_volume_gesture_change(&mut self, volume: f64) {
        self.events.push(GestureEvent::VolumeChange { volume });
    }

    fn on_volume_gesture_end(&mut self) {
        self.events.push(GestureEvent::VolumeEnd);
    }

    fn on_seek_preview_change(&mut self, preview_time: f64) {
        self.events.push(GestureEvent::SeekPreview { time: preview_time });
    }

    fn on_seek_preview_end(&mut self) {
        self.events.push(GestureEvent::SeekPreviewEnd);
    }

    fn on_skip_notice(&mut self, action: DoubleTapAction, seconds: f64) {
        self.events.push(GestureEvent::SkipNotice { action, seconds });
    }
}
