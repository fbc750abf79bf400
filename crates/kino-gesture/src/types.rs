//! Core types for Kino Gesture

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Movement tolerance (px, both axes) between two taps of a double tap
pub const DOUBLE_TAP_MOVE_TOLERANCE_PX: f64 = 40.0;

/// Extra lifetime of an unmatched tap record past the double-tap window
pub const TAP_RECORD_GRACE_MS: u64 = 50;

/// How long synthesized click/dblclick events are swallowed after a double tap
pub const CLICK_SUPPRESSION_MS: u64 = 400;

/// Lowest playback rate the long-press boost may assign
pub const MIN_PLAYBACK_RATE: f64 = 0.1;

/// Highest playback rate the long-press boost may assign
pub const MAX_PLAYBACK_RATE: f64 = 16.0;

// =============================================================================
// Identifiers
// =============================================================================

/// Unique identifier for a gesture session, used to correlate log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GestureSessionId(pub Uuid);

impl GestureSessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GestureSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GestureSessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of one finger, stable from touch-start to touch-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TouchId(pub u64);

impl std::fmt::Display for TouchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "touch#{}", self.0)
    }
}

// =============================================================================
// Touch Input
// =============================================================================

/// A point in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// What the touch landed on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchTarget {
    /// The video surface itself
    #[default]
    Surface,
    /// Control bar, progress bar, buttons
    Controls,
    /// Settings panel or context menu
    Menu,
    /// Interactive form element (input, select, textarea)
    FormInput,
}

impl TouchTarget {
    /// Returns true if the target is part of the player chrome
    pub fn is_chrome(&self) -> bool {
        !matches!(self, TouchTarget::Surface)
    }
}

/// A single touch event as delivered by the input source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Finger identifier
    pub id: TouchId,
    /// Viewport coordinates
    pub point: TouchPoint,
    /// Monotonic event timestamp in milliseconds
    pub timestamp_ms: u64,
    /// Element the touch landed on
    #[serde(default)]
    pub target: TouchTarget,
}

impl TouchEvent {
    pub fn new(id: u64, x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self {
            id: TouchId(id),
            point: TouchPoint::new(x, y),
            timestamp_ms,
            target: TouchTarget::Surface,
        }
    }

    /// Same event, landing on the given target
    pub fn on(mut self, target: TouchTarget) -> Self {
        self.target = target;
        self
    }
}

/// Bounding box of the player's root element in viewport coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlayerBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Convert a viewport point into player-local coordinates
    pub fn to_local(&self, point: TouchPoint) -> TouchPoint {
        TouchPoint::new(point.x - self.left, point.y - self.top)
    }
}

// =============================================================================
// Gesture Classification
// =============================================================================

/// Committed drag axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Seek
    Horizontal,
    /// Volume
    Vertical,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "horizontal"),
            Axis::Vertical => write!(f, "vertical"),
        }
    }
}

/// Action resolved from the horizontal zone of a double tap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoubleTapAction {
    Backward,
    Forward,
    Toggle,
}

impl std::fmt::Display for DoubleTapAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DoubleTapAction::Backward => write!(f, "backward"),
            DoubleTapAction::Forward => write!(f, "forward"),
            DoubleTapAction::Toggle => write!(f, "toggle"),
        }
    }
}

/// Gesture state machine phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    /// No finger tracked
    Idle,
    /// Finger down, no axis committed yet
    Pending,
    /// Horizontal drag, previewing a seek target
    Seeking,
    /// Vertical drag in a side zone, adjusting volume live
    AdjustingVolume,
    /// Finger held still, playback rate boosted
    LongPress,
}

impl GesturePhase {
    /// Returns true while a session exists
    pub fn is_tracking(&self) -> bool {
        !matches!(self, GesturePhase::Idle)
    }
}

impl std::fmt::Display for GesturePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GesturePhase::Idle => write!(f, "idle"),
            GesturePhase::Pending => write!(f, "pending"),
            GesturePhase::Seeking => write!(f, "seeking"),
            GesturePhase::AdjustingVolume => write!(f, "adjusting_volume"),
            GesturePhase::LongPress => write!(f, "long_press"),
        }
    }
}

/// What the host should do with the native event after the engine saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventDisposition {
    /// The engine owns the event; the host should call `preventDefault`
    Consumed,
    /// Let the host's default handling run
    PassThrough,
}

impl EventDisposition {
    pub fn is_consumed(&self) -> bool {
        matches!(self, EventDisposition::Consumed)
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Gesture tunables, injected at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Drag distance (px) before an axis is committed
    pub activation_threshold_px: f64,
    /// Seconds of seek per 100px of horizontal drag
    pub seek_seconds_per_100px: f64,
    /// Fraction of player height that spans the full volume range
    pub volume_full_swipe_ratio: f64,
    /// Fraction of width, on each edge, where vertical drags adjust volume
    pub volume_side_zone_ratio: f64,
    /// Fraction of width, on each edge, classified as backward/forward
    pub double_tap_side_zone_ratio: f64,
    /// Seconds skipped by a double tap
    pub double_tap_seek_seconds: f64,
    /// Maximum time between the two taps of a double tap (ms)
    pub double_tap_window_ms: u64,
    /// Hold duration before the long-press boost kicks in (ms)
    pub long_press_ms: u64,
    /// Playback rate while long-pressing
    pub long_press_rate: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            activation_threshold_px: 12.0,
            seek_seconds_per_100px: 12.0,
            volume_full_swipe_ratio: 0.9,
            volume_side_zone_ratio: 0.32,
            double_tap_side_zone_ratio: 0.22,
            double_tap_seek_seconds: 10.0,
            double_tap_window_ms: 300,
            long_press_ms: 500,
            long_press_rate: 2.0,
        }
    }
}

/// Sane range for each float tunable: (field, min, max)
const FLOAT_RANGES: [(&str, f64, f64); 7] = [
    ("activation_threshold_px", 1.0, 200.0),
    ("seek_seconds_per_100px", 0.0, 600.0),
    ("volume_full_swipe_ratio", 0.05, 4.0),
    ("volume_side_zone_ratio", 0.0, 0.5),
    ("double_tap_side_zone_ratio", 0.0, 0.5),
    ("double_tap_seek_seconds", 0.0, 600.0),
    ("long_press_rate", MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE),
];

const DOUBLE_TAP_WINDOW_RANGE_MS: (u64, u64) = (50, 2_000);
const LONG_PRESS_RANGE_MS: (u64, u64) = (100, 10_000);

impl GestureConfig {
    /// Parse tunables from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GestureConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read tunables from a JSON file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn float_fields(&self) -> [f64; 7] {
        [
            self.activation_threshold_px,
            self.seek_seconds_per_100px,
            self.volume_full_swipe_ratio,
            self.volume_side_zone_ratio,
            self.double_tap_side_zone_ratio,
            self.double_tap_seek_seconds,
            self.long_press_rate,
        ]
    }

    fn float_fields_mut(&mut self) -> [&mut f64; 7] {
        [
            &mut self.activation_threshold_px,
            &mut self.seek_seconds_per_100px,
            &mut self.volume_full_swipe_ratio,
            &mut self.volume_side_zone_ratio,
            &mut self.double_tap_side_zone_ratio,
            &mut self.double_tap_seek_seconds,
            &mut self.long_press_rate,
        ]
    }

    /// Check every tunable against its sane range
    pub fn validate(&self) -> Result<()> {
        for ((field, min, max), value) in FLOAT_RANGES.iter().zip(self.float_fields()) {
            if !value.is_finite() {
                return Err(Error::invalid_config(*field, value, "must be finite"));
            }
            if value < *min || value > *max {
                return Err(Error::invalid_config(*field, value, "out of range"));
            }
        }

        let (lo, hi) = DOUBLE_TAP_WINDOW_RANGE_MS;
        if !(lo..=hi).contains(&self.double_tap_window_ms) {
            return Err(Error::invalid_config(
                "double_tap_window_ms",
                self.double_tap_window_ms as f64,
                "out of range",
            ));
        }
        let (lo, hi) = LONG_PRESS_RANGE_MS;
        if !(lo..=hi).contains(&self.long_press_ms) {
            return Err(Error::invalid_config(
                "long_press_ms",
                self.long_press_ms as f64,
                "out of range",
            ));
        }

        Ok(())
    }

    /// Copy with every tunable forced into its sane range.
    ///
    /// Non-finite values fall back to the default for that field.
    pub fn sanitized(&self) -> Self {
        let defaults = GestureConfig::default().float_fields();
        let mut config = self.clone();

        for ((slot, (_, min, max)), fallback) in config
            .float_fields_mut()
            .into_iter()
            .zip(FLOAT_RANGES.iter())
            .zip(defaults)
        {
            let value = if slot.is_finite() { *slot } else { fallback };
            *slot = value.clamp(*min, *max);
        }

        config.double_tap_window_ms = config
            .double_tap_window_ms
            .clamp(DOUBLE_TAP_WINDOW_RANGE_MS.0, DOUBLE_TAP_WINDOW_RANGE_MS.1);
        config.long_press_ms = config
            .long_press_ms
            .clamp(LONG_PRESS_RANGE_MS.0, LONG_PRESS_RANGE_MS.1);

        config
    }
}
