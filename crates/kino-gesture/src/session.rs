//! Gesture Session - the record of one tracked finger
//!
//! Holds everything captured at touch-start plus what the gesture has
//! resolved into so far. The phase of the state machine is derived from the
//! session, so it can never disagree with it.

use crate::types::*;

/// One in-flight tracked touch
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    /// Unique session ID
    id: GestureSessionId,
    /// Tracked finger
    touch_id: TouchId,
    /// Start point in viewport coordinates
    origin: TouchPoint,
    /// Start point relative to the player's bounding box
    start: TouchPoint,
    /// Timestamp of the touch-start (ms)
    started_at_ms: u64,
    /// Playback position at touch-start
    start_time: f64,
    /// Volume at touch-start
    start_volume: f64,
    /// Player size at touch-start
    width: f64,
    height: f64,
    /// Committed axis; `None` until the drag passes the threshold
    axis: Option<Axis>,
    /// Seek target, only while the axis is horizontal
    pending_seek: Option<f64>,
    /// Long-press boost has fired for this session
    long_press_triggered: bool,
}

impl GestureSession {
    /// Start a session from a touch-start event and a snapshot of the player
    pub fn begin(
        event: &TouchEvent,
        bounds: PlayerBounds,
        start_time: f64,
        start_volume: f64,
    ) -> Self {
        Self {
            id: GestureSessionId::new(),
            touch_id: event.id,
            origin: event.point,
            start: bounds.to_local(event.point),
            started_at_ms: event.timestamp_ms,
            start_time,
            start_volume,
            width: bounds.width,
            height: bounds.height,
            axis: None,
            pending_seek: None,
            long_press_triggered: false,
        }
    }

    pub fn id(&self) -> GestureSessionId {
        self.id
    }

    pub fn touch_id(&self) -> TouchId {
        self.touch_id
    }

    /// Returns true if the event belongs to the tracked finger
    pub fn owns(&self, id: TouchId) -> bool {
        self.touch_id == id
    }

    pub fn start(&self) -> TouchPoint {
        self.start
    }

    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn start_volume(&self) -> f64 {
        self.start_volume
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn axis(&self) -> Option<Axis> {
        self.axis
    }

    pub fn pending_seek(&self) -> Option<f64> {
        self.pending_seek
    }

    pub fn long_press_triggered(&self) -> bool {
        self.long_press_triggered
    }

    /// Drag distance from the start point
    pub fn delta(&self, point: TouchPoint) -> (f64, f64) {
        (point.x - self.origin.x, point.y - self.origin.y)
    }

    /// Current phase of the state machine for this session
    pub fn phase(&self) -> GesturePhase {
        if self.long_press_triggered {
            return GesturePhase::LongPress;
        }
        match self.axis {
            None => GesturePhase::Pending,
            Some(Axis::Horizontal) => GesturePhase::Seeking,
            Some(Axis::Vertical) => GesturePhase::AdjustingVolume,
        }
    }

    /// Commit the drag axis. Only possible once, and never after a long press.
    pub fn commit_axis(&mut self, axis: Axis) -> bool {
        if self.axis.is_some() || self.long_press_triggered {
            return false;
        }
        self.axis = Some(axis);
        true
    }

    /// Record the seek preview; ignored unless the axis is horizontal
    pub fn set_pending_seek(&mut self, time: f64) {
        if self.axis == Some(Axis::Horizontal) {
            self.pending_seek = Some(time);
        }
    }

    /// Flag the long-press boost. Only possible while no axis is committed.
    pub fn mark_long_press(&mut self) -> bool {
        if self.axis.is_some() || self.long_press_triggered {
            return false;
        }
        self.long_press_triggered = true;
        true
    }
}
