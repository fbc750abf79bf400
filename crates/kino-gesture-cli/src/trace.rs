//! Touch trace format and deterministic replay
//!
//! A trace is a JSON document with the initial player state and an ordered
//! list of timestamped events. Long-press timers are fired from the event
//! clock: an armed timer elapses before the first event at or past its
//! deadline.

use kino_gesture::{
    EventDisposition, GestureConfig, GestureController, GestureEvent, GestureInput, GesturePhase,
    RecordingObserver, SimulatedPlayer, TouchEvent, TouchId, TouchPoint, TouchTarget,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A recorded gesture trace
#[derive(Debug, Clone, Deserialize)]
pub struct Trace {
    /// Initial player state
    #[serde(default)]
    pub player: SimulatedPlayer,
    /// Whether the device reports touch support
    #[serde(default = "default_true")]
    pub touch_capable: bool,
    pub events: Vec<TraceEvent>,
}

fn default_true() -> bool {
    true
}

/// One recorded input
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceEvent {
    TouchStart(TraceTouch),
    TouchMove(TraceTouch),
    TouchEnd(TraceTouch),
    TouchCancel(TraceTouch),
    LockChanged { locked: bool, t: u64 },
    FullscreenChanged { fullscreen: bool, t: u64 },
    Resize { t: u64 },
    OrientationChange { t: u64 },
    SetEnabled { enabled: bool, t: u64 },
    /// Synthesized click reaching the player
    Click { t: u64 },
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TraceTouch {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub t: u64,
    #[serde(default)]
    pub target: TouchTarget,
}

impl From<TraceTouch> for TouchEvent {
    fn from(touch: TraceTouch) -> Self {
        TouchEvent {
            id: TouchId(touch.id),
            point: TouchPoint::new(touch.x, touch.y),
            timestamp_ms: touch.t,
            target: touch.target,
        }
    }
}

impl TraceEvent {
    pub fn timestamp_ms(&self) -> u64 {
        match self {
            TraceEvent::TouchStart(touch)
            | TraceEvent::TouchMove(touch)
            | TraceEvent::TouchEnd(touch)
            | TraceEvent::TouchCancel(touch) => touch.t,
            TraceEvent::LockChanged { t, .. }
            | TraceEvent::FullscreenChanged { t, .. }
            | TraceEvent::Resize { t }
            | TraceEvent::OrientationChange { t }
            | TraceEvent::SetEnabled { t, .. }
            | TraceEvent::Click { t } => *t,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TraceEvent::TouchStart(_) => "touch_start",
            TraceEvent::TouchMove(_) => "touch_move",
            TraceEvent::TouchEnd(_) => "touch_end",
            TraceEvent::TouchCancel(_) => "touch_cancel",
            TraceEvent::LockChanged { .. } => "lock_changed",
            TraceEvent::FullscreenChanged { .. } => "fullscreen_changed",
            TraceEvent::Resize { .. } => "resize",
            TraceEvent::OrientationChange { .. } => "orientation_change",
            TraceEvent::SetEnabled { .. } => "set_enabled",
            TraceEvent::Click { .. } => "click",
        }
    }
}

/// What happened at one step of the replay
#[derive(Debug, Clone, Serialize)]
pub struct ReplayStep {
    pub t: u64,
    pub input: &'static str,
    /// Present for touch events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disposition: Option<EventDisposition>,
    /// Present for clicks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_suppressed: Option<bool>,
    pub phase: GesturePhase,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<GestureEvent>,
}

/// Full replay outcome
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<ReplayStep>,
    pub final_phase: GesturePhase,
    pub player: SimulatedPlayer,
}

/// Replay a trace against a fresh controller
pub fn replay(trace: Trace, config: GestureConfig) -> ReplayReport {
    let mut gestures = GestureController::new(config, trace.player, RecordingObserver::new());
    gestures.set_touch_capable(trace.touch_capable);

    let mut steps = Vec::with_capacity(trace.events.len());

    for event in trace.events {
        let t = event.timestamp_ms();

        if let Some(timer) = gestures.pending_long_press() {
            if timer.deadline_ms <= t {
                gestures.long_press_elapsed(timer.token);
                steps.push(ReplayStep {
                    t: timer.deadline_ms,
                    input: "long_press_elapsed",
                    disposition: None,
                    click_suppressed: None,
                    phase: gestures.phase(),
                    events: gestures.observer_mut().take(),
                });
            }
        }

        let name = event.name();
        let mut disposition = None;
        let mut click_suppressed = None;

        match event {
            TraceEvent::TouchStart(touch) => {
                disposition = Some(gestures.dispatch(GestureInput::TouchStart(touch.into())));
            }
            TraceEvent::TouchMove(touch) => {
                disposition = Some(gestures.dispatch(GestureInput::TouchMove(touch.into())));
            }
            TraceEvent::TouchEnd(touch) => {
                disposition = Some(gestures.dispatch(GestureInput::TouchEnd(touch.into())));
            }
            TraceEvent::TouchCancel(touch) => {
                disposition = Some(gestures.dispatch(GestureInput::TouchCancel(touch.into())));
            }
            TraceEvent::LockChanged { locked, .. } => {
                gestures.host_mut().locked = locked;
                gestures.lock_changed(locked);
            }
            TraceEvent::FullscreenChanged { fullscreen, .. } => {
                gestures.host_mut().fullscreen = fullscreen;
                gestures.fullscreen_changed(fullscreen);
            }
            TraceEvent::Resize { .. } => gestures.resized(),
            TraceEvent::OrientationChange { .. } => gestures.orientation_changed(),
            TraceEvent::SetEnabled { enabled, .. } => gestures.set_enabled(enabled),
            TraceEvent::Click { t } => {
                click_suppressed = Some(gestures.should_suppress_click(t));
            }
        }

        debug!(t, input = name, phase = %gestures.phase(), "Replayed");

        steps.push(ReplayStep {
            t,
            input: name,
            disposition,
            click_suppressed,
            phase: gestures.phase(),
            events: gestures.observer_mut().take(),
        });
    }

    let final_phase = gestures.phase();
    let (player, _) = gestures.into_parts();

    ReplayReport {
        steps,
        final_phase,
        player,
    }
}
