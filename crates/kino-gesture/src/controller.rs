//! Gesture Controller - the lifecycle state machine
//!
//! Coordinates:
//! - Gating (enabled, touch capable, fullscreen, unlocked, not over chrome)
//! - Session creation and axis commitment
//! - Live seek preview and volume adjustment
//! - Tap classification on release
//! - The long-press boost
//! - Forced resets from host notifications
//!
//! Every input goes through [`GestureController::dispatch`]. Every way a
//! session can end goes through one teardown path.

use crate::{
    host::PlayerHost,
    long_press::{LongPressAccelerator, LongPressTimer, TimerToken},
    math,
    observer::GestureObserver,
    resolver::{AxisResolver, MoveOutcome},
    session::GestureSession,
    tap::{TapClassifier, TapOutcome},
    types::*,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

/// Everything that can happen to the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureInput {
    TouchStart(TouchEvent),
    TouchMove(TouchEvent),
    TouchEnd(TouchEvent),
    TouchCancel(TouchEvent),
    /// The long-press timer armed with this token elapsed
    LongPressElapsed(TimerToken),
    /// Host engaged (`true`) or released the controls lock
    LockChanged(bool),
    /// Host entered (`true`) or exited fullscreen
    FullscreenChanged(bool),
    Resized,
    OrientationChanged,
    /// The gesture feature setting was toggled
    EnabledChanged(bool),
    /// The player is being unmounted
    Detach,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetReason {
    TouchEnd,
    TouchCancel,
    /// Vertical drag outside the side zones, handed back to the host
    Released,
    Locked,
    FullscreenExited,
    Resized,
    OrientationChanged,
    Disabled,
    Detached,
}

impl std::fmt::Display for ResetReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResetReason::TouchEnd => "touch_end",
            ResetReason::TouchCancel => "touch_cancel",
            ResetReason::Released => "released",
            ResetReason::Locked => "locked",
            ResetReason::FullscreenExited => "fullscreen_exited",
            ResetReason::Resized => "resized",
            ResetReason::OrientationChanged => "orientation_changed",
            ResetReason::Disabled => "disabled",
            ResetReason::Detached => "detached",
        };
        write!(f, "{}", name)
    }
}

/// Gesture engine for one mounted player
pub struct GestureController<H: PlayerHost, O: GestureObserver> {
    /// Sanitized tunables
    config: GestureConfig,
    /// Host player
    host: H,
    /// UI callbacks
    observer: O,
    /// The single in-flight session
    session: Option<GestureSession>,
    resolver: AxisResolver,
    taps: TapClassifier,
    long_press: LongPressAccelerator,
    /// Gesture feature setting
    enabled: bool,
    /// Device reports touch support
    touch_capable: bool,
}

impl<H: PlayerHost, O: GestureObserver> GestureController<H, O> {
    /// Create a controller. Out-of-range tunables are clamped.
    pub fn new(config: GestureConfig, host: H, observer: O) -> Self {
        let config = config.sanitized();
        Self {
            resolver: AxisResolver::new(config.clone()),
            taps: TapClassifier::new(&config),
            long_press: LongPressAccelerator::new(config.long_press_ms, config.long_press_rate),
            config,
            host,
            observer,
            session: None,
            enabled: true,
            touch_capable: true,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, e.g. to apply unrelated player changes
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_parts(self) -> (H, O) {
        (self.host, self.observer)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_touch_capable(&mut self, capable: bool) {
        self.touch_capable = capable;
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Current state machine phase
    pub fn phase(&self) -> GesturePhase {
        self.session
            .as_ref()
            .map(GestureSession::phase)
            .unwrap_or(GesturePhase::Idle)
    }

    /// The armed long-press timer, for whoever schedules it
    pub fn pending_long_press(&self) -> Option<LongPressTimer> {
        self.long_press.armed()
    }

    /// Whether a synthesized click/dblclick at `now_ms` should be swallowed
    pub fn should_suppress_click(&self, now_ms: u64) -> bool {
        self.taps.should_suppress_click(now_ms)
    }

    // =========================================================================
    // Transition function
    // =========================================================================

    /// Feed one input through the state machine
    pub fn dispatch(&mut self, input: GestureInput) -> EventDisposition {
        match input {
            GestureInput::TouchStart(event) => self.on_touch_start(event),
            GestureInput::TouchMove(event) => self.on_touch_move(event),
            GestureInput::TouchEnd(event) => self.on_touch_end(event),
            GestureInput::TouchCancel(event) => self.on_touch_cancel(event),
            GestureInput::LongPressElapsed(token) => {
                self.on_long_press(token);
                EventDisposition::PassThrough
            }
            GestureInput::LockChanged(locked) => {
                if locked {
                    self.reset(ResetReason::Locked);
                }
                EventDisposition::PassThrough
            }
            GestureInput::FullscreenChanged(fullscreen) => {
                if !fullscreen {
                    self.reset(ResetReason::FullscreenExited);
                }
                EventDisposition::PassThrough
            }
            GestureInput::Resized => {
                self.reset(ResetReason::Resized);
                EventDisposition::PassThrough
            }
            GestureInput::OrientationChanged => {
                self.reset(ResetReason::OrientationChanged);
                EventDisposition::PassThrough
            }
            GestureInput::EnabledChanged(enabled) => {
                self.enabled = enabled;
                if !enabled {
                    self.reset(ResetReason::Disabled);
                }
                EventDisposition::PassThrough
            }
            GestureInput::Detach => {
                self.reset(ResetReason::Detached);
                EventDisposition::PassThrough
            }
        }
    }

    pub fn touch_start(&mut self, event: TouchEvent) -> EventDisposition {
        self.dispatch(GestureInput::TouchStart(event))
    }

    pub fn touch_move(&mut self, event: TouchEvent) -> EventDisposition {
        self.dispatch(GestureInput::TouchMove(event))
    }

    pub fn touch_end(&mut self, event: TouchEvent) -> EventDisposition {
        self.dispatch(GestureInput::TouchEnd(event))
    }

    pub fn touch_cancel(&mut self, event: TouchEvent) -> EventDisposition {
        self.dispatch(GestureInput::TouchCancel(event))
    }

    pub fn long_press_elapsed(&mut self, token: TimerToken) {
        self.dispatch(GestureInput::LongPressElapsed(token));
    }

    pub fn lock_changed(&mut self, locked: bool) {
        self.dispatch(GestureInput::LockChanged(locked));
    }

    pub fn fullscreen_changed(&mut self, fullscreen: bool) {
        self.dispatch(GestureInput::FullscreenChanged(fullscreen));
    }

    pub fn resized(&mut self) {
        self.dispatch(GestureInput::Resized);
    }

    pub fn orientation_changed(&mut self) {
        self.dispatch(GestureInput::OrientationChanged);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.dispatch(GestureInput::EnabledChanged(enabled));
    }

    pub fn detach(&mut self) {
        self.dispatch(GestureInput::Detach);
    }

    // =========================================================================
    // Touch handlers
    // =========================================================================

    fn gate_rejection(&self, event: &TouchEvent) -> Option<&'static str> {
        if !self.enabled {
            Some("disabled")
        } else if !self.touch_capable {
            Some("no touch support")
        } else if !self.host.is_fullscreen() {
            Some("not fullscreen")
        } else if self.host.is_locked() {
            Some("locked")
        } else if event.target.is_chrome() {
            Some("chrome target")
        } else {
            None
        }
    }

    #[instrument(level = "debug", skip(self), fields(touch = %event.id))]
    fn on_touch_start(&mut self, event: TouchEvent) -> EventDisposition {
        if let Some(session) = &self.session {
            trace!(tracked = %session.touch_id(), "Ignoring additional finger");
            return EventDisposition::PassThrough;
        }
        if let Some(reason) = self.gate_rejection(&event) {
            trace!(reason, "Touch not eligible for gestures");
            return EventDisposition::PassThrough;
        }

        let bounds = self.host.bounds();
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            trace!("Player has no layout yet");
            return EventDisposition::PassThrough;
        }

        let session = GestureSession::begin(
            &event,
            bounds,
            self.host.current_time(),
            self.host.volume(),
        );
        let timer = self.long_press.arm(event.timestamp_ms);
        debug!(
            session_id = %session.id(),
            x = session.start().x,
            y = session.start().y,
            long_press_deadline = timer.deadline_ms,
            "Gesture session started"
        );
        self.session = Some(session);

        // Leave the start alone so the host still synthesizes its click
        EventDisposition::PassThrough
    }

    fn on_touch_move(&mut self, event: TouchEvent) -> EventDisposition {
        let Some(session) = self.session.as_mut() else {
            return EventDisposition::PassThrough;
        };
        if !session.owns(event.id) {
            return EventDisposition::PassThrough;
        }

        match session.phase() {
            GesturePhase::Idle => EventDisposition::PassThrough,
            GesturePhase::LongPress => EventDisposition::Consumed,
            GesturePhase::Pending => match self.resolver.classify(session, event.point) {
                MoveOutcome::Undecided => EventDisposition::PassThrough,
                MoveOutcome::Release => {
                    debug!(session_id = %session.id(), "Center vertical drag released to host");
                    self.reset(ResetReason::Released);
                    EventDisposition::PassThrough
                }
                MoveOutcome::Commit(axis) => {
                    session.commit_axis(axis);
                    self.long_press.cancel();
                    // A drag breaks any tap sequence in progress
                    self.taps.clear();
                    debug!(session_id = %session.id(), %axis, "Axis committed");
                    self.apply_move(event.point);
                    EventDisposition::Consumed
                }
            },
            GesturePhase::Seeking | GesturePhase::AdjustingVolume => {
                self.apply_move(event.point);
                EventDisposition::Consumed
            }
        }
    }

    /// Update the seek preview or volume for a committed axis
    fn apply_move(&mut self, point: TouchPoint) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match session.axis() {
            Some(Axis::Horizontal) => {
                let preview = self.resolver.seek_preview(session, point, self.host.duration());
                session.set_pending_seek(preview);
                self.observer.on_seek_preview_change(preview);
            }
            Some(Axis::Vertical) => {
                let volume = self.resolver.volume(session, point);
                self.host.set_volume(volume);
                if volume > 0.0 && self.host.muted() {
                    self.host.set_muted(false);
                }
                self.observer.on_volume_gesture_change(volume);
            }
            None => {}
        }
    }

    #[instrument(level = "debug", skip(self), fields(touch = %event.id))]
    fn on_touch_end(&mut self, event: TouchEvent) -> EventDisposition {
        let Some(session) = self.session.as_ref() else {
            return EventDisposition::PassThrough;
        };
        if !session.owns(event.id) {
            return EventDisposition::PassThrough;
        }

        match session.phase() {
            GesturePhase::Idle => EventDisposition::PassThrough,
            GesturePhase::LongPress | GesturePhase::AdjustingVolume => {
                self.reset(ResetReason::TouchEnd);
                EventDisposition::Consumed
            }
            GesturePhase::Seeking => {
                if let Some(target) = session.pending_seek() {
                    info!(from = session.start_time(), to = target, "Seek gesture committed");
                    self.host.set_current_time(target);
                }
                self.reset(ResetReason::TouchEnd);
                EventDisposition::Consumed
            }
            GesturePhase::Pending => {
                let width = session.width();
                self.reset(ResetReason::TouchEnd);
                self.on_tap(event, width)
            }
        }
    }

    fn on_touch_cancel(&mut self, event: TouchEvent) -> EventDisposition {
        if self.session.as_ref().is_some_and(|s| s.owns(event.id)) {
            self.reset(ResetReason::TouchCancel);
        }
        EventDisposition::PassThrough
    }

    fn on_tap(&mut self, event: TouchEvent, width: f64) -> EventDisposition {
        let point = self.host.bounds().to_local(event.point);
        match self.taps.classify(point, width, event.timestamp_ms) {
            TapOutcome::Single => EventDisposition::PassThrough,
            TapOutcome::Double(action) => {
                self.apply_double_tap(action);
                EventDisposition::Consumed
            }
        }
    }

    fn apply_double_tap(&mut self, action: DoubleTapAction) {
        let seconds = self.config.double_tap_seek_seconds;
        let current = self.host.current_time();
        let duration = self.host.duration();

        match action {
            DoubleTapAction::Backward => {
                let target = math::skip_target(current, -seconds, duration);
                self.host.set_current_time(target);
                self.observer.on_skip_notice(action, seconds);
                info!(from = current, to = target, "Double tap rewind");
            }
            DoubleTapAction::Forward => {
                let target = math::skip_target(current, seconds, duration);
                self.host.set_current_time(target);
                self.observer.on_skip_notice(action, seconds);
                info!(from = current, to = target, "Double tap forward");
            }
            DoubleTapAction::Toggle => {
                self.host.toggle_play();
                self.host.hide_controls();
                info!("Double tap play/pause");
            }
        }
    }

    fn on_long_press(&mut self, token: TimerToken) {
        if !self.long_press.fire(token) {
            trace!(token = token.0, "Stale long-press timer");
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.mark_long_press() {
            debug!(session_id = %session.id(), "Long press");
            self.taps.clear();
            self.long_press.boost(&mut self.host);
        }
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Lifecycle reset: tear the session down and forget any pending tap
    fn reset(&mut self, reason: ResetReason) {
        if !matches!(reason, ResetReason::TouchEnd | ResetReason::Released) {
            self.taps.clear();
        }
        self.teardown(reason);
    }

    /// The only way a session ends. Safe to call with no session.
    fn teardown(&mut self, reason: ResetReason) {
        self.long_press.cancel();

        let Some(session) = self.session.take() else {
            trace!(%reason, "Reset with no active session");
            return;
        };

        match session.phase() {
            GesturePhase::Seeking => self.observer.on_seek_preview_end(),
            GesturePhase::AdjustingVolume => self.observer.on_volume_gesture_end(),
            GesturePhase::Idle | GesturePhase::Pending | GesturePhase::LongPress => {}
        }

        self.long_press.restore(&mut self.host);

        debug!(session_id = %session.id(), %reason, phase = %session.phase(), "Gesture session ended");
    }
}
