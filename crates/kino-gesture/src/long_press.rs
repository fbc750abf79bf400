//! Long-press playback boost
//!
//! One deferred timer per session, identified by a token. Arming a new timer
//! invalidates the previous token, so at most one timer is ever live and a
//! late fire from a cancelled timer is ignored.

use crate::host::PlayerHost;
use crate::math;
use crate::types::{MAX_PLAYBACK_RATE, MIN_PLAYBACK_RATE};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Identifies one arming of the long-press timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(pub u64);

/// An armed long-press timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongPressTimer {
    pub token: TimerToken,
    /// Event-clock deadline (ms)
    pub deadline_ms: u64,
    /// Delay from arming to deadline
    pub delay: Duration,
}

/// Owns the long-press timer and the pre-boost playback rate
#[derive(Debug, Clone)]
pub struct LongPressAccelerator {
    delay_ms: u64,
    boost_rate: f64,
    next_token: u64,
    armed: Option<LongPressTimer>,
    /// Playback rate captured right before the boost
    rate_memo: Option<f64>,
}

impl LongPressAccelerator {
    pub fn new(delay_ms: u64, boost_rate: f64) -> Self {
        Self {
            delay_ms,
            boost_rate: math::clamp(boost_rate, MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE),
            next_token: 0,
            armed: None,
            rate_memo: None,
        }
    }

    /// Arm the timer from `now_ms`, replacing any armed one
    pub fn arm(&mut self, now_ms: u64) -> LongPressTimer {
        self.next_token += 1;
        let timer = LongPressTimer {
            token: TimerToken(self.next_token),
            deadline_ms: now_ms.saturating_add(self.delay_ms),
            delay: Duration::from_millis(self.delay_ms),
        };
        self.armed = Some(timer);
        timer
    }

    /// Disarm the timer; returns true if one was armed
    pub fn cancel(&mut self) -> bool {
        self.armed.take().is_some()
    }

    pub fn armed(&self) -> Option<LongPressTimer> {
        self.armed
    }

    /// Consume a timer fire. Returns false for stale or unknown tokens.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        match self.armed {
            Some(timer) if timer.token == token => {
                self.armed = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_boosted(&self) -> bool {
        self.rate_memo.is_some()
    }

    /// The rate that will be restored on release
    pub fn rate_memo(&self) -> Option<f64> {
        self.rate_memo
    }

    /// Snapshot the current rate and switch to the boost rate
    pub fn boost<H: PlayerHost>(&mut self, host: &mut H) {
        if self.rate_memo.is_some() {
            return;
        }
        let previous = host.playback_rate();
        self.rate_memo = Some(previous);
        host.set_playback_rate(self.boost_rate);
        debug!(from = previous, to = self.boost_rate, "Long-press boost");
    }

    /// Put back the snapshot rate, if a boost is live
    pub fn restore<H: PlayerHost>(&mut self, host: &mut H) -> bool {
        match self.rate_memo.take() {
            Some(rate) => {
                host.set_playback_rate(rate);
                debug!(rate, "Playback rate restored");
                true
            }
            None => false,
        }
    }
}
