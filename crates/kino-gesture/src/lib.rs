//! Kino Gesture - Touch Gesture Engine for Kino
//!
//! Turns raw touch input on a fullscreen player into playback actions:
//! - Horizontal drag: seek preview, committed on release
//! - Vertical drag on the screen edges: live volume
//! - Double tap: skip backward / forward, or toggle play/pause in the center
//! - Long press: temporary fast-forward playback rate
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Kino Gesture                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  touch / host notifications / long-press timer                  │
//! │                           │                                     │
//! │                    ┌──────┴──────┐                              │
//! │                    │  Gesture    │──────► PlayerHost            │
//! │                    │ Controller  │──────► GestureObserver       │
//! │                    └──────┬──────┘                              │
//! │                           │                                     │
//! │  ┌──────────────┐  ┌──────┴──────┐  ┌──────────────┐           │
//! │  │     Axis     │  │   Gesture   │  │  Long-Press  │           │
//! │  │   Resolver   │  │   Session   │  │ Accelerator  │           │
//! │  └──────────────┘  └─────────────┘  └──────────────┘           │
//! │  ┌──────────────┐  ┌─────────────┐                              │
//! │  │     Tap      │  │    Math     │                              │
//! │  │  Classifier  │  │  Utilities  │                              │
//! │  └──────────────┘  └─────────────┘                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use kino_gesture::{GestureConfig, GestureController, RecordingObserver, SimulatedPlayer, TouchEvent};
//!
//! let player = SimulatedPlayer { current_time: 100.0, ..SimulatedPlayer::with_size(360.0, 360.0) };
//! let mut gestures = GestureController::new(GestureConfig::default(), player, RecordingObserver::new());
//!
//! gestures.touch_start(TouchEvent::new(1, 50.0, 180.0, 0));
//! gestures.touch_move(TouchEvent::new(1, 250.0, 180.0, 80));
//! gestures.touch_end(TouchEvent::new(1, 250.0, 180.0, 120));
//!
//! assert_eq!(gestures.host().current_time, 124.0);
//! ```

pub mod error;
pub mod types;
pub mod math;
pub mod session;
pub mod resolver;
pub mod tap;
pub mod long_press;
pub mod host;
pub mod observer;
pub mod controller;
#[cfg(feature = "driver")]
pub mod driver;

pub use error::{Error, Result};
pub use types::*;
pub use session::GestureSession;
pub use resolver::{AxisResolver, MoveOutcome};
pub use tap::{TapClassifier, TapOutcome, TapRecord};
pub use long_press::{LongPressAccelerator, LongPressTimer, TimerToken};
pub use host::{PlayerHost, SimulatedPlayer};
pub use observer::{GestureEvent, GestureObserver, NoopObserver, RecordingObserver};
pub use controller::{GestureController, GestureInput, ResetReason};
#[cfg(feature = "driver")]
pub use driver::{GestureDriver, GestureHandle};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version once at startup
pub fn init() {
    tracing::info!(version = VERSION, "Kino Gesture initialized");
}
