//! Async driver
//!
//! Runs a [`GestureController`] inside a tokio task. Inputs arrive over one
//! channel, so every source (touch, host notifications, the long-press
//! timer) is serialized in delivery order. The driver owns the real timer:
//! whenever the controller arms a long-press token the driver sleeps until
//! its deadline and feeds the token back.

use crate::{
    controller::{GestureController, GestureInput},
    host::PlayerHost,
    long_press::TimerToken,
    observer::GestureObserver,
    types::{EventDisposition, GesturePhase},
    Error, Result,
};
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, info};

/// Default input channel capacity
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

enum Command {
    Input {
        input: GestureInput,
        reply: Option<oneshot::Sender<EventDisposition>>,
    },
    Phase {
        reply: oneshot::Sender<GesturePhase>,
    },
    SuppressClick {
        now_ms: u64,
        reply: oneshot::Sender<bool>,
    },
}

/// Cloneable sender side of a running driver
#[derive(Clone)]
pub struct GestureHandle {
    tx: mpsc::Sender<Command>,
}

impl GestureHandle {
    /// Deliver an input and wait for its disposition
    pub async fn send(&self, input: GestureInput) -> Result<EventDisposition> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Input { input, reply: Some(reply) })
            .await
            .map_err(|_| Error::DriverClosed)?;
        rx.await.map_err(|_| Error::DriverClosed)
    }

    /// Deliver an input without waiting for it to be processed
    pub async fn notify(&self, input: GestureInput) -> Result<()> {
        self.tx
            .send(Command::Input { input, reply: None })
            .await
            .map_err(|_| Error::DriverClosed)
    }

    /// Current phase of the controller
    pub async fn phase(&self) -> Result<GesturePhase> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Phase { reply })
            .await
            .map_err(|_| Error::DriverClosed)?;
        rx.await.map_err(|_| Error::DriverClosed)
    }

    /// Ask whether a synthesized click at `now_ms` should be swallowed
    pub async fn should_suppress_click(&self, now_ms: u64) -> Result<bool> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::SuppressClick { now_ms, reply })
            .await
            .map_err(|_| Error::DriverClosed)?;
        rx.await.map_err(|_| Error::DriverClosed)
    }
}

/// Owns the controller and its long-press timer
pub struct GestureDriver<H: PlayerHost, O: GestureObserver> {
    controller: GestureController<H, O>,
    rx: mpsc::Receiver<Command>,
    timer: Option<(TimerToken, Instant)>,
}

impl<H: PlayerHost, O: GestureObserver> GestureDriver<H, O> {
    /// Create a driver and the handle used to feed it
    pub fn new(controller: GestureController<H, O>) -> (Self, GestureHandle) {
        Self::with_capacity(controller, DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(controller: GestureController<H, O>, capacity: usize) -> (Self, GestureHandle) {
        let (tx, rx) = mpsc::channel(capacity);
        let driver = Self {
            controller,
            rx,
            timer: None,
        };
        (driver, GestureHandle { tx })
    }

    /// Process inputs until every handle is dropped, then detach and hand
    /// the controller back.
    pub async fn run(mut self) -> GestureController<H, O> {
        info!("Gesture driver started");

        loop {
            self.sync_timer();
            let deadline = self.timer.map(|(_, at)| at);

            tokio::select! {
                command = self.rx.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some((token, _)) = self.timer.take() {
                        debug!(token = token.0, "Long-press timer elapsed");
                        self.controller.long_press_elapsed(token);
                    }
                }
            }
        }

        self.controller.detach();
        info!("Gesture driver stopped");
        self.controller
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Input { input, reply } => {
                let disposition = self.controller.dispatch(input);
                if let Some(reply) = reply {
                    let _ = reply.send(disposition);
                }
            }
            Command::Phase { reply } => {
                let _ = reply.send(self.controller.phase());
            }
            Command::SuppressClick { now_ms, reply } => {
                let _ = reply.send(self.controller.should_suppress_click(now_ms));
            }
        }
    }

    /// Mirror the controller's armed long-press token onto a tokio deadline
    fn sync_timer(&mut self) {
        match self.controller.pending_long_press() {
            None => self.timer = None,
            Some(pending) => {
                let current = self.timer.map(|(token, _)| token);
                if current != Some(pending.token) {
                    self.timer = Some((pending.token, Instant::now() + pending.delay));
                }
            }
        }
    }
}
