//! Axis & intent resolution for touch-move events

use crate::math;
use crate::session::GestureSession;
use crate::types::{Axis, GestureConfig, TouchPoint};

/// Result of classifying a move while no axis is committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Still inside the activation threshold
    Undecided,
    /// The drag belongs to this axis from now on
    Commit(Axis),
    /// Vertical drag that started outside the volume side zones; hand it back to the host
    Release,
}

/// Turns raw drag deltas into axis decisions, seek previews and volumes
#[derive(Debug, Clone)]
pub struct AxisResolver {
    config: GestureConfig,
}

impl AxisResolver {
    pub fn new(config: GestureConfig) -> Self {
        Self { config }
    }

    /// Decide what a move means for a session without a committed axis
    pub fn classify(&self, session: &GestureSession, point: TouchPoint) -> MoveOutcome {
        let (dx, dy) = session.delta(point);
        match math::resolve_direction(dx, dy, self.config.activation_threshold_px) {
            None => MoveOutcome::Undecided,
            Some(Axis::Horizontal) => MoveOutcome::Commit(Axis::Horizontal),
            Some(Axis::Vertical) => {
                let in_zone = math::is_in_volume_zone(
                    session.start().x,
                    session.width(),
                    self.config.volume_side_zone_ratio,
                );
                if in_zone {
                    MoveOutcome::Commit(Axis::Vertical)
                } else {
                    MoveOutcome::Release
                }
            }
        }
    }

    /// Seek target for the current finger position
    pub fn seek_preview(&self, session: &GestureSession, point: TouchPoint, duration: f64) -> f64 {
        let (dx, _) = session.delta(point);
        math::compute_seek_preview(
            session.start_time(),
            dx,
            duration,
            self.config.seek_seconds_per_100px,
        )
    }

    /// Volume for the current finger position
    pub fn volume(&self, session: &GestureSession, point: TouchPoint) -> f64 {
        let (_, dy) = session.delta(point);
        math::compute_volume_from_swipe(
            session.start_volume(),
            dy,
            session.height(),
            self.config.volume_full_swipe_ratio,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PlayerBounds, TouchEvent};

    fn session_at(x: f64, y: f64) -> GestureSession {
        let event = TouchEvent::new(1, x, y, 0);
        GestureSession::begin(&event, PlayerBounds::new(0.0, 0.0, 360.0, 360.0), 100.0, 0.5)
    }

    #[test]
    fn test_small_moves_are_undecided() {
        let resolver = AxisResolver::new(GestureConfig::default());
        let s = session_at(180.0, 180.0);
        assert_eq!(resolver.classify(&s, TouchPoint::new(190.0, 185.0)), MoveOutcome::Undecided);
    }

    #[test]
    fn test_horizontal_commits_anywhere() {
        let resolver = AxisResolver::new(GestureConfig::default());
        let s = session_at(180.0, 180.0);
        assert_eq!(
            resolver.classify(&s, TouchPoint::new(200.0, 185.0)),
            MoveOutcome::Commit(Axis::Horizontal)
        );
    }

    #[test]
    fn test_vertical_in_side_zone_commits() {
        let resolver = AxisResolver::new(GestureConfig::default());
        let s = session_at(300.0, 180.0);
        assert_eq!(
            resolver.classify(&s, TouchPoint::new(302.0, 150.0)),
            MoveOutcome::Commit(Axis::Vertical)
        );
    }

    #[test]
    fn test_vertical_in_center_is_released() {
        let resolver = AxisResolver::new(GestureConfig::default());
        let s = session_at(180.0, 180.0);
        assert_eq!(resolver.classify(&s, TouchPoint::new(182.0, 120.0)), MoveOutcome::Release);
    }

    #[test]
    fn test_seek_preview_and_volume() {
        let resolver = AxisResolver::new(GestureConfig::default());
        let s = session_at(50.0, 200.0);
        assert_eq!(resolver.seek_preview(&s, TouchPoint::new(250.0, 200.0), 240.0), 124.0);
        assert!((resolver.volume(&s, TouchPoint::new(50.0, 20.0)) - 1.0).abs() < 1e-9);
    }
}
