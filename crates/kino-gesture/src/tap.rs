//! Tap classification
//!
//! A touch that ends without committing an axis is a tap. Two taps close in
//! time and space make a double tap, resolved by horizontal zone. Single taps
//! are recorded and otherwise left to the host's native controls.

use crate::math;
use crate::types::{
    DoubleTapAction, GestureConfig, TouchPoint, CLICK_SUPPRESSION_MS,
    DOUBLE_TAP_MOVE_TOLERANCE_PX, TAP_RECORD_GRACE_MS,
};
use tracing::trace;

/// The most recent unmatched single tap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapRecord {
    /// When the tap ended (ms)
    pub timestamp_ms: u64,
    /// Player-local position
    pub point: TouchPoint,
}

/// Result of classifying one tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Recorded, waiting for a possible second tap
    Single,
    /// Second tap of a pair
    Double(DoubleTapAction),
}

/// Correlates taps into double taps and tracks the click suppression window
#[derive(Debug, Clone)]
pub struct TapClassifier {
    window_ms: u64,
    side_zone_ratio: f64,
    record: Option<TapRecord>,
    suppress_clicks_until_ms: Option<u64>,
}

impl TapClassifier {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            window_ms: config.double_tap_window_ms,
            side_zone_ratio: config.double_tap_side_zone_ratio,
            record: None,
            suppress_clicks_until_ms: None,
        }
    }

    /// The pending single tap, if it has not expired yet
    pub fn record(&self) -> Option<TapRecord> {
        self.record
    }

    /// Classify a tap that ended at `point` (player-local) at `now_ms`
    pub fn classify(&mut self, point: TouchPoint, width: f64, now_ms: u64) -> TapOutcome {
        self.expire(now_ms);

        if let Some(previous) = self.record {
            if self.pairs_with(&previous, point, now_ms) {
                self.record = None;
                self.suppress_clicks_until_ms = Some(now_ms.saturating_add(CLICK_SUPPRESSION_MS));
                let action = math::resolve_double_tap_action(point.x, width, self.side_zone_ratio);
                trace!(%action, x = point.x, "Double tap");
                return TapOutcome::Double(action);
            }
        }

        self.record = Some(TapRecord {
            timestamp_ms: now_ms,
            point,
        });
        TapOutcome::Single
    }

    fn pairs_with(&self, previous: &TapRecord, point: TouchPoint, now_ms: u64) -> bool {
        let elapsed = now_ms.saturating_sub(previous.timestamp_ms);
        elapsed <= self.window_ms
            && (point.x - previous.point.x).abs() <= DOUBLE_TAP_MOVE_TOLERANCE_PX
            && (point.y - previous.point.y).abs() <= DOUBLE_TAP_MOVE_TOLERANCE_PX
    }

    /// Drop the tap record once it is older than the window plus a grace period
    pub fn expire(&mut self, now_ms: u64) {
        let lifetime = self.window_ms + TAP_RECORD_GRACE_MS;
        if let Some(record) = self.record {
            if now_ms.saturating_sub(record.timestamp_ms) > lifetime {
                self.record = None;
            }
        }
        if let Some(until) = self.suppress_clicks_until_ms {
            if now_ms > until {
                self.suppress_clicks_until_ms = None;
            }
        }
    }

    /// Whether a synthesized click/dblclick arriving at `now_ms` should be swallowed
    pub fn should_suppress_click(&self, now_ms: u64) -> bool {
        self.suppress_clicks_until_ms
            .is_some_and(|until| now_ms <= until)
    }

    /// Forget the pending tap
    pub fn clear(&mut self) {
        self.record = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> TapClassifier {
        TapClassifier::new(&GestureConfig::default())
    }

    #[test]
    fn test_single_tap_is_recorded() {
        let mut taps = classifier();
        assert_eq!(taps.classify(TouchPoint::new(60.0, 100.0), 360.0, 1_000), TapOutcome::Single);
        assert_eq!(taps.record().map(|r| r.timestamp_ms), Some(1_000));
        assert!(!taps.should_suppress_click(1_001));
    }

    #[test]
    fn test_double_tap_zones() {
        let mut taps = classifier();
        taps.classify(TouchPoint::new(60.0, 100.0), 360.0, 1_000);
        assert_eq!(
            taps.classify(TouchPoint::new(70.0, 110.0), 360.0, 1_200),
            TapOutcome::Double(DoubleTapAction::Backward)
        );
        assert!(taps.record().is_none());

        taps.classify(TouchPoint::new(180.0, 100.0), 360.0, 5_000);
        assert_eq!(
            taps.classify(TouchPoint::new(180.0, 100.0), 360.0, 5_100),
            TapOutcome::Double(DoubleTapAction::Toggle)
        );

        taps.classify(TouchPoint::new(320.0, 100.0), 360.0, 9_000);
        assert_eq!(
            taps.classify(TouchPoint::new(320.0, 100.0), 360.0, 9_300),
            TapOutcome::Double(DoubleTapAction::Forward)
        );
    }

    #[test]
    fn test_slow_taps_are_singles() {
        let mut taps = classifier();
        taps.classify(TouchPoint::new(60.0, 100.0), 360.0, 1_000);
        assert_eq!(taps.classify(TouchPoint::new(60.0, 100.0), 360.0, 1_301), TapOutcome::Single);
        // the second tap becomes the new record
        assert_eq!(taps.record().map(|r| r.timestamp_ms), Some(1_301));
    }

    #[test]
    fn test_distant_taps_are_singles() {
        let mut taps = classifier();
        taps.classify(TouchPoint::new(60.0, 100.0), 360.0, 1_000);
        assert_eq!(taps.classify(TouchPoint::new(101.0, 100.0), 360.0, 1_100), TapOutcome::Single);
        taps.classify(TouchPoint::new(60.0, 100.0), 360.0, 2_000);
        assert_eq!(taps.classify(TouchPoint::new(60.0, 141.0), 360.0, 2_100), TapOutcome::Single);
    }

    #[test]
    fn test_third_tap_starts_fresh() {
        let mut taps = classifier();
        taps.classify(TouchPoint::new(320.0, 100.0), 360.0, 1_000);
        taps.classify(TouchPoint::new(320.0, 100.0), 360.0, 1_100);
        assert_eq!(taps.classify(TouchPoint::new(320.0, 100.0), 360.0, 1_200), TapOutcome::Single);
    }

    #[test]
    fn test_record_expires() {
        let mut taps = classifier();
        taps.classify(TouchPoint::new(60.0, 100.0), 360.0, 1_000);
        taps.expire(1_350);
        assert!(taps.record().is_some());
        taps.expire(1_351);
        assert!(taps.record().is_none());
    }

    #[test]
    fn test_click_suppression_window() {
        let mut taps = classifier();
        taps.classify(TouchPoint::new(180.0, 100.0), 360.0, 1_000);
        taps.classify(TouchPoint::new(180.0, 100.0), 360.0, 1_100);
        assert!(taps.should_suppress_click(1_100));
        assert!(taps.should_suppress_click(1_500));
        assert!(!taps.should_suppress_click(1_501));
        taps.expire(1_501);
        assert!(!taps.should_suppress_click(1_200));
    }
}
