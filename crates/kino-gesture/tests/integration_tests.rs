//! Integration tests for Kino Gesture

use kino_gesture::{
    math, DoubleTapAction, EventDisposition, GestureConfig, GestureController, GestureEvent,
    GestureInput, GesturePhase, RecordingObserver, SimulatedPlayer, TouchEvent, TouchTarget,
};

fn player() -> SimulatedPlayer {
    SimulatedPlayer {
        current_time: 100.0,
        duration: 240.0,
        ..SimulatedPlayer::with_size(360.0, 360.0)
    }
}

fn controller() -> GestureController<SimulatedPlayer, RecordingObserver> {
    GestureController::new(GestureConfig::default(), player(), RecordingObserver::new())
}

// =============================================================================
// Math Scenarios
// =============================================================================

#[test]
fn test_seek_preview_scenarios() {
    assert_eq!(math::compute_seek_preview(100.0, 200.0, 240.0, 12.0), 124.0);
    assert_eq!(math::compute_seek_preview(8.0, -300.0, 240.0, 12.0), 0.0);
    assert_eq!(math::compute_seek_preview(235.0, 200.0, 240.0, 12.0), 240.0);
}

#[test]
fn test_volume_scenarios() {
    let up = math::compute_volume_from_swipe(0.5, -180.0, 360.0, 0.9);
    assert!((up - 1.0).abs() < 1e-9);
    assert_eq!(math::compute_volume_from_swipe(0.05, 500.0, 360.0, 0.9), 0.0);
}

#[test]
fn test_zone_scenarios() {
    assert_eq!(math::resolve_double_tap_action(60.0, 360.0, 0.22), DoubleTapAction::Backward);
    assert_eq!(math::resolve_double_tap_action(180.0, 360.0, 0.22), DoubleTapAction::Toggle);
    assert_eq!(math::resolve_double_tap_action(320.0, 360.0, 0.22), DoubleTapAction::Forward);

    assert!(math::is_in_volume_zone(80.0, 360.0, 0.32));
    assert!(!math::is_in_volume_zone(180.0, 360.0, 0.32));
    assert!(math::is_in_volume_zone(300.0, 360.0, 0.32));
}

// =============================================================================
// Lifecycle Scenarios
// =============================================================================

#[test]
fn test_lock_mid_drag_resets_once_without_seeking() {
    let mut gestures = controller();

    gestures.touch_start(TouchEvent::new(1, 60.0, 180.0, 0));
    gestures.touch_move(TouchEvent::new(1, 160.0, 180.0, 40));
    assert_eq!(gestures.phase(), GesturePhase::Seeking);

    gestures.dispatch(GestureInput::LockChanged(true));
    assert_eq!(gestures.phase(), GesturePhase::Idle);

    let ends = gestures
        .observer()
        .count(|e| matches!(e, GestureEvent::SeekPreviewEnd));
    assert_eq!(ends, 1);
    assert_eq!(gestures.host().current_time, 100.0);
}

#[test]
fn test_fullscreen_exit_mid_volume_stops_mutation() {
    let mut gestures = controller();

    gestures.touch_start(TouchEvent::new(1, 340.0, 300.0, 0));
    gestures.touch_move(TouchEvent::new(1, 340.0, 250.0, 30));
    let volume_at_exit = gestures.host().volume;
    assert!(volume_at_exit > 0.5);

    gestures.host_mut().fullscreen = false;
    gestures.fullscreen_changed(false);

    assert_eq!(
        gestures.touch_move(TouchEvent::new(1, 340.0, 0.0, 60)),
        EventDisposition::PassThrough
    );
    assert_eq!(gestures.host().volume, volume_at_exit);
    assert_eq!(
        gestures.observer().count(|e| matches!(e, GestureEvent::VolumeEnd)),
        1
    );

    // no new sessions outside fullscreen
    gestures.touch_start(TouchEvent::new(2, 340.0, 300.0, 100));
    assert_eq!(gestures.phase(), GesturePhase::Idle);
}

#[test]
fn test_reset_triggers_are_idempotent() {
    let mut gestures = controller();
    gestures.touch_start(TouchEvent::new(1, 60.0, 180.0, 0));
    gestures.touch_move(TouchEvent::new(1, 160.0, 180.0, 40));

    for input in [
        GestureInput::Resized,
        GestureInput::OrientationChanged,
        GestureInput::LockChanged(true),
        GestureInput::FullscreenChanged(false),
        GestureInput::EnabledChanged(false),
        GestureInput::Detach,
    ] {
        gestures.dispatch(input);
    }

    assert_eq!(gestures.observer().events.len(), 2);
    assert_eq!(gestures.observer().events[1], GestureEvent::SeekPreviewEnd);
}

#[test]
fn test_reset_with_no_session_is_noop() {
    let mut gestures = controller();
    gestures.detach();
    gestures.resized();
    gestures.lock_changed(true);
    assert_eq!(gestures.phase(), GesturePhase::Idle);
    assert!(gestures.observer().events.is_empty());
    assert_eq!(gestures.host(), &player());
}

// =============================================================================
// Gesture Flows
// =============================================================================

#[test]
fn test_chrome_touches_are_ignored() {
    let mut gestures = controller();
    for target in [TouchTarget::Controls, TouchTarget::Menu, TouchTarget::FormInput] {
        gestures.touch_start(TouchEvent::new(1, 60.0, 340.0, 0).on(target));
        assert_eq!(gestures.phase(), GesturePhase::Idle);
    }
}

#[test]
fn test_seek_on_live_stream_is_unbounded() {
    let host = SimulatedPlayer {
        duration: f64::INFINITY,
        current_time: 3_600.0,
        ..player()
    };
    let mut gestures = GestureController::new(GestureConfig::default(), host, RecordingObserver::new());

    gestures.touch_start(TouchEvent::new(1, 10.0, 180.0, 0));
    gestures.touch_move(TouchEvent::new(1, 350.0, 180.0, 50));
    gestures.touch_end(TouchEvent::new(1, 350.0, 180.0, 90));

    assert!((gestures.host().current_time - 3_640.8).abs() < 1e-9);
}

#[test]
fn test_player_offset_in_viewport() {
    let host = SimulatedPlayer {
        bounds: kino_gesture::PlayerBounds::new(500.0, 100.0, 360.0, 360.0),
        ..player()
    };
    let mut gestures = GestureController::new(GestureConfig::default(), host, RecordingObserver::new());

    // local x = 60: backward zone
    for t in [0, 120] {
        gestures.touch_start(TouchEvent::new(1, 560.0, 280.0, t));
        gestures.touch_end(TouchEvent::new(1, 560.0, 280.0, t + 30));
    }
    assert_eq!(gestures.host().current_time, 90.0);
}

#[test]
fn test_misconfigured_rate_is_clamped() {
    let config = GestureConfig {
        long_press_rate: 1_000.0,
        ..Default::default()
    };
    let mut gestures = GestureController::new(config, player(), RecordingObserver::new());

    gestures.touch_start(TouchEvent::new(1, 180.0, 180.0, 0));
    let timer = gestures.pending_long_press().unwrap();
    gestures.long_press_elapsed(timer.token);
    assert_eq!(gestures.host().playback_rate, kino_gesture::MAX_PLAYBACK_RATE);

    gestures.touch_end(TouchEvent::new(1, 180.0, 180.0, 900));
    assert_eq!(gestures.host().playback_rate, 1.0);
}

#[test]
fn test_double_tap_after_drag_is_not_a_tap() {
    let mut gestures = controller();

    gestures.touch_start(TouchEvent::new(1, 320.0, 180.0, 0));
    gestures.touch_end(TouchEvent::new(1, 320.0, 180.0, 30));

    // second touch drags horizontally: it is a seek, not the second tap
    gestures.touch_start(TouchEvent::new(1, 320.0, 180.0, 100));
    gestures.touch_move(TouchEvent::new(1, 300.0, 180.0, 130));
    gestures.touch_end(TouchEvent::new(1, 300.0, 180.0, 160));

    assert!((gestures.host().current_time - 97.6).abs() < 1e-9);
    assert!(!gestures.should_suppress_click(170));
}

#[test]
fn test_events_serialize_tagged() {
    let event = GestureEvent::SkipNotice {
        action: DoubleTapAction::Forward,
        seconds: 10.0,
    };
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains(r#""event":"skip_notice""#));
    assert!(json.contains(r#""action":"forward""#));
}
