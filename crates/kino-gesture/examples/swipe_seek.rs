//! Gesture walkthrough example
//!
//! Drives a simulated fullscreen player through a seek drag, an edge volume
//! swipe, a double tap and a long press, printing the feedback a HUD would
//! receive.
//!
//! Run with: cargo run -p kino-gesture --example swipe_seek

use kino_gesture::{
    GestureConfig, GestureController, RecordingObserver, SimulatedPlayer, TouchEvent,
};

fn main() {
    kino_gesture::init();

    println!("Kino Gesture - Walkthrough");
    println!("==========================\n");

    let player = SimulatedPlayer {
        current_time: 60.0,
        duration: 600.0,
        ..SimulatedPlayer::with_size(390.0, 844.0)
    };
    let mut gestures = GestureController::new(GestureConfig::default(), player, RecordingObserver::new());

    // Seek: drag right across the middle of the screen
    gestures.touch_start(TouchEvent::new(1, 100.0, 420.0, 0));
    for step in 1..=5 {
        gestures.touch_move(TouchEvent::new(1, 100.0 + step as f64 * 40.0, 422.0, step * 16));
    }
    gestures.touch_end(TouchEvent::new(1, 300.0, 422.0, 100));
    println!("After seek drag:   position = {:.1}s", gestures.host().current_time);

    // Volume: swipe up along the right edge
    gestures.touch_start(TouchEvent::new(2, 370.0, 600.0, 1_000));
    gestures.touch_move(TouchEvent::new(2, 370.0, 450.0, 1_050));
    gestures.touch_end(TouchEvent::new(2, 370.0, 450.0, 1_100));
    println!("After edge swipe:  volume = {:.2}", gestures.host().volume);

    // Double tap on the left third
    for t in [2_000u64, 2_150] {
        gestures.touch_start(TouchEvent::new(3, 40.0, 400.0, t));
        gestures.touch_end(TouchEvent::new(3, 40.0, 400.0, t + 40));
    }
    println!("After double tap:  position = {:.1}s", gestures.host().current_time);

    // Long press: fire the timer the controller armed
    gestures.touch_start(TouchEvent::new(4, 200.0, 400.0, 5_000));
    if let Some(timer) = gestures.pending_long_press() {
        gestures.long_press_elapsed(timer.token);
    }
    println!("During long press: rate = {:.1}x", gestures.host().playback_rate);
    gestures.touch_end(TouchEvent::new(4, 200.0, 400.0, 6_000));
    println!("After release:     rate = {:.1}x", gestures.host().playback_rate);

    println!("\nHUD events:");
    for event in &gestures.observer().events {
        println!("  {}", serde_json::to_string(event).unwrap_or_default());
    }
}
