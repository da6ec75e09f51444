//! Gesture-to-volume adapters
//!
//! Converts vertical swipe distance and wheel deltas into signed volume
//! deltas. Deltas follow browser conventions: an upward swipe or scroll-up
//! reports a negative Y delta and raises the volume.

/// Volume delta for a vertical swipe.
///
/// Distance divided by the sensitivity constant; higher sensitivity means a
/// longer swipe per unit of volume. A zero delta yields zero (in-progress
/// horizontal swipes are ignored by the caller).
pub fn swipe_volume_delta(delta_y: f32, sensitivity: f32) -> f32 {
    if delta_y == 0.0 || sensitivity <= 0.0 {
        return 0.0;
    }
    -delta_y / sensitivity
}

/// Volume delta for a wheel event.
///
/// Fixed step per event: scroll down (positive delta) lowers volume, scroll
/// up raises it.
pub fn wheel_volume_delta(delta_y: f32, step: f32) -> f32 {
    if delta_y > 0.0 {
        -step
    } else {
        step
    }
}
