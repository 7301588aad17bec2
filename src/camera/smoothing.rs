// Frame-rate independent smoothing primitives.

use std::f64::consts::PI;

/// Exponential interpolation toward `target`, invariant under frame rate:
/// repeated application over deltas summing to T lands on the same value as a
/// single call with dt = T.
pub fn exp_smooth(current: f64, target: f64, speed: f64, dt: f64) -> f64 {
    current + (target - current) * (1.0 - (-speed * dt).exp())
}

/// Signed minimal rotation from one heading to another, in (-PI, PI].
/// Handles wraparound for unbounded accumulated angles.
pub fn short_angle_dist(from: f64, to: f64) -> f64 {
    let tau = 2.0 * PI;
    ((to - from) % tau + 3.0 * PI) % tau - PI
}
