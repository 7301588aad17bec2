// Easing curves for camera and globe animations.
// All curves map normalized progress t in [0,1] to eased progress.

/// cubic-bezier(0.33, 1, 0.68, 1)
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// cubic-bezier(0.65, 0, 0.35, 1)
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// cubic-bezier(0.22, 1, 0.36, 1)
pub fn ease_out_quint(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(5)
}

/// cubic-bezier(0.16, 1, 0.3, 1) - good for dramatic zooms
#[allow(dead_code)]
pub fn ease_out_expo(t: f64) -> f64 {
    if t >= 1.0 { 1.0 } else { 1.0 - 2f64.powf(-10.0 * t) }
}

/// cubic-bezier(0.76, 0, 0.24, 1)
#[allow(dead_code)]
pub fn ease_in_out_quart(t: f64) -> f64 {
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

/// Blended expo/quint deceleration used by the deep-space intro zoom.
/// Starts fast, ends very smooth. Approximates cubic-bezier(0.05, 0.95, 0.15, 1).
pub fn ease_out_space_zoom(t: f64) -> f64 {
    let expo = 1.0 - 2f64.powf(-12.0 * t);
    let quint = 1.0 - (1.0 - t).powi(5);
    expo * 0.7 + quint * 0.3
}

/// Back-out curve with a slight overshoot past 1.0 before settling.
#[allow(dead_code)]
pub fn ease_out_back(t: f64) -> f64 {
    let c1 = 1.70158;
    let c3 = c1 + 1.0;
    1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
}

/// Quadratic ease-in-out for the scroll-driven camera pull-back.
/// Slow start, smooth middle, gentle end.
pub fn ease_scroll_camera(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}
