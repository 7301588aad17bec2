// Scroll-coupled camera modulation: pull-back distance, parallax rotation and
// the "homing" spring that returns the globe to the US heading on scroll-up.

use crate::camera::easing::ease_scroll_camera;
use crate::camera::rig::{
    HOMING_FULL_STRENGTH_RADIUS, HOMING_PULL_SPEED, HOMING_STOP_RADIUS, HOMING_TIMEOUT_MS,
    SCROLL_CAMERA_SPEED, SCROLL_DELTA_EPSILON, SCROLL_MAX_CAMERA_DISTANCE,
    SCROLL_ROTATION_SMOOTH, SCROLL_ROTATION_SPEED, SCROLL_Y_OFFSET_MAX, default_camera_distance,
};
use crate::camera::smoothing::{exp_smooth, short_angle_dist};

/// Residual accumulated rotation below this is considered drained.
const ROTATION_DRAIN_EPSILON: f64 = 0.00005;

/// Per-frame result of the yaw modulation pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollSpin {
    /// Yaw adjustment to apply on top of the rig's authoritative yaw.
    pub yaw_delta: f64,
    /// True while scroll motion should suppress idle auto-rotation.
    pub is_scrolling: bool,
    /// True when this pass counts as user interaction (resets the idle timer).
    pub interacted: bool,
}

/// Context the coupler needs from the state machine for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ScrollFrame {
    /// No named phase active, not dragging, intro done, nothing selected.
    pub can_rotate: bool,
    pub intro_complete: bool,
    pub current_yaw: f64,
    pub home_yaw: f64,
}

#[derive(Debug, Clone)]
pub struct ScrollCoupler {
    smoothed_progress: f64,
    prev_progress: f64,
    smoothed_distance: f64,
    smoothed_y_offset: f64,
    rotation_accum: f64,
    homing_active: bool,
    last_homing_ms: f64,
}

impl ScrollCoupler {
    pub fn new() -> Self {
        Self {
            smoothed_progress: 0.0,
            prev_progress: 0.0,
            smoothed_distance: default_camera_distance(),
            smoothed_y_offset: 0.0,
            rotation_accum: 0.0,
            homing_active: false,
            last_homing_ms: 0.0,
        }
    }

    /// Drops any in-flight homing pull, e.g. when a drag grabs the globe.
    pub fn cancel_homing(&mut self) {
        self.homing_active = false;
    }

    /// Force-reset to neutral so a stale pull-back offset cannot cause a jump
    /// when the intro ends or a state is deselected.
    pub fn reset_neutral(&mut self, distance: f64) {
        self.smoothed_progress = 0.0;
        self.prev_progress = 0.0;
        self.smoothed_distance = distance;
        self.smoothed_y_offset = 0.0;
        self.rotation_accum = 0.0;
        self.homing_active = false;
    }

    /// Yaw modulation pass, run after phase advance and before idle rotation.
    /// `raw_target` is the externally supplied scroll progress, already forced
    /// to 0 by the caller while the intro runs or a state is selected.
    pub fn update_spin(
        &mut self,
        raw_target: f64,
        dt: f64,
        now_ms: f64,
        frame: ScrollFrame,
    ) -> ScrollSpin {
        self.smoothed_progress = exp_smooth(
            self.smoothed_progress,
            raw_target.clamp(0.0, 1.0),
            SCROLL_CAMERA_SPEED,
            dt,
        );
        let delta = self.smoothed_progress - self.prev_progress;

        let mut spin = ScrollSpin {
            is_scrolling: delta.abs() > SCROLL_DELTA_EPSILON
                || self.rotation_accum.abs() > 0.001,
            ..Default::default()
        };

        if frame.can_rotate && delta.abs() > SCROLL_DELTA_EPSILON {
            if delta < 0.0 {
                // Scrolling up: arm the homing spring and refresh its timer.
                self.homing_active = true;
                self.last_homing_ms = now_ms;
            } else {
                // Scrolling down: free parallax rotation, cancel homing.
                self.homing_active = false;
                self.rotation_accum -= delta * SCROLL_ROTATION_SPEED;
            }
            spin.interacted = true;
        } else if self.homing_active && now_ms - self.last_homing_ms > HOMING_TIMEOUT_MS {
            self.homing_active = false;
            spin.interacted = true;
        }

        // Continuous spring pull toward home while homing is armed. The pull
        // strength tapers as the heading approaches home so the globe settles
        // without oscillating.
        if frame.can_rotate && self.homing_active {
            let diff = short_angle_dist(frame.current_yaw, frame.home_yaw);
            if diff.abs() > HOMING_STOP_RADIUS {
                let ease_factor = (diff.abs() / HOMING_FULL_STRENGTH_RADIUS).min(1.0);
                spin.yaw_delta += exp_smooth(0.0, diff, HOMING_PULL_SPEED * ease_factor, dt);
            } else {
                self.homing_active = false;
                spin.interacted = true;
            }
        }

        // Drain accumulated scroll rotation into actual yaw.
        if frame.can_rotate {
            if self.rotation_accum.abs() > ROTATION_DRAIN_EPSILON {
                let step = exp_smooth(0.0, self.rotation_accum, SCROLL_ROTATION_SMOOTH, dt);
                spin.yaw_delta += step;
                self.rotation_accum -= step;
            }
        } else if !frame.intro_complete {
            self.rotation_accum = 0.0;
        }

        self.prev_progress = self.smoothed_progress;
        spin
    }

    /// Distance blending pass, run last before the transform is composed.
    /// Returns the effective camera distance and scroll Y offset.
    pub fn blend_distance(
        &mut self,
        rig_distance: f64,
        dt: f64,
        intro_complete: bool,
        selected: bool,
        animating: bool,
        zooming_out: bool,
    ) -> (f64, f64) {
        let default_dist = default_camera_distance();

        if intro_complete && !selected && !animating {
            let eased = ease_scroll_camera(self.smoothed_progress);
            let target_distance =
                default_dist + (SCROLL_MAX_CAMERA_DISTANCE - default_dist) * eased;
            let target_y = eased * SCROLL_Y_OFFSET_MAX;

            self.smoothed_distance =
                exp_smooth(self.smoothed_distance, target_distance, SCROLL_CAMERA_SPEED, dt);
            self.smoothed_y_offset =
                exp_smooth(self.smoothed_y_offset, target_y, SCROLL_CAMERA_SPEED, dt);
            (self.smoothed_distance, self.smoothed_y_offset)
        } else if !intro_complete {
            // Track the intro camera so there is no jump at handoff.
            self.smoothed_distance = rig_distance;
            self.smoothed_y_offset = 0.0;
            (rig_distance, 0.0)
        } else if selected || (animating && !zooming_out) {
            // Selected or zooming in: hold neutral so deselection starts clean.
            self.smoothed_distance = default_dist;
            self.smoothed_y_offset = 0.0;
            (rig_distance, 0.0)
        } else {
            // Zoom-out in flight: follow the animated distance for a smooth
            // handoff once it completes.
            self.smoothed_distance = rig_distance;
            self.smoothed_y_offset = 0.0;
            (rig_distance, 0.0)
        }
    }
}

impl Default for ScrollCoupler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 0.0166;

    fn frame(yaw: f64) -> ScrollFrame {
        ScrollFrame {
            can_rotate: true,
            intro_complete: true,
            current_yaw: yaw,
            home_yaw: 0.0,
        }
    }

    /// Drive the coupler to a steady downward-scrolled position first.
    fn scrolled_coupler(progress: f64) -> ScrollCoupler {
        let mut c = ScrollCoupler::new();
        let mut now = 0.0;
        for _ in 0..400 {
            now += DT * 1000.0;
            c.update_spin(progress, DT, now, frame(0.0));
        }
        c
    }

    #[test]
    fn scroll_down_accumulates_negative_rotation() {
        let mut c = ScrollCoupler::new();
        let mut yaw = 0.0;
        let mut now = 0.0;
        for _ in 0..120 {
            now += DT * 1000.0;
            let spin = c.update_spin(1.0, DT, now, frame(yaw));
            yaw += spin.yaw_delta;
        }
        // Scrolling down rotates the globe opposite to the idle direction.
        assert!(yaw < -0.5);
        assert!(!c.homing_active);
    }

    #[test]
    fn scroll_up_homing_converges_toward_home() {
        let mut c = scrolled_coupler(1.0);
        let mut yaw = 2.0;
        let mut now = 100_000.0;

        // Continuous upward scroll: the raw target creeps down every frame so
        // each pass sees a negative delta and the homing timer stays fresh.
        for step in 0..500 {
            now += DT * 1000.0;
            let target = (1.0 - step as f64 * 0.002).max(0.0);
            let spin = c.update_spin(target, DT, now, frame(yaw));
            let prev = yaw;
            yaw += spin.yaw_delta;
            if step > 0 {
                assert!(c.homing_active, "homing dropped at step {step}");
                // The pull is monotone toward home (0.0).
                assert!(yaw <= prev + 1e-12);
            }
        }
        // The spring tapers near home, so after ~8 seconds of scroll-up the
        // heading is well inside the full-strength radius.
        assert!(
            short_angle_dist(yaw, 0.0).abs() < HOMING_FULL_STRENGTH_RADIUS,
            "yaw {yaw} did not settle near home"
        );
    }

    #[test]
    fn homing_disarms_inside_stop_radius() {
        let mut c = scrolled_coupler(1.0);
        let mut now = 100_000.0;

        // Arm homing with the heading already a hair from home.
        now += DT * 1000.0;
        let spin = c.update_spin(0.5, DT, now, frame(HOMING_STOP_RADIUS * 0.5));
        assert!(!c.homing_active, "should disarm within the stop radius");
        assert_eq!(spin.yaw_delta, 0.0);
    }

    #[test]
    fn homing_times_out_without_upward_input() {
        let mut c = scrolled_coupler(1.0);
        let mut now = 100_000.0;

        // One upward tick arms homing.
        now += DT * 1000.0;
        c.update_spin(0.5, DT, now, frame(2.0));
        assert!(c.homing_active);

        // Freeze the scroll signal at its smoothed value; after the timeout
        // homing must disarm on its own. Hold yaw at home so the spring makes
        // no progress and only the timer can end it.
        let settled = c.smoothed_progress;
        let deadline = now + HOMING_TIMEOUT_MS + 200.0;
        while now < deadline {
            now += DT * 1000.0;
            c.update_spin(settled, DT, now, frame(2.0));
        }
        assert!(!c.homing_active);
    }

    #[test]
    fn neutral_reset_clears_all_modulation() {
        let mut c = scrolled_coupler(1.0);
        c.reset_neutral(default_camera_distance());
        assert_eq!(c.smoothed_progress, 0.0);
        let (dist, y) = c.blend_distance(default_camera_distance(), DT, true, false, false, false);
        assert!((dist - default_camera_distance()).abs() < 1e-9);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn pull_back_approaches_scroll_max() {
        let mut c = ScrollCoupler::new();
        let mut now = 0.0;
        let mut dist = default_camera_distance();
        let mut y = 0.0;
        for _ in 0..600 {
            now += DT * 1000.0;
            c.update_spin(1.0, DT, now, frame(0.0));
            let (d, yo) = c.blend_distance(default_camera_distance(), DT, true, false, false, false);
            dist = d;
            y = yo;
        }
        assert!((dist - SCROLL_MAX_CAMERA_DISTANCE).abs() < 0.05);
        assert!((y - SCROLL_Y_OFFSET_MAX).abs() < 0.01);
    }

    #[test]
    fn selected_state_holds_neutral_distance() {
        let mut c = scrolled_coupler(1.0);
        let (dist, y) = c.blend_distance(3.0, DT, true, true, false, false);
        // While selected, the animated distance passes through untouched and
        // the smoothed values snap to neutral.
        assert_eq!(dist, 3.0);
        assert_eq!(y, 0.0);
        // Resuming the blend starts from the neutral distance, not from the
        // stale pulled-back one.
        let (dist2, _) = c.blend_distance(default_camera_distance(), DT, true, false, false, false);
        assert!(dist2 >= default_camera_distance());
        assert!(dist2 < default_camera_distance() + 1.0);
    }
}
