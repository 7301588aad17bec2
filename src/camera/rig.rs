// Camera rig state and the tuned motion constants.

/// Idle auto-rotation speed, radians per second.
pub const IDLE_ROTATION_SPEED: f64 = 0.015;
/// Milliseconds of no interaction before auto-rotation resumes.
pub const IDLE_TIMEOUT_MS: f64 = 2000.0;
/// Auto-rotation ramps from 0% to 100% speed over this window after the timeout.
pub const IDLE_EASE_IN_MS: f64 = 2000.0;
/// 1 = counter-clockwise, -1 = clockwise.
pub const IDLE_DIRECTION: f64 = 1.0;

/// Seconds to rotate + zoom onto a state.
pub const FOCUS_ROTATION_DURATION_S: f64 = 1.2;
/// Seconds for a zoom-only animation (short rotations and zoom-out).
pub const ZOOM_ANIMATION_DURATION_S: f64 = 0.8;

/// Maximum pitch tilt in radians when framing high/low latitudes.
pub const MAX_TILT_ANGLE: f64 = 0.50;

// Momentum - tuned for a ~2.5 second natural spin decay.
pub const MOMENTUM_FRICTION: f64 = 0.968;
pub const MOMENTUM_THRESHOLD: f64 = 0.00012;
/// Gentle nudge injected when momentum dies while spinning against the idle direction.
pub const SPRING_EASE_VELOCITY: f64 = 0.0004;
/// Hard cap on spin velocity, radians per frame-equivalent.
pub const MAX_SPIN_VELOCITY: f64 = 0.08;

// Drag velocity estimation: exponential moving average, 70% previous sample.
pub const DRAG_VELOCITY_KEEP: f64 = 0.7;
pub const DRAG_VELOCITY_BLEND: f64 = 0.3;

// Keyboard-held rotation.
pub const KEY_ROTATION_SPEED: f64 = 0.025;
pub const KEY_MAX_VELOCITY: f64 = 0.04;
/// Per-frame blend toward the held target velocity.
pub const KEY_BLEND: f64 = 0.15;
/// Per-frame decay after release.
pub const KEY_DECAY: f64 = 0.92;
/// Residual keyboard velocity hands off into momentum at this scale.
pub const KEY_HANDOFF_SCALE: f64 = 2.0;
pub const KEY_STOP_EPSILON: f64 = 0.0001;
pub const KEY_HANDOFF_EPSILON: f64 = 0.001;

/// Fixed camera height above the equatorial plane.
pub const CAMERA_Y: f64 = 4.0;
const DEFAULT_ORBIT_XZ: f64 = 5.5;
const ZOOMED_ORBIT_XZ: f64 = 2.5;

/// Default orbit distance from the globe center.
pub fn default_camera_distance() -> f64 {
    (CAMERA_Y * CAMERA_Y + DEFAULT_ORBIT_XZ * DEFAULT_ORBIT_XZ).sqrt()
}

/// Distance when zoomed onto a selected state.
pub fn zoomed_camera_distance() -> f64 {
    (CAMERA_Y * CAMERA_Y + ZOOMED_ORBIT_XZ * ZOOMED_ORBIT_XZ).sqrt()
}

// Deep-space intro.
pub const INTRO_START_DISTANCE: f64 = 100.0;
pub const INTRO_DURATION_S: f64 = 3.5;
pub const INTRO_EARTH_SCALE_START: f64 = 0.1;
/// Frames pinned at the start position while shaders/textures warm up.
pub const INTRO_WARMUP_FRAMES: u32 = 3;
/// Per-frame delta clamp inside the intro; a slow frame slows the animation
/// instead of jumping it forward.
pub const INTRO_DELTA_CLAMP_S: f64 = 0.033;
/// Looser clamp for general motion integration.
pub const FRAME_DELTA_CLAMP_S: f64 = 0.1;
/// Wall-clock grace beyond the intro duration before progress is forced to 1.
pub const INTRO_WALL_CLOCK_GRACE_MS: f64 = 2000.0;

// Scroll-coupled camera modulation.
/// How far the camera pulls back at full page scroll.
pub const SCROLL_MAX_CAMERA_DISTANCE: f64 = 18.0;
/// Exponential smooth speed for the scroll-driven camera.
pub const SCROLL_CAMERA_SPEED: f64 = 5.0;
/// How quickly accumulated scroll rotation drains into yaw.
pub const SCROLL_ROTATION_SMOOTH: f64 = 3.5;
/// Radians of rotation per unit of scroll progress.
pub const SCROLL_ROTATION_SPEED: f64 = 1.6;
/// Vertical camera offset at full scroll.
pub const SCROLL_Y_OFFSET_MAX: f64 = 1.5;
pub const SCROLL_DELTA_EPSILON: f64 = 0.000005;

// Homing spring (scroll-up pull toward the home heading).
pub const HOMING_PULL_SPEED: f64 = 1.2;
/// Full spring strength beyond this angular distance, tapering below it.
pub const HOMING_FULL_STRENGTH_RADIUS: f64 = 0.3;
/// Close enough to home - stop pulling.
pub const HOMING_STOP_RADIUS: f64 = 0.005;
/// Homing deactivates after this long with no further upward scroll.
pub const HOMING_TIMEOUT_MS: f64 = 1200.0;

// Viewport composition.
/// Shifts the globe left when zoomed to make room for the side panel.
pub const SIDEBAR_CAMERA_OFFSET: f64 = -0.1;
/// Negative = globe appears higher when zoomed.
pub const ZOOMED_CAMERA_Y_OFFSET: f64 = -0.95;
/// Look-at height; accounts for the header band.
pub const EARTH_LOOK_OFFSET_Y: f64 = 0.35;

/// Mutable camera state, owned exclusively by the `Director`.
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Radial distance from the globe center.
    pub distance: f64,
    /// Rotation about the vertical axis. Unbounded; wraps logically mod 2*PI.
    pub yaw: f64,
    /// Tilt revealing higher/lower latitudes, clamped to +-MAX_TILT_ANGLE.
    pub pitch: f64,
    /// Globe scale, animated only during the intro.
    pub earth_scale: f64,
    /// Signed angular velocity driving momentum.
    pub velocity: f64,
}

impl CameraRig {
    pub fn new(home_yaw: f64) -> Self {
        Self {
            distance: INTRO_START_DISTANCE,
            yaw: home_yaw,
            pitch: 0.0,
            earth_scale: INTRO_EARTH_SCALE_START,
            velocity: 0.0,
        }
    }

    /// Hard clamps applied unconditionally after every advance. Corrects any
    /// numeric drift rather than reporting it.
    pub fn clamp(&mut self) {
        self.velocity = self.velocity.clamp(-MAX_SPIN_VELOCITY, MAX_SPIN_VELOCITY);
        self.distance = self
            .distance
            .clamp(zoomed_camera_distance(), INTRO_START_DISTANCE);
        self.pitch = self.pitch.clamp(-MAX_TILT_ANGLE, MAX_TILT_ANGLE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances_are_ordered() {
        assert!(zoomed_camera_distance() < default_camera_distance());
        assert!(default_camera_distance() < SCROLL_MAX_CAMERA_DISTANCE);
        assert!(SCROLL_MAX_CAMERA_DISTANCE < INTRO_START_DISTANCE);
    }

    #[test]
    fn clamp_corrects_out_of_range_values() {
        let mut rig = CameraRig::new(0.0);
        rig.velocity = 5.0;
        rig.distance = 1e6;
        rig.pitch = -3.0;
        rig.clamp();
        assert_eq!(rig.velocity, MAX_SPIN_VELOCITY);
        assert_eq!(rig.distance, INTRO_START_DISTANCE);
        assert_eq!(rig.pitch, -MAX_TILT_ANGLE);

        rig.distance = 0.0;
        rig.clamp();
        assert_eq!(rig.distance, zoomed_camera_distance());
    }
}
