// The animation state machine. Owns the camera rig and advances it once per
// frame, resolving the intro, focus/zoom animations, momentum, keyboard
// rotation, scroll modulation and idle auto-rotation in a fixed order.

use log::debug;

use super::easing::{ease_in_out_cubic, ease_out_cubic, ease_out_quint, ease_out_space_zoom};
use super::rig::{
    CameraRig, DRAG_VELOCITY_BLEND, DRAG_VELOCITY_KEEP, FRAME_DELTA_CLAMP_S, IDLE_DIRECTION,
    IDLE_EASE_IN_MS, IDLE_TIMEOUT_MS, INTRO_DELTA_CLAMP_S, INTRO_DURATION_S,
    INTRO_EARTH_SCALE_START, INTRO_START_DISTANCE, INTRO_WALL_CLOCK_GRACE_MS, INTRO_WARMUP_FRAMES,
    IDLE_ROTATION_SPEED, KEY_BLEND, KEY_DECAY, KEY_HANDOFF_EPSILON, KEY_HANDOFF_SCALE,
    KEY_MAX_VELOCITY, KEY_ROTATION_SPEED, KEY_STOP_EPSILON, MAX_SPIN_VELOCITY,
    MOMENTUM_FRICTION, MOMENTUM_THRESHOLD, SPRING_EASE_VELOCITY, FOCUS_ROTATION_DURATION_S,
    ZOOM_ANIMATION_DURATION_S, default_camera_distance, zoomed_camera_distance,
};
use super::smoothing::short_angle_dist;
use super::transform::{self, ComposeInput, RenderTransform};
use crate::scroll::{ScrollCoupler, ScrollFrame};

/// Earth fades in between these intro progress marks.
const INTRO_FADE_START: f64 = 0.05;
const INTRO_FADE_END: f64 = 0.90;
/// State meshes fade in over this window once the intro hands off unselected.
const STATES_FADE_DURATION_MS: f64 = 800.0;

/// Motion parameters that can be tuned through the settings file. Everything
/// else stays a compile-time constant.
#[derive(Debug, Clone)]
pub struct Tunables {
    pub intro_duration_s: f64,
    pub focus_duration_s: f64,
    pub zoom_duration_s: f64,
    pub idle_rotation_speed: f64,
    pub momentum_friction: f64,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            intro_duration_s: INTRO_DURATION_S,
            focus_duration_s: FOCUS_ROTATION_DURATION_S,
            zoom_duration_s: ZOOM_ANIMATION_DURATION_S,
            idle_rotation_speed: IDLE_ROTATION_SPEED,
            momentum_friction: MOMENTUM_FRICTION,
        }
    }
}

/// Exclusive animation phases. Starting a new one overwrites whatever is in
/// flight; nothing queues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Deep-space approach. Progress accumulates from clamped frame deltas,
    /// with a wall-clock fallback keyed off `start_ms`.
    Intro { start_ms: f64 },
    /// Rotate + tilt + zoom onto a state.
    FocusState {
        start_ms: f64,
        duration_ms: f64,
        yaw_start: f64,
        yaw_end: f64,
        pitch_start: f64,
        pitch_end: f64,
        dist_start: f64,
        dist_end: f64,
    },
    /// Level out and pull back to the default orbit. Yaw holds.
    ZoomOut {
        start_ms: f64,
        duration_ms: f64,
        pitch_start: f64,
        dist_start: f64,
        dist_end: f64,
    },
    /// Free interaction: momentum, keyboard, scroll, idle rotation.
    Idle,
}

/// Per-frame input snapshot from the app shell.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    pub raw_dt_s: f64,
    pub now_ms: f64,
    pub dragging: bool,
    pub left_held: bool,
    pub right_held: bool,
    /// Normalized page scroll, 0..1.
    pub scroll_progress: f64,
    /// Framing of the currently selected state, if any.
    pub focus_target: Option<crate::geo::FocusTarget>,
    /// County drill-down suppresses globe scroll coupling.
    pub county_view: bool,
    pub auto_rotate: bool,
}

pub struct Director {
    rig: CameraRig,
    phase: Phase,
    tunables: Tunables,
    home_yaw: f64,
    scroll: ScrollCoupler,

    intro_progress: f64,
    intro_eased: f64,
    warmup_frames_remaining: u32,
    intro_complete: bool,
    earth_opacity: f64,

    states_opacity: f64,
    states_fading: bool,
    states_fade_start_ms: f64,

    keyboard_velocity: f64,
    last_interaction_ms: f64,
}

impl Director {
    pub fn new(home_yaw: f64, tunables: Tunables) -> Self {
        Self {
            rig: CameraRig::new(home_yaw),
            phase: Phase::Idle,
            tunables,
            home_yaw,
            scroll: ScrollCoupler::new(),
            intro_progress: 0.0,
            intro_eased: 0.0,
            warmup_frames_remaining: 0,
            intro_complete: false,
            earth_opacity: 0.0,
            states_opacity: 0.0,
            states_fading: false,
            states_fade_start_ms: 0.0,
            keyboard_velocity: 0.0,
            last_interaction_ms: 0.0,
        }
    }

    /// Kicks off the deep-space intro. A second call while the intro is
    /// already running is ignored so a re-render cannot restart it.
    pub fn start_intro(&mut self, now_ms: f64) {
        if matches!(self.phase, Phase::Intro { .. }) {
            return;
        }
        debug!("intro started");
        self.phase = Phase::Intro { start_ms: now_ms };
        self.warmup_frames_remaining = INTRO_WARMUP_FRAMES;
        self.intro_progress = 0.0;
        self.intro_eased = 0.0;
        self.intro_complete = false;
        self.earth_opacity = 0.0;
        self.states_opacity = 0.0;
        self.states_fading = false;
        self.rig.distance = INTRO_START_DISTANCE;
        self.rig.earth_scale = INTRO_EARTH_SCALE_START;
        self.rig.velocity = 0.0;
    }

    /// Rotate + tilt + zoom onto a target, taking the short way around.
    /// Overwrites any animation in flight.
    pub fn start_focus_state(
        &mut self,
        target_yaw: f64,
        target_pitch: f64,
        target_distance: f64,
        duration_s: f64,
        now_ms: f64,
    ) {
        debug!(
            "focus animation started, yaw {:.3} -> {:.3}",
            self.rig.yaw, target_yaw
        );
        self.begin_focus(now_ms, target_yaw, target_pitch, target_distance, duration_s);
    }

    /// Level the tilt and pull back to `target_distance`. Yaw stays where the
    /// user left it.
    pub fn start_zoom_out(&mut self, target_distance: f64, duration_s: f64, now_ms: f64) {
        debug!("zoom-out started from distance {:.2}", self.rig.distance);
        self.rig.velocity = 0.0;
        self.keyboard_velocity = 0.0;
        self.scroll.cancel_homing();
        self.phase = Phase::ZoomOut {
            start_ms: now_ms,
            duration_ms: (duration_s * 1000.0).max(1.0),
            pitch_start: self.rig.pitch,
            dist_start: self.rig.distance,
            dist_end: target_distance,
        };
    }

    fn begin_focus(
        &mut self,
        now_ms: f64,
        target_yaw: f64,
        target_pitch: f64,
        target_distance: f64,
        duration_s: f64,
    ) {
        let yaw_end = self.rig.yaw + short_angle_dist(self.rig.yaw, target_yaw);
        self.rig.velocity = 0.0;
        self.keyboard_velocity = 0.0;
        self.scroll.cancel_homing();
        self.phase = Phase::FocusState {
            start_ms: now_ms,
            duration_ms: (duration_s * 1000.0).max(1.0),
            yaw_start: self.rig.yaw,
            yaw_end,
            pitch_start: self.rig.pitch,
            pitch_end: target_pitch,
            dist_start: self.rig.distance,
            dist_end: target_distance,
        };
    }

    // Drag interface. The input layer owns pointer bookkeeping; the director
    // owns what dragging does to the rig.

    pub fn begin_drag(&mut self, now_ms: f64) {
        self.rig.velocity = 0.0;
        self.scroll.cancel_homing();
        self.touch(now_ms);
    }

    /// Absolute yaw from the drag accumulator.
    pub fn drag_rotate(&mut self, yaw: f64, now_ms: f64) {
        self.rig.yaw = yaw;
        self.touch(now_ms);
    }

    /// Feeds one per-move velocity sample into the momentum estimate.
    pub fn blend_drag_velocity(&mut self, sample: f64) {
        let blended = self.rig.velocity * DRAG_VELOCITY_KEEP + sample * DRAG_VELOCITY_BLEND;
        self.rig.velocity = blended.clamp(-MAX_SPIN_VELOCITY, MAX_SPIN_VELOCITY);
    }

    /// `paused` is true when the pointer sat still just before release; the
    /// globe then stays put instead of inheriting stale velocity.
    pub fn end_drag(&mut self, paused: bool, now_ms: f64) {
        if paused {
            self.rig.velocity = 0.0;
        }
        if self.rig.velocity == 0.0 {
            self.touch(now_ms);
        }
    }

    /// Marks user interaction, deferring idle auto-rotation.
    pub fn touch(&mut self, now_ms: f64) {
        self.last_interaction_ms = now_ms;
    }

    pub fn is_animating(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    pub fn intro_complete(&self) -> bool {
        self.intro_complete
    }

    /// Selection unlocks once the globe is actually visible, even if the
    /// intro has not formally finished.
    pub fn earth_ready(&self) -> bool {
        self.intro_complete || self.earth_opacity > 0.5
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// Advances every motion system by one frame and returns the composed
    /// camera transform. The pass order is fixed: phase animation, states
    /// fade, momentum, scroll spin, keyboard, idle rotation, clamp, distance
    /// blend.
    pub fn advance(&mut self, input: &FrameInput) -> RenderTransform {
        let intro_dt = input.raw_dt_s.min(INTRO_DELTA_CLAMP_S);
        let dt = input.raw_dt_s.min(FRAME_DELTA_CLAMP_S);
        let now = input.now_ms;
        let selected = input.focus_target.is_some();

        self.advance_phase(input, intro_dt, now);
        self.advance_states_fade(now);

        if matches!(self.phase, Phase::Idle) {
            self.apply_momentum(input.dragging, selected, now);
        }

        // Scroll coupling is force-neutral during the intro, a selection or a
        // county drill-down so it cannot fight the animated camera.
        let raw_scroll = if selected || input.county_view || !self.intro_complete {
            0.0
        } else {
            input.scroll_progress
        };
        let can_rotate = matches!(self.phase, Phase::Idle)
            && !input.dragging
            && self.intro_complete
            && !selected;
        let spin = self.scroll.update_spin(
            raw_scroll,
            dt,
            now,
            ScrollFrame {
                can_rotate,
                intro_complete: self.intro_complete,
                current_yaw: self.rig.yaw,
                home_yaw: self.home_yaw,
            },
        );
        self.rig.yaw += spin.yaw_delta;
        if spin.interacted {
            self.last_interaction_ms = now;
        }

        if matches!(self.phase, Phase::Idle) {
            self.apply_keyboard(input, now);
            self.apply_idle_rotation(input, spin.is_scrolling, selected, dt, now);
        }

        self.rig.clamp();

        let animating = self.is_animating();
        let zooming_out = matches!(self.phase, Phase::ZoomOut { .. });
        let (effective_distance, scroll_y) = self.scroll.blend_distance(
            self.rig.distance,
            dt,
            self.intro_complete,
            selected,
            animating,
            zooming_out,
        );

        transform::compose(&ComposeInput {
            rig: &self.rig,
            effective_distance,
            scroll_y_offset: scroll_y,
            intro_complete: self.intro_complete,
            intro_eased: self.intro_eased,
            earth_opacity: self.earth_opacity,
            states_opacity: self.states_opacity,
            selected,
        })
    }

    fn advance_phase(&mut self, input: &FrameInput, intro_dt: f64, now: f64) {
        match self.phase {
            Phase::Intro { start_ms } => self.advance_intro(input, intro_dt, now, start_ms),
            Phase::FocusState {
                start_ms,
                duration_ms,
                yaw_start,
                yaw_end,
                pitch_start,
                pitch_end,
                dist_start,
                dist_end,
            } => {
                let progress = ((now - start_ms).max(0.0) / duration_ms).min(1.0);
                let eased = ease_in_out_cubic(progress);
                self.rig.yaw = yaw_start + (yaw_end - yaw_start) * eased;
                self.rig.pitch = pitch_start + (pitch_end - pitch_start) * eased;
                self.rig.distance = dist_start + (dist_end - dist_start) * eased;
                if progress >= 1.0 {
                    debug!("focus animation complete");
                    self.phase = Phase::Idle;
                }
            }
            Phase::ZoomOut {
                start_ms,
                duration_ms,
                pitch_start,
                dist_start,
                dist_end,
            } => {
                let progress = ((now - start_ms).max(0.0) / duration_ms).min(1.0);
                let eased = ease_in_out_cubic(progress);
                self.rig.pitch = pitch_start * (1.0 - eased);
                self.rig.distance = dist_start + (dist_end - dist_start) * eased;
                if progress >= 1.0 {
                    debug!("zoom-out complete");
                    self.rig.pitch = 0.0;
                    self.phase = Phase::Idle;
                }
            }
            Phase::Idle => {}
        }
    }

    fn advance_intro(&mut self, input: &FrameInput, intro_dt: f64, now: f64, start_ms: f64) {
        // Burn the first frames at the start pose; they are expensive while
        // shaders and textures warm up and would eat a visible chunk of the
        // animation. The safety timer restarts once they are done.
        if self.warmup_frames_remaining > 0 {
            self.warmup_frames_remaining -= 1;
            self.rig.distance = INTRO_START_DISTANCE;
            self.rig.earth_scale = INTRO_EARTH_SCALE_START;
            self.intro_progress = 0.0;
            self.intro_eased = 0.0;
            self.earth_opacity = 0.0;
            self.phase = Phase::Intro { start_ms: now };
            return;
        }

        // Progress accumulates from the clamped delta, so a slow frame slows
        // the approach instead of jumping it. The wall clock only steps in
        // when accumulation has fallen hopelessly behind.
        self.intro_progress += intro_dt / self.tunables.intro_duration_s;
        if now - start_ms > self.tunables.intro_duration_s * 1000.0 + INTRO_WALL_CLOCK_GRACE_MS {
            self.intro_progress = 1.0;
        }
        let raw = self.intro_progress.min(1.0);
        let eased = ease_out_space_zoom(raw);
        self.intro_eased = eased;

        let default_dist = default_camera_distance();
        self.rig.distance = INTRO_START_DISTANCE + (default_dist - INTRO_START_DISTANCE) * eased;
        self.rig.earth_scale =
            INTRO_EARTH_SCALE_START + (1.0 - INTRO_EARTH_SCALE_START) * ease_out_quint(raw);

        self.earth_opacity = if raw > INTRO_FADE_START {
            let fade = ((raw - INTRO_FADE_START) / (INTRO_FADE_END - INTRO_FADE_START)).min(1.0);
            ease_out_quint(fade)
        } else {
            0.0
        };

        if raw >= 1.0 {
            self.rig.earth_scale = 1.0;
            self.rig.distance = default_dist;
            self.earth_opacity = 1.0;
            self.intro_eased = 1.0;
            self.intro_complete = true;
            self.scroll.reset_neutral(default_dist);
            self.touch(now);
            debug!("intro complete");

            if let Some(target) = input.focus_target {
                // Returning to an already selected state: chain straight into
                // the focus animation on this same frame.
                self.begin_focus(
                    now,
                    target.yaw,
                    target.pitch,
                    zoomed_camera_distance(),
                    self.tunables.focus_duration_s,
                );
                self.states_fading = false;
                self.states_opacity = 1.0;
            } else {
                self.phase = Phase::Idle;
                self.states_fading = true;
                self.states_fade_start_ms = now;
            }
        }
    }

    fn advance_states_fade(&mut self, now: f64) {
        if !self.states_fading {
            return;
        }
        let progress = ((now - self.states_fade_start_ms) / STATES_FADE_DURATION_MS).min(1.0);
        self.states_opacity = ease_out_cubic(progress);
        if progress >= 1.0 {
            self.states_fading = false;
            self.states_opacity = 1.0;
        }
    }

    fn apply_momentum(&mut self, dragging: bool, selected: bool, now: f64) {
        if !dragging && self.rig.velocity.abs() > MOMENTUM_THRESHOLD {
            self.rig.yaw += self.rig.velocity;
            self.rig.velocity *= self.tunables.momentum_friction;
            self.last_interaction_ms = now;
        }

        // Spring ease-back fires on the frame momentum dies. A spin against
        // the idle direction gets a gentle nudge back the right way; a spin
        // with it just stops.
        let just_stopped = !dragging
            && self.rig.velocity != 0.0
            && self.rig.velocity.abs() <= MOMENTUM_THRESHOLD;
        if just_stopped && !selected && self.intro_complete {
            let was_opposite = (self.rig.velocity < 0.0 && IDLE_DIRECTION > 0.0)
                || (self.rig.velocity > 0.0 && IDLE_DIRECTION < 0.0);
            self.rig.velocity = if was_opposite {
                SPRING_EASE_VELOCITY * IDLE_DIRECTION
            } else {
                0.0
            };
        }

        if !dragging && self.rig.velocity.abs() < MOMENTUM_THRESHOLD * 0.5 {
            self.rig.velocity = 0.0;
        }
    }

    fn apply_keyboard(&mut self, input: &FrameInput, now: f64) {
        if input.dragging || !self.intro_complete {
            return;
        }
        let mut target = 0.0;
        if input.left_held {
            target += KEY_ROTATION_SPEED;
        }
        if input.right_held {
            target -= KEY_ROTATION_SPEED;
        }

        if target != 0.0 {
            self.keyboard_velocity += (target - self.keyboard_velocity) * KEY_BLEND;
            self.keyboard_velocity = self
                .keyboard_velocity
                .clamp(-KEY_MAX_VELOCITY, KEY_MAX_VELOCITY);
            self.rig.yaw += self.keyboard_velocity;
            self.last_interaction_ms = now;
        } else if self.keyboard_velocity.abs() > KEY_STOP_EPSILON {
            self.rig.yaw += self.keyboard_velocity;
            self.keyboard_velocity *= KEY_DECAY;
            if self.keyboard_velocity.abs() < KEY_HANDOFF_EPSILON {
                // Hand the residual to the momentum system for a natural
                // coast-out.
                self.rig.velocity = self.keyboard_velocity * KEY_HANDOFF_SCALE;
                self.keyboard_velocity = 0.0;
            }
        }
    }

    fn apply_idle_rotation(
        &mut self,
        input: &FrameInput,
        is_scrolling: bool,
        selected: bool,
        dt: f64,
        now: f64,
    ) {
        if input.dragging
            || selected
            || is_scrolling
            || !self.intro_complete
            || !input.auto_rotate
            || self.rig.velocity.abs() >= MOMENTUM_THRESHOLD
            || self.keyboard_velocity.abs() >= KEY_STOP_EPSILON
        {
            return;
        }
        let since = now - self.last_interaction_ms;
        if since <= IDLE_TIMEOUT_MS {
            return;
        }
        // Quadratic ease-in from a standstill to full speed.
        let ramp = ((since - IDLE_TIMEOUT_MS) / IDLE_EASE_IN_MS).min(1.0);
        self.rig.yaw += self.tunables.idle_rotation_speed * ramp * ramp * dt * IDLE_DIRECTION;
    }
}
