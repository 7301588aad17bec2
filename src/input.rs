// Pointer, wheel and keyboard input, translated into director calls.

use winit::event::{MouseButton, MouseScrollDelta};

use crate::camera::Director;

/// Radians of yaw per pixel of horizontal drag.
const DRAG_SENSITIVITY: f64 = 0.005;
/// Velocity samples are normalized to a 16ms frame, with the elapsed time
/// floored so a burst of events cannot produce an extreme sample.
const SAMPLE_FLOOR_MS: f64 = 8.0;
const SAMPLE_FRAME_MS: f64 = 16.0;
/// Holding still this long before release means "stop here".
const RELEASE_PAUSE_MS: f64 = 80.0;

/// One wheel line in pixels.
const LINE_HEIGHT_PX: f64 = 53.0;
/// Full synthetic page height; scroll progress is offset / range.
const PAGE_SCROLL_RANGE_PX: f64 = 2400.0;

/// Owns pointer bookkeeping and the synthetic page scroll. What the input
/// does to the camera lives in the `Director`; this layer only decides when.
pub struct InputController {
    dragging: bool,
    drag_start_x: f64,
    drag_start_yaw: f64,
    last_mouse_x: f64,
    last_move_ms: f64,
    cursor: Option<(f64, f64)>,
    left_key_held: bool,
    right_key_held: bool,
    scroll_offset_px: f64,
}

impl InputController {
    pub fn new() -> Self {
        Self {
            dragging: false,
            drag_start_x: 0.0,
            drag_start_yaw: 0.0,
            last_mouse_x: 0.0,
            last_move_ms: 0.0,
            cursor: None,
            left_key_held: false,
            right_key_held: false,
            scroll_offset_px: 0.0,
        }
    }

    pub fn dragging(&self) -> bool {
        self.dragging
    }

    pub fn left_key_held(&self) -> bool {
        self.left_key_held
    }

    pub fn right_key_held(&self) -> bool {
        self.right_key_held
    }

    /// Normalized page scroll, 0..1.
    pub fn scroll_progress(&self) -> f64 {
        self.scroll_offset_px / PAGE_SCROLL_RANGE_PX
    }

    /// `blocked` is true while an animation runs or the pointer hovers a
    /// state mesh; a click then selects instead of grabbing the globe.
    pub fn on_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
        now_ms: f64,
        director: &mut Director,
        blocked: bool,
    ) {
        if button != MouseButton::Left {
            return;
        }
        if pressed {
            if blocked || self.dragging {
                return;
            }
            let Some((x, _)) = self.cursor else {
                return;
            };
            self.dragging = true;
            self.drag_start_x = x;
            self.drag_start_yaw = director.rig().yaw;
            self.last_mouse_x = x;
            self.last_move_ms = now_ms;
            director.begin_drag(now_ms);
        } else if self.dragging {
            self.dragging = false;
            let paused = now_ms - self.last_move_ms > RELEASE_PAUSE_MS;
            director.end_drag(paused, now_ms);
        }
    }

    pub fn on_cursor_moved(&mut self, position: (f64, f64), now_ms: f64, director: &mut Director) {
        self.cursor = Some(position);
        if !self.dragging {
            return;
        }
        let x = position.0;
        let yaw = self.drag_start_yaw + (x - self.drag_start_x) * DRAG_SENSITIVITY;
        director.drag_rotate(yaw, now_ms);

        let elapsed = now_ms - self.last_move_ms;
        if elapsed > 0.0 {
            let sample = (x - self.last_mouse_x) * DRAG_SENSITIVITY
                / elapsed.max(SAMPLE_FLOOR_MS)
                * SAMPLE_FRAME_MS;
            director.blend_drag_velocity(sample);
        }
        self.last_mouse_x = x;
        self.last_move_ms = now_ms;
    }

    /// Leaving the window releases the drag but keeps the momentum.
    pub fn on_cursor_left(&mut self, now_ms: f64, director: &mut Director) {
        self.cursor = None;
        if self.dragging {
            self.dragging = false;
            director.end_drag(false, now_ms);
        }
    }

    /// Wheel input feeds the synthetic page scroll. Ignored until the intro
    /// hands off so accumulated scroll cannot jump the camera.
    pub fn on_wheel(&mut self, delta: &MouseScrollDelta, intro_complete: bool) {
        if !intro_complete {
            return;
        }
        let px = match delta {
            MouseScrollDelta::LineDelta(_, y) => f64::from(*y) * LINE_HEIGHT_PX,
            MouseScrollDelta::PixelDelta(pos) => pos.y,
        };
        // Wheel down (negative y) scrolls the page down.
        self.scroll_offset_px = (self.scroll_offset_px - px).clamp(0.0, PAGE_SCROLL_RANGE_PX);
    }

    pub fn set_left_key(&mut self, held: bool) {
        self.left_key_held = held;
    }

    pub fn set_right_key(&mut self, held: bool) {
        self.right_key_held = held;
    }
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}
