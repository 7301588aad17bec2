use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};
use winit::window::Window;

use crate::camera::rig::{default_camera_distance, zoomed_camera_distance};
use crate::camera::{Director, FrameInput, RenderTransform};
use crate::error::GlobeError;
use crate::geo::{self, StateCentroids};
use crate::input::InputController;
use crate::settings::Settings;
use crate::store::SelectionStore;

pub struct EventResponse {
    pub repaint: bool,
    pub exit: bool,
}

pub struct App {
    pub window: Arc<Window>,
    store: SelectionStore,
    director: Director,
    input: InputController,
    centroids: StateCentroids,
    state_names: Vec<String>,
    state_cycle: usize,
    settings: Settings,
    clock: Instant,
    last_frame_ms: f64,
    prev_selected: Option<String>,
}

impl App {
    pub fn new(window: Arc<Window>) -> Result<Self, GlobeError> {
        let centroids = StateCentroids::load()?;
        let state_names: Vec<String> = centroids.names().iter().map(|s| s.to_string()).collect();
        let settings = Settings::load();

        let mut director = Director::new(geo::us_home_yaw(), settings.motion.tunables());
        director.start_intro(0.0);
        info!("loaded {} state centroids", centroids.len());

        Ok(Self {
            window,
            store: SelectionStore::new(),
            director,
            input: InputController::new(),
            centroids,
            state_names,
            state_cycle: 0,
            settings,
            clock: Instant::now(),
            last_frame_ms: 0.0,
            prev_selected: None,
        })
    }

    fn now_ms(&self) -> f64 {
        self.clock.elapsed().as_secs_f64() * 1000.0
    }

    pub fn handle_event(&mut self, event: &WindowEvent) -> EventResponse {
        let now = self.now_ms();
        match event {
            WindowEvent::CloseRequested => {
                return EventResponse {
                    repaint: false,
                    exit: true,
                };
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let pressed = event.state == ElementState::Pressed;
                match &event.logical_key {
                    Key::Named(NamedKey::ArrowLeft) => self.input.set_left_key(pressed),
                    Key::Named(NamedKey::ArrowRight) => self.input.set_right_key(pressed),
                    Key::Named(NamedKey::Escape) if pressed => {
                        if self.store.is_county_view() {
                            self.store.exit_county_view();
                        } else {
                            self.store.clear_selection();
                        }
                    }
                    Key::Character(c) if pressed => match c.as_str() {
                        "r" | "R" => {
                            self.settings.view.auto_rotate = !self.settings.view.auto_rotate;
                            self.settings.view.save();
                            debug!("auto-rotate {}", self.settings.view.auto_rotate);
                        }
                        "n" | "N" => self.select_next_state(),
                        _ => {}
                    },
                    _ => {}
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = *state == ElementState::Pressed;
                let blocked =
                    self.director.is_animating() || self.store.hovered_state().is_some();
                self.input
                    .on_mouse_button(*button, pressed, now, &mut self.director, blocked);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input
                    .on_cursor_moved((position.x, position.y), now, &mut self.director);
            }
            WindowEvent::CursorLeft { .. } => {
                self.store.set_hovered_state(None);
                self.input.on_cursor_left(now, &mut self.director);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.input.on_wheel(delta, self.director.intro_complete());
            }
            _ => {}
        }

        EventResponse {
            repaint: false,
            exit: false,
        }
    }

    /// Advances the camera by one frame and returns the composed transform.
    pub fn tick(&mut self) -> RenderTransform {
        let now = self.now_ms();
        let raw_dt_s = ((now - self.last_frame_ms) / 1000.0).max(0.0);
        self.last_frame_ms = now;

        if let Some(name) = self.store.take_pending_zoom() {
            self.try_select_state(&name, now);
        }

        // Deselection edge: start the zoom-out once, not every frame.
        let selected_now = self.store.selected_state().map(str::to_string);
        if self.prev_selected.is_some()
            && selected_now.is_none()
            && self.director.earth_ready()
            && self.director.rig().distance < default_camera_distance()
        {
            self.director.start_zoom_out(
                default_camera_distance(),
                self.settings.motion.zoom_duration_s,
                now,
            );
        }
        self.prev_selected = selected_now;

        let focus_target = self
            .store
            .selected_state()
            .map(|name| self.centroids.focus_target(name));

        self.director.advance(&FrameInput {
            raw_dt_s,
            now_ms: now,
            dragging: self.input.dragging(),
            left_held: self.input.left_key_held(),
            right_held: self.input.right_key_held(),
            scroll_progress: self.input.scroll_progress(),
            focus_target,
            county_view: self.store.is_county_view(),
            auto_rotate: self.settings.view.auto_rotate,
        })
    }

    /// Selects a state and flies the camera to it. Refused while an animation
    /// runs or before the globe is visible.
    pub fn try_select_state(&mut self, name: &str, now_ms: f64) -> bool {
        if self.director.is_animating() || !self.director.earth_ready() {
            debug!("selection of {name} ignored");
            return false;
        }
        self.store.select_state(name);
        if self.store.is_county_view() {
            return true;
        }
        let target = self.centroids.focus_target(name);
        let duration = geo::focus_duration_s(self.director.rig().yaw, target.yaw);
        self.director.start_focus_state(
            target.yaw,
            target.pitch,
            zoomed_camera_distance(),
            duration,
            now_ms,
        );
        true
    }

    /// Keyboard stand-in for clicking states: queues a zoom request that the
    /// next tick picks up, same as an external search would.
    fn select_next_state(&mut self) {
        if self.state_names.is_empty() {
            return;
        }
        let name = &self.state_names[self.state_cycle % self.state_names.len()];
        self.store.request_state_zoom(name);
        self.state_cycle += 1;
    }
}
