use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::app::app::App;
use log::trace;

pub struct AppHandler {
    pub app: Option<App>,
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_none() {
            let window_attrs = Window::default_attributes()
                .with_title("Outbreak Globe")
                .with_inner_size(winit::dpi::LogicalSize::new(1200.0, 800.0));

            let window = event_loop.create_window(window_attrs).unwrap();
            self.app = Some(App::new(Arc::new(window)).unwrap());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(app) = &mut self.app {
            let response = app.handle_event(&event);
            if response.repaint {
                app.window.request_redraw();
            }
            if response.exit {
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(app) = &mut self.app {
            let t = app.tick();
            trace!(
                "eye ({:.2}, {:.2}, {:.2}) look_y {:.2} yaw {:.3} pitch {:.3} dist {:.2} \
                 zoom {:.2} scale {:.2} earth {:.2} states {:.2}",
                t.eye.x,
                t.eye.y,
                t.eye.z,
                t.look_at.y,
                t.yaw,
                t.pitch,
                t.distance,
                t.zoom_progress,
                t.earth_scale,
                t.earth_opacity,
                t.states_opacity
            );
            app.window.request_redraw();
        }
    }
}
