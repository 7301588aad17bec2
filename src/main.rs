use winit::event_loop::{ControlFlow, EventLoop};

mod app;
mod camera;
mod error;
mod geo;
mod input;
mod scroll;
mod settings;
mod store;

pub const CONFY_APP_NAME: &str = "outbreak-globe";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut handler = app::handler::AppHandler { app: None };
    event_loop.run_app(&mut handler)?;

    Ok(())
}
