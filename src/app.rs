use anyhow::{Context as _, Result};
use log::info;

use crate::cli::Config;
use crate::clock::FrameClock;
use crate::renderer::Renderer;
use crate::window::{PlatformEvent, Window};

pub struct App {
    // Field order matters for Drop: the program must be released while the
    // context that owns it is still alive.
    renderer: Renderer,
    window: Window,
    clock: FrameClock,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let window = Window::new(config.width, config.height, config.fullscreen)
            .context("unable to open a rendering window")?;
        let renderer =
            Renderer::new(config.fragment_body()).context("unable to build the shader program")?;

        let mut app = Self {
            renderer,
            window,
            clock: FrameClock::start(),
        };

        let (width, height) = app.window.framebuffer_size();
        app.renderer.resize(width, height);

        Ok(app)
    }

    /// Drives the render loop until quit is requested. Every iteration drains
    /// all pending events before drawing, so a frame is never rendered at a
    /// stale viewport size.
    pub fn run(&mut self) {
        info!("Press [ESC] or [q] to exit.");
        info!("Run with --help flag for more information.");

        'running: loop {
            for event in self.window.poll_events() {
                match event {
                    PlatformEvent::Resized(width, height) => self.renderer.resize(width, height),
                    PlatformEvent::QuitRequested => break 'running,
                }
            }

            let time = self.clock.elapsed();
            let frame = self.clock.tick();
            self.renderer.render(time, frame);
            self.window.swap_buffers();
        }
    }
}
