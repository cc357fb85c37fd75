use glfw::{fail_on_errors, Action, Context, Key};

use crate::error::ViewerError;

const WINDOW_TITLE: &str = "fragview";

/// Events the render loop reacts to; everything else GLFW reports is
/// dropped during the drain.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlatformEvent {
    Resized(i32, i32),
    QuitRequested,
}

/// Native window plus its GL ES 2.0 context. The context is made current on
/// the calling thread before this constructor returns, so GL calls are legal
/// from that point on.
pub struct Window {
    glfw_instance: glfw::Glfw,
    window: glfw::PWindow,
    event_receiver: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl Window {
    pub fn new(width: u32, height: u32, fullscreen: bool) -> Result<Self, ViewerError> {
        let mut glfw_instance = glfw::init(fail_on_errors!())
            .map_err(|err| ViewerError::Environment(format!("unable to initialize GLFW: {err}")))?;

        // ES 2.0 so the #version 100 shader dialect and client-side vertex
        // arrays are valid.
        glfw_instance.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::OpenGlEs));
        glfw_instance.window_hint(glfw::WindowHint::ContextVersion(2, 0));
        glfw_instance.window_hint(glfw::WindowHint::DoubleBuffer(true));
        glfw_instance.window_hint(glfw::WindowHint::Resizable(true));

        let created = if fullscreen {
            glfw_instance.with_primary_monitor(|glfw, monitor| match monitor {
                Some(monitor) => {
                    let (monitor_width, monitor_height) = monitor
                        .get_video_mode()
                        .map_or((width, height), |mode| (mode.width, mode.height));
                    glfw.create_window(
                        monitor_width,
                        monitor_height,
                        WINDOW_TITLE,
                        glfw::WindowMode::FullScreen(monitor),
                    )
                }
                None => glfw.create_window(width, height, WINDOW_TITLE, glfw::WindowMode::Windowed),
            })
        } else {
            glfw_instance.create_window(width, height, WINDOW_TITLE, glfw::WindowMode::Windowed)
        };

        let (mut window, event_receiver) = created
            .ok_or_else(|| ViewerError::Environment(String::from("unable to create window")))?;

        window.make_current();
        window.set_key_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_close_polling(true);

        gl::load_with(|s| window.get_proc_address(s) as *const _);

        glfw_instance.set_swap_interval(glfw::SwapInterval::Sync(1));

        Ok(Self {
            glfw_instance,
            window,
            event_receiver,
        })
    }

    /// Non-blocking drain of all pending platform events, translated to the
    /// events the render loop understands. Escape or Q requests quit, as
    /// does a window-manager close.
    pub fn poll_events(&mut self) -> Vec<PlatformEvent> {
        self.glfw_instance.poll_events();

        let mut events = Vec::new();
        for (_, event) in glfw::flush_messages(&self.event_receiver) {
            match event {
                glfw::WindowEvent::FramebufferSize(width, height) => {
                    events.push(PlatformEvent::Resized(width, height));
                }
                glfw::WindowEvent::Key(Key::Escape | Key::Q, _, Action::Press, _) => {
                    events.push(PlatformEvent::QuitRequested);
                }
                glfw::WindowEvent::Close => {
                    events.push(PlatformEvent::QuitRequested);
                }
                _ => {}
            }
        }

        if self.window.should_close() {
            events.push(PlatformEvent::QuitRequested);
        }

        events
    }

    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    pub fn framebuffer_size(&self) -> (i32, i32) {
        self.window.get_framebuffer_size()
    }
}
