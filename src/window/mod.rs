pub mod frame_loop;
pub mod gl_window;

pub use frame_loop::{run_until_closed, Frame, FrameTarget};
pub use gl_window::GlWindow;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("Event loop error: {0}")]
    EventLoop(String),
    #[error("No usable display configuration: {0}")]
    Display(String),
    #[error("Display builder returned no window")]
    NoWindow,
    #[error("OpenGL context error: {0}")]
    Context(#[from] glutin::error::Error),
    #[error("Failed to swap buffers: {0}")]
    Swap(String),
}
