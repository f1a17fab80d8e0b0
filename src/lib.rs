pub mod config;
pub mod demos;
pub mod engine;
pub mod render;
pub mod scene;
pub mod utils;
pub mod window;

// Re-export commonly used types
pub use config::DemoConfig;
pub use demos::{Demo, UniformSetup};
pub use engine::run_demo;
pub use render::{
    Driver, DriverError, GlDriver, LinkCheck, ShaderError, ShaderProgram, ShaderProgramBuilder, StageKind,
    Topology, VertexBuffer, VertexLayout,
};
pub use scene::Scene;
pub use window::{run_until_closed, FrameTarget, GlWindow, WindowError};
