pub mod core;
pub mod rendering;
pub mod window;

pub use self::core::DemoConfig;
pub use rendering::RenderConfig;
pub use window::WindowConfig;
