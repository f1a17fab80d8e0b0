pub mod driver;
pub mod gl_driver;
pub mod mesh;
pub mod shaders;

#[cfg(test)]
pub(crate) mod fake;

pub use driver::{Driver, StageKind, Topology, UniformLocation};
pub use gl_driver::{DriverError, GlDriver};
pub use mesh::{MeshError, VertexBuffer, VertexLayout};
pub use shaders::{LinkCheck, ShaderError, ShaderProgram, ShaderProgramBuilder, ShaderStage};
