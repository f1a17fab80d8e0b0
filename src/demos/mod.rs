//! The stock demos. Each one is plain data handed to [`crate::engine::run_demo`].

pub mod octagon;
pub mod offset;
pub mod square;

use crate::render::{Topology, VertexLayout};

/// Uniforms a demo sets before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UniformSetup {
    #[default]
    None,
    /// `uniform vec4 offset` shifting every vertex.
    Offset,
}

#[derive(Debug, Clone)]
pub struct Demo {
    pub title: &'static str,
    pub vertices: &'static [f32],
    pub layout: VertexLayout,
    pub vertex_shader: &'static str,
    pub fragment_shader: &'static str,
    pub topology: Topology,
    pub uniforms: UniformSetup,
}

/// Fragment shader shared by the per-vertex color demos.
pub const SHADE_COLOR_FRAGMENT: &str = r#"#version 330 core
out vec4 color;
in vec3 shadeColor;
void main(){
    color = vec4(shadeColor, 1.0f);
}
"#;
