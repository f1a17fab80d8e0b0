use super::{Demo, UniformSetup};
use crate::render::{Topology, VertexLayout};

#[rustfmt::skip]
pub const VERTICES: [f32; 12] = [
    -0.5,  0.5, 0.0,
     0.5,  0.5, 0.0,
     0.5, -0.5, 0.0,
    -0.5, -0.5, 0.0,
];

pub const VERTEX_SHADER: &str = r#"#version 330 core
layout(location = 0) in vec4 position;
void main(){
    gl_Position = position;
}
"#;

pub const FRAGMENT_SHADER: &str = r#"#version 330 core
layout(location = 0) out vec4 color;
void main(){
    color = vec4(1.0, 1.0, 1.0, 1.0);
}
"#;

pub fn demo() -> Demo {
    Demo {
        title: "Colored Square",
        vertices: &VERTICES,
        layout: VertexLayout::position(),
        vertex_shader: VERTEX_SHADER,
        fragment_shader: FRAGMENT_SHADER,
        topology: Topology::Polygon,
        uniforms: UniformSetup::None,
    }
}
