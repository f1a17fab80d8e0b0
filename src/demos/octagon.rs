use super::{Demo, UniformSetup, SHADE_COLOR_FRAGMENT};
use crate::render::{Topology, VertexLayout};

#[rustfmt::skip]
pub const VERTICES: [f32; 48] = [
    // position                 // color
    -0.25,    0.6035, 0.0,      1.0, 0.0, 0.0,
     0.25,    0.6035, 0.0,      0.0, 1.0, 0.0,
     0.6035,  0.25,   0.0,      0.0, 0.0, 1.0,
     0.6035, -0.25,   0.0,      1.0, 1.0, 1.0,
     0.25,   -0.6035, 0.0,      0.0, 0.0, 1.0,
    -0.25,   -0.6035, 0.0,      1.0, 1.0, 1.0,
    -0.6035, -0.25,   0.0,      0.0, 0.0, 1.0,
    -0.6035,  0.25,   0.0,      1.0, 1.0, 1.0,
];

pub const VERTEX_SHADER: &str = r#"#version 330 core
layout(location = 0) in vec4 position;
layout(location = 1) in vec3 attribColor;
out vec3 shadeColor;
void main(){
    gl_Position = position;
    shadeColor = attribColor;
}
"#;

pub fn demo() -> Demo {
    Demo {
        title: "Colored Octagon",
        vertices: &VERTICES,
        layout: VertexLayout::position_color(),
        vertex_shader: VERTEX_SHADER,
        fragment_shader: SHADE_COLOR_FRAGMENT,
        topology: Topology::Polygon,
        uniforms: UniformSetup::None,
    }
}
