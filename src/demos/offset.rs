use glam::Vec4;

use super::{Demo, UniformSetup, SHADE_COLOR_FRAGMENT};
use crate::render::{Topology, VertexLayout};

pub const OFFSET_UNIFORM: &str = "offset";

#[rustfmt::skip]
pub const VERTICES: [f32; 18] = [
    // position          // color
    -0.2, -0.2, 0.0,     1.0, 0.0, 0.0,
     0.0,  0.2, 0.0,     0.0, 1.0, 0.0,
     0.2, -0.2, 0.0,     0.0, 0.0, 1.0,
];

pub const VERTEX_SHADER: &str = r#"#version 330 core
layout(location = 0) in vec4 position;
layout(location = 1) in vec3 attribColor;
out vec3 shadeColor;
uniform vec4 offset;
void main(){
    gl_Position = vec4(position.x + offset.x, position.y + offset.y, position.z + offset.z, 1.0f);
    shadeColor = attribColor;
}
"#;

/// Offset for a clock reading in seconds: `x` swings between -2 and 2.
pub fn offset_at(seconds: f32) -> Vec4 {
    Vec4::new(seconds.sin() * 2.0, 0.0, 0.0, 1.0)
}

pub fn demo() -> Demo {
    Demo {
        title: "Offset Using Uniform",
        vertices: &VERTICES,
        layout: VertexLayout::position_color(),
        vertex_shader: VERTEX_SHADER,
        fragment_shader: SHADE_COLOR_FRAGMENT,
        topology: Topology::Polygon,
        uniforms: UniformSetup::Offset,
    }
}
