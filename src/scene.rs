use std::rc::Rc;

use anyhow::{Context, Result};
use log::debug;

use crate::config::RenderConfig;
use crate::demos::offset::{offset_at, OFFSET_UNIFORM};
use crate::demos::{Demo, UniformSetup};
use crate::render::{
    Driver, ShaderProgram, ShaderProgramBuilder, Topology, UniformLocation, VertexBuffer,
};

struct OffsetUniform {
    location: UniformLocation,
    fixed_x: Option<f32>,
    animate: bool,
}

impl OffsetUniform {
    fn value(&self, seconds: f32) -> glam::Vec4 {
        match self.fixed_x {
            Some(x) => glam::Vec4::new(x, 0.0, 0.0, 1.0),
            None => offset_at(seconds),
        }
    }
}

/// Everything one demo draws each frame: its mesh, its bound program and
/// the uniforms it feeds.
pub struct Scene {
    program: ShaderProgram,
    mesh: VertexBuffer,
    topology: Topology,
    clear_color: [f32; 4],
    offset: Option<OffsetUniform>,
    driver: Rc<dyn Driver>,
}

impl Scene {
    /// Uploads the demo's vertices, builds and binds its program, and sets
    /// its uniforms once. `seconds` is the clock reading used for
    /// time-derived uniforms.
    pub fn prepare(
        driver: Rc<dyn Driver>,
        demo: &Demo,
        config: &RenderConfig,
        seconds: f32,
    ) -> Result<Self> {
        let mesh = VertexBuffer::upload(Rc::clone(&driver), demo.vertices, &demo.layout)
            .with_context(|| format!("Failed to upload vertices for \"{}\"", demo.title))?;

        let mut program = ShaderProgramBuilder::new(Rc::clone(&driver))
            .with_link_check(config.link_check)
            .build_program(demo.vertex_shader, demo.fragment_shader)
            .with_context(|| format!("Failed to build shader program for \"{}\"", demo.title))?;

        program.bind();
        driver.polygon_fill();

        let offset = match demo.uniforms {
            UniformSetup::None => None,
            UniformSetup::Offset => program
                .uniform_location(OFFSET_UNIFORM)
                .map(|location| OffsetUniform {
                    location,
                    fixed_x: config.offset_x,
                    animate: config.animate_offset,
                }),
        };

        if let Some(offset) = &offset {
            let value = offset.value(seconds);
            debug!("Initial {} = {:?}", OFFSET_UNIFORM, value);
            program.set_uniform_vec4(offset.location, value);
        }

        Ok(Self {
            program,
            mesh,
            topology: demo.topology,
            clear_color: config.clear_color,
            offset,
            driver,
        })
    }

    pub fn draw(&self, seconds: f32) {
        self.driver.clear_color(self.clear_color);
        self.driver.clear();

        if let Some(offset) = self.offset.as_ref().filter(|offset| offset.animate) {
            self.program.set_uniform_vec4(offset.location, offset.value(seconds));
        }

        self.mesh.draw(self.topology);
    }

    pub fn vertex_count(&self) -> i32 {
        self.mesh.vertex_count()
    }

    /// Releases the program first, then the vertex storage.
    pub fn release(self) {
        let Self { program, mesh, .. } = self;
        program.release();
        drop(mesh);
    }
}
