use std::mem::size_of;
use std::rc::Rc;

use thiserror::Error;

use super::driver::{Driver, Name, Topology};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("Vertex data is empty")]
    Empty,
    #[error("Vertex layout has no attributes")]
    EmptyLayout,
    #[error("{len} floats do not divide into vertices of {per_vertex} floats")]
    Misaligned { len: usize, per_vertex: usize },
    #[error("Driver could not create a {0}")]
    CreateFailed(&'static str),
}

/// One float attribute inside an interleaved vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    pub components: i32,
}

/// Interleaved float attributes, laid out in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, location: u32, components: i32) -> Self {
        self.attributes.push(VertexAttribute {
            location,
            components,
        });
        self
    }

    /// `vec3` position at location 0.
    pub fn position() -> Self {
        Self::new().with_attribute(0, 3)
    }

    /// `vec3` position at location 0 followed by a `vec3` color at location 1.
    pub fn position_color() -> Self {
        Self::position().with_attribute(1, 3)
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    pub fn floats_per_vertex(&self) -> usize {
        self.attributes
            .iter()
            .map(|attribute| attribute.components as usize)
            .sum()
    }

    /// Size of one vertex in bytes.
    pub fn stride(&self) -> i32 {
        (self.floats_per_vertex() * size_of::<f32>()) as i32
    }

    /// Each attribute with its byte offset from the start of the vertex.
    pub fn offsets(&self) -> impl Iterator<Item = (VertexAttribute, usize)> + '_ {
        self.attributes.iter().scan(0usize, |offset, attribute| {
            let current = *offset;
            *offset += attribute.components as usize * size_of::<f32>();
            Some((*attribute, current))
        })
    }

    pub fn vertex_count(&self, vertices: &[f32]) -> Result<usize, MeshError> {
        let per_vertex = self.floats_per_vertex();
        if per_vertex == 0 {
            return Err(MeshError::EmptyLayout);
        }
        if vertices.is_empty() {
            return Err(MeshError::Empty);
        }
        if vertices.len() % per_vertex != 0 {
            return Err(MeshError::Misaligned {
                len: vertices.len(),
                per_vertex,
            });
        }
        Ok(vertices.len() / per_vertex)
    }
}

/// Vertex array plus the static buffer backing it.
pub struct VertexBuffer {
    vertex_array: Name,
    buffer: Name,
    vertex_count: i32,
    driver: Rc<dyn Driver>,
}

impl VertexBuffer {
    pub fn upload(
        driver: Rc<dyn Driver>,
        vertices: &[f32],
        layout: &VertexLayout,
    ) -> Result<Self, MeshError> {
        let vertex_count = layout.vertex_count(vertices)?;

        let vertex_array = driver
            .create_vertex_array()
            .ok_or(MeshError::CreateFailed("vertex array"))?;
        let buffer = match driver.create_buffer() {
            Some(buffer) => buffer,
            None => {
                driver.delete_vertex_array(vertex_array);
                return Err(MeshError::CreateFailed("vertex buffer"));
            }
        };

        driver.bind_vertex_array(Some(vertex_array));
        driver.bind_array_buffer(Some(buffer));
        driver.array_buffer_data(bytemuck::cast_slice(vertices));

        let stride = layout.stride();
        for (attribute, offset) in layout.offsets() {
            driver.enable_vertex_attrib_array(attribute.location);
            driver.vertex_attrib_pointer_f32(attribute.location, attribute.components, stride, offset);
        }

        Ok(Self {
            vertex_array,
            buffer,
            vertex_count: vertex_count as i32,
            driver,
        })
    }

    pub fn vertex_count(&self) -> i32 {
        self.vertex_count
    }

    pub fn bind(&self) {
        self.driver.bind_vertex_array(Some(self.vertex_array));
    }

    pub fn draw(&self, topology: Topology) {
        self.bind();
        self.driver.draw_arrays(topology, 0, self.vertex_count);
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        self.driver.delete_buffer(self.buffer);
        self.driver.delete_vertex_array(self.vertex_array);
    }
}
