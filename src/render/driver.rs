use std::ffi::CStr;
use std::fmt;
use std::num::NonZeroU32;

/// Opaque driver object name. Zero is never a valid name, so a failed
/// creation shows up as `None` instead of a sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Name(NonZeroU32);

impl Name {
    pub(crate) fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    pub(crate) fn get(self) -> u32 {
        self.0.get()
    }
}

/// Location of a uniform inside a linked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(i32);

impl UniformLocation {
    /// The driver reports missing uniforms as a negative location.
    pub(crate) fn new(raw: i32) -> Option<Self> {
        (raw >= 0).then_some(Self(raw))
    }

    pub(crate) fn get(self) -> i32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("vertex"),
            StageKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// How a vertex sequence is assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    /// Closed convex polygon. Only available on compatibility contexts.
    #[default]
    Polygon,
    TriangleFan,
    Triangles,
}

/// The graphics-driver surface the renderer is written against.
///
/// Every call is a single driver round trip. Implementations must be used
/// from the thread that owns the current context.
pub trait Driver {
    fn version(&self) -> String;

    // Shader stages
    fn create_shader(&self, kind: StageKind) -> Option<Name>;
    fn shader_source(&self, shader: Name, source: &CStr);
    fn compile_shader(&self, shader: Name);
    fn shader_compile_status(&self, shader: Name) -> bool;
    fn shader_info_log(&self, shader: Name) -> String;
    fn delete_shader(&self, shader: Name);

    // Programs
    fn create_program(&self) -> Option<Name>;
    fn attach_shader(&self, program: Name, shader: Name);
    fn link_program(&self, program: Name);
    fn validate_program(&self, program: Name);
    fn program_link_status(&self, program: Name) -> bool;
    fn program_validate_status(&self, program: Name) -> bool;
    fn program_info_log(&self, program: Name) -> String;
    fn use_program(&self, program: Option<Name>);
    fn delete_program(&self, program: Name);
    fn uniform_location(&self, program: Name, name: &CStr) -> Option<UniformLocation>;
    fn uniform_4f(&self, location: UniformLocation, value: [f32; 4]);

    // Vertex storage
    fn create_vertex_array(&self) -> Option<Name>;
    fn bind_vertex_array(&self, vertex_array: Option<Name>);
    fn delete_vertex_array(&self, vertex_array: Name);
    fn create_buffer(&self) -> Option<Name>;
    fn bind_array_buffer(&self, buffer: Option<Name>);
    fn array_buffer_data(&self, data: &[u8]);
    fn enable_vertex_attrib_array(&self, location: u32);
    fn vertex_attrib_pointer_f32(&self, location: u32, components: i32, stride: i32, offset: usize);
    fn delete_buffer(&self, buffer: Name);

    // Frame
    fn viewport(&self, width: i32, height: i32);
    fn clear_color(&self, rgba: [f32; 4]);
    fn clear(&self);
    fn polygon_fill(&self);
    fn draw_arrays(&self, topology: Topology, first: i32, count: i32);
}
