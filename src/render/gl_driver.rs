use std::ffi::{c_void, CStr};
use std::os::raw::c_char;
use std::ptr;

use gl::types::*;
use thiserror::Error;

use super::driver::{Driver, Name, StageKind, Topology, UniformLocation};

/// `GL_POLYGON` is not part of the core-profile bindings.
const POLYGON: GLenum = 0x0009;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverError {
    #[error("OpenGL entry point {0} could not be loaded")]
    NotLoaded(&'static str),
}

/// [`Driver`] backed by the global `gl` function pointers.
///
/// Only one exists per context; build it after the context is current.
pub struct GlDriver {
    _loaded: (),
}

impl GlDriver {
    /// Loads the entry points and checks the ones every demo relies on.
    pub fn load_with<F>(loader: F) -> Result<Self, DriverError>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);

        let required = [
            ("glGetString", gl::GetString::is_loaded()),
            ("glCreateShader", gl::CreateShader::is_loaded()),
            ("glCreateProgram", gl::CreateProgram::is_loaded()),
            ("glGenVertexArrays", gl::GenVertexArrays::is_loaded()),
            ("glBufferData", gl::BufferData::is_loaded()),
            ("glDrawArrays", gl::DrawArrays::is_loaded()),
        ];
        if let Some((name, _)) = required.into_iter().find(|(_, loaded)| !loaded) {
            return Err(DriverError::NotLoaded(name));
        }

        Ok(Self { _loaded: () })
    }

    fn stage_enum(kind: StageKind) -> GLenum {
        match kind {
            StageKind::Vertex => gl::VERTEX_SHADER,
            StageKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    fn topology_enum(topology: Topology) -> GLenum {
        match topology {
            Topology::Polygon => POLYGON,
            Topology::TriangleFan => gl::TRIANGLE_FAN,
            Topology::Triangles => gl::TRIANGLES,
        }
    }

    fn read_log(len: GLint, read: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar)) -> String {
        if len <= 0 {
            return String::new();
        }

        let mut buffer = vec![0u8; len as usize];
        let mut written: GLsizei = 0;
        read(len, &mut written, buffer.as_mut_ptr() as *mut GLchar);
        buffer.truncate(written.clamp(0, len) as usize);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl Driver for GlDriver {
    fn version(&self) -> String {
        let version = unsafe { gl::GetString(gl::VERSION) };
        if version.is_null() {
            return String::from("unknown");
        }
        unsafe { CStr::from_ptr(version as *const c_char) }
            .to_string_lossy()
            .into_owned()
    }

    fn create_shader(&self, kind: StageKind) -> Option<Name> {
        Name::new(unsafe { gl::CreateShader(Self::stage_enum(kind)) })
    }

    fn shader_source(&self, shader: Name, source: &CStr) {
        unsafe {
            gl::ShaderSource(shader.get(), 1, &source.as_ptr(), ptr::null());
        }
    }

    fn compile_shader(&self, shader: Name) {
        unsafe {
            gl::CompileShader(shader.get());
        }
    }

    fn shader_compile_status(&self, shader: Name) -> bool {
        let mut status = gl::FALSE as GLint;
        unsafe {
            gl::GetShaderiv(shader.get(), gl::COMPILE_STATUS, &mut status);
        }
        status == gl::TRUE as GLint
    }

    fn shader_info_log(&self, shader: Name) -> String {
        let mut len = 0;
        unsafe {
            gl::GetShaderiv(shader.get(), gl::INFO_LOG_LENGTH, &mut len);
        }
        Self::read_log(len, |len, written, buffer| unsafe {
            gl::GetShaderInfoLog(shader.get(), len, written, buffer);
        })
    }

    fn delete_shader(&self, shader: Name) {
        unsafe {
            gl::DeleteShader(shader.get());
        }
    }

    fn create_program(&self) -> Option<Name> {
        Name::new(unsafe { gl::CreateProgram() })
    }

    fn attach_shader(&self, program: Name, shader: Name) {
        unsafe {
            gl::AttachShader(program.get(), shader.get());
        }
    }

    fn link_program(&self, program: Name) {
        unsafe {
            gl::LinkProgram(program.get());
        }
    }

    fn validate_program(&self, program: Name) {
        unsafe {
            gl::ValidateProgram(program.get());
        }
    }

    fn program_link_status(&self, program: Name) -> bool {
        let mut status = gl::FALSE as GLint;
        unsafe {
            gl::GetProgramiv(program.get(), gl::LINK_STATUS, &mut status);
        }
        status == gl::TRUE as GLint
    }

    fn program_validate_status(&self, program: Name) -> bool {
        let mut status = gl::FALSE as GLint;
        unsafe {
            gl::GetProgramiv(program.get(), gl::VALIDATE_STATUS, &mut status);
        }
        status == gl::TRUE as GLint
    }

    fn program_info_log(&self, program: Name) -> String {
        let mut len = 0;
        unsafe {
            gl::GetProgramiv(program.get(), gl::INFO_LOG_LENGTH, &mut len);
        }
        Self::read_log(len, |len, written, buffer| unsafe {
            gl::GetProgramInfoLog(program.get(), len, written, buffer);
        })
    }

    fn use_program(&self, program: Option<Name>) {
        unsafe {
            gl::UseProgram(program.map_or(0, Name::get));
        }
    }

    fn delete_program(&self, program: Name) {
        unsafe {
            gl::DeleteProgram(program.get());
        }
    }

    fn uniform_location(&self, program: Name, name: &CStr) -> Option<UniformLocation> {
        UniformLocation::new(unsafe { gl::GetUniformLocation(program.get(), name.as_ptr()) })
    }

    fn uniform_4f(&self, location: UniformLocation, [x, y, z, w]: [f32; 4]) {
        unsafe {
            gl::Uniform4f(location.get(), x, y, z, w);
        }
    }

    fn create_vertex_array(&self) -> Option<Name> {
        let mut vertex_array = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut vertex_array);
        }
        Name::new(vertex_array)
    }

    fn bind_vertex_array(&self, vertex_array: Option<Name>) {
        unsafe {
            gl::BindVertexArray(vertex_array.map_or(0, Name::get));
        }
    }

    fn delete_vertex_array(&self, vertex_array: Name) {
        let id = vertex_array.get();
        unsafe {
            gl::DeleteVertexArrays(1, &id);
        }
    }

    fn create_buffer(&self) -> Option<Name> {
        let mut buffer = 0;
        unsafe {
            gl::GenBuffers(1, &mut buffer);
        }
        Name::new(buffer)
    }

    fn bind_array_buffer(&self, buffer: Option<Name>) {
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, buffer.map_or(0, Name::get));
        }
    }

    fn array_buffer_data(&self, data: &[u8]) {
        unsafe {
            gl::BufferData(
                gl::ARRAY_BUFFER,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
        }
    }

    fn enable_vertex_attrib_array(&self, location: u32) {
        unsafe {
            gl::EnableVertexAttribArray(location);
        }
    }

    fn vertex_attrib_pointer_f32(&self, location: u32, components: i32, stride: i32, offset: usize) {
        unsafe {
            gl::VertexAttribPointer(
                location,
                components,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset as *const c_void,
            );
        }
    }

    fn delete_buffer(&self, buffer: Name) {
        let id = buffer.get();
        unsafe {
            gl::DeleteBuffers(1, &id);
        }
    }

    fn viewport(&self, width: i32, height: i32) {
        unsafe {
            gl::Viewport(0, 0, width, height);
        }
    }

    fn clear_color(&self, [r, g, b, a]: [f32; 4]) {
        unsafe {
            gl::ClearColor(r, g, b, a);
        }
    }

    fn clear(&self) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    fn polygon_fill(&self) {
        unsafe {
            gl::PolygonMode(gl::FRONT_AND_BACK, gl::FILL);
        }
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        unsafe {
            gl::DrawArrays(Self::topology_enum(topology), first, count);
        }
    }
}
