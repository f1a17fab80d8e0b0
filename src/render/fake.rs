//! Recording driver used by the unit tests. It models just enough of GL
//! to tell compiled stages, linked programs and released objects apart.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::ffi::CStr;

use super::driver::{Driver, Name, StageKind, Topology, UniformLocation};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(StageKind),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader { program: u32, shader: u32 },
    LinkProgram(u32),
    ValidateProgram(u32),
    LinkStatus(u32),
    ValidateStatus(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    Uniform4f { program: Option<u32>, location: i32, value: [f32; 4] },
    BufferData(usize),
    AttribPointer { location: u32, components: i32, stride: i32, offset: usize },
    DeleteBuffer(u32),
    DeleteVertexArray(u32),
    Viewport(i32, i32),
    ClearColor([f32; 4]),
    Clear,
    PolygonFill,
    Draw { program: Option<u32>, topology: Topology, first: i32, count: i32 },
}

#[derive(Debug, Default)]
struct FakeShader {
    kind: Option<StageKind>,
    source: String,
    compiled: bool,
}

#[derive(Debug, Default)]
struct FakeProgram {
    attached: Vec<u32>,
    linked: bool,
    uniforms: HashMap<String, i32>,
}

#[derive(Debug, Default)]
struct State {
    next_name: u32,
    shaders: HashMap<u32, FakeShader>,
    programs: HashMap<u32, FakeProgram>,
    buffers: HashSet<u32>,
    vertex_arrays: HashSet<u32>,
    current_program: Option<u32>,
    bound_vertex_array: Option<u32>,
    calls: Vec<Call>,
    errors: Vec<String>,
}

impl State {
    fn allocate(&mut self) -> Name {
        self.next_name += 1;
        Name::new(self.next_name).expect("fake names start at 1")
    }
}

#[derive(Debug, Default)]
pub struct FakeDriver {
    state: RefCell<State>,
    refuse_buffers: bool,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A driver whose buffer allocations always fail.
    pub fn without_buffers() -> Self {
        Self {
            refuse_buffers: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    /// Errors the driver would have reported through `glGetError`.
    pub fn errors(&self) -> Vec<String> {
        self.state.borrow().errors.clone()
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn live_buffers(&self) -> usize {
        let state = self.state.borrow();
        state.buffers.len() + state.vertex_arrays.len()
    }

    pub fn is_linked(&self, program: u32) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program)
            .is_some_and(|program| program.linked)
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    fn compile(source: &str) -> bool {
        !source.trim().is_empty() && source.contains("void main")
    }

    /// Collects `uniform <type> <name>;` declarations from linked sources.
    fn scan_uniforms(sources: &[String]) -> HashMap<String, i32> {
        let mut uniforms = HashMap::new();
        for line in sources.iter().flat_map(|source| source.lines()) {
            let mut words = line.trim().trim_end_matches(';').split_whitespace();
            if words.next() != Some("uniform") {
                continue;
            }
            if let Some(name) = words.nth(1) {
                let next = uniforms.len() as i32;
                uniforms.entry(name.to_string()).or_insert(next);
            }
        }
        uniforms
    }
}

impl Driver for FakeDriver {
    fn version(&self) -> String {
        String::from("3.3 (fake)")
    }

    fn create_shader(&self, kind: StageKind) -> Option<Name> {
        self.record(Call::CreateShader(kind));
        let mut state = self.state.borrow_mut();
        let name = state.allocate();
        state.shaders.insert(
            name.get(),
            FakeShader {
                kind: Some(kind),
                ..FakeShader::default()
            },
        );
        Some(name)
    }

    fn shader_source(&self, shader: Name, source: &CStr) {
        let mut state = self.state.borrow_mut();
        if let Some(shader) = state.shaders.get_mut(&shader.get()) {
            shader.source = source.to_string_lossy().into_owned();
        }
    }

    fn compile_shader(&self, shader: Name) {
        self.record(Call::CompileShader(shader.get()));
        let mut state = self.state.borrow_mut();
        if let Some(shader) = state.shaders.get_mut(&shader.get()) {
            shader.compiled = Self::compile(&shader.source);
        }
    }

    fn shader_compile_status(&self, shader: Name) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader.get())
            .is_some_and(|shader| shader.compiled)
    }

    fn shader_info_log(&self, shader: Name) -> String {
        let state = self.state.borrow();
        match state.shaders.get(&shader.get()) {
            Some(shader) if shader.source.trim().is_empty() => {
                String::from("0:1(1): error: syntax error, unexpected end of file")
            }
            Some(shader) if !shader.compiled => {
                String::from("0:1(1): error: main() not defined")
            }
            _ => String::new(),
        }
    }

    fn delete_shader(&self, shader: Name) {
        self.record(Call::DeleteShader(shader.get()));
        self.state.borrow_mut().shaders.remove(&shader.get());
    }

    fn create_program(&self) -> Option<Name> {
        let mut state = self.state.borrow_mut();
        let name = state.allocate();
        state.programs.insert(name.get(), FakeProgram::default());
        state.calls.push(Call::CreateProgram(name.get()));
        Some(name)
    }

    fn attach_shader(&self, program: Name, shader: Name) {
        self.record(Call::AttachShader {
            program: program.get(),
            shader: shader.get(),
        });
        let mut state = self.state.borrow_mut();
        if !state.shaders.contains_key(&shader.get()) {
            state.errors.push(format!("attach of unknown shader {}", shader.get()));
            return;
        }
        if let Some(program) = state.programs.get_mut(&program.get()) {
            program.attached.push(shader.get());
        }
    }

    fn link_program(&self, program: Name) {
        self.record(Call::LinkProgram(program.get()));
        let mut state = self.state.borrow_mut();
        let attached = match state.programs.get(&program.get()) {
            Some(program) => program.attached.clone(),
            None => return,
        };

        let mut kinds = HashSet::new();
        let mut sources = Vec::new();
        for shader in attached.iter().filter_map(|id| state.shaders.get(id)) {
            if shader.compiled {
                kinds.extend(shader.kind);
                sources.push(shader.source.clone());
            }
        }

        let linked = kinds.contains(&StageKind::Vertex) && kinds.contains(&StageKind::Fragment);
        if let Some(program) = state.programs.get_mut(&program.get()) {
            program.linked = linked;
            program.uniforms = Self::scan_uniforms(&sources);
        }
    }

    fn validate_program(&self, program: Name) {
        self.record(Call::ValidateProgram(program.get()));
    }

    fn program_link_status(&self, program: Name) -> bool {
        self.record(Call::LinkStatus(program.get()));
        self.is_linked(program.get())
    }

    fn program_validate_status(&self, program: Name) -> bool {
        self.record(Call::ValidateStatus(program.get()));
        self.is_linked(program.get())
    }

    fn program_info_log(&self, program: Name) -> String {
        if self.is_linked(program.get()) {
            String::new()
        } else {
            String::from("error: linking with uncompiled/unspecialized shader")
        }
    }

    fn use_program(&self, program: Option<Name>) {
        let program = program.map(Name::get);
        self.record(Call::UseProgram(program));
        let mut state = self.state.borrow_mut();
        match program {
            Some(id) if !state.programs.get(&id).is_some_and(|program| program.linked) => {
                state.errors.push(format!("use of unlinked program {id}"));
            }
            _ => state.current_program = program,
        }
    }

    fn delete_program(&self, program: Name) {
        self.record(Call::DeleteProgram(program.get()));
        let mut state = self.state.borrow_mut();
        state.programs.remove(&program.get());
        if state.current_program == Some(program.get()) {
            state.current_program = None;
        }
    }

    fn uniform_location(&self, program: Name, name: &CStr) -> Option<UniformLocation> {
        let state = self.state.borrow();
        let name = name.to_str().ok()?;
        let location = state.programs.get(&program.get())?.uniforms.get(name)?;
        UniformLocation::new(*location)
    }

    fn uniform_4f(&self, location: UniformLocation, value: [f32; 4]) {
        let mut state = self.state.borrow_mut();
        let program = state.current_program;
        if program.is_none() {
            state.errors.push(String::from("uniform set without a current program"));
        }
        state.calls.push(Call::Uniform4f {
            program,
            location: location.get(),
            value,
        });
    }

    fn create_vertex_array(&self) -> Option<Name> {
        if self.refuse_buffers {
            return None;
        }
        let mut state = self.state.borrow_mut();
        let name = state.allocate();
        state.vertex_arrays.insert(name.get());
        Some(name)
    }

    fn bind_vertex_array(&self, vertex_array: Option<Name>) {
        self.state.borrow_mut().bound_vertex_array = vertex_array.map(Name::get);
    }

    fn delete_vertex_array(&self, vertex_array: Name) {
        self.record(Call::DeleteVertexArray(vertex_array.get()));
        self.state.borrow_mut().vertex_arrays.remove(&vertex_array.get());
    }

    fn create_buffer(&self) -> Option<Name> {
        if self.refuse_buffers {
            return None;
        }
        let mut state = self.state.borrow_mut();
        let name = state.allocate();
        state.buffers.insert(name.get());
        Some(name)
    }

    fn bind_array_buffer(&self, _buffer: Option<Name>) {}

    fn array_buffer_data(&self, data: &[u8]) {
        self.record(Call::BufferData(data.len()));
    }

    fn enable_vertex_attrib_array(&self, _location: u32) {}

    fn vertex_attrib_pointer_f32(&self, location: u32, components: i32, stride: i32, offset: usize) {
        self.record(Call::AttribPointer {
            location,
            components,
            stride,
            offset,
        });
    }

    fn delete_buffer(&self, buffer: Name) {
        self.record(Call::DeleteBuffer(buffer.get()));
        self.state.borrow_mut().buffers.remove(&buffer.get());
    }

    fn viewport(&self, width: i32, height: i32) {
        self.record(Call::Viewport(width, height));
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        self.record(Call::ClearColor(rgba));
    }

    fn clear(&self) {
        self.record(Call::Clear);
    }

    fn polygon_fill(&self) {
        self.record(Call::PolygonFill);
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        let mut state = self.state.borrow_mut();
        let program = state.current_program;
        if !program.is_some_and(|id| state.programs.get(&id).is_some_and(|p| p.linked)) {
            state.errors.push(String::from("draw without a linked program"));
        }
        if state.bound_vertex_array.is_none() {
            state.errors.push(String::from("draw without a vertex array"));
        }
        state.calls.push(Call::Draw {
            program,
            topology,
            first,
            count,
        });
    }
}
