// shaders.rs - Shader stage compilation and program linking

use std::collections::HashMap;
use std::ffi::CString;
use std::rc::Rc;

use glam::Vec4;
use log::{error, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::driver::{Driver, Name, StageKind, UniformLocation};

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("Failed to compile {stage} shader: {log}")]
    Compile { stage: StageKind, log: String },
    #[error("{stage} shader source contains a NUL byte")]
    InvalidSource { stage: StageKind },
    #[error("Program linking failed: {0}")]
    Link(String),
    #[error("Driver could not create a {0} object")]
    CreateFailed(&'static str),
}

impl ShaderError {
    /// The stage a compile-time failure belongs to, if any.
    pub fn stage(&self) -> Option<StageKind> {
        match self {
            ShaderError::Compile { stage, .. } | ShaderError::InvalidSource { stage } => Some(*stage),
            _ => None,
        }
    }
}

/// Whether [`ShaderProgramBuilder::build_program`] inspects the driver's
/// link and validate results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkCheck {
    /// Compile errors are only logged and the program is returned even when
    /// it cannot be used. Link and validate status are never queried.
    Unchecked,
    /// Compile and link failures are returned as errors.
    #[default]
    Checked,
}

/// A compiled shader stage. Deleted from the driver when dropped.
pub struct ShaderStage {
    name: Name,
    kind: StageKind,
    driver: Rc<dyn Driver>,
}

impl ShaderStage {
    pub fn kind(&self) -> StageKind {
        self.kind
    }
}

impl Drop for ShaderStage {
    fn drop(&mut self) {
        self.driver.delete_shader(self.name);
    }
}

/// A linked program owned by the caller.
pub struct ShaderProgram {
    name: Name,
    driver: Rc<dyn Driver>,
    uniforms: HashMap<String, Option<UniformLocation>>,
}

impl ShaderProgram {
    fn from_name(name: Name, driver: Rc<dyn Driver>) -> Self {
        Self {
            name,
            driver,
            uniforms: HashMap::new(),
        }
    }

    pub fn bind(&self) {
        self.driver.use_program(Some(self.name));
    }

    pub fn uniform_location(&mut self, name: &str) -> Option<UniformLocation> {
        if let Some(location) = self.uniforms.get(name) {
            return *location;
        }

        let location = match CString::new(name) {
            Ok(cname) => self.driver.uniform_location(self.name, &cname),
            Err(_) => None,
        };
        if location.is_none() {
            warn!("Uniform '{}' not found in shader", name);
        }

        self.uniforms.insert(name.to_string(), location);
        location
    }

    pub fn set_uniform_vec4(&self, location: UniformLocation, value: Vec4) {
        self.bind();
        self.driver.uniform_4f(location, value.to_array());
    }

    /// Returns `false` when the program has no active uniform called `name`.
    pub fn set_uniform_vec4_by_name(&mut self, name: &str, value: Vec4) -> bool {
        match self.uniform_location(name) {
            Some(location) => {
                self.set_uniform_vec4(location, value);
                true
            }
            None => false,
        }
    }

    /// Deletes the program now instead of at the end of its scope.
    pub fn release(self) {}
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        self.driver.delete_program(self.name);
    }
}

/// Turns a vertex and fragment source pair into a [`ShaderProgram`].
///
/// The builder holds no state between calls; every build creates fresh
/// driver objects.
pub struct ShaderProgramBuilder {
    driver: Rc<dyn Driver>,
    link_check: LinkCheck,
}

impl ShaderProgramBuilder {
    pub fn new(driver: Rc<dyn Driver>) -> Self {
        Self {
            driver,
            link_check: LinkCheck::default(),
        }
    }

    pub fn with_link_check(mut self, link_check: LinkCheck) -> Self {
        self.link_check = link_check;
        self
    }

    /// Compiles one stage. A failure is logged with the driver's info log
    /// and the stage object is deleted before the error is returned.
    pub fn compile_stage(&self, kind: StageKind, source: &str) -> Result<ShaderStage, ShaderError> {
        let source = CString::new(source).map_err(|_| {
            error!("Failed to compile {} shader!\nsource contains a NUL byte", kind);
            ShaderError::InvalidSource { stage: kind }
        })?;

        let name = self
            .driver
            .create_shader(kind)
            .ok_or(ShaderError::CreateFailed("shader"))?;
        let stage = ShaderStage {
            name,
            kind,
            driver: Rc::clone(&self.driver),
        };

        self.driver.shader_source(name, &source);
        self.driver.compile_shader(name);

        if !self.driver.shader_compile_status(name) {
            let log = self.driver.shader_info_log(name);
            error!("Failed to compile {} shader!\n{}", kind, log.trim_end());
            return Err(ShaderError::Compile { stage: kind, log });
        }

        Ok(stage)
    }

    /// Compiles both stages, attaches the ones that compiled, then links and
    /// validates. Stage objects are deleted once the program is linked.
    pub fn build_program(
        &self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ShaderProgram, ShaderError> {
        let name = self
            .driver
            .create_program()
            .ok_or(ShaderError::CreateFailed("program"))?;
        let program = ShaderProgram::from_name(name, Rc::clone(&self.driver));

        let stages = [
            self.compile_stage(StageKind::Vertex, vertex_source),
            self.compile_stage(StageKind::Fragment, fragment_source),
        ];

        for stage in stages.iter().flatten() {
            self.driver.attach_shader(name, stage.name);
        }
        self.driver.link_program(name);
        self.driver.validate_program(name);

        let mut compile_error = None;
        for stage in stages {
            if let Err(err) = stage {
                if compile_error.is_none() {
                    compile_error = Some(err);
                }
            }
        }

        if self.link_check == LinkCheck::Unchecked {
            return Ok(program);
        }
        if let Some(err) = compile_error {
            return Err(err);
        }

        if !self.driver.program_link_status(name) {
            let log = self.driver.program_info_log(name);
            error!("Failed to link shader program!\n{}", log.trim_end());
            return Err(ShaderError::Link(log));
        }
        if !self.driver.program_validate_status(name) {
            warn!(
                "Shader program failed validation: {}",
                self.driver.program_info_log(name).trim_end()
            );
        }

        Ok(program)
    }
}
