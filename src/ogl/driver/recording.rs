use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    ffi::CStr,
};

use super::Driver;
use crate::ogl::{
    attribute::Type,
    program::ProgramParameter,
    shader::{ShaderParameter, ShaderType},
};

/// One forwarded driver call, with the arguments it was given.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateProgram(u32),
    AttachShader { program: u32, shader: u32 },
    LinkProgram(u32),
    UseProgram(u32),
    GetAttribLocation { program: u32, name: String },
    GetUniformLocation { program: u32, name: String },
    GetProgramiv(u32, ProgramParameter),
    GetProgramInfoLog { program: u32, buf_len: usize },
    UniformMatrix4fv { location: i32, count: i32, values: Vec<f32> },
    Uniform1i(i32, i32),
    Uniform3i(i32, i32, i32, i32),
    Uniform1iv(i32, Vec<i32>),
    Uniform1f(i32, f32),
    Uniform3f(i32, f32, f32, f32),
    EnableVertexAttribArray(u32),
    DisableVertexAttribArray(u32),
    VertexAttribPointer {
        index: u32,
        size: i32,
        ty: Type,
        normalized: bool,
        stride: i32,
        offset: usize,
    },
    VertexAttribIPointer {
        index: u32,
        size: i32,
        ty: Type,
        stride: i32,
        offset: usize,
    },
    CreateShader(ShaderType, u32),
    ShaderSource(u32, String),
    CompileShader(u32),
    GetShaderiv(u32, ShaderParameter),
    GetShaderInfoLog { shader: u32, buf_len: usize },
}

/// A `Driver` that keeps a log of every call and answers queries from tables.
///
/// Object ids are handed out sequentially starting at 1. Compile and link status default to
/// success, every other parameter to 0, and unknown names resolve to -1.
#[derive(Debug)]
pub struct RecordingDriver {
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u32>,
    shader_params: HashMap<(u32, ShaderParameter), i32>,
    program_params: HashMap<(u32, ProgramParameter), i32>,
    shader_logs: HashMap<u32, Vec<u8>>,
    program_logs: HashMap<u32, Vec<u8>>,
    attributes: HashMap<String, i32>,
    uniforms: HashMap<String, i32>,
}

impl Default for RecordingDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            shader_params: HashMap::new(),
            program_params: HashMap::new(),
            shader_logs: HashMap::new(),
            program_logs: HashMap::new(),
            attributes: HashMap::new(),
            uniforms: HashMap::new(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    /// Ids of every program bound through `UseProgram`, in order
    pub fn binds(&self) -> Vec<u32> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::UseProgram(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn with_attribute(mut self, name: &str, location: i32) -> Self {
        self.attributes.insert(name.to_owned(), location);
        self
    }

    pub fn with_uniform(mut self, name: &str, location: i32) -> Self {
        self.uniforms.insert(name.to_owned(), location);
        self
    }

    pub fn with_shader_param(mut self, shader: u32, param: ShaderParameter, v: i32) -> Self {
        self.shader_params.insert((shader, param), v);
        self
    }

    pub fn with_program_param(mut self, program: u32, param: ProgramParameter, v: i32) -> Self {
        self.program_params.insert((program, param), v);
        self
    }

    /// Set the shader's log; `InfoLogLength` reports it including the terminator
    pub fn with_shader_log(mut self, shader: u32, log: &str) -> Self {
        let bytes = crate::ogl::nul_terminated(log);
        self.shader_params
            .insert((shader, ShaderParameter::InfoLogLength), bytes.len() as i32);
        self.shader_logs.insert(shader, bytes);
        self
    }

    /// Set the program's log; `InfoLogLength` reports it including the terminator
    pub fn with_program_log(mut self, program: u32, log: &str) -> Self {
        let bytes = crate::ogl::nul_terminated(log);
        self.program_params
            .insert((program, ProgramParameter::InfoLogLength), bytes.len() as i32);
        self.program_logs.insert(program, bytes);
        self
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn next_id(&self) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn fill(buf: &mut [u8], log: Option<&Vec<u8>>) {
        if let Some(log) = log {
            let n = buf.len().min(log.len());
            buf[..n].copy_from_slice(&log[..n]);
        }
    }
}

fn name_of(name: &CStr) -> String {
    name.to_string_lossy().into_owned()
}

impl Driver for RecordingDriver {
    fn create_program(&self) -> u32 {
        let id = self.next_id();
        self.record(Call::CreateProgram(id));
        id
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader { program, shader });
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn use_program(&self, program: u32) {
        self.record(Call::UseProgram(program));
    }

    fn get_attrib_location(&self, program: u32, name: &CStr) -> i32 {
        let name = name_of(name);
        let loc = self.attributes.get(&name).copied().unwrap_or(-1);
        self.record(Call::GetAttribLocation { program, name });
        loc
    }

    fn get_uniform_location(&self, program: u32, name: &CStr) -> i32 {
        let name = name_of(name);
        let loc = self.uniforms.get(&name).copied().unwrap_or(-1);
        self.record(Call::GetUniformLocation { program, name });
        loc
    }

    fn get_program_iv(&self, program: u32, param: ProgramParameter) -> i32 {
        self.record(Call::GetProgramiv(program, param));
        let default = match param {
            ProgramParameter::LinkStatus => 1,
            _ => 0,
        };
        self.program_params
            .get(&(program, param))
            .copied()
            .unwrap_or(default)
    }

    fn get_program_info_log(&self, program: u32, buf: &mut [u8]) {
        self.record(Call::GetProgramInfoLog {
            program,
            buf_len: buf.len(),
        });
        Self::fill(buf, self.program_logs.get(&program));
    }

    fn uniform_matrix4fv(&self, location: i32, count: i32, values: &[f32]) {
        self.record(Call::UniformMatrix4fv {
            location,
            count,
            values: values.to_vec(),
        });
    }

    fn uniform_1i(&self, location: i32, v: i32) {
        self.record(Call::Uniform1i(location, v));
    }

    fn uniform_3i(&self, location: i32, x: i32, y: i32, z: i32) {
        self.record(Call::Uniform3i(location, x, y, z));
    }

    fn uniform_1iv(&self, location: i32, values: &[i32]) {
        self.record(Call::Uniform1iv(location, values.to_vec()));
    }

    fn uniform_1f(&self, location: i32, v: f32) {
        self.record(Call::Uniform1f(location, v));
    }

    fn uniform_3f(&self, location: i32, x: f32, y: f32, z: f32) {
        self.record(Call::Uniform3f(location, x, y, z));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::DisableVertexAttribArray(index));
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        ty: Type,
        normalized: bool,
        stride: i32,
        offset: usize,
    ) {
        self.record(Call::VertexAttribPointer {
            index,
            size,
            ty,
            normalized,
            stride,
            offset,
        });
    }

    fn vertex_attrib_i_pointer(&self, index: u32, size: i32, ty: Type, stride: i32, offset: usize) {
        self.record(Call::VertexAttribIPointer {
            index,
            size,
            ty,
            stride,
            offset,
        });
    }

    fn create_shader(&self, ty: ShaderType) -> u32 {
        let id = self.next_id();
        self.record(Call::CreateShader(ty, id));
        id
    }

    fn shader_source(&self, shader: u32, src: &CStr) {
        self.record(Call::ShaderSource(shader, name_of(src)));
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }

    fn get_shader_iv(&self, shader: u32, param: ShaderParameter) -> i32 {
        self.record(Call::GetShaderiv(shader, param));
        let default = match param {
            ShaderParameter::CompileStatus => 1,
            _ => 0,
        };
        self.shader_params
            .get(&(shader, param))
            .copied()
            .unwrap_or(default)
    }

    fn get_shader_info_log(&self, shader: u32, buf: &mut [u8]) {
        self.record(Call::GetShaderInfoLog {
            shader,
            buf_len: buf.len(),
        });
        Self::fill(buf, self.shader_logs.get(&shader));
    }
}
