use std::{
    ffi::{c_void, CStr},
    marker::PhantomData,
    ptr,
};

use gl::types::{GLenum, GLint};

use super::{
    attribute::Type,
    program::ProgramParameter,
    shader::{ShaderParameter, ShaderType},
};

/// Records every call instead of talking to a GPU.
#[cfg(test)]
pub mod recording;

/// The subset of the native shader/program API that the handles forward to.
///
/// Methods mirror the OpenGL entry points one-to-one. Nothing is validated on this side of
/// the seam: bad ids and locations are the driver's problem.
pub trait Driver {
    fn create_program(&self) -> u32;
    fn attach_shader(&self, program: u32, shader: u32);
    fn link_program(&self, program: u32);
    fn use_program(&self, program: u32);
    fn get_attrib_location(&self, program: u32, name: &CStr) -> i32;
    fn get_uniform_location(&self, program: u32, name: &CStr) -> i32;
    fn get_program_iv(&self, program: u32, param: ProgramParameter) -> i32;
    /// Fill `buf` with at most `buf.len()` bytes of the program's info log
    fn get_program_info_log(&self, program: u32, buf: &mut [u8]);

    /// `values` holds `count` column-major matrices
    fn uniform_matrix4fv(&self, location: i32, count: i32, values: &[f32]);
    fn uniform_1i(&self, location: i32, v: i32);
    fn uniform_3i(&self, location: i32, x: i32, y: i32, z: i32);
    fn uniform_1iv(&self, location: i32, values: &[i32]);
    fn uniform_1f(&self, location: i32, v: f32);
    fn uniform_3f(&self, location: i32, x: f32, y: f32, z: f32);

    fn enable_vertex_attrib_array(&self, index: u32);
    fn disable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        ty: Type,
        normalized: bool,
        stride: i32,
        offset: usize,
    );
    fn vertex_attrib_i_pointer(&self, index: u32, size: i32, ty: Type, stride: i32, offset: usize);

    fn create_shader(&self, ty: ShaderType) -> u32;
    fn shader_source(&self, shader: u32, src: &CStr);
    fn compile_shader(&self, shader: u32);
    fn get_shader_iv(&self, shader: u32, param: ShaderParameter) -> i32;
    /// Fill `buf` with at most `buf.len()` bytes of the shader's info log
    fn get_shader_info_log(&self, shader: u32, buf: &mut [u8]);
}

/// Driver backed by the `gl` crate's loaded function pointers.
///
/// OpenGL contexts are bound to one thread, so this type is neither `Send` nor `Sync`.
#[derive(Debug)]
pub struct GlDriver {
    _thread_bound: PhantomData<*const ()>,
}

impl GlDriver {
    /// Load the OpenGL function pointers with `loader` (e.g. SDL's `gl_get_proc_address`).
    /// A context must be current on the calling thread.
    pub fn load_with<F>(loader: F) -> Self
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);
        Self {
            _thread_bound: PhantomData,
        }
    }
}

fn gl_bool(v: bool) -> gl::types::GLboolean {
    if v {
        gl::TRUE
    } else {
        gl::FALSE
    }
}

impl ShaderType {
    pub(crate) fn to_gl(self) -> GLenum {
        match self {
            ShaderType::Vertex => gl::VERTEX_SHADER,
            ShaderType::Fragment => gl::FRAGMENT_SHADER,
            ShaderType::Geometry => gl::GEOMETRY_SHADER,
        }
    }
}

impl ShaderParameter {
    pub(crate) fn to_gl(self) -> GLenum {
        match self {
            ShaderParameter::ShaderType => gl::SHADER_TYPE,
            ShaderParameter::DeleteStatus => gl::DELETE_STATUS,
            ShaderParameter::CompileStatus => gl::COMPILE_STATUS,
            ShaderParameter::InfoLogLength => gl::INFO_LOG_LENGTH,
            ShaderParameter::SourceLength => gl::SHADER_SOURCE_LENGTH,
        }
    }
}

impl ProgramParameter {
    pub(crate) fn to_gl(self) -> GLenum {
        match self {
            ProgramParameter::LinkStatus => gl::LINK_STATUS,
            ProgramParameter::InfoLogLength => gl::INFO_LOG_LENGTH,
            ProgramParameter::AttachedShaders => gl::ATTACHED_SHADERS,
            ProgramParameter::ActiveAttributes => gl::ACTIVE_ATTRIBUTES,
            ProgramParameter::ActiveUniforms => gl::ACTIVE_UNIFORMS,
        }
    }
}

impl Type {
    pub(crate) fn to_gl(self) -> GLenum {
        match self {
            Type::Byte => gl::BYTE,
            Type::UnsignedByte => gl::UNSIGNED_BYTE,
            Type::Short => gl::SHORT,
            Type::UnsignedShort => gl::UNSIGNED_SHORT,
            Type::Int => gl::INT,
            Type::UnsignedInt => gl::UNSIGNED_INT,
            Type::HalfFloat => gl::HALF_FLOAT,
            Type::Float => gl::FLOAT,
        }
    }
}

impl Driver for GlDriver {
    fn create_program(&self) -> u32 {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn link_program(&self, program: u32) {
        unsafe { gl::LinkProgram(program) }
    }

    fn use_program(&self, program: u32) {
        unsafe { gl::UseProgram(program) }
    }

    fn get_attrib_location(&self, program: u32, name: &CStr) -> i32 {
        unsafe { gl::GetAttribLocation(program, name.as_ptr() as _) }
    }

    fn get_uniform_location(&self, program: u32, name: &CStr) -> i32 {
        unsafe { gl::GetUniformLocation(program, name.as_ptr() as _) }
    }

    fn get_program_iv(&self, program: u32, param: ProgramParameter) -> i32 {
        let mut res: GLint = 0;
        unsafe { gl::GetProgramiv(program, param.to_gl(), &mut res) };
        res
    }

    fn get_program_info_log(&self, program: u32, buf: &mut [u8]) {
        unsafe {
            gl::GetProgramInfoLog(
                program,
                buf.len() as i32,
                ptr::null_mut(),
                buf.as_mut_ptr() as _,
            )
        }
    }

    fn uniform_matrix4fv(&self, location: i32, count: i32, values: &[f32]) {
        unsafe { gl::UniformMatrix4fv(location, count, gl::FALSE, values.as_ptr()) }
    }

    fn uniform_1i(&self, location: i32, v: i32) {
        unsafe { gl::Uniform1i(location, v) }
    }

    fn uniform_3i(&self, location: i32, x: i32, y: i32, z: i32) {
        unsafe { gl::Uniform3i(location, x, y, z) }
    }

    fn uniform_1iv(&self, location: i32, values: &[i32]) {
        unsafe { gl::Uniform1iv(location, values.len() as i32, values.as_ptr()) }
    }

    fn uniform_1f(&self, location: i32, v: f32) {
        unsafe { gl::Uniform1f(location, v) }
    }

    fn uniform_3f(&self, location: i32, x: f32, y: f32, z: f32) {
        unsafe { gl::Uniform3f(location, x, y, z) }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { gl::EnableVertexAttribArray(index) }
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        unsafe { gl::DisableVertexAttribArray(index) }
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
        unsafe {
            gl::VertexAttribPointer(
                index,
                size,
                ty.to_gl(),
                gl_bool(normalized),
                stride,
                offset as *const c_void,
            )
        }
    }

    fn vertex_attrib_i_pointer(&self, index: u32, size: i32, ty: Type, stride: i32, offset: usize) {
        unsafe { gl::VertexAttribIPointer(index, size, ty.to_gl(), stride, offset as *const c_void) }
    }

    fn create_shader(&self, ty: ShaderType) -> u32 {
        unsafe { gl::CreateShader(ty.to_gl()) }
    }

    fn shader_source(&self, shader: u32, src: &CStr) {
        unsafe { gl::ShaderSource(shader, 1, &(src.as_ptr() as _), ptr::null()) }
    }

    fn compile_shader(&self, shader: u32) {
        unsafe { gl::CompileShader(shader) }
    }

    fn get_shader_iv(&self, shader: u32, param: ShaderParameter) -> i32 {
        let mut res: GLint = 0;
        unsafe { gl::GetShaderiv(shader, param.to_gl(), &mut res) };
        res
    }

    fn get_shader_info_log(&self, shader: u32, buf: &mut [u8]) {
        unsafe {
            gl::GetShaderInfoLog(
                shader,
                buf.len() as i32,
                ptr::null_mut(),
                buf.as_mut_ptr() as _,
            )
        }
    }
}
