use std::ffi::CStr;

use eyre::{eyre, Result};

use super::{context::Context, driver::Driver, log_to_string, nul_terminated};

/// The pipeline stage a shader is compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderType {
    Vertex,
    Fragment,
    Geometry,
}

/// Integer-valued shader queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderParameter {
    ShaderType,
    DeleteStatus,
    CompileStatus,
    /// Length of the info log, including the terminator
    InfoLogLength,
    SourceLength,
}

/// A single shader stage, identified by the id the driver gave it.
///
/// Nothing is checked automatically: after `compile`, query `compile_status` and `info_log`
/// (or use `Shader::build`, which does both).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shader(u32);

impl Shader {
    pub fn create<D: Driver>(ctx: &Context<D>, ty: ShaderType) -> Shader {
        Shader(ctx.driver().create_shader(ty))
    }

    /// Wrap an id obtained elsewhere
    pub fn from_id(id: u32) -> Shader {
        Shader(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }

    /// Upload `src` as the shader's only source string
    pub fn source<D: Driver>(self, ctx: &Context<D>, src: &str) {
        let src = nul_terminated(src);
        let src = CStr::from_bytes_until_nul(&src).unwrap_or_default();
        ctx.driver().shader_source(self.0, src);
    }

    pub fn compile<D: Driver>(self, ctx: &Context<D>) {
        ctx.driver().compile_shader(self.0);
    }

    pub fn parameter<D: Driver>(self, ctx: &Context<D>, param: ShaderParameter) -> i32 {
        ctx.driver().get_shader_iv(self.0, param)
    }

    pub fn compile_status<D: Driver>(self, ctx: &Context<D>) -> bool {
        self.parameter(ctx, ShaderParameter::CompileStatus) != 0
    }

    /// Read the compiler's log. Asks for exactly `InfoLogLength` bytes.
    pub fn info_log<D: Driver>(self, ctx: &Context<D>) -> String {
        let len = self.parameter(ctx, ShaderParameter::InfoLogLength).max(0) as usize;
        let mut buf = vec![0u8; len];
        ctx.driver().get_shader_info_log(self.0, &mut buf);
        log_to_string(&buf)
    }

    /// Create, upload and compile a shader, failing with the compiler's log if it doesn't compile
    pub fn build<D: Driver>(ctx: &Context<D>, ty: ShaderType, src: &str) -> Result<Shader> {
        let shader = Shader::create(ctx, ty);
        shader.source(ctx, src);
        shader.compile(ctx);

        if !shader.compile_status(ctx) {
            let log = shader.info_log(ctx);
            tracing::warn!(shader = shader.0, ?ty, "shader compilation failed:\n{log}");
            return Err(eyre!("Failed to compile a {ty:?} shader: '{log}'"));
        }

        tracing::debug!(shader = shader.0, ?ty, "compiled shader");
        Ok(shader)
    }
}
