use std::{ffi::CStr, fs, path::Path};

use eyre::{eyre, Result, WrapErr};

use super::{
    attribute::Attribute,
    context::Context,
    driver::Driver,
    log_to_string, nul_terminated,
    shader::{Shader, ShaderType},
    uniform::Uniform,
};

/// Integer-valued program queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramParameter {
    LinkStatus,
    /// Length of the info log, including the terminator
    InfoLogLength,
    AttachedShaders,
    ActiveAttributes,
    ActiveUniforms,
}

/// A shader program, identified by the id the driver gave it.
/// Programs are never deleted through this handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Program(u32);

impl Program {
    pub fn create<D: Driver>(ctx: &Context<D>) -> Program {
        Program(ctx.driver().create_program())
    }

    /// Wrap an id obtained elsewhere. `Program::from_id(0)` is "no program".
    pub fn from_id(id: u32) -> Program {
        Program(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }

    pub fn attach_shader<D: Driver>(self, ctx: &Context<D>, shader: Shader) {
        ctx.driver().attach_shader(self.0, shader.id());
    }

    /// Link the attached shaders. Failure is only visible through `link_status`.
    pub fn link<D: Driver>(self, ctx: &Context<D>) {
        ctx.driver().link_program(self.0);
    }

    /// Make this the active program. Does nothing if `ctx` already has it bound.
    pub fn use_program<D: Driver>(self, ctx: &mut Context<D>) {
        ctx.bind_program(self);
    }

    /// Look up a vertex input by name. A missing name yields the driver's -1, unchecked.
    pub fn attribute_location<D: Driver>(self, ctx: &Context<D>, name: &str) -> Attribute {
        let name = nul_terminated(name);
        let name = CStr::from_bytes_until_nul(&name).unwrap_or_default();
        Attribute::from_location(ctx.driver().get_attrib_location(self.0, name))
    }

    /// Look up a uniform by name. A missing name yields the driver's -1, unchecked.
    pub fn uniform_location<D: Driver>(self, ctx: &Context<D>, name: &str) -> Uniform {
        let name = nul_terminated(name);
        let name = CStr::from_bytes_until_nul(&name).unwrap_or_default();
        Uniform::from_location(ctx.driver().get_uniform_location(self.0, name))
    }

    pub fn parameter<D: Driver>(self, ctx: &Context<D>, param: ProgramParameter) -> i32 {
        ctx.driver().get_program_iv(self.0, param)
    }

    pub fn link_status<D: Driver>(self, ctx: &Context<D>) -> bool {
        self.parameter(ctx, ProgramParameter::LinkStatus) != 0
    }

    /// Read the linker's log. Asks for exactly `InfoLogLength` bytes.
    pub fn info_log<D: Driver>(self, ctx: &Context<D>) -> String {
        let len = self.parameter(ctx, ProgramParameter::InfoLogLength).max(0) as usize;
        let mut buf = vec![0u8; len];
        ctx.driver().get_program_info_log(self.0, &mut buf);
        log_to_string(&buf)
    }

    /// Compile both stages, attach them and link.
    /// Compile and link failures come back as errors carrying the driver's log.
    pub fn from_sources<D: Driver>(
        ctx: &Context<D>,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Program> {
        let vs = Shader::build(ctx, ShaderType::Vertex, vertex_src)
            .wrap_err("Couldn't build the vertex shader")?;
        let fs = Shader::build(ctx, ShaderType::Fragment, fragment_src)
            .wrap_err("Couldn't build the fragment shader")?;

        let program = Program::create(ctx);
        program.attach_shader(ctx, vs);
        program.attach_shader(ctx, fs);
        program.link(ctx);

        if !program.link_status(ctx) {
            let log = program.info_log(ctx);
            tracing::warn!(program = program.0, "program link failed:\n{log}");
            return Err(eyre!("Failed to create a shader program: '{log}'"));
        }

        tracing::debug!(program = program.0, vs = vs.id(), fs = fs.id(), "linked program");
        Ok(program)
    }

    /// `from_sources` with the sources read from disk
    pub fn from_files<D: Driver>(
        ctx: &Context<D>,
        vs_path: impl AsRef<Path>,
        fs_path: impl AsRef<Path>,
    ) -> Result<Program> {
        let vs_path = vs_path.as_ref();
        let fs_path = fs_path.as_ref();

        let vs_src = fs::read_to_string(vs_path).wrap_err_with(|| {
            format!("Couldn't load the vertex shader file '{}'", vs_path.display())
        })?;
        let fs_src = fs::read_to_string(fs_path).wrap_err_with(|| {
            format!("Couldn't load the fragment shader file '{}'", fs_path.display())
        })?;

        Program::from_sources(ctx, &vs_src, &fs_src)
    }
}
