//! Typed handles over the OpenGL shader and program objects used by the voxel renderer.
//!
//! Every handle is a plain `Copy` id. Calls go through a [`Context`], which owns the
//! [`Driver`] and remembers which program is currently bound.

/// Abstraction for working with OpenGL shader programs.
pub mod ogl;

pub use ogl::{
    attribute::{Attribute, Type},
    context::Context,
    driver::{Driver, GlDriver},
    program::{Program, ProgramParameter},
    shader::{Shader, ShaderParameter, ShaderType},
    uniform::Uniform,
};
