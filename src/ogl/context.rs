use std::ffi::c_void;

use super::{
    driver::{Driver, GlDriver},
    program::Program,
};

/// Owns the driver and the one piece of cached driver state: the bound program.
///
/// Binding goes through `&mut self`, so the cache can't be shared between threads or
/// aliased behind the caller's back.
#[derive(Debug)]
pub struct Context<D: Driver = GlDriver> {
    gl: D,
    current_program: Option<Program>,
}

impl Context<GlDriver> {
    /// Load the OpenGL function pointers for the context current on this thread.
    pub fn load_with<F>(loader: F) -> Self
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        Self::new(GlDriver::load_with(loader))
    }
}

impl<D: Driver> Context<D> {
    /// Wrap `gl`. No program is considered bound yet.
    pub fn new(gl: D) -> Self {
        Self {
            gl,
            current_program: None,
        }
    }

    pub fn driver(&self) -> &D {
        &self.gl
    }

    /// The program bound by the last `Program::use_program`, if any
    pub fn current_program(&self) -> Option<Program> {
        self.current_program
    }

    /// Call after something outside this context bound another program (a UI painter, for
    /// example), so the next `use_program` reaches the driver again.
    pub fn forget_current_program(&mut self) {
        self.current_program = None;
    }

    /// Bind `program` unless it is already the current one.
    /// Returns whether the driver was called.
    pub(crate) fn bind_program(&mut self, program: Program) -> bool {
        if self.current_program == Some(program) {
            tracing::trace!(program = program.id(), "program already bound");
            return false;
        }

        self.gl.use_program(program.id());
        self.current_program = Some(program);
        true
    }
}
