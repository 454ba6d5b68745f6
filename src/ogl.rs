use std::{
    ffi::{c_void, CStr},
    ptr,
};

use self::{context::Context, driver::GlDriver};

/// Vertex input slots of a linked program.
pub mod attribute;

/// Owner of the driver and of the currently bound program.
pub mod context;

/// The seam between the typed handles and the native API.
pub mod driver;

/// Abstraction for working with OpenGL shader programs.
pub mod program;

/// Abstraction for working with single OpenGL shader stages.
pub mod shader;

/// Program-scoped uniform values.
pub mod uniform;

/// NVidia reports every buffer allocation through the debug output
const NV_BUFFER_CREATION: u32 = 131185;

/// Route the driver's debug output into `tracing`.
///
/// Debug output is GL 4.3 / KHR_debug. When the loader didn't resolve those entry points
/// (4.1 core contexts on macOS, for one) nothing is installed and `false` is returned.
pub fn init_debug(_ctx: &Context<GlDriver>) -> bool {
    if !gl::DebugMessageCallback::is_loaded() || !gl::DebugMessageControl::is_loaded() {
        tracing::debug!("OpenGL debug output is unavailable on this context");
        return false;
    }

    unsafe {
        // Synchronous so messages are logged from inside the offending call
        gl::Enable(gl::DEBUG_OUTPUT);
        gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        gl::DebugMessageCallback(Some(gl_debug_callback), ptr::null());

        // Every source, type and severity
        let (any_source, any_type, any_severity) = (gl::DONT_CARE, gl::DONT_CARE, gl::DONT_CARE);
        gl::DebugMessageControl(any_source, any_type, any_severity, 0, ptr::null(), gl::TRUE);
    }

    tracing::debug!("OpenGL debug output enabled");
    true
}

extern "system" fn gl_debug_callback(
    _src: u32,
    _typ: u32,
    id: u32,
    severity: u32,
    _len: i32,
    msg: *const gl::types::GLchar,
    _user_param: *mut c_void,
) {
    if id == NV_BUFFER_CREATION || msg.is_null() {
        return;
    }

    let msg = unsafe { CStr::from_ptr(msg) }.to_string_lossy();

    match severity {
        gl::DEBUG_SEVERITY_NOTIFICATION => tracing::trace!(id, "OpenGL: {msg}"),
        gl::DEBUG_SEVERITY_LOW => tracing::debug!(id, "OpenGL: {msg}"),
        gl::DEBUG_SEVERITY_MEDIUM => tracing::warn!(id, "OpenGL: {msg}"),
        gl::DEBUG_SEVERITY_HIGH => tracing::error!(id, "OpenGL: {msg}"),
        _ => tracing::warn!(id, severity, "OpenGL (unknown severity): {msg}"),
    }
}

/// Copy `text` and append the NUL terminator the driver expects.
/// Interior NULs are kept; the driver stops reading at the first one.
pub(crate) fn nul_terminated(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len() + 1);
    bytes.extend_from_slice(text.as_bytes());
    bytes.push(b'\0');
    bytes
}

/// Turn a log buffer filled by the driver into a `String`, dropping the terminator
/// and anything after it.
pub(crate) fn log_to_string(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}
