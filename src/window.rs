use eyre::{eyre, Result, WrapErr};
use sdl2::{
    event::Event,
    video::{GLContext, GLProfile, SwapInterval, Window},
    EventPump, Sdl, VideoSubsystem,
};
use voxgl::Context;

use crate::config::Config;

pub struct MyWindow {
    _sdl_context: Sdl,
    video_subsystem: VideoSubsystem,
    window: Window,
    _gl_ctx: GLContext,
    pub event_pump: EventPump,
}

impl MyWindow {
    pub fn new(config: &Config) -> Result<Self> {
        let sdl_context = sdl2::init().map_err(|e| eyre!("{e}"))?;
        let video_subsystem = sdl_context.video().map_err(|e| eyre!("{e}"))?;

        // Attributes have to be set before the context is created
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_major_version(4);
        gl_attr.set_context_minor_version(1);
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_flags().debug().set();
        gl_attr.set_double_buffer(true);
        gl_attr.set_depth_size(24);

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .resizable()
            .position_centered()
            .allow_highdpi()
            .build()?;

        let gl_ctx = window.gl_create_context().map_err(|e| eyre!("{e}"))?;

        let interval = if config.vsync {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        video_subsystem
            .gl_set_swap_interval(interval)
            .map_err(|e| eyre!("{e}"))?;

        let event_pump = sdl_context.event_pump().map_err(|e| eyre!("{e}"))?;

        Ok(Self {
            _sdl_context: sdl_context,
            video_subsystem,
            window,
            _gl_ctx: gl_ctx,
            event_pump,
        })
    }

    /// Load the OpenGL functions for this window's context
    pub fn gl_context(&self) -> Context {
        let video = &self.video_subsystem;
        Context::load_with(|name| video.gl_get_proc_address(name) as _)
    }

    /// Drawable size in pixels, in the signed form `glViewport` takes
    pub fn viewport_size(&self) -> Result<(i32, i32)> {
        viewport_size(self.window.drawable_size())
    }

    /// Presents the frame and returns if the render loop should terminate
    pub fn end_frame(&mut self) -> bool {
        self.window.gl_swap_window();

        for event in self.event_pump.poll_iter() {
            if let Event::Quit { .. } = event {
                return true;
            }
        }

        false
    }
}

fn viewport_size((width, height): (u32, u32)) -> Result<(i32, i32)> {
    let width =
        i32::try_from(width).wrap_err_with(|| format!("drawable width {width} is too large"))?;
    let height =
        i32::try_from(height).wrap_err_with(|| format!("drawable height {height} is too large"))?;
    Ok((width, height))
}
