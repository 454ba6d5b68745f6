use std::{
    thread,
    time::{Duration, Instant},
};

use eyre::Result;
use glam::{Mat4, Vec3};
use tracing_subscriber::EnvFilter;
use voxgl::{ogl, Context, Program, Uniform};

use config::Config;
use mesh::VoxelMesh;
use window::MyWindow;

mod config;
mod mesh;
mod window;

/// Block colors as packed 0xRRGGBB, indexed by block id
const PALETTE: [i32; 4] = [0x6b8e23, 0x8b5a2b, 0x808080, 0xf0f0f0];

/// Offsets of the drawn columns, in blocks
const CHUNKS: [[i32; 3]; 4] = [[0, 0, 0], [2, 0, 0], [0, 0, 2], [2, 0, 2]];

/// Uniform locations of the voxel program
struct VoxelUniforms {
    view_proj: Uniform,
    chunk_offset: Uniform,
    light_dir: Uniform,
    time: Uniform,
    palette: Uniform,
    highlight: Uniform,
}

impl VoxelUniforms {
    fn locate(ctx: &Context, program: Program) -> Self {
        let uniforms = Self {
            view_proj: program.uniform_location(ctx, "u_view_proj"),
            chunk_offset: program.uniform_location(ctx, "u_chunk_offset"),
            light_dir: program.uniform_location(ctx, "u_light_dir"),
            time: program.uniform_location(ctx, "u_time"),
            palette: program.uniform_location(ctx, "u_palette"),
            highlight: program.uniform_location(ctx, "u_highlight"),
        };

        if !uniforms.view_proj.is_found() {
            tracing::warn!("u_view_proj is not active in the voxel program");
        }

        uniforms
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    tracing::info!(?config, "starting");

    let mut window = MyWindow::new(&config)?;
    let mut ctx = window.gl_context();
    if !ogl::init_debug(&ctx) {
        tracing::info!("running without OpenGL debug output");
    }

    let program = Program::from_files(&ctx, &config.vertex_shader, &config.fragment_shader)?;
    let uniforms = VoxelUniforms::locate(&ctx, program);

    let position = program.attribute_location(&ctx, "a_position");
    let block = program.attribute_location(&ctx, "a_block");
    let mesh = VoxelMesh::new(&ctx, &mesh::voxel_column(&[0, 1, 2, 3]), position, block)?;

    // Constant for the program's lifetime
    program.use_program(&mut ctx);
    uniforms.palette.int_v(&ctx, &PALETTE);
    uniforms
        .light_dir
        .vec3(&ctx, Vec3::new(-0.4, 1.0, 0.3).normalize());

    let start = Instant::now();

    'render_loop: loop {
        let t = start.elapsed().as_secs_f32();
        let (width, height) = window.viewport_size()?;

        unsafe {
            gl::Viewport(0, 0, width, height);
            gl::Enable(gl::DEPTH_TEST);
            gl::ClearColor(0.1, 0.1, 0.1, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }

        // Already bound, so the driver isn't called again
        program.use_program(&mut ctx);

        let eye = Vec3::new(8. * t.cos(), 6., 8. * t.sin());
        let view = Mat4::look_at_rh(eye, Vec3::new(1.5, 2., 1.5), Vec3::Y);
        let proj = Mat4::perspective_rh(
            f32::to_radians(60.),
            width as f32 / height.max(1) as f32,
            0.1,
            100.,
        );

        uniforms.view_proj.matrix4(&ctx, &(proj * view));
        uniforms.time.float(&ctx, t);
        uniforms.highlight.int(&ctx, (t as i32).rem_euclid(4));

        for [x, y, z] in CHUNKS {
            uniforms.chunk_offset.int3(&ctx, x, y, z);
            mesh.draw();
        }

        if window.end_frame() {
            break 'render_loop;
        }

        if !config.vsync {
            thread::sleep(Duration::from_millis(10));
        }
    }

    Ok(())
}
