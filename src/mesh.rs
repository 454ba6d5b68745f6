use std::mem::{size_of, size_of_val};

use eyre::{Result, WrapErr};
use glam::Vec3;
use voxgl::{Attribute, Context, Type};

/// Interleaved vertex: position followed by the block id, padded to 16 bytes
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub block: u8,
    _pad: [u8; 3],
}

impl Vertex {
    pub fn new(pos: Vec3, block: u8) -> Self {
        Self {
            pos: pos.to_array(),
            block,
            _pad: [0; 3],
        }
    }

    const STRIDE: i32 = size_of::<Vertex>() as i32;
    const BLOCK_OFFSET: usize = size_of::<[f32; 3]>();
}

/// Corners of the unit cube, indexed by the bits (x, y, z)
fn corner(i: usize) -> Vec3 {
    Vec3::new((i & 1) as f32, ((i >> 1) & 1) as f32, ((i >> 2) & 1) as f32)
}

/// Two counter-clockwise triangles per face
const FACES: [[usize; 6]; 6] = [
    [0, 2, 3, 0, 3, 1], // -z
    [4, 5, 7, 4, 7, 6], // +z
    [0, 4, 6, 0, 6, 2], // -x
    [1, 3, 7, 1, 7, 5], // +x
    [0, 1, 5, 0, 5, 4], // -y
    [2, 6, 7, 2, 7, 3], // +y
];

/// A column of unit voxels stacked along +y, one per entry of `blocks`
pub fn voxel_column(blocks: &[u8]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(blocks.len() * 36);

    for (y, &block) in blocks.iter().enumerate() {
        let base = Vec3::new(0., y as f32, 0.);
        for face in FACES {
            vertices.extend(face.iter().map(|&c| Vertex::new(base + corner(c), block)));
        }
    }

    vertices
}

/// `glDrawArrays` takes a signed vertex count
fn draw_count(len: usize) -> Result<i32> {
    i32::try_from(len).wrap_err_with(|| format!("{len} vertices don't fit in one draw call"))
}

/// A vertex array holding one voxel column
pub struct VoxelMesh {
    vao: u32,
    _vbo: u32,
    vertex_count: i32,
}

impl VoxelMesh {
    pub fn new(
        ctx: &Context,
        vertices: &[Vertex],
        position: Attribute,
        block: Attribute,
    ) -> Result<Self> {
        let vertex_count = draw_count(vertices.len())?;
        let byte_len = isize::try_from(size_of_val(vertices))
            .wrap_err("voxel mesh is too large for a single buffer")?;

        let mut vao = 0;
        let mut vbo = 0;

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);

            gl::GenBuffers(1, &mut vbo);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                byte_len,
                vertices.as_ptr() as _,
                gl::STATIC_DRAW,
            );
        }

        position.pointer(ctx, 3, Type::Float, false, Vertex::STRIDE, 0);
        position.enable(ctx);
        block.pointer_int(ctx, 1, Type::UnsignedByte, Vertex::STRIDE, Vertex::BLOCK_OFFSET);
        block.enable(ctx);

        unsafe {
            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        Ok(Self {
            vao,
            _vbo: vbo,
            vertex_count,
        })
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawArrays(gl::TRIANGLES, 0, self.vertex_count);
            gl::BindVertexArray(0);
        }
    }
}
