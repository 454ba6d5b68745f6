use glam::{Mat4, Vec3};

use super::{context::Context, driver::Driver};

/// Location of a uniform in a linked program.
///
/// Setters apply to the currently bound program and forward their values as-is. Whether
/// the setter matches the type declared in the shader is left to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uniform(i32);

impl Uniform {
    pub fn from_location(location: i32) -> Uniform {
        Uniform(location)
    }

    pub fn location(self) -> i32 {
        self.0
    }

    /// The driver returns -1 for names that aren't active in the program
    pub fn is_found(self) -> bool {
        self.0 >= 0
    }

    pub fn matrix4<D: Driver>(self, ctx: &Context<D>, mat: &Mat4) {
        ctx.driver().uniform_matrix4fv(self.0, 1, &mat.to_cols_array());
    }

    /// Upload a `mat4[]`, one matrix per element of `mats`
    pub fn matrix4_v<D: Driver>(self, ctx: &Context<D>, mats: &[Mat4]) {
        let mats_flat: Vec<f32> = mats.iter().flat_map(|m| m.to_cols_array()).collect();
        ctx.driver().uniform_matrix4fv(self.0, mats.len() as i32, &mats_flat);
    }

    pub fn int<D: Driver>(self, ctx: &Context<D>, v: i32) {
        ctx.driver().uniform_1i(self.0, v);
    }

    pub fn int3<D: Driver>(self, ctx: &Context<D>, x: i32, y: i32, z: i32) {
        ctx.driver().uniform_3i(self.0, x, y, z);
    }

    /// Upload an `int[]`; the element count is the slice length
    pub fn int_v<D: Driver>(self, ctx: &Context<D>, values: &[i32]) {
        ctx.driver().uniform_1iv(self.0, values);
    }

    pub fn float<D: Driver>(self, ctx: &Context<D>, v: f32) {
        ctx.driver().uniform_1f(self.0, v);
    }

    pub fn float3<D: Driver>(self, ctx: &Context<D>, x: f32, y: f32, z: f32) {
        ctx.driver().uniform_3f(self.0, x, y, z);
    }

    pub fn vec3<D: Driver>(self, ctx: &Context<D>, v: Vec3) {
        self.float3(ctx, v.x, v.y, v.z);
    }
}
