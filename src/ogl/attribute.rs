use super::{context::Context, driver::Driver};

/// Component type of a vertex attribute in the bound buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    HalfFloat,
    Float,
}

/// Location of a vertex input in a linked program.
/// The location is converted to the driver's unsigned index without checking for -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attribute(i32);

impl Attribute {
    pub fn from_location(location: i32) -> Attribute {
        Attribute(location)
    }

    pub fn location(self) -> i32 {
        self.0
    }

    pub fn is_found(self) -> bool {
        self.0 >= 0
    }

    fn index(self) -> u32 {
        self.0 as u32
    }

    pub fn enable<D: Driver>(self, ctx: &Context<D>) {
        ctx.driver().enable_vertex_attrib_array(self.index());
    }

    pub fn disable<D: Driver>(self, ctx: &Context<D>) {
        ctx.driver().disable_vertex_attrib_array(self.index());
    }

    /// Describe this input as `size` components of `ty`, read as floats.
    /// `stride` and `offset` are in bytes.
    pub fn pointer<D: Driver>(
        self,
        ctx: &Context<D>,
        size: i32,
        ty: Type,
        normalized: bool,
        stride: i32,
        offset: usize,
    ) {
        ctx.driver()
            .vertex_attrib_pointer(self.index(), size, ty, normalized, stride, offset);
    }

    /// Like `pointer`, but the shader receives integers
    pub fn pointer_int<D: Driver>(
        self,
        ctx: &Context<D>,
        size: i32,
        ty: Type,
        stride: i32,
        offset: usize,
    ) {
        ctx.driver()
            .vertex_attrib_i_pointer(self.index(), size, ty, stride, offset);
    }
}
