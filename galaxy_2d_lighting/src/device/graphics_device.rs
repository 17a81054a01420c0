/// Primitive submission and the combined GraphicsDevice contract.

use winit::dpi::PhysicalSize;
use crate::error::Result;
use super::{EffectDispatcher, PrimitiveTopology, RenderTargetProvider, VertexData};

/// Draw calls sourcing vertices from user memory
pub trait PrimitiveSubmitter {
    /// Draw `primitive_count` primitives from `vertices`
    fn draw_user_primitives(
        &mut self,
        topology: PrimitiveTopology,
        vertices: VertexData<'_>,
        primitive_count: u32,
    ) -> Result<()>;

    /// Draw `primitive_count` primitives from `vertices` addressed through `indices`
    fn draw_user_indexed_primitives(
        &mut self,
        topology: PrimitiveTopology,
        vertices: VertexData<'_>,
        indices: &[u32],
        primitive_count: u32,
    ) -> Result<()>;
}

/// Everything the light-map pipeline needs from the host's GPU
///
/// Blanket-implemented for any type providing the three collaborator roles,
/// and always used as `&mut dyn GraphicsDevice`: the exclusive borrow is what
/// serializes every light's shadow/light/clear passes on the shared target
/// and stencil.
pub trait GraphicsDevice: RenderTargetProvider + PrimitiveSubmitter + EffectDispatcher {}

impl<T> GraphicsDevice for T where T: RenderTargetProvider + PrimitiveSubmitter + EffectDispatcher + ?Sized {}

/// Output surface changes the host must forward to the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    /// The device was lost/reset; GPU resources must be recreated
    Reset,
    /// The back buffer was resized
    Resized(PhysicalSize<u32>),
}
