//! Device module - contracts between the light-map pipeline and the host's GPU.
//!
//! The pipeline never talks to a graphics API directly. It drives a
//! `GraphicsDevice` trait object, which combines three collaborator roles:
//!
//! - **RenderTargetProvider**: off-screen targets, bindings, clears, scissor, rasterizer
//! - **PrimitiveSubmitter**: user-memory (non-buffered) draw calls
//! - **EffectDispatcher**: named techniques, passes and parameters
//!
//! Backends implement the three traits; `GraphicsDevice` is blanket-implemented.

mod color;
mod effect;
mod graphics_device;
mod render_target;
mod vertex;

#[cfg(test)]
pub(crate) mod mock_graphics_device;

pub use color::Color;
pub use effect::{EffectDispatcher, EffectValue, Technique, params};
pub use graphics_device::{DeviceEvent, GraphicsDevice, PrimitiveSubmitter};
pub use render_target::{
    ClearFlags, CullMode, DepthFormat, LightMapSize, Rect2D, RenderTarget, RenderTargetDesc,
    RenderTargetProvider, TextureDesc, TextureFormat, TextureId, Viewport,
};
pub use vertex::{
    BufferFormat, LightVertex, PrimitiveTopology, ShadowHullVertex, TexturedVertex,
    VertexAttribute, VertexData, VertexLayout,
};
