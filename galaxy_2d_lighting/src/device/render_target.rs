/// Render target and texture contracts.

use bitflags::bitflags;
use glam::Vec4;
use winit::dpi::PhysicalSize;
use crate::error::Result;

/// Opaque handle of a device texture (render targets are textures too)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

/// Texture format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    R8G8B8A8_UNORM,
}

impl TextureFormat {
    pub fn bytes_per_pixel(&self) -> u32 {
        4
    }
}

/// Depth/stencil attachment format of a render target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthFormat {
    /// 24-bit depth + 8-bit stencil (required by the shadow techniques)
    Depth24Stencil8,
}

/// Descriptor for creating a render target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTargetDesc {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub depth_format: DepthFormat,
}

impl RenderTargetDesc {
    /// Color + stencil target used by the light map
    pub fn light_map(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            format: TextureFormat::R8G8B8A8_UNORM,
            depth_format: DepthFormat::Depth24Stencil8,
        }
    }
}

/// A created render target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTarget {
    /// Texture view of the target (sampled by blur and composite passes)
    pub texture: TextureId,
    pub width: u32,
    pub height: u32,
}

/// Descriptor for creating a sampled texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDesc {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

impl TextureDesc {
    /// Expected byte length of the initial pixel data
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_pixel() as usize
    }
}

/// Light-map resolution relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LightMapSize {
    /// Same resolution as the viewport
    #[default]
    Full,
    /// Viewport dimensions divided by 4
    Fourth,
    /// Viewport dimensions divided by 8
    Eighth,
}

impl LightMapSize {
    /// Integer divisor applied to both viewport dimensions
    pub fn divisor(&self) -> u32 {
        match self {
            LightMapSize::Full => 1,
            LightMapSize::Fourth => 4,
            LightMapSize::Eighth => 8,
        }
    }

    /// Texel-center correction factor; grows as the map gets coarser
    pub fn bias_factor(&self) -> f32 {
        match self {
            LightMapSize::Full => 0.5,
            LightMapSize::Fourth => 0.6,
            LightMapSize::Eighth => 0.7,
        }
    }

    /// Light-map dimensions for a surface, never smaller than 1×1
    pub fn target_size(&self, surface: PhysicalSize<u32>) -> PhysicalSize<u32> {
        let divisor = self.divisor();
        PhysicalSize::new((surface.width / divisor).max(1), (surface.height / divisor).max(1))
    }
}

bitflags! {
    /// Buffers affected by a clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        const TARGET = 1 << 0;
        const STENCIL = 1 << 1;
    }
}

/// Rasterizer face culling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullMode {
    None,
    /// Cull clockwise-wound faces
    Clockwise,
    /// Cull counter-clockwise-wound faces
    #[default]
    CounterClockwise,
}

/// Viewport of the currently bound target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.width, self.height)
    }
}

/// 2D rectangle in target pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect2D {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Render-target allocation, binding and fixed-function state
pub trait RenderTargetProvider {
    /// Viewport of the currently bound target
    fn viewport(&self) -> Viewport;

    /// Size of the presentation back buffer
    fn back_buffer_size(&self) -> PhysicalSize<u32>;

    /// Allocate a render target
    fn create_render_target(&mut self, desc: &RenderTargetDesc) -> Result<RenderTarget>;

    /// Release a render target
    fn destroy_render_target(&mut self, target: RenderTarget);

    /// Bind `targets` (empty slice = back buffer) and return the previous bindings
    fn bind_render_targets(&mut self, targets: &[RenderTarget]) -> Result<Vec<RenderTarget>>;

    /// Clear the bound target
    fn clear(&mut self, flags: ClearFlags, color: Vec4, depth: f32, stencil: u32) -> Result<()>;

    /// Restrict rasterization to `rect`
    fn set_scissor(&mut self, rect: Rect2D);

    fn set_cull_mode(&mut self, mode: CullMode);

    /// Create a sampled texture with initial pixel data
    fn create_texture(&mut self, desc: &TextureDesc, pixels: &[u8]) -> Result<TextureId>;
}

#[cfg(test)]
#[path = "render_target_tests.rs"]
mod tests;
