/// Light-map configuration.

use crate::device::{Color, CullMode, LightMapSize};
use crate::render::CompositeMode;

/// How the view bounds derived from the view transform are used for culling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewCulling {
    /// Lights outside the view bounds are skipped
    #[default]
    Bounds,
    /// Every light is drawn; the view bounds are replaced by `BoundsRect::MAX_EXTENT`
    Disabled,
}

/// Light-map pipeline configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LightMapConfig {
    /// Light-map clear color; lights add on top of it
    pub ambient_color: Color,
    /// Blur strength; 0 disables the blur stage
    pub bluriness: f32,
    /// Light-map resolution relative to the surface
    pub light_map_size: LightMapSize,
    /// Rasterizer culling while drawing lights
    pub cull_mode: CullMode,
    /// Pre-multiply the view transform by the sprite-batch pixel projection
    pub sprite_batch_compatibility: bool,
    /// Blend used by `present`
    pub composite_mode: CompositeMode,
    pub view_culling: ViewCulling,
}

impl Default for LightMapConfig {
    fn default() -> Self {
        Self {
            ambient_color: Color::BLACK,
            bluriness: 0.0,
            light_map_size: LightMapSize::Full,
            cull_mode: CullMode::CounterClockwise,
            sprite_batch_compatibility: false,
            composite_mode: CompositeMode::Multiply,
            view_culling: ViewCulling::Bounds,
        }
    }
}

impl LightMapConfig {
    pub fn with_ambient_color(mut self, color: Color) -> Self {
        self.ambient_color = color;
        self
    }

    /// Negative (and NaN) values become 0
    pub fn with_bluriness(mut self, bluriness: f32) -> Self {
        self.bluriness = sanitize_bluriness(bluriness);
        self
    }

    pub fn with_light_map_size(mut self, size: LightMapSize) -> Self {
        self.light_map_size = size;
        self
    }

    pub fn with_cull_mode(mut self, cull_mode: CullMode) -> Self {
        self.cull_mode = cull_mode;
        self
    }

    pub fn with_sprite_batch_compatibility(mut self, enabled: bool) -> Self {
        self.sprite_batch_compatibility = enabled;
        self
    }

    pub fn with_composite_mode(mut self, mode: CompositeMode) -> Self {
        self.composite_mode = mode;
        self
    }

    pub fn with_view_culling(mut self, culling: ViewCulling) -> Self {
        self.view_culling = culling;
        self
    }
}

pub(crate) fn sanitize_bluriness(bluriness: f32) -> f32 {
    if bluriness.is_nan() { 0.0 } else { bluriness.max(0.0) }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
