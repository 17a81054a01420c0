/// Two-pass separable blur of the light map.
///
/// The horizontal pass reads the primary target into the scratch target,
/// the vertical pass reads scratch back into primary. Callers skip the stage
/// entirely when the configured bluriness is zero.

use crate::device::{LightMapSize, RenderTarget, Technique};
use crate::error::Result;
use crate::engine_trace;
use super::RenderHelper;

/// Blur pass direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlurDirection {
    Horizontal,
    Vertical,
}

impl BlurDirection {
    pub fn technique(&self) -> Technique {
        match self {
            BlurDirection::Horizontal => Technique::BlurHorizontal,
            BlurDirection::Vertical => Technique::BlurVertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurStage {
    /// Blur strength handed to the shader
    pub bluriness: f32,
    /// Selects the texel bias
    pub map_size: LightMapSize,
}

impl BlurStage {
    pub fn new(bluriness: f32, map_size: LightMapSize) -> Self {
        Self { bluriness, map_size }
    }

    /// Blur `primary` in place, using `scratch` as the intermediate target
    ///
    /// Leaves `primary` bound.
    pub fn run(&self, helper: &mut RenderHelper<'_>, primary: RenderTarget, scratch: RenderTarget) -> Result<()> {
        engine_trace!("galaxy2d::BlurStage", "Blurring {}x{} light map (bluriness {})",
            primary.width, primary.height, self.bluriness);

        helper.device().bind_render_targets(&[scratch])?;
        helper.blur_texture_to_target(primary.texture, self.map_size, BlurDirection::Horizontal, self.bluriness)?;

        helper.device().bind_render_targets(&[primary])?;
        helper.blur_texture_to_target(scratch.texture, self.map_size, BlurDirection::Vertical, self.bluriness)?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "blur_tests.rs"]
mod tests;
