/// Render helper - the per-frame draw context handed to every light.
///
/// Bundles the exclusive device borrow with the shared geometry buffer, and
/// wraps the draw sequences the pipeline and lights share: hull buffering,
/// cone and quad submission, technique pass loops, blur and composite quads.

use glam::Vec2;
use crate::device::{
    params, Color, EffectValue, GraphicsDevice, LightMapSize, PrimitiveTopology, Technique,
    TextureId, TexturedVertex, VertexData,
};
use crate::error::Result;
use crate::hull::{GeometryBuffer, ShadowHull};
use crate::math::BoundsRect;
use super::blur::BlurDirection;
use super::fov_mesh::{build_clipped_fov, build_square_quad, FovMesh};

/// Blend used when compositing the light map onto the bound target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompositeMode {
    /// Scene color is multiplied by the light map
    #[default]
    Multiply,
    /// Light map is added to the scene color
    Add,
    /// Light map replaces the target contents
    Copy,
}

impl CompositeMode {
    pub fn technique(&self) -> Technique {
        match self {
            CompositeMode::Multiply => Technique::CompositeMultiplicative,
            CompositeMode::Add => Technique::CompositeAdditive,
            CompositeMode::Copy => Technique::ScreenCopy,
        }
    }
}

pub struct RenderHelper<'a> {
    device: &'a mut dyn GraphicsDevice,
    buffer: &'a mut GeometryBuffer,
    draw_calls: u32,
}

impl<'a> RenderHelper<'a> {
    pub fn new(device: &'a mut dyn GraphicsDevice, buffer: &'a mut GeometryBuffer) -> Self {
        Self { device, buffer, draw_calls: 0 }
    }

    /// Direct access to the device (bindings, clears, scissor)
    pub fn device(&mut self) -> &mut dyn GraphicsDevice {
        &mut *self.device
    }

    pub fn buffer(&self) -> &GeometryBuffer {
        &*self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut GeometryBuffer {
        &mut *self.buffer
    }

    /// Number of draw calls submitted through this helper
    pub fn draw_calls(&self) -> u32 {
        self.draw_calls
    }

    // ===== GEOMETRY BUFFER =====

    pub fn buffer_clear(&mut self) {
        self.buffer.clear();
    }

    pub fn buffer_add_shadow_hull(&mut self, hull: &ShadowHull) {
        self.buffer.append(hull);
    }

    pub fn buffer_add_bounds_outline(&mut self, bounds: &BoundsRect) {
        self.buffer.append_bounds_outline(bounds);
    }

    /// Draw the buffered geometry as one indexed triangle list
    ///
    /// Does nothing while the buffer holds less than one triangle.
    pub fn buffer_draw(&mut self) -> Result<()> {
        if self.buffer.indices().len() < 3 {
            return Ok(());
        }
        self.device.draw_user_indexed_primitives(
            PrimitiveTopology::TriangleList,
            VertexData::Shadow(self.buffer.vertices()),
            self.buffer.indices(),
            self.buffer.triangle_count() as u32,
        )?;
        self.draw_calls += 1;
        Ok(())
    }

    // ===== EFFECT =====

    pub fn set_parameter(&mut self, name: &str, value: EffectValue) -> Result<()> {
        self.device.set_parameter(name, value)
    }

    /// Select `technique`, then apply each of its passes followed by `draw`
    pub fn for_each_pass<F>(&mut self, technique: Technique, mut draw: F) -> Result<()>
    where
        F: FnMut(&mut Self) -> Result<()>,
    {
        self.device.set_technique(technique)?;
        for pass in 0..self.device.pass_count() {
            self.device.apply_pass(pass)?;
            draw(self)?;
        }
        Ok(())
    }

    // ===== PRIMITIVES =====

    /// Draw the light cone clipped to `fov` (see `fov_mesh`)
    pub fn draw_clipped_fov(
        &mut self,
        position: Vec2,
        rotation: f32,
        size: f32,
        color: Color,
        fov: f32,
    ) -> Result<()> {
        let mesh = build_clipped_fov(position, rotation, size, color, fov);
        let primitive_count = mesh.triangle_count();

        match &mesh {
            FovMesh::Empty => return Ok(()),
            FovMesh::Quad(vertices) => {
                self.device.draw_user_primitives(
                    PrimitiveTopology::TriangleStrip,
                    VertexData::Light(vertices),
                    primitive_count,
                )?;
            }
            FovMesh::Fan { vertices, indices } => {
                self.device.draw_user_indexed_primitives(
                    PrimitiveTopology::TriangleList,
                    VertexData::Light(vertices),
                    indices,
                    primitive_count,
                )?;
            }
        }
        self.draw_calls += 1;
        Ok(())
    }

    /// Draw a rotated square, `size` wide, centered on `position`
    pub fn draw_square_quad(&mut self, position: Vec2, rotation: f32, size: f32, color: Color) -> Result<()> {
        let vertices = build_square_quad(position, rotation, size, color);
        self.device.draw_user_primitives(PrimitiveTopology::TriangleStrip, VertexData::Light(&vertices), 2)?;
        self.draw_calls += 1;
        Ok(())
    }

    /// Draw the NDC unit quad with the current pass
    pub fn draw_unit_quad(&mut self) -> Result<()> {
        self.device.draw_user_primitives(
            PrimitiveTopology::TriangleStrip,
            VertexData::Textured(&TexturedVertex::UNIT_QUAD),
            2,
        )?;
        self.draw_calls += 1;
        Ok(())
    }

    /// Copy `Texture0` over the whole bound target
    pub fn draw_fullscreen_quad(&mut self) -> Result<()> {
        let viewport = self.device.viewport();
        let texel_bias = texel_bias(0.5, viewport.width, viewport.height);

        self.device.set_parameter(params::TEXEL_BIAS, EffectValue::Vec2(texel_bias))?;
        self.for_each_pass(Technique::ScreenCopy, |helper| helper.draw_unit_quad())
    }

    /// Composite `texture` onto the bound target
    pub fn draw_texture_to_target(
        &mut self,
        texture: TextureId,
        map_size: LightMapSize,
        mode: CompositeMode,
    ) -> Result<()> {
        let viewport = self.device.viewport();
        let texel_bias = texel_bias(map_size.bias_factor(), viewport.width, viewport.height);

        self.device.set_parameter(params::TEXTURE0, EffectValue::Texture(Some(texture)))?;
        self.device.set_parameter(params::TEXEL_BIAS, EffectValue::Vec2(texel_bias))?;
        self.for_each_pass(mode.technique(), |helper| helper.draw_unit_quad())
    }

    /// One separable blur pass reading `texture` into the bound target
    pub fn blur_texture_to_target(
        &mut self,
        texture: TextureId,
        map_size: LightMapSize,
        direction: BlurDirection,
        bluriness: f32,
    ) -> Result<()> {
        let back_buffer = self.device.back_buffer_size();

        match direction {
            BlurDirection::Horizontal => {
                let factor = if back_buffer.width > 0 { 1.0 / back_buffer.width as f32 } else { 0.0 };
                self.device.set_parameter(params::BLUR_FACTOR_U, EffectValue::Float(factor))?;
            }
            BlurDirection::Vertical => {
                let factor = if back_buffer.height > 0 { 1.0 / back_buffer.height as f32 } else { 0.0 };
                self.device.set_parameter(params::BLUR_FACTOR_V, EffectValue::Float(factor))?;
            }
        }

        let bias = texel_bias(0.5 * map_size.bias_factor(), back_buffer.width, back_buffer.height);

        self.device.set_parameter(params::TEXTURE0, EffectValue::Texture(Some(texture)))?;
        self.device.set_parameter(params::TEXEL_BIAS, EffectValue::Vec2(bias))?;
        self.device.set_parameter(params::BLURINESS, EffectValue::Float(bluriness))?;
        self.device.set_technique(direction.technique())?;
        // Blur techniques are single-pass
        self.device.apply_pass(0)?;
        self.draw_unit_quad()
    }
}

/// `factor` texels expressed in normalized coordinates (zero-sized axes give 0)
fn texel_bias(factor: f32, width: u32, height: u32) -> Vec2 {
    let axis = |size: u32| if size > 0 { factor / size as f32 } else { 0.0 };
    Vec2::new(axis(width), axis(height))
}

#[cfg(test)]
#[path = "render_helper_tests.rs"]
mod tests;
