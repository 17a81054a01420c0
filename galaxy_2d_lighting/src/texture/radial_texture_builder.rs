/// Radial falloff texture generation.
///
/// Light textures are square, gray and opaque. Texel `(x, y)` at distance
/// `d` from the center `c = size / 2` holds `(c - d) / c` when it lies
/// within the radius, beyond the near plane and inside the field of view
/// (measured from +X), and 0 otherwise.

use std::f32::consts::TAU;
use glam::Vec2;
use crate::device::{Color, GraphicsDevice, TextureDesc, TextureFormat, TextureId};
use crate::error::{Error, Result};
use crate::engine_debug;

/// CPU-side light texture, row-major (`x + y * size`)
#[derive(Debug, Clone, PartialEq)]
pub struct LightTexture {
    size: u32,
    pixels: Vec<Color>,
}

impl LightTexture {
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Texel at `(x, y)`, `None` outside the texture
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.pixels.get(x as usize + y as usize * self.size as usize).copied()
    }

    /// RGBA8 bytes, ready for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn desc(&self) -> TextureDesc {
        TextureDesc {
            width: self.size,
            height: self.size,
            format: TextureFormat::R8G8B8A8_UNORM,
        }
    }

    /// Create the device texture
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` for a zero-sized texture, or any device error.
    pub fn upload(&self, device: &mut dyn GraphicsDevice) -> Result<TextureId> {
        if self.size == 0 {
            return Err(Error::InvalidResource("light texture has zero size".to_string()));
        }
        let id = device.create_texture(&self.desc(), self.as_bytes())?;
        engine_debug!("galaxy2d::RadialTextureBuilder", "Uploaded {}x{} light texture", self.size, self.size);
        Ok(id)
    }
}

pub struct RadialTextureBuilder;

impl RadialTextureBuilder {
    /// Omnidirectional falloff
    pub fn point_light(size: u32) -> LightTexture {
        Self::conic_light_with_near_plane(size, TAU, 0.0)
    }

    /// Falloff limited to `fov` radians, centered on +X
    pub fn conic_light(size: u32, fov: f32) -> LightTexture {
        Self::conic_light_with_near_plane(size, fov, 0.0)
    }

    /// Conic falloff, blank closer than `near_plane` texels to the center
    pub fn conic_light_with_near_plane(size: u32, fov: f32, near_plane: f32) -> LightTexture {
        let center = size as f32 / 2.0;
        let half_fov = fov / 2.0;

        let pixels = (0..size)
            .flat_map(|y| (0..size).map(move |x| (x, y)))
            .map(|(x, y)| {
                let difference = Vec2::new(x as f32, y as f32) - Vec2::splat(center);
                let distance = difference.length();
                let angle = difference.y.atan2(difference.x);

                let value = if distance <= center && distance >= near_plane && angle.abs() <= half_fov {
                    (center - distance) / center
                } else {
                    0.0
                };
                Color::from_f32(value, value, value, 1.0)
            })
            .collect();

        LightTexture { size, pixels }
    }
}

#[cfg(test)]
#[path = "radial_texture_builder_tests.rs"]
mod tests;
