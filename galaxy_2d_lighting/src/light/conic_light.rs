/// Conic light - a point light whose emission is limited to a field of view.
///
/// A field of view of 2π makes it an omnidirectional point light. Emission
/// is drawn as a square (or a clipped fan of it) `range * 2` wide, textured
/// with the falloff texture, after the shadow pass has masked out the
/// regions behind the hulls in reach.

use std::any::Any;
use std::f32::consts::TAU;
use glam::{Vec2, Vec3};
use crate::device::{params, Color, EffectValue, Technique, TextureId};
use crate::error::Result;
use crate::hull::ShadowHull;
use crate::math::BoundsRect;
use crate::render::RenderHelper;
use super::{is_in_range, Light, ShadowType};

pub const MIN_INTENSITY: f32 = 0.01;
pub const MAX_INTENSITY: f32 = 3.0;

#[derive(Debug, Clone)]
pub struct ConicLight {
    pub position: Vec2,
    /// Facing direction in radians
    pub angle: f32,
    /// Reach in world units
    pub range: f32,
    pub color: Color,
    pub shadow_type: ShadowType,
    pub is_on: bool,
    /// Falloff texture sampled by the emission pass
    pub texture: Option<TextureId>,
    fov: f32,
    intensity: f32,
}

impl Default for ConicLight {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            angle: 0.0,
            range: 1.0,
            color: Color::WHITE,
            shadow_type: ShadowType::Solid,
            is_on: true,
            texture: None,
            fov: TAU,
            intensity: 1.0,
        }
    }
}

impl ConicLight {
    /// Omnidirectional white light
    pub fn new(position: Vec2, range: f32) -> Self {
        Self { position, range, ..Self::default() }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_fov(mut self, fov: f32) -> Self {
        self.set_fov(fov);
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.set_intensity(intensity);
        self
    }

    pub fn with_shadow_type(mut self, shadow_type: ShadowType) -> Self {
        self.shadow_type = shadow_type;
        self
    }

    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Clamped to [0, 2π]; NaN is treated as 0
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = if fov.is_nan() { 0.0 } else { fov.clamp(0.0, TAU) };
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Clamped to [0.01, 3]
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = if intensity.is_nan() {
            MIN_INTENSITY
        } else {
            intensity.clamp(MIN_INTENSITY, MAX_INTENSITY)
        };
    }

    /// Falloff exponent handed to the shader: 1 / intensity²
    pub fn intensity_factor(&self) -> f32 {
        1.0 / (self.intensity * self.intensity)
    }

    /// Hull is visible and its bounding circle reaches the light's range
    pub fn reaches(&self, hull: &ShadowHull) -> bool {
        hull.visible && is_in_range(hull.position - self.position, hull.world_radius() + self.range)
    }

    /// `offset` (from the light) lies within the field of view
    fn in_fov(&self, offset: Vec2) -> bool {
        // A closed cone emits nothing
        if self.fov <= 0.0 {
            return false;
        }
        if self.fov >= TAU || offset == Vec2::ZERO {
            return true;
        }
        let relative = Vec2::from_angle(-self.angle).rotate(offset);
        relative.y.atan2(relative.x).abs() <= self.fov / 2.0
    }
}

impl Light for ConicLight {
    fn bounds(&self) -> BoundsRect {
        BoundsRect::from_center(self.position, Vec2::splat(self.range))
    }

    fn draw(&self, helper: &mut RenderHelper<'_>, hulls: &[&ShadowHull]) -> Result<()> {
        if !self.is_on {
            return Ok(());
        }

        helper.buffer_clear();
        for hull in hulls.iter().filter(|hull| self.reaches(hull)) {
            helper.buffer_add_shadow_hull(hull);
        }

        helper.set_parameter(params::LIGHT_POSITION, EffectValue::Vec2(self.position))?;
        helper.set_parameter(params::TEXTURE0, EffectValue::Texture(self.texture))?;
        helper.set_parameter(params::LIGHT_INTENSITY_FACTOR, EffectValue::Float(self.intensity_factor()))?;

        // Shadows first: they mask the stencil the emission pass tests against
        helper.for_each_pass(self.shadow_type.technique(), |h| h.buffer_draw())?;

        helper.for_each_pass(Technique::LightEmission, |h| {
            h.draw_clipped_fov(self.position, self.angle, self.range * 2.0, self.color, self.fov)
        })?;

        helper.for_each_pass(Technique::AlphaClear, |h| h.draw_unit_quad())
    }

    fn sample(&self, point: Vec2, hulls: &[&ShadowHull]) -> Vec3 {
        if !self.is_on || self.range <= 0.0 {
            return Vec3::ZERO;
        }

        let offset = point - self.position;
        let distance = offset.length();
        if distance >= self.range || !self.in_fov(offset) {
            return Vec3::ZERO;
        }

        let mut transmission = 1.0;
        for hull in hulls.iter().filter(|hull| self.reaches(hull)) {
            // A hull around the light casts nothing
            if hull.contains_point(self.position) {
                continue;
            }
            if hull.contains_point(point) {
                match self.shadow_type {
                    ShadowType::Solid => transmission *= 1.0 - hull.opacity(),
                    ShadowType::Illuminated => {}
                    ShadowType::Occluded => return Vec3::ZERO,
                }
            } else if hull.intersects_segment(self.position, point) {
                transmission *= 1.0 - hull.opacity();
            }
        }

        let falloff = (1.0 - distance / self.range).powf(self.intensity_factor());
        self.color.to_vec3() * falloff * transmission
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "conic_light_tests.rs"]
mod tests;
