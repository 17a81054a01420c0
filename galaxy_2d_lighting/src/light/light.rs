/// Light trait - the contract between the pipeline and a light source.

use std::any::Any;
use glam::{Vec2, Vec3};
use crate::error::Result;
use crate::hull::ShadowHull;
use crate::math::BoundsRect;
use crate::render::RenderHelper;

/// A light source drawn into the light map
///
/// `draw` runs with the light-map target bound, the stencil cleared and the
/// scissor restricted to `bounds()`. It receives every hull in the scene and
/// is expected to skip the ones out of its reach.
pub trait Light: Any {
    /// World-space area the light can reach
    fn bounds(&self) -> BoundsRect;

    /// Issue this light's shadow, emission and alpha-clear passes
    fn draw(&self, helper: &mut RenderHelper<'_>, hulls: &[&ShadowHull]) -> Result<()>;

    /// Light color reaching `point`, each channel in [0, 1]
    ///
    /// CPU evaluation of what `draw` writes at `point` (before blur).
    fn sample(&self, point: Vec2, hulls: &[&ShadowHull]) -> Vec3;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// `|offset| < distance`, without the square root
pub fn is_in_range(offset: Vec2, distance: f32) -> bool {
    offset.length_squared() < distance * distance
}
