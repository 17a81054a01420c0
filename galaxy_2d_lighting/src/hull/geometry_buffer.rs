/// Geometry buffer - per-light accumulator of transformed hull geometry.
///
/// Each light clears the buffer, appends the hulls in its range, then draws
/// everything with a single indexed call per shadow pass. Indices are
/// hull-local indices offset by the vertex count at append time.

use glam::{Mat2, Vec2};
use crate::device::{Color, ShadowHullVertex};
use crate::math::BoundsRect;
use super::ShadowHull;

#[derive(Debug, Clone, Default)]
pub struct GeometryBuffer {
    vertices: Vec<ShadowHullVertex>,
    indices: Vec<u32>,
}

impl GeometryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform `hull` into world space and append it
    pub fn append(&mut self, hull: &ShadowHull) {
        let vertex_matrix = hull.transform();
        // Rotation with inverse scale: normals must not be skewed by a non-uniform scale
        let normal_matrix = Mat2::from_angle(hull.angle) * Mat2::from_diagonal(hull.scale.recip());
        let color = Color::from_f32(0.0, 0.0, 0.0, 1.0 - hull.opacity());

        let base = self.vertices.len() as u32;

        self.vertices.extend(hull.points().iter().map(|point| {
            ShadowHullVertex::new(
                vertex_matrix.transform_point2(point.position),
                normal_matrix * point.normal,
                color,
            )
        }));
        self.indices.extend(hull.indices().iter().map(|index| base + index));
    }

    /// Append a two-triangle quad covering `bounds` (debug outlines)
    pub fn append_bounds_outline(&mut self, bounds: &BoundsRect) {
        let base = self.vertices.len() as u32;

        let corners = [
            Vec2::new(bounds.left(), bounds.top()),
            Vec2::new(bounds.right(), bounds.top()),
            Vec2::new(bounds.right(), bounds.bottom()),
            Vec2::new(bounds.left(), bounds.bottom()),
        ];
        self.vertices.extend(
            corners.iter().map(|c| ShadowHullVertex::new(*c, Vec2::ZERO, Color::BLACK)),
        );
        self.indices.extend([0, 1, 2, 0, 2, 3].iter().map(|i| base + i));
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn vertices(&self) -> &[ShadowHullVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
#[path = "geometry_buffer_tests.rs"]
mod tests;
