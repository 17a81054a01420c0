/// Shadow hull - occluder geometry that blocks light.
///
/// A hull is a closed outline in local space. Each outline edge is stored as
/// two points carrying that edge's outward normal, so the shadow technique
/// can tell front- from back-facing edges per vertex. The interior is given
/// as a triangle list (usually a fan).
///
/// The transform fields are public and meant to be mutated between frames.
/// The geometry is only replaced through `set_geometry()`, which keeps the
/// cached `max_radius` in sync.

use std::f32::consts::TAU;
use glam::{Affine2, Vec2};
use crate::error::{Error, Result};
use crate::math::{point_in_triangle, segment_intersects_triangle};

/// One outline vertex in hull-local space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShadowHullPoint {
    pub position: Vec2,
    /// Outward normal of the edge this point belongs to
    pub normal: Vec2,
}

impl ShadowHullPoint {
    pub fn new(position: Vec2, normal: Vec2) -> Self {
        Self { position, normal }
    }
}

#[derive(Debug, Clone)]
pub struct ShadowHull {
    /// World position
    pub position: Vec2,
    /// Rotation in radians
    pub angle: f32,
    /// Non-uniform scale
    pub scale: Vec2,
    /// 0 = light passes through, 1 = fully opaque
    opacity: f32,
    /// Invisible hulls cast no shadow
    pub visible: bool,

    points: Vec<ShadowHullPoint>,
    indices: Vec<u32>,
    max_radius: f32,
}

impl ShadowHull {
    /// Build a hull from explicit points and triangle indices
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if the index count is not a multiple of 3
    /// or an index does not address a point.
    pub fn new(points: Vec<ShadowHullPoint>, indices: Vec<u32>) -> Result<Self> {
        let mut hull = Self {
            position: Vec2::ZERO,
            angle: 0.0,
            scale: Vec2::ONE,
            opacity: 1.0,
            visible: true,
            points: Vec::new(),
            indices: Vec::new(),
            max_radius: 0.0,
        };
        hull.set_geometry(points, indices)?;
        Ok(hull)
    }

    /// Axis-aligned rectangle of `size`, centered on the local origin
    pub fn rectangle(size: Vec2) -> Self {
        let half = size * 0.5;
        let top_right = Vec2::new(half.x, half.y);
        let bottom_right = Vec2::new(half.x, -half.y);
        let bottom_left = Vec2::new(-half.x, -half.y);
        let top_left = Vec2::new(-half.x, half.y);

        let points = vec![
            // Right
            ShadowHullPoint::new(top_right, Vec2::X),
            ShadowHullPoint::new(bottom_right, Vec2::X),
            // Bottom
            ShadowHullPoint::new(bottom_right, Vec2::NEG_Y),
            ShadowHullPoint::new(bottom_left, Vec2::NEG_Y),
            // Left
            ShadowHullPoint::new(bottom_left, Vec2::NEG_X),
            ShadowHullPoint::new(top_left, Vec2::NEG_X),
            // Top
            ShadowHullPoint::new(top_left, Vec2::Y),
            ShadowHullPoint::new(top_right, Vec2::Y),
        ];
        Self::from_fan(points)
    }

    /// Regular polygon approximating a circle
    ///
    /// `sides` is raised to at least 3.
    pub fn circle(radius: f32, sides: u32) -> Self {
        let sides = sides.max(3);
        let corners: Vec<Vec2> = (0..sides)
            .map(|i| Vec2::from_angle(i as f32 * TAU / sides as f32) * radius)
            .collect();
        Self::from_fan(edge_points(&corners))
    }

    /// Convex polygon from a counter-clockwise outline
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` for fewer than 3 corners.
    pub fn convex(outline: &[Vec2]) -> Result<Self> {
        if outline.len() < 3 {
            return Err(Error::InvalidResource(format!(
                "convex hull needs at least 3 corners, got {}", outline.len()
            )));
        }
        Ok(Self::from_fan(edge_points(outline)))
    }

    /// Fan from point 0 over consecutive outline points
    fn from_fan(points: Vec<ShadowHullPoint>) -> Self {
        let triangle_count = points.len().saturating_sub(2) as u32;
        let indices = (0..triangle_count).flat_map(|i| [0, i + 1, i + 2]).collect();
        let max_radius = compute_max_radius(&points);
        Self {
            position: Vec2::ZERO,
            angle: 0.0,
            scale: Vec2::ONE,
            opacity: 1.0,
            visible: true,
            points,
            indices,
            max_radius,
        }
    }

    /// Replace the geometry and recompute `max_radius`
    pub fn set_geometry(&mut self, points: Vec<ShadowHullPoint>, indices: Vec<u32>) -> Result<()> {
        if indices.len() % 3 != 0 {
            return Err(Error::InvalidResource(format!(
                "hull index count {} is not a multiple of 3", indices.len()
            )));
        }
        if let Some(bad) = indices.iter().find(|i| **i as usize >= points.len()) {
            return Err(Error::InvalidResource(format!(
                "hull index {} out of range for {} points", bad, points.len()
            )));
        }
        self.max_radius = compute_max_radius(&points);
        self.points = points;
        self.indices = indices;
        Ok(())
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.set_opacity(opacity);
        self
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Clamped to [0, 1]
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn points(&self) -> &[ShadowHullPoint] {
        &self.points
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Largest distance from the local origin to any point (unscaled)
    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }

    /// Radius of the world-space bounding circle around `position`
    pub fn world_radius(&self) -> f32 {
        self.max_radius * self.scale.abs().max_element()
    }

    /// Local-to-world transform: translate · rotate · scale
    pub fn transform(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(self.scale, self.angle, self.position)
    }

    /// World-space triangles of the hull interior
    pub fn world_triangles(&self) -> impl Iterator<Item = [Vec2; 3]> + '_ {
        let transform = self.transform();
        self.indices.chunks_exact(3).map(move |tri| {
            [
                transform.transform_point2(self.points[tri[0] as usize].position),
                transform.transform_point2(self.points[tri[1] as usize].position),
                transform.transform_point2(self.points[tri[2] as usize].position),
            ]
        })
    }

    /// `point` lies inside (or on the edge of) the world-space interior
    pub fn contains_point(&self, point: Vec2) -> bool {
        let reach = self.world_radius();
        if self.position.distance(point) > reach + f32::EPSILON * reach.max(1.0) {
            return false;
        }
        self.world_triangles().any(|tri| point_in_triangle(point, &tri))
    }

    /// The world-space segment `from`–`to` touches the interior
    pub fn intersects_segment(&self, from: Vec2, to: Vec2) -> bool {
        self.world_triangles().any(|tri| segment_intersects_triangle(from, to, &tri))
    }
}

fn compute_max_radius(points: &[ShadowHullPoint]) -> f32 {
    points.iter().map(|p| p.position.length()).fold(0.0, f32::max)
}

/// Two points per outline edge, each with the edge's outward normal
fn edge_points(outline: &[Vec2]) -> Vec<ShadowHullPoint> {
    let mut points = Vec::with_capacity(outline.len() * 2);
    for (i, start) in outline.iter().enumerate() {
        let end = outline[(i + 1) % outline.len()];
        // Outward for counter-clockwise winding
        let edge = end - *start;
        let normal = Vec2::new(edge.y, -edge.x).normalize_or_zero();
        points.push(ShadowHullPoint::new(*start, normal));
        points.push(ShadowHullPoint::new(end, normal));
    }
    points
}

#[cfg(test)]
#[path = "shadow_hull_tests.rs"]
mod tests;
