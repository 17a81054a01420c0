/// Field-of-view clipped light cone mesh.
///
/// The light texture is square, so the cone is cut out of the unit square
/// rather than the unit circle: edge directions are pushed out to the square
/// boundary and the fan walks the square's corners between them.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, SQRT_2, TAU};
use glam::{Affine2, Vec2};
use crate::device::{Color, LightVertex};

/// Triangle table for arcs up to a quarter turn: both edges share a square side
const INDICES_NARROW: [u32; 3] = [0, 1, 6];
/// Arcs up to three quarter turns: the fan passes the two right-hand corners
const INDICES_WIDE: [u32; 9] = [0, 1, 3, 0, 3, 4, 0, 4, 6];
/// Larger arcs: the fan passes all four corners
const INDICES_FULL: [u32; 15] = [0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 5, 0, 5, 6];

/// Geometry of one light cone, ready for submission
#[derive(Debug, Clone, PartialEq)]
pub enum FovMesh {
    /// Zero field of view; nothing is drawn
    Empty,
    /// Full circle: a rotated square quad, triangle-strip ordered
    Quad([LightVertex; 4]),
    /// Partial arc: 7-vertex fan with a triangle-list index table
    Fan {
        vertices: [LightVertex; 7],
        indices: &'static [u32],
    },
}

impl FovMesh {
    pub fn triangle_count(&self) -> u32 {
        match self {
            FovMesh::Empty => 0,
            FovMesh::Quad(_) => 2,
            FovMesh::Fan { indices, .. } => (indices.len() / 3) as u32,
        }
    }

    pub fn vertex_count(&self) -> usize {
        match self {
            FovMesh::Empty => 0,
            FovMesh::Quad(v) => v.len(),
            FovMesh::Fan { vertices, .. } => vertices.len(),
        }
    }
}

/// Unit vector at `angle`, scaled out to the boundary of the unit square
pub fn clamp_to_square(angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    let abs_max = cos.abs().max(sin.abs());
    Vec2::new(cos / abs_max, sin / abs_max)
}

/// Map a unit-square position to texture space (V grows downward)
fn square_to_tex(v: Vec2) -> Vec2 {
    Vec2::new(v.x + 1.0, -v.y + 1.0) / 2.0
}

/// Build the cone mesh centered at `position`, `size` wide, facing `rotation`
///
/// `fov` is clamped to [0, 2π]; NaN counts as zero.
pub fn build_clipped_fov(position: Vec2, rotation: f32, size: f32, color: Color, fov: f32) -> FovMesh {
    let fov = if fov.is_nan() { 0.0 } else { fov.clamp(0.0, TAU) };

    if fov == 0.0 {
        return FovMesh::Empty;
    }
    if fov == TAU {
        return FovMesh::Quad(build_square_quad(position, rotation, size, color));
    }

    let ccw = clamp_to_square(fov / 2.0);
    let cw = clamp_to_square(-fov / 2.0);

    let local = [
        (Vec2::ZERO, Vec2::splat(0.5)),
        (ccw, square_to_tex(ccw)),
        (Vec2::new(-1.0, 1.0), Vec2::new(0.0, 0.0)),
        (Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0)),
        (Vec2::new(1.0, -1.0), Vec2::new(1.0, 1.0)),
        (Vec2::new(-1.0, -1.0), Vec2::new(0.0, 1.0)),
        (cw, square_to_tex(cw)),
    ];

    let transform = Affine2::from_scale_angle_translation(Vec2::splat(size / 2.0), rotation, position);
    let vertices = local.map(|(p, tex)| LightVertex::new(transform.transform_point2(p), color, tex));

    let indices: &'static [u32] = if fov <= FRAC_PI_2 {
        &INDICES_NARROW
    } else if fov <= 3.0 * FRAC_PI_2 {
        &INDICES_WIDE
    } else {
        &INDICES_FULL
    };

    FovMesh::Fan { vertices, indices }
}

/// Square quad of side `size`, rotated by `rotation`, triangle-strip ordered
pub fn build_square_quad(position: Vec2, rotation: f32, size: f32, color: Color) -> [LightVertex; 4] {
    // Half diagonal, measured from the first corner at 45°
    let half_diagonal = (size / 2.0) * SQRT_2;
    let (sin, cos) = (rotation + FRAC_PI_4).sin_cos();
    let (cos, sin) = (cos * half_diagonal, sin * half_diagonal);

    let v1 = position + Vec2::new(cos, sin);
    let v2 = position + Vec2::new(-sin, cos);
    let v3 = position + Vec2::new(-cos, -sin);
    let v4 = position + Vec2::new(sin, -cos);

    [
        LightVertex::new(v2, color, Vec2::new(0.0, 0.0)),
        LightVertex::new(v1, color, Vec2::new(1.0, 0.0)),
        LightVertex::new(v3, color, Vec2::new(0.0, 1.0)),
        LightVertex::new(v4, color, Vec2::new(1.0, 1.0)),
    ]
}

#[cfg(test)]
#[path = "fov_mesh_tests.rs"]
mod tests;
