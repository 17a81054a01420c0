/// Point and segment tests against 2D triangles.
///
/// All tests are inclusive: points on an edge count as inside, and segments
/// that only touch count as intersecting.

use glam::Vec2;

/// Signed doubled area of `(a, b, c)`; positive for counter-clockwise
fn orient(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

/// `p` lies within the bounding box of segment `a`–`b` (used for collinear cases)
fn within_segment_box(a: Vec2, b: Vec2, p: Vec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Inclusive point-in-triangle test, independent of winding
pub fn point_in_triangle(p: Vec2, triangle: &[Vec2; 3]) -> bool {
    let [a, b, c] = *triangle;
    let d1 = orient(a, b, p);
    let d2 = orient(b, c, p);
    let d3 = orient(c, a, p);

    // Collinear corners: only points on the degenerate triangle itself
    if d1 == 0.0 && d2 == 0.0 && d3 == 0.0 {
        return p.cmpge(a.min(b).min(c)).all() && p.cmple(a.max(b).max(c)).all();
    }

    let has_negative = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_positive = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_negative && has_positive)
}

/// Segments `a0`–`a1` and `b0`–`b1` share at least one point
pub fn segments_intersect(a0: Vec2, a1: Vec2, b0: Vec2, b1: Vec2) -> bool {
    let d1 = orient(b0, b1, a0);
    let d2 = orient(b0, b1, a1);
    let d3 = orient(a0, a1, b0);
    let d4 = orient(a0, a1, b1);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && within_segment_box(b0, b1, a0))
        || (d2 == 0.0 && within_segment_box(b0, b1, a1))
        || (d3 == 0.0 && within_segment_box(a0, a1, b0))
        || (d4 == 0.0 && within_segment_box(a0, a1, b1))
}

/// Segment `from`–`to` touches the triangle (crosses an edge or lies inside)
pub fn segment_intersects_triangle(from: Vec2, to: Vec2, triangle: &[Vec2; 3]) -> bool {
    if point_in_triangle(from, triangle) || point_in_triangle(to, triangle) {
        return true;
    }
    let [a, b, c] = *triangle;
    segments_intersect(from, to, a, b)
        || segments_intersect(from, to, b, c)
        || segments_intersect(from, to, c, a)
}

#[cfg(test)]
#[path = "intersect_tests.rs"]
mod tests;
