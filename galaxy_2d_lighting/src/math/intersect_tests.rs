use glam::Vec2;
use super::*;

const TRIANGLE: [Vec2; 3] = [Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0)];

#[test]
fn test_point_in_triangle() {
    assert!(point_in_triangle(Vec2::new(1.0, 1.0), &TRIANGLE));
    assert!(!point_in_triangle(Vec2::new(3.0, 3.0), &TRIANGLE));
    assert!(!point_in_triangle(Vec2::new(-0.1, 1.0), &TRIANGLE));
}

#[test]
fn test_point_in_triangle_is_inclusive_and_winding_independent() {
    let clockwise = [TRIANGLE[0], TRIANGLE[2], TRIANGLE[1]];
    for tri in [&TRIANGLE, &clockwise] {
        assert!(point_in_triangle(Vec2::new(2.0, 0.0), tri));
        assert!(point_in_triangle(Vec2::new(0.0, 0.0), tri));
        assert!(point_in_triangle(Vec2::new(2.0, 2.0), tri));
        assert!(point_in_triangle(Vec2::new(0.5, 0.5), tri));
    }
}

#[test]
fn test_segments_crossing() {
    assert!(segments_intersect(
        Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0),
        Vec2::new(-1.0, 1.0), Vec2::new(1.0, -1.0),
    ));
}

#[test]
fn test_segments_disjoint() {
    assert!(!segments_intersect(
        Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0),
    ));
    // Would cross if extended
    assert!(!segments_intersect(
        Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0),
        Vec2::new(3.0, 0.0), Vec2::new(2.5, 0.5),
    ));
}

#[test]
fn test_segments_touching_and_collinear() {
    // Shared endpoint
    assert!(segments_intersect(
        Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 0.0), Vec2::new(2.0, 5.0),
    ));
    // Overlapping collinear
    assert!(segments_intersect(
        Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0),
        Vec2::new(1.0, 0.0), Vec2::new(3.0, 0.0),
    ));
    // Collinear but apart
    assert!(!segments_intersect(
        Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0),
        Vec2::new(2.0, 0.0), Vec2::new(3.0, 0.0),
    ));
}

#[test]
fn test_segment_through_triangle() {
    assert!(segment_intersects_triangle(Vec2::new(-1.0, 1.0), Vec2::new(5.0, 1.0), &TRIANGLE));
}

#[test]
fn test_segment_inside_triangle() {
    assert!(segment_intersects_triangle(Vec2::new(0.5, 0.5), Vec2::new(1.0, 1.0), &TRIANGLE));
}

#[test]
fn test_segment_missing_triangle() {
    assert!(!segment_intersects_triangle(Vec2::new(5.0, 5.0), Vec2::new(6.0, -1.0), &TRIANGLE));
    assert!(!segment_intersects_triangle(Vec2::new(-1.0, -1.0), Vec2::new(-1.0, 5.0), &TRIANGLE));
}

#[test]
fn test_point_in_degenerate_triangle() {
    let collapsed = [Vec2::ONE; 3];
    assert!(point_in_triangle(Vec2::ONE, &collapsed));
    assert!(!point_in_triangle(Vec2::new(3.0, -2.0), &collapsed));

    let flat = [Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)];
    assert!(point_in_triangle(Vec2::new(1.5, 0.0), &flat));
    assert!(!point_in_triangle(Vec2::new(3.0, 0.0), &flat));
}
