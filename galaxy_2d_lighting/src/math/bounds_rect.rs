/// Axis-aligned 2D bounding rectangle stored as two corners.
///
/// Used for light-vs-view culling, scissor projection and debug outlines.
/// The all-zero instance doubles as the "empty" box: `intersection()`
/// returns it when two boxes do not overlap, so callers that must tell
/// "no overlap" apart from a zero-area box at the origin call
/// `intersects()` first.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundsRect {
    /// Minimum corner (left, bottom)
    pub min: Vec2,
    /// Maximum corner (right, top)
    pub max: Vec2,
}

impl BoundsRect {
    /// The all-zero box
    pub const EMPTY: Self = Self { min: Vec2::ZERO, max: Vec2::ZERO };

    /// Maximal-extent sentinel; intersects every finite non-empty box
    pub const MAX_EXTENT: Self = Self {
        min: Vec2::splat(f32::MIN),
        max: Vec2::splat(f32::MAX),
    };

    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` extending `half_extent` on each side
    pub fn from_center(center: Vec2, half_extent: Vec2) -> Self {
        Self::new(center - half_extent, center + half_extent)
    }

    /// Smallest box containing every point, or `EMPTY` for no points
    pub fn from_points<I: IntoIterator<Item = Vec2>>(points: I) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::EMPTY;
        };
        iter.fold(Self::new(first, first), |acc, p| {
            Self::new(acc.min.min(p), acc.max.max(p))
        })
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    /// Y grows upward in world space, so the top edge is `max.y`
    pub fn top(&self) -> f32 {
        self.max.y
    }

    pub fn bottom(&self) -> f32 {
        self.min.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Strict overlap test; boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &BoundsRect) -> bool {
        self.min.x < other.max.x
            && self.min.y < other.max.y
            && self.max.x > other.min.x
            && self.max.y > other.min.y
    }

    /// Inclusive point containment
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Inclusive box containment
    pub fn contains(&self, other: &BoundsRect) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }

    /// Overlapping region, or `EMPTY` when the boxes do not intersect
    pub fn intersection(&self, other: &BoundsRect) -> BoundsRect {
        if !self.intersects(other) {
            return Self::EMPTY;
        }
        Self::new(self.min.max(other.min), self.max.min(other.max))
    }

    /// Smallest box containing both
    pub fn union(&self, other: &BoundsRect) -> BoundsRect {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }
}

#[cfg(test)]
#[path = "bounds_rect_tests.rs"]
mod tests;
