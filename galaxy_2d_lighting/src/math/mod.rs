//! Math module - 2D bounds and intersection tests used for culling and occlusion.

mod bounds_rect;
mod intersect;

pub use bounds_rect::BoundsRect;
pub use intersect::{point_in_triangle, segment_intersects_triangle, segments_intersect};
