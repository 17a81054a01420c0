//! Hull module - occluder geometry and its per-light transformation buffer.

mod geometry_buffer;
mod shadow_hull;

pub use geometry_buffer::GeometryBuffer;
pub use shadow_hull::{ShadowHull, ShadowHullPoint};
