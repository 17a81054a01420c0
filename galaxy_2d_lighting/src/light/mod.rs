//! Light module - light sources drawn into the light map.
//!
//! Lights are trait objects (`Box<dyn Light>`) owned by the pipeline.
//! `ConicLight` covers point lights (full field of view) and spot cones.

mod conic_light;
mod light;
mod shadow_type;

pub use conic_light::ConicLight;
pub use light::{is_in_range, Light};
pub use shadow_type::ShadowType;
