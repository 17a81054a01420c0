//! Pipeline module - the light-map engine and its configuration.

mod config;
mod light_map_pipeline;

pub use config::{LightMapConfig, ViewCulling};
pub use light_map_pipeline::{DebugOverlay, FrameStats, HullKey, LightKey, LightMapPipeline};
