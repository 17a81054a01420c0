//! Render module - draw-side building blocks of the light map.
//!
//! - **fov_mesh**: light cone geometry clipped to a field of view
//! - **render_helper**: per-frame draw context shared by the pipeline and lights
//! - **blur**: two-pass separable blur

mod blur;
mod fov_mesh;
mod render_helper;

pub use blur::{BlurDirection, BlurStage};
pub use fov_mesh::{build_clipped_fov, build_square_quad, clamp_to_square, FovMesh};
pub use render_helper::{CompositeMode, RenderHelper};
