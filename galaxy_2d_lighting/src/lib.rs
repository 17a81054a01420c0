/*!
# Galaxy 2D Lighting

Dynamic 2D light maps with hull-cast shadows.

Lights and shadow hulls are registered with a `LightMapPipeline`. Each frame
the pipeline renders every visible light into an off-screen light map
(stencil-masked by the shadows of the hulls in its reach), optionally blurs
it, and composites it over the scene. All GPU work goes through the
`GraphicsDevice` traits, so any backend (or a recording mock) can host it.

## Architecture

- **LightMapPipeline**: owns lights, hulls, view state and render targets
- **Light / ConicLight**: light sources drawn into the light map
- **ShadowHull / GeometryBuffer**: occluders and their per-light shadow geometry
- **RenderHelper / BlurStage**: draw-side building blocks
- **RadialTextureBuilder**: falloff textures sampled by light emission
- **GraphicsDevice**: render targets, primitive submission and effects
*/

pub mod error;
pub mod log;
pub mod math;
pub mod device;
pub mod hull;
pub mod light;
pub mod render;
pub mod pipeline;
pub mod texture;

// Main galaxy2d namespace module
pub mod galaxy2d {
    // Error types
    pub use crate::error::{Error, Result};

    // Light-map engine
    pub use crate::pipeline::{
        DebugOverlay, FrameStats, HullKey, LightKey, LightMapConfig, LightMapPipeline, ViewCulling,
    };

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        pub use crate::log::{set_logger, reset_logger, set_max_severity, max_severity};
    }

    // Device contracts
    pub mod device {
        pub use crate::device::*;
    }

    // Lights and occluders
    pub mod scene {
        pub use crate::hull::*;
        pub use crate::light::*;
    }

    // Draw-side helpers and textures
    pub mod render {
        pub use crate::render::*;
        pub use crate::texture::*;
    }

    pub mod math {
        pub use crate::math::*;
    }
}

// Re-export math library at crate root
pub use glam;
