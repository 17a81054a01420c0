//! Texture module - generated falloff textures sampled by light emission.

mod radial_texture_builder;

pub use radial_texture_builder::{LightTexture, RadialTextureBuilder};
