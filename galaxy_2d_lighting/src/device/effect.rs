/// Effect (shader technique) dispatch contract.
///
/// The lighting effect exposes named techniques, each an ordered list of
/// passes. Callers select a technique, set parameters, then apply each pass
/// before issuing the draw it governs.

use glam::{Mat4, Vec2, Vec4};
use crate::error::Result;
use super::TextureId;

/// Techniques the lighting effect must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Technique {
    /// Hull shadows fully block light behind and inside the hull
    ShadowSolid,
    /// Hull shadows block light behind the hull; the hull itself stays lit
    ShadowIlluminated,
    /// Hull shadows block light behind the hull; the hull itself is dark
    ShadowOccluded,
    /// Light cone emission (additive, stencil-masked by the shadow pass)
    LightEmission,
    /// Resets the alpha/stencil channel written by the shadow pass
    AlphaClear,
    /// Plain textured full-screen copy
    ScreenCopy,
    BlurHorizontal,
    BlurVertical,
    /// Composites the light map onto the bound target additively
    CompositeAdditive,
    /// Composites the light map onto the bound target multiplicatively
    CompositeMultiplicative,
    /// Flat debug geometry (hull outlines, bounds)
    DebugOutline,
}

impl Technique {
    /// Technique name as declared in the effect source
    pub fn name(&self) -> &'static str {
        match self {
            Technique::ShadowSolid => "PointLight_Shadow_Solid",
            Technique::ShadowIlluminated => "PointLight_Shadow_Illuminated",
            Technique::ShadowOccluded => "PointLight_Shadow_Occluded",
            Technique::LightEmission => "PointLight_Light",
            Technique::AlphaClear => "ClearTarget_Alpha",
            Technique::ScreenCopy => "ScreenCopy",
            Technique::BlurHorizontal => "Blur_Horizontal",
            Technique::BlurVertical => "Blur_Vertical",
            Technique::CompositeAdditive => "TextureToTarget_Add",
            Technique::CompositeMultiplicative => "TextureToTarget_Multiply",
            Technique::DebugOutline => "DebugDraw",
        }
    }

    pub const ALL: [Technique; 11] = [
        Technique::ShadowSolid,
        Technique::ShadowIlluminated,
        Technique::ShadowOccluded,
        Technique::LightEmission,
        Technique::AlphaClear,
        Technique::ScreenCopy,
        Technique::BlurHorizontal,
        Technique::BlurVertical,
        Technique::CompositeAdditive,
        Technique::CompositeMultiplicative,
        Technique::DebugOutline,
    ];
}

/// Effect parameter names
pub mod params {
    pub const MATRIX: &str = "Matrix";
    pub const LIGHT_POSITION: &str = "LightPosition";
    pub const LIGHT_INTENSITY_FACTOR: &str = "LightIntensityFactor";
    pub const TEXTURE0: &str = "Texture0";
    pub const TEXEL_BIAS: &str = "TexelBias";
    pub const BLUR_FACTOR_U: &str = "BlurFactorU";
    pub const BLUR_FACTOR_V: &str = "BlurFactorV";
    pub const BLURINESS: &str = "Bluriness";
}

/// Value assigned to an effect parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectValue {
    Float(f32),
    Vec2(Vec2),
    Vec4(Vec4),
    Matrix(Mat4),
    /// `None` unbinds the sampler
    Texture(Option<TextureId>),
}

/// Shader technique dispatcher
pub trait EffectDispatcher {
    /// Make `technique` current
    ///
    /// # Errors
    ///
    /// `Error::UnimplementedTechnique` if the effect has no such technique.
    fn set_technique(&mut self, technique: Technique) -> Result<()>;

    /// Number of passes of the current technique
    fn pass_count(&self) -> u32;

    /// Apply pass `index` of the current technique
    fn apply_pass(&mut self, index: u32) -> Result<()>;

    /// Set a named parameter
    fn set_parameter(&mut self, name: &str, value: EffectValue) -> Result<()>;
}
