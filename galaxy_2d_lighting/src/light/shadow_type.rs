/// How a light's shadows treat the hull interiors.

use crate::device::Technique;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShadowType {
    /// Hull interiors are shadowed like the space behind them
    #[default]
    Solid,
    /// Hull interiors stay lit
    Illuminated,
    /// Hull interiors are fully dark
    Occluded,
}

impl ShadowType {
    /// Shadow technique drawing this shadow type
    pub fn technique(&self) -> Technique {
        match self {
            ShadowType::Solid => Technique::ShadowSolid,
            ShadowType::Illuminated => Technique::ShadowIlluminated,
            ShadowType::Occluded => Technique::ShadowOccluded,
        }
    }
}

impl TryFrom<u32> for ShadowType {
    type Error = Error;

    /// Raw configuration value (0 solid, 1 illuminated, 2 occluded)
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ShadowType::Solid),
            1 => Ok(ShadowType::Illuminated),
            2 => Ok(ShadowType::Occluded),
            other => Err(Error::UnimplementedTechnique(format!(
                "shadow type {} does not exist", other
            ))),
        }
    }
}

#[cfg(test)]
#[path = "shadow_type_tests.rs"]
mod tests;
