use glam::{uvec2, UVec2};
use log::warn;

use crate::{gpu, ConfigError};

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Size of the rendered image, in pixels
    pub resolution: UVec2,
    pub shading: ShadingConfig,
}

impl Config {
    /// Checks whether this configuration can be rendered with, clamping the
    /// values that are merely too large.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if self.resolution.x == 0 || self.resolution.y == 0 {
            return Err(ConfigError::ZeroResolution {
                width: self.resolution.x,
                height: self.resolution.y,
            });
        }

        self.shading = self.shading.validated()?;

        Ok(self)
    }

    pub fn aspect_ratio(&self) -> f32 {
        (self.resolution.x as f32) / (self.resolution.y as f32)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: uvec2(1280, 720),
            shading: Default::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShadingConfig {
    pub geometry_term: gpu::GeometryTerm,
    pub composition: gpu::Composition,
    pub hemisphere_sampling: gpu::HemisphereSampling,

    /// Maximum number of indirect bounces; clamped to
    /// [`ShadingConfig::MAX_BOUNCES`]
    pub max_bounces: u32,

    /// Paths whose throughput falls below this value are terminated
    pub min_contribution: f32,
}

impl ShadingConfig {
    pub const MAX_BOUNCES: u32 = 8;

    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if self.max_bounces == 0 {
            return Err(ConfigError::ZeroBounces);
        }

        if !self.min_contribution.is_finite() || self.min_contribution < 0.0 {
            return Err(ConfigError::InvalidMinContribution(
                self.min_contribution,
            ));
        }

        if self.max_bounces > Self::MAX_BOUNCES {
            warn!(
                "Clamping max_bounces from {} to {}",
                self.max_bounces,
                Self::MAX_BOUNCES
            );

            self.max_bounces = Self::MAX_BOUNCES;
        }

        Ok(self)
    }

    pub(crate) fn serialize(
        &self,
        seed: u32,
        frame: u32,
    ) -> gpu::ShadingParams {
        gpu::ShadingParams {
            seed,
            geometry_term: self.geometry_term as u32,
            composition: self.composition as u32,
            hemisphere_sampling: self.hemisphere_sampling as u32,
            frame,
            max_bounces: self.max_bounces,
            min_contribution: self.min_contribution,
            _pad: 0,
        }
    }
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            geometry_term: Default::default(),
            composition: Default::default(),
            hemisphere_sampling: Default::default(),
            max_bounces: 2,
            min_contribution: gpu::MIN_PATH_CONTRIBUTION,
        }
    }
}
