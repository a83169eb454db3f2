use bytemuck::{Pod, Zeroable};
use glam::UVec2;

use crate::{Composition, GeometryTerm, HemisphereSampling, WhiteNoise};

/// Per-frame shading parameters, shared by all passes.
#[repr(C)]
#[derive(Clone, Copy, Default, Pod, Zeroable)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct ShadingParams {
    /// Random seed, regenerated each frame
    pub seed: u32,

    /// See: [`GeometryTerm`]
    pub geometry_term: u32,

    /// See: [`Composition`]
    pub composition: u32,

    /// See: [`HemisphereSampling`]
    pub hemisphere_sampling: u32,

    pub frame: u32,

    /// Maximum number of indirect bounces traced per pixel
    pub max_bounces: u32,

    /// Paths whose throughput falls below this are terminated
    pub min_contribution: f32,

    pub _pad: u32,
}

impl ShadingParams {
    pub fn geometry_term(&self) -> GeometryTerm {
        GeometryTerm::from_u32(self.geometry_term)
    }

    pub fn composition(&self) -> Composition {
        Composition::from_u32(self.composition)
    }

    pub fn hemisphere_sampling(&self) -> HemisphereSampling {
        HemisphereSampling::from_u32(self.hemisphere_sampling)
    }

    /// Returns noise generator for given pixel, decorrelated from the other
    /// pixels and from previous frames.
    pub fn noise(&self, pixel: UVec2) -> WhiteNoise {
        WhiteNoise::new(self.seed, pixel)
    }

    /// Returns whether a path carrying given throughput should continue.
    pub fn should_continue(&self, bounce: u32, throughput: f32) -> bool {
        bounce < self.max_bounces && throughput >= self.min_contribution
    }
}

#[cfg(test)]
mod tests {
    use glam::uvec2;

    use super::*;

    #[test]
    fn decoding() {
        let params = ShadingParams {
            geometry_term: GeometryTerm::HeightCorrelatedSmith as u32,
            composition: Composition::GrazingBoost as u32,
            hemisphere_sampling: HemisphereSampling::Uniform as u32,
            ..Default::default()
        };

        assert_eq!(GeometryTerm::HeightCorrelatedSmith, params.geometry_term());
        assert_eq!(Composition::GrazingBoost, params.composition());
        assert_eq!(HemisphereSampling::Uniform, params.hemisphere_sampling());
    }

    #[test]
    fn decoding_falls_back_to_defaults() {
        let params = ShadingParams {
            geometry_term: 123,
            composition: 456,
            hemisphere_sampling: 789,
            ..Default::default()
        };

        assert_eq!(GeometryTerm::default(), params.geometry_term());
        assert_eq!(Composition::default(), params.composition());
        assert_eq!(HemisphereSampling::default(), params.hemisphere_sampling());
    }

    #[test]
    fn noise_depends_on_seed_and_pixel() {
        let a = ShadingParams {
            seed: 1,
            ..Default::default()
        };

        let b = ShadingParams {
            seed: 2,
            ..Default::default()
        };

        assert_eq!(a.noise(uvec2(3, 4)), a.noise(uvec2(3, 4)));
        assert_ne!(a.noise(uvec2(3, 4)), a.noise(uvec2(4, 3)));
        assert_ne!(a.noise(uvec2(3, 4)), b.noise(uvec2(3, 4)));
    }

    #[test]
    fn should_continue() {
        let params = ShadingParams {
            max_bounces: 2,
            min_contribution: 1e-4,
            ..Default::default()
        };

        assert!(params.should_continue(0, 1.0));
        assert!(params.should_continue(1, 1e-4));
        assert!(!params.should_continue(2, 1.0));
        assert!(!params.should_continue(0, 1e-5));
    }
}
