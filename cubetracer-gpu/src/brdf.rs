use core::f32::consts::PI;

use glam::Vec3;
#[cfg(target_arch = "spirv")]
use spirv_std::num_traits::Float;

use crate::{orthonormal_basis, sample_ggx_vndf, Surface, Vec3Ext, WhiteNoise};

/// Reflectance of common dielectrics at normal incidence.
pub const DIELECTRIC_F0: f32 = 0.04;

/// Masking-shadowing function used by the microfacet BRDF.
///
/// Both variants are valid choices, but they are not numerically identical -
/// a frame must be rendered with just one of them.
#[repr(u32)]
#[derive(Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub enum GeometryTerm {
    /// Product of two Schlick-Smith `G1` terms (light and view are assumed to
    /// be shadowed independently).
    #[default]
    SeparableSmith = 0,

    /// Height-correlated Smith term.
    HeightCorrelatedSmith = 1,
}

impl GeometryTerm {
    pub fn from_u32(value: u32) -> Self {
        if value == Self::HeightCorrelatedSmith as u32 {
            Self::HeightCorrelatedSmith
        } else {
            Self::SeparableSmith
        }
    }

    /// Returns `G2(l, v)`.
    pub fn eval(self, alpha: f32, n_o_v: f32, n_o_l: f32) -> f32 {
        match self {
            GeometryTerm::SeparableSmith => {
                g1_schlick_smith(alpha, n_o_l) * g1_schlick_smith(alpha, n_o_v)
            }

            GeometryTerm::HeightCorrelatedSmith => {
                let a2 = alpha * alpha;
                let lambda_v = n_o_l * (a2 + (1.0 - a2) * n_o_v * n_o_v).sqrt();
                let lambda_l = n_o_v * (a2 + (1.0 - a2) * n_o_l * n_o_l).sqrt();

                2.0 * n_o_l * n_o_v / (lambda_v + lambda_l)
            }
        }
    }
}

/// Cook-Torrance specular lobe with GGX distribution.
#[derive(Clone, Copy)]
pub struct SpecularBrdf<'a> {
    surface: &'a Surface,
    geometry: GeometryTerm,
}

impl<'a> SpecularBrdf<'a> {
    pub fn new(surface: &'a Surface, geometry: GeometryTerm) -> Self {
        Self { surface, geometry }
    }

    /// Evaluates the lobe for light arriving from `l` and leaving towards `v`
    /// (both pointing away from the surface).
    ///
    /// `n_o_l` is passed in because callers already have it at hand for the
    /// diffuse term.
    pub fn eval(self, l: Vec3, v: Vec3, n_o_l: f32) -> Vec3 {
        let n = self.surface.normal;
        let n_o_v = n.dot(v).max(0.0);

        if n_o_l <= 0.0 || n_o_v <= 0.0 {
            return Vec3::ZERO;
        }

        let alpha = self.surface.alpha();
        let h = (v + l).normalize();
        let n_o_h = n.dot(h).max(0.0);
        let v_o_h = v.dot(h).max(0.0);

        let f = fresnel_schlick_vec(v_o_h, self.surface.f0());
        let d = d_ggx(alpha, n_o_h);
        let g = self.geometry.eval(alpha, n_o_v, n_o_l);

        f * (d * g / (4.0 * n_o_l * n_o_v))
    }

    /// Importance-samples a reflected direction for a ray travelling along
    /// `incoming`.
    pub fn sample(self, noise: &mut WhiteNoise, incoming: Vec3) -> Vec3 {
        let basis = orthonormal_basis(self.surface.normal);

        let h = sample_ggx_vndf(
            noise.sample2(),
            self.surface.alpha(),
            incoming,
            basis,
        );

        incoming.reflect(h)
    }
}

/// Schlick's approximation of the Fresnel term.
///
/// See: https://en.wikipedia.org/wiki/Schlick%27s_approximation
pub fn fresnel_schlick(cos_theta: f32, f0: f32) -> f32 {
    f0 + (1.0 - f0) * (1.0 - cos_theta).max(0.0).powf(5.0)
}

/// See: [`fresnel_schlick()`].
pub fn fresnel_schlick_vec(cos_theta: f32, f0: Vec3) -> Vec3 {
    f0 + (Vec3::ONE - f0) * (1.0 - cos_theta).max(0.0).powf(5.0)
}

/// Trowbridge-Reitz (GGX) normal distribution function.
///
/// See: http://graphicrants.blogspot.com/2013/08/specular-brdf-reference.html
pub fn d_ggx(alpha: f32, n_o_h: f32) -> f32 {
    let a2 = alpha * alpha;
    let denom = n_o_h * n_o_h * (a2 - 1.0) + 1.0;

    a2 / (PI * denom * denom)
}

/// Schlick-Smith masking term for a single direction.
pub fn g1_schlick_smith(alpha: f32, n_o_x: f32) -> f32 {
    let a2 = alpha * alpha;

    2.0 * n_o_x / (n_o_x + (a2 + (1.0 - a2) * n_o_x * n_o_x).sqrt())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::vec3;

    use super::*;
    use crate::HemisphereSampling;

    const GEOMETRY_TERMS: [GeometryTerm; 2] = [
        GeometryTerm::SeparableSmith,
        GeometryTerm::HeightCorrelatedSmith,
    ];

    fn surfaces() -> impl Iterator<Item = Surface> {
        [0.0, 0.3, 0.7, 1.0].into_iter().flat_map(|roughness| {
            [0.0, 0.5, 1.0].into_iter().map(move |metalness| {
                Surface::new(
                    vec3(0.1, 0.9, 0.2).normalize(),
                    vec3(0.8, 0.5, 0.3),
                    vec3(metalness, 0.0, roughness),
                )
            })
        })
    }

    #[test]
    fn fresnel_schlick_limits() {
        for f0 in [0.0, 0.04, 0.5, 1.0] {
            assert_eq!(f0, fresnel_schlick(1.0, f0));
            assert_eq!(1.0, fresnel_schlick(0.0, f0));
        }

        let f0 = vec3(0.04, 0.5, 0.9);

        assert_eq!(f0, fresnel_schlick_vec(1.0, f0));
        assert_eq!(Vec3::ONE, fresnel_schlick_vec(0.0, f0));
    }

    #[test]
    fn fresnel_schlick_is_monotonic() {
        let mut prev = fresnel_schlick(0.0, DIELECTRIC_F0);

        for i in 1..=100 {
            let curr = fresnel_schlick(i as f32 / 100.0, DIELECTRIC_F0);

            assert!(curr <= prev);
            prev = curr;
        }
    }

    #[test]
    fn d_ggx_peaks_at_normal() {
        let alpha = 0.25;

        assert_relative_eq!(
            d_ggx(alpha, 1.0),
            1.0 / (PI * alpha * alpha),
            max_relative = 1e-6
        );
        assert!(d_ggx(alpha, 0.9) < d_ggx(alpha, 1.0));
    }

    #[test]
    fn d_ggx_is_normalized() {
        // Projected-area normalization: integral of D(h) * cos(h) over the
        // hemisphere equals one.
        let mut noise = WhiteNoise::from_seed(1);
        let samples = 400_000;

        for alpha in [0.3, 0.6, 1.0] {
            let mut sum = 0.0f64;

            for _ in 0..samples {
                let h = HemisphereSampling::Cosine
                    .sample(Vec3::Y, noise.sample2());

                let pdf = HemisphereSampling::Cosine.pdf(h.y);

                if pdf > 0.0 {
                    sum += (d_ggx(alpha, h.y) * h.y / pdf) as f64;
                }
            }

            assert_relative_eq!(sum / samples as f64, 1.0, epsilon = 0.05);
        }
    }

    #[test]
    fn geometry_terms_are_bounded() {
        for geometry in GEOMETRY_TERMS {
            for alpha in [0.02, 0.3, 1.0] {
                assert_relative_eq!(
                    geometry.eval(alpha, 1.0, 1.0),
                    1.0,
                    epsilon = 1e-6
                );

                for i in 1..=10 {
                    for j in 1..=10 {
                        let n_o_v = i as f32 / 10.0;
                        let n_o_l = j as f32 / 10.0;
                        let g = geometry.eval(alpha, n_o_v, n_o_l);

                        assert!(g > 0.0 && g <= 1.0 + 1e-6, "g = {g}");
                    }
                }
            }
        }
    }

    #[test]
    fn geometry_terms_differ() {
        let a = GeometryTerm::SeparableSmith.eval(0.5, 0.3, 0.6);
        let b = GeometryTerm::HeightCorrelatedSmith.eval(0.5, 0.3, 0.6);

        assert!((a - b).abs() > 1e-4);
    }

    #[test]
    fn geometry_term_from_u32() {
        assert_eq!(GeometryTerm::SeparableSmith, GeometryTerm::from_u32(0));

        assert_eq!(
            GeometryTerm::HeightCorrelatedSmith,
            GeometryTerm::from_u32(1)
        );

        assert_eq!(GeometryTerm::SeparableSmith, GeometryTerm::from_u32(123));
    }

    #[test]
    fn specular_is_zero_below_horizon() {
        for surface in surfaces() {
            for geometry in GEOMETRY_TERMS {
                let brdf = SpecularBrdf::new(&surface, geometry);
                let n = surface.normal;
                let up = vec3(0.3, 0.9, 0.1).normalize();
                let below = -up;

                // Light below the horizon
                assert_eq!(Vec3::ZERO, brdf.eval(below, up, n.dot(below)));
                assert_eq!(Vec3::ZERO, brdf.eval(below, up, 0.0));

                // Viewer below the horizon
                assert_eq!(Vec3::ZERO, brdf.eval(up, below, n.dot(up)));
            }
        }
    }

    #[test]
    fn specular_is_non_negative_and_symmetric() {
        let mut noise = WhiteNoise::from_seed(7);

        for surface in surfaces() {
            for geometry in GEOMETRY_TERMS {
                let brdf = SpecularBrdf::new(&surface, geometry);
                let n = surface.normal;

                for _ in 0..200 {
                    let l = noise.sample_hemisphere(n);
                    let v = noise.sample_hemisphere(n);
                    let lv = brdf.eval(l, v, n.dot(l));
                    let vl = brdf.eval(v, l, n.dot(v));

                    assert!(lv.cmpge(Vec3::ZERO).all(), "lv = {lv:?}");
                    assert!(lv.is_finite());

                    assert_relative_eq!(lv.x, vl.x, max_relative = 1e-4);
                    assert_relative_eq!(lv.y, vl.y, max_relative = 1e-4);
                    assert_relative_eq!(lv.z, vl.z, max_relative = 1e-4);
                }
            }
        }
    }

    #[test]
    fn specular_conserves_energy() {
        // Directional albedo of the specular lobe for a white metal must not
        // exceed one.
        let mut noise = WhiteNoise::from_seed(11);
        let samples = 100_000;

        for roughness in [0.5, 0.8, 1.0] {
            let surface =
                Surface::new(Vec3::Y, Vec3::ONE, vec3(1.0, 0.0, roughness));

            let brdf =
                SpecularBrdf::new(&surface, GeometryTerm::SeparableSmith);
            let v = vec3(0.5, 0.8, 0.0).normalize();
            let mut sum = 0.0f64;

            for _ in 0..samples {
                let l = noise.sample_hemisphere(Vec3::Y);
                let n_o_l = l.y;
                let pdf = HemisphereSampling::Cosine.pdf(n_o_l);

                if pdf > 0.0 {
                    sum += (brdf.eval(l, v, n_o_l).x * n_o_l / pdf) as f64;
                }
            }

            let albedo = sum / samples as f64;

            assert!(albedo > 0.1 && albedo < 1.05, "albedo = {albedo}");
        }
    }

    #[test]
    fn sample_concentrates_around_mirror_direction_for_smooth_surfaces() {
        let mut noise = WhiteNoise::from_seed(13);
        let surface = Surface::new(Vec3::Y, Vec3::ONE, vec3(1.0, 0.0, 0.0));
        let brdf = SpecularBrdf::new(&surface, GeometryTerm::default());
        let incoming = vec3(1.0, -1.0, 0.0).normalize();
        let mirror = incoming.reflect(Vec3::Y);
        let mut close = 0;

        for _ in 0..1_000 {
            let l = brdf.sample(&mut noise, incoming);

            assert!(l.is_finite());
            assert_relative_eq!(l.length(), 1.0, epsilon = 1e-4);

            if l.dot(mirror) > 0.99 {
                close += 1;
            }
        }

        assert!(close > 950, "close = {close}");
    }
}
