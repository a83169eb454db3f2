use glam::{vec2, UVec2, Vec2, Vec3};
#[cfg(target_arch = "spirv")]
use spirv_std::num_traits::Float;

use crate::{sample_cosine_hemisphere_around, F32Ext};

/// Per-lane pseudo-random number generator.
///
/// The entire state is a single `u32` that gets replaced by its hash on each
/// draw, so a given seed always produces the same sequence; callers usually
/// keep one of those per pixel or per ray and thread it through the shading
/// code by `&mut`.
#[derive(Clone, Copy)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug, PartialEq, Eq))]
pub struct WhiteNoise {
    state: u32,
}

impl WhiteNoise {
    /// Creates a generator for given pixel; pixels sharing the same frame-seed
    /// get decorrelated streams.
    pub fn new(seed: u32, id: UVec2) -> Self {
        Self::from_seed(
            seed ^ 48619u32.wrapping_mul(id.x) ^ 95461u32.wrapping_mul(id.y),
        )
    }

    pub fn from_seed(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn seed(&self) -> u32 {
        self.state
    }

    /// Advances the state and returns the new one.
    pub fn update_seed(&mut self) -> u32 {
        self.state = hash(self.state);
        self.state
    }

    /// Generates a uniform sample in range `<0.0, 1.0)`.
    pub fn sample(&mut self) -> f32 {
        float_from_bits(self.update_seed())
    }

    /// Generates two uniform samples in range `<0.0, 1.0)`.
    pub fn sample2(&mut self) -> Vec2 {
        let x = self.sample();
        let y = self.sample();

        vec2(x, y)
    }

    /// Generates a smooth value-noise sample in range `<0.0, 1.0)`; useful for
    /// dithering, not for Monte Carlo integration.
    pub fn sample_value_noise(&mut self) -> f32 {
        value_noise(self.sample2()).sqr()
    }

    /// Generates a cosine-weighted sample on a hemisphere around given normal.
    pub fn sample_hemisphere(&mut self, normal: Vec3) -> Vec3 {
        sample_cosine_hemisphere_around(normal, self.sample2())
    }
}

/// Integer hash used to advance [`WhiteNoise`].
///
/// See: http://www.reedbeta.com/blog/quick-and-easy-gpu-random-numbers-in-d3d11/
pub fn hash(mut seed: u32) -> u32 {
    seed = (seed ^ 61) ^ (seed >> 16);
    seed = seed.wrapping_mul(9);
    seed ^= seed >> 4;
    seed = seed.wrapping_mul(0x27d4eb2d);
    seed ^= seed >> 15;
    seed
}

/// Builds a float in range `<0.0, 1.0)` out of the lower 23 bits of given
/// integer, by placing them in the mantissa of a float in `<1.0, 2.0)`.
pub fn float_from_bits(bits: u32) -> f32 {
    const MANTISSA_MASK: u32 = 0x007f_ffff;
    const ONE: u32 = 0x3f80_0000;

    f32::from_bits((bits & MANTISSA_MASK) | ONE) - 1.0
}

/// Deterministic lattice value-noise.
pub fn value_noise(p: Vec2) -> f32 {
    let ip = p.floor();
    let u = vec2(p.x.fract_glsl(), p.y.fract_glsl());
    let u = u * u * (3.0 - 2.0 * u);

    let c00 = lattice_hash(ip);
    let c10 = lattice_hash(ip + vec2(1.0, 0.0));
    let c01 = lattice_hash(ip + vec2(0.0, 1.0));
    let c11 = lattice_hash(ip + vec2(1.0, 1.0));

    let bottom = c00 + (c10 - c00) * u.x;
    let top = c01 + (c11 - c01) * u.x;

    bottom + (top - bottom) * u.y
}

fn lattice_hash(p: Vec2) -> f32 {
    (p.dot(vec2(12.9898, 4.1414)).sin() * 43758.5453).fract_glsl()
}
