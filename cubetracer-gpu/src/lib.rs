//! Shading math and uniform structs shared by cubetracer's shaders and host.

#![cfg_attr(target_arch = "spirv", no_std)]
#![allow(clippy::manual_range_contains)]

mod brdf;
mod camera;
mod dielectric;
mod material;
mod noise;
mod params;
mod sampling;
mod sun;
mod utils;

pub use self::brdf::*;
pub use self::camera::*;
pub use self::dielectric::*;
pub use self::material::*;
pub use self::noise::*;
pub use self::params::*;
pub use self::sampling::*;
pub use self::sun::*;
pub use self::utils::*;

pub mod prelude {
    pub use core::f32::consts::PI;

    pub use glam::*;
    #[cfg(target_arch = "spirv")]
    pub use spirv_std::num_traits::Float;
    #[cfg(target_arch = "spirv")]
    pub use spirv_std::{spirv, Image, Sampler};

    pub use crate::*;
}

/// Paths whose throughput falls below this are not worth tracing any further.
pub const MIN_PATH_CONTRIBUTION: f32 = 1e-4;
