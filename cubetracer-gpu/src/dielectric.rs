use glam::Vec3;
#[cfg(target_arch = "spirv")]
use spirv_std::num_traits::Float;

use crate::{F32Ext, MaterialId, Vec3Ext};

/// Returns the fraction of light reflected (as opposed to transmitted) by a
/// smooth boundary between media of indices of refraction `n1` and `n2`.
///
/// `incoming` points towards the surface; `normal` points back into the medium
/// the ray is travelling in.
pub fn dielectric_fresnel(
    normal: Vec3,
    incoming: Vec3,
    n1: f32,
    n2: f32,
) -> f32 {
    // No boundary, no reflection; also keeps grazing rays away from 0/0
    if n1 == n2 {
        return 0.0;
    }

    let cos_i = (-normal.dot(incoming)).saturate();
    let eta = n1 / n2;
    let sin_t2 = eta * eta * (1.0 - cos_i * cos_i);

    if n1 > n2 && sin_t2 > 1.0 {
        return 1.0;
    }

    let cos_t = (1.0 - sin_t2).max(0.0).sqrt();

    let rs = (n1 * cos_i - n2 * cos_t) / (n1 * cos_i + n2 * cos_t);
    let rp = (n2 * cos_i - n1 * cos_t) / (n2 * cos_i + n1 * cos_t);

    0.5 * (rs * rs + rp * rp)
}

/// Attenuates light that travelled `distance` units inside given material,
/// following the Beer-Lambert law.
pub fn beer_lambert(distance: f32, material: MaterialId, color: Vec3) -> Vec3 {
    if distance <= 0.0 {
        return color;
    }

    color * (distance * material.transmission_color().ln()).exp()
}
