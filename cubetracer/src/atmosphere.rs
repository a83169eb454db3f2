//! Single-scattering model of Earth's atmosphere, evaluated on the CPU to find
//! out the color of sunlight reaching the ground.
//!
//! Distances are in meters.

use std::f32::consts::PI;

use glam::{vec3, Vec3};

const VIEW_SAMPLES: usize = 16;
const LIGHT_SAMPLES: usize = 8;

const EARTH_RADIUS: f32 = 6_360_000.0;
const ATMOSPHERE_RADIUS: f32 = 6_420_000.0;

/// Scale height of the Rayleigh (air molecules) layer
const RAYLEIGH_HEIGHT: f32 = 7994.0;

/// Scale height of the Mie (aerosols) layer
const MIE_HEIGHT: f32 = 1200.0;

const RAYLEIGH_BETA: Vec3 = vec3(3.8e-6, 13.5e-6, 33.1e-6);
const MIE_BETA: Vec3 = Vec3::splat(21e-6);

/// Ratio of Mie extinction to Mie scattering
const MIE_EXTINCTION: f32 = 1.1;

/// Mean cosine of Mie scattering (i.e. how strongly aerosols scatter forward)
const MIE_G: f32 = 0.76;

const SUN_INTENSITY: f32 = 20.0;

/// Returns color of the sun as seen from the ground, given direction the
/// sunlight travels in.
pub fn sun_color(sun_direction: Vec3) -> Vec3 {
    sky_color(-sun_direction, sun_direction)
}

/// Returns color of the sky when looking at `dir` from the ground.
///
/// Directions below the horizon are lifted to a small elevation, since the
/// ground itself is not modelled.
pub fn sky_color(dir: Vec3, sun_direction: Vec3) -> Vec3 {
    let dir = {
        let mut dir = dir.normalize();

        if dir.y < 0.1 {
            dir.y = 0.1;
        }

        dir.normalize()
    };

    let to_sun = -sun_direction.normalize();
    let origin = vec3(0.0, EARTH_RADIUS, 0.0);

    let Some((t_min, t_max)) = intersect_atmosphere(origin, dir) else {
        return Vec3::ZERO;
    };

    let mu = dir.dot(to_sun);
    let phase_r = 3.0 / (16.0 * PI) * (1.0 + mu * mu);

    let phase_m = {
        let g2 = MIE_G * MIE_G;

        3.0 / (8.0 * PI) * ((1.0 - g2) * (1.0 + mu * mu))
            / ((2.0 + g2) * (1.0 + g2 - 2.0 * MIE_G * mu).powf(1.5))
    };

    let segment = (t_max - t_min) / (VIEW_SAMPLES as f32);
    let mut optical_depth_r = 0.0;
    let mut optical_depth_m = 0.0;
    let mut sum_r = Vec3::ZERO;
    let mut sum_m = Vec3::ZERO;

    for i in 0..VIEW_SAMPLES {
        let t = t_min + segment * (i as f32 + 0.5);
        let point = origin + dir * t;
        let height = point.length() - EARTH_RADIUS;

        let hr = (-height / RAYLEIGH_HEIGHT).exp() * segment;
        let hm = (-height / MIE_HEIGHT).exp() * segment;

        optical_depth_r += hr;
        optical_depth_m += hm;

        // Light that's blocked by the planet doesn't contribute
        let Some((light_depth_r, light_depth_m)) =
            light_optical_depth(point, to_sun)
        else {
            continue;
        };

        let tau = RAYLEIGH_BETA * (optical_depth_r + light_depth_r)
            + MIE_BETA * MIE_EXTINCTION * (optical_depth_m + light_depth_m);

        let attenuation =
            vec3((-tau.x).exp(), (-tau.y).exp(), (-tau.z).exp());

        sum_r += attenuation * hr;
        sum_m += attenuation * hm;
    }

    (sum_r * RAYLEIGH_BETA * phase_r + sum_m * MIE_BETA * phase_m)
        * SUN_INTENSITY
}

/// Integrates density of both layers along the path from `point` towards the
/// sun; returns `None` if that path goes through the planet.
fn light_optical_depth(point: Vec3, to_sun: Vec3) -> Option<(f32, f32)> {
    let t_max = intersect_atmosphere(point, to_sun).map_or(0.0, |(_, t)| t);
    let segment = t_max / (LIGHT_SAMPLES as f32);
    let mut depth_r = 0.0;
    let mut depth_m = 0.0;

    for i in 0..LIGHT_SAMPLES {
        let sample = point + to_sun * (segment * (i as f32 + 0.5));
        let height = sample.length() - EARTH_RADIUS;

        if height < 0.0 {
            return None;
        }

        depth_r += (-height / RAYLEIGH_HEIGHT).exp() * segment;
        depth_m += (-height / MIE_HEIGHT).exp() * segment;
    }

    Some((depth_r, depth_m))
}

/// Returns distances at which a ray starting at `origin` enters and leaves
/// the atmosphere.
fn intersect_atmosphere(origin: Vec3, dir: Vec3) -> Option<(f32, f32)> {
    let radius2 = ATMOSPHERE_RADIUS * ATMOSPHERE_RADIUS;
    let tca = -origin.dot(dir);
    let d2 = origin.dot(origin) - tca * tca;

    if d2 > radius2 {
        return None;
    }

    let thc = (radius2 - d2).sqrt();

    Some(((tca - thc).max(0.0), tca + thc))
}
