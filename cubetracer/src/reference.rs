use std::f32::consts::PI;

use glam::Vec3;

use crate::{atmosphere, gpu, ShadingConfig};

/// Light arriving from the sky, i.e. from rays that escape the scene.
#[derive(Clone, Copy, Debug)]
pub enum Sky {
    Constant(Vec3),
    Atmosphere,
}

/// CPU evaluation of a single shading point: direct sunlight plus one bounce
/// of skylight integrated with Monte Carlo.
///
/// There's no scene geometry here, so nothing is shadowed and every bounced
/// ray escapes straight into the sky; that makes the expected result known in
/// closed form, which is what we use this for.
#[derive(Clone, Debug)]
pub struct ReferenceShader {
    pub sun: gpu::Sun,
    pub sky: Sky,
    pub shading: ShadingConfig,
}

impl ReferenceShader {
    pub fn sky_radiance(&self, dir: Vec3) -> Vec3 {
        match self.sky {
            Sky::Constant(color) => color,
            Sky::Atmosphere => atmosphere::sky_color(dir, self.sun.direction()),
        }
    }

    /// Returns lighting coming directly from the sun.
    pub fn direct(
        &self,
        camera_origin: Vec3,
        hit_point: Vec3,
        surface: &gpu::Surface,
    ) -> Vec3 {
        self.sun
            .direct_lighting(
                camera_origin,
                hit_point,
                surface,
                self.shading.geometry_term,
            )
            .resolve(surface)
            .compose(self.shading.composition)
    }

    /// Estimates diffuse lighting coming from the sky, using `samples` rays.
    ///
    /// Surfaces that reflect too little for a path to keep going get no
    /// bounce at all, just like on the GPU.
    pub fn indirect(
        &self,
        surface: &gpu::Surface,
        noise: &mut gpu::WhiteNoise,
        samples: u32,
    ) -> Vec3 {
        let reflectance = surface.albedo * (1.0 - surface.mer.metalness);
        let params = self.shading.serialize(0, 0);

        if !params.should_continue(0, reflectance.max_element()) {
            return Vec3::ZERO;
        }

        let sampling = params.hemisphere_sampling();
        let brdf = reflectance / PI;
        let mut sum = Vec3::ZERO;

        for _ in 0..samples {
            let dir = sampling.sample(surface.normal, noise.sample2());
            let cos_theta = surface.normal.dot(dir);
            let pdf = sampling.pdf(cos_theta);

            if pdf <= 0.0 {
                continue;
            }

            sum += brdf * cos_theta / pdf * self.sky_radiance(dir);
        }

        sum / (samples.max(1) as f32)
    }

    pub fn shade(
        &self,
        camera_origin: Vec3,
        hit_point: Vec3,
        surface: &gpu::Surface,
        noise: &mut gpu::WhiteNoise,
        samples: u32,
    ) -> Vec3 {
        self.direct(camera_origin, hit_point, surface)
            + self.indirect(surface, noise, samples)
    }
}
