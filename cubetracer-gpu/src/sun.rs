use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4, Vec4Swizzles};
#[cfg(target_arch = "spirv")]
use spirv_std::num_traits::Float;

use crate::{
    fresnel_schlick_vec, lerp, F32Ext, GeometryTerm, SpecularBrdf, Surface,
    DIELECTRIC_F0,
};

/// Directional light illuminating the entire scene.
#[repr(C)]
#[derive(Clone, Copy, Default, Pod, Zeroable)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct Sun {
    /// x - direction x
    /// y - direction y
    /// z - direction z
    /// w - unused
    pub direction: Vec4,

    /// x - color r
    /// y - color g
    /// z - color b
    /// w - unused
    pub color: Vec4,
}

impl Sun {
    /// Direction the light travels in (i.e. from the sun towards the scene).
    pub fn direction(&self) -> Vec3 {
        self.direction.xyz()
    }

    pub fn color(&self) -> Vec3 {
        self.color.xyz()
    }

    /// Returns how much the sun illuminates a surface with given normal,
    /// ignoring occlusion; used to scale shadow-ray contributions.
    pub fn visibility(&self, normal: Vec3) -> f32 {
        normal.dot(-self.direction()).max(0.0)
    }

    /// Evaluates direct lighting coming from the sun, without taking the
    /// surface's albedo into account (see [`SunLighting::resolve()`]).
    pub fn direct_lighting(
        &self,
        camera_origin: Vec3,
        hit_point: Vec3,
        surface: &Surface,
        geometry: GeometryTerm,
    ) -> SunLighting {
        let v = (camera_origin - hit_point).normalize();
        let l = -self.direction();
        let n_o_l = self.visibility(surface.normal);

        let specular = self.color()
            * SpecularBrdf::new(surface, geometry).eval(l, v, n_o_l);

        SunLighting {
            diffuse: self.color() * n_o_l,
            specular,
            n_o_l,
        }
    }
}

#[derive(Clone, Copy, Default)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct SunLighting {
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub n_o_l: f32,
}

impl SunLighting {
    /// Applies albedo and metalness.
    ///
    /// The diffuse lobe only gets the energy that wasn't reflected
    /// specularly, so it's weighted by `1 - F` before anything is summed.
    pub fn resolve(self, surface: &Surface) -> Self {
        let f = fresnel_schlick_vec(self.n_o_l, surface.f0());
        let diffuse = self.diffuse * surface.albedo * (Vec3::ONE - f);

        let specular = self.specular
            * lerp(Vec3::ONE, surface.albedo, surface.mer.metalness);

        Self {
            diffuse,
            specular,
            n_o_l: self.n_o_l,
        }
    }

    pub fn compose(self, composition: Composition) -> Vec3 {
        compose_final_color(
            self.diffuse,
            self.specular,
            self.n_o_l,
            composition,
        )
    }
}

/// Final weighting of the diffuse and specular lobes.
#[repr(u32)]
#[derive(Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub enum Composition {
    #[default]
    Plain = 0,

    /// Brightens diffuse lighting at grazing angles; not energy-conserving,
    /// but makes voxel edges pop out.
    GrazingBoost = 1,
}

impl Composition {
    pub fn from_u32(value: u32) -> Self {
        if value == Self::GrazingBoost as u32 {
            Self::GrazingBoost
        } else {
            Self::Plain
        }
    }
}

pub fn compose_final_color(
    diffuse: Vec3,
    specular: Vec3,
    n_o_l: f32,
    composition: Composition,
) -> Vec3 {
    match composition {
        Composition::Plain => diffuse + specular,
        Composition::GrazingBoost => {
            diffuse * grazing_boost(n_o_l) + specular
        }
    }
}

/// Returns `1.0` at normal incidence, growing up to `~2.0` at grazing angles.
pub fn grazing_boost(n_o_l: f32) -> f32 {
    1.0 + (1.0 - DIELECTRIC_F0) * (1.0 - n_o_l).saturate().powf(5.0)
}
