use glam::{vec3, Vec3};

use crate::{lerp, F32Ext, DIELECTRIC_F0};

/// Metalness, emissive and roughness of a surface, packed (in that order) into
/// a single vector by the hit shaders.
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct Mer {
    pub metalness: f32,
    pub emissive: f32,
    pub roughness: f32,
}

impl Mer {
    pub fn unpack(mer: Vec3) -> Self {
        Self {
            metalness: mer.x,
            emissive: mer.y,
            roughness: mer.z,
        }
    }

    pub fn pack(self) -> Vec3 {
        vec3(self.metalness, self.emissive, self.roughness)
    }
}

/// Everything the shading functions need to know about a hit point.
#[derive(Clone, Copy, Default)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct Surface {
    /// Unit-length normal
    pub normal: Vec3,
    pub albedo: Vec3,
    pub mer: Mer,
}

impl Surface {
    /// Smallest GGX alpha we evaluate; mirror-like alphas turn the
    /// distribution into a spike that produces fireflies.
    pub const MIN_ALPHA: f32 = 0.02;

    pub fn new(normal: Vec3, albedo: Vec3, mer: Vec3) -> Self {
        Self {
            normal,
            albedo,
            mer: Mer::unpack(mer),
        }
    }

    /// Returns reflectance at normal incidence, blended between dielectrics
    /// and metals.
    pub fn f0(&self) -> Vec3 {
        lerp(Vec3::splat(DIELECTRIC_F0), self.albedo, self.mer.metalness)
    }

    /// Returns GGX alpha (i.e. squared, clamped roughness).
    pub fn alpha(&self) -> f32 {
        self.mer.roughness.sqr().max(Self::MIN_ALPHA)
    }
}

/// Identifier of the material a ray has hit, as stored in triangle data.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct MaterialId(u32);

impl MaterialId {
    pub const GLASS: Self = Self(3);
    pub const WATER: Self = Self(4);

    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns whether rays can pass through this material.
    pub fn is_transmissive(self) -> bool {
        self == Self::GLASS || self == Self::WATER
    }

    /// Returns index of refraction; opaque materials report vacuum.
    pub fn ior(self) -> f32 {
        if self == Self::GLASS {
            1.5
        } else if self == Self::WATER {
            1.325
        } else {
            1.0
        }
    }

    /// Returns the fraction of light, per channel, that survives travelling
    /// one unit of distance inside this material.
    pub fn transmission_color(self) -> Vec3 {
        if self == Self::GLASS {
            vec3(0.9, 0.97, 0.95)
        } else if self == Self::WATER {
            vec3(0.55, 0.75, 0.8)
        } else {
            Vec3::ZERO
        }
    }
}
