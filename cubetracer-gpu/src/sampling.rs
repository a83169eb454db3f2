use core::f32::consts::PI;

use glam::{vec2, vec3, Mat3, Vec2, Vec3};
#[cfg(target_arch = "spirv")]
use spirv_std::num_traits::Float;

/// Probability density of picking any given direction on a hemisphere when
/// sampling it uniformly.
pub const UNIFORM_HEMISPHERE_PDF: f32 = 1.0 / (2.0 * PI);

/// Strategy of distributing directions on a hemisphere.
///
/// Each variant carries its own probability density, so that the estimator
/// always divides by the density of the sampler that actually produced the
/// direction.
#[repr(u32)]
#[derive(Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub enum HemisphereSampling {
    #[default]
    Cosine = 0,
    Uniform = 1,
}

impl HemisphereSampling {
    pub fn from_u32(value: u32) -> Self {
        if value == Self::Uniform as u32 {
            Self::Uniform
        } else {
            Self::Cosine
        }
    }

    /// Returns a world-space direction on the hemisphere around `normal`.
    pub fn sample(self, normal: Vec3, uv: Vec2) -> Vec3 {
        let dir = match self {
            HemisphereSampling::Cosine => sample_cosine_hemisphere(uv),
            HemisphereSampling::Uniform => sample_uniform_hemisphere(uv),
        };

        (orthonormal_basis(normal) * dir).normalize()
    }

    /// Returns probability density of sampling a direction that's `cos_theta`
    /// away from the normal.
    pub fn pdf(self, cos_theta: f32) -> f32 {
        match self {
            HemisphereSampling::Cosine => cos_theta.max(0.0) / PI,
            HemisphereSampling::Uniform => UNIFORM_HEMISPHERE_PDF,
        }
    }
}

/// Maps two uniform samples into a cosine-weighted direction on the local +Y
/// hemisphere (Malley's method).
pub fn sample_cosine_hemisphere(uv: Vec2) -> Vec3 {
    let theta = 2.0 * PI * uv.x;
    let r = uv.y.sqrt();
    let disk = vec2(theta.cos(), theta.sin()) * r;

    vec3(disk.x, (1.0 - disk.dot(disk)).max(0.0).sqrt(), disk.y)
}

/// Maps two uniform samples into a uniformly distributed direction on the
/// local +Y hemisphere.
pub fn sample_uniform_hemisphere(uv: Vec2) -> Vec3 {
    let y = uv.x;
    let r = (1.0 - y * y).max(0.0).sqrt();
    let phi = 2.0 * PI * uv.y;

    vec3(r * phi.cos(), y, r * phi.sin())
}

/// Like [`sample_cosine_hemisphere()`], but around given world-space normal.
pub fn sample_cosine_hemisphere_around(normal: Vec3, uv: Vec2) -> Vec3 {
    (orthonormal_basis(normal) * sample_cosine_hemisphere(uv)).normalize()
}

/// Builds an orthonormal basis out of given unit normal, using Frisvad's
/// method; the normal lands in the second column (the local +Y axis).
///
/// See: https://github.com/NVIDIA/Q2RTX/blob/master/src/refresh/vkpt/shader/utils.glsl
pub fn orthonormal_basis(normal: Vec3) -> Mat3 {
    if normal.z < -0.999805696 {
        return Mat3::from_cols(
            vec3(0.0, -1.0, 0.0),
            normal,
            vec3(-1.0, 0.0, 0.0),
        );
    }

    let a = 1.0 / (1.0 + normal.z);
    let b = -normal.x * normal.y * a;

    Mat3::from_cols(
        vec3(1.0 - normal.x * normal.x * a, b, -normal.x),
        normal,
        vec3(b, 1.0 - normal.y * normal.y * a, -normal.y),
    )
}

/// Samples a half-vector from the distribution of GGX normals visible from
/// given direction.
///
/// `incoming` is the direction of the ray arriving at the surface (i.e. it
/// points *towards* the surface) and `basis` comes from
/// [`orthonormal_basis()`].
///
/// See: Eric Heitz, Sampling the GGX Distribution of Visible Normals, JCGT 2018
pub fn sample_ggx_vndf(
    uv: Vec2,
    alpha: f32,
    incoming: Vec3,
    basis: Mat3,
) -> Vec3 {
    let ve = -vec3(
        incoming.dot(basis.x_axis),
        incoming.dot(basis.z_axis),
        incoming.dot(basis.y_axis),
    );

    let vh = vec3(alpha * ve.x, alpha * ve.y, ve.z).normalize();
    let lensq = vh.x * vh.x + vh.y * vh.y;

    let t1 = if lensq > 0.0 {
        vec3(-vh.y, vh.x, 0.0) * (1.0 / lensq.sqrt())
    } else {
        vec3(1.0, 0.0, 0.0)
    };

    let t2 = vh.cross(t1);

    let r = uv.x.sqrt();
    let phi = 2.0 * PI * uv.y;
    let p1 = r * phi.cos();
    let p2 = r * phi.sin();
    let s = 0.5 * (1.0 + vh.z);
    let p2 = (1.0 - s) * (1.0 - p1 * p1).sqrt() + s * p2;

    let nh = p1 * t1 + p2 * t2 + (1.0 - p1 * p1 - p2 * p2).max(0.0).sqrt() * vh;
    let ne = vec3(alpha * nh.x, nh.z.max(0.0), alpha * nh.y);

    (basis * ne).normalize()
}
