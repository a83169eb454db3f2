use glam::{vec3, Vec3};
#[cfg(target_arch = "spirv")]
use spirv_std::num_traits::Float;

pub trait Vec3Ext
where
    Self: Sized,
{
    /// Reflects this direction-vector around `other`.
    fn reflect(self, other: Self) -> Self;

    /// Refracts this direction-vector through a surface with given normal and
    /// ratio of indices of refraction (`n1 / n2`).
    ///
    /// Returns [`Vec3::ZERO`] on total internal reflection.
    fn refract(self, normal: Self, eta: f32) -> Self;

    /// Applies `exp()` on each component.
    fn exp(self) -> Self;

    /// Applies natural logarithm on each component.
    fn ln(self) -> Self;
}

impl Vec3Ext for Vec3 {
    fn reflect(self, other: Self) -> Self {
        self - 2.0 * other.dot(self) * other
    }

    fn refract(self, normal: Self, eta: f32) -> Self {
        let n_o_i = normal.dot(self);
        let k = 1.0 - eta * eta * (1.0 - n_o_i * n_o_i);

        if k < 0.0 {
            Vec3::ZERO
        } else {
            eta * self - (eta * n_o_i + k.sqrt()) * normal
        }
    }

    fn exp(self) -> Self {
        vec3(self.x.exp(), self.y.exp(), self.z.exp())
    }

    fn ln(self) -> Self {
        vec3(self.x.ln(), self.y.ln(), self.z.ln())
    }
}
