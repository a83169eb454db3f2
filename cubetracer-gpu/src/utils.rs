mod f32_ext;
mod vec3_ext;

use core::ops;

pub use self::f32_ext::*;
pub use self::vec3_ext::*;

/// Linear interpolation between `a` and `b`, with `t` clamped to `<0.0, 1.0>`
/// (GLSL's `mix()`).
pub fn lerp<T>(a: T, b: T, t: f32) -> T
where
    T: ops::Add<Output = T>,
    T: ops::Sub<Output = T>,
    T: ops::Mul<f32, Output = T>,
    T: Copy,
{
    a + (b - a) * t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    #[test]
    fn lerp_clamps_factor() {
        assert_eq!(2.0, lerp(2.0, 4.0, -1.0));
        assert_eq!(3.0, lerp(2.0, 4.0, 0.5));
        assert_eq!(4.0, lerp(2.0, 4.0, 3.0));

        assert_eq!(
            vec3(0.5, 1.0, 1.5),
            lerp(glam::Vec3::ZERO, vec3(1.0, 2.0, 3.0), 0.5)
        );
    }
}
