#[cfg(target_arch = "spirv")]
use spirv_std::num_traits::Float;

pub trait F32Ext
where
    Self: Sized,
{
    fn sqr(self) -> Self;
    fn saturate(self) -> Self;

    /// GLSL's `fract()`, i.e. `x - floor(x)`; note that it differs from Rust's
    /// `f32::fract()` for negative numbers.
    fn fract_glsl(self) -> Self;
}

impl F32Ext for f32 {
    fn sqr(self) -> Self {
        self * self
    }

    fn saturate(self) -> Self {
        self.clamp(0.0, 1.0)
    }

    fn fract_glsl(self) -> Self {
        self - self.floor()
    }
}
