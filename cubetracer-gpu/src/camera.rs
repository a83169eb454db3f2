use bytemuck::{Pod, Zeroable};
use glam::{vec2, Mat4, Vec2, Vec3, Vec4, Vec4Swizzles};

#[repr(C)]
#[derive(Clone, Copy, Default, Pod, Zeroable)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct Camera {
    /// Maps normalized device coordinates back into world-coordinates.
    pub screen_to_world: Mat4,

    /// Previous frame's projection-view matrix; used to find where given
    /// point was on the screen a frame ago.
    pub prev_world_to_screen: Mat4,

    /// x - origin x
    /// y - origin y
    /// z - origin z
    /// w - unused
    pub origin: Vec4,
}

impl Camera {
    pub fn origin(&self) -> Vec3 {
        self.origin.xyz()
    }

    /// Returns direction from the camera towards given point.
    pub fn view_direction(&self, hit_point: Vec3) -> Vec3 {
        (hit_point - self.origin()).normalize()
    }

    /// Returns direction of the primary ray going through given point, with
    /// `uv` in `<0.0, 1.0>` (`(0, 0)` being the top-left corner).
    pub fn ray_direction(&self, uv: Vec2) -> Vec3 {
        let ndc = uv * 2.0 - Vec2::ONE;
        let ndc = vec2(ndc.x, -ndc.y);
        let target = self.screen_to_world.project_point3(ndc.extend(1.0));

        (target - self.origin()).normalize()
    }

    /// Given a point in world-coordinates, returns where it was on the screen
    /// during the previous frame, as `uv` in `<0.0, 1.0>`.
    ///
    /// Only projects through `prev_world_to_screen`; fetching and blending the
    /// history is up to the caller. Points behind the previous camera yield
    /// `None`.
    pub fn prev_screen_position(&self, point: Vec3) -> Option<Vec2> {
        let clip = self.prev_world_to_screen * point.extend(1.0);

        if clip.w <= 0.0 {
            return None;
        }

        let ndc = clip.xy() / clip.w;
        let ndc = vec2(ndc.x, -ndc.y);

        Some(0.5 * ndc + 0.5)
    }
}
