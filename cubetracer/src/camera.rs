use std::f32::consts::PI;

use glam::{vec2, vec3, Mat4, Vec2, Vec3};

use crate::{gpu, ConfigError};

/// First-person camera, described by its position and yaw/pitch rotation.
#[derive(Clone, Debug)]
pub struct Camera {
    origin: Vec3,

    /// x - yaw
    /// y - pitch
    rotation: Vec2,

    fov: f32,
    aspect_ratio: f32,

    /// Projection-view matrix as of the previous frame
    prev_world_to_screen: Mat4,
}

impl Camera {
    pub const NEAR: f32 = 0.01;
    pub const FAR: f32 = 200.0;

    /// Pitch is clamped to `<-MAX_PITCH, MAX_PITCH>`, so that the camera never
    /// looks straight up or down.
    pub const MAX_PITCH: f32 = PI / 2.1;

    pub fn new(
        origin: Vec3,
        rotation: Vec2,
        fov: f32,
        aspect_ratio: f32,
    ) -> Result<Self, ConfigError> {
        Self::validate_fov(fov)?;

        let mut this = Self {
            origin,
            rotation: vec2(rotation.x, Self::clamp_pitch(rotation.y)),
            fov,
            aspect_ratio,
            prev_world_to_screen: Mat4::IDENTITY,
        };

        this.store_previous_view();

        Ok(this)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Vec3) {
        self.origin = origin;
    }

    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_fov(&mut self, fov: f32) -> Result<(), ConfigError> {
        Self::validate_fov(fov)?;

        self.fov = fov;

        Ok(())
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Rotates the camera by given yaw and pitch deltas.
    pub fn reorient(&mut self, delta: Vec2) {
        self.rotation += delta;
        self.rotation.y = Self::clamp_pitch(self.rotation.y);
    }

    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.rotation.x.sin_cos();
        let (sin_pitch, cos_pitch) = self.rotation.y.sin_cos();

        vec3(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.origin, self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov,
            self.aspect_ratio,
            Self::NEAR,
            Self::FAR,
        )
    }

    pub fn world_to_screen(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Remembers the current projection-view matrix, so that the next frame
    /// can reproject its points onto this one.
    pub fn store_previous_view(&mut self) {
        self.prev_world_to_screen = self.world_to_screen();
    }

    pub fn uniform(&self) -> gpu::Camera {
        gpu::Camera {
            screen_to_world: self.world_to_screen().inverse(),
            prev_world_to_screen: self.prev_world_to_screen,
            origin: self.origin.extend(0.0),
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "origin={}, rotation={}, fov={}, aspect_ratio={}",
            self.origin, self.rotation, self.fov, self.aspect_ratio
        )
    }

    fn validate_fov(fov: f32) -> Result<(), ConfigError> {
        if fov > 0.0 && fov < PI {
            Ok(())
        } else {
            Err(ConfigError::InvalidFov(fov))
        }
    }

    fn clamp_pitch(pitch: f32) -> f32 {
        pitch.clamp(-Self::MAX_PITCH, Self::MAX_PITCH)
    }
}
