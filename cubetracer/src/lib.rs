//! Host side of cubetracer: configuration, per-frame uniforms and the layout of
//! images shared between the path-tracing passes.

pub mod atmosphere;
mod caches;
mod camera;
mod config;
mod error;
mod reference;
mod sun;

use glam::{UVec2, Vec2, Vec3};
use log::{debug, info};
use rand::Rng;

pub use cubetracer_gpu as gpu;

pub use self::caches::*;
pub use self::camera::*;
pub use self::config::*;
pub use self::error::*;
pub use self::reference::*;
pub use self::sun::*;

#[derive(Debug)]
pub struct Engine {
    config: Config,
    caches: CacheLayout,
    camera: Camera,
    sun: Sun,
    frame: u32,
}

impl Engine {
    pub const DEFAULT_FOV: f32 = std::f32::consts::FRAC_PI_3;

    pub fn new(config: Config) -> Result<Self> {
        info!("Initializing");

        let config = config.validated()?;
        let caches = CacheLayout::cubetracer()?;

        let camera = Camera::new(
            Vec3::ZERO,
            Vec2::ZERO,
            Self::DEFAULT_FOV,
            config.aspect_ratio(),
        )?;

        info!(
            "Engine ready; resolution={}, cache-slots={}, camera: {}",
            config.resolution,
            caches.len(),
            camera.describe()
        );

        Ok(Self {
            config,
            caches,
            camera,
            sun: Default::default(),
            frame: 0,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn caches(&self) -> &CacheLayout {
        &self.caches
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn sun(&self) -> &Sun {
        &self.sun
    }

    pub fn sun_mut(&mut self) -> &mut Sun {
        &mut self.sun
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Changes the shading configuration; takes effect from the next frame.
    pub fn set_shading(&mut self, shading: ShadingConfig) -> Result<()> {
        self.config.shading = shading.validated()?;

        Ok(())
    }

    pub fn resize(&mut self, resolution: UVec2) -> Result<()> {
        let config = Config {
            resolution,
            ..self.config.clone()
        };

        self.config = config.validated()?;
        self.camera.set_aspect_ratio(self.config.aspect_ratio());

        info!("Resized to {}", resolution);

        Ok(())
    }

    /// Prepares uniforms for the next frame.
    ///
    /// Swaps double-buffered cache images (except for the very first frame,
    /// which has no history), draws a fresh random seed and remembers the
    /// camera's current view, so that the next frame can reproject onto it.
    pub fn begin_frame(&mut self) -> FrameUniforms {
        if self.frame > 0 {
            self.caches.swap();
        }

        let seed = rand::thread_rng().gen();
        let camera = self.camera.uniform();
        let sun = self.sun.uniform();
        let params = self.config.shading.serialize(seed, self.frame);

        debug!(
            "Beginning frame {}; seed={seed}, alternate={}",
            self.frame,
            self.caches.alternate()
        );

        self.camera.store_previous_view();
        self.frame = self.frame.wrapping_add(1);

        FrameUniforms {
            camera,
            sun,
            params,
        }
    }
}

/// Everything the shaders need to know about a frame, ready to be uploaded.
#[derive(Clone, Copy, Debug)]
pub struct FrameUniforms {
    pub camera: gpu::Camera,
    pub sun: gpu::Sun,
    pub params: gpu::ShadingParams,
}

impl FrameUniforms {
    pub fn camera_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.camera)
    }

    pub fn sun_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.sun)
    }

    pub fn params_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.params)
    }
}
