use std::f32::consts::PI;

use glam::{vec3, Vec3};

use crate::{atmosphere, gpu};

#[derive(Clone, Debug)]
pub struct Sun {
    /// Direction the sunlight travels in
    direction: Vec3,

    /// Phase of the day-night cycle, in `<0.0, CYCLE_LENGTH)`
    cycle: f32,
}

impl Sun {
    /// Length of a full day-night cycle; the sun spends `PI` of it above the
    /// horizon.
    pub const CYCLE_LENGTH: f32 = PI * 1.2;

    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: direction.normalize(),
            cycle: 0.0,
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction.normalize();
    }

    /// Advances the day-night cycle by `dt` seconds.
    pub fn light_cycle(&mut self, dt: f32) {
        self.cycle = (self.cycle + dt / 4.0).rem_euclid(Self::CYCLE_LENGTH);

        let x = self.cycle.cos();
        let y = -self.cycle.sin();

        self.direction = vec3(x, y, x * y).normalize();
    }

    pub fn color(&self) -> Vec3 {
        atmosphere::sun_color(self.direction)
    }

    pub fn uniform(&self) -> gpu::Sun {
        gpu::Sun {
            direction: self.direction.extend(0.0),
            color: self.color().extend(0.0),
        }
    }
}

impl Default for Sun {
    fn default() -> Self {
        Self::new(vec3(-0.7, -1.5, -1.1))
    }
}
