use glam::Vec3;

use crate::core::camera::CameraPose;
use crate::material::Material;
use crate::render::draw::{DrawList, Primitive, Shading};
use crate::render::lighting::LightingState;
use crate::traits::controller::Button;
use crate::traits::scene::Scene;

const MIN_SEGMENTS: u32 = 3;
const SPOT_STEP_DEG: f32 = 5.0;

/// Grid of spheres cycling through the material presets under an
/// adjustable spotlight.
pub struct LightsScene {
    rows: u32,
    spin_rate: f32,
    angle: f32,
    light_on: bool,
    smooth: bool,
    spot_angle: f32,
    segments: u32,
}

impl LightsScene {
    pub fn new(rows: u32, spin_rate: f32) -> Self {
        Self {
            rows: rows.max(1),
            spin_rate,
            angle: 0.0,
            light_on: false,
            smooth: false,
            spot_angle: 60.0,
            segments: 16,
        }
    }

    pub fn is_light_on(&self) -> bool {
        self.light_on
    }

    pub fn is_smooth(&self) -> bool {
        self.smooth
    }

    pub fn spot_angle(&self) -> f32 {
        self.spot_angle
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }
}

impl Scene for LightsScene {
    fn name(&self) -> &str {
        "Grid of Lit Materials"
    }

    fn display(&self, draw: &mut DrawList) {
        let n = self.rows as f32;
        let half = (n - 1.0) / 2.0;
        let presets = Material::ALL;
        for r in 0..self.rows {
            for c in 0..self.rows {
                let material = presets[((r * self.rows + c) as usize) % presets.len()];
                let shading = if self.light_on {
                    Shading::Lit(material.params())
                } else {
                    Shading::Flat(material.flat_color())
                };
                draw.push();
                draw.translate(Vec3::new(
                    (c as f32 - half) * 2.0 / n,
                    -(r as f32 - half) * 2.0 / n,
                    0.0,
                ));
                draw.rotate_deg(self.angle, Vec3::Y);
                draw.draw(
                    Primitive::Sphere {
                        radius: 0.8 / n,
                        segments: self.segments,
                    },
                    shading,
                );
                draw.pop();
            }
        }
    }

    fn animate(&mut self, dt: f32) {
        self.angle += self.spin_rate * dt;
    }

    fn camera(&self) -> CameraPose {
        CameraPose::from_z(2.4)
    }

    fn lighting(&self) -> LightingState {
        LightingState {
            enabled: self.light_on,
            smooth: self.smooth,
            position: Vec3::new(0.0, 0.0, 1.0),
            spot_direction: Vec3::new(0.0, 0.0, -1.0),
            spot_cutoff_deg: self.spot_angle,
            ..LightingState::default()
        }
    }

    fn on_key_release(&mut self, key: Button) {
        match key {
            Button::KeyL => self.light_on = !self.light_on,
            Button::KeyS => self.smooth = !self.smooth,
            Button::Plus => self.spot_angle += SPOT_STEP_DEG,
            Button::Minus => self.spot_angle -= SPOT_STEP_DEG,
            Button::Comma => self.segments = self.segments.saturating_sub(1).max(MIN_SEGMENTS),
            Button::Period => self.segments += 1,
            _ => {}
        }
    }
}
