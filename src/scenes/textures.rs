use std::path::Path;

use glam::Vec3;

use crate::core::camera::CameraPose;
use crate::math::Rgba;
use crate::render::draw::{DrawList, Primitive, Shading};
use crate::render::lighting::LightingState;
use crate::render::texture::{TextureId, TextureStore};
use crate::traits::controller::Button;
use crate::traits::scene::Scene;

const TEXTURE_FILES: [&str; 3] = [
    "assets/textures/earth.png",
    "assets/textures/checkerboard.jpg",
    "assets/textures/sky.png",
];
const SPHERE_SEGMENTS: u32 = 20;
const FALLBACK_SIZE: u32 = 256;

/// One spinning textured primitive with switchable geometry and texture.
pub struct TexturesScene {
    spin_rate: f32,
    angle: f32,
    slots: Vec<TextureId>,
    current: usize,
    sphere: bool,
}

impl TexturesScene {
    pub fn new(spin_rate: f32) -> Self {
        Self {
            spin_rate,
            angle: 0.0,
            slots: Vec::new(),
            current: 0,
            sphere: false,
        }
    }

    pub fn is_sphere(&self) -> bool {
        self.sphere
    }

    pub fn current_slot(&self) -> usize {
        self.current
    }

    pub fn slots(&self) -> &[TextureId] {
        &self.slots
    }

    fn select_slot(&mut self, slot: usize) {
        if slot < self.slots.len() {
            self.current = slot;
        }
    }
}

impl Scene for TexturesScene {
    fn name(&self) -> &str {
        "Textures"
    }

    /// Load textures from disk ONCE; a missing file gets a procedural
    /// stand-in rather than aborting the demo.
    fn init(&mut self, textures: &mut TextureStore) -> anyhow::Result<()> {
        self.slots.clear();
        for (slot, file) in TEXTURE_FILES.iter().enumerate() {
            let id = match textures.load_file(Path::new(file)) {
                Ok(id) => id,
                Err(err) => {
                    log::warn!("unable to load texture image {file}: {err:#}");
                    if slot == 1 {
                        textures.add_checkerboard(FALLBACK_SIZE, 8, Rgba::WHITE, Rgba::BLACK)
                    } else {
                        textures.add_gradient(FALLBACK_SIZE)
                    }
                }
            };
            self.slots.push(id);
        }
        self.current = 0;
        self.angle = 0.0;
        Ok(())
    }

    fn display(&self, draw: &mut DrawList) {
        let Some(&texture) = self.slots.get(self.current) else {
            return;
        };
        draw.rotate_deg(self.angle, Vec3::Y);
        if self.sphere {
            // Poles up, matching the equirectangular images.
            draw.rotate_deg(-90.0, Vec3::X);
            draw.draw(
                Primitive::Sphere {
                    radius: 1.0,
                    segments: SPHERE_SEGMENTS,
                },
                Shading::Textured(texture),
            );
        } else {
            draw.draw(
                Primitive::Quad {
                    half_width: 1.0,
                    half_height: 1.0,
                },
                Shading::Textured(texture),
            );
        }
    }

    fn animate(&mut self, dt: f32) {
        self.angle += self.spin_rate * dt;
    }

    fn camera(&self) -> CameraPose {
        CameraPose::from_z(4.0)
    }

    fn lighting(&self) -> LightingState {
        LightingState::point(Vec3::new(2.0, 0.0, 4.0), Rgba::WHITE)
    }

    fn on_key_release(&mut self, key: Button) {
        match key {
            Button::KeyS => self.sphere = true,
            Button::KeyR => self.sphere = false,
            Button::Digit1 => self.select_slot(0),
            Button::Digit2 => self.select_slot(1),
            Button::Digit3 => self.select_slot(2),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initialized_scene() -> (TexturesScene, TextureStore) {
        let mut scene = TexturesScene::new(60.0);
        let mut store = TextureStore::new();
        // Asset files are absent in tests, so every slot falls back.
        scene.init(&mut store).unwrap();
        (scene, store)
    }

    #[test]
    fn test_init_fills_every_slot() {
        let (scene, store) = initialized_scene();
        assert_eq!(scene.slots().len(), 3);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_geometry_switches_between_quad_and_sphere() {
        let (mut scene, _store) = initialized_scene();
        let mut draw = DrawList::new();
        scene.display(&mut draw);
        assert!(matches!(
            draw.commands()[0].primitive,
            Primitive::Quad { .. }
        ));

        scene.on_key_release(Button::KeyS);
        let mut draw = DrawList::new();
        scene.display(&mut draw);
        assert!(matches!(
            draw.commands()[0].primitive,
            Primitive::Sphere { .. }
        ));

        scene.on_key_release(Button::KeyR);
        assert!(!scene.is_sphere());
    }

    #[test]
    fn test_digit_keys_select_slots() {
        let (mut scene, _store) = initialized_scene();
        scene.on_key_release(Button::Digit3);
        assert_eq!(scene.current_slot(), 2);
        scene.on_key_release(Button::Digit1);
        assert_eq!(scene.current_slot(), 0);
    }

    #[test]
    fn test_display_before_init_draws_nothing() {
        let scene = TexturesScene::new(60.0);
        let mut draw = DrawList::new();
        scene.display(&mut draw);
        assert!(draw.is_empty());
    }
}
