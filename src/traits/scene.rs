use crate::core::camera::CameraPose;
use crate::render::draw::DrawList;
use crate::render::lighting::LightingState;
use crate::render::texture::TextureStore;
use crate::traits::controller::Button;

/// Scene lifecycle abstraction. Demos implement this and are composed into
/// the runner; the harness owns the loop and calls the hooks.
pub trait Scene {
    /// Scene name, used for the window title and debugging.
    fn name(&self) -> &str;

    /// One-time setup once a rendering context exists, in place of work the
    /// constructor cannot do (e.g. decoding textures).
    fn init(&mut self, _textures: &mut TextureStore) -> anyhow::Result<()> {
        Ok(())
    }

    /// Record all of the objects to display for the current state.
    fn display(&self, draw: &mut DrawList);

    /// Advance animation state by `dt` seconds.
    fn animate(&mut self, dt: f32);

    /// The camera's view of the scene.
    fn camera(&self) -> CameraPose;

    /// The lights in the scene.
    fn lighting(&self) -> LightingState {
        LightingState::default()
    }

    /// Called when a key is released within the window.
    fn on_key_release(&mut self, _key: Button) {}

    /// Called when a pointer press hits at least one named object.
    /// `buffer` is the flat selection buffer described in `crate::picking`;
    /// `num_hits` is always >= 1.
    fn on_select(&mut self, _num_hits: usize, _buffer: &[u32]) {}
}
