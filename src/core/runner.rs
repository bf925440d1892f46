use crate::core::frame::{FrameClock, FrameInfo};
use crate::core::input_adapter::WinitController;
use crate::render::draw::DrawList;
use crate::render::pick;
use crate::render::texture::TextureStore;
use crate::traits::scene::Scene;

/// Drives a scene's lifecycle: input dispatch, picking, animation, and
/// draw-list rebuild, in that order, once per frame. Owns no GPU state,
/// so the whole loop is testable headless; the renderer consumes
/// `draw_list()` afterwards.
pub struct SceneRunner {
    scene: Box<dyn Scene>,
    clock: FrameClock,
    controller: WinitController,
    draw: DrawList,
    viewport: (u32, u32),
}

impl SceneRunner {
    pub fn new(scene: Box<dyn Scene>, viewport: (u32, u32)) -> Self {
        Self {
            scene,
            clock: FrameClock::new(),
            controller: WinitController::new(),
            draw: DrawList::new(),
            viewport,
        }
    }

    /// Run the scene's one-time setup.
    pub fn init(&mut self, textures: &mut TextureStore) -> anyhow::Result<()> {
        self.scene.init(textures)
    }

    pub fn scene(&self) -> &dyn Scene {
        self.scene.as_ref()
    }

    pub fn controller_mut(&mut self) -> &mut WinitController {
        &mut self.controller
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    fn aspect(&self) -> f32 {
        if self.viewport.1 == 0 {
            1.0
        } else {
            self.viewport.0 as f32 / self.viewport.1 as f32
        }
    }

    /// Advance one frame. Clicks are resolved against the previous
    /// frame's draw list - the one the user saw when they pressed.
    pub fn advance(&mut self) -> FrameInfo {
        let frame = self.clock.tick();

        for key in self.controller.drain_released() {
            self.scene.on_key_release(key);
        }

        for cursor in self.controller.drain_clicks() {
            self.dispatch_click(cursor);
        }

        self.scene.animate(frame.delta);

        self.draw.clear();
        self.scene.display(&mut self.draw);

        frame
    }

    /// Pick against the current draw list and notify the scene when the
    /// click hit at least one named object. `on_select` is never invoked
    /// with an empty hit list.
    pub fn dispatch_click(&mut self, cursor: (f32, f32)) {
        let view_proj = self.scene.camera().view_proj(self.aspect());
        let (buffer, num_hits) = pick::pick(&self.draw, view_proj, cursor, self.viewport);
        if num_hits > 0 {
            self.scene.on_select(num_hits, &buffer);
        }
    }
}
