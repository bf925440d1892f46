mod lights;
mod select_grid;
mod textures;

pub use lights::LightsScene;
pub use select_grid::SelectGridScene;
pub use textures::TexturesScene;

use clap::ValueEnum;

use crate::traits::scene::Scene;

/// Which demo to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    Lights,
    SelectGrid,
    Textures,
}

/// Construct a demo scene. `rows` overrides the per-demo default grid
/// size where the demo has one.
pub fn create_scene(kind: SceneKind, rows: Option<u32>, spin_rate: f32) -> Box<dyn Scene> {
    match kind {
        SceneKind::Lights => Box::new(LightsScene::new(rows.unwrap_or(4), spin_rate)),
        SceneKind::SelectGrid => Box::new(SelectGridScene::new(rows.unwrap_or(3), spin_rate)),
        SceneKind::Textures => Box::new(TexturesScene::new(spin_rate)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_builds_each_demo() {
        assert_eq!(
            create_scene(SceneKind::Lights, None, 60.0).name(),
            "Grid of Lit Materials"
        );
        assert_eq!(
            create_scene(SceneKind::SelectGrid, None, 60.0).name(),
            "Select Grid"
        );
        assert_eq!(
            create_scene(SceneKind::Textures, None, 60.0).name(),
            "Textures"
        );
    }
}
