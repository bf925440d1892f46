pub mod cli;
pub mod core;
pub mod grid;
pub mod material;
pub mod math;
pub mod picking;
pub mod render;
pub mod scenes;
pub mod settings;
pub mod traits;

// Re-export the picking entry points and demo scenes.
pub use picking::{resolve, select, GridCell, PickError};
pub use scenes::{create_scene, LightsScene, SceneKind, SelectGridScene, TexturesScene};
