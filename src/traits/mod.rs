pub mod controller;
pub mod scene;

pub use controller::*;
pub use scene::*;
