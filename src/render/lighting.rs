use glam::Vec3;

use crate::math::Rgba;

/// Per-scene lighting snapshot returned by the `lighting` hook. Explicit
/// state instead of mutable renderer globals, so input handling and
/// rendering stay decoupled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingState {
    pub enabled: bool,
    /// Smooth (per-pixel) vs. flat (per-face) shading.
    pub smooth: bool,
    pub position: Vec3,
    pub spot_direction: Vec3,
    /// Half-angle of the spot cone in degrees; 180 disables the cone.
    pub spot_cutoff_deg: f32,
    pub diffuse: Rgba,
}

impl Default for LightingState {
    fn default() -> Self {
        Self {
            enabled: false,
            smooth: true,
            position: Vec3::new(0.0, 0.0, 1.0),
            spot_direction: Vec3::new(0.0, 0.0, -1.0),
            spot_cutoff_deg: 180.0,
            diffuse: Rgba::WHITE,
        }
    }
}

impl LightingState {
    /// Point light with no spot cone.
    pub fn point(position: Vec3, diffuse: Rgba) -> Self {
        Self {
            enabled: true,
            position,
            diffuse,
            ..Self::default()
        }
    }
}
