use glam::Vec3;

use crate::core::camera::CameraPose;
use crate::grid::ColorGrid;
use crate::math::Rgba;
use crate::picking::{self, GridCell};
use crate::render::draw::{DrawList, Primitive, Shading};
use crate::traits::scene::Scene;

/// Grid of spinning cubes where a click selects the closest cube under
/// the cursor and nudges its color toward red.
pub struct SelectGridScene {
    rows: u32,
    spin_rate: f32,
    angle: f32,
    colors: ColorGrid,
}

impl SelectGridScene {
    pub fn new(rows: u32, spin_rate: f32) -> Self {
        let rows = rows.max(1);
        Self {
            rows,
            spin_rate,
            angle: 0.0,
            colors: Self::initial_colors(rows),
        }
    }

    /// Red on every third column, green on the next, blue everywhere.
    fn initial_colors(rows: u32) -> ColorGrid {
        ColorGrid::from_fn(rows, rows, |_r, c| {
            Rgba::opaque(
                if c % 3 == 0 { 1.0 } else { 0.0 },
                if c % 3 == 1 { 1.0 } else { 0.0 },
                1.0,
            )
        })
    }

    fn draw_order(&self) -> Vec<u32> {
        // Keep objects sorted so closest is always drawn first.
        if self.angle.rem_euclid(360.0) > 180.0 {
            (0..self.rows).rev().collect()
        } else {
            (0..self.rows).collect()
        }
    }

    pub fn colors(&self) -> &ColorGrid {
        &self.colors
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }
}

impl Scene for SelectGridScene {
    fn name(&self) -> &str {
        "Select Grid"
    }

    fn display(&self, draw: &mut DrawList) {
        draw.rotate_deg(self.angle, Vec3::X);
        let n = self.rows as f32;
        let half = (n - 1.0) / 2.0;
        let order = self.draw_order();
        for &r in &order {
            for &c in &order {
                // Name objects according to location in grid.
                draw.set_name(Some(GridCell::new(r, c)));
                let color = self.colors.get(r, c).unwrap_or(Rgba::WHITE);
                draw.push();
                draw.translate(Vec3::new(
                    (r as f32 - half) * 2.0 / n,
                    (c as f32 - half) * 2.0 / n,
                    0.0,
                ));
                draw.rotate_deg(self.angle, Vec3::Y);
                draw.draw(Primitive::Cube { size: 0.8 / n }, Shading::Flat(color));
                draw.pop();
            }
        }
        draw.set_name(None);
    }

    fn animate(&mut self, dt: f32) {
        self.angle += self.spin_rate * dt;
    }

    fn camera(&self) -> CameraPose {
        CameraPose::from_z(2.5)
    }

    fn on_select(&mut self, num_hits: usize, buffer: &[u32]) {
        if let Err(err) = picking::select(buffer, num_hits, &mut self.colors) {
            log::warn!("selection ignored: {err}");
        }
    }
}
