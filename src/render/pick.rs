//! Software selection query: the producer side of the picking contract.
//!
//! Replaces a GPU name-stack query. The cursor is unprojected into a
//! world-space segment from the near to the far plane; every named draw
//! command whose world bounds intersect that segment contributes one hit
//! record `[2, min_depth, max_depth, row, col]`. Depths are the segment
//! parameters quantized to `u32` - monotonic in view distance, which is
//! all the resolver compares.

use glam::{Mat4, Vec3, Vec4};

use crate::math::intersect_aabb_interval;
use crate::render::draw::DrawList;

/// Names pushed per grid object: row then column.
pub const GRID_NAME_WORDS: u32 = 2;

/// Run the query against one frame's draw list. Returns the flat
/// selection buffer and the hit count; zero hits means the click landed
/// on empty space and `on_select` must not be invoked.
pub fn pick(
    draw: &DrawList,
    view_proj: Mat4,
    cursor: (f32, f32),
    viewport: (u32, u32),
) -> (Vec<u32>, usize) {
    if viewport.0 == 0 || viewport.1 == 0 {
        return (Vec::new(), 0);
    }

    let ndc_x = 2.0 * cursor.0 / viewport.0 as f32 - 1.0;
    let ndc_y = 1.0 - 2.0 * cursor.1 / viewport.1 as f32;

    let inv = view_proj.inverse();
    let (near, far) = match (
        unproject(inv, ndc_x, ndc_y, 0.0),
        unproject(inv, ndc_x, ndc_y, 1.0),
    ) {
        (Some(near), Some(far)) => (near, far),
        _ => return (Vec::new(), 0),
    };

    // Unnormalized direction: t = 0 on the near plane, t = 1 on the far.
    let dir = far - near;

    let mut buffer = Vec::new();
    let mut num_hits = 0;
    for command in draw.commands() {
        let Some(cell) = command.name else { continue };
        let bounds = command.primitive.local_bounds().transformed(command.transform);
        let Some((t_enter, t_exit)) =
            intersect_aabb_interval(near, dir, bounds.min, bounds.max)
        else {
            continue;
        };
        if t_enter > 1.0 {
            // Entirely beyond the far plane.
            continue;
        }
        buffer.extend_from_slice(&[
            GRID_NAME_WORDS,
            quantize(t_enter),
            quantize(t_exit),
            cell.row,
            cell.col,
        ]);
        num_hits += 1;
    }
    (buffer, num_hits)
}

fn unproject(inv_view_proj: Mat4, ndc_x: f32, ndc_y: f32, ndc_z: f32) -> Option<Vec3> {
    let clip = Vec4::new(ndc_x, ndc_y, ndc_z, 1.0);
    let world = inv_view_proj * clip;
    if world.w.abs() < 1e-9 {
        return None;
    }
    Some(world.truncate() / world.w)
}

fn quantize(t: f32) -> u32 {
    (t.clamp(0.0, 1.0) as f64 * u32::MAX as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::CameraPose;
    use crate::math::Rgba;
    use crate::picking::{resolve, GridCell};
    use crate::render::draw::{Primitive, Shading};

    const VIEWPORT: (u32, u32) = (400, 400);

    fn center() -> (f32, f32) {
        (200.0, 200.0)
    }

    fn view_proj() -> Mat4 {
        CameraPose::from_z(5.0).view_proj(1.0)
    }

    fn named_cube_at(draw: &mut DrawList, cell: GridCell, z: f32) {
        draw.push();
        draw.translate(Vec3::new(0.0, 0.0, z));
        draw.set_name(Some(cell));
        draw.draw(Primitive::Cube { size: 1.0 }, Shading::Flat(Rgba::WHITE));
        draw.set_name(None);
        draw.pop();
    }

    #[test]
    fn test_center_click_hits_named_cube() {
        let mut draw = DrawList::new();
        named_cube_at(&mut draw, GridCell::new(1, 2), 0.0);

        let (buffer, hits) = pick(&draw, view_proj(), center(), VIEWPORT);
        assert_eq!(hits, 1);
        assert_eq!(buffer[0], GRID_NAME_WORDS);
        assert_eq!(&buffer[3..5], &[1, 2]);
        assert!(buffer[1] < buffer[2], "entry depth precedes exit depth");
    }

    #[test]
    fn test_corner_click_misses() {
        let mut draw = DrawList::new();
        named_cube_at(&mut draw, GridCell::new(0, 0), 0.0);

        let (_, hits) = pick(&draw, view_proj(), (2.0, 2.0), VIEWPORT);
        assert_eq!(hits, 0);
    }

    #[test]
    fn test_unnamed_commands_are_invisible_to_picking() {
        let mut draw = DrawList::new();
        draw.draw(Primitive::Cube { size: 1.0 }, Shading::Flat(Rgba::WHITE));

        let (_, hits) = pick(&draw, view_proj(), center(), VIEWPORT);
        assert_eq!(hits, 0);
    }

    #[test]
    fn test_nearer_cube_has_smaller_min_depth() {
        let mut draw = DrawList::new();
        // Record the far cube first so buffer order disagrees with depth.
        named_cube_at(&mut draw, GridCell::new(0, 0), -2.0);
        named_cube_at(&mut draw, GridCell::new(1, 1), 2.0);

        let (buffer, hits) = pick(&draw, view_proj(), center(), VIEWPORT);
        assert_eq!(hits, 2);
        let far_min = buffer[1];
        let near_min = buffer[6];
        assert!(near_min < far_min);

        // End-to-end with the resolver: the +Z cube is closer to the
        // camera at z = 5 and must win.
        assert_eq!(resolve(&buffer, hits).unwrap(), GridCell::new(1, 1));
    }

    #[test]
    fn test_zero_viewport_yields_no_hits() {
        let mut draw = DrawList::new();
        named_cube_at(&mut draw, GridCell::new(0, 0), 0.0);
        let (_, hits) = pick(&draw, view_proj(), center(), (0, 0));
        assert_eq!(hits, 0);
    }
}
