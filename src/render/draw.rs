use glam::{Mat4, Vec3};

use crate::material::MaterialParams;
use crate::math::{Aabb, Rgba};
use crate::picking::GridCell;
use crate::render::texture::TextureId;

/// Renderable primitive shapes. Sizes are in model units before the
/// draw-list transform is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Cube { size: f32 },
    Sphere { radius: f32, segments: u32 },
    /// Quad in the XY plane facing +Z.
    Quad { half_width: f32, half_height: f32 },
}

impl Primitive {
    /// Bounds in model space, before the command transform.
    pub fn local_bounds(&self) -> Aabb {
        match *self {
            Primitive::Cube { size } => Aabb::centered_cube(size),
            Primitive::Sphere { radius, .. } => Aabb::centered_cube(radius * 2.0),
            Primitive::Quad {
                half_width,
                half_height,
            } => Aabb::new(
                Vec3::new(-half_width, -half_height, 0.0),
                Vec3::new(half_width, half_height, 0.0),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shading {
    /// Unlit constant color.
    Flat(Rgba),
    /// Lit material parameters.
    Lit(MaterialParams),
    /// Lit, with diffuse color sampled from a texture.
    Textured(TextureId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub primitive: Primitive,
    pub transform: Mat4,
    pub shading: Shading,
    /// Name-stack identity; only named commands participate in picking.
    pub name: Option<GridCell>,
}

/// Retained list of draw commands built fresh each frame by a scene's
/// `display` hook. Carries a transform stack with push/pop semantics and a
/// current pick name, so scenes read like the immediate-mode original.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    stack: Vec<Mat4>,
    current: Mat4,
    name: Option<GridCell>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            stack: Vec::new(),
            current: Mat4::IDENTITY,
            name: None,
        }
    }

    /// Reset to an empty list with an identity transform and no name.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.stack.clear();
        self.current = Mat4::IDENTITY;
        self.name = None;
    }

    pub fn push(&mut self) {
        self.stack.push(self.current);
    }

    pub fn pop(&mut self) {
        match self.stack.pop() {
            Some(m) => self.current = m,
            None => log::warn!("transform stack underflow, pop ignored"),
        }
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.current *= Mat4::from_translation(offset);
    }

    pub fn rotate_deg(&mut self, angle_deg: f32, axis: Vec3) {
        self.current *= Mat4::from_axis_angle(axis.normalize(), angle_deg.to_radians());
    }

    /// Name attached to subsequent commands until changed.
    pub fn set_name(&mut self, name: Option<GridCell>) {
        self.name = name;
    }

    pub fn draw(&mut self, primitive: Primitive, shading: Shading) {
        self.commands.push(DrawCommand {
            primitive,
            transform: self.current,
            shading,
            name: self.name,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> Primitive {
        Primitive::Cube { size: 1.0 }
    }

    #[test]
    fn test_pop_restores_transform() {
        let mut draw = DrawList::new();
        draw.translate(Vec3::new(1.0, 0.0, 0.0));
        draw.push();
        draw.translate(Vec3::new(0.0, 2.0, 0.0));
        draw.pop();
        draw.draw(unit_cube(), Shading::Flat(Rgba::WHITE));

        let origin = draw.commands()[0].transform.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_nested_transforms_compose() {
        let mut draw = DrawList::new();
        draw.translate(Vec3::new(1.0, 0.0, 0.0));
        draw.push();
        draw.translate(Vec3::new(0.0, 2.0, 0.0));
        draw.draw(unit_cube(), Shading::Flat(Rgba::WHITE));
        draw.pop();

        let origin = draw.commands()[0].transform.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_pop_on_empty_stack_is_ignored() {
        let mut draw = DrawList::new();
        draw.pop();
        draw.draw(unit_cube(), Shading::Flat(Rgba::WHITE));
        assert_eq!(draw.commands()[0].transform, Mat4::IDENTITY);
    }

    #[test]
    fn test_names_apply_to_subsequent_commands() {
        let mut draw = DrawList::new();
        draw.draw(unit_cube(), Shading::Flat(Rgba::WHITE));
        draw.set_name(Some(GridCell::new(1, 2)));
        draw.draw(unit_cube(), Shading::Flat(Rgba::WHITE));
        draw.set_name(None);
        draw.draw(unit_cube(), Shading::Flat(Rgba::WHITE));

        assert_eq!(draw.commands()[0].name, None);
        assert_eq!(draw.commands()[1].name, Some(GridCell::new(1, 2)));
        assert_eq!(draw.commands()[2].name, None);
    }

    #[test]
    fn test_clear_resets_state() {
        let mut draw = DrawList::new();
        draw.push();
        draw.translate(Vec3::ONE);
        draw.set_name(Some(GridCell::new(0, 0)));
        draw.draw(unit_cube(), Shading::Flat(Rgba::WHITE));
        draw.clear();

        assert!(draw.is_empty());
        draw.draw(unit_cube(), Shading::Flat(Rgba::WHITE));
        assert_eq!(draw.commands()[0].transform, Mat4::IDENTITY);
        assert_eq!(draw.commands()[0].name, None);
    }

    #[test]
    fn test_quad_bounds_are_flat() {
        let bounds = Primitive::Quad {
            half_width: 1.0,
            half_height: 0.5,
        }
        .local_bounds();
        assert_eq!(bounds.min.z, 0.0);
        assert_eq!(bounds.max.z, 0.0);
        assert_eq!(bounds.max.y, 0.5);
    }
}
