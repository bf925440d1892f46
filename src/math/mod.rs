mod aabb;
mod color;
mod ray;

pub use aabb::Aabb;
pub use color::{hsv_to_rgb, Rgba};
pub use ray::intersect_aabb_interval;
