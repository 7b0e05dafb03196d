//! Draw commands and their tessellation into gpu ready meshes.
use euclid::default::Box2D;

pub mod draw_list;
pub mod mesh;
pub mod primitives;
pub mod systems;

pub use draw_list::{DrawCommand, DrawList};
pub use mesh::{Mesh, Paint, Vertex};
pub use systems::{Systems, SystemsOwned};

/// Orders the corners of `area` so that `min` is the top left and `max` the bottom right.
pub const fn normalized(mut area: Box2D<f32>) -> Box2D<f32> {
    if area.min.x > area.max.x {
        std::mem::swap(&mut area.min.x, &mut area.max.x);
    }
    if area.min.y > area.max.y {
        std::mem::swap(&mut area.min.y, &mut area.max.y);
    }
    area
}
