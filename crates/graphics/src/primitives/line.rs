use color::{PremulColor, Srgb};
use euclid::default::{Box2D, Point2D};
use lyon::geom::LineSegment;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, LineCap, StrokeOptions, StrokeTessellator, StrokeVertex, VertexBuffers,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Mesh, Vertex};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Options {
    pub color: PremulColor<Srgb>,
    pub width: f32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            color: PremulColor::new([1., 1., 1., 1.]),
            width: 2.,
        }
    }
}

/// A straight segment with round caps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub from: Point2D<f32>,
    pub to: Point2D<f32>,
    pub options: Options,
}

impl Line {
    pub const fn new(from: Point2D<f32>, to: Point2D<f32>, options: Options) -> Self {
        Self { from, to, options }
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Area covered by the stroke, caps included.
    pub fn bounds(&self) -> Box2D<f32> {
        let half = self.options.width / 2.;
        Box2D::from_points([self.from, self.to]).inflate(half, half)
    }

    pub fn tessellate(&self) -> Mesh<Vertex> {
        let mut path = Path::builder();
        path.add_line_segment(&LineSegment {
            from: self.from,
            to: self.to,
        });
        let path = path.build();

        let color = self.options.color;
        let mut buffers = VertexBuffers::<Vertex, u32>::new();
        let mut builder = BuffersBuilder::new(&mut buffers, |vertex: StrokeVertex<'_, '_>| {
            Vertex::solid(vertex.position(), color)
        });
        let stroke = StrokeOptions::default()
            .with_line_width(self.options.width)
            .with_line_cap(LineCap::Round);
        if let Err(err) = StrokeTessellator::new().tessellate_path(&path, &stroke, &mut builder) {
            warn!("Error while tessellating {self:?}: {err}");
        }
        buffers.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_within_its_bounds() {
        let line = Line::new(Point2D::new(5., 5.), Point2D::new(20., 40.), Options::default());
        let mesh = line.tessellate();
        assert!(!mesh.is_empty());

        // Round caps are approximated by polygons, allow a little slack.
        let bounds = line.bounds().inflate(0.01, 0.01);
        for vertex in &mesh.vertices {
            let point = Point2D::new(vertex.position[0], vertex.position[1]);
            assert!(bounds.contains(point), "{point:?} escapes {bounds:?}");
        }
    }

    #[test]
    fn zero_length_line_is_empty() {
        let line = Line::new(Point2D::new(5., 5.), Point2D::new(5., 5.), Options::default());
        assert!(line.is_empty());
    }
}
