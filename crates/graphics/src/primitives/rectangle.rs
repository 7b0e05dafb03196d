use color::{PremulColor, Srgb};
use euclid::SideOffsets2D;
use euclid::default::Box2D;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, StrokeOptions, StrokeTessellator,
    StrokeVertex, VertexBuffers,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Mesh, Vertex, normalized};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Options {
    pub fill: Option<PremulColor<Srgb>>,
    pub stroke_color: Option<PremulColor<Srgb>>,
    /// The stroke is drawn inside the area, it never grows the rectangle.
    pub stroke_width: f32,
}

impl Options {
    pub const fn filled(color: PremulColor<Srgb>) -> Self {
        Self {
            fill: Some(color),
            stroke_color: None,
            stroke_width: 0.,
        }
    }
    pub const fn stroked(color: PremulColor<Srgb>, width: f32) -> Self {
        Self {
            fill: None,
            stroke_color: Some(color),
            stroke_width: width,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::stroked(PremulColor::new([1., 1., 1., 1.]), 1.)
    }
}

/// An axis aligned rectangle, corners may be given in any order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    area: Box2D<f32>,
    options: Options,
}

impl Rectangle {
    pub const fn new(area: Box2D<f32>, options: Options) -> Self {
        Self {
            area: normalized(area),
            options,
        }
    }

    pub const fn area(&self) -> Box2D<f32> {
        self.area
    }

    pub const fn options(&self) -> &Options {
        &self.options
    }

    pub fn tessellate(&self) -> Mesh<Vertex> {
        let mut buffers = VertexBuffers::<Vertex, u32>::new();

        if let Some(color) = self.options.fill {
            let mut path = Path::builder();
            path.add_rectangle(&self.area, Winding::Positive);
            let mut builder = BuffersBuilder::new(&mut buffers, |vertex: FillVertex<'_>| {
                Vertex::solid(vertex.position(), color)
            });
            if let Err(err) =
                FillTessellator::new().tessellate_path(&path.build(), &FillOptions::default(), &mut builder)
            {
                warn!("Error while filling {self:?}: {err}");
            }
        }

        if let Some(color) = self.options.stroke_color
            && self.options.stroke_width > 0.
        {
            // Strokes are centered on the path, so pull it in by half a stroke.
            let half = SideOffsets2D::new_all_same(self.options.stroke_width / 2.);
            let mut path = Path::builder();
            path.add_rectangle(&normalized(self.area.inner_box(half)), Winding::Positive);

            let mut builder = BuffersBuilder::new(&mut buffers, |vertex: StrokeVertex<'_, '_>| {
                Vertex::solid(vertex.position(), color)
            });
            let options = StrokeOptions::default().with_line_width(self.options.stroke_width);
            if let Err(err) =
                StrokeTessellator::new().tessellate_path(&path.build(), &options, &mut builder)
            {
                warn!("Error while stroking {self:?}: {err}");
            }
        }

        buffers.into()
    }
}

#[cfg(test)]
mod tests {
    use euclid::default::Point2D;

    use super::*;

    const WHITE: PremulColor<Srgb> = PremulColor::new([1., 1., 1., 1.]);

    fn mesh_bounds(mesh: &Mesh<Vertex>) -> Box2D<f32> {
        Box2D::from_points(
            mesh.vertices
                .iter()
                .map(|v| Point2D::new(v.position[0], v.position[1])),
        )
    }

    #[test]
    fn inverted_corners_are_normalized() {
        let rectangle = Rectangle::new(
            Box2D::new(Point2D::new(50., 50.), Point2D::new(10., 10.)),
            Options::default(),
        );
        assert_eq!(
            rectangle.area(),
            Box2D::new(Point2D::new(10., 10.), Point2D::new(50., 50.))
        );
    }

    #[test]
    fn stroke_stays_inside_the_area() {
        let area = Box2D::new(Point2D::new(10., 10.), Point2D::new(50., 50.));
        let bounds = mesh_bounds(&Rectangle::new(area, Options::stroked(WHITE, 4.)).tessellate());
        assert!(area.contains_box(&bounds), "{bounds:?} escapes {area:?}");
    }

    #[test]
    fn fill_adds_to_the_outline() {
        let area = Box2D::new(Point2D::new(0., 0.), Point2D::new(100., 100.));
        let outline = Rectangle::new(area, Options::stroked(WHITE, 2.)).tessellate();
        let filled = Rectangle::new(
            area,
            Options {
                fill: Some(WHITE),
                ..Options::stroked(WHITE, 2.)
            },
        )
        .tessellate();
        assert!(!outline.is_empty());
        assert!(filled.indices.len() > outline.indices.len());
    }

    #[test]
    fn nothing_to_draw_without_fill_or_stroke() {
        let area = Box2D::new(Point2D::new(0., 0.), Point2D::new(10., 10.));
        let options = Options {
            stroke_color: None,
            ..Options::default()
        };
        assert!(Rectangle::new(area, options).tessellate().is_empty());
    }
}
