//! The shapes a user can draw.
//!
//! A shape is mutable while it is being dragged out and becomes a plain value once committed to
//! the document.
use color::{PremulColor, Srgb};
use euclid::default::{Box2D, Point2D};
use graphics::DrawList;
use serde::{Deserialize, Serialize};

use crate::document::DrawMode;

pub const STROKE_WIDTH: f32 = 2.;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineShape {
    pub start: Point2D<f32>,
    pub end: Point2D<f32>,
    pub color: PremulColor<Srgb>,
}

impl LineShape {
    pub const fn new(start: Point2D<f32>, end: Point2D<f32>, color: PremulColor<Srgb>) -> Self {
        Self { start, end, color }
    }

    pub fn render(&self, list: &mut DrawList) {
        list.line(self.start, self.end, self.color, STROKE_WIDTH);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectangleShape {
    /// One corner, not necessarily the top left one.
    pub start: Point2D<f32>,
    /// The corner opposite of `start`.
    pub end: Point2D<f32>,
    pub color: PremulColor<Srgb>,
    pub filled: bool,
}

impl RectangleShape {
    pub const fn new(
        start: Point2D<f32>,
        end: Point2D<f32>,
        color: PremulColor<Srgb>,
        filled: bool,
    ) -> Self {
        Self {
            start,
            end,
            color,
            filled,
        }
    }

    /// The axis aligned box spanned by both corners.
    pub fn bounds(&self) -> Box2D<f32> {
        Box2D::new(self.start.min(self.end), self.start.max(self.end))
    }

    pub fn render(&self, list: &mut DrawList) {
        let bounds = self.bounds();
        if self.filled {
            list.fill_rectangle(bounds, self.color);
        }
        list.stroke_rectangle(bounds, self.color, STROKE_WIDTH);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line(LineShape),
    Rectangle(RectangleShape),
}

impl Shape {
    /// A shape of the given mode, collapsed onto `start`.
    pub const fn new(
        mode: DrawMode,
        start: Point2D<f32>,
        color: PremulColor<Srgb>,
        filled: bool,
    ) -> Self {
        match mode {
            DrawMode::Line => Self::Line(LineShape::new(start, start, color)),
            DrawMode::Rectangle => {
                Self::Rectangle(RectangleShape::new(start, start, color, filled))
            }
        }
    }

    pub const fn start(&self) -> Point2D<f32> {
        match self {
            Self::Line(line) => line.start,
            Self::Rectangle(rectangle) => rectangle.start,
        }
    }

    pub const fn end(&self) -> Point2D<f32> {
        match self {
            Self::Line(line) => line.end,
            Self::Rectangle(rectangle) => rectangle.end,
        }
    }

    pub const fn set_end(&mut self, end: Point2D<f32>) {
        match self {
            Self::Line(line) => line.end = end,
            Self::Rectangle(rectangle) => rectangle.end = end,
        }
    }

    pub const fn color(&self) -> PremulColor<Srgb> {
        match self {
            Self::Line(line) => line.color,
            Self::Rectangle(rectangle) => rectangle.color,
        }
    }

    pub const fn mode(&self) -> DrawMode {
        match self {
            Self::Line(_) => DrawMode::Line,
            Self::Rectangle(_) => DrawMode::Rectangle,
        }
    }

    /// Both points coincide, so there is nothing to see.
    pub fn is_empty(&self) -> bool {
        self.start() == self.end()
    }

    pub fn render(&self, list: &mut DrawList) {
        match self {
            Self::Line(line) => line.render(list),
            Self::Rectangle(rectangle) => rectangle.render(list),
        }
    }
}

#[cfg(test)]
mod tests {
    use graphics::DrawCommand;

    use super::*;

    const RED: PremulColor<Srgb> = PremulColor::new([1., 0., 0., 1.]);

    #[test]
    fn rectangle_normalizes_its_corners() {
        let rectangle = RectangleShape::new(Point2D::new(50., 50.), Point2D::new(10., 10.), RED, false);
        let bounds = rectangle.bounds();
        assert_eq!(bounds.min, Point2D::new(10., 10.));
        assert_eq!(bounds.max, Point2D::new(50., 50.));

        let mixed = RectangleShape::new(Point2D::new(10., 50.), Point2D::new(50., 10.), RED, false);
        assert_eq!(mixed.bounds(), bounds);
    }

    #[test]
    fn outline_only_unless_filled() {
        let mut rectangle =
            RectangleShape::new(Point2D::new(50., 50.), Point2D::new(10., 10.), RED, false);
        let mut list = DrawList::new();
        rectangle.render(&mut list);
        assert!(matches!(
            list.commands(),
            [DrawCommand::Rectangle { options, .. }] if options.fill.is_none() && options.stroke_color == Some(RED)
        ));

        rectangle.filled = true;
        let mut list = DrawList::new();
        rectangle.render(&mut list);
        match list.commands() {
            [
                DrawCommand::Rectangle { area: fill_area, options: fill },
                DrawCommand::Rectangle { area: stroke_area, options: stroke },
            ] => {
                assert_eq!(fill.fill, Some(RED));
                assert_eq!(stroke.stroke_color, Some(RED));
                assert_eq!(fill_area, stroke_area);
                assert_eq!(*fill_area, rectangle.bounds());
            }
            other => panic!("expected a fill and an outline, got {other:?}"),
        }
    }

    #[test]
    fn line_draws_a_single_segment() {
        let line = Shape::new(DrawMode::Line, Point2D::new(5., 5.), RED, true);
        assert!(line.is_empty());

        let mut line = line;
        line.set_end(Point2D::new(20., 20.));
        assert!(!line.is_empty());

        let mut list = DrawList::new();
        line.render(&mut list);
        assert_eq!(
            list.commands(),
            [DrawCommand::Line {
                from: Point2D::new(5., 5.),
                to: Point2D::new(20., 20.),
                options: graphics::primitives::LineOptions {
                    color: RED,
                    width: STROKE_WIDTH,
                },
            }]
        );
    }

    #[test]
    fn new_shape_follows_the_mode() {
        let shape = Shape::new(DrawMode::Rectangle, Point2D::new(1., 2.), RED, true);
        assert_eq!(shape.mode(), DrawMode::Rectangle);
        assert!(matches!(shape, Shape::Rectangle(RectangleShape { filled: true, .. })));
    }
}
