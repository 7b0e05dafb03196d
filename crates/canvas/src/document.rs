use color::{PremulColor, Srgb};
use euclid::default::Point2D;
use graphics::DrawList;
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use tracing::{debug, trace};

use crate::shapes::Shape;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum DrawMode {
    #[default]
    Line,
    Rectangle,
}

impl DrawMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Line => "Line",
            Self::Rectangle => "Rectangle",
        }
    }
}

/// The colors new shapes can be drawn with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum Palette {
    #[default]
    White,
    Red,
    Green,
    Blue,
    Yellow,
}

impl Palette {
    pub const fn label(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Yellow => "Yellow",
        }
    }

    pub const fn color(self) -> PremulColor<Srgb> {
        match self {
            Self::White => PremulColor::WHITE,
            Self::Red => PremulColor::new([0.9, 0.2, 0.2, 1.]),
            Self::Green => PremulColor::new([0.2, 0.8, 0.3, 1.]),
            Self::Blue => PremulColor::new([0.25, 0.45, 0.95, 1.]),
            Self::Yellow => PremulColor::new([0.95, 0.85, 0.2, 1.]),
        }
    }
}

/// Every shape drawn so far, plus the one being dragged out.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DrawingDocument {
    committed: Vec<Shape>,
    #[serde(skip)]
    current: Option<Shape>,

    active_color: Palette,
    active_mode: DrawMode,
    fill_new_rectangles: bool,
}

impl DrawingDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed shapes, in paint order.
    pub fn committed(&self) -> &[Shape] {
        &self.committed
    }

    pub const fn current(&self) -> Option<&Shape> {
        self.current.as_ref()
    }

    pub const fn is_drawing(&self) -> bool {
        self.current.is_some()
    }

    /// Starts a shape of the active mode and color at `point`, replacing any unfinished one.
    pub fn begin(&mut self, point: Point2D<f32>) {
        let shape = Shape::new(
            self.active_mode,
            point,
            self.active_color.color(),
            self.fill_new_rectangles,
        );
        trace!(?point, mode = ?self.active_mode, "Started a shape");
        self.current = Some(shape);
    }

    /// Moves the free end of the shape being drawn.
    pub fn drag_to(&mut self, point: Point2D<f32>) {
        if let Some(current) = &mut self.current {
            current.set_end(point);
        }
    }

    /// Finishes the current shape, returning whether it was kept.
    ///
    /// A shape whose ends never separated is dropped.
    pub fn commit(&mut self) -> bool {
        let Some(shape) = self.current.take() else {
            return false;
        };
        if shape.is_empty() {
            trace!("Discarded an empty shape");
            return false;
        }
        debug!(mode = ?shape.mode(), start = ?shape.start(), end = ?shape.end(), "Committed a shape");
        self.committed.push(shape);
        true
    }

    pub fn clear_all(&mut self) {
        debug!(count = self.committed.len(), "Cleared every shape");
        self.committed.clear();
        self.current = None;
    }

    pub const fn active_color(&self) -> Palette {
        self.active_color
    }
    pub const fn set_active_color(&mut self, color: Palette) {
        self.active_color = color;
    }

    pub const fn active_mode(&self) -> DrawMode {
        self.active_mode
    }
    pub const fn set_active_mode(&mut self, mode: DrawMode) {
        self.active_mode = mode;
    }

    pub const fn fill_new_rectangles(&self) -> bool {
        self.fill_new_rectangles
    }
    pub const fn set_fill_new_rectangles(&mut self, fill: bool) {
        self.fill_new_rectangles = fill;
    }

    /// Committed shapes first, then the one in progress on top.
    pub fn render(&self, list: &mut DrawList) {
        for shape in &self.committed {
            shape.render(list);
        }
        if let Some(current) = &self.current {
            current.render(list);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::shapes::{LineShape, RectangleShape};

    use super::*;

    #[test]
    fn drag_commits_a_single_line() {
        let mut document = DrawingDocument::new();
        document.begin(Point2D::new(5., 5.));
        document.drag_to(Point2D::new(20., 20.));
        assert!(document.committed().is_empty());
        assert_eq!(document.current().map(Shape::end), Some(Point2D::new(20., 20.)));

        assert!(document.commit());
        assert_eq!(
            document.committed(),
            [Shape::Line(LineShape::new(
                Point2D::new(5., 5.),
                Point2D::new(20., 20.),
                Palette::White.color()
            ))]
        );
        assert!(!document.is_drawing());
    }

    #[test]
    fn empty_shapes_are_dropped() {
        let mut document = DrawingDocument::new();
        document.begin(Point2D::new(5., 5.));
        assert!(!document.commit());
        assert!(document.committed().is_empty());
        assert!(!document.commit());
    }

    #[test]
    fn new_shapes_use_the_active_settings() {
        let mut document = DrawingDocument::new();
        document.set_active_mode(DrawMode::Rectangle);
        document.set_active_color(Palette::Red);
        document.set_fill_new_rectangles(true);

        document.begin(Point2D::new(50., 50.));
        document.drag_to(Point2D::new(10., 10.));
        document.commit();

        assert_eq!(
            document.committed(),
            [Shape::Rectangle(RectangleShape::new(
                Point2D::new(50., 50.),
                Point2D::new(10., 10.),
                Palette::Red.color(),
                true
            ))]
        );
    }

    #[test]
    fn clear_all_drops_everything() {
        let mut document = DrawingDocument::new();
        for offset in [0., 10., 20.] {
            document.begin(Point2D::new(offset, 0.));
            document.drag_to(Point2D::new(offset, 30.));
            document.commit();
        }
        document.begin(Point2D::new(1., 1.));
        assert_eq!(document.committed().len(), 3);

        document.clear_all();
        assert!(document.committed().is_empty());
        assert!(!document.is_drawing());
    }

    #[test]
    fn the_shape_in_progress_paints_last() {
        let mut document = DrawingDocument::new();
        document.begin(Point2D::new(0., 0.));
        document.drag_to(Point2D::new(10., 0.));
        document.commit();
        document.set_active_mode(DrawMode::Rectangle);
        document.begin(Point2D::new(0., 0.));
        document.drag_to(Point2D::new(10., 10.));

        let mut list = DrawList::new();
        document.render(&mut list);
        assert!(matches!(
            list.commands(),
            [
                graphics::DrawCommand::Line { .. },
                graphics::DrawCommand::Rectangle { .. }
            ]
        ));
    }
}
