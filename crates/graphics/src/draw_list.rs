//! Retained list of draw commands for one frame.
//!
//! Widgets and shapes record into a [`DrawList`], the renderer tessellates it into a single mesh
//! once the frame is complete. Keeping the list around (instead of drawing directly) keeps every
//! producer independent of the gpu.
use color::{PremulColor, Srgb};
use euclid::default::{Box2D, Point2D};

use crate::{
    Mesh, Systems, Vertex,
    primitives::{Line, LineOptions, Rectangle, RectangleOptions, Text, TextOptions},
};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Point2D<f32>,
        to: Point2D<f32>,
        options: LineOptions,
    },
    Rectangle {
        area: Box2D<f32>,
        options: RectangleOptions,
    },
    Text {
        content: String,
        area: Box2D<f32>,
        options: TextOptions,
    },
}

#[derive(Clone, Debug, Default)]
pub struct DrawList {
    clear_color: Option<PremulColor<Srgb>>,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every recorded command and fills the target with `color` instead.
    pub fn clear(&mut self, color: PremulColor<Srgb>) {
        self.clear_color = Some(color);
        self.commands.clear();
    }

    pub fn line(&mut self, from: Point2D<f32>, to: Point2D<f32>, color: PremulColor<Srgb>, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            options: LineOptions { color, width },
        });
    }

    pub fn rectangle(&mut self, area: Box2D<f32>, options: RectangleOptions) {
        self.commands.push(DrawCommand::Rectangle { area, options });
    }

    pub fn fill_rectangle(&mut self, area: Box2D<f32>, color: PremulColor<Srgb>) {
        self.rectangle(area, RectangleOptions::filled(color));
    }

    pub fn stroke_rectangle(&mut self, area: Box2D<f32>, color: PremulColor<Srgb>, width: f32) {
        self.rectangle(area, RectangleOptions::stroked(color, width));
    }

    pub fn text(&mut self, content: impl Into<String>, area: Box2D<f32>, options: TextOptions) {
        self.commands.push(DrawCommand::Text {
            content: content.into(),
            area,
            options,
        });
    }

    pub fn clear_color(&self) -> Option<PremulColor<Srgb>> {
        self.clear_color
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the mesh for every command, in recording order.
    pub fn tessellate(&self, systems: &mut Systems) -> Mesh<Vertex> {
        let mut mesh = Mesh::empty();
        for command in &self.commands {
            match command {
                DrawCommand::Line { from, to, options } => {
                    mesh.append(&Line::new(*from, *to, *options).tessellate());
                }
                DrawCommand::Rectangle { area, options } => {
                    mesh.append(&Rectangle::new(*area, *options).tessellate());
                }
                DrawCommand::Text {
                    content,
                    area,
                    options,
                } => {
                    mesh.append(&Text::new(content, options, *area).tessellate(systems));
                }
            }
        }
        mesh
    }
}
