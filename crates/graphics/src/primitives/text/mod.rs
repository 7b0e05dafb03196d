use color::{PremulColor, Srgb};
use euclid::default::{Box2D, Point2D, Size2D, Vector2D};
use parley::{
    AlignmentOptions, FontStack, GlyphRun, Layout, LineHeight, PositionedLayoutItem,
    StyleProperty,
};
use serde::{Deserialize, Serialize};
use swash::{
    FontRef,
    scale::{Render, Scaler, Source},
    zeno::Format,
};
use tracing::{trace, warn};

use crate::{
    Mesh, Systems, Vertex, normalized,
    systems::{ColorBrush, GlyphAtlas, GlyphCacheKey, GlyphPlacement, TextState},
};
use atlas::{Allocation, UnallocatedTexture};

mod options;
pub use options::{Alignment, FontFamily, FontWeight};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Options {
    pub color: PremulColor<Srgb>,

    pub font_size: f32,
    pub font_family: FontFamily,
    pub font_weight: FontWeight,

    /// Horizontal alignment within the text area, text is always centered vertically.
    pub alignment: Alignment,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            color: PremulColor::new([1., 1., 1., 1.]),
            font_size: 16.,
            font_family: FontFamily::SystemUi,
            font_weight: FontWeight::Normal,
            alignment: Alignment::Left,
        }
    }
}

/// A single line of text laid out inside an area.
#[derive(Clone, Debug, PartialEq)]
pub struct Text<'a> {
    content: &'a str,
    area: Box2D<f32>,
    options: &'a Options,
}

impl<'a> Text<'a> {
    pub const fn new(content: &'a str, options: &'a Options, area: Box2D<f32>) -> Self {
        Self {
            content,
            area: normalized(area),
            options,
        }
    }

    fn prepare_layout(&self, text: &mut TextState) -> Layout<ColorBrush> {
        let mut builder = text
            .layout_ctx
            .ranged_builder(&mut text.font_ctx, self.content, 1.0, true);

        let color_brush = ColorBrush {
            color: self.options.color,
        };
        let font_weight = match self.options.font_weight {
            FontWeight::Light => parley::FontWeight::LIGHT,
            FontWeight::Normal => parley::FontWeight::NORMAL,
            FontWeight::Bold => parley::FontWeight::BOLD,
        };
        builder.push_default(StyleProperty::Brush(color_brush));
        builder.push_default(FontStack::Single(self.options.font_family.to_parley()));
        builder.push_default(LineHeight::FontSizeRelative(1.3));
        builder.push_default(StyleProperty::FontSize(self.options.font_size));
        builder.push_default(StyleProperty::FontWeight(font_weight));

        let mut layout: Layout<ColorBrush> = builder.build(self.content);
        layout.break_all_lines(None);
        layout.align(None, parley::Alignment::Start, AlignmentOptions::default());
        layout
    }

    /// Lays out the text and rasterizes any glyphs missing from the atlas.
    pub fn tessellate(&self, systems: &mut Systems) -> Mesh<Vertex> {
        let layout = self.prepare_layout(systems.text);

        let free_space = self.area.size() - Size2D::new(layout.full_width(), layout.height());
        let offset_x = match self.options.alignment {
            Alignment::Left => 0.,
            Alignment::Center => free_space.width / 2.,
            Alignment::Right => free_space.width,
        };
        let origin = (self.area.min + Vector2D::new(offset_x, free_space.height / 2.)).round();

        let mut result = Mesh::empty();
        for line in layout.lines() {
            for item in line.items() {
                match item {
                    PositionedLayoutItem::GlyphRun(glyph_run) => {
                        Self::render_glyph_run(systems, &glyph_run, origin, &mut result);
                    }
                    PositionedLayoutItem::InlineBox(_) => {}
                }
            }
        }
        trace!("Tessellated {:?} into {} indices", self.content, result.indices.len());
        result
    }

    fn render_glyph_run(
        systems: &mut Systems,
        glyph_run: &GlyphRun<'_, ColorBrush>,
        origin: Point2D<f32>,
        mesh: &mut Mesh<Vertex>,
    ) {
        let mut run_x = glyph_run.offset() + origin.x;
        let run_y = glyph_run.baseline() + origin.y;
        let color = glyph_run.style().brush.color;

        let run = glyph_run.run();
        let font = run.font();
        let font_size = run.font_size();

        let Some(font_ref) = FontRef::from_index(font.data.as_ref(), font.index as usize) else {
            warn!("Failed to read the font at index {}", font.index);
            return;
        };

        // The font properties are constant across a run, so one scaler serves every glyph.
        let mut scaler = systems
            .text
            .scale_ctx
            .builder(font_ref)
            .size(font_size)
            .hint(true)
            .normalized_coords(run.normalized_coords())
            .build();

        for glyph in glyph_run.glyphs() {
            // Glyphs are cached without subpixel offsets, so snap them to whole pixels.
            let glyph_x = (run_x + glyph.x).round();
            let glyph_y = (run_y - glyph.y).round();
            run_x += glyph.advance;

            let key = GlyphCacheKey {
                font_id: font.data.id(),
                font_index: font.index,
                glyph_id: glyph.id as u16,
                font_size_bits: font_size.to_bits(),
            };
            let allocation = match systems.glyphs.get(&key) {
                Some(allocation) => allocation,
                None => {
                    let Some(allocation) = rasterize_glyph(
                        systems.device,
                        systems.queue,
                        systems.glyphs,
                        &mut scaler,
                        key,
                    ) else {
                        continue;
                    };
                    allocation
                }
            };
            if allocation.is_empty() {
                continue;
            }

            let placement = allocation.data;
            let glyph_area = Box2D::from_origin_and_size(
                Point2D::new(
                    glyph_x + placement.left as f32,
                    glyph_y - placement.top as f32,
                ),
                allocation.rect.size().to_f32(),
            );
            mesh.append(&Mesh::masked_quad(glyph_area, allocation.rect.to_f32(), color));
        }
    }
}

fn rasterize_glyph(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    glyphs: &mut GlyphAtlas,
    scaler: &mut Scaler<'_>,
    key: GlyphCacheKey,
) -> Option<Allocation<GlyphPlacement>> {
    let image = Render::new(&[Source::Outline])
        .format(Format::Alpha)
        .render(scaler, key.glyph_id)?;

    let texture = UnallocatedTexture::new(
        image.data.as_ref(),
        image.placement.width,
        image.placement.height,
    );
    match glyphs.allocate(
        device,
        queue,
        key,
        texture,
        GlyphPlacement::from(&image),
    ) {
        Ok(allocation) => Some(allocation),
        Err(err) => {
            warn!("Failed to allocate glyph {}: {err}", key.glyph_id);
            None
        }
    }
}
