use atlas::MaskAtlas;
use color::{PremulColor, Srgb};
use parley::{FontContext, LayoutContext};
use swash::scale::{ScaleContext, image::Image};

/// Coverage masks of every glyph rasterized so far.
pub type GlyphAtlas = MaskAtlas<GlyphCacheKey, GlyphPlacement>;

/// Tessellation state that lives as long as the renderer.
pub struct SystemsOwned {
    pub text: TextState,
    pub glyphs: GlyphAtlas,
}

impl SystemsOwned {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            text: TextState::new(),
            glyphs: GlyphAtlas::new(device, atlas::DEFAULT_ATLAS_SIZE),
        }
    }

    /// Pairs the owned state with the device and queue glyph uploads go through.
    pub fn with_device<'a>(&'a mut self, device: &'a wgpu::Device, queue: &'a wgpu::Queue) -> Systems<'a> {
        Systems {
            text: &mut self.text,
            glyphs: &mut self.glyphs,
            device,
            queue,
        }
    }
}

pub struct Systems<'a> {
    pub text: &'a mut TextState,
    pub glyphs: &'a mut GlyphAtlas,

    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
}

/// The brush parley attaches to every glyph run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorBrush {
    pub color: PremulColor<Srgb>,
}

impl Default for ColorBrush {
    fn default() -> Self {
        Self {
            color: PremulColor::WHITE,
        }
    }
}

pub struct TextState {
    pub font_ctx: FontContext,
    pub layout_ctx: LayoutContext<ColorBrush>,
    pub scale_ctx: ScaleContext,
}

impl TextState {
    pub fn new() -> Self {
        Self {
            font_ctx: FontContext::new(),
            layout_ctx: LayoutContext::new(),
            scale_ctx: ScaleContext::new(),
        }
    }
}

impl Default for TextState {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifies one rasterization of a glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlyphCacheKey {
    /// Identity of the font blob.
    pub font_id: u64,
    pub font_index: u32,
    pub glyph_id: u16,
    /// Bits of the `f32` font size, sizes are never interpolated so exact equality is fine.
    pub font_size_bits: u32,
}

/// Offset of a rasterized glyph from its pen position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphPlacement {
    pub left: i32,
    pub top: i32,
}

impl From<&Image> for GlyphPlacement {
    fn from(image: &Image) -> Self {
        Self {
            left: image.placement.left,
            top: image.placement.top,
        }
    }
}
