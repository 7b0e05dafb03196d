use bytemuck::{Pod, Zeroable};
use color::{PremulColor, Srgb};
use euclid::default::{Box2D, Point2D};
use lyon::tessellation::VertexBuffers;

/// Indexed triangle list, ready to be uploaded to the gpu.
#[derive(Default, Clone, Debug)]
pub struct Mesh<V: Clone + Pod + Zeroable> {
    pub vertices: Vec<V>,
    pub indices: Vec<u32>,
}

impl<V> Mesh<V>
where
    V: Clone + Pod + Zeroable,
{
    pub const fn empty() -> Self {
        Self {
            vertices: vec![],
            indices: vec![],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Appends `other`, shifting its indices past the vertices already present.
    pub fn append(&mut self, other: &Mesh<V>) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices
            .extend(other.indices.iter().map(|index| index + offset));
    }
}

impl<V> From<VertexBuffers<V, u32>> for Mesh<V>
where
    V: Clone + Pod + Zeroable,
{
    fn from(buffers: VertexBuffers<V, u32>) -> Self {
        Self {
            vertices: buffers.vertices,
            indices: buffers.indices,
        }
    }
}

impl Mesh<Vertex> {
    /// Quad covering `area` that samples `texels` (in texel coordinates) of the mask atlas.
    pub fn masked_quad(area: Box2D<f32>, texels: Box2D<f32>, color: PremulColor<Srgb>) -> Self {
        let corners = [
            (area.min, texels.min),
            (Point2D::new(area.max.x, area.min.y), Point2D::new(texels.max.x, texels.min.y)),
            (area.max, texels.max),
            (Point2D::new(area.min.x, area.max.y), Point2D::new(texels.min.x, texels.max.y)),
        ];
        Mesh {
            vertices: corners
                .into_iter()
                .map(|(position, texel)| Vertex::new(position, Paint::Mask(color), texel))
                .collect(),
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }
}

/// How the fragment shader colors a vertex.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(PremulColor<Srgb>),
    /// The color, scaled by the coverage sampled from the mask atlas.
    Mask(PremulColor<Srgb>),
}

impl Paint {
    /// Must match the `kind` branches of the canvas shader.
    pub const fn id(&self) -> u32 {
        match self {
            Paint::Solid(_) => 0,
            Paint::Mask(_) => 1,
        }
    }

    pub const fn color(&self) -> PremulColor<Srgb> {
        match self {
            Paint::Solid(color) | Paint::Mask(color) => *color,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
    pub kind: u32,
    pub tex_coords: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4, 2 => Uint32, 3 => Float32x2];

    pub const fn buffer_layout<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    pub const fn new(position: Point2D<f32>, paint: Paint, tex_coords: Point2D<f32>) -> Self {
        Self {
            position: [position.x, position.y],
            color: paint.color().components,
            kind: paint.id(),
            tex_coords: [tex_coords.x, tex_coords.y],
        }
    }

    pub const fn solid(position: Point2D<f32>, color: PremulColor<Srgb>) -> Self {
        Self::new(position, Paint::Solid(color), Point2D::new(0., 0.))
    }
}
