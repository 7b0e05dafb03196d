//! Packs small images (glyph masks) into a single atlas texture, growing it on demand.
use anyhow::Result;
use euclid::default::{Box2D, Point2D, Size2D};
use rustc_hash::FxHasher;
use std::{collections::HashMap, hash::BuildHasherDefault};

use guillotiere::{AtlasAllocator, Size};

#[cfg(feature = "wgpu")]
mod texture;
#[cfg(feature = "wgpu")]
pub use texture::MaskAtlas;

type Hasher = BuildHasherDefault<FxHasher>;

pub const DEFAULT_ATLAS_SIZE: Size = Size::new(512, 512);

pub struct UnallocatedTexture<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
}
impl<'a> UnallocatedTexture<'a> {
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }
}

/// A region of the atlas, in texels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation<D> {
    pub rect: Box2D<u32>,
    pub data: D,
}

impl<D> Allocation<D> {
    pub fn is_empty(&self) -> bool {
        self.rect.is_empty()
    }
}

/// Result of packing a texture, tells the caller whether the backing texture had to grow and
/// whether the data still has to be uploaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Packed<D> {
    Cached(Allocation<D>),
    New { allocation: Allocation<D>, grown_from: Option<Size2D<u32>> },
}

impl<D: Copy> Packed<D> {
    pub const fn allocation(&self) -> Allocation<D> {
        match self {
            Packed::Cached(allocation) => *allocation,
            Packed::New { allocation, .. } => *allocation,
        }
    }
}

/// The cpu side of an atlas, keeps track of free space and of what has been allocated.
pub struct AtlasPacker<K: std::hash::Hash + Eq, D> {
    allocator: AtlasAllocator,
    allocations: HashMap<K, Allocation<D>, Hasher>,

    size: Size,
    /// The max size the atlas can become.
    max_size: Size,
}

impl<K: std::hash::Hash + Eq, D: Copy> AtlasPacker<K, D> {
    pub fn new(size: Size, max_size: Size) -> Self {
        let size = size.min(max_size);
        Self {
            allocator: AtlasAllocator::new(size),
            allocations: HashMap::with_hasher(Hasher::default()),
            size,
            max_size,
        }
    }

    pub fn size(&self) -> Size2D<u32> {
        self.size.to_u32()
    }

    pub fn get(&self, key: &K) -> Option<Allocation<D>> {
        self.allocations.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    /// Finds space for a `width`x`height` texture, reusing the allocation of `key` if it exists.
    ///
    /// Doubles the atlas size while the texture does not fit, up to the max size.
    pub fn pack(&mut self, key: K, width: u32, height: u32, data: D) -> Result<Packed<D>> {
        if let Some(allocation) = self.get(&key) {
            return Ok(Packed::Cached(allocation));
        }

        // Zero sized glyphs (e.g. whitespace) take no space, but are still cached.
        if width == 0 || height == 0 {
            let allocation = Allocation {
                rect: Box2D::zero(),
                data,
            };
            self.allocations.insert(key, allocation);
            return Ok(Packed::New {
                allocation,
                grown_from: None,
            });
        }

        let requested = Size::new(width as i32, height as i32);
        let mut grown_from = None;
        let area = loop {
            if let Some(area) = self.allocator.allocate(requested) {
                break area;
            }
            if self.size.width >= self.max_size.width && self.size.height >= self.max_size.height
            {
                anyhow::bail!("failed to allocate a texture with dimensions: {width}x{height}");
            }
            let new_size = (self.size * 2).min(self.max_size);
            tracing::debug!("Growing atlas from {:?} to {:?}", self.size, new_size);
            grown_from.get_or_insert(self.size.to_u32());
            self.allocator.grow(new_size);
            self.size = new_size;
        };

        let min = Point2D::new(area.rectangle.min.x as u32, area.rectangle.min.y as u32);
        let allocation = Allocation {
            rect: Box2D::from_origin_and_size(min, Size2D::new(width, height)),
            data,
        };
        self.allocations.insert(key, allocation);
        Ok(Packed::New {
            allocation,
            grown_from,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packer() -> AtlasPacker<u32, ()> {
        AtlasPacker::new(Size::new(64, 64), Size::new(256, 256))
    }

    #[test]
    fn reuses_cached_allocations() {
        let mut packer = packer();
        let first = packer.pack(1, 10, 12, ()).unwrap();
        assert!(matches!(first, Packed::New { grown_from: None, .. }));

        let second = packer.pack(1, 10, 12, ()).unwrap();
        assert_eq!(second, Packed::Cached(first.allocation()));
        assert_eq!(packer.len(), 1);
    }

    #[test]
    fn allocations_do_not_overlap() {
        let mut packer = packer();
        let a = packer.pack(1, 30, 30, ()).unwrap().allocation();
        let b = packer.pack(2, 30, 30, ()).unwrap().allocation();
        assert_eq!(a.rect.size(), Size2D::new(30, 30));
        assert!(!a.rect.intersects(&b.rect), "{:?} overlaps {:?}", a.rect, b.rect);
    }

    #[test]
    fn grows_when_full() {
        let mut packer = packer();
        packer.pack(1, 64, 64, ()).unwrap();
        let packed = packer.pack(2, 64, 64, ()).unwrap();
        assert_eq!(
            packed,
            Packed::New {
                allocation: packed.allocation(),
                grown_from: Some(Size2D::new(64, 64)),
            }
        );
        assert_eq!(packer.size(), Size2D::new(128, 128));
    }

    #[test]
    fn fails_past_max_size() {
        let mut packer = packer();
        assert!(packer.pack(1, 300, 10, ()).is_err());
    }

    #[test]
    fn empty_textures_take_no_space() {
        let mut packer = packer();
        let packed = packer.pack(1, 0, 16, ()).unwrap();
        assert!(packed.allocation().is_empty());
        assert_eq!(packer.size(), Size2D::new(64, 64));
    }
}
