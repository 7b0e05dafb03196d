use anyhow::Result;
use euclid::default::Size2D;
use guillotiere::Size;
use wgpu::{
    CommandEncoderDescriptor, Device, Extent3d, Origin3d, Queue, TexelCopyBufferLayout,
    TexelCopyTextureInfo, Texture, TextureAspect, TextureDescriptor, TextureDimension,
    TextureFormat, TextureUsages, TextureView,
};

use crate::{Allocation, AtlasPacker, Packed, UnallocatedTexture};

/// Single channel atlas, used for glyph coverage masks.
pub struct MaskAtlas<K: std::hash::Hash + Eq, D> {
    packer: AtlasPacker<K, D>,

    texture: Texture,
    pub texture_view: TextureView,

    /// Set when the texture was replaced, bind groups referencing the old view must be rebuilt.
    pub needs_rebinding: bool,
}

impl<K: std::hash::Hash + Eq, D: Copy> MaskAtlas<K, D> {
    pub const FORMAT: TextureFormat = TextureFormat::R8Unorm;

    pub fn new(device: &Device, size: Size) -> Self {
        let max_size = Size::splat(device.limits().max_texture_dimension_2d as i32);
        let packer = AtlasPacker::new(size, max_size);
        let texture = Self::create_texture(device, packer.size());
        let texture_view = texture.create_view(&Default::default());
        Self {
            packer,
            texture,
            texture_view,
            needs_rebinding: false,
        }
    }

    fn create_texture(device: &Device, size: Size2D<u32>) -> Texture {
        device.create_texture(&TextureDescriptor {
            label: Some("mask atlas"),
            size: Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: Self::FORMAT,
            usage: TextureUsages::TEXTURE_BINDING
                | TextureUsages::COPY_DST
                | TextureUsages::COPY_SRC,
            view_formats: &[],
        })
    }

    pub fn get(&self, key: &K) -> Option<Allocation<D>> {
        self.packer.get(key)
    }

    /// Allocates and uploads a texture, returns the existing allocation when `key` is cached.
    pub fn allocate(
        &mut self,
        device: &Device,
        queue: &Queue,
        key: K,
        texture: UnallocatedTexture,
        data: D,
    ) -> Result<Allocation<D>> {
        let packed = self.packer.pack(key, texture.width, texture.height, data)?;
        let Packed::New {
            allocation,
            grown_from,
        } = packed
        else {
            return Ok(packed.allocation());
        };

        if let Some(old_size) = grown_from {
            self.grow(device, queue, old_size);
        }
        if allocation.is_empty() {
            return Ok(allocation);
        }

        queue.write_texture(
            TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: Origin3d {
                    x: allocation.rect.min.x,
                    y: allocation.rect.min.y,
                    z: 0,
                },
                aspect: TextureAspect::All,
            },
            texture.data,
            TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(texture.width),
                rows_per_image: None,
            },
            Extent3d {
                width: texture.width,
                height: texture.height,
                depth_or_array_layers: 1,
            },
        );
        Ok(allocation)
    }

    /// Replaces the texture with one matching the packer's size, keeping existing contents.
    fn grow(&mut self, device: &Device, queue: &Queue, old_size: Size2D<u32>) {
        let new_texture = Self::create_texture(device, self.packer.size());
        let mut encoder = device.create_command_encoder(&CommandEncoderDescriptor {
            label: Some("copy atlas texture"),
        });
        encoder.copy_texture_to_texture(
            TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: Origin3d::ZERO,
                aspect: TextureAspect::All,
            },
            TexelCopyTextureInfo {
                texture: &new_texture,
                mip_level: 0,
                origin: Origin3d::ZERO,
                aspect: TextureAspect::All,
            },
            Extent3d {
                width: old_size.width,
                height: old_size.height,
                depth_or_array_layers: 1,
            },
        );
        queue.submit(Some(encoder.finish()));

        self.texture.destroy();
        self.texture = new_texture;
        self.texture_view = self.texture.create_view(&Default::default());
        self.needs_rebinding = true;
    }
}
