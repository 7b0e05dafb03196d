use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};
use euclid::default::Size2D;
use wgpu::BufferUsages;

use graphics::{DrawList, Mesh};

/// The drawing surface of a window, as driven by the frame loop.
///
/// A frame is `begin_draw`, `draw`, `end_draw` and `present`, in that order. Resizing is the
/// sequence `release_target`, `resize_buffers`, `recreate_target`, no frame may run in between.
pub trait Renderer {
    /// Acquires the next target to render into.
    fn begin_draw(&mut self) -> Result<()>;
    /// Records the contents of `list` into the acquired target.
    fn draw(&mut self, list: &DrawList) -> Result<()>;
    /// Submits the recorded work.
    fn end_draw(&mut self) -> Result<()>;
    fn present(&mut self);

    /// Drops everything that depends on the current swap buffers.
    fn release_target(&mut self);
    fn resize_buffers(&mut self, size: Size2D<u32>) -> Result<()>;
    fn recreate_target(&mut self) -> Result<()>;

    /// Releases every owned gpu resource. Called once, after the last frame.
    fn dispose(&mut self);
}

pub struct State {
    /// this *is not* to be used to request a new device.
    pub adapter: wgpu::Adapter,

    pub instance: wgpu::Instance,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl State {
    /// Requests a device, `compatible_surface` must be created from `instance`.
    pub async fn init(
        instance: wgpu::Instance,
        compatible_surface: Option<&wgpu::Surface<'_>>,
    ) -> Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                force_fallback_adapter: false,
                compatible_surface,
            })
            .await
            .context("Failed to find an appropriate adapter")?;
        tracing::info!("using adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("Failed to create device")?;

        tracing::debug!("wgpu device limits: {:?}", device.limits());

        Ok(State {
            adapter,

            instance,
            device,
            queue,
        })
    }
}

/// A gpu buffer that is rewritten wholesale every frame, reallocated when the data outgrows it.
pub struct StreamingBuffer {
    buffer: wgpu::Buffer,
    /// Bytes written by the last upload.
    len: u64,
    usage: BufferUsages,
    label: &'static str,
}

impl StreamingBuffer {
    pub fn new(device: &wgpu::Device, usage: BufferUsages, capacity: u64, label: &'static str) -> Self {
        let usage = usage | BufferUsages::COPY_DST;
        Self {
            buffer: Self::allocate(device, usage, aligned(capacity), label),
            len: 0,
            usage,
            label,
        }
    }

    fn allocate(device: &wgpu::Device, usage: BufferUsages, size: u64, label: &'static str) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage,
            mapped_at_creation: false,
        })
    }

    /// Replaces the contents with `data`, which must be a multiple of
    /// [`wgpu::COPY_BUFFER_ALIGNMENT`] long.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[u8]) {
        let len = data.len() as u64;
        if len > self.capacity() {
            // Everything is about to be overwritten, nothing needs copying over.
            let size = aligned(len.next_power_of_two());
            tracing::debug!("Growing the {} to {size} bytes", self.label);
            self.buffer.destroy();
            self.buffer = Self::allocate(device, self.usage, size, self.label);
        }
        if len > 0 {
            queue.write_buffer(&self.buffer, 0, data);
        }
        self.len = len;
    }

    /// The written part of the buffer.
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..self.len.max(wgpu::COPY_BUFFER_ALIGNMENT))
    }

    pub fn len(&self) -> u64 {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn capacity(&self) -> u64 {
        self.buffer.size()
    }
}

impl Drop for StreamingBuffer {
    fn drop(&mut self) {
        self.buffer.destroy();
    }
}

const fn aligned(size: u64) -> u64 {
    let mask = wgpu::COPY_BUFFER_ALIGNMENT - 1;
    let size = (size + mask) & !mask;
    if size < wgpu::COPY_BUFFER_ALIGNMENT {
        wgpu::COPY_BUFFER_ALIGNMENT
    } else {
        size
    }
}

/// The vertex and index buffers of the mesh drawn each frame.
pub struct MeshBuffer {
    pub vertices: StreamingBuffer,
    pub indices: StreamingBuffer,
    pub index_count: u32,
}

impl MeshBuffer {
    pub fn new(device: &wgpu::Device, vertex_capacity: u64, index_capacity: u64) -> Self {
        Self {
            vertices: StreamingBuffer::new(device, BufferUsages::VERTEX, vertex_capacity, "mesh vertex buffer"),
            indices: StreamingBuffer::new(device, BufferUsages::INDEX, index_capacity, "mesh index buffer"),
            index_count: 0,
        }
    }

    pub fn upload<V>(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, mesh: &Mesh<V>)
    where
        V: Clone + Pod + Zeroable,
    {
        self.vertices
            .upload(device, queue, bytemuck::cast_slice(&mesh.vertices));
        self.indices
            .upload(device, queue, bytemuck::cast_slice(&mesh.indices));
        self.index_count = mesh.indices.len() as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_are_rounded_up_to_the_copy_alignment() {
        assert_eq!(aligned(0), wgpu::COPY_BUFFER_ALIGNMENT);
        assert_eq!(aligned(1), wgpu::COPY_BUFFER_ALIGNMENT);
        assert_eq!(aligned(4), 4);
        assert_eq!(aligned(13), 16);
    }
}
