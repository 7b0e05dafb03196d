use anyhow::{Context, Result, bail};
use color::{PremulColor, Srgb};
use euclid::default::Size2D;
use graphics::{DrawList, SystemsOwned};
use renderer::{MeshBuffer, Renderer, State};
use tracing::{debug, info, instrument, trace, warn};

use crate::{
    pipeline::{Binds, DrawPipeline},
    projection::Projection,
};

const DEFAULT_CLEAR: PremulColor<Srgb> = PremulColor::BLACK;

/// An acquired swap chain image, together with the work recorded into it.
struct Frame {
    texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    encoder: Option<wgpu::CommandEncoder>,
}

/// Renders draw lists into the surface of a window.
pub struct SurfaceRenderer {
    state: State,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    /// Whether the surface is configured for the current buffer size.
    configured: bool,

    pipeline: DrawPipeline,
    binds: Option<Binds>,
    projection: Projection,

    systems: SystemsOwned,
    mesh_buffer: MeshBuffer,

    frame: Option<Frame>,
    disposed: bool,
}

impl SurfaceRenderer {
    #[instrument(skip_all)]
    pub fn new(
        state: State,
        surface: wgpu::Surface<'static>,
        size: Size2D<u32>,
        vsync: bool,
    ) -> Result<Self> {
        let capabilities = surface.get_capabilities(&state.adapter);
        // Colors are authored in sRGB already, an sRGB view would encode them twice.
        let format = capabilities
            .formats
            .iter()
            .copied()
            .find(|format| !format.is_srgb())
            .or_else(|| capabilities.formats.first().copied())
            .context("The surface is not supported by the adapter")?;
        let alpha_mode = capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&state.device, &config);
        info!(?format, present_mode = ?config.present_mode, "Configured the surface");

        let pipeline = DrawPipeline::new(&state.device, format);
        let systems = SystemsOwned::new(&state.device);
        let mesh_buffer = MeshBuffer::new(&state.device, 1 << 16, 1 << 15);

        Ok(Self {
            projection: Projection::new(Size2D::new(config.width as f32, config.height as f32)),
            state,
            surface,
            config,
            configured: size.width > 0 && size.height > 0,

            pipeline,
            binds: None,

            systems,
            mesh_buffer,

            frame: None,
            disposed: false,
        })
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.state.device, &self.config);
    }

    /// Rebuilds whatever bind groups went stale since the last frame.
    fn prepare_binds(&mut self) {
        let binds = self.binds.get_or_insert_with(|| {
            self.pipeline.new_binds(
                &self.state.device,
                &self.projection,
                &self.systems.glyphs.texture_view,
            )
        });
        if self.projection.needs_rebinding() {
            binds.projection.write(&self.state.queue, &self.projection);
            self.projection.mark_bound();
            debug!("Updated the projection bind!");
        }
        if self.systems.glyphs.needs_rebinding {
            binds.glyph_mask = self
                .pipeline
                .glyph_mask_bind_group(&self.state.device, &self.systems.glyphs.texture_view);
            self.systems.glyphs.needs_rebinding = false;
            debug!("Updated the glyph atlas bind!");
        }
    }
}

const fn to_wgpu_color(color: PremulColor<Srgb>) -> wgpu::Color {
    let [r, g, b, a] = color.components;
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: a as f64,
    }
}

impl Renderer for SurfaceRenderer {
    fn begin_draw(&mut self) -> Result<()> {
        if !self.configured || self.disposed {
            return Ok(());
        }
        let texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("The surface went stale, reconfiguring and skipping the frame");
                self.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Timed out acquiring the next frame, skipping it");
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => bail!("Ran out of memory acquiring a frame"),
            Err(error) => return Err(error).context("Failed to acquire the next frame"),
        };
        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.frame = Some(Frame {
            texture,
            view,
            encoder: None,
        });
        Ok(())
    }

    #[instrument(skip_all)]
    fn draw(&mut self, list: &DrawList) -> Result<()> {
        if self.frame.is_none() {
            return Ok(());
        }
        let start = std::time::Instant::now();

        let mesh = list.tessellate(&mut self.systems.with_device(&self.state.device, &self.state.queue));
        // Tessellating text may have grown the atlas.
        self.prepare_binds();
        self.mesh_buffer
            .upload(&self.state.device, &self.state.queue, &mesh);

        let Some(frame) = self.frame.as_mut() else {
            return Ok(());
        };
        let Some(binds) = self.binds.as_ref() else {
            bail!("Bind groups are missing after being prepared");
        };

        let mut encoder = self
            .state
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Canvas Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Canvas Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(to_wgpu_color(
                            list.clear_color().unwrap_or(DEFAULT_CLEAR),
                        )),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline.render_pipeline);
            render_pass.set_bind_group(0, &binds.projection.bind_group, &[]);
            render_pass.set_bind_group(1, &binds.glyph_mask, &[]);

            if self.mesh_buffer.index_count > 0 {
                render_pass.set_vertex_buffer(0, self.mesh_buffer.vertices.slice());
                render_pass
                    .set_index_buffer(self.mesh_buffer.indices.slice(), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..self.mesh_buffer.index_count, 0, 0..1);
            }
        }
        frame.encoder = Some(encoder);

        trace!("Time taken to record the frame: {:?}", start.elapsed());
        Ok(())
    }

    fn end_draw(&mut self) -> Result<()> {
        if let Some(encoder) = self.frame.as_mut().and_then(|frame| frame.encoder.take()) {
            self.state.queue.submit(std::iter::once(encoder.finish()));
        }
        Ok(())
    }

    fn present(&mut self) {
        if let Some(frame) = self.frame.take() {
            frame.texture.present();
        }
    }

    fn release_target(&mut self) {
        // Dropping an acquired texture without presenting hands it back to the swap chain.
        self.frame = None;
        self.configured = false;
    }

    fn resize_buffers(&mut self, size: Size2D<u32>) -> Result<()> {
        self.config.width = size.width;
        self.config.height = size.height;
        self.projection
            .set_viewport(Size2D::new(size.width as f32, size.height as f32));
        debug!("Resized the swap buffers to {size:?}");
        Ok(())
    }

    fn recreate_target(&mut self) -> Result<()> {
        if self.config.width == 0 || self.config.height == 0 {
            debug!("Not recreating the surface for an empty window");
            return Ok(());
        }
        let max = self.state.device.limits().max_texture_dimension_2d;
        if self.config.width > max || self.config.height > max {
            bail!(
                "Window size {}x{} exceeds the maximum texture size of {max}",
                self.config.width,
                self.config.height
            );
        }
        self.reconfigure();
        self.configured = true;
        Ok(())
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.frame = None;
        self.binds = None;
        self.configured = false;
        self.disposed = true;
        info!("Released the surface renderer");
    }
}
