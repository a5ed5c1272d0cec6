//! GPU renderer for the page scene.
//!
//! Each frame is clear-and-redraw: the page hands over a [`Scene`] (shapes
//! below, images in the middle, overlay shapes on top) and the renderer
//! streams it into vertex buffers and draws it in one render pass.

pub mod images;
pub mod shapes;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use winit::window::Window;

use crate::assets::DecodedImage;
use crate::error::GpuError;

pub use images::{ImageDraw, ImagePipeline, ImageVertex};
pub use shapes::{ShapeBatch, ShapeKind, ShapeVertex};

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct ScreenUniforms {
    size: [f32; 2],
    _padding: [f32; 2],
}

/// Everything drawn in one frame, back to front.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Background colour, sRGB components in `[0, 1]`.
    pub background: [f32; 4],
    pub shapes: ShapeBatch,
    pub images: Vec<ImageDraw>,
    pub overlay: ShapeBatch,
}

impl Scene {
    /// Empty the draw lists, keeping their allocations.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.images.clear();
        self.overlay.clear();
    }
}

/// A vertex buffer that grows to fit what is written into it.
struct StreamBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: u64,
}

impl StreamBuffer {
    const MIN_CAPACITY: u64 = 4096;

    fn new(device: &wgpu::Device, label: &'static str) -> Self {
        Self {
            label,
            buffer: Self::allocate(device, label, Self::MIN_CAPACITY),
            capacity: Self::MIN_CAPACITY,
        }
    }

    fn allocate(device: &wgpu::Device, label: &'static str, size: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, bytes: &[u8]) {
        let needed = bytes.len() as u64;
        if needed > self.capacity {
            self.capacity = needed.next_power_of_two();
            self.buffer = Self::allocate(device, self.label, self.capacity);
        }
        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
    }
}

pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    screen_buffer: wgpu::Buffer,
    screen_bind_group: wgpu::BindGroup,
    shape_pipeline: wgpu::RenderPipeline,
    shape_buffer: StreamBuffer,
    images: ImagePipeline,
    image_buffer: StreamBuffer,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let info = adapter.get_info();
        tracing::info!(adapter = %info.name, backend = ?info.backend, "selected GPU adapter");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        // Colours are sRGB values blended in sRGB space, as in a browser.
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or(caps.formats.first())
            .copied()
            .ok_or(GpuError::UnsupportedSurface)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let screen_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Screen Uniforms"),
            size: std::mem::size_of::<ScreenUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let screen_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Screen Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let screen_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Screen Bind Group"),
            layout: &screen_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_buffer.as_entire_binding(),
            }],
        });

        let shape_pipeline = shapes::create_pipeline(&device, format, &screen_layout);
        let images = ImagePipeline::new(&device, format, &screen_layout);
        let shape_buffer = StreamBuffer::new(&device, "Shape Vertices");
        let image_buffer = StreamBuffer::new(&device, "Image Vertices");

        tracing::info!(?format, width = config.width, height = config.height, "surface configured");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            screen_buffer,
            screen_bind_group,
            shape_pipeline,
            shape_buffer,
            images,
            image_buffer,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure the surface at its current size.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn has_image(&self, key: &str) -> bool {
        self.images.has(key)
    }

    pub fn upload_image(&mut self, key: &str, image: &DecodedImage) {
        self.images.upload(&self.device, &self.queue, key, image);
    }

    pub fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let uniforms = ScreenUniforms {
            size: [self.config.width as f32, self.config.height as f32],
            _padding: [0.0; 2],
        };
        self.queue
            .write_buffer(&self.screen_buffer, 0, bytemuck::bytes_of(&uniforms));

        let shape_count = scene.shapes.vertices().len() as u32;
        let overlay_count = scene.overlay.vertices().len() as u32;
        let mut shape_vertices = Vec::with_capacity((shape_count + overlay_count) as usize);
        shape_vertices.extend_from_slice(scene.shapes.vertices());
        shape_vertices.extend_from_slice(scene.overlay.vertices());
        self.shape_buffer
            .write(&self.device, &self.queue, bytemuck::cast_slice(&shape_vertices));

        let image_vertices: Vec<ImageVertex> =
            scene.images.iter().flat_map(|d| d.vertices()).collect();
        self.image_buffer
            .write(&self.device, &self.queue, bytemuck::cast_slice(&image_vertices));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let [r, g, b, a] = scene.background;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Page Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if shape_count > 0 {
                pass.set_pipeline(&self.shape_pipeline);
                pass.set_bind_group(0, &self.screen_bind_group, &[]);
                pass.set_vertex_buffer(0, self.shape_buffer.buffer.slice(..));
                pass.draw(0..shape_count, 0..1);
            }

            self.images.draw(
                &mut pass,
                &self.screen_bind_group,
                &self.image_buffer.buffer,
                &scene.images,
            );

            if overlay_count > 0 {
                pass.set_pipeline(&self.shape_pipeline);
                pass.set_bind_group(0, &self.screen_bind_group, &[]);
                pass.set_vertex_buffer(0, self.shape_buffer.buffer.slice(..));
                pass.draw(shape_count..shape_count + overlay_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
