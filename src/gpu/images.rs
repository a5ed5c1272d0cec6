//! Textured image quads.
//!
//! Every decoded image is uploaded once into its own texture with a bind
//! group. Per frame the page lists which images to draw where; all quads
//! share one vertex buffer and are drawn with their own bind group.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use wgpu::util::DeviceExt;

use crate::assets::DecodedImage;

/// One vertex of an image quad.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ImageVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub opacity: f32,
    pub _pad: f32,
}

impl ImageVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x2,
        2 => Float32,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ImageVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// A request to draw the image `key` into a screen rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDraw {
    /// Asset path the image was loaded from.
    pub key: String,
    pub min: Vec2,
    pub size: Vec2,
    pub opacity: f32,
    /// Source aspect ratio; the image is cropped to fill like
    /// `object-fit: cover`.
    pub aspect: f32,
}

impl ImageDraw {
    /// The six vertices of this quad.
    pub fn vertices(&self) -> [ImageVertex; 6] {
        let (u0, v0, u1, v1) = cover_uv(self.aspect, self.size);
        let max = self.min + self.size;
        let v = |x: f32, y: f32, u: f32, t: f32| ImageVertex {
            position: [x, y],
            uv: [u, t],
            opacity: self.opacity,
            _pad: 0.0,
        };
        let tl = v(self.min.x, self.min.y, u0, v0);
        let tr = v(max.x, self.min.y, u1, v0);
        let br = v(max.x, max.y, u1, v1);
        let bl = v(self.min.x, max.y, u0, v1);
        [tl, tr, br, tl, br, bl]
    }
}

/// UV window that crops an image of aspect `image_aspect` to fill `target`.
pub fn cover_uv(image_aspect: f32, target: Vec2) -> (f32, f32, f32, f32) {
    if image_aspect <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return (0.0, 0.0, 1.0, 1.0);
    }
    let target_aspect = target.x / target.y;
    if image_aspect > target_aspect {
        // Wider than the slot: crop the sides.
        let w = target_aspect / image_aspect;
        let u0 = (1.0 - w) * 0.5;
        (u0, 0.0, u0 + w, 1.0)
    } else {
        let h = image_aspect / target_aspect;
        let v0 = (1.0 - h) * 0.5;
        (0.0, v0, 1.0, v0 + h)
    }
}

pub const IMAGE_SHADER: &str = r#"
struct Screen {
    size: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0) var<uniform> screen: Screen;
@group(1) @binding(0) var image_texture: texture_2d<f32>;
@group(1) @binding(1) var image_sampler: sampler;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) opacity: f32,
};

struct VertexOutput {
    @builtin(position) clip: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) opacity: f32,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let ndc = vec2<f32>(
        in.position.x / screen.size.x * 2.0 - 1.0,
        1.0 - in.position.y / screen.size.y * 2.0,
    );
    out.clip = vec4<f32>(ndc, 0.0, 1.0);
    out.uv = in.uv;
    out.opacity = in.opacity;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let c = textureSample(image_texture, image_sampler, in.uv);
    return vec4<f32>(c.rgb, c.a * in.opacity);
}
"#;

struct ImageTexture {
    bind_group: wgpu::BindGroup,
}

/// Image pipeline plus the uploaded textures.
pub struct ImagePipeline {
    pipeline: wgpu::RenderPipeline,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    textures: HashMap<String, ImageTexture>,
}

impl ImagePipeline {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        screen_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Image Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Image Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Image Shader"),
            source: wgpu::ShaderSource::Wgsl(IMAGE_SHADER.into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Image Pipeline Layout"),
            bind_group_layouts: &[screen_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Image Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[ImageVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            texture_layout,
            sampler,
            textures: HashMap::new(),
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.textures.contains_key(key)
    }

    /// Upload `image` under `key`. A key already present is left alone.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, key: &str, image: &DecodedImage) {
        if self.has(key) {
            return;
        }
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(key),
                size: wgpu::Extent3d {
                    width: image.width,
                    height: image.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &image.rgba,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Image Bind Group"),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        tracing::debug!(key, width = image.width, height = image.height, "uploaded image texture");
        self.textures.insert(key.to_string(), ImageTexture { bind_group });
    }

    /// Record draws for every image in `draws` that has been uploaded.
    ///
    /// `buffer` must hold the vertices of `draws`, in order.
    pub fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        screen: &wgpu::BindGroup,
        buffer: &wgpu::Buffer,
        draws: &[ImageDraw],
    ) {
        if draws.is_empty() {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, screen, &[]);
        pass.set_vertex_buffer(0, buffer.slice(..));
        for (i, draw) in draws.iter().enumerate() {
            if let Some(texture) = self.textures.get(&draw.key) {
                pass.set_bind_group(1, &texture.bind_group, &[]);
                let start = (i * 6) as u32;
                pass.draw(start..start + 6, 0..1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_uv_crops_wide_image() {
        let (u0, v0, u1, v1) = cover_uv(2.0, Vec2::new(100.0, 100.0));
        assert!((u0 - 0.25).abs() < 1e-6 && (u1 - 0.75).abs() < 1e-6);
        assert_eq!((v0, v1), (0.0, 1.0));
    }

    #[test]
    fn test_cover_uv_crops_tall_image() {
        let (u0, v0, u1, v1) = cover_uv(0.5, Vec2::new(100.0, 100.0));
        assert_eq!((u0, u1), (0.0, 1.0));
        assert!((v0 - 0.25).abs() < 1e-6 && (v1 - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_quad_vertices() {
        let draw = ImageDraw {
            key: "a.png".into(),
            min: Vec2::new(10.0, 10.0),
            size: Vec2::new(20.0, 20.0),
            opacity: 0.5,
            aspect: 1.0,
        };
        let v = draw.vertices();
        assert_eq!(v[0].position, [10.0, 10.0]);
        assert_eq!(v[2].position, [30.0, 30.0]);
        assert_eq!(v[2].uv, [1.0, 1.0]);
        assert!(v.iter().all(|v| v.opacity == 0.5));
    }

    #[test]
    fn test_shader_is_valid_wgsl() {
        let module = naga::front::wgsl::parse_str(IMAGE_SHADER).unwrap();
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator.validate(&module).unwrap();
    }
}
