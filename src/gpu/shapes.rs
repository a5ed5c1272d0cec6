//! Flat 2D shapes: dots, lines, rectangles and rounded cards.
//!
//! Shapes are expanded on the CPU into a triangle list of [`ShapeVertex`],
//! six vertices per quad, in pixel coordinates. The fragment shader turns
//! each quad into its final shape with a signed-distance test, so a circle
//! and a rounded card cost the same two triangles.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Vec2, Vec3};

use crate::signals::TiltOutput;

/// Distance from the viewer to the card plane, as in a CSS `perspective`.
pub const PERSPECTIVE_PX: f32 = 1000.0;

/// How the fragment shader shapes a quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ShapeKind {
    /// Fill the whole quad. Used for lines and sharp rectangles.
    Solid = 0,
    /// Inscribed circle.
    Circle = 1,
    /// Rectangle with rounded corners.
    Rounded = 2,
}

/// One vertex of a shape quad.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ShapeVertex {
    /// Pixel position, y down.
    pub position: [f32; 2],
    /// Quad-local coordinate in `[-1, 1]`.
    pub local: [f32; 2],
    /// Straight (non-premultiplied) RGBA.
    pub color: [f32; 4],
    /// `kind`, half width, half height, corner radius (pixels).
    pub params: [f32; 4],
}

impl ShapeVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x2,
        2 => Float32x4,
        3 => Float32x4,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShapeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Local coordinates of the quad corners: top-left, top-right,
/// bottom-right, bottom-left.
const CORNERS: [Vec2; 4] = [
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(-1.0, 1.0),
];

/// A growable list of shape vertices.
#[derive(Debug, Clone, Default)]
pub struct ShapeBatch {
    vertices: Vec<ShapeVertex>,
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    #[inline]
    pub fn vertices(&self) -> &[ShapeVertex] {
        &self.vertices
    }

    /// Number of quads.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len() / 6
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Push a quad given its four on-screen corners in [`CORNERS`] order.
    pub fn push_quad(&mut self, corners: [Vec2; 4], color: [f32; 4], kind: ShapeKind, half: Vec2, radius: f32) {
        if color[3] <= 0.0 {
            return;
        }
        let params = [kind as u32 as f32, half.x, half.y, radius];
        let vertex = |i: usize| ShapeVertex {
            position: corners[i].to_array(),
            local: CORNERS[i].to_array(),
            color,
            params,
        };
        self.vertices
            .extend([vertex(0), vertex(1), vertex(2), vertex(0), vertex(2), vertex(3)]);
    }

    /// Axis-aligned rectangle, optionally with rounded corners.
    pub fn push_rect(&mut self, min: Vec2, size: Vec2, color: [f32; 4], radius: f32) {
        let half = size * 0.5;
        let centre = min + half;
        let corners = CORNERS.map(|c| centre + c * half);
        let kind = if radius > 0.0 {
            ShapeKind::Rounded
        } else {
            ShapeKind::Solid
        };
        self.push_quad(corners, color, kind, half, radius);
    }

    /// Filled circle.
    pub fn push_circle(&mut self, centre: Vec2, radius: f32, color: [f32; 4]) {
        // Pad by a pixel so the anti-aliased rim is not clipped.
        let extent = radius + 1.0;
        let corners = CORNERS.map(|c| centre + c * extent);
        self.push_quad(corners, color, ShapeKind::Circle, Vec2::splat(extent), radius);
    }

    /// Straight line segment of the given width.
    ///
    /// Hairlines thinner than a pixel are drawn one pixel wide with their
    /// alpha scaled down instead.
    pub fn push_line(&mut self, a: Vec2, b: Vec2, width: f32, color: [f32; 4]) {
        let along = b - a;
        let len = along.length();
        if len <= f32::EPSILON || width <= 0.0 {
            return;
        }
        let (width, color) = if width < 1.0 {
            (1.0, [color[0], color[1], color[2], color[3] * width])
        } else {
            (width, color)
        };
        let normal = along.perp() / len * (width * 0.5);
        let corners = [a - normal, b - normal, b + normal, a + normal];
        self.push_quad(corners, color, ShapeKind::Solid, Vec2::new(len * 0.5, width * 0.5), 0.0);
    }

    /// Card rotated and scaled about its centre, then projected with
    /// [`PERSPECTIVE_PX`].
    pub fn push_tilted_rect(&mut self, min: Vec2, size: Vec2, color: [f32; 4], radius: f32, tilt: TiltOutput) {
        self.push_tilted_rect_about(min + size * 0.5, min, size, color, radius, tilt);
    }

    /// Rectangle inside a tilted card, projected about the card's centre
    /// `pivot` so it moves with the card.
    pub fn push_tilted_rect_about(
        &mut self,
        pivot: Vec2,
        min: Vec2,
        size: Vec2,
        color: [f32; 4],
        radius: f32,
        tilt: TiltOutput,
    ) {
        let half = size * 0.5;
        let centre = min + half;
        let corners = CORNERS.map(|c| pivot + project(centre - pivot + c * half, tilt));
        let kind = if radius > 0.0 {
            ShapeKind::Rounded
        } else {
            ShapeKind::Solid
        };
        self.push_quad(corners, color, kind, half, radius);
    }

    /// Append every quad of `other`.
    pub fn extend_from(&mut self, other: &ShapeBatch) {
        self.vertices.extend_from_slice(&other.vertices);
    }
}

/// Project an offset from a card's centre through its tilt.
///
/// Same convention as CSS `rotateX() rotateY()` with y down and z toward
/// the viewer: positive `rotate_x` pushes the top edge away, positive
/// `rotate_y` the right edge.
pub fn project(offset: Vec2, tilt: TiltOutput) -> Vec2 {
    let rotation = Mat3::from_rotation_x(tilt.rotate_x.to_radians())
        * Mat3::from_rotation_y(tilt.rotate_y.to_radians());
    let p = rotation * Vec3::new(offset.x, offset.y, 0.0) * tilt.scale;
    let depth = (PERSPECTIVE_PX - p.z).max(1.0);
    let factor = PERSPECTIVE_PX / depth;
    Vec2::new(p.x * factor, p.y * factor)
}

/// WGSL for shape quads.
pub const SHAPE_SHADER: &str = r#"
struct Screen {
    size: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0) var<uniform> screen: Screen;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) local: vec2<f32>,
    @location(2) color: vec4<f32>,
    @location(3) params: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip: vec4<f32>,
    @location(0) local: vec2<f32>,
    @location(1) color: vec4<f32>,
    @location(2) params: vec4<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let ndc = vec2<f32>(
        in.position.x / screen.size.x * 2.0 - 1.0,
        1.0 - in.position.y / screen.size.y * 2.0,
    );
    out.clip = vec4<f32>(ndc, 0.0, 1.0);
    out.local = in.local;
    out.color = in.color;
    out.params = in.params;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let kind = in.params.x;

    // Circles keep their true radius in params.w inside a padded quad.
    let circle_d = length(in.local);
    let edge = clamp(in.params.w / max(in.params.y, 0.0001), 0.0, 1.0);
    let circle_aa = max(fwidth(circle_d), 0.0001);
    let circle = 1.0 - smoothstep(edge - circle_aa, edge, circle_d);

    let half = max(in.params.yz, vec2<f32>(0.5, 0.5));
    let p = in.local * half;
    let r = min(in.params.w, min(half.x, half.y));
    let q = abs(p) - half + vec2<f32>(r, r);
    let dist = length(max(q, vec2<f32>(0.0, 0.0))) + min(max(q.x, q.y), 0.0) - r;
    let rect_aa = max(fwidth(dist), 0.0001);
    let rounded = 1.0 - smoothstep(-rect_aa, rect_aa, dist);

    let coverage = select(select(1.0, circle, kind > 0.5), rounded, kind > 1.5);
    return vec4<f32>(in.color.rgb, in.color.a * coverage);
}
"#;

/// Render pipeline for [`ShapeVertex`] triangle lists.
pub fn create_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    screen_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Shape Shader"),
        source: wgpu::ShaderSource::Wgsl(SHAPE_SHADER.into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Shape Pipeline Layout"),
        bind_group_layouts: &[screen_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Shape Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[ShapeVertex::layout()],
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
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    #[test]
    fn test_vertex_layout_size() {
        assert_eq!(std::mem::size_of::<ShapeVertex>(), 48);
    }

    #[test]
    fn test_rect_corners() {
        let mut batch = ShapeBatch::new();
        batch.push_rect(Vec2::new(10.0, 20.0), Vec2::new(100.0, 50.0), WHITE, 0.0);
        assert_eq!(batch.len(), 1);

        let v = batch.vertices();
        assert_eq!(v[0].position, [10.0, 20.0]);
        assert_eq!(v[2].position, [110.0, 70.0]);
        assert_eq!(v[0].params[0], ShapeKind::Solid as u32 as f32);
    }

    #[test]
    fn test_transparent_shapes_skipped() {
        let mut batch = ShapeBatch::new();
        batch.push_circle(Vec2::ZERO, 3.0, [1.0, 1.0, 1.0, 0.0]);
        batch.push_line(Vec2::ZERO, Vec2::ZERO, 1.0, WHITE);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_line_width() {
        let mut batch = ShapeBatch::new();
        batch.push_line(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 2.0, WHITE);
        let ys: Vec<f32> = batch.vertices().iter().map(|v| v.position[1]).collect();
        assert!(ys.iter().all(|y| (y.abs() - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_neutral_tilt_is_identity() {
        let offset = Vec2::new(40.0, -25.0);
        let p = project(offset, TiltOutput::NEUTRAL);
        assert!((p - offset).length() < 1e-4);
    }

    #[test]
    fn test_tilt_pushes_top_edge_away() {
        let tilt = TiltOutput {
            rotate_x: 10.0,
            rotate_y: 0.0,
            scale: 1.0,
        };
        let top = project(Vec2::new(100.0, -100.0), tilt);
        let bottom = project(Vec2::new(100.0, 100.0), tilt);
        // The farther edge appears narrower.
        assert!(top.x.abs() < bottom.x.abs());
    }

    #[test]
    fn test_shader_is_valid_wgsl() {
        let module = naga::front::wgsl::parse_str(SHAPE_SHADER).unwrap();
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator.validate(&module).unwrap();
    }
}
