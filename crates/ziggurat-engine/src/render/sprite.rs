use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::camera::Camera2d;
use crate::coords::Rect;
use crate::render::{RenderCtx, RenderTarget};
use crate::texture::{Texture, TextureId};

/// Textured quad renderer.
///
/// Draws one sampled texture into a world-space destination rect, viewed
/// through a [`Camera2d`]. Geometry is provided in logical pixels and
/// converted to NDC in the vertex shader via the camera uniform.
#[derive(Default)]
pub struct SpriteRenderer {
    gpu: Option<GpuResources>,

    /// Bind group cached per texture identity.
    bind_group: Option<(TextureId, wgpu::BindGroup)>,
}

impl SpriteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `texture` into `dest` as seen by `camera`.
    ///
    /// Fully off-screen sprites are culled before any GPU work.
    pub fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        texture: &Texture,
        dest: Rect,
        camera: &Camera2d,
    ) {
        if dest.is_empty() {
            return;
        }
        if camera.visible_rect(ctx.viewport).intersect(dest).is_none() {
            return;
        }

        let format_ok = self
            .gpu
            .as_ref()
            .is_some_and(|res| res.format == ctx.surface_format);
        if !format_ok {
            // First draw, or the surface format changed; the cached bind
            // group references the old layout, so it goes too.
            self.gpu = Some(GpuResources::build(ctx));
            self.bind_group = None;
        }
        let Some(res) = self.gpu.as_ref() else {
            return;
        };

        let id = texture.id();
        if !self.bind_group.as_ref().is_some_and(|(bound, _)| *bound == id) {
            self.bind_group = Some((id, res.bind_texture(ctx, texture)));
        }
        let Some((_, bind_group)) = self.bind_group.as_ref() else {
            return;
        };

        res.write_camera(ctx, camera);
        res.write_instance(ctx, dest);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("ziggurat sprite pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&res.pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, res.quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, res.instance_vbo.slice(..));
        rpass.set_index_buffer(res.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..1);
    }
}

/// Device objects the renderer builds on first draw. `format` records the
/// surface format the pipeline targets; a format change rebuilds the lot.
struct GpuResources {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    camera_ubo: wgpu::Buffer,
    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,
    instance_vbo: wgpu::Buffer,
}

impl GpuResources {
    fn build(ctx: &RenderCtx<'_>) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ziggurat sprite shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("ziggurat sprite bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::VERTEX,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: false,
                                min_binding_size: wgpu::BufferSize::new(
                                    std::mem::size_of::<CameraUniform>() as u64,
                                ),
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 2,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("ziggurat sprite pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("ziggurat sprite pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), SpriteInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    // Decoded images carry straight (non-premultiplied) alpha.
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let camera_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ziggurat sprite camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let quad_vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ziggurat sprite quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let quad_ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ziggurat sprite quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        // One sprite per draw call, rewritten each frame.
        let instance_vbo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ziggurat sprite instance vbo"),
            size: std::mem::size_of::<SpriteInstance>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            format: ctx.surface_format,
            pipeline,
            bind_group_layout,
            camera_ubo,
            quad_vbo,
            quad_ibo,
            instance_vbo,
        }
    }

    fn bind_texture(&self, ctx: &RenderCtx<'_>, texture: &Texture) -> wgpu::BindGroup {
        ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ziggurat sprite bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.camera_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(texture.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(texture.sampler()),
                },
            ],
        })
    }

    fn write_camera(&self, ctx: &RenderCtx<'_>, camera: &Camera2d) {
        // The vertex shader divides by the viewport extent.
        let vw = ctx.viewport.width.max(1.0);
        let vh = ctx.viewport.height.max(1.0);
        let offset = camera.screen_offset(ctx.viewport);
        let u = CameraUniform {
            viewport: [vw, vh],
            offset: [offset.x, offset.y],
            zoom: camera.zoom(),
            _pad: [0.0; 3],
        };
        ctx.queue.write_buffer(&self.camera_ubo, 0, bytemuck::bytes_of(&u));
    }

    fn write_instance(&self, ctx: &RenderCtx<'_>, dest: Rect) {
        let instance = SpriteInstance {
            origin: [dest.origin.x, dest.origin.y],
            size: [dest.size.x, dest.size.y],
        };
        ctx.queue
            .write_buffer(&self.instance_vbo, 0, bytemuck::bytes_of(&instance));
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CameraUniform {
    viewport: [f32; 2],
    offset: [f32; 2],
    zoom: f32,
    _pad: [f32; 3], // 16-byte alignment
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    corner: [f32; 2], // 0..1
    uv: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // corner
        1 => Float32x2  // uv
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

// Texel row 0 is the picture's bottom row, so V runs upward on screen:
// the screen-top corners sample V = 1.
const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { corner: [0.0, 0.0], uv: [0.0, 1.0] },
    QuadVertex { corner: [1.0, 0.0], uv: [1.0, 1.0] },
    QuadVertex { corner: [1.0, 1.0], uv: [1.0, 0.0] },
    QuadVertex { corner: [0.0, 1.0], uv: [0.0, 0.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SpriteInstance {
    origin: [f32; 2],
    size: [f32; 2],
}

impl SpriteInstance {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        2 => Float32x2, // origin
        3 => Float32x2  // size
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
