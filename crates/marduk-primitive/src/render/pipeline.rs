use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::num::NonZeroU64;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};

use crate::vbo::VertexAttributes;

use super::{DrawMode, RenderCtx, ShaderProgram};

// ── draw uniform ──────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct DrawUniform {
    pub viewport: [f32; 2],
    pub translation: [f32; 2],
}

const DRAW_UNIFORM_SIZE: u64 = std::mem::size_of::<DrawUniform>() as u64;

fn draw_uniform_binding_size() -> NonZeroU64 {
    NonZeroU64::new(DRAW_UNIFORM_SIZE).expect("DrawUniform has non-zero size by construction")
}

#[inline]
fn align_up(value: u64, alignment: u64) -> u64 {
    value.div_ceil(alignment) * alignment
}

// ── pipeline key ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PipelineKey {
    program: &'static str,
    layout: Arc<VertexAttributes>,
    topology: wgpu::PrimitiveTopology,
    blending: bool,
    format: wgpu::TextureFormat,
}

// ── uniform ring ──────────────────────────────────────────────────────────

struct UniformRing {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    stride: u64,
    cursor: u32,
}

/// GPU objects shared by every draw of a frame.
///
/// Pipelines are created on first use per (program, vertex layout, topology,
/// blending, surface format). Per-draw uniforms live in a ring of
/// [`MAX_DRAWS_PER_FRAME`](Self::MAX_DRAWS_PER_FRAME) dynamic-offset slots;
/// call [`begin_frame`](Self::begin_frame) once per submitted frame.
#[derive(Default)]
pub struct PipelineCache {
    shaders: HashMap<&'static str, wgpu::ShaderModule>,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    pipeline_layout: Option<wgpu::PipelineLayout>,
    uniforms: Option<UniformRing>,

    frame_index: u64,
    warned_ring_full: bool,
}

impl PipelineCache {
    pub const MAX_DRAWS_PER_FRAME: u32 = 1024;

    pub fn new() -> Self {
        Self::default()
    }

    /// Rewinds the uniform ring and advances the frame index.
    ///
    /// Queue writes land before the next submit, so neither uniform slots nor
    /// vertex buffers may be rewritten within one submission.
    pub fn begin_frame(&mut self) {
        if let Some(ring) = self.uniforms.as_mut() {
            ring.cursor = 0;
        }
        self.frame_index += 1;
    }

    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Number of compiled pipelines.
    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    /// Writes `uniform` into the next free slot and returns its dynamic offset.
    pub(crate) fn push_uniform(
        &mut self,
        ctx: &RenderCtx<'_>,
        uniform: DrawUniform,
    ) -> Option<u32> {
        self.ensure_layouts(ctx);
        self.ensure_uniforms(ctx);
        let ring = self.uniforms.as_mut()?;

        if ring.cursor >= Self::MAX_DRAWS_PER_FRAME {
            if !self.warned_ring_full {
                log::warn!(
                    "PipelineCache: more than {} draws in one frame; extra draws skipped",
                    Self::MAX_DRAWS_PER_FRAME
                );
                self.warned_ring_full = true;
            }
            return None;
        }

        let offset = u64::from(ring.cursor) * ring.stride;
        ctx.queue.write_buffer(&ring.buffer, offset, bytemuck::bytes_of(&uniform));
        ring.cursor += 1;

        u32::try_from(offset).ok()
    }

    pub(crate) fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.uniforms.as_ref().map(|r| &r.bind_group)
    }

    pub(crate) fn pipeline(
        &mut self,
        ctx: &RenderCtx<'_>,
        program: &ShaderProgram,
        attributes: &Arc<VertexAttributes>,
        mode: DrawMode,
        blending: bool,
    ) -> Option<&wgpu::RenderPipeline> {
        self.ensure_layouts(ctx);
        let layout = self.pipeline_layout.as_ref()?;

        let key = PipelineKey {
            program: program.name(),
            layout: Arc::clone(attributes),
            topology: mode.topology(),
            blending,
            format: ctx.surface_format,
        };

        let pipeline = match self.pipelines.entry(key) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                let module = self.shaders.entry(program.name()).or_insert_with(|| {
                    ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
                        label: Some(program.name()),
                        source: wgpu::ShaderSource::Wgsl(program.source().into()),
                    })
                });
                log::debug!(
                    "PipelineCache: creating pipeline for {} ({:?}, blending: {})",
                    program.name(),
                    mode,
                    blending
                );
                let pipeline = create_pipeline(ctx, module, layout, program, e.key());
                e.insert(pipeline)
            }
        };

        Some(&*pipeline)
    }

    fn ensure_layouts(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group_layout.is_some() && self.pipeline_layout.is_some() {
            return;
        }

        let bind_group_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("marduk primitive draw bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: Some(draw_uniform_binding_size()),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("marduk primitive pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        self.bind_group_layout = Some(bind_group_layout);
        self.pipeline_layout = Some(pipeline_layout);
    }

    fn ensure_uniforms(&mut self, ctx: &RenderCtx<'_>) {
        if self.uniforms.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let alignment = u64::from(ctx.device.limits().min_uniform_buffer_offset_alignment);
        let stride = align_up(DRAW_UNIFORM_SIZE, alignment.max(1));

        let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("marduk primitive draw ubo"),
            size: stride * u64::from(Self::MAX_DRAWS_PER_FRAME),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("marduk primitive draw bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: Some(draw_uniform_binding_size()),
                }),
            }],
        });

        self.uniforms = Some(UniformRing {
            buffer,
            bind_group,
            stride,
            cursor: 0,
        });
    }
}

fn create_pipeline(
    ctx: &RenderCtx<'_>,
    module: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    program: &ShaderProgram,
    key: &PipelineKey,
) -> wgpu::RenderPipeline {
    let blend = if key.blending {
        wgpu::BlendState::ALPHA_BLENDING
    } else {
        wgpu::BlendState::REPLACE
    };

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(program.name()),
        layout: Some(layout),

        vertex: wgpu::VertexState {
            module,
            entry_point: Some(program.vertex_entry()),
            compilation_options: Default::default(),
            buffers: &[key.layout.layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: Some(program.fragment_entry()),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: key.format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: key.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Strip winding alternates; negative sizes also flip it.
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
