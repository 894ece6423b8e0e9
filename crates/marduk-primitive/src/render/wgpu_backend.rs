use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::vbo::VertexAttributes;

use super::pipeline::DrawUniform;
use super::{DrawMode, PipelineCache, ProgramState, RenderBackend, RenderCtx, ShaderProgram};

struct BoundProgram {
    program: ShaderProgram,
    state: ProgramState,
    attributes: Option<Arc<VertexAttributes>>,
}

/// [`RenderBackend`] recording into a wgpu render pass.
///
/// Buffer creation and writes go through the device/queue of `ctx`; queue
/// writes take effect at the next submit, ahead of the recorded pass. The
/// frame index comes from [`PipelineCache::begin_frame`].
pub struct WgpuBackend<'a, 'p> {
    ctx: RenderCtx<'a>,
    pipelines: &'a mut PipelineCache,
    pass: &'a mut wgpu::RenderPass<'p>,

    bound: Option<BoundProgram>,
    warned_unbound_draw: bool,
}

impl<'a, 'p> WgpuBackend<'a, 'p> {
    pub fn new(
        ctx: RenderCtx<'a>,
        pipelines: &'a mut PipelineCache,
        pass: &'a mut wgpu::RenderPass<'p>,
    ) -> Self {
        Self {
            ctx,
            pipelines,
            pass,
            bound: None,
            warned_unbound_draw: false,
        }
    }

    fn warn_unbound_draw(&mut self, reason: &str) {
        if !self.warned_unbound_draw {
            log::warn!("WgpuBackend: draw skipped, {reason}");
            self.warned_unbound_draw = true;
        }
    }
}

impl RenderBackend for WgpuBackend<'_, '_> {
    type Buffer = wgpu::Buffer;

    fn frame_index(&self) -> u64 {
        self.pipelines.frame_index()
    }

    fn create_vertex_buffer(&mut self, label: &str, contents: &[u8]) -> wgpu::Buffer {
        self.ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            })
    }

    fn write_vertex_buffer(&mut self, buffer: &wgpu::Buffer, contents: &[u8]) {
        self.ctx.queue.write_buffer(buffer, 0, contents);
    }

    fn use_program(&mut self, program: &ShaderProgram, state: ProgramState) {
        self.bound = Some(BoundProgram {
            program: *program,
            state,
            attributes: None,
        });
    }

    fn bind_vertex_buffer(
        &mut self,
        program: &ShaderProgram,
        buffer: &wgpu::Buffer,
        attributes: &Arc<VertexAttributes>,
    ) {
        match self.bound.as_mut() {
            Some(bound) if bound.program == *program => {
                bound.attributes = Some(Arc::clone(attributes));
            }
            _ => {
                log::debug!("WgpuBackend: {} bound without use_program", program.name());
                return;
            }
        }

        self.pass.set_vertex_buffer(0, buffer.slice(..));
    }

    fn unbind_vertex_buffer(&mut self, program: &ShaderProgram, _attributes: &VertexAttributes) {
        // wgpu has no unbind; vertex buffer slots stay set until the pass ends.
        log::trace!("WgpuBackend: unbind {}", program.name());
        if let Some(bound) = self.bound.as_mut() {
            bound.attributes = None;
        }
    }

    fn draw(&mut self, mode: DrawMode, first: u32, count: u32) {
        let Some(bound) = self.bound.as_ref() else {
            self.warn_unbound_draw("no program in use");
            return;
        };
        let Some(attributes) = bound.attributes.as_ref() else {
            self.warn_unbound_draw("no vertex buffer bound");
            return;
        };

        let uniform = DrawUniform {
            viewport: self.ctx.viewport.clamped(),
            translation: bound.state.translation.to_array(),
        };
        let Some(offset) = self.pipelines.push_uniform(&self.ctx, uniform) else { return };

        let Some(pipeline) =
            self.pipelines
                .pipeline(&self.ctx, &bound.program, attributes, mode, bound.state.blending)
        else {
            return;
        };
        self.pass.set_pipeline(pipeline);

        let Some(bind_group) = self.pipelines.bind_group() else { return };
        self.pass.set_bind_group(0, bind_group, &[offset]);
        self.pass.draw(first..first + count, 0..1);
    }
}
