use std::sync::Arc;

use crate::coords::Vec2;
use crate::vbo::VertexAttributes;

use super::ShaderProgram;

/// Primitive assembly mode of a draw call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DrawMode {
    PointList,
    LineList,
    LineStrip,
    TriangleList,
    TriangleStrip,
}

impl DrawMode {
    pub fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            DrawMode::PointList => wgpu::PrimitiveTopology::PointList,
            DrawMode::LineList => wgpu::PrimitiveTopology::LineList,
            DrawMode::LineStrip => wgpu::PrimitiveTopology::LineStrip,
            DrawMode::TriangleList => wgpu::PrimitiveTopology::TriangleList,
            DrawMode::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
        }
    }
}

/// Per-draw state a shape hands to its shader program.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProgramState {
    /// Offset from shape-local space to logical pixels.
    pub translation: Vec2,
    pub blending: bool,
}

impl Default for ProgramState {
    fn default() -> Self {
        Self {
            translation: Vec2::zero(),
            blending: true,
        }
    }
}

/// GPU operations a vertex buffer and its shape need to reach the screen.
///
/// Calls arrive in a fixed order per shape and frame:
/// `use_program` → `bind_vertex_buffer` → `draw` → `unbind_vertex_buffer`.
/// Buffer creation and writes happen inside the bind step, only when the
/// CPU contents changed.
///
/// `write_vertex_buffer` may take effect later than the draws recorded
/// around it (wgpu applies queue writes at submit). Callers must not write
/// a buffer that was already bound in the current [`frame_index`]; they
/// create a fresh one instead.
///
/// [`frame_index`]: RenderBackend::frame_index
pub trait RenderBackend {
    /// Handle of a GPU-resident vertex buffer.
    type Buffer;

    /// Identifies the current submission; changes once per frame.
    fn frame_index(&self) -> u64;

    fn create_vertex_buffer(&mut self, label: &str, contents: &[u8]) -> Self::Buffer;

    fn write_vertex_buffer(&mut self, buffer: &Self::Buffer, contents: &[u8]);

    fn use_program(&mut self, program: &ShaderProgram, state: ProgramState);

    fn bind_vertex_buffer(
        &mut self,
        program: &ShaderProgram,
        buffer: &Self::Buffer,
        attributes: &Arc<VertexAttributes>,
    );

    fn unbind_vertex_buffer(&mut self, program: &ShaderProgram, attributes: &VertexAttributes);

    fn draw(&mut self, mode: DrawMode, first: u32, count: u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_mode_maps_to_strip_topology() {
        assert_eq!(DrawMode::TriangleStrip.topology(), wgpu::PrimitiveTopology::TriangleStrip);
        assert_eq!(DrawMode::TriangleList.topology(), wgpu::PrimitiveTopology::TriangleList);
    }

    #[test]
    fn default_state_blends_at_origin() {
        let s = ProgramState::default();
        assert!(s.blending);
        assert_eq!(s.translation, Vec2::zero());
    }
}
