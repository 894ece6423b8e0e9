//! Test double that records backend calls instead of touching a GPU.

use std::sync::Arc;

use crate::vbo::VertexAttributes;

use super::{DrawMode, ProgramState, RenderBackend, ShaderProgram};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Create { id: usize, label: String, bytes: Vec<u8> },
    Write { id: usize, bytes: Vec<u8> },
    UseProgram { program: &'static str, state: ProgramState },
    Bind { program: &'static str, id: usize, stride: u64 },
    Unbind { program: &'static str },
    Draw { mode: DrawMode, first: u32, count: u32 },
}

/// Buffers are plain ids handed out in creation order.
#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    pub calls: Vec<Call>,
    /// Layout handed to each bind, in call order.
    pub bound_layouts: Vec<Arc<VertexAttributes>>,
    next_id: usize,
    frame: u64,
}

impl RecordingBackend {
    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    pub fn created(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Create { .. })).count()
    }

    pub fn uploads(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Create { .. } | Call::Write { .. }))
            .count()
    }

    /// Bytes most recently sent to the GPU for buffer `id`.
    pub fn last_upload(&self, id: usize) -> Option<&[u8]> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Create { id: i, bytes, .. } | Call::Write { id: i, bytes } if *i == id => {
                Some(bytes.as_slice())
            }
            _ => None,
        })
    }
}

impl RenderBackend for RecordingBackend {
    type Buffer = usize;

    fn frame_index(&self) -> u64 {
        self.frame
    }

    fn create_vertex_buffer(&mut self, label: &str, contents: &[u8]) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.calls.push(Call::Create {
            id,
            label: label.to_owned(),
            bytes: contents.to_vec(),
        });
        id
    }

    fn write_vertex_buffer(&mut self, buffer: &usize, contents: &[u8]) {
        self.calls.push(Call::Write {
            id: *buffer,
            bytes: contents.to_vec(),
        });
    }

    fn use_program(&mut self, program: &ShaderProgram, state: ProgramState) {
        self.calls.push(Call::UseProgram {
            program: program.name(),
            state,
        });
    }

    fn bind_vertex_buffer(
        &mut self,
        program: &ShaderProgram,
        buffer: &usize,
        attributes: &Arc<VertexAttributes>,
    ) {
        self.bound_layouts.push(Arc::clone(attributes));
        self.calls.push(Call::Bind {
            program: program.name(),
            id: *buffer,
            stride: attributes.stride(),
        });
    }

    fn unbind_vertex_buffer(&mut self, program: &ShaderProgram, _attributes: &VertexAttributes) {
        self.calls.push(Call::Unbind {
            program: program.name(),
        });
    }

    fn draw(&mut self, mode: DrawMode, first: u32, count: u32) {
        self.calls.push(Call::Draw { mode, first, count });
    }
}
