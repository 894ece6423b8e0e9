//! GPU rendering seam.
//!
//! Shapes and their vertex buffers talk to the GPU only through
//! [`RenderBackend`]. [`WgpuBackend`] is the production implementation; it
//! records into a wgpu render pass and owns nothing beyond the pass borrow.
//! Pipelines and per-draw uniforms live in [`PipelineCache`], which outlives
//! frames.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.

mod backend;
mod ctx;
mod pipeline;
mod shader;
mod wgpu_backend;

#[cfg(test)]
pub(crate) mod recording;

pub use backend::{DrawMode, ProgramState, RenderBackend};
pub use ctx::{RenderCtx, RenderTarget};
pub use pipeline::PipelineCache;
pub use shader::ShaderProgram;
pub use wgpu_backend::WgpuBackend;
