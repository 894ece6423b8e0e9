//! Marduk primitive crate.
//!
//! Renderable 2D primitives backed by small vertex buffers. A primitive
//! writes its geometry and packed colors into CPU storage, flags the buffer
//! dirty, and the next bind uploads it before drawing through a
//! position/color shader program.
//!
//! GPU access goes through [`render::RenderBackend`]; [`render::WgpuBackend`]
//! is the wgpu implementation.

pub mod coords;
pub mod logging;
pub mod paint;
pub mod primitive;
pub mod render;
pub mod vbo;

pub use paint::{Color, PackedColor};
pub use primitive::{Rectangle, RectangleVboConfig, RectangleVertexBuffer};
pub use vbo::StorageStrategy;
