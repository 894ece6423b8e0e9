//! Vertex buffer objects.
//!
//! A [`VertexBufferObject`] pairs CPU storage (one of two
//! [`StorageStrategy`] backends) with a lazily created GPU buffer and a
//! dirty flag deciding when the GPU copy is refreshed.

mod attributes;
mod buffer;
mod storage;

pub use attributes::{VertexAttribute, VertexAttributes, VertexAttributesBuilder};
pub use buffer::VertexBufferObject;
pub use storage::{BufferStorage, DirectStorage, ResidentStorage, StorageStrategy};
