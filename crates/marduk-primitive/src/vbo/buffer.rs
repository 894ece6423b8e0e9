use std::fmt;
use std::sync::Arc;

use crate::render::{DrawMode, RenderBackend, ShaderProgram};

use super::{BufferStorage, StorageStrategy, VertexAttributes};

/// CPU storage plus its GPU mirror.
///
/// Writers update the storage and call [`set_dirty_on_hardware`]. The
/// hardware copy is created on the first [`bind`] and re-uploaded on a later
/// `bind` only while the dirty flag is set; the upload is the single place
/// that clears it. A new buffer starts dirty.
///
/// A buffer already bound in the current frame is never written in place:
/// the recorded draw would see the new contents. A dirty bind in the same
/// frame creates a replacement buffer instead.
///
/// `H` is the backend's buffer handle. The GPU buffer is released with the
/// handle when this object is dropped.
///
/// [`set_dirty_on_hardware`]: VertexBufferObject::set_dirty_on_hardware
/// [`bind`]: VertexBufferObject::bind
pub struct VertexBufferObject<H = wgpu::Buffer> {
    label: &'static str,
    strategy: StorageStrategy,
    storage: Box<dyn BufferStorage>,
    attributes: Arc<VertexAttributes>,

    hardware: Option<H>,
    dirty_on_hardware: bool,
    bound_frame: Option<u64>,
}

impl<H> VertexBufferObject<H> {
    pub fn new(
        label: &'static str,
        capacity: usize,
        strategy: StorageStrategy,
        attributes: VertexAttributes,
    ) -> Self {
        Self {
            label,
            strategy,
            storage: strategy.allocate(capacity),
            attributes: Arc::new(attributes),
            hardware: None,
            dirty_on_hardware: true,
            bound_frame: None,
        }
    }

    #[inline]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Capacity in floats.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    #[inline]
    pub fn storage_strategy(&self) -> StorageStrategy {
        self.strategy
    }

    #[inline]
    pub fn storage(&self) -> &dyn BufferStorage {
        self.storage.as_ref()
    }

    /// Mutable storage access; the caller owns the dirty-flag bookkeeping.
    #[inline]
    pub(crate) fn storage_mut(&mut self) -> &mut dyn BufferStorage {
        self.storage.as_mut()
    }

    #[inline]
    pub fn attributes(&self) -> &VertexAttributes {
        &self.attributes
    }

    #[inline]
    pub fn is_dirty_on_hardware(&self) -> bool {
        self.dirty_on_hardware
    }

    #[inline]
    pub fn set_dirty_on_hardware(&mut self) {
        self.dirty_on_hardware = true;
    }

    #[inline]
    pub fn is_loaded_on_hardware(&self) -> bool {
        self.hardware.is_some()
    }

    /// Uploads pending contents, then binds the buffer for `program`.
    pub fn bind<B>(&mut self, backend: &mut B, program: &ShaderProgram)
    where
        B: RenderBackend<Buffer = H>,
    {
        self.update_on_hardware(backend);

        if let Some(hardware) = self.hardware.as_ref() {
            backend.bind_vertex_buffer(program, hardware, &self.attributes);
            self.bound_frame = Some(backend.frame_index());
        }
    }

    pub fn unbind<B>(&self, backend: &mut B, program: &ShaderProgram)
    where
        B: RenderBackend<Buffer = H>,
    {
        backend.unbind_vertex_buffer(program, &self.attributes);
    }

    /// Draws `count` vertices from the start of the buffer.
    pub fn draw<B>(&self, backend: &mut B, mode: DrawMode, count: u32)
    where
        B: RenderBackend<Buffer = H>,
    {
        backend.draw(mode, 0, count);
    }

    fn update_on_hardware<B>(&mut self, backend: &mut B)
    where
        B: RenderBackend<Buffer = H>,
    {
        let bound_this_frame = self.bound_frame == Some(backend.frame_index());

        match self.hardware.as_ref() {
            None => {
                log::debug!(
                    "{}: creating hardware buffer ({} floats, {:?})",
                    self.label,
                    self.storage.capacity(),
                    self.strategy
                );
                self.hardware =
                    Some(backend.create_vertex_buffer(self.label, self.storage.bytes()));
            }
            Some(_) if self.dirty_on_hardware && bound_this_frame => {
                log::trace!("{}: replacing buffer already drawn this frame", self.label);
                self.hardware =
                    Some(backend.create_vertex_buffer(self.label, self.storage.bytes()));
            }
            Some(hardware) if self.dirty_on_hardware => {
                log::trace!("{}: uploading {} bytes", self.label, self.storage.bytes().len());
                backend.write_vertex_buffer(hardware, self.storage.bytes());
            }
            Some(_) => return,
        }

        self.dirty_on_hardware = false;
    }
}

impl<H> fmt::Debug for VertexBufferObject<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexBufferObject")
            .field("label", &self.label)
            .field("strategy", &self.strategy)
            .field("capacity", &self.storage.capacity())
            .field("loaded_on_hardware", &self.hardware.is_some())
            .field("dirty_on_hardware", &self.dirty_on_hardware)
            .finish()
    }
}
