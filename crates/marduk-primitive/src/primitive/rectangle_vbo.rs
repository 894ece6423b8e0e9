use anyhow::Result;

use crate::paint::PackedColor;
use crate::render::{DrawMode, RenderBackend, ShaderProgram};
use crate::vbo::{StorageStrategy, VertexAttributes, VertexBufferObject};

pub const VERTEX_INDEX_X: usize = 0;
pub const VERTEX_INDEX_Y: usize = VERTEX_INDEX_X + 1;
pub const COLOR_INDEX: usize = VERTEX_INDEX_Y + 1;

/// Floats per vertex: `x`, `y`, packed color.
pub const VERTEX_SIZE: usize = 2 + 1;
pub const VERTICES_PER_RECTANGLE: usize = 4;
pub const RECTANGLE_SIZE: usize = VERTEX_SIZE * VERTICES_PER_RECTANGLE;

/// Position (`Float32x2`) followed by color (`Unorm8x4`), 12 bytes per vertex.
pub fn default_attributes() -> VertexAttributes {
    VertexAttributes::builder()
        .add(
            ShaderProgram::ATTRIBUTE_POSITION_LOCATION,
            ShaderProgram::ATTRIBUTE_POSITION,
            wgpu::VertexFormat::Float32x2,
        )
        .add(
            ShaderProgram::ATTRIBUTE_COLOR_LOCATION,
            ShaderProgram::ATTRIBUTE_COLOR,
            wgpu::VertexFormat::Unorm8x4,
        )
        .build()
}

/// Construction parameters for a [`RectangleVertexBuffer`].
#[derive(Debug, Clone)]
pub struct RectangleVboConfig {
    /// Capacity in floats; at least [`RECTANGLE_SIZE`].
    pub capacity: usize,
    pub storage: StorageStrategy,
    /// Must describe a [`VERTEX_SIZE`]-float vertex.
    pub attributes: VertexAttributes,
}

impl Default for RectangleVboConfig {
    fn default() -> Self {
        Self {
            capacity: RECTANGLE_SIZE,
            storage: StorageStrategy::HighPerformance,
            attributes: default_attributes(),
        }
    }
}

/// Four-vertex triangle strip covering a `width × height` rectangle.
///
/// Vertex order is fixed: top-left, bottom-left, top-right, bottom-right
/// in shape-local space. Any other order draws a bowtie instead of a quad.
#[derive(Debug)]
pub struct RectangleVertexBuffer<H = wgpu::Buffer> {
    vbo: VertexBufferObject<H>,
}

impl<H> RectangleVertexBuffer<H> {
    pub fn new(config: RectangleVboConfig) -> Result<Self> {
        anyhow::ensure!(
            config.capacity >= RECTANGLE_SIZE,
            "rectangle vertex buffer needs {RECTANGLE_SIZE} floats, got capacity {}",
            config.capacity
        );
        let expected_stride = (VERTEX_SIZE * std::mem::size_of::<f32>()) as u64;
        anyhow::ensure!(
            config.attributes.stride() == expected_stride,
            "rectangle vertex layout must be {expected_stride} bytes per vertex, got {}",
            config.attributes.stride()
        );

        Ok(Self::from_validated(config))
    }

    fn from_validated(config: RectangleVboConfig) -> Self {
        Self {
            vbo: VertexBufferObject::new(
                "marduk rectangle vbo",
                config.capacity,
                config.storage,
                config.attributes,
            ),
        }
    }

    /// Writes the corner positions `(0,0)`, `(0,h)`, `(w,0)`, `(w,h)`.
    ///
    /// Values are stored as given: negative sizes flip the quad, NaN stays NaN.
    pub fn update_vertices(&mut self, width: f32, height: f32) {
        let (x, y) = (0.0, 0.0);
        let (x2, y2) = (width, height);

        let corners = [[x, y], [x, y2], [x2, y], [x2, y2]];
        let storage = self.vbo.storage_mut();
        for (vertex, [cx, cy]) in corners.into_iter().enumerate() {
            storage.put(vertex * VERTEX_SIZE + VERTEX_INDEX_X, cx);
            storage.put(vertex * VERTEX_SIZE + VERTEX_INDEX_Y, cy);
        }

        self.vbo.set_dirty_on_hardware();
    }

    /// Flat-fills the color slot of every vertex with `packed`.
    pub fn update_color(&mut self, packed: PackedColor) {
        let storage = self.vbo.storage_mut();
        for vertex in 0..VERTICES_PER_RECTANGLE {
            storage.put(vertex * VERTEX_SIZE + COLOR_INDEX, packed.as_f32());
        }

        self.vbo.set_dirty_on_hardware();
    }

    pub fn bind<B>(&mut self, backend: &mut B, program: &ShaderProgram)
    where
        B: RenderBackend<Buffer = H>,
    {
        self.vbo.bind(backend, program);
    }

    pub fn draw<B>(&self, backend: &mut B)
    where
        B: RenderBackend<Buffer = H>,
    {
        self.vbo
            .draw(backend, DrawMode::TriangleStrip, VERTICES_PER_RECTANGLE as u32);
    }

    pub fn unbind<B>(&self, backend: &mut B, program: &ShaderProgram)
    where
        B: RenderBackend<Buffer = H>,
    {
        self.vbo.unbind(backend, program);
    }

    /// Stored positions in strip order.
    pub fn positions(&self) -> [[f32; 2]; VERTICES_PER_RECTANGLE] {
        let storage = self.vbo.storage();
        std::array::from_fn(|v| {
            [
                storage.get(v * VERTEX_SIZE + VERTEX_INDEX_X),
                storage.get(v * VERTEX_SIZE + VERTEX_INDEX_Y),
            ]
        })
    }

    /// Stored color slots in strip order.
    pub fn colors(&self) -> [PackedColor; VERTICES_PER_RECTANGLE] {
        let storage = self.vbo.storage();
        std::array::from_fn(|v| PackedColor::from_f32(storage.get(v * VERTEX_SIZE + COLOR_INDEX)))
    }

    #[inline]
    pub fn is_dirty_on_hardware(&self) -> bool {
        self.vbo.is_dirty_on_hardware()
    }

    #[inline]
    pub fn storage_strategy(&self) -> StorageStrategy {
        self.vbo.storage_strategy()
    }

    #[inline]
    pub fn vertex_buffer(&self) -> &VertexBufferObject<H> {
        &self.vbo
    }
}

impl<H> Default for RectangleVertexBuffer<H> {
    /// Uses [`RectangleVboConfig::default`], which always passes validation.
    fn default() -> Self {
        Self::from_validated(RectangleVboConfig::default())
    }
}
