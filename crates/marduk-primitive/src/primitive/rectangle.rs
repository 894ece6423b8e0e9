use anyhow::Result;

use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::{ProgramState, RenderBackend, ShaderProgram};

use super::rectangle_vbo::{RectangleVboConfig, RectangleVertexBuffer};

/// Filled, axis-aligned rectangle.
///
/// Size and color live in the vertex buffer and are rewritten on every
/// change. The position is not part of the geometry: it reaches the shader
/// as the draw translation, so moving a rectangle never dirties its buffer.
#[derive(Debug)]
pub struct Rectangle<H = wgpu::Buffer> {
    position: Vec2,
    width: f32,
    height: f32,
    color: Color,

    visible: bool,
    blending: bool,
    program: ShaderProgram,

    vbo: RectangleVertexBuffer<H>,
}

impl<H> Rectangle<H> {
    /// Opaque white rectangle on the default high-performance buffer.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::with_buffer(x, y, width, height, RectangleVertexBuffer::default())
    }

    pub fn with_config(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        config: RectangleVboConfig,
    ) -> Result<Self> {
        Ok(Self::with_buffer(x, y, width, height, RectangleVertexBuffer::new(config)?))
    }

    fn with_buffer(x: f32, y: f32, width: f32, height: f32, vbo: RectangleVertexBuffer<H>) -> Self {
        let mut rect = Self {
            position: Vec2::new(x, y),
            width,
            height,
            color: Color::WHITE,
            visible: true,
            blending: true,
            program: ShaderProgram::position_color(),
            vbo,
        };

        rect.on_update_vertices();
        rect.on_update_color();
        rect
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
        self.on_update_vertices();
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height;
        self.on_update_vertices();
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.on_update_vertices();
    }

    // ── appearance ────────────────────────────────────────────────────────

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.on_update_color();
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[inline]
    pub fn is_blending_enabled(&self) -> bool {
        self.blending
    }

    #[inline]
    pub fn set_blending_enabled(&mut self, blending: bool) {
        self.blending = blending;
    }

    #[inline]
    pub fn vertex_buffer(&self) -> &RectangleVertexBuffer<H> {
        &self.vbo
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Binds, draws and unbinds the rectangle. Invisible rectangles issue
    /// no backend calls.
    pub fn draw<B>(&mut self, backend: &mut B)
    where
        B: RenderBackend<Buffer = H>,
    {
        if !self.visible {
            return;
        }

        self.pre_draw(backend);
        self.vbo.draw(backend);
        self.post_draw(backend);
    }

    fn pre_draw<B>(&mut self, backend: &mut B)
    where
        B: RenderBackend<Buffer = H>,
    {
        let state = ProgramState {
            translation: self.position,
            blending: self.blending,
        };
        backend.use_program(&self.program, state);
        self.vbo.bind(backend, &self.program);
    }

    fn post_draw<B>(&self, backend: &mut B)
    where
        B: RenderBackend<Buffer = H>,
    {
        self.vbo.unbind(backend, &self.program);
    }

    fn on_update_vertices(&mut self) {
        self.vbo.update_vertices(self.width, self.height);
    }

    fn on_update_color(&mut self) {
        self.vbo.update_color(self.color.packed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::{Call, RecordingBackend};
    use crate::render::DrawMode;
    use crate::vbo::StorageStrategy;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rectangle<usize> {
        Rectangle::new(x, y, w, h)
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn construction_fills_geometry_and_white() {
        let r = rect(3.0, 4.0, 10.0, 5.0);
        let b = r.vertex_buffer();
        assert_eq!(b.positions(), [[0.0, 0.0], [0.0, 5.0], [10.0, 0.0], [10.0, 5.0]]);
        assert!(b.colors().iter().all(|c| c.to_bits() == 0xFFFF_FFFF));
        assert!(b.is_dirty_on_hardware());
        assert!(r.is_blending_enabled());
    }

    #[test]
    fn with_config_selects_storage() {
        let r = Rectangle::<usize>::with_config(
            0.0,
            0.0,
            1.0,
            1.0,
            RectangleVboConfig {
                storage: StorageStrategy::LowMemory,
                ..Default::default()
            },
        )
        .expect("default capacity is valid");
        assert_eq!(r.vertex_buffer().storage_strategy(), StorageStrategy::LowMemory);
    }

    #[test]
    fn with_config_propagates_errors() {
        let result = Rectangle::<usize>::with_config(
            0.0,
            0.0,
            1.0,
            1.0,
            RectangleVboConfig {
                capacity: 4,
                ..Default::default()
            },
        );
        assert!(result.is_err());
    }

    // ── mutation ──────────────────────────────────────────────────────────

    #[test]
    fn resizing_rewrites_vertices() {
        let mut r = rect(0.0, 0.0, 1.0, 1.0);
        r.set_width(8.0);
        r.set_height(2.0);
        assert_eq!(r.vertex_buffer().positions()[3], [8.0, 2.0]);

        r.set_size(-1.0, 6.0);
        assert_eq!(
            r.vertex_buffer().positions(),
            [[0.0, 0.0], [0.0, 6.0], [-1.0, 0.0], [-1.0, 6.0]]
        );
    }

    #[test]
    fn recoloring_rewrites_color_slots() {
        let mut r = rect(0.0, 0.0, 1.0, 1.0);
        let teal = Color::rgba(0, 128, 128, 200);
        r.set_color(teal);
        assert_eq!(r.color(), teal);
        assert_eq!(r.vertex_buffer().colors(), [teal.packed(); 4]);
    }

    #[test]
    fn moving_does_not_dirty_the_buffer() {
        let mut r = rect(0.0, 0.0, 1.0, 1.0);
        let mut backend = RecordingBackend::default();
        r.draw(&mut backend);
        assert!(!r.vertex_buffer().is_dirty_on_hardware());

        r.set_position(50.0, 60.0);
        assert!(!r.vertex_buffer().is_dirty_on_hardware());
        assert_eq!(r.position(), Vec2::new(50.0, 60.0));
    }

    // ── drawing ───────────────────────────────────────────────────────────

    #[test]
    fn draw_runs_program_bind_draw_unbind() {
        let mut r = rect(5.0, 6.0, 10.0, 5.0);
        r.set_blending_enabled(false);
        let mut backend = RecordingBackend::default();

        r.draw(&mut backend);

        let expected_state = ProgramState {
            translation: Vec2::new(5.0, 6.0),
            blending: false,
        };
        assert_eq!(backend.calls.len(), 5);
        assert_eq!(
            backend.calls[0],
            Call::UseProgram { program: "position_color", state: expected_state }
        );
        assert!(matches!(backend.calls[1], Call::Create { id: 0, .. }));
        assert_eq!(backend.calls[2], Call::Bind { program: "position_color", id: 0, stride: 12 });
        assert_eq!(
            backend.calls[3],
            Call::Draw { mode: DrawMode::TriangleStrip, first: 0, count: 4 }
        );
        assert_eq!(backend.calls[4], Call::Unbind { program: "position_color" });
    }

    #[test]
    fn second_frame_uploads_only_after_change() {
        let mut r = rect(0.0, 0.0, 2.0, 2.0);
        let mut backend = RecordingBackend::default();
        r.draw(&mut backend);
        backend.begin_frame();
        r.draw(&mut backend);
        assert_eq!(backend.uploads(), 1);

        backend.begin_frame();
        r.set_color(Color::BLACK);
        r.draw(&mut backend);
        assert_eq!(backend.uploads(), 2);
        assert_eq!(backend.created(), 1);
    }

    #[test]
    fn resize_between_draws_in_one_frame_keeps_first_draw_intact() {
        let mut r = rect(0.0, 0.0, 10.0, 5.0);
        let mut backend = RecordingBackend::default();

        r.draw(&mut backend);
        r.set_width(20.0);
        r.draw(&mut backend);

        let bound: Vec<usize> = backend
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Bind { id, .. } => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(bound, [0, 1]);

        // Vertex 2 is the top-right corner; its x sits at bytes 24..28.
        let top_right_x = |id| backend.last_upload(id).map(|b| b[24..28].to_vec());
        assert_eq!(top_right_x(0), Some(10.0f32.to_ne_bytes().to_vec()));
        assert_eq!(top_right_x(1), Some(20.0f32.to_ne_bytes().to_vec()));
        assert_eq!(backend.uploads(), 2);
    }

    #[test]
    fn invisible_rectangle_issues_no_calls() {
        let mut r = rect(0.0, 0.0, 2.0, 2.0);
        r.set_visible(false);
        let mut backend = RecordingBackend::default();
        r.draw(&mut backend);
        assert!(backend.calls.is_empty());
        assert!(r.vertex_buffer().is_dirty_on_hardware());
    }
}
