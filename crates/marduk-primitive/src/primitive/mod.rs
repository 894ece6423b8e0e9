//! Renderable primitives.

mod rectangle;
mod rectangle_vbo;

pub use rectangle::Rectangle;
pub use rectangle_vbo::{
    default_attributes, RectangleVboConfig, RectangleVertexBuffer, COLOR_INDEX, RECTANGLE_SIZE,
    VERTEX_INDEX_X, VERTEX_INDEX_Y, VERTEX_SIZE, VERTICES_PER_RECTANGLE,
};
