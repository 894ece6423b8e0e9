//! Coordinate types shared by shapes and renderers.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Shape geometry is local (origin at the shape's top-left corner). The
//! shape position is applied in the vertex shader, together with the
//! viewport-to-NDC conversion.

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
