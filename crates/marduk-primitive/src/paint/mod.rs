//! Paint model shared between shapes and vertex buffers.
//!
//! Scope:
//! - 8-bit straight-alpha color owned by shapes
//! - packed single-float color written into vertex buffers

pub mod color;

pub use color::{Color, PackedColor};
