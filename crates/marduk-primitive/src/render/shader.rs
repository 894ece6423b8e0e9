/// A WGSL shader program: one module with a vertex and a fragment entry point.
///
/// Programs are plain descriptions. Backends compile them lazily and cache
/// the result keyed by [`ShaderProgram::name`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ShaderProgram {
    name: &'static str,
    source: &'static str,
    vertex_entry: &'static str,
    fragment_entry: &'static str,
}

impl ShaderProgram {
    pub const ATTRIBUTE_POSITION_LOCATION: u32 = 0;
    pub const ATTRIBUTE_POSITION: &'static str = "a_position";
    pub const ATTRIBUTE_COLOR_LOCATION: u32 = 1;
    pub const ATTRIBUTE_COLOR: &'static str = "a_color";

    pub const fn new(
        name: &'static str,
        source: &'static str,
        vertex_entry: &'static str,
        fragment_entry: &'static str,
    ) -> Self {
        Self {
            name,
            source,
            vertex_entry,
            fragment_entry,
        }
    }

    /// Flat-colored geometry: `vec2` position in logical pixels plus a
    /// normalized 4 × 8-bit color per vertex.
    pub const fn position_color() -> Self {
        Self::new(
            "position_color",
            include_str!("shaders/position_color.wgsl"),
            "vs_main",
            "fs_main",
        )
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn source(&self) -> &'static str {
        self.source
    }

    #[inline]
    pub const fn vertex_entry(&self) -> &'static str {
        self.vertex_entry
    }

    #[inline]
    pub const fn fragment_entry(&self) -> &'static str {
        self.fragment_entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_color_declares_its_entry_points_and_locations() {
        let p = ShaderProgram::position_color();
        assert!(p.source().contains("fn vs_main"));
        assert!(p.source().contains("fn fs_main"));
        assert!(p.source().contains("@location(0) position"));
        assert!(p.source().contains("@location(1) color"));
    }
}
