/// One interleaved vertex attribute.
///
/// `location` matches the `@location(n)` of the shader input, `offset` is in
/// bytes from the start of the vertex.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    pub location: u32,
    pub name: &'static str,
    pub format: wgpu::VertexFormat,
    pub offset: u64,
}

impl VertexAttribute {
    /// Integer formats read as `[0, 1]` (or `[-1, 1]`) floats in the shader.
    pub fn is_normalized(&self) -> bool {
        use wgpu::VertexFormat as F;
        matches!(
            self.format,
            F::Unorm8x2
                | F::Unorm8x4
                | F::Snorm8x2
                | F::Snorm8x4
                | F::Unorm16x2
                | F::Unorm16x4
                | F::Snorm16x2
                | F::Snorm16x4
        )
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.format.size()
    }
}

/// Interleaved attribute layout of a vertex buffer.
///
/// Built once per buffer through [`VertexAttributesBuilder`]; offsets and the
/// stride follow from the order and formats of the added attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexAttributes {
    attributes: Vec<VertexAttribute>,
    raw: Vec<wgpu::VertexAttribute>,
    stride: u64,
}

impl VertexAttributes {
    #[inline]
    pub fn builder() -> VertexAttributesBuilder {
        VertexAttributesBuilder::default()
    }

    /// Bytes per vertex.
    #[inline]
    pub fn stride(&self) -> u64 {
        self.stride
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VertexAttribute> {
        self.attributes.iter()
    }

    pub fn get(&self, name: &str) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// wgpu view of the layout, for pipeline creation.
    pub fn layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.raw,
        }
    }
}

#[derive(Debug, Default)]
pub struct VertexAttributesBuilder {
    attributes: Vec<VertexAttribute>,
    offset: u64,
}

impl VertexAttributesBuilder {
    /// Appends an attribute directly after the previous one.
    pub fn add(mut self, location: u32, name: &'static str, format: wgpu::VertexFormat) -> Self {
        self.attributes.push(VertexAttribute {
            location,
            name,
            format,
            offset: self.offset,
        });
        self.offset += format.size();
        self
    }

    pub fn build(self) -> VertexAttributes {
        let raw = self
            .attributes
            .iter()
            .map(|a| wgpu::VertexAttribute {
                format: a.format,
                offset: a.offset,
                shader_location: a.location,
            })
            .collect();

        VertexAttributes {
            attributes: self.attributes,
            raw,
            stride: self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position_color() -> VertexAttributes {
        VertexAttributes::builder()
            .add(0, "a_position", wgpu::VertexFormat::Float32x2)
            .add(1, "a_color", wgpu::VertexFormat::Unorm8x4)
            .build()
    }

    #[test]
    fn offsets_accumulate_in_order() {
        let attrs = position_color();
        assert_eq!(attrs.get("a_position").map(|a| a.offset), Some(0));
        assert_eq!(attrs.get("a_color").map(|a| a.offset), Some(8));
    }

    #[test]
    fn stride_is_three_floats() {
        assert_eq!(position_color().stride(), 12);
    }

    #[test]
    fn normalization_follows_format() {
        let attrs = position_color();
        assert!(!attrs.get("a_position").is_some_and(VertexAttribute::is_normalized));
        assert!(attrs.get("a_color").is_some_and(VertexAttribute::is_normalized));
    }

    #[test]
    fn wgpu_layout_mirrors_attributes() {
        let attrs = position_color();
        let layout = attrs.layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].shader_location, 1);
        assert_eq!(layout.attributes[1].offset, 8);
    }

    #[test]
    fn empty_builder_has_zero_stride() {
        let attrs = VertexAttributes::builder().build();
        assert!(attrs.is_empty());
        assert_eq!(attrs.stride(), 0);
    }
}
