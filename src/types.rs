//! Vertex formats and the fixed geometry each scene variant uploads.
//!
//! Layouts are `#[repr(C)]` and [`Pod`] so vertex slices can be handed to
//! `glBufferData` through [`bytemuck::cast_slice`].

use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};

/// One float attribute inside a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// `layout (location = N)` in the vertex shader.
    pub location: u32,
    /// Number of `f32` components (2 for `vec2`, 3 for `vec3`).
    pub components: i32,
    /// Byte offset from the start of the vertex.
    pub offset: usize,
}

/// A vertex type with a layout known at compile time.
pub trait VertexLayout: Pod {
    /// Attributes in location order.
    const ATTRIBUTES: &'static [VertexAttribute];

    /// Distance in bytes between consecutive vertices.
    #[must_use]
    fn stride() -> usize {
        size_of::<Self>()
    }
}

/// Position only.
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// Position in normalized device coordinates.
    pub position: [f32; 3],
}

impl VertexLayout for Vertex {
    const ATTRIBUTES: &'static [VertexAttribute] = &[VertexAttribute {
        location: 0,
        components: 3,
        offset: offset_of!(Vertex, position),
    }];
}

/// Position followed by an RGB color.
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct ColorVertex {
    /// Position in normalized device coordinates.
    pub position: [f32; 3],
    /// Linear RGB.
    pub color: [f32; 3],
}

impl VertexLayout for ColorVertex {
    const ATTRIBUTES: &'static [VertexAttribute] = &[
        VertexAttribute {
            location: 0,
            components: 3,
            offset: offset_of!(ColorVertex, position),
        },
        VertexAttribute {
            location: 1,
            components: 3,
            offset: offset_of!(ColorVertex, color),
        },
    ];
}

/// Position followed by a texture coordinate.
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct TexturedVertex {
    /// Position in normalized device coordinates.
    pub position: [f32; 3],
    /// Texture coordinate, origin at the bottom left.
    pub tex_coord: [f32; 2],
}

impl VertexLayout for TexturedVertex {
    const ATTRIBUTES: &'static [VertexAttribute] = &[
        VertexAttribute {
            location: 0,
            components: 3,
            offset: offset_of!(TexturedVertex, position),
        },
        VertexAttribute {
            location: 1,
            components: 2,
            offset: offset_of!(TexturedVertex, tex_coord),
        },
    ];
}

/// A triangle in normalized device coordinates.
pub const TRIANGLE: [Vertex; 3] = [
    Vertex {
        position: [-0.5, -0.5, 0.0],
    },
    Vertex {
        position: [0.5, -0.5, 0.0],
    },
    Vertex {
        position: [0.0, 0.5, 0.0],
    },
];

/// The triangle with red, green and blue corners.
pub const COLORED_TRIANGLE: [ColorVertex; 3] = [
    ColorVertex {
        position: [-0.5, -0.5, 0.0],
        color: [1.0, 0.0, 0.0],
    },
    ColorVertex {
        position: [0.5, -0.5, 0.0],
        color: [0.0, 1.0, 0.0],
    },
    ColorVertex {
        position: [0.0, 0.5, 0.0],
        color: [0.0, 0.0, 1.0],
    },
];

/// Corners of a quad: top right, bottom right, bottom left, top left.
pub const QUAD: [Vertex; 4] = [
    Vertex {
        position: [0.5, 0.5, 0.0],
    },
    Vertex {
        position: [0.5, -0.5, 0.0],
    },
    Vertex {
        position: [-0.5, -0.5, 0.0],
    },
    Vertex {
        position: [-0.5, 0.5, 0.0],
    },
];

/// [`QUAD`] with the texture mapped once across it.
pub const TEXTURED_QUAD: [TexturedVertex; 4] = [
    TexturedVertex {
        position: [0.5, 0.5, 0.0],
        tex_coord: [1.0, 1.0],
    },
    TexturedVertex {
        position: [0.5, -0.5, 0.0],
        tex_coord: [1.0, 0.0],
    },
    TexturedVertex {
        position: [-0.5, -0.5, 0.0],
        tex_coord: [0.0, 0.0],
    },
    TexturedVertex {
        position: [-0.5, 0.5, 0.0],
        tex_coord: [0.0, 1.0],
    },
];

/// Two triangles sharing the quad's diagonal.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides_match_component_counts() {
        assert_eq!(Vertex::stride(), 3 * size_of::<f32>());
        assert_eq!(ColorVertex::stride(), 6 * size_of::<f32>());
        assert_eq!(TexturedVertex::stride(), 5 * size_of::<f32>());
    }

    #[test]
    fn attributes_follow_the_position() {
        assert_eq!(ColorVertex::ATTRIBUTES[1].offset, 3 * size_of::<f32>());
        assert_eq!(TexturedVertex::ATTRIBUTES[1].offset, 3 * size_of::<f32>());
        assert_eq!(TexturedVertex::ATTRIBUTES[1].components, 2);
    }

    #[test]
    fn quad_indices_reference_existing_vertices() {
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD.len()));
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < TEXTURED_QUAD.len()));
    }

    #[test]
    fn geometry_casts_to_tightly_packed_bytes() {
        let bytes: &[u8] = bytemuck::cast_slice(&TEXTURED_QUAD);
        assert_eq!(bytes.len(), TEXTURED_QUAD.len() * TexturedVertex::stride());
    }
}
