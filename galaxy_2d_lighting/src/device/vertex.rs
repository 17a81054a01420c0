/// Vertex formats submitted by the lighting pipeline, and their layouts.
///
/// All three formats are `#[repr(C)]` and `Pod`, so backends can upload
/// `VertexData::as_bytes()` directly and describe it with `VertexData::layout()`.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use super::Color;

/// Primitive topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTopology {
    /// Triangle list (3 vertices per primitive)
    TriangleList,
    /// Triangle strip (primitive count + 2 vertices)
    TriangleStrip,
}

impl PrimitiveTopology {
    /// Number of vertices (or indices) consumed by `primitive_count` triangles
    pub fn element_count(&self, primitive_count: u32) -> u32 {
        match self {
            PrimitiveTopology::TriangleList => primitive_count * 3,
            PrimitiveTopology::TriangleStrip => {
                if primitive_count == 0 { 0 } else { primitive_count + 2 }
            }
        }
    }
}

/// Vertex attribute component format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum BufferFormat {
    /// Two 32-bit floats
    R32G32_SFLOAT,
    /// Four normalized bytes
    R8G8B8A8_UNORM,
}

impl BufferFormat {
    pub fn size_bytes(&self) -> u32 {
        match self {
            BufferFormat::R32G32_SFLOAT => 8,
            BufferFormat::R8G8B8A8_UNORM => 4,
        }
    }
}

/// Vertex attribute description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Attribute location in shader
    pub location: u32,
    /// Format of the attribute
    pub format: BufferFormat,
    /// Offset in bytes from the start of the vertex
    pub offset: u32,
}

/// Vertex input layout (single interleaved binding)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    /// Stride in bytes between consecutive vertices
    pub stride: u32,
    /// Vertex attributes
    pub attributes: &'static [VertexAttribute],
}

// ===== SHADOW HULL VERTEX =====

/// Transformed hull vertex consumed by the shadow techniques.
///
/// The color alpha is `1 - hull.opacity`: how much light the hull lets through.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct ShadowHullVertex {
    pub position: Vec2,
    pub normal: Vec2,
    pub color: Color,
}

impl ShadowHullVertex {
    pub const LAYOUT: VertexLayout = VertexLayout {
        stride: 20,
        attributes: &[
            VertexAttribute { location: 0, format: BufferFormat::R32G32_SFLOAT, offset: 0 },
            VertexAttribute { location: 1, format: BufferFormat::R32G32_SFLOAT, offset: 8 },
            VertexAttribute { location: 2, format: BufferFormat::R8G8B8A8_UNORM, offset: 16 },
        ],
    };

    pub fn new(position: Vec2, normal: Vec2, color: Color) -> Self {
        Self { position, normal, color }
    }
}

// ===== LIGHT VERTEX =====

/// Tinted, textured vertex of the light cone
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct LightVertex {
    pub position: Vec2,
    pub color: Color,
    pub tex_coord: Vec2,
}

impl LightVertex {
    pub const LAYOUT: VertexLayout = VertexLayout {
        stride: 20,
        attributes: &[
            VertexAttribute { location: 0, format: BufferFormat::R32G32_SFLOAT, offset: 0 },
            VertexAttribute { location: 1, format: BufferFormat::R8G8B8A8_UNORM, offset: 8 },
            VertexAttribute { location: 2, format: BufferFormat::R32G32_SFLOAT, offset: 12 },
        ],
    };

    pub fn new(position: Vec2, color: Color, tex_coord: Vec2) -> Self {
        Self { position, color, tex_coord }
    }
}

// ===== TEXTURED VERTEX =====

/// Screen-space quad vertex (full-screen copies, blur, alpha clear)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: Vec2,
    pub tex_coord: Vec2,
}

impl TexturedVertex {
    pub const LAYOUT: VertexLayout = VertexLayout {
        stride: 16,
        attributes: &[
            VertexAttribute { location: 0, format: BufferFormat::R32G32_SFLOAT, offset: 0 },
            VertexAttribute { location: 1, format: BufferFormat::R32G32_SFLOAT, offset: 8 },
        ],
    };

    /// Unit quad covering NDC [-1, 1]², ordered for a triangle strip
    pub const UNIT_QUAD: [TexturedVertex; 4] = [
        TexturedVertex { position: Vec2::new(-1.0, 1.0), tex_coord: Vec2::new(0.0, 0.0) },
        TexturedVertex { position: Vec2::new(1.0, 1.0), tex_coord: Vec2::new(1.0, 0.0) },
        TexturedVertex { position: Vec2::new(-1.0, -1.0), tex_coord: Vec2::new(0.0, 1.0) },
        TexturedVertex { position: Vec2::new(1.0, -1.0), tex_coord: Vec2::new(1.0, 1.0) },
    ];
}

// ===== VERTEX DATA =====

/// Borrowed vertex slice of one of the lighting vertex formats
#[derive(Debug, Clone, Copy)]
pub enum VertexData<'a> {
    Shadow(&'a [ShadowHullVertex]),
    Light(&'a [LightVertex]),
    Textured(&'a [TexturedVertex]),
}

impl<'a> VertexData<'a> {
    pub fn len(&self) -> usize {
        match self {
            VertexData::Shadow(v) => v.len(),
            VertexData::Light(v) => v.len(),
            VertexData::Textured(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn layout(&self) -> VertexLayout {
        match self {
            VertexData::Shadow(_) => ShadowHullVertex::LAYOUT,
            VertexData::Light(_) => LightVertex::LAYOUT,
            VertexData::Textured(_) => TexturedVertex::LAYOUT,
        }
    }

    /// Raw interleaved bytes, ready for upload
    pub fn as_bytes(&self) -> &'a [u8] {
        match *self {
            VertexData::Shadow(v) => bytemuck::cast_slice(v),
            VertexData::Light(v) => bytemuck::cast_slice(v),
            VertexData::Textured(v) => bytemuck::cast_slice(v),
        }
    }
}
