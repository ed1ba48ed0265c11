//! # Vertex — Per-Point Data Sent to the GPU
//!
//! Two vertex formats, one per pipeline. Both are `#[repr(C)]` + `Pod` so a
//! `&[LineVertex]` can be cast to bytes and uploaded without copying.
//!
//! ```text
//! LineVertex (24 bytes)                TextVertex (32 bytes)
//! ┌──────────┬────────────────┐        ┌──────────┬──────────┬────────────────┐
//! │ position │ color          │        │ position │ uv       │ color          │
//! │ [f32; 2] │ [f32; 4]       │        │ [f32; 2] │ [f32; 2] │ [f32; 4]       │
//! │ offset 0 │ offset 8       │        │ offset 0 │ offset 8 │ offset 16      │
//! └──────────┴────────────────┘        └──────────┴──────────┴────────────────┘
//! ```
//!
//! Line positions are in world units (already multiplied by the object's
//! model matrix). Text positions are in window pixels, origin top-left.

use bytemuck::{Pod, Zeroable};

/// One endpoint of a world-space line segment.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl LineVertex {
    pub(crate) const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            // color
            wgpu::VertexAttribute {
                offset: 8,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    };
}

/// One corner of a glyph (or underline) quad in pixel space.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TextVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl TextVertex {
    pub(crate) const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<TextVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            wgpu::VertexAttribute {
                offset: 8,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            },
            wgpu::VertexAttribute {
                offset: 16,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    };
}

/// View-projection matrix uploaded as a uniform buffer.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub(crate) struct ViewUniform {
    pub view_proj: [[f32; 4]; 4],
}
