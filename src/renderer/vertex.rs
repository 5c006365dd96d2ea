//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex with position and color
///
/// Positions are in pixels while a scene is built and in clip space once
/// uploaded.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Neon palette
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.02, 1.0];
    pub const STAR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const HULL: [f32; 4] = [0.0, 0.8, 0.8, 1.0];
    pub const COCKPIT: [f32; 4] = [0.0, 1.0, 1.0, 0.8];
    pub const HULL_LIGHT: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
    pub const FLAME: [f32; 4] = [1.0, 0.65, 0.0, 1.0];
    pub const OBSTACLE_BODY: [f32; 4] = [0.5, 0.0, 0.5, 1.0];
    pub const OBSTACLE_NEON: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
}

/// Same colour with its alpha replaced
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}
