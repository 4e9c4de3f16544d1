//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
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

/// Neon palette (straight alpha)
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.008, 0.024, 0.09, 1.0];
    pub const LANE: [f32; 4] = [0.055, 0.647, 0.914, 0.25];

    pub const SHIP_FILL: [f32; 4] = [0.055, 0.647, 0.914, 0.9];
    pub const SHIP_OUTLINE: [f32; 4] = [0.886, 0.91, 0.941, 0.9];
    pub const COCKPIT: [f32; 4] = [0.008, 0.518, 0.78, 0.8];
    pub const FLAME: [f32; 4] = [0.22, 0.741, 0.973, 0.9];
    pub const STEALTH_GLOW: [f32; 4] = [0.918, 0.702, 0.031, 0.5];

    pub const ORB_GLOW: [f32; 4] = [0.22, 0.741, 0.973, 0.9];
    pub const ORB_RIM: [f32; 4] = [0.647, 0.953, 0.988, 0.7];

    pub const HEAL: [f32; 4] = [0.29, 0.871, 0.502, 0.9];
    pub const STEALTH: [f32; 4] = [0.973, 0.443, 0.443, 0.9];
    pub const AURA: [f32; 4] = [0.98, 0.8, 0.082, 0.95];

    pub const PLAYER_BULLET: [f32; 4] = [0.58, 0.639, 0.722, 0.95];
    pub const ENEMY_BULLET: [f32; 4] = [0.973, 0.443, 0.443, 0.9];

    pub const MUZZLE: [f32; 4] = [0.58, 0.639, 0.722, 0.9];
    pub const IMPACT: [f32; 4] = [0.22, 0.741, 0.973, 0.9];
    pub const ORB_SPARK: [f32; 4] = [0.22, 0.741, 0.973, 0.8];
    pub const EXPLOSION: [f32; 4] = [0.055, 0.647, 0.914, 0.9];

    pub const PAUSE_DIM: [f32; 4] = [0.008, 0.024, 0.09, 0.6];
}
