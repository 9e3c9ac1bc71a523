//! Vertex layout for the fixed-function draw path
//!
//! This is the wire format written into render-service vertex buffers; its
//! byte layout must match what the draw path binds.

use bytemuck::{Pod, Zeroable};

/// A draw-path vertex with position, normal, packed color, and UV data
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct StaticVertex {
    /// 3D position
    pub position: [f32; 3],
    /// Normal vector
    pub normal: [f32; 3],
    /// Packed vertex color (0xAARRGGBB)
    pub color: u32,
    /// Texture coordinates
    pub uv: [f32; 2],
}

/// Packed opaque white, the draw path's neutral vertex color
pub const COLOR_WHITE: u32 = 0xFFFF_FFFF;

impl Default for StaticVertex {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            normal: [0.0, 0.0, 1.0],
            color: COLOR_WHITE,
            uv: [0.0, 0.0],
        }
    }
}

impl StaticVertex {
    /// Size of a vertex in bytes
    pub const fn size() -> usize {
        std::mem::size_of::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_default() {
        let v = StaticVertex::default();
        assert_eq!(v.position, [0.0, 0.0, 0.0]);
        assert_eq!(v.color, COLOR_WHITE);
    }

    #[test]
    fn test_vertex_size() {
        // position (12) + normal (12) + color (4) + uv (8), no padding
        assert_eq!(StaticVertex::size(), 36);
        assert_eq!(StaticVertex::size(), std::mem::size_of::<StaticVertex>());
    }

    #[test]
    fn test_vertex_bytes() {
        let v = StaticVertex {
            position: [1.0, 2.0, 3.0],
            ..Default::default()
        };
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), StaticVertex::size());
        assert_eq!(&bytes[0..4], &1.0f32.to_le_bytes());
    }
}
