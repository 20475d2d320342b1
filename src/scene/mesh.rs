//! Double-sided panel quads.
//!
//! Each panel is drawn as two coplanar quads centered on the panel's content
//! origin: the front faces +Z, the back faces -Z with reversed winding.
//! Vertices are `Pod` so a renderer can upload them as-is.

use glam::{Vec2, Vec3};

/// Interleaved vertex: position, normal, texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PanelVertex {
    /// Content-local position.
    pub position: [f32; 3],
    /// Face normal.
    pub normal: [f32; 3],
    /// Texture coordinate before the side's [`super::UvTransform`].
    pub uv: [f32; 2],
}

/// Which side of the sheet a quad shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// Faces +Z; up once the sheet lies flat.
    Front,
    /// Faces -Z.
    Back,
}

/// Corner fractions, counter-clockwise from the lower-left seen from +Z.
const CORNERS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

const FRONT_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];
const BACK_INDICES: [u16; 6] = [0, 2, 1, 0, 3, 2];

/// One side of one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelMesh {
    /// Side shown.
    pub face: Face,
    /// Quad corners, see `CORNERS` ordering.
    pub vertices: [PanelVertex; 4],
    /// Two triangles.
    pub indices: [u16; 6],
}

impl PanelMesh {
    /// Quad of half-size `half` in the XY plane; `uv_at` maps a corner
    /// fraction to its texture coordinate.
    #[must_use]
    pub fn quad(face: Face, half: Vec2, uv_at: impl Fn(Vec2) -> Vec2) -> Self {
        let (normal, indices) = match face {
            Face::Front => (Vec3::Z, FRONT_INDICES),
            Face::Back => (Vec3::NEG_Z, BACK_INDICES),
        };
        let vertices = CORNERS.map(|frac| {
            let xy = (frac * 2.0 - Vec2::ONE) * half;
            PanelVertex {
                position: [xy.x, xy.y, 0.0],
                normal: normal.to_array(),
                uv: uv_at(frac).to_array(),
            }
        });
        Self {
            face,
            vertices,
            indices,
        }
    }

    /// Vertex positions.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(|v| Vec3::from_array(v.position))
    }

    /// Texture coordinates.
    pub fn uvs(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.vertices.iter().map(|v| Vec2::from_array(v.uv))
    }

    /// Raw vertex bytes for a GPU vertex buffer.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for a GPU index buffer.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
