//! Indexed triangle geometry shared by skins and loaded meshes

use glam::{Vec2, Vec3};

/// Indexed triangle geometry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    /// Vertex positions. A vertex's index is its identity.
    pub vertices: Vec<Vec3>,
    /// Triangles as triples of indices into `vertices`
    pub faces: Vec<[u32; 3]>,
    /// Texture coordinates, one per vertex, or empty if the mesh has none
    pub texcoords: Vec<Vec2>,
}

impl Geometry {
    pub fn new(vertices: Vec<Vec3>, faces: Vec<[u32; 3]>, texcoords: Vec<Vec2>) -> Self {
        Self {
            vertices,
            faces,
            texcoords,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns `(face, vertex_index)` for the first face corner that points
    /// past the end of `vertices`.
    pub fn find_out_of_range_face(&self) -> Option<(usize, u32)> {
        let vertex_count = self.vertices.len();
        self.faces.iter().enumerate().find_map(|(face, corners)| {
            corners
                .iter()
                .find(|&&index| index as usize >= vertex_count)
                .map(|&index| (face, index))
        })
    }

    /// Axis-aligned bounds of the vertices, or `None` when empty
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(min, max), &v| (min.min(v), max.max(v))),
        )
    }
}
