//! Skin and bone types

use std::fmt;

use glam::{Quat, Vec2, Vec3};

use crate::error::{SkinError, SkinSection};
use crate::geometry::Geometry;

/// A bone and the vertices it influences
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    /// Name of the rig body this bone follows. Never resolved here.
    pub body_name: String,
    /// Bone frame origin at bind time
    pub bind_position: Vec3,
    /// Bone frame rotation at bind time
    pub bind_orientation: Quat,
    /// Influenced vertices, indices into the skin's vertex array
    pub vertex_ids: Vec<u32>,
    /// Weight of each entry in `vertex_ids`, positionally
    pub vertex_weights: Vec<f32>,
}

impl Bone {
    /// Bone with a bind pose and no influences
    pub fn new(body_name: impl Into<String>, bind_position: Vec3, bind_orientation: Quat) -> Self {
        Self {
            body_name: body_name.into(),
            bind_position,
            bind_orientation,
            vertex_ids: Vec::new(),
            vertex_weights: Vec::new(),
        }
    }

    /// Same body and bind pose, no influences
    pub fn with_same_pose(&self) -> Self {
        Self::new(
            self.body_name.clone(),
            self.bind_position,
            self.bind_orientation,
        )
    }

    pub fn push_influence(&mut self, vertex: u32, weight: f32) {
        self.vertex_ids.push(vertex);
        self.vertex_weights.push(weight);
    }

    /// `(vertex, weight)` pairs in file order
    pub fn influences(&self) -> impl Iterator<Item = (u32, f32)> + '_ {
        self.vertex_ids
            .iter()
            .copied()
            .zip(self.vertex_weights.iter().copied())
    }

    pub(crate) fn check_lengths(&self, bone: usize) -> Result<(), SkinError> {
        if self.vertex_ids.len() != self.vertex_weights.len() {
            return Err(SkinError::InconsistentBone {
                bone,
                ids: self.vertex_ids.len(),
                weights: self.vertex_weights.len(),
            });
        }
        Ok(())
    }
}

/// A decoded or assembled skin
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skin {
    pub geometry: Geometry,
    pub bones: Vec<Bone>,
}

impl Skin {
    pub fn new(geometry: Geometry, bones: Vec<Bone>) -> Self {
        Self { geometry, bones }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.geometry.vertices
    }

    pub fn faces(&self) -> &[[u32; 3]] {
        &self.geometry.faces
    }

    pub fn texcoords(&self) -> &[Vec2] {
        &self.geometry.texcoords
    }

    pub fn summary(&self) -> SkinSummary {
        SkinSummary {
            vertex_count: self.geometry.vertices.len(),
            texcoord_count: self.geometry.texcoords.len(),
            face_count: self.geometry.faces.len(),
            bone_count: self.bones.len(),
            influence_count: self.bones.iter().map(|b| b.vertex_ids.len()).sum(),
        }
    }

    /// Check the invariants that [`decode_skin`](super::decode_skin) enforces
    /// on file data, for skins built in memory.
    pub fn validate(&self) -> Result<(), SkinError> {
        let vertex_count = self.geometry.vertices.len();
        let texcoord_count = self.geometry.texcoords.len();

        if texcoord_count != 0 && texcoord_count != vertex_count {
            return Err(SkinError::malformed(
                SkinSection::Texcoords,
                format!("{} texcoords for {} vertices", texcoord_count, vertex_count),
            ));
        }

        if let Some((face, index)) = self.geometry.find_out_of_range_face() {
            return Err(SkinError::malformed(
                SkinSection::Faces,
                format!("face {} uses vertex {} of {}", face, index, vertex_count),
            ));
        }

        for (bone_index, bone) in self.bones.iter().enumerate() {
            bone.check_lengths(bone_index)?;
            if let Some(&id) = bone
                .vertex_ids
                .iter()
                .find(|&&id| id as usize >= vertex_count)
            {
                return Err(SkinError::malformed(
                    SkinSection::VertexIds(bone_index),
                    format!("vertex {} out of range for {} vertices", id, vertex_count),
                ));
            }
        }

        Ok(())
    }
}

/// Element counts of a skin, for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkinSummary {
    pub vertex_count: usize,
    pub texcoord_count: usize,
    pub face_count: usize,
    pub bone_count: usize,
    /// Total (vertex, weight) entries across all bones
    pub influence_count: usize,
}

impl fmt::Display for SkinSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} texcoords, {} faces, {} bones, {} weights",
            self.vertex_count,
            self.texcoord_count,
            self.face_count,
            self.bone_count,
            self.influence_count
        )
    }
}
