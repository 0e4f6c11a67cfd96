//! Skin header

use crate::error::{SkinError, SkinSection};

use super::{FACE_SIZE, TEXCOORD_SIZE, VERTEX_SIZE};

/// Skin header (16 bytes)
///
/// Counts are stored signed, as MuJoCo writes them. A decoded header is
/// only trusted after [`SkinHeader::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct SkinHeader {
    pub vertex_count: i32,
    pub texcoord_count: i32,
    pub face_count: i32,
    pub bone_count: i32,
}

impl SkinHeader {
    pub const SIZE: usize = 16;

    pub fn new(vertex_count: i32, texcoord_count: i32, face_count: i32, bone_count: i32) -> Self {
        Self {
            vertex_count,
            texcoord_count,
            face_count,
            bone_count,
        }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.vertex_count.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.texcoord_count.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.face_count.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.bone_count.to_le_bytes());
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            vertex_count: i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            texcoord_count: i32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            face_count: i32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            bone_count: i32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
        })
    }

    /// Check the counts before any payload is read.
    ///
    /// All counts must be non-negative and the texcoord count must be
    /// either zero or equal to the vertex count.
    pub fn validate(&self) -> Result<(), SkinError> {
        let counts = [
            ("vertex", self.vertex_count),
            ("texcoord", self.texcoord_count),
            ("face", self.face_count),
            ("bone", self.bone_count),
        ];
        for (name, count) in counts {
            if count < 0 {
                return Err(SkinError::malformed(
                    SkinSection::Header,
                    format!("{} count is negative ({})", name, count),
                ));
            }
        }

        if self.texcoord_count != 0 && self.texcoord_count != self.vertex_count {
            return Err(SkinError::malformed(
                SkinSection::Header,
                format!(
                    "texcoord count {} must be 0 or match vertex count {}",
                    self.texcoord_count, self.vertex_count
                ),
            ));
        }

        Ok(())
    }

    /// Bytes taken by the vertex, texcoord and face arrays.
    ///
    /// Only meaningful for a validated header.
    pub fn fixed_payload_size(&self) -> u64 {
        self.vertex_count.max(0) as u64 * VERTEX_SIZE as u64
            + self.texcoord_count.max(0) as u64 * TEXCOORD_SIZE as u64
            + self.face_count.max(0) as u64 * FACE_SIZE as u64
    }
}
