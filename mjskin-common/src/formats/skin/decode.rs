//! Skin decoding

use glam::{Quat, Vec2, Vec3};

use crate::error::{SkinError, SkinSection};
use crate::geometry::Geometry;

use super::header::SkinHeader;
use super::types::{Bone, Skin};
use super::{BODY_NAME_SIZE, BONE_FIXED_SIZE, FACE_SIZE, TEXCOORD_SIZE, VERTEX_SIZE};

/// Forward-only cursor over a skin buffer.
///
/// Every advance checks the remaining length first.
struct SkinReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> SkinReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Take `len` bytes, or fail without moving the cursor
    fn take(&mut self, section: SkinSection, len: usize) -> Result<&'a [u8], SkinError> {
        if len > self.remaining() {
            return Err(SkinError::TruncatedInput {
                section,
                offset: self.offset,
                needed: len,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// Take `count` records of `size` bytes each as one slice
    fn take_array(
        &mut self,
        section: SkinSection,
        count: usize,
        size: usize,
    ) -> Result<&'a [u8], SkinError> {
        // An overflowing length can never be satisfied by the buffer
        let len = count.checked_mul(size).unwrap_or(usize::MAX);
        self.take(section, len)
    }

    fn read_i32(&mut self, section: SkinSection) -> Result<i32, SkinError> {
        self.take(section, 4).map(|b| le_i32(b, 0))
    }

    /// Read a count field, rejecting negative values
    fn read_count(&mut self, section: SkinSection) -> Result<usize, SkinError> {
        let count = self.read_i32(section)?;
        if count < 0 {
            return Err(SkinError::malformed(
                section,
                format!("count is negative ({})", count),
            ));
        }
        Ok(count as usize)
    }
}

fn le_i32(bytes: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn le_f32(bytes: &[u8], at: usize) -> f32 {
    f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// A stored vertex index, if it lies inside the vertex array
fn vertex_index(value: i32, vertex_count: usize) -> Option<u32> {
    (value >= 0 && (value as usize) < vertex_count).then_some(value as u32)
}

fn vertex_out_of_range(
    section: SkinSection,
    what: String,
    value: i32,
    vertex_count: usize,
) -> SkinError {
    SkinError::malformed(
        section,
        format!(
            "{} references vertex {} but there are {} vertices",
            what, value, vertex_count
        ),
    )
}

/// Decode a complete `.skn` buffer.
///
/// The header counts are validated before any payload is read, and each
/// array is bounds-checked as a whole before it is parsed, so a bogus
/// count fails with [`SkinError::TruncatedInput`] instead of allocating.
pub fn decode_skin(data: &[u8]) -> Result<Skin, SkinError> {
    let mut reader = SkinReader::new(data);

    let header_bytes = reader.take(SkinSection::Header, SkinHeader::SIZE)?;
    let header = SkinHeader::from_bytes(header_bytes)
        .ok_or_else(|| SkinError::malformed(SkinSection::Header, "short header"))?;
    header.validate()?;

    let vertex_count = header.vertex_count as usize;
    let texcoord_count = header.texcoord_count as usize;
    let face_count = header.face_count as usize;
    let bone_count = header.bone_count as usize;

    let vertices: Vec<Vec3> = reader
        .take_array(SkinSection::Vertices, vertex_count, VERTEX_SIZE)?
        .chunks_exact(VERTEX_SIZE)
        .map(|c| Vec3::new(le_f32(c, 0), le_f32(c, 4), le_f32(c, 8)))
        .collect();

    let texcoords: Vec<Vec2> = reader
        .take_array(SkinSection::Texcoords, texcoord_count, TEXCOORD_SIZE)?
        .chunks_exact(TEXCOORD_SIZE)
        .map(|c| Vec2::new(le_f32(c, 0), le_f32(c, 4)))
        .collect();

    let face_bytes = reader.take_array(SkinSection::Faces, face_count, FACE_SIZE)?;
    let mut faces = Vec::with_capacity(face_count);
    for (face, c) in face_bytes.chunks_exact(FACE_SIZE).enumerate() {
        let mut corners = [0u32; 3];
        for (corner, index) in corners.iter_mut().enumerate() {
            let value = le_i32(c, corner * 4);
            *index = vertex_index(value, vertex_count).ok_or_else(|| {
                let what = format!("face {}", face);
                vertex_out_of_range(SkinSection::Faces, what, value, vertex_count)
            })?;
        }
        faces.push(corners);
    }

    // Capacity clamped to the most bone records the buffer could hold
    let mut bones = Vec::with_capacity(bone_count.min(reader.remaining() / BONE_FIXED_SIZE));
    for bone in 0..bone_count {
        bones.push(read_bone(&mut reader, bone, vertex_count)?);
    }

    if reader.remaining() != 0 {
        return Err(SkinError::TrailingBytes {
            offset: reader.offset,
            count: reader.remaining(),
        });
    }

    Ok(Skin::new(Geometry::new(vertices, faces, texcoords), bones))
}

fn read_bone(
    reader: &mut SkinReader<'_>,
    bone: usize,
    vertex_count: usize,
) -> Result<Bone, SkinError> {
    let name_bytes = reader.take(SkinSection::BodyName(bone), BODY_NAME_SIZE)?;
    let Some(name_len) = name_bytes.iter().position(|&b| b == 0) else {
        return Err(SkinError::malformed(SkinSection::BodyName(bone), "not NUL-terminated"));
    };
    let body_name = std::str::from_utf8(&name_bytes[..name_len])
        .map_err(|e| {
            SkinError::malformed(SkinSection::BodyName(bone), format!("not UTF-8: {}", e))
        })?
        .to_owned();

    let pose = reader.take(SkinSection::BindPose(bone), 28)?;
    let bind_position = Vec3::new(le_f32(pose, 0), le_f32(pose, 4), le_f32(pose, 8));
    // Stored w, x, y, z
    let bind_orientation = Quat::from_xyzw(
        le_f32(pose, 16),
        le_f32(pose, 20),
        le_f32(pose, 24),
        le_f32(pose, 12),
    );

    let count = reader.read_count(SkinSection::VertexCount(bone))?;

    let id_bytes = reader.take_array(SkinSection::VertexIds(bone), count, 4)?;
    let mut vertex_ids = Vec::with_capacity(count);
    for (entry, c) in id_bytes.chunks_exact(4).enumerate() {
        let value = le_i32(c, 0);
        let id = vertex_index(value, vertex_count).ok_or_else(|| {
            let what = format!("entry {}", entry);
            vertex_out_of_range(SkinSection::VertexIds(bone), what, value, vertex_count)
        })?;
        vertex_ids.push(id);
    }

    let vertex_weights: Vec<f32> = reader
        .take_array(SkinSection::VertexWeights(bone), count, 4)?
        .chunks_exact(4)
        .map(|c| le_f32(c, 0))
        .collect();

    Ok(Bone {
        body_name,
        bind_position,
        bind_orientation,
        vertex_ids,
        vertex_weights,
    })
}
