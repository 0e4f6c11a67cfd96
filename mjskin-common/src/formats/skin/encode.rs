//! Skin encoding

use crate::error::{SkinError, SkinSection};

use super::header::SkinHeader;
use super::types::{Bone, Skin};
use super::{BODY_NAME_SIZE, BONE_FIXED_SIZE, MAX_BODY_NAME_LEN};

fn to_i32(value: usize, section: SkinSection) -> Result<i32, SkinError> {
    i32::try_from(value).map_err(|_| SkinError::CountOverflow {
        section,
        value: value as u64,
    })
}

fn check_bone(bone: &Bone, index: usize) -> Result<(), SkinError> {
    bone.check_lengths(index)?;

    let name = bone.body_name.as_bytes();
    if name.len() > MAX_BODY_NAME_LEN {
        return Err(SkinError::BodyNameTooLong {
            bone: index,
            name: bone.body_name.clone(),
            len: name.len(),
            max: MAX_BODY_NAME_LEN,
        });
    }
    if name.contains(&0) {
        return Err(SkinError::malformed(
            SkinSection::BodyName(index),
            "contains a NUL byte",
        ));
    }

    to_i32(bone.vertex_ids.len(), SkinSection::VertexCount(index))?;
    for &id in &bone.vertex_ids {
        to_i32(id as usize, SkinSection::VertexIds(index))?;
    }
    Ok(())
}

/// Encode a skin to `.skn` bytes.
///
/// Counts are recomputed from the sequences; nothing stored is trusted.
/// All checks run before the first byte is written.
pub fn encode_skin(skin: &Skin) -> Result<Vec<u8>, SkinError> {
    let geometry = &skin.geometry;

    let header = SkinHeader::new(
        to_i32(geometry.vertices.len(), SkinSection::Header)?,
        to_i32(geometry.texcoords.len(), SkinSection::Header)?,
        to_i32(geometry.faces.len(), SkinSection::Header)?,
        to_i32(skin.bones.len(), SkinSection::Header)?,
    );

    for face in &geometry.faces {
        for &index in face {
            to_i32(index as usize, SkinSection::Faces)?;
        }
    }
    for (index, bone) in skin.bones.iter().enumerate() {
        check_bone(bone, index)?;
    }

    let bone_size: usize = skin
        .bones
        .iter()
        .map(|b| BONE_FIXED_SIZE + b.vertex_ids.len() * 8)
        .sum();
    let mut out =
        Vec::with_capacity(SkinHeader::SIZE + header.fixed_payload_size() as usize + bone_size);

    out.extend_from_slice(&header.to_bytes());

    for v in &geometry.vertices {
        for c in v.to_array() {
            out.extend_from_slice(&c.to_le_bytes());
        }
    }

    for t in &geometry.texcoords {
        for c in t.to_array() {
            out.extend_from_slice(&c.to_le_bytes());
        }
    }

    for face in &geometry.faces {
        for &index in face {
            out.extend_from_slice(&(index as i32).to_le_bytes());
        }
    }

    for bone in &skin.bones {
        write_bone(&mut out, bone);
    }

    Ok(out)
}

/// Append one bone record. The bone must already have passed `check_bone`.
fn write_bone(out: &mut Vec<u8>, bone: &Bone) {
    let mut name = [0u8; BODY_NAME_SIZE];
    let bytes = bone.body_name.as_bytes();
    name[..bytes.len()].copy_from_slice(bytes);
    out.extend_from_slice(&name);

    for c in bone.bind_position.to_array() {
        out.extend_from_slice(&c.to_le_bytes());
    }

    // Stored w, x, y, z
    let q = bone.bind_orientation;
    for c in [q.w, q.x, q.y, q.z] {
        out.extend_from_slice(&c.to_le_bytes());
    }

    out.extend_from_slice(&(bone.vertex_ids.len() as i32).to_le_bytes());
    for &id in &bone.vertex_ids {
        out.extend_from_slice(&(id as i32).to_le_bytes());
    }
    for &weight in &bone.vertex_weights {
        out.extend_from_slice(&weight.to_le_bytes());
    }
}
