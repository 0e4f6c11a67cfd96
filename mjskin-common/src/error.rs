//! Skin format error types

use std::fmt;

/// Region of a skin file an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkinSection {
    /// The four leading counts
    Header,
    /// Vertex position array
    Vertices,
    /// Texture coordinate array
    Texcoords,
    /// Face index array
    Faces,
    /// Fixed-size body name of bone `n`
    BodyName(usize),
    /// Bind position and orientation of bone `n`
    BindPose(usize),
    /// Vertex count of bone `n`
    VertexCount(usize),
    /// Vertex id list of bone `n`
    VertexIds(usize),
    /// Vertex weight list of bone `n`
    VertexWeights(usize),
}

impl fmt::Display for SkinSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkinSection::Header => write!(f, "header"),
            SkinSection::Vertices => write!(f, "vertex array"),
            SkinSection::Texcoords => write!(f, "texcoord array"),
            SkinSection::Faces => write!(f, "face array"),
            SkinSection::BodyName(bone) => write!(f, "bone {} body name", bone),
            SkinSection::BindPose(bone) => write!(f, "bone {} bind pose", bone),
            SkinSection::VertexCount(bone) => write!(f, "bone {} vertex count", bone),
            SkinSection::VertexIds(bone) => write!(f, "bone {} vertex ids", bone),
            SkinSection::VertexWeights(bone) => write!(f, "bone {} vertex weights", bone),
        }
    }
}

/// Errors produced while decoding, encoding or validating a skin
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SkinError {
    /// Fewer bytes remain than a declared count requires
    #[error(
        "truncated {section}: needs {needed} bytes at offset {offset}, only {remaining} remain"
    )]
    TruncatedInput {
        section: SkinSection,
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// A count or index is out of range
    #[error("malformed {section}: {reason}")]
    MalformedHeader {
        section: SkinSection,
        reason: String,
    },

    /// Bytes left over after the last bone record
    #[error("{count} trailing bytes after the last bone (offset {offset})")]
    TrailingBytes { offset: usize, count: usize },

    /// A bone's id and weight lists differ in length
    #[error("bone {bone} has {ids} vertex ids but {weights} vertex weights")]
    InconsistentBone {
        bone: usize,
        ids: usize,
        weights: usize,
    },

    /// A body name does not fit the name field with its terminating NUL
    #[error("bone {bone} body name \"{name}\" is {len} bytes (max {max})")]
    BodyNameTooLong {
        bone: usize,
        name: String,
        len: usize,
        max: usize,
    },

    /// A count or index does not fit in a signed 32-bit field
    #[error("{section} value {value} does not fit in a 32-bit field")]
    CountOverflow { section: SkinSection, value: u64 },
}

impl SkinError {
    pub(crate) fn malformed(section: SkinSection, reason: impl Into<String>) -> Self {
        SkinError::MalformedHeader {
            section,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            SkinError::TruncatedInput {
                section: SkinSection::Vertices,
                offset: 16,
                needed: 36,
                remaining: 20,
            }
            .to_string(),
            "truncated vertex array: needs 36 bytes at offset 16, only 20 remain"
        );
        assert_eq!(
            SkinError::malformed(SkinSection::Header, "vertex count is negative (-1)")
                .to_string(),
            "malformed header: vertex count is negative (-1)"
        );
        assert_eq!(
            SkinError::InconsistentBone {
                bone: 2,
                ids: 3,
                weights: 4
            }
            .to_string(),
            "bone 2 has 3 vertex ids but 4 vertex weights"
        );
        assert_eq!(
            SkinError::CountOverflow {
                section: SkinSection::VertexIds(1),
                value: 1 << 31,
            }
            .to_string(),
            "bone 1 vertex ids value 2147483648 does not fit in a 32-bit field"
        );
    }
}
