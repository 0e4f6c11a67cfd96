//! OBJ mesh loading
//!
//! Vertices keep their file order so a vertex's index in the OBJ is its
//! index in the resulting skin. Faces are fan-triangulated.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use glam::{Vec2, Vec3};
use mjskin_common::Geometry;

use super::axes::AxisConvention;

/// OBJ loading errors
#[derive(Debug, thiserror::Error)]
pub enum ObjError {
    #[error("failed to read OBJ: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: invalid number \"{token}\"")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: \"{kind}\" record needs at least {expected} values")]
    MissingValues {
        line: usize,
        kind: &'static str,
        expected: usize,
    },

    #[error("line {line}: face references {kind} {index}, but {count} are defined")]
    IndexOutOfRange {
        line: usize,
        kind: &'static str,
        index: i64,
        count: usize,
    },

    #[error("line {line}: face has fewer than 3 vertices")]
    DegenerateFace { line: usize },

    #[error("object or group \"{0}\" not found")]
    ObjectNotFound(String),

    #[error("no vertices found in OBJ file")]
    NoVertices,
}

/// How to interpret an OBJ file
#[derive(Debug, Clone, Default)]
pub struct ObjOptions {
    /// Axis convention of the exporter
    pub axes: AxisConvention,
    /// Keep only faces under this `o`/`g` name
    pub object: Option<String>,
}

/// Load an OBJ file into geometry
pub fn load_obj(input: &Path, options: &ObjOptions) -> Result<Geometry, ObjError> {
    let file = File::open(input)?;
    parse_obj(BufReader::new(file), options)
}

/// Parse OBJ text into geometry.
///
/// Reads `v`, `vt`, `f`, `o` and `g` records and ignores everything else.
/// Each vertex takes the texcoord of the first face corner that names one;
/// if the file has texcoords, vertices never given one get `(0, 0)`.
pub fn parse_obj<R: BufRead>(reader: R, options: &ObjOptions) -> Result<Geometry, ObjError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut tex_coords: Vec<Vec2> = Vec::new();
    let mut vertex_uvs: Vec<Option<Vec2>> = Vec::new();
    let mut faces: Vec<[u32; 3]> = Vec::new();

    let mut in_selected_object = options.object.is_none();
    let mut found_object = false;

    for (line_index, line) in reader.lines().enumerate() {
        let line_number = line_index + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "v" => {
                let [x, y, z] = parse_floats::<3>(&parts, line_number, "v")?;
                positions.push(options.axes.to_skin_space(Vec3::new(x, y, z)));
                vertex_uvs.push(None);
            }
            "vt" => {
                let [u, v] = parse_floats::<2>(&parts, line_number, "vt")?;
                tex_coords.push(Vec2::new(u, v));
            }
            "o" | "g" => {
                if let Some(name) = &options.object {
                    in_selected_object = parts[1..].contains(&name.as_str());
                    found_object |= in_selected_object;
                }
            }
            "f" => {
                if parts.len() < 4 {
                    return Err(ObjError::DegenerateFace { line: line_number });
                }

                let mut corners = Vec::with_capacity(parts.len() - 1);
                for token in &parts[1..] {
                    let (vi, vti) =
                        parse_face_corner(token, positions.len(), tex_coords.len(), line_number)?;
                    if let Some(ti) = vti {
                        vertex_uvs[vi].get_or_insert(tex_coords[ti]);
                    }
                    corners.push(vi as u32);
                }

                if in_selected_object {
                    // Fan triangulation for convex polygons
                    for i in 1..corners.len() - 1 {
                        faces.push([corners[0], corners[i], corners[i + 1]]);
                    }
                }
            }
            _ => {}
        }
    }

    if let Some(name) = &options.object {
        if !found_object {
            return Err(ObjError::ObjectNotFound(name.clone()));
        }
    }

    if positions.is_empty() {
        return Err(ObjError::NoVertices);
    }

    let texcoords = if tex_coords.is_empty() {
        Vec::new()
    } else {
        vertex_uvs
            .into_iter()
            .map(|uv| uv.unwrap_or(Vec2::ZERO))
            .collect()
    };

    tracing::debug!(
        "Parsed OBJ: {} vertices, {} triangles, {} texcoords",
        positions.len(),
        faces.len(),
        texcoords.len()
    );

    Ok(Geometry::new(positions, faces, texcoords))
}

/// Parse the first `N` numbers after the record keyword
fn parse_floats<const N: usize>(
    parts: &[&str],
    line: usize,
    kind: &'static str,
) -> Result<[f32; N], ObjError> {
    if parts.len() < N + 1 {
        return Err(ObjError::MissingValues {
            line,
            kind,
            expected: N,
        });
    }
    let mut values = [0.0f32; N];
    for (value, token) in values.iter_mut().zip(&parts[1..]) {
        *value = token.parse().map_err(|_| ObjError::InvalidNumber {
            line,
            token: token.to_string(),
        })?;
    }
    Ok(values)
}

/// Parse a face corner: "v", "v/vt", "v/vt/vn", or "v//vn".
///
/// Returns 0-based (vertex, texcoord) indices. Negative indices count back
/// from the most recently defined element.
fn parse_face_corner(
    token: &str,
    vertex_count: usize,
    texcoord_count: usize,
    line: usize,
) -> Result<(usize, Option<usize>), ObjError> {
    let mut fields = token.split('/');

    let vertex = fields.next().unwrap_or_default();
    let vi = resolve_index(vertex, vertex_count, "vertex", line)?;

    let vti = match fields.next() {
        Some(field) if !field.is_empty() => {
            Some(resolve_index(field, texcoord_count, "texcoord", line)?)
        }
        _ => None,
    };

    Ok((vi, vti))
}

fn resolve_index(
    field: &str,
    count: usize,
    kind: &'static str,
    line: usize,
) -> Result<usize, ObjError> {
    let raw: i64 = field.parse().map_err(|_| ObjError::InvalidNumber {
        line,
        token: field.to_string(),
    })?;

    let out_of_range = || ObjError::IndexOutOfRange {
        line,
        kind,
        index: raw,
        count,
    };

    // OBJ indices are 1-based; negative indices are relative to the end
    let resolved = if raw > 0 {
        raw - 1
    } else if raw < 0 {
        count as i64 + raw
    } else {
        return Err(out_of_range());
    };

    if resolved < 0 || resolved as usize >= count {
        return Err(out_of_range());
    }
    Ok(resolved as usize)
}
