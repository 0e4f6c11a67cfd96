//! Skin assembly: nearest-vertex transfer of weights and texcoords

use glam::Vec2;
use hashbrown::HashMap;
use mjskin_common::{Bone, Geometry, Skin, decode_skin, encode_skin};

use crate::error::ReskinError;
use crate::spatial::SpatialIndex;

/// What the transfer did, for logging
#[derive(Debug, Clone, PartialEq)]
pub struct ReskinReport {
    /// Nearest source vertex for each target vertex
    pub nearest: Vec<usize>,
    /// Target vertices whose nearest source vertex belongs to no bone
    pub unweighted_vertices: usize,
    /// Largest target-to-source distance
    pub max_distance: f32,
}

/// Build a new skin with `target`'s geometry and `source`'s weights.
///
/// See [`assemble_with_report`].
pub fn assemble(source: &Skin, target: Geometry) -> Result<Skin, ReskinError> {
    assemble_with_report(source, target).map(|(skin, _)| skin)
}

/// Build a new skin with `target`'s geometry and `source`'s weights.
///
/// Every target vertex `z` takes the texcoord of its nearest source vertex
/// `w(z)`, and joins each source bone that lists `w(z)`, with the weight
/// that bone gives `w(z)`. Bones keep their order, body names and bind
/// poses. Target vertices and faces are used unchanged.
pub fn assemble_with_report(
    source: &Skin,
    target: Geometry,
) -> Result<(Skin, ReskinReport), ReskinError> {
    if target.vertices.is_empty() {
        return Err(ReskinError::EmptyTargetGeometry);
    }
    if u32::try_from(target.vertices.len()).is_err() {
        return Err(ReskinError::TooManyVertices(target.vertices.len()));
    }
    source.validate()?;

    let index = SpatialIndex::build(source.vertices())?;
    let matches = index.nearest_all(&target.vertices);
    let max_distance = matches
        .iter()
        .map(|&(_, d)| d.sqrt())
        .fold(0.0f32, f32::max);
    let nearest: Vec<usize> = matches.into_iter().map(|(i, _)| i).collect();

    let texcoords = remap_texcoords(source.texcoords(), &nearest);
    let bones: Vec<Bone> = source
        .bones
        .iter()
        .map(|bone| remap_bone(bone, &nearest))
        .collect();

    let unweighted_vertices = count_unweighted(source, &nearest);

    let geometry = Geometry {
        texcoords,
        ..target
    };
    let report = ReskinReport {
        nearest,
        unweighted_vertices,
        max_distance,
    };
    Ok((Skin::new(geometry, bones), report))
}

/// Texcoord of each target vertex's nearest source vertex.
/// A source without texcoords yields none.
fn remap_texcoords(source: &[Vec2], nearest: &[usize]) -> Vec<Vec2> {
    if source.is_empty() {
        return Vec::new();
    }
    nearest.iter().map(|&w| source[w]).collect()
}

/// Rebuild one bone's influences over the target vertices
fn remap_bone(bone: &Bone, nearest: &[usize]) -> Bone {
    // First occurrence wins if a vertex is listed twice
    let mut weights: HashMap<usize, f32> = HashMap::with_capacity(bone.vertex_ids.len());
    for (vertex, weight) in bone.influences() {
        weights.entry(vertex as usize).or_insert(weight);
    }

    let mut remapped = bone.with_same_pose();
    for (target, source) in nearest.iter().enumerate() {
        if let Some(&weight) = weights.get(source) {
            // Target count was checked against u32 in assemble_with_report
            remapped.push_influence(target as u32, weight);
        }
    }
    remapped
}

fn count_unweighted(source: &Skin, nearest: &[usize]) -> usize {
    let mut weighted = vec![false; source.vertices().len()];
    for bone in &source.bones {
        for &id in &bone.vertex_ids {
            weighted[id as usize] = true;
        }
    }
    nearest.iter().filter(|&&w| !weighted[w]).count()
}

/// Decode `skin_bytes`, move the skin onto `target`, and encode the result
pub fn reskin_bytes(skin_bytes: &[u8], target: Geometry) -> Result<Vec<u8>, ReskinError> {
    let source = decode_skin(skin_bytes)?;
    let skin = assemble(&source, target)?;
    Ok(encode_skin(&skin)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    /// Four vertices at the origin and unit axes, one bone over vertices 0 and 1
    fn source_skin() -> Skin {
        let mut bone = Bone::new("thigh", Vec3::new(0.0, 0.0, 0.5), Quat::IDENTITY);
        bone.push_influence(0, 1.0);
        bone.push_influence(1, 0.5);
        Skin::new(
            Geometry::new(
                vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z],
                vec![[0, 1, 2], [0, 2, 3]],
                vec![Vec2::ZERO, Vec2::X, Vec2::Y, Vec2::ZERO],
            ),
            vec![bone],
        )
    }

    fn target(vertices: Vec<Vec3>) -> Geometry {
        Geometry::new(vertices, Vec::new(), Vec::new())
    }

    #[test]
    fn test_scenario_weights_and_texcoords() {
        let source = source_skin();
        let target = target(vec![Vec3::new(0.99, 0.0, 0.0), Vec3::new(0.0, 1.01, 0.0)]);

        let (skin, report) = assemble_with_report(&source, target).unwrap();
        assert_eq!(report.nearest, vec![1, 2]);
        assert_eq!(skin.bones.len(), 1);
        assert_eq!(skin.bones[0].vertex_ids, vec![0]);
        assert_eq!(skin.bones[0].vertex_weights, vec![0.5]);
        assert_eq!(skin.texcoords(), &[Vec2::X, Vec2::Y]);
        assert_eq!(report.unweighted_vertices, 1);
    }

    #[test]
    fn test_near_origin_maps_to_origin_vertex() {
        let source = source_skin();
        let target = target(vec![Vec3::new(0.01, 0.0, 0.0), Vec3::new(0.0, 1.01, 0.0)]);

        let (skin, report) = assemble_with_report(&source, target).unwrap();
        assert_eq!(report.nearest, vec![0, 2]);
        assert_eq!(skin.bones[0].vertex_ids, vec![0]);
        assert_eq!(skin.bones[0].vertex_weights, vec![1.0]);
        assert_eq!(skin.texcoords(), &[Vec2::ZERO, Vec2::Y]);
    }

    #[test]
    fn test_geometry_preserved() {
        let source = source_skin();
        let vertices = vec![
            Vec3::new(0.1, 0.1, 0.0),
            Vec3::new(0.9, 0.1, 0.0),
            Vec3::new(0.1, 0.9, 0.0),
            Vec3::new(0.4, 0.4, 0.2),
            Vec3::new(0.0, 0.2, 0.8),
        ];
        let faces = vec![[0, 1, 2], [1, 3, 2], [0, 2, 4]];
        let target = Geometry::new(vertices.clone(), faces.clone(), vec![Vec2::ONE; 5]);

        let skin = assemble(&source, target).unwrap();
        assert_eq!(skin.vertices(), vertices.as_slice());
        assert_eq!(skin.faces(), faces.as_slice());
        assert_eq!(skin.texcoords().len(), vertices.len());
    }

    #[test]
    fn test_texcoords_follow_nearest_vertex() {
        let source = source_skin();
        let target = target(vec![
            Vec3::new(0.0, 0.0, 0.9),
            Vec3::new(0.8, 0.1, 0.0),
            Vec3::new(-0.1, -0.1, -0.1),
        ]);

        let (skin, report) = assemble_with_report(&source, target).unwrap();
        for (z, &w) in report.nearest.iter().enumerate() {
            assert_eq!(skin.texcoords()[z], source.texcoords()[w]);
        }
    }

    #[test]
    fn test_bone_order_and_pose_preserved() {
        let mut source = source_skin();
        let pose = Quat::from_rotation_z(0.5);
        let mut second = Bone::new("shin", Vec3::new(1.0, 2.0, 3.0), pose);
        second.push_influence(2, 0.25);
        second.push_influence(3, 0.75);
        source.bones.push(second);
        source.bones.push(Bone::new("foot", Vec3::ZERO, Quat::IDENTITY));

        let skin = assemble(&source, target(vec![Vec3::Z, Vec3::Y, Vec3::X])).unwrap();
        assert_eq!(skin.bones.len(), source.bones.len());
        for (new, old) in skin.bones.iter().zip(&source.bones) {
            assert_eq!(new.body_name, old.body_name);
            assert_eq!(new.bind_position, old.bind_position);
            assert_eq!(new.bind_orientation, old.bind_orientation);
        }
        assert_eq!(skin.bones[0].vertex_ids, vec![2]);
        assert_eq!(skin.bones[1].vertex_ids, vec![0, 1]);
        assert_eq!(skin.bones[1].vertex_weights, vec![0.75, 0.25]);
        assert!(skin.bones[2].vertex_ids.is_empty());
    }

    #[test]
    fn test_many_targets_share_one_source_vertex() {
        let source = source_skin();
        let target = target(vec![
            Vec3::new(1.0, 0.01, 0.0),
            Vec3::new(1.0, -0.01, 0.0),
            Vec3::new(1.1, 0.0, 0.0),
        ]);

        let skin = assemble(&source, target).unwrap();
        assert_eq!(skin.bones[0].vertex_ids, vec![0, 1, 2]);
        assert_eq!(skin.bones[0].vertex_weights, vec![0.5; 3]);
    }

    #[test]
    fn test_duplicate_bone_entry_first_wins() {
        let mut source = source_skin();
        source.bones[0].push_influence(1, 0.9);

        let skin = assemble(&source, target(vec![Vec3::X])).unwrap();
        assert_eq!(skin.bones[0].vertex_weights, vec![0.5]);
    }

    #[test]
    fn test_source_without_texcoords() {
        let mut source = source_skin();
        source.geometry.texcoords.clear();

        let skin = assemble(&source, target(vec![Vec3::X])).unwrap();
        assert!(skin.texcoords().is_empty());
        assert!(skin.validate().is_ok());
    }

    #[test]
    fn test_empty_target_geometry() {
        assert_eq!(
            assemble(&source_skin(), Geometry::default()).unwrap_err(),
            ReskinError::EmptyTargetGeometry
        );
    }

    #[test]
    fn test_empty_source_set() {
        let source = Skin::default();
        assert_eq!(
            assemble(&source, target(vec![Vec3::X])).unwrap_err(),
            ReskinError::EmptySourceSet
        );
    }

    #[test]
    fn test_invalid_source_rejected() {
        let mut source = source_skin();
        source.bones[0].vertex_weights.pop();
        assert!(matches!(
            assemble(&source, target(vec![Vec3::X])),
            Err(ReskinError::Format(_))
        ));
    }

    #[test]
    fn test_reskin_bytes_is_deterministic() {
        let bytes = encode_skin(&source_skin()).unwrap();
        let target = Geometry::new(
            (0..50)
                .map(|i| {
                    let t = i as f32 / 49.0;
                    Vec3::new(t, 1.0 - t, (t * 7.0).sin() * 0.5)
                })
                .collect(),
            vec![[0, 1, 2], [2, 3, 4]],
            Vec::new(),
        );

        let first = reskin_bytes(&bytes, target.clone()).unwrap();
        let second = reskin_bytes(&bytes, target.clone()).unwrap();
        assert_eq!(first, second);

        let decoded = decode_skin(&first).unwrap();
        assert_eq!(decoded.vertices(), target.vertices.as_slice());
    }

    #[test]
    fn test_max_distance_reported() {
        let (_, report) =
            assemble_with_report(&source_skin(), target(vec![Vec3::new(0.0, 0.0, 3.0)])).unwrap();
        assert_eq!(report.nearest, vec![3]);
        assert_eq!(report.max_distance, 2.0);
    }
}
