//! Test asset generators for integration tests

use std::fs;
use std::io;
use std::path::Path;

use glam::{Quat, Vec2, Vec3};
use mjskin_reskin::{Bone, Geometry, Skin, encode_skin};

/// Source skin: unit quad in the z = 0 plane, split into two triangles.
///
/// "upper" owns the top edge, "lower" the bottom edge, and vertex 3 is
/// shared between them.
pub fn source_skin() -> Skin {
    let vertices = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    let texcoords = vec![Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];

    let mut lower = Bone::new("lower", Vec3::ZERO, Quat::IDENTITY);
    lower.push_influence(0, 1.0);
    lower.push_influence(1, 1.0);
    lower.push_influence(3, 0.5);

    let mut upper = Bone::new("upper", Vec3::Y, Quat::from_rotation_x(0.25));
    upper.push_influence(2, 1.0);
    upper.push_influence(3, 0.5);

    Skin::new(
        Geometry::new(vertices, vec![[0, 1, 2], [0, 2, 3]], texcoords),
        vec![lower, upper],
    )
}

/// Write [`source_skin`] as a .skn file
pub fn generate_source_skn(path: &Path) -> io::Result<()> {
    let bytes = encode_skin(&source_skin()).map_err(io::Error::other)?;
    fs::write(path, bytes)
}

/// Write a slightly shrunken copy of the source quad as an OBJ, with the
/// vertices listed in reverse order and positions in skin space.
pub fn generate_native_quad_obj(path: &Path) -> io::Result<()> {
    let obj = "\
# Reversed, shrunken quad
o body
v 0.05 0.95 0
v 0.95 0.95 0
v 0.95 0.05 0
v 0.05 0.05 0
f 4 3 2 1
";
    fs::write(path, obj)
}

/// The same quad as [`generate_native_quad_obj`], written the way Blender
/// exports it: `(x, y, z)` stored as `(x, z, -y)`.
pub fn generate_blender_quad_obj(path: &Path) -> io::Result<()> {
    let obj = "\
# Blender export
o body
v 0.05 0 -0.95
v 0.95 0 -0.95
v 0.95 0 -0.05
v 0.05 0 -0.05
f 4 3 2 1
";
    fs::write(path, obj)
}

/// Two objects; only "body" lies near the source skin
pub fn generate_two_object_obj(path: &Path) -> io::Result<()> {
    let obj = "\
o props
v 5 5 5
v 6 5 5
v 5 6 5
f 1 2 3
o body
v 0.1 0.1 0
v 0.9 0.1 0
v 0.9 0.9 0
f 4 5 6
";
    fs::write(path, obj)
}

/// An OBJ with no vertex records
pub fn generate_empty_obj(path: &Path) -> io::Result<()> {
    fs::write(path, "# no geometry\nmtllib empty.mtl\n")
}
