//! Coordinate conventions of exported meshes

use glam::Vec3;

/// Axis convention of an incoming mesh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum AxisConvention {
    /// Blender's OBJ exporter (Y up, -Z forward): undo its axis swap
    #[default]
    Blender,
    /// Coordinates already match the skin
    Native,
}

impl AxisConvention {
    /// Map a vertex position into skin space.
    ///
    /// Blender writes `(x, z, -y)`; swapping y and z and negating the new y
    /// restores `(x, y, z)`.
    pub fn to_skin_space(self, v: Vec3) -> Vec3 {
        match self {
            AxisConvention::Blender => Vec3::new(v.x, -v.z, v.y),
            AxisConvention::Native => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_is_identity() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(AxisConvention::Native.to_skin_space(v), v);
    }

    #[test]
    fn test_blender_undoes_export_swap() {
        // A skin-space point (1, 2, 3) is exported by Blender as (1, 3, -2)
        let exported = Vec3::new(1.0, 3.0, -2.0);
        assert_eq!(
            AxisConvention::Blender.to_skin_space(exported),
            Vec3::new(1.0, 2.0, 3.0)
        );
    }
}
