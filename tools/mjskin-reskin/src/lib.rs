//! mjskin-reskin library
//!
//! Transfers bone weights and texture coordinates from an existing MuJoCo
//! skin onto new geometry, one nearest source vertex per target vertex.
//! The binary wraps [`convert::reskin_files`]; the in-memory pieces are
//! public for other tools.

pub mod convert;
pub mod error;
pub mod mesh;
pub mod reskin;
pub mod spatial;

// Re-export the skin format so callers need only this crate
pub use mjskin_common::{Bone, Geometry, Skin, SkinError, decode_skin, encode_skin};

pub use convert::{ReskinOptions, reskin_files};
pub use error::ReskinError;
pub use mesh::{AxisConvention, ObjError, ObjOptions, load_obj, parse_obj};
pub use reskin::{ReskinReport, assemble, assemble_with_report, reskin_bytes};
pub use spatial::{SpatialIndex, nearest_brute_force};
