//! Target mesh loading (OBJ -> Geometry)

mod axes;
mod obj;

// Re-export public API
pub use axes::AxisConvention;
pub use obj::{ObjError, ObjOptions, load_obj, parse_obj};
