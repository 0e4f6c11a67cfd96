//! Shared types for MuJoCo skin conversion
//!
//! This crate provides the pieces shared between:
//! - `mjskin-reskin` (weight transfer tool)
//! - anything else that needs to read or write `.skn` files
//!
//! # Modules
//!
//! - [`formats`] - The `.skn` binary format (decode/encode)
//! - [`geometry`] - Plain indexed triangle geometry
//! - [`error`] - Format error types

pub mod error;
pub mod formats;
pub mod geometry;

pub use error::{SkinError, SkinSection};
pub use formats::{
    BODY_NAME_SIZE, Bone, MAX_BODY_NAME_LEN, Skin, SkinHeader, SkinSummary, decode_skin,
    encode_skin,
};
pub use geometry::Geometry;
