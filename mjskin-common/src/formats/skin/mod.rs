//! MuJoCo skin binary format (.skn)
//!
//! Render-only skin: a triangle mesh plus per-bone vertex weights.
//! POD format - no magic bytes, no self-description beyond the counts.
//!
//! # Layout
//! ```text
//! Header (16 bytes, i32 LE):
//! 0x00: nvert
//! 0x04: ntexcoord   - 0 or nvert
//! 0x08: nface
//! 0x0C: nbone
//!
//! 0x10: vertices    nvert × 3 × f32
//! var:  texcoords   ntexcoord × 2 × f32
//! var:  faces       nface × 3 × i32
//!
//! Per bone (72 + 8 × vertex_count bytes):
//!   body_name     [u8; 40], NUL terminated and padded
//!   bindpos       3 × f32
//!   bindquat      4 × f32 (w, x, y, z)
//!   vertex_count  i32
//!   vertex_ids    vertex_count × i32
//!   weights       vertex_count × f32
//! ```
//!
//! Every count precedes the payload it sizes, so decoding is a single
//! forward pass over the buffer.

mod decode;
mod encode;
mod header;
mod types;


pub use decode::decode_skin;
pub use encode::encode_skin;
pub use header::SkinHeader;
pub use types::{Bone, Skin, SkinSummary};

/// Size of the fixed body name field in bytes
pub const BODY_NAME_SIZE: usize = 40;

/// Longest body name that leaves room for the terminating NUL
pub const MAX_BODY_NAME_LEN: usize = BODY_NAME_SIZE - 1;

/// Size of one vertex position (3 × f32)
pub const VERTEX_SIZE: usize = 12;

/// Size of one texture coordinate (2 × f32)
pub const TEXCOORD_SIZE: usize = 8;

/// Size of one face (3 × i32)
pub const FACE_SIZE: usize = 12;

/// Size of a bone record before its vertex lists (name + bindpos + bindquat + count)
pub const BONE_FIXED_SIZE: usize = BODY_NAME_SIZE + 12 + 16 + 4;
