//! Binary asset formats

pub mod skin;

pub use skin::{
    BODY_NAME_SIZE, BONE_FIXED_SIZE, Bone, FACE_SIZE, MAX_BODY_NAME_LEN, Skin, SkinHeader,
    SkinSummary, TEXCOORD_SIZE, VERTEX_SIZE, decode_skin, encode_skin,
};
